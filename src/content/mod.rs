//! Content module - front-matter, derived fields, and the post repository

mod error;
mod frontmatter;
mod markdown;
mod post;
pub mod reading_time;
mod repository;
pub mod tags;
pub mod toc;

pub use error::ContentError;
pub use frontmatter::{parse_date_string, FrontMatter, Metadata};
pub use markdown::MarkdownRenderer;
pub use post::{sort_by_date, Post, PostMeta};
pub use reading_time::ReadingTime;
pub use repository::PostRepository;
pub use tags::TagCount;
pub use toc::Heading;
