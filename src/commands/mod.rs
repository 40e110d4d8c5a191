//! CLI commands

pub mod list;
pub mod show;
pub mod sitemap;
pub mod toc;
pub mod watch;
