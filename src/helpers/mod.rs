//! Formatting helpers for dates and URLs

mod date;
mod url;

pub use date::*;
pub use url::*;
