//! Configuration module

mod site;

pub use site::AnchorPolicy;
pub use site::ReadingConfig;
pub use site::SiteConfig;
pub use site::TocConfig;
