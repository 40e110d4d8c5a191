//! Write the sitemap

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::sitemap::build_sitemap;
use crate::Folio;

/// Build the sitemap and write it to `output`, or stdout when `None`
pub fn run(folio: &Folio, output: Option<&Path>) -> Result<()> {
    let posts = folio.repository().list_posts();
    let now = chrono::Utc::now().naive_utc();
    let xml = build_sitemap(&folio.config, &posts, now);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, xml)?;
            tracing::info!("Wrote sitemap with {} posts to {:?}", posts.len(), path);
        }
        None => print!("{}", xml),
    }

    Ok(())
}
