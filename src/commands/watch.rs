//! Watch the content directory and keep the post cache fresh

use anyhow::{Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::cache::PostCache;
use crate::commands::list::format_posts;
use crate::content::PostRepository;
use crate::Folio;

/// Quiet period before a burst of file events is handled
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Watch for content changes, invalidate the cache and reprint the listing
pub fn run(folio: &Folio) -> Result<()> {
    // Watcher events carry absolute paths
    let root = folio
        .content_dir
        .canonicalize()
        .with_context(|| format!("Content directory {:?} does not exist", folio.content_dir))?;
    let mut cache = PostCache::new(PostRepository::with_config(&root, &folio.config));

    print!("{}", format_posts(cache.list()));

    let (tx, rx) = channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;
    debouncer
        .watcher()
        .watch(&root, RecursiveMode::NonRecursive)?;

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", root);

    for result in rx {
        match result {
            Ok(events) => {
                for event in &events {
                    match cache.invalidate_path(&event.path) {
                        Some(slug) => tracing::info!("Changed: {}", slug),
                        None => tracing::debug!("Changed: {:?}", event.path),
                    }
                }
                print!("{}", format_posts(cache.list()));
            }
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}
