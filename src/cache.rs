//! On-disk cache for fetched marketplace pages
//!
//! One HTML file per card, named after the url-encoded card name.
//! Failures are logged and behave like a cache miss.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub struct PageCache {
    cache_dir: PathBuf,
    max_age: Duration,
}

impl PageCache {
    /// Create a page cache in `cache_dir`, creating the directory if needed
    pub fn new(cache_dir: &Path, max_age: Duration) -> Self {
        if let Err(e) = std::fs::create_dir_all(cache_dir) {
            log::warn!("Failed to create page cache directory: {}", e);
        } else {
            log::info!("Page cache directory: {:?}", cache_dir);
        }

        Self {
            cache_dir: cache_dir.to_path_buf(),
            max_age,
        }
    }

    fn page_path(&self, card: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{}.html", urlencoding::encode(&card.to_lowercase())))
    }

    fn is_fresh(&self, path: &Path) -> bool {
        std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age <= self.max_age)
    }

    /// Get a cached page if it is younger than the max age
    pub fn get(&self, card: &str) -> Option<String> {
        let path = self.page_path(card);
        if !self.is_fresh(&path) {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(html) => {
                log::debug!("Page cache hit for: {}", card);
                Some(html)
            }
            Err(_) => None,
        }
    }

    /// Store a page in the cache
    pub fn insert(&self, card: &str, html: &str) {
        let path = self.page_path(card);
        if let Err(e) = std::fs::write(&path, html) {
            log::warn!("Failed to cache page for {}: {}", card, e);
        } else {
            log::debug!("Cached page for: {}", card);
        }
    }
}
