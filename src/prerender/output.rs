//! Output layout of prerendered pages.
//!
//! ```text
//! dist/index.html              English home
//! dist/about/index.html        English routes
//! dist/he/index.html           Hebrew home
//! dist/he/about/index.html     Hebrew routes
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::i18n::Language;
use crate::routes::Route;

/// Where the prerendered document for a (route, language) pair is written.
pub fn output_path(dist_dir: &Path, route: Route, language: Language) -> PathBuf {
    let mut dir = dist_dir.to_path_buf();

    let prefix = language.url_prefix().trim_start_matches('/');
    if !prefix.is_empty() {
        dir.push(prefix);
    }
    if !route.is_root() {
        dir.push(route.slug());
    }

    dir.join("index.html")
}

/// Write a page, creating parent directories as needed.
pub async fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
