//! Writes sitemap.xml and robots.txt for every route and language.
//!
//! Usage:
//!   cargo run --bin generate-sitemap
//!
//! Optional:
//! - SITE_URL (defaults to https://sackermanufactures.com)
//! - DIST_DIR / PUBLIC_DIR (default to dist/ and public/ under PROJECT_ROOT)

use anyhow::Result;
use chrono::Utc;
use sacker_site::config::Config;
use sacker_site::seo::sitemap;
use tracing::info;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sacker_site=info".parse()?)
                .add_directive("generate_sitemap=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let lastmod = Utc::now().date_naive();

    let written = sitemap::write_seo_files(&config.site_url, lastmod, &config.seo_targets())?;

    info!(
        "Wrote {} files for {} (lastmod {})",
        written.len(),
        config.site_url,
        lastmod.format("%Y-%m-%d")
    );
    Ok(())
}
