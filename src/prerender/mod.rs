//! Build-time prerendering of every (route, language) pair.
//!
//! The batch serves the static build locally, captures each page through a
//! [`Browser`], rewrites its head metadata and writes it to the output layout.
//! Pages are processed strictly one at a time: all English routes in table
//! order, then all Hebrew routes.

pub mod browser;
pub mod build;
mod devtools;
pub mod output;
pub mod rewrite;
pub mod server;

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::Config;
use crate::i18n::Language;
use crate::routes::{LocalizedRoute, Route};
use crate::seo::PageMetadata;

pub use browser::{Browser, CaptureError, ChromeBrowser, HttpBrowser};
pub use server::StaticServer;

/// A page that could not be prerendered. The rest of the batch is unaffected.
#[derive(Debug)]
pub struct RouteFailure {
    pub route: Route,
    pub language: Language,
    pub error: anyhow::Error,
}

/// Outcome of a prerender batch.
#[derive(Debug, Default)]
pub struct PrerenderReport {
    /// Files written, in processing order
    pub written: Vec<PathBuf>,
    pub failures: Vec<RouteFailure>,
}

impl PrerenderReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Prerenderer<'a> {
    config: &'a Config,
}

impl<'a> Prerenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Run the whole batch.
    ///
    /// Build, server bind and browser launch failures abort with an error.
    /// Per-page failures are collected in the report. The server and browser
    /// are released before returning on every path.
    pub async fn run<B, F, Fut>(&self, launch: F) -> Result<PrerenderReport>
    where
        B: Browser,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<B>>,
    {
        build::ensure_build(self.config).await?;

        let server = StaticServer::start(&self.config.dist_dir, self.config.port).await?;

        let mut browser = match launch().await.context("Failed to launch browser") {
            Ok(browser) => browser,
            Err(e) => {
                server.stop().await;
                return Err(e);
            }
        };

        let report = self.render_all(&mut browser, &server.base_url()).await;

        browser.close().await;
        server.stop().await;

        info!(
            "Prerendering complete: {} written, {} failed",
            report.written.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Capture and write every page through an already running server.
    pub async fn render_all<B: Browser>(&self, browser: &mut B, server_url: &str) -> PrerenderReport {
        let mut report = PrerenderReport::default();

        for language in Language::all() {
            info!("=== Processing {} pages ===", language.code().to_uppercase());

            for route in Route::ALL {
                match self.render_page(browser, server_url, route, language).await {
                    Ok(path) => {
                        info!("✓ Saved {}", path.display());
                        report.written.push(path);
                    }
                    Err(e) => {
                        error!(
                            "✗ Error prerendering {} ({}): {:#}",
                            route.path(),
                            language.code(),
                            e
                        );
                        report.failures.push(RouteFailure {
                            route,
                            language,
                            error: e,
                        });
                    }
                }
            }
        }

        report
    }

    async fn render_page<B: Browser>(
        &self,
        browser: &mut B,
        server_url: &str,
        route: Route,
        language: Language,
    ) -> Result<PathBuf> {
        let url = format!(
            "{}{}",
            server_url.trim_end_matches('/'),
            LocalizedRoute::new(route, language).url_path()
        );
        info!("Prerendering {}", url);

        browser.goto(&url, self.config.navigation_timeout).await?;
        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }
        let html = browser.content().await?;

        let metadata = PageMetadata::for_route(&self.config.site_url, route, language);
        let html = rewrite::rewrite_document(&html, &metadata);

        let path = output::output_path(&self.config.dist_dir, route, language);
        output::write_page(&path, &html).await?;
        Ok(path)
    }
}
