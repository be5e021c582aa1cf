use anyhow::Result;
use sacker_site::config::{BrowserKind, Config};
use sacker_site::prerender::{ChromeBrowser, HttpBrowser, PrerenderReport, Prerenderer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in CI)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sacker_site=info".parse()?),
        )
        .init();

    info!("Starting prerender");

    let config = Config::from_env()?;
    let prerenderer = Prerenderer::new(&config);

    let report = match config.browser {
        BrowserKind::Chrome => {
            prerenderer
                .run(|| ChromeBrowser::launch(config.chrome_path.as_deref()))
                .await?
        }
        BrowserKind::Http => prerenderer.run(|| async { HttpBrowser::launch() }).await?,
    };

    log_failures(&report);
    info!("Prerendering finished!");
    Ok(())
}

fn log_failures(report: &PrerenderReport) {
    if report.is_complete() {
        return;
    }

    warn!(
        "{} page(s) were not prerendered and keep the client-rendered shell:",
        report.failures.len()
    );
    for failure in &report.failures {
        warn!(
            "  {} ({}): {:#}",
            failure.route.path(),
            failure.language.code(),
            failure.error
        );
    }
}
