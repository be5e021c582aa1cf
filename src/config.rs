use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::seo::site::DEFAULT_BASE_URL;

/// Which headless renderer drives the prerender batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    /// Headless Chromium/Chrome, executes client-side scripts
    Chrome,
    /// Plain HTTP fetch of the served document
    Http,
}

impl BrowserKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Ok(BrowserKind::Chrome),
            "http" => Ok(BrowserKind::Http),
            other => bail!(
                "Invalid PRERENDER_BROWSER: '{}'. Expected 'chrome' or 'http'",
                other
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_url: String,

    // Layout
    pub project_root: PathBuf,
    pub dist_dir: PathBuf,
    pub public_dir: PathBuf,
    pub build_command: String,

    // Prerender
    pub port: u16,
    pub browser: BrowserKind,
    pub chrome_path: Option<PathBuf>,
    pub navigation_timeout: Duration,
    pub settle_delay: Duration,

    // Contact form delivery
    pub emailjs_api_url: String,
    pub emailjs_service_id: String,
    pub emailjs_template_id: String,
    pub emailjs_public_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let project_root =
            PathBuf::from(std::env::var("PROJECT_ROOT").unwrap_or_else(|_| ".".to_string()));

        Ok(Self {
            site_url: std::env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),

            // Layout - dist/ and public/ live under the project root unless overridden
            dist_dir: std::env::var("DIST_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| project_root.join("dist")),
            public_dir: std::env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| project_root.join("public")),
            build_command: std::env::var("BUILD_COMMAND")
                .unwrap_or_else(|_| "npm run build".to_string()),
            project_root,

            // Prerender
            port: std::env::var("PRERENDER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            browser: match std::env::var("PRERENDER_BROWSER") {
                Ok(value) => BrowserKind::parse(&value)?,
                Err(_) => BrowserKind::Chrome,
            },
            chrome_path: std::env::var("CHROME_PATH").ok().map(PathBuf::from),
            navigation_timeout: Duration::from_secs(
                std::env::var("NAVIGATION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            ),
            settle_delay: Duration::from_millis(
                std::env::var("SETTLE_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
            ),

            // EmailJS - identifiers are public, shipped with the site bundle
            emailjs_api_url: std::env::var("EMAILJS_API_URL")
                .unwrap_or_else(|_| "https://api.emailjs.com".to_string()),
            emailjs_service_id: std::env::var("EMAILJS_SERVICE_ID")
                .unwrap_or_else(|_| "service_gjaaryo".to_string()),
            emailjs_template_id: std::env::var("EMAILJS_TEMPLATE_ID")
                .unwrap_or_else(|_| "template_av1tcog".to_string()),
            emailjs_public_key: std::env::var("EMAILJS_PUBLIC_KEY")
                .unwrap_or_else(|_| "S9Il73om1Uaj0aeui".to_string()),
        })
    }

    /// Directories that receive sitemap.xml and robots.txt.
    pub fn seo_targets(&self) -> Vec<PathBuf> {
        vec![self.dist_dir.clone(), self.public_dir.clone()]
    }
}
