//! Page capture backends.
//!
//! A [`Browser`] loads one URL at a time and hands back the rendered document,
//! mirroring a single headless browser tab.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, Command};
use tracing::{debug, info, warn};

use super::devtools::{endpoint_from_log_line, is_network_idle, DevTools};

/// Recoverable failure while capturing one page.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("navigation to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("browser failed to render {url}: {message}")]
    Process { url: String, message: String },

    #[error("no page has been loaded")]
    NoPage,
}

/// A single headless tab navigated through pages one at a time.
#[allow(async_fn_in_trait)]
pub trait Browser {
    /// Load `url`, giving up after `timeout`.
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), CaptureError>;

    /// The fully rendered document of the last loaded page.
    async fn content(&mut self) -> Result<String, CaptureError>;

    /// Release the browser. Called exactly once at the end of a batch.
    async fn close(self);
}

/// Executables tried, in order, when no explicit path is configured.
const CHROME_CANDIDATES: [&str; 5] = [
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

/// Time allowed for the browser to start and open its DevTools endpoint.
const LAUNCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound for serializing the loaded document.
const CAPTURE_TIMEOUT: Duration = Duration::from_secs(30);

/// Grace period for a clean exit before the process is killed.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

const DOCUMENT_EXPRESSION: &str = "document.documentElement.outerHTML";

static NEXT_PROFILE: AtomicU64 = AtomicU64::new(0);

/// One headless Chromium/Chrome process with a single tab, driven over the
/// DevTools protocol.
///
/// The process is started by [`ChromeBrowser::launch`] and lives until
/// [`Browser::close`]. Navigations wait for network idle, and the page keeps
/// running scripts until its content is captured.
pub struct ChromeBrowser {
    process: Child,
    devtools: DevTools,
    session_id: String,
    profile_dir: PathBuf,
    current_url: Option<String>,
}

impl ChromeBrowser {
    /// Start the browser and open its tab. Failure here is fatal for the batch.
    pub async fn launch(chrome_path: Option<&Path>) -> Result<Self> {
        let executable = find_executable(chrome_path).await?;
        let profile_dir = std::env::temp_dir().join(format!(
            "sacker-site-chrome-{}-{}",
            std::process::id(),
            NEXT_PROFILE.fetch_add(1, Ordering::Relaxed)
        ));

        let mut process = Command::new(&executable)
            .args([
                "--headless=new",
                "--disable-gpu",
                "--no-sandbox",
                "--disable-setuid-sandbox",
                "--hide-scrollbars",
                "--no-first-run",
                "--no-default-browser-check",
                "--remote-debugging-port=0",
            ])
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg("about:blank")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start {}", executable.display()))?;

        let stderr = process
            .stderr
            .take()
            .context("Headless browser output was not captured")?;
        let mut lines = BufReader::new(stderr).lines();
        let endpoint = tokio::time::timeout(LAUNCH_TIMEOUT, read_endpoint(&mut lines))
            .await
            .context("Timed out waiting for the headless browser to open DevTools")??;

        // Keep draining so the browser never blocks on a full pipe
        tokio::spawn(async move {
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("chromium: {}", line);
            }
        });

        let mut devtools = DevTools::connect(&endpoint).await?;
        let target = devtools
            .call("Target.createTarget", json!({ "url": "about:blank" }), None)
            .await?;
        let target_id = target
            .get("targetId")
            .and_then(Value::as_str)
            .context("Target.createTarget returned no targetId")?
            .to_string();

        let attached = devtools
            .call(
                "Target.attachToTarget",
                json!({ "targetId": target_id, "flatten": true }),
                None,
            )
            .await?;
        let session_id = attached
            .get("sessionId")
            .and_then(Value::as_str)
            .context("Target.attachToTarget returned no sessionId")?
            .to_string();

        devtools.call("Page.enable", json!({}), Some(&session_id)).await?;
        devtools
            .call(
                "Page.setLifecycleEventsEnabled",
                json!({ "enabled": true }),
                Some(&session_id),
            )
            .await?;

        info!("✓ Headless browser started ({})", executable.display());
        Ok(Self {
            process,
            devtools,
            session_id,
            profile_dir,
            current_url: None,
        })
    }

    async fn navigate(&mut self, url: &str) -> Result<()> {
        let result = self
            .devtools
            .call("Page.navigate", json!({ "url": url }), Some(&self.session_id))
            .await?;

        if let Some(error) = result.get("errorText").and_then(Value::as_str) {
            bail!("navigation failed: {}", error);
        }

        let loader_id = result
            .get("loaderId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.devtools
            .wait_for_event(|event| is_network_idle(event, &loader_id))
            .await?;
        Ok(())
    }
}

/// Try candidates with `--version` and return the first one that runs.
async fn find_executable(chrome_path: Option<&Path>) -> Result<PathBuf> {
    let candidates: Vec<PathBuf> = match chrome_path {
        Some(path) => vec![path.to_path_buf()],
        None => CHROME_CANDIDATES.iter().map(PathBuf::from).collect(),
    };

    for candidate in candidates {
        let output = Command::new(&candidate)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                info!(
                    "Using headless browser: {}",
                    String::from_utf8_lossy(&output.stdout).trim()
                );
                return Ok(candidate);
            }
            Ok(output) => debug!(
                "{} --version exited with {}",
                candidate.display(),
                output.status
            ),
            Err(e) => debug!("{} not usable: {}", candidate.display(), e),
        }
    }

    match chrome_path {
        Some(path) => bail!("Headless browser at {} could not be started", path.display()),
        None => bail!(
            "No headless browser found (tried {}). Set CHROME_PATH",
            CHROME_CANDIDATES.join(", ")
        ),
    }
}

async fn read_endpoint(lines: &mut Lines<BufReader<ChildStderr>>) -> Result<String> {
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read headless browser output")?
    {
        if let Some(endpoint) = endpoint_from_log_line(&line) {
            return Ok(endpoint.to_string());
        }
        debug!("chromium: {}", line);
    }
    bail!("Headless browser exited before opening DevTools")
}

impl Browser for ChromeBrowser {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), CaptureError> {
        self.current_url = None;
        self.devtools.clear_events();

        match tokio::time::timeout(timeout, self.navigate(url)).await {
            Err(_) => Err(CaptureError::Timeout {
                url: url.to_string(),
                timeout,
            }),
            Ok(Err(e)) => Err(CaptureError::Process {
                url: url.to_string(),
                message: format!("{:#}", e),
            }),
            Ok(Ok(())) => {
                self.current_url = Some(url.to_string());
                Ok(())
            }
        }
    }

    async fn content(&mut self) -> Result<String, CaptureError> {
        let url = self.current_url.clone().ok_or(CaptureError::NoPage)?;

        let evaluate = self.devtools.call(
            "Runtime.evaluate",
            json!({ "expression": DOCUMENT_EXPRESSION, "returnByValue": true }),
            Some(&self.session_id),
        );
        let result = match tokio::time::timeout(CAPTURE_TIMEOUT, evaluate).await {
            Err(_) => {
                return Err(CaptureError::Timeout {
                    url,
                    timeout: CAPTURE_TIMEOUT,
                })
            }
            Ok(Err(e)) => {
                return Err(CaptureError::Process {
                    url,
                    message: format!("{:#}", e),
                })
            }
            Ok(Ok(result)) => result,
        };

        match result.pointer("/result/value").and_then(Value::as_str) {
            Some(dom) if !dom.trim().is_empty() => Ok(with_doctype(dom.to_string())),
            _ => Err(CaptureError::Process {
                url,
                message: "empty document".to_string(),
            }),
        }
    }

    async fn close(mut self) {
        let shutdown = self.devtools.call("Browser.close", json!({}), None);
        match tokio::time::timeout(CLOSE_TIMEOUT, shutdown).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => debug!("Browser.close: {:#}", e),
            Err(_) => debug!("Browser.close got no response"),
        }

        match tokio::time::timeout(CLOSE_TIMEOUT, self.process.wait()).await {
            Ok(Ok(status)) => debug!("Headless browser exited with {}", status),
            Ok(Err(e)) => warn!("Failed to wait for headless browser: {}", e),
            Err(_) => {
                warn!("Headless browser still running after {:?}, killing it", CLOSE_TIMEOUT);
                if let Err(e) = self.process.kill().await {
                    warn!("Failed to kill headless browser: {}", e);
                }
            }
        }

        if let Err(e) = tokio::fs::remove_dir_all(&self.profile_dir).await {
            debug!("Profile {} not removed: {}", self.profile_dir.display(), e);
        }
        info!("✓ Headless browser closed");
    }
}

/// `outerHTML` of the root element carries no doctype.
fn with_doctype(dom: String) -> String {
    if dom.trim_start().to_ascii_lowercase().starts_with("<!doctype") {
        dom
    } else {
        format!("<!DOCTYPE html>\n{}", dom)
    }
}

/// Captures the served document over plain HTTP without running scripts.
pub struct HttpBrowser {
    client: reqwest::Client,
    page: Option<String>,
}

impl HttpBrowser {
    pub fn launch() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, page: None })
    }
}

impl Browser for HttpBrowser {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), CaptureError> {
        self.page = None;

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(url, timeout, e))?;

        if !response.status().is_success() {
            return Err(CaptureError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(url, timeout, e))?;
        self.page = Some(body);
        Ok(())
    }

    async fn content(&mut self) -> Result<String, CaptureError> {
        self.page.clone().ok_or(CaptureError::NoPage)
    }

    async fn close(self) {
        debug!("HTTP browser released");
    }
}

fn transport_error(url: &str, timeout: Duration, e: reqwest::Error) -> CaptureError {
    if e.is_timeout() {
        CaptureError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        CaptureError::Transport {
            url: url.to_string(),
            source: e,
        }
    }
}
