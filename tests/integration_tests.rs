//! Integration tests for the Sacker Manufactures site toolkit
//!
//! These tests run the prerender batch end to end against a temporary build
//! directory served by the local content server, and exercise the SEO file
//! generation and client session flows across modules.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio_tungstenite::tungstenite::Message;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use sacker_site::client::{
    ClientSession, ConsentDecision, FileStorage, InMemoryDocument, Setting,
};
use sacker_site::config::{BrowserKind, Config};
use sacker_site::contact::{ContactForm, ContactFormState, EmailClient, NotificationKind};
use sacker_site::i18n::{Language, LanguageStrings};
use sacker_site::prerender::{Browser, CaptureError, ChromeBrowser, HttpBrowser, Prerenderer};
use sacker_site::routes::{LocalizedRoute, Route};
use sacker_site::seo::{sitemap, PageMetadata};

// ==================== Test Helpers ====================

const SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>Sacker Manufactures</title>
    <meta name="description" content="Shell description" />
    <meta property="og:title" content="Shell" />
    <script type="application/ld+json">{"@type":"Organization"}</script>
    <script type="module" src="/assets/index.js"></script>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>"#;

/// Create a build directory containing the client shell
fn create_build(temp_dir: &TempDir) -> std::path::PathBuf {
    let dist = temp_dir.path().join("dist");
    std::fs::create_dir_all(dist.join("assets")).expect("Failed to create dist");
    std::fs::write(dist.join("index.html"), SHELL).expect("Failed to write shell");
    std::fs::write(dist.join("assets/index.js"), "console.log('app')").expect("Failed to write js");
    dist
}

/// Create a test config for a local batch (HTTP capture, no settle delay)
fn create_test_config(temp_dir: &TempDir, port: u16) -> Config {
    Config {
        site_url: "https://sackermanufactures.com".to_string(),
        project_root: temp_dir.path().to_path_buf(),
        dist_dir: temp_dir.path().join("dist"),
        public_dir: temp_dir.path().join("public"),
        build_command: "false".to_string(),
        port,
        browser: BrowserKind::Http,
        chrome_path: None,
        navigation_timeout: Duration::from_secs(10),
        settle_delay: Duration::ZERO,
        emailjs_api_url: "http://127.0.0.1:1".to_string(),
        emailjs_service_id: "service_test".to_string(),
        emailjs_template_id: "template_test".to_string(),
        emailjs_public_key: "public_test".to_string(),
    }
}

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .map(|addr| addr.port())
        .expect("Failed to find a free port")
}

fn read(dist: &Path, relative: &str) -> String {
    std::fs::read_to_string(dist.join(relative))
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
}

/// Fails navigation for one route path in every language
struct FlakyBrowser {
    inner: HttpBrowser,
    failing_suffix: &'static str,
}

impl Browser for FlakyBrowser {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<(), CaptureError> {
        if url.ends_with(self.failing_suffix) {
            return Err(CaptureError::Timeout {
                url: url.to_string(),
                timeout,
            });
        }
        self.inner.goto(url, timeout).await
    }

    async fn content(&mut self) -> Result<String, CaptureError> {
        self.inner.content().await
    }

    async fn close(self) {
        self.inner.close().await;
    }
}

/// Stand-in Chromium: answers `--version`, logs every real start, announces a
/// DevTools endpoint and stays alive until the endpoint sees `Browser.close`.
#[cfg(unix)]
fn write_fake_chromium(dir: &Path, devtools_port: u16) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-chromium");
    let body = format!(
        r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "Chromium 130.0.0.0"
  exit 0
fi
echo "$@" >> "{log}"
echo "DevTools listening on ws://127.0.0.1:{port}/devtools/browser/fake" >&2
while [ ! -f "{closed}" ]; do sleep 0.05; done
"#,
        log = dir.join("launches.log").display(),
        port = devtools_port,
        closed = dir.join("closed").display(),
    );
    std::fs::write(&script, body).expect("Failed to write fake chromium");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake chromium executable");
    script
}

/// Answers the DevTools commands of one browser session. Navigations to
/// `/portfolio` fail; every other page renders a document naming its URL.
#[cfg(unix)]
async fn serve_fake_devtools(listener: tokio::net::TcpListener, closed_flag: PathBuf) {
    let (stream, _) = listener.accept().await.unwrap();
    let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();
    let mut current_url = String::new();
    let mut loads = 0;

    while let Some(Ok(message)) = socket.next().await {
        let request: Value = match message {
            Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
            _ => continue,
        };
        let id = request["id"].clone();
        let mut events = Vec::new();

        let result = match request["method"].as_str().unwrap_or_default() {
            "Target.createTarget" => json!({ "targetId": "T1" }),
            "Target.attachToTarget" => json!({ "sessionId": "S1" }),
            "Page.navigate" => {
                current_url = request["params"]["url"].as_str().unwrap().to_string();
                if current_url.ends_with("/portfolio") {
                    json!({ "frameId": "F1", "loaderId": "", "errorText": "net::ERR_ABORTED" })
                } else {
                    loads += 1;
                    let loader_id = format!("L{}", loads);
                    events.push(json!({
                        "method": "Page.lifecycleEvent",
                        "sessionId": "S1",
                        "params": { "name": "networkIdle", "loaderId": loader_id }
                    }));
                    json!({ "frameId": "F1", "loaderId": loader_id })
                }
            }
            "Runtime.evaluate" => json!({
                "result": {
                    "type": "string",
                    "value": format!(
                        r#"<html lang="en"><head><title>Shell</title></head><body><div id="root">{}</div></body></html>"#,
                        current_url
                    )
                }
            }),
            "Browser.close" => {
                let response = json!({ "id": id, "result": {} });
                socket.send(Message::Text(response.to_string().into())).await.unwrap();
                std::fs::write(&closed_flag, "").unwrap();
                break;
            }
            _ => json!({}),
        };

        let response = json!({ "id": id, "result": result });
        socket.send(Message::Text(response.to_string().into())).await.unwrap();
        for event in events {
            socket.send(Message::Text(event.to_string().into())).await.unwrap();
        }
    }
}

// ==================== Prerender Batch Tests ====================

#[tokio::test]
async fn test_full_batch_writes_every_page() {
    let temp_dir = TempDir::new().unwrap();
    let dist = create_build(&temp_dir);
    let config = create_test_config(&temp_dir, 0);

    let report = Prerenderer::new(&config)
        .run(|| async { HttpBrowser::launch() })
        .await
        .expect("Batch should succeed");

    assert!(report.is_complete());
    assert_eq!(report.written.len(), 16);

    for localized in LocalizedRoute::all() {
        let relative = match localized.url_path().trim_start_matches('/') {
            "" => "index.html".to_string(),
            path => format!("{}/index.html", path),
        };
        let html = read(&dist, &relative);
        let metadata =
            PageMetadata::for_route(&config.site_url, localized.route, localized.language);

        assert!(
            html.contains(&format!(
                r#"<html lang="{}" dir="{}">"#,
                metadata.html_lang(),
                metadata.html_dir()
            )),
            "{}",
            relative
        );
        assert_eq!(html.matches("<title>").count(), 1, "{}", relative);
        assert_eq!(html.matches(r#"name="description""#).count(), 1, "{}", relative);
        assert_eq!(html.matches("application/ld+json").count(), 1, "{}", relative);
        assert!(!html.contains("Shell description"));
        assert!(html.contains(r#"<script type="module" src="/assets/index.js"></script>"#));
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_chrome_batch_uses_one_browser_process() {
    let temp_dir = TempDir::new().unwrap();
    let dist = create_build(&temp_dir);
    let config = create_test_config(&temp_dir, 0);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let devtools_port = listener.local_addr().unwrap().port();
    let closed_flag = temp_dir.path().join("closed");
    let devtools = tokio::spawn(serve_fake_devtools(listener, closed_flag.clone()));
    let chromium = write_fake_chromium(temp_dir.path(), devtools_port);

    let report = Prerenderer::new(&config)
        .run(|| ChromeBrowser::launch(Some(chromium.as_path())))
        .await
        .expect("Batch should succeed");
    devtools.await.unwrap();

    let launches = std::fs::read_to_string(temp_dir.path().join("launches.log")).unwrap();
    assert_eq!(launches.lines().count(), 1);
    assert!(launches.contains("--remote-debugging-port=0"));
    assert!(closed_flag.exists());

    assert_eq!(report.written.len(), 14);
    assert_eq!(report.failures.len(), 2);
    assert!(report
        .failures
        .iter()
        .all(|failure| failure.route == Route::Portfolio));

    let about = read(&dist, "about/index.html");
    assert!(about.starts_with("<!DOCTYPE html>"));
    assert!(about.contains(r#"<html lang="en" dir="ltr">"#));
    assert!(about.contains("/about</div>"));
    assert!(read(&dist, "he/about/index.html").contains("/he/about</div>"));
}

#[tokio::test]
async fn test_hebrew_root_page_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let dist = create_build(&temp_dir);
    let config = create_test_config(&temp_dir, 0);

    Prerenderer::new(&config)
        .run(|| async { HttpBrowser::launch() })
        .await
        .unwrap();

    let html = read(&dist, "he/index.html");
    assert!(html.contains(r#"<html lang="he" dir="rtl">"#));
    assert!(html.contains(r#"<link rel="canonical" href="https://sackermanufactures.com/he">"#));
    assert!(html.contains(
        r#"<link rel="alternate" hreflang="en" href="https://sackermanufactures.com/">"#
    ));
    assert!(html.contains(r#"<meta property="og:locale" content="he_IL">"#));
    assert!(html.contains("\"Manufacturer\""));
}

#[tokio::test]
async fn test_failing_route_does_not_abort_batch() {
    let temp_dir = TempDir::new().unwrap();
    let dist = create_build(&temp_dir);
    let config = create_test_config(&temp_dir, 0);

    let report = Prerenderer::new(&config)
        .run(|| async {
            Ok::<_, anyhow::Error>(FlakyBrowser {
                inner: HttpBrowser::launch()?,
                failing_suffix: "/portfolio",
            })
        })
        .await
        .expect("Per-route failures are not fatal");

    assert_eq!(report.written.len(), 14);
    assert_eq!(report.failures.len(), 2);
    assert!(report
        .failures
        .iter()
        .all(|failure| failure.route == Route::Portfolio));
    assert_eq!(report.failures[0].language, Language::ENGLISH);
    assert_eq!(report.failures[1].language, Language::HEBREW);

    assert!(!dist.join("portfolio/index.html").exists());
    assert!(!dist.join("he/portfolio/index.html").exists());
    assert!(dist.join("contact/index.html").exists());
    assert!(dist.join("he/accessibility/index.html").exists());
}

#[tokio::test]
async fn test_browser_launch_failure_is_fatal_and_releases_port() {
    let temp_dir = TempDir::new().unwrap();
    create_build(&temp_dir);
    let port = free_port();
    let config = create_test_config(&temp_dir, port);

    let result = Prerenderer::new(&config)
        .run(|| async {
            let browser: Result<HttpBrowser> = Err(anyhow::anyhow!("no browser"));
            browser
        })
        .await;

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("no browser"));
    assert!(tokio::net::TcpListener::bind(("127.0.0.1", port)).await.is_ok());
}

#[tokio::test]
async fn test_missing_build_with_failing_command_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&temp_dir, 0);

    let result = Prerenderer::new(&config)
        .run(|| async { HttpBrowser::launch() })
        .await;

    let err = format!("{:#}", result.unwrap_err());
    assert!(err.contains("Build command"), "{}", err);
}

#[tokio::test]
async fn test_later_pages_get_their_own_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let dist = create_build(&temp_dir);
    let config = create_test_config(&temp_dir, 0);

    Prerenderer::new(&config)
        .run(|| async { HttpBrowser::launch() })
        .await
        .unwrap();

    // English home is written first; later pages must still start from the shell
    let about = read(&dist, "about/index.html");
    assert_eq!(about.matches("<!-- OpenGraph -->").count(), 1);
    assert!(about.contains("About Us"));
    assert!(!about.contains("Premium Clothing Manufacturing Since 1994</title>"));
}

// ==================== SEO File Tests ====================

#[test]
fn test_seo_files_written_to_every_target() {
    let temp_dir = TempDir::new().unwrap();
    let config = create_test_config(&temp_dir, 0);
    let lastmod = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

    let written =
        sitemap::write_seo_files(&config.site_url, lastmod, &config.seo_targets()).unwrap();

    assert_eq!(written.len(), 4);
    for dir in [&config.dist_dir, &config.public_dir] {
        let xml = std::fs::read_to_string(dir.join("sitemap.xml")).unwrap();
        assert_eq!(xml.matches("<url>").count(), 16);
        assert_eq!(xml.matches("<lastmod>2026-01-15</lastmod>").count(), 16);

        let robots = std::fs::read_to_string(dir.join("robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: https://sackermanufactures.com/sitemap.xml"));
    }
}

// ==================== Client Session Tests ====================

#[test]
fn test_client_preferences_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let storage_path = temp_dir.path().join("local-storage.json");

    let mut session =
        ClientSession::start(FileStorage::open(&storage_path), InMemoryDocument::new());
    session.set_language(Language::HEBREW);
    session.update_accessibility(Setting::TextSpacing(true));
    session.increase_font_size();
    session.decide_consent(ConsentDecision::Declined);
    drop(session);

    let restored =
        ClientSession::start(FileStorage::open(&storage_path), InMemoryDocument::new());

    assert_eq!(restored.language(), Language::HEBREW);
    assert_eq!(restored.document().lang, "he");
    assert_eq!(restored.document().root_font_size, 110);
    assert!(restored
        .document()
        .has_body_class("accessibility-text-spacing"));
    assert!(!restored.banner_visible(Duration::from_secs(10)));
}

// ==================== Contact Form Tests ====================

#[tokio::test]
async fn test_contact_form_notification_in_session_language() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mut config = create_test_config(&temp_dir, 0);
    config.emailjs_api_url = mock_server.uri();

    let client = EmailClient::from_config(&config);
    let mut form = ContactFormState::new(ContactForm {
        from_name: "Noa".to_string(),
        company_name: String::new(),
        from_email: "noa@example.com".to_string(),
        phone: String::new(),
        message: "Samples for spring".to_string(),
    });

    let strings = LanguageStrings::for_language(Language::HEBREW);
    let notification = form.submit(&client, strings).await;

    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.message, strings.contact.success_message);
    assert_eq!(form.form, ContactForm::default());
}
