//! Sitemap and robots.txt generation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use super::site::absolute_url;
use crate::routes::LocalizedRoute;

/// Build the sitemap XML for every (language, route) pair.
///
/// Entries follow route-table order, English first. Each entry links to the
/// same page in the other language.
pub fn generate_sitemap(base_url: &str, lastmod: NaiveDate) -> String {
    let lastmod = lastmod.format("%Y-%m-%d").to_string();

    let entries = LocalizedRoute::all()
        .iter()
        .map(|page| {
            let alternate = page.alternate();
            format!(
                "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />\n  </url>",
                absolute_url(base_url, &page.url_path()),
                lastmod,
                page.route.change_frequency().as_str(),
                page.route.priority(),
                alternate.language.code(),
                absolute_url(base_url, &alternate.url_path()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"\n        xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n{}\n</urlset>",
        entries
    )
}

/// Crawl policy: everything except API and build-tool internals.
pub fn generate_robots(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\nDisallow: /_vite/\n\nSitemap: {}\n",
        absolute_url(base_url, "/sitemap.xml")
    )
}

/// Write `sitemap.xml` and `robots.txt` into every target directory.
///
/// Returns the paths written, in order.
pub fn write_seo_files(
    base_url: &str,
    lastmod: NaiveDate,
    targets: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let sitemap = generate_sitemap(base_url, lastmod);
    let robots = generate_robots(base_url);
    let mut written = Vec::new();

    for dir in targets {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        for (name, content) in [("sitemap.xml", &sitemap), ("robots.txt", &robots)] {
            let path = dir.join(name);
            write_file(&path, content)?;
            info!("✓ {} created: {}", name, path.display());
            written.push(path);
        }
    }

    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::Route;
    use crate::seo::site::DEFAULT_BASE_URL;
    use regex::Regex;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    // ==================== Sitemap Tests ====================

    #[test]
    fn test_sitemap_has_sixteen_urls() {
        let sitemap = generate_sitemap(DEFAULT_BASE_URL, date());

        assert_eq!(sitemap.matches("<url>").count(), 16);
        assert_eq!(sitemap.matches("</url>").count(), 16);
        assert!(sitemap.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(sitemap.contains("xmlns:xhtml=\"http://www.w3.org/1999/xhtml\""));
    }

    #[test]
    fn test_sitemap_entries_follow_policy_table() {
        let sitemap = generate_sitemap(DEFAULT_BASE_URL, date());
        let entry = Regex::new(
            r#"(?s)<url>\s*<loc>([^<]+)</loc>\s*<lastmod>([^<]+)</lastmod>\s*<changefreq>([^<]+)</changefreq>\s*<priority>([^<]+)</priority>\s*<xhtml:link rel="alternate" hreflang="(\w+)" href="([^"]+)" />\s*</url>"#,
        )
        .unwrap();

        let captures: Vec<_> = entry.captures_iter(&sitemap).collect();
        assert_eq!(captures.len(), 16);

        for (index, caps) in captures.iter().enumerate() {
            let route = Route::ALL[index % 8];
            let loc = &caps[1];
            let alternate_href = &caps[6];

            assert!(!loc.is_empty());
            assert_eq!(&caps[2], "2026-10-19");
            assert_eq!(&caps[3], route.change_frequency().as_str());
            assert_eq!(&caps[4], format!("{:.1}", route.priority()));

            let page = LocalizedRoute::parse(&loc[DEFAULT_BASE_URL.len()..]).unwrap();
            let alternate =
                LocalizedRoute::parse(&alternate_href[DEFAULT_BASE_URL.len()..]).unwrap();
            assert_eq!(page.route, route);
            assert_eq!(alternate.route, route);
            assert_eq!(alternate.language, page.language.other());
            assert_eq!(&caps[5], alternate.language.code());
        }
    }

    #[test]
    fn test_sitemap_hebrew_root_location() {
        let sitemap = generate_sitemap(DEFAULT_BASE_URL, date());

        assert!(sitemap.contains("<loc>https://sackermanufactures.com/he</loc>"));
        assert!(sitemap.contains("<priority>1.0</priority>"));
        assert!(sitemap.contains("<priority>0.3</priority>"));
    }

    // ==================== Robots Tests ====================

    #[test]
    fn test_robots_content() {
        let robots = generate_robots(DEFAULT_BASE_URL);

        assert_eq!(
            robots,
            "User-agent: *\nAllow: /\nDisallow: /api/\nDisallow: /_vite/\n\nSitemap: https://sackermanufactures.com/sitemap.xml\n"
        );
    }

    // ==================== File Output Tests ====================

    #[test]
    fn test_write_seo_files_to_both_targets() {
        let temp = TempDir::new().unwrap();
        let dist = temp.path().join("dist");
        let public = temp.path().join("public");

        let written =
            write_seo_files(DEFAULT_BASE_URL, date(), &[dist.clone(), public.clone()]).unwrap();

        assert_eq!(written.len(), 4);
        for dir in [&dist, &public] {
            let sitemap = std::fs::read_to_string(dir.join("sitemap.xml")).unwrap();
            let robots = std::fs::read_to_string(dir.join("robots.txt")).unwrap();
            assert_eq!(sitemap, generate_sitemap(DEFAULT_BASE_URL, date()));
            assert!(robots.contains("Sitemap:"));
        }
    }
}
