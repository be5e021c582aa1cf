//! Head rewriting for captured documents.
//!
//! The client shell ships generic head metadata; every captured page has it
//! stripped and replaced by the page-specific block.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::seo::PageMetadata;

static HTML_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static LANG_DIR_ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
static HEAD_OPEN_REGEX: OnceLock<Regex> = OnceLock::new();
static HEAD_CLOSE_REGEX: OnceLock<Regex> = OnceLock::new();
static BODY_OPEN_REGEX: OnceLock<Regex> = OnceLock::new();
static STALE_HEAD_TAG_REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
static JSON_LD_REGEX: OnceLock<Regex> = OnceLock::new();
static BLANK_LINES_REGEX: OnceLock<Regex> = OnceLock::new();

fn html_tag_regex() -> &'static Regex {
    HTML_TAG_REGEX.get_or_init(|| Regex::new(r"(?i)<html\b([^>]*)>").unwrap())
}

fn lang_dir_attr_regex() -> &'static Regex {
    LANG_DIR_ATTR_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)\s+(?:lang|dir)\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'>]+)"#).unwrap()
    })
}

fn head_open_regex() -> &'static Regex {
    HEAD_OPEN_REGEX.get_or_init(|| Regex::new(r"(?i)<head\b[^>]*>").unwrap())
}

fn head_close_regex() -> &'static Regex {
    HEAD_CLOSE_REGEX.get_or_init(|| Regex::new(r"(?i)</head\s*>").unwrap())
}

fn body_open_regex() -> &'static Regex {
    BODY_OPEN_REGEX.get_or_init(|| Regex::new(r"(?i)<body\b").unwrap())
}

fn json_ld_regex() -> &'static Regex {
    JSON_LD_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?is)<script\b[^>]*\btype\s*=\s*["']application/ld\+json["'][^>]*>.*?</script\s*>"#,
        )
        .unwrap()
    })
}

/// Tags the generated block owns. Attribute order inside a tag does not matter.
fn stale_head_tag_regexes() -> &'static [Regex] {
    STALE_HEAD_TAG_REGEXES.get_or_init(|| {
        [
            r"(?is)<title\b[^>]*>.*?</title\s*>",
            r#"(?i)<meta\b[^>]*\bname\s*=\s*["'](?:description|robots|author|keywords|twitter:[^"']*)["'][^>]*>"#,
            r#"(?i)<meta\b[^>]*\bproperty\s*=\s*["']og:[^"']*["'][^>]*>"#,
            r#"(?i)<link\b[^>]*\brel\s*=\s*["'](?:canonical|alternate)["'][^>]*>"#,
            r"(?i)<!--\s*(?:OpenGraph|Twitter Card)\s*-->",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
    })
}

fn blank_lines_regex() -> &'static Regex {
    BLANK_LINES_REGEX.get_or_init(|| Regex::new(r"\n(?:[ \t]*\n){2,}").unwrap())
}

/// Rewrite a captured document for one page.
///
/// Sets `lang`/`dir` on the root element (other root attributes are kept),
/// removes every stale metadata tag from the head and every JSON-LD block from
/// the document, then inserts the freshly rendered metadata right after the
/// head's opening tag.
pub fn rewrite_document(html: &str, metadata: &PageMetadata) -> String {
    let (head, rest) = split_head(html);

    let head = set_root_attributes(head, metadata.html_lang(), metadata.html_dir());
    let head = strip_stale_metadata(&head);
    let rest = json_ld_regex().replace_all(rest, "");

    let block = metadata.render_head();
    let head = if head_open_regex().is_match(&head) {
        head_open_regex()
            .replacen(&head, 1, |caps: &Captures| format!("{}\n{}", &caps[0], block))
            .into_owned()
    } else {
        insert_missing_head(&head, &block)
    };

    format!("{}{}", head, rest)
}

/// Split at `</head>`, or at `<body` when the head is never closed.
fn split_head(html: &str) -> (&str, &str) {
    match head_close_regex()
        .find(html)
        .or_else(|| body_open_regex().find(html))
    {
        Some(boundary) => html.split_at(boundary.start()),
        None => (html, ""),
    }
}

fn set_root_attributes(html: &str, lang: &str, dir: &str) -> String {
    html_tag_regex()
        .replacen(html, 1, |caps: &Captures| {
            let others = lang_dir_attr_regex().replace_all(&caps[1], "");
            format!(r#"<html lang="{}" dir="{}"{}>"#, lang, dir, others)
        })
        .into_owned()
}

fn strip_stale_metadata(head: &str) -> String {
    let mut head = json_ld_regex().replace_all(head, "").into_owned();
    for regex in stale_head_tag_regexes() {
        head = regex.replace_all(&head, "").into_owned();
    }
    blank_lines_regex().replace_all(&head, "\n\n").into_owned()
}

/// Documents without a head get one right after the root element (or at the very start).
fn insert_missing_head(html: &str, block: &str) -> String {
    let head = format!("<head>\n{}\n</head>", block);
    match html_tag_regex().find(html) {
        Some(tag) => format!("{}{}{}", &html[..tag.end()], head, &html[tag.end()..]),
        None => format!("{}{}", head, html),
    }
}
