//! Per-page head metadata: title, description, links, social cards and JSON-LD.

use serde_json::Value;

use super::html::escape_html;
use super::schema::structured_data;
use super::site::{self, absolute_url};
use crate::i18n::{Language, TextDirection};
use crate::routes::{localize, Route};

/// Head metadata for one (path, language) pair.
///
/// Pure derived data: built fresh for each page and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub alternate_url: String,
    pub alternate_language: Language,
    pub x_default_url: String,
    pub image: String,
    /// Open Graph locale of this page (`en_US`, `he_IL`).
    pub locale: &'static str,
    pub alternate_locale: &'static str,
    pub language: Language,
    pub direction: TextDirection,
    pub structured_data: Value,
}

struct PageCopy {
    title: &'static str,
    description: &'static str,
    image: &'static str,
}

/// Localized title, description and social image for a known route.
fn page_copy(route: Route, language: Language) -> PageCopy {
    let hebrew = language == Language::HEBREW;
    let (title, description, image) = match (route, hebrew) {
        (Route::Home, false) => (
            "Sacker Manufactures - Premium Clothing Manufacturing Since 1994",
            "Over 30 years of proven expertise in clothing manufacturing. We deliver high-quality, on-time production for leading fashion brands worldwide. Pattern making, sampling, production & quality control.",
            "og-home.jpg",
        ),
        (Route::Home, true) => (
            "Sacker Manufactures - ייצור אופנה פרימיום מאז 1994",
            "למעלה מ-30 שנות מומחיות מוכחת בייצור בגדים. אנו מספקים ייצור באיכות גבוהה ובזמן למותגי אופנה מובילים ברחבי העולם. הכנת גזרות, דגימות, ייצור ובקרת איכות.",
            "og-home.jpg",
        ),
        (Route::About, false) => (
            "About Us - 30+ Years of Excellence | Sacker Manufactures",
            "For over three decades, Sacker Manufactures has been the trusted partner of leading fashion brands. Learn about our team, experience, and values that set us apart.",
            "og-about.jpg",
        ),
        (Route::About, true) => (
            "אודות - 30+ שנות מצוינות | Sacker Manufactures",
            "למעלה משלושה עשורים, Sacker Manufactures היא השותפה האמינה של מותגי אופנה מובילים. למד על הצוות, הניסיון והערכים שמייחדים אותנו.",
            "og-about.jpg",
        ),
        (Route::Services, false) => (
            "Our Services - Full Suite Manufacturing Solutions | Sacker",
            "Pattern Making & Sampling, Small & Large Production Runs, Premium Quality Control, and Garment Refinish services. Flexible solutions for fashion brands of all sizes.",
            "og-services.jpg",
        ),
        (Route::Services, true) => (
            "השירותים שלנו - פתרונות ייצור מלאים | Sacker",
            "הכנת גזרות ודגימות, ייצור בכמויות קטנות וגדולות, בקרת איכות פרימיום ושירותי גימור בגדים. פתרונות גמישים למותגי אופנה בכל הגדלים.",
            "og-services.jpg",
        ),
        (Route::Portfolio, false) => (
            "Our Portfolio - A Glimpse of Our Work | Sacker Manufactures",
            "From luxury garments to everyday apparel. See how we've helped 500+ brands achieve world-class quality. 100M+ garments produced with 100% quality commitment.",
            "og-portfolio.jpg",
        ),
        (Route::Portfolio, true) => (
            "הפורטפוליו שלנו - הצצה לעבודה שלנו | Sacker Manufactures",
            "מפריטי יוקרה ועד אופנה יומיומית. ראו איך עזרנו ל-500+ מותגים להשיג איכות ברמה עולמית. 100M+ פריטים יוצרו עם מחויבות ל-100% איכות.",
            "og-portfolio.jpg",
        ),
        (Route::Contact, false) => (
            "Contact Us - Start Your Production Journey | Sacker",
            "Ready to elevate your brand? Contact Sacker Manufactures today. Phone: 050-2197105 | Direct line to CEO for premium collaborations. Available Sun-Thu: 9AM - 6PM.",
            "og-contact.jpg",
        ),
        (Route::Contact, true) => (
            "צור קשר - התחל את מסע הייצור שלך | Sacker",
            "מוכן להעלות את המותג שלך? צור קשר עם Sacker Manufactures היום. טלפון: 050-2197105 | קו ישיר למנכ\"ל לשיתופי פעולה פרימיום. זמינים א'-ה': 9:00 - 18:00.",
            "og-contact.jpg",
        ),
        (Route::Terms, false) => (
            "Terms & Conditions - Sacker Manufactures",
            "Terms and conditions for using the Sacker Manufactures website. Please read carefully before using our services.",
            "logo.png",
        ),
        (Route::Terms, true) => (
            "תקנון האתר - Sacker Manufactures",
            "תנאים והגבלות לשימוש באתר Sacker Manufactures. אנא קרא בעיון לפני השימוש בשירותים שלנו.",
            "logo.png",
        ),
        (Route::Privacy, false) => (
            "Privacy Policy - Sacker Manufactures",
            "How Sacker Manufactures collects, uses, and protects your personal information. Your privacy matters to us.",
            "logo.png",
        ),
        (Route::Privacy, true) => (
            "מדיניות פרטיות - Sacker Manufactures",
            "כיצד Sacker Manufactures אוספת, משתמשת ומגינה על המידע האישי שלך. הפרטיות שלך חשובה לנו.",
            "logo.png",
        ),
        (Route::Accessibility, false) => (
            "Accessibility Statement - Sacker Manufactures",
            "Our commitment to making the Sacker Manufactures website accessible to all users. Learn about our accessibility features.",
            "logo.png",
        ),
        (Route::Accessibility, true) => (
            "הצהרת נגישות - Sacker Manufactures",
            "המחויבות שלנו להנגשת אתר Sacker Manufactures לכל המשתמשים. למד על תכונות הנגישות שלנו.",
            "logo.png",
        ),
    };

    PageCopy {
        title,
        description,
        image,
    }
}

/// Title and description for a path outside the route table, built from its segments.
fn fallback_copy(path: &str, language: Language) -> (String, String) {
    let words = path.replace('/', " ");
    let words = words.trim();
    let title = format!("{} - {}", site::SITE_NAME, words);
    let description = if language == Language::HEBREW {
        format!("מידע על {} ב-{}.", words, site::SITE_NAME)
    } else {
        format!("Information about {} at {}.", words, site::SITE_NAME)
    };
    (title, description)
}

impl PageMetadata {
    /// Generate the metadata for an unprefixed site path in one language.
    ///
    /// Paths outside the route table get a generic title and description
    /// built from the path segments, the logo as image, and a plain `WebPage`
    /// document.
    pub fn generate(base_url: &str, path: &str, language: Language) -> PageMetadata {
        let (title, description, image) = match Route::from_path(path) {
            Some(route) => {
                let copy = page_copy(route, language);
                (
                    copy.title.to_string(),
                    copy.description.to_string(),
                    copy.image,
                )
            }
            None => {
                let (title, description) = fallback_copy(path, language);
                (title, description, "logo.png")
            }
        };

        let alternate_language = language.other();

        PageMetadata {
            title,
            description,
            canonical_url: absolute_url(base_url, &localize(path, language)),
            alternate_url: absolute_url(base_url, &localize(path, alternate_language)),
            alternate_language,
            x_default_url: absolute_url(base_url, path),
            image: absolute_url(base_url, &format!("/{}", image)),
            locale: language.locale(),
            alternate_locale: alternate_language.locale(),
            language,
            direction: language.direction(),
            structured_data: structured_data(base_url, path, language),
        }
    }

    /// Metadata for a route from the table.
    pub fn for_route(base_url: &str, route: Route, language: Language) -> PageMetadata {
        Self::generate(base_url, route.path(), language)
    }

    pub fn html_lang(&self) -> &'static str {
        self.language.code()
    }

    pub fn html_dir(&self) -> &'static str {
        self.direction.as_str()
    }

    /// The JSON-LD script block. `</` is escaped so page text cannot close the script early.
    pub fn render_structured_data(&self) -> String {
        let json = serde_json::to_string_pretty(&self.structured_data)
            .unwrap_or_else(|_| "{}".to_string())
            .replace("</", "<\\/");
        format!(r#"<script type="application/ld+json">{}</script>"#, json)
    }

    /// Render the full head markup block injected into prerendered pages.
    pub fn render_head(&self) -> String {
        let title = escape_html(&self.title);
        let description = escape_html(&self.description);
        let canonical = escape_html(&self.canonical_url);
        let image = escape_html(&self.image);

        let lines = [
            format!("<title>{}</title>", title),
            format!(r#"<meta name="description" content="{}">"#, description),
            format!(r#"<link rel="canonical" href="{}">"#, canonical),
            format!(
                r#"<link rel="alternate" hreflang="{}" href="{}">"#,
                self.alternate_language.code(),
                escape_html(&self.alternate_url)
            ),
            format!(
                r#"<link rel="alternate" hreflang="x-default" href="{}">"#,
                escape_html(&self.x_default_url)
            ),
            r#"<meta name="robots" content="index, follow">"#.to_string(),
            format!(r#"<meta name="author" content="{}">"#, site::SITE_NAME),
            format!(r#"<meta name="keywords" content="{}">"#, escape_html(site::KEYWORDS)),
            String::new(),
            "<!-- OpenGraph -->".to_string(),
            format!(r#"<meta property="og:title" content="{}">"#, title),
            format!(r#"<meta property="og:description" content="{}">"#, description),
            r#"<meta property="og:type" content="website">"#.to_string(),
            format!(r#"<meta property="og:url" content="{}">"#, canonical),
            format!(r#"<meta property="og:image" content="{}">"#, image),
            format!(
                r#"<meta property="og:image:width" content="{}">"#,
                site::OG_IMAGE_WIDTH
            ),
            format!(
                r#"<meta property="og:image:height" content="{}">"#,
                site::OG_IMAGE_HEIGHT
            ),
            format!(r#"<meta property="og:site_name" content="{}">"#, site::SITE_NAME),
            format!(
                r#"<meta property="og:locale" content="{}">"#,
                self.locale
            ),
            format!(
                r#"<meta property="og:locale:alternate" content="{}">"#,
                self.alternate_locale
            ),
            String::new(),
            "<!-- Twitter Card -->".to_string(),
            r#"<meta name="twitter:card" content="summary_large_image">"#.to_string(),
            format!(r#"<meta name="twitter:title" content="{}">"#, title),
            format!(r#"<meta name="twitter:description" content="{}">"#, description),
            format!(r#"<meta name="twitter:image" content="{}">"#, image),
            String::new(),
            self.render_structured_data(),
        ];

        lines
            .iter()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("    {}", line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
