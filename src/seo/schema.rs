//! Schema.org JSON-LD documents, one shape per route category.

use serde_json::{json, Value};

use super::site::{self, absolute_url};
use crate::i18n::Language;
use crate::routes::{localize, Route};

/// Which structured-data shape a page gets.
///
/// Every known route maps to exactly one category; unrecognized paths take the
/// `Generic` branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageKind {
    Organization,
    About,
    Contact,
    Services,
    Portfolio,
    Generic,
}

impl PageKind {
    fn for_path(path: &str) -> PageKind {
        match Route::from_path(path) {
            Some(Route::Home) => PageKind::Organization,
            Some(Route::About) => PageKind::About,
            Some(Route::Contact) => PageKind::Contact,
            Some(Route::Services) => PageKind::Services,
            Some(Route::Portfolio) => PageKind::Portfolio,
            Some(Route::Terms | Route::Privacy | Route::Accessibility) | None => {
                PageKind::Generic
            }
        }
    }
}

/// A bilingual text pair.
struct Bilingual {
    en: &'static str,
    he: &'static str,
}

impl Bilingual {
    fn pick(&self, language: Language) -> &'static str {
        if language == Language::HEBREW {
            self.he
        } else {
            self.en
        }
    }
}

struct ServiceEntry {
    name: Bilingual,
    description: Bilingual,
}

const SERVICES: [ServiceEntry; 4] = [
    ServiceEntry {
        name: Bilingual {
            en: "Pattern Making & Sampling",
            he: "הכנת גזרות ודגם ראשוני",
        },
        description: Bilingual {
            en: "Turn your designs into reality with precision",
            he: "הפיכת העיצוב שלך למציאות ברמת דיוק גבוהה",
        },
    },
    ServiceEntry {
        name: Bilingual {
            en: "Small & Large Production Runs",
            he: "ייצור בכמויות קטנות וגדולות",
        },
        description: Bilingual {
            en: "Flexible solutions for every stage of your brand's growth",
            he: "פתרונות גמישים לכל שלב בצמיחת המותג שלך",
        },
    },
    ServiceEntry {
        name: Bilingual {
            en: "Premium Quality Control",
            he: "בקרת איכות פרימיום",
        },
        description: Bilingual {
            en: "Every garment meets international standards",
            he: "כל פריט עומד בסטנדרטים בינלאומיים",
        },
    },
    ServiceEntry {
        name: Bilingual {
            en: "Garment Refinish",
            he: "גימור בגדים",
        },
        description: Bilingual {
            en: "Labeling, ironing, and repacking services",
            he: "שירותי תיוג, גיהוץ ואריזה מחדש",
        },
    },
];

const ORGANIZATION_DESCRIPTION: Bilingual = Bilingual {
    en: "Premium clothing manufacturing with over 30 years of experience. Trusted partner for leading fashion brands worldwide.",
    he: "ייצור בגדים פרימיום עם למעלה מ-30 שנות ניסיון. שותף אמין למותגי אופנה מובילים ברחבי העולם.",
};

const ABOUT_NAME: Bilingual = Bilingual {
    en: "About Sacker Manufactures",
    he: "אודות Sacker Manufactures",
};

const ABOUT_DESCRIPTION: Bilingual = Bilingual {
    en: "30+ years of excellence in clothing manufacturing",
    he: "30+ שנות מצוינות בייצור בגדים",
};

const CONTACT_NAME: Bilingual = Bilingual {
    en: "Contact Sacker Manufactures",
    he: "צור קשר - Sacker Manufactures",
};

const SERVICES_NAME: Bilingual = Bilingual {
    en: "Our Manufacturing Services",
    he: "שירותי הייצור שלנו",
};

const SERVICES_DESCRIPTION: Bilingual = Bilingual {
    en: "Full suite of clothing manufacturing services",
    he: "מערך מלא של שירותי ייצור אופנה",
};

const PORTFOLIO_NAME: Bilingual = Bilingual {
    en: "Our Portfolio",
    he: "הפורטפוליו שלנו",
};

const PORTFOLIO_DESCRIPTION: Bilingual = Bilingual {
    en: "A glimpse of our work - from luxury garments to everyday apparel",
    he: "הצצה לעבודה שלנו - מפריטי יוקרה ועד אופנה יומיומית",
};

fn organization(base_url: &str, language: Language) -> Value {
    let base = base_url.trim_end_matches('/');
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": site::SITE_NAME,
        "alternateName": site::ALTERNATE_NAME,
        "url": base,
        "logo": format!("{}/logo.png", base),
        "image": format!("{}/og-image.jpg", base),
        "description": ORGANIZATION_DESCRIPTION.pick(language),
        "foundingDate": site::FOUNDING_YEAR,
        "address": {
            "@type": "PostalAddress",
            "addressCountry": site::COUNTRY,
        },
        "contactPoint": {
            "@type": "ContactPoint",
            "telephone": site::TELEPHONE,
            "url": site::whatsapp_url(),
            "contactType": "Customer Service",
            "availableLanguage": ["English", "Hebrew"],
        },
    })
}

/// Build the structured-data document for a page.
///
/// `path` is the unprefixed site path; the page URL embedded in the document is
/// localized for `language`.
pub fn structured_data(base_url: &str, path: &str, language: Language) -> Value {
    let page_url = absolute_url(base_url, &localize(path, language));
    let org = organization(base_url, language);

    match PageKind::for_path(path) {
        PageKind::Organization => {
            let mut schema = org;
            schema["@type"] = json!(["Organization", "Manufacturer"]);
            schema["aggregateRating"] = json!({
                "@type": "AggregateRating",
                "ratingValue": "5",
                "reviewCount": "500",
            });
            schema
        }
        PageKind::About => json!({
            "@context": "https://schema.org",
            "@type": "AboutPage",
            "name": ABOUT_NAME.pick(language),
            "description": ABOUT_DESCRIPTION.pick(language),
            "url": page_url,
            "mainEntity": org,
        }),
        PageKind::Contact => json!({
            "@context": "https://schema.org",
            "@type": "ContactPage",
            "name": CONTACT_NAME.pick(language),
            "url": page_url,
            "mainEntity": org,
        }),
        PageKind::Services => {
            let items: Vec<Value> = SERVICES
                .iter()
                .map(|service| {
                    json!({
                        "@type": "Service",
                        "name": service.name.pick(language),
                        "description": service.description.pick(language),
                        "provider": org.clone(),
                    })
                })
                .collect();

            json!({
                "@context": "https://schema.org",
                "@type": "ItemList",
                "name": SERVICES_NAME.pick(language),
                "description": SERVICES_DESCRIPTION.pick(language),
                "url": page_url,
                "itemListElement": items,
            })
        }
        PageKind::Portfolio => json!({
            "@context": "https://schema.org",
            "@type": "CollectionPage",
            "name": PORTFOLIO_NAME.pick(language),
            "description": PORTFOLIO_DESCRIPTION.pick(language),
            "url": page_url,
            "mainEntity": org,
        }),
        PageKind::Generic => json!({
            "@context": "https://schema.org",
            "@type": "WebPage",
            "name": path.strip_prefix('/').unwrap_or(path),
            "url": page_url,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::site::DEFAULT_BASE_URL;

    #[test]
    fn test_home_is_organization_with_rating() {
        let schema = structured_data(DEFAULT_BASE_URL, "/", Language::ENGLISH);

        assert_eq!(schema["@type"], json!(["Organization", "Manufacturer"]));
        assert_eq!(schema["aggregateRating"]["ratingValue"], "5");
        assert_eq!(schema["aggregateRating"]["reviewCount"], "500");
        assert_eq!(schema["foundingDate"], "1994");
    }

    #[test]
    fn test_about_nests_organization() {
        let schema = structured_data(DEFAULT_BASE_URL, "/about", Language::HEBREW);

        assert_eq!(schema["@type"], "AboutPage");
        assert_eq!(schema["name"], "אודות Sacker Manufactures");
        assert_eq!(schema["url"], "https://sackermanufactures.com/he/about");
        assert_eq!(schema["mainEntity"]["@type"], "Organization");
        assert!(schema["mainEntity"]["description"]
            .as_str()
            .unwrap()
            .contains("30 שנות"));
    }

    #[test]
    fn test_contact_page() {
        let schema = structured_data(DEFAULT_BASE_URL, "/contact", Language::ENGLISH);

        assert_eq!(schema["@type"], "ContactPage");
        assert_eq!(schema["url"], "https://sackermanufactures.com/contact");
        assert_eq!(
            schema["mainEntity"]["contactPoint"]["telephone"],
            "+972-50-219-7105"
        );
        assert_eq!(
            schema["mainEntity"]["contactPoint"]["url"],
            "https://wa.me/972502197105"
        );
    }

    #[test]
    fn test_services_lists_four_bilingual_services() {
        let en = structured_data(DEFAULT_BASE_URL, "/services", Language::ENGLISH);
        let he = structured_data(DEFAULT_BASE_URL, "/services", Language::HEBREW);

        let en_items = en["itemListElement"].as_array().unwrap();
        let he_items = he["itemListElement"].as_array().unwrap();
        assert_eq!(en_items.len(), 4);
        assert_eq!(he_items.len(), 4);
        assert_eq!(en_items[0]["name"], "Pattern Making & Sampling");
        assert_eq!(he_items[3]["name"], "גימור בגדים");
        assert!(en_items
            .iter()
            .all(|item| item["provider"]["@type"] == "Organization"));
    }

    #[test]
    fn test_portfolio_is_collection() {
        let schema = structured_data(DEFAULT_BASE_URL, "/portfolio", Language::ENGLISH);
        assert_eq!(schema["@type"], "CollectionPage");
    }

    #[test]
    fn test_legal_pages_are_minimal_web_pages() {
        for path in ["/terms", "/privacy", "/accessibility"] {
            let schema = structured_data(DEFAULT_BASE_URL, path, Language::HEBREW);
            let object = schema.as_object().unwrap();

            assert_eq!(schema["@type"], "WebPage");
            assert_eq!(schema["name"], &path[1..]);
            assert_eq!(object.len(), 4);
        }
    }

    #[test]
    fn test_unknown_path_takes_generic_branch() {
        let schema = structured_data(DEFAULT_BASE_URL, "/careers", Language::ENGLISH);

        assert_eq!(schema["@type"], "WebPage");
        assert_eq!(schema["name"], "careers");
        assert_eq!(schema["url"], "https://sackermanufactures.com/careers");
    }
}
