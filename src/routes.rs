//! Route table: the fixed set of site pages and their localized URL paths.

use std::fmt;

use crate::i18n::Language;

/// One page of the site, independent of language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Services,
    Portfolio,
    Contact,
    Terms,
    Privacy,
    Accessibility,
}

/// How often a page is expected to change, as advertised in the sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

impl Route {
    /// Every route, in table order. Prerendering and the sitemap follow this order.
    pub const ALL: [Route; 8] = [
        Route::Home,
        Route::About,
        Route::Services,
        Route::Portfolio,
        Route::Contact,
        Route::Terms,
        Route::Privacy,
        Route::Accessibility,
    ];

    /// The English (unprefixed) path, always rooted at `/`.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Services => "/services",
            Route::Portfolio => "/portfolio",
            Route::Contact => "/contact",
            Route::Terms => "/terms",
            Route::Privacy => "/privacy",
            Route::Accessibility => "/accessibility",
        }
    }

    /// The path without its leading slash; empty for the home page.
    pub fn slug(&self) -> &'static str {
        &self.path()[1..]
    }

    /// Resolve an unprefixed path to a route. A single trailing slash is tolerated.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = match path {
            "/" => "/",
            other => other.strip_suffix('/').unwrap_or(other),
        };
        Route::ALL.into_iter().find(|route| route.path() == trimmed)
    }

    pub fn is_root(&self) -> bool {
        *self == Route::Home
    }

    pub fn change_frequency(&self) -> ChangeFrequency {
        match self {
            Route::Home | Route::Portfolio => ChangeFrequency::Weekly,
            Route::About | Route::Services | Route::Contact => ChangeFrequency::Monthly,
            Route::Terms | Route::Privacy | Route::Accessibility => ChangeFrequency::Yearly,
        }
    }

    pub fn priority(&self) -> f32 {
        match self {
            Route::Home => 1.0,
            Route::About | Route::Services => 0.9,
            Route::Portfolio | Route::Contact => 0.8,
            Route::Terms | Route::Privacy | Route::Accessibility => 0.3,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Prefix an unprefixed site path for a language.
///
/// English paths are unchanged. Hebrew paths gain `/he`, and the root maps to
/// `/he` rather than `/he/`.
pub fn localize(path: &str, language: Language) -> String {
    let prefix = language.url_prefix();
    if prefix.is_empty() {
        path.to_string()
    } else if path == "/" {
        prefix.to_string()
    } else {
        format!("{}{}", prefix, path)
    }
}

/// A route resolved to a concrete URL path for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalizedRoute {
    pub route: Route,
    pub language: Language,
}

impl LocalizedRoute {
    pub fn new(route: Route, language: Language) -> Self {
        Self { route, language }
    }

    /// All 16 (language, route) pairs: every English route first, in table order.
    pub fn all() -> Vec<LocalizedRoute> {
        Language::all()
            .into_iter()
            .flat_map(|language| Route::ALL.map(|route| LocalizedRoute::new(route, language)))
            .collect()
    }

    pub fn url_path(&self) -> String {
        localize(self.route.path(), self.language)
    }

    /// Decode a concrete URL path back into its route and language.
    pub fn parse(url_path: &str) -> Option<LocalizedRoute> {
        if !url_path.starts_with('/') {
            return None;
        }
        let language = Language::for_path(url_path);
        let unprefixed = &url_path[language.url_prefix().len()..];
        let unprefixed = if unprefixed.is_empty() { "/" } else { unprefixed };

        Route::from_path(unprefixed).map(|route| LocalizedRoute::new(route, language))
    }

    /// The same route in the other language.
    pub fn alternate(&self) -> LocalizedRoute {
        LocalizedRoute::new(self.route, self.language.other())
    }
}

impl fmt::Display for LocalizedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.route, self.language)
    }
}
