//! Site toolkit for the Sacker Manufactures bilingual website.
//!
//! Build-time pieces (route table, SEO metadata, sitemap, prerendering) and the
//! runtime preference controllers (language, accessibility, cookie consent) that
//! the site shell drives.

pub mod client;
pub mod config;
pub mod contact;
pub mod i18n;
pub mod prerender;
pub mod routes;
pub mod seo;
