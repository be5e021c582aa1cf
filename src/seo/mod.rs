//! Search-engine facing output: per-page metadata, structured data, sitemap and robots.

mod html;
mod metadata;
mod schema;
pub mod site;
pub mod sitemap;

pub use html::escape_html;
pub use metadata::PageMetadata;
pub use schema::structured_data;
