//! Fixed facts about the company, shared by metadata, structured data and the site shell.

pub const SITE_NAME: &str = "Sacker Manufactures";

pub const ALTERNATE_NAME: &str = "Sacker Manufacturing";

/// Production origin, used when no `SITE_URL` is configured.
pub const DEFAULT_BASE_URL: &str = "https://sackermanufactures.com";

pub const FOUNDING_YEAR: &str = "1994";

pub const COUNTRY: &str = "IL";

pub const TELEPHONE: &str = "+972-50-219-7105";

/// International WhatsApp number, without the leading zero.
pub const WHATSAPP_NUMBER: &str = "972502197105";

pub const KEYWORDS: &str = "clothing manufacturing, garment production, fashion manufacturing, pattern making, sampling, quality control, Israel manufacturing, ייצור בגדים, ייצור אופנה, הכנת גזרות";

pub const OG_IMAGE_WIDTH: u32 = 1200;

pub const OG_IMAGE_HEIGHT: u32 = 630;

/// Deep link opened by the floating WhatsApp button, also published as the contact point URL.
pub fn whatsapp_url() -> String {
    format!("https://wa.me/{}", WHATSAPP_NUMBER)
}

/// Join the configured origin and an absolute path without doubling the slash.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
