//! Best-effort image scraping from description markup.
//!
//! This is a regular scan over raw HTML, not a parser: malformed or nested
//! tags may under- or over-match, and adapters depend on exactly this
//! behavior. Each platform applies its own scheme policy on top of
//! [`image_sources`].

use std::sync::LazyLock;

use regex::Regex;

static IMG_SRC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img[^>]+\bsrc=["']([^"']+)["']"#).expect("Invalid image pattern")
});

/// Every `<img ... src="...">` URL in document order.
pub fn image_sources(html: &str) -> Vec<&str> {
    IMG_SRC_PATTERN
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// All images, with `http://` upgraded to `https://`. Other schemes are
/// dropped. Empty when nothing matched.
pub fn all_secure_images(html: &str) -> Vec<String> {
    image_sources(html)
        .into_iter()
        .filter_map(|src| {
            if let Some(rest) = src.strip_prefix("http://") {
                Some(format!("https://{}", rest))
            } else if src.starts_with("https://") {
                Some(src.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// The first image, only if it is already `https://`.
pub fn first_https_image(html: &str) -> Option<String> {
    image_sources(html)
        .first()
        .filter(|src| src.starts_with("https://"))
        .map(|src| src.to_string())
}
