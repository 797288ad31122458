// URL validation, the gate in front of every network call

use url::Url;

/// Accepts only absolute http/https URLs. Never panics; anything that fails
/// to parse is simply rejected.
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
