//! Composition of externally visible short URLs.

/// Scheme and domain under which short codes are published.
///
/// The short URL is never stored: it is recomputed from the code each time,
/// so changing `APP_DOMAIN` changes every short URL handed out afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrlTemplate {
    scheme: String,
    domain: String,
}

impl ShortUrlTemplate {
    pub fn new(scheme: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            domain: domain.into(),
        }
    }

    /// Builds `<scheme>://<domain>/<url_code>`.
    pub fn compose(&self, url_code: &str) -> String {
        format!(
            "{}://{}/{}",
            self.scheme,
            self.domain.trim_end_matches('/'),
            url_code
        )
    }
}
