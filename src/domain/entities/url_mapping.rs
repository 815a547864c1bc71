//! URL mapping entity: one original URL and its short code.

use chrono::{DateTime, Utc};

/// A persisted mapping between an original URL and its short code.
///
/// Mappings are created once per distinct URL and never modified, so
/// `updated_at` always equals the creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub url_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        original_url: String,
        url_code: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            url_code,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub url_code: String,
}

impl NewUrlMapping {
    pub fn new(original_url: impl Into<String>, url_code: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            url_code: url_code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_mapping_creation() {
        let now = Utc::now();
        let mapping = UrlMapping::new(
            1,
            "https://example.com/a/b".to_string(),
            "7R1BN2R7".to_string(),
            now,
            now,
        );

        assert_eq!(mapping.id, 1);
        assert_eq!(mapping.original_url, "https://example.com/a/b");
        assert_eq!(mapping.url_code, "7R1BN2R7");
        assert_eq!(mapping.created_at, mapping.updated_at);
    }

    #[test]
    fn test_new_url_mapping_creation() {
        let new_mapping = NewUrlMapping::new("https://rust-lang.org", "abcdefgh");

        assert_eq!(new_mapping.original_url, "https://rust-lang.org");
        assert_eq!(new_mapping.url_code, "abcdefgh");
    }
}
