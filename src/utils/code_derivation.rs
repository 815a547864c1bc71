//! Short code derivation and validation.
//!
//! A short code is the leading part of the standard Base64 encoding of the
//! SHA-256 digest of the original URL. The same URL therefore always maps to
//! the same code, across requests and process restarts, without a counter or
//! any stored state.

use base64::Engine as _;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Code length used when `CODE_LENGTH` is not configured.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// A 32-byte digest encodes to 43 Base64 characters plus one `=` of padding.
pub const MAX_CODE_LENGTH: usize = 43;

/// Errors raised when building a [`CodeFormat`].
#[derive(Debug, thiserror::Error)]
pub enum CodeFormatError {
    #[error("Code length must be between 1 and {MAX_CODE_LENGTH}, got {0}")]
    LengthOutOfRange(usize),

    #[error("Failed to compile code pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Derives the short code for `original_url`.
///
/// Hashes the UTF-8 bytes of the URL with SHA-256, encodes the digest with the
/// standard (padded) Base64 alphabet and keeps the first `length` characters.
/// `length` is clamped to [`MAX_CODE_LENGTH`] so the padding never leaks into
/// a code.
///
/// # Examples
///
/// ```
/// use hashlink::utils::code_derivation::derive_code;
///
/// assert_eq!(derive_code("https://example.com/a/b", 8), "7R1BN2R7");
/// ```
pub fn derive_code(original_url: &str, length: usize) -> String {
    let digest = Sha256::digest(original_url.as_bytes());
    let mut encoded = base64::engine::general_purpose::STANDARD.encode(digest);

    // Base64 output is ASCII, so truncating by bytes stays on a char boundary.
    encoded.truncate(length.min(MAX_CODE_LENGTH));
    encoded
}

/// Fixed-length short code format: exactly `length` characters of `[A-Za-z0-9+/]`.
///
/// Shared by the shortening engine, the resolver and the stores so that every
/// layer agrees on what a well-formed code looks like.
#[derive(Debug, Clone)]
pub struct CodeFormat {
    length: usize,
    pattern: Regex,
}

impl CodeFormat {
    /// Builds the format for codes of `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`CodeFormatError::LengthOutOfRange`] unless `1 <= length <= 43`.
    pub fn new(length: usize) -> Result<Self, CodeFormatError> {
        if !(1..=MAX_CODE_LENGTH).contains(&length) {
            return Err(CodeFormatError::LengthOutOfRange(length));
        }

        let pattern = Regex::new(&format!("^[A-Za-z0-9+/]{{{length}}}$"))?;

        Ok(Self { length, pattern })
    }

    /// Number of characters in every code.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Derives the code for `original_url` at this format's length.
    pub fn derive(&self, original_url: &str) -> String {
        derive_code(original_url, self.length)
    }

    /// Returns true if `code` has the right length and alphabet.
    pub fn is_valid(&self, code: &str) -> bool {
        self.pattern.is_match(code)
    }
}

impl Default for CodeFormat {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH).expect("default code length is within range")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_known_vectors() {
        assert_eq!(derive_code("https://example.com/a/b", 8), "7R1BN2R7");
        assert_eq!(derive_code("https://example.com", 8), "EAaArVRs");
        assert_eq!(derive_code("http://example.com/", 8), "KhtAJCDv");
        assert_eq!(derive_code("https://example.com/page/5", 8), "vwbc/TZB");
        assert_eq!(derive_code("https://example.com/page/4", 8), "cDihJ+Tj");
    }

    #[test]
    fn test_derive_is_deterministic() {
        let url = "https://www.rust-lang.org/learn";
        assert_eq!(derive_code(url, 8), derive_code(url, 8));
        assert_eq!(derive_code(url, 8), "I8SZAHYj");
    }

    #[test]
    fn test_derive_respects_length() {
        let url = "https://example.com/a/b";

        assert_eq!(derive_code(url, 1), "7");
        assert_eq!(derive_code(url, 12), "7R1BN2R7bNCF");
        assert_eq!(
            derive_code(url, MAX_CODE_LENGTH),
            "7R1BN2R7bNCF3aXUpbY3teWfE44j7h+ZVl4YhyaFyGY"
        );
    }

    #[test]
    fn test_derive_never_includes_padding() {
        let code = derive_code("https://example.com/a/b", 44);
        assert_eq!(code.len(), MAX_CODE_LENGTH);
        assert!(!code.contains('='));
    }

    #[test]
    fn test_derive_is_total() {
        assert_eq!(derive_code("", 8).len(), 8);
        assert_eq!(derive_code("не url", 8).len(), 8);
    }

    #[test]
    fn test_code_format_rejects_out_of_range_length() {
        assert!(matches!(
            CodeFormat::new(0),
            Err(CodeFormatError::LengthOutOfRange(0))
        ));
        assert!(matches!(
            CodeFormat::new(44),
            Err(CodeFormatError::LengthOutOfRange(44))
        ));
        assert!(CodeFormat::new(1).is_ok());
        assert!(CodeFormat::new(43).is_ok());
    }

    #[test]
    fn test_code_format_validation() {
        let format = CodeFormat::default();

        assert_eq!(format.length(), 8);
        assert!(format.is_valid("7R1BN2R7"));
        assert!(format.is_valid("ZZZZZZZZ"));
        assert!(format.is_valid("vwbc/TZB"));
        assert!(format.is_valid("cDihJ+Tj"));

        assert!(!format.is_valid(""));
        assert!(!format.is_valid("short"));
        assert!(!format.is_valid("7R1BN2R7b"));
        assert!(!format.is_valid("abc-defg"));
        assert!(!format.is_valid("abc_defg"));
        assert!(!format.is_valid("abcdefg="));
        assert!(!format.is_valid("abcdéfgh"));
        assert!(!format.is_valid("7R1BN2R7\n"));
    }

    #[test]
    fn test_code_format_accepts_its_own_codes() {
        let format = CodeFormat::new(12).unwrap();

        for url in ["https://a.io", "https://example.com/page/5", "ftp://files.example.org/x"] {
            let code = format.derive(url);
            assert_eq!(code.len(), 12);
            assert!(format.is_valid(&code), "{code} should be valid");
        }
    }
}
