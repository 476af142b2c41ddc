//! Cloudflare Credentials
//!
//! Resolves the global API key and account email once at startup.
//! Values arrive through the `CF_API_KEY` and `CF_API_EMAIL` environment
//! variables (or the matching command-line options) and are validated
//! before any request is made.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Environment variable holding the Cloudflare global API key
pub const API_KEY_VAR: &str = "CF_API_KEY";

/// Environment variable holding the Cloudflare account email
pub const API_EMAIL_VAR: &str = "CF_API_EMAIL";

static API_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]*$").expect("API key pattern is valid"));

// dot-atom local part, then two or more hostname labels
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    ))
    .expect("email pattern is valid")
});

/// Reasons credential resolution can fail
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{var} is not set")]
    Missing { var: &'static str },

    #[error("CF_API_KEY may only contain letters, digits and underscores")]
    InvalidKey,

    #[error("CF_API_EMAIL is not a valid email address: {email:?}")]
    InvalidEmail { email: String },
}

/// Validated Cloudflare API credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_email: String,
}

impl Credentials {
    /// Validate an API key / email pair.
    ///
    /// Either value may be absent, which is reported as [`CredentialError::Missing`]
    /// naming the variable. Values are returned unchanged on success.
    pub fn load(
        api_key: Option<String>,
        api_email: Option<String>,
    ) -> Result<Self, CredentialError> {
        let api_key = api_key.ok_or(CredentialError::Missing { var: API_KEY_VAR })?;
        let api_email = api_email.ok_or(CredentialError::Missing { var: API_EMAIL_VAR })?;

        if !API_KEY_PATTERN.is_match(&api_key) {
            return Err(CredentialError::InvalidKey);
        }

        if !EMAIL_PATTERN.is_match(&api_email) {
            return Err(CredentialError::InvalidEmail { email: api_email });
        }

        debug!(
            "Cloudflare credentials found (email: {}, key length: {})",
            api_email,
            api_key.len()
        );

        Ok(Self { api_key, api_email })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_email(&self) -> &str {
        &self.api_email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_email", &self.api_email)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(key: &str, email: &str) -> Result<Credentials, CredentialError> {
        Credentials::load(Some(key.to_string()), Some(email.to_string()))
    }

    #[test]
    fn test_valid_pairs_are_returned_unchanged() {
        let pairs = [
            ("abc123_DEF", "ops@example.com"),
            ("0123456789abcdef0123456789abcdef01234", "first.last+dns@mail.example.co.uk"),
            ("", "a@b.io"),
            ("key", "o'brien!dns#1@sub-domain.example.com"),
        ];

        for (key, email) in pairs {
            let creds = load(key, email).unwrap();
            assert_eq!(creds.api_key(), key);
            assert_eq!(creds.api_email(), email);
        }
    }

    #[test]
    fn test_key_with_forbidden_characters() {
        for key in ["abc-123", "abc 123", "key!", "ключ", "abc\n"] {
            assert_eq!(
                load(key, "ops@example.com"),
                Err(CredentialError::InvalidKey),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_malformed_email() {
        let emails = [
            "",
            "ops",
            "ops@",
            "@example.com",
            "ops@example",
            "o ps@example.com",
            "a@b@c.com",
            "ops@exa,mple.com",
            "o<p>s@example.com",
            ".ops@example.com",
            "ops.@example.com",
            "o..ps@example.com",
            "ops@example.c!m",
            "ops@-example.com",
            "ops@example-.com",
            "ops@example..com",
            "a\u{1}b@example.com",
            "ops@example.com\n",
        ];

        for email in emails {
            assert_eq!(
                load("abc123", email),
                Err(CredentialError::InvalidEmail {
                    email: email.to_string()
                }),
                "email {email:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_values_name_the_variable() {
        assert_eq!(
            Credentials::load(None, Some("ops@example.com".to_string())),
            Err(CredentialError::Missing { var: API_KEY_VAR })
        );
        assert_eq!(
            Credentials::load(Some("abc".to_string()), None),
            Err(CredentialError::Missing { var: API_EMAIL_VAR })
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = load("supersecret", "ops@example.com").unwrap();
        let printed = format!("{creds:?}");
        assert!(!printed.contains("supersecret"));
        assert!(printed.contains("ops@example.com"));
    }
}
