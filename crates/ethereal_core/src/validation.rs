//! Account form validation and credential hygiene.
//!
//! # Responsibility
//! - Validate onboarding and password-change input.
//! - Digest passwords so plaintext never reaches storage.
//!
//! # Invariants
//! - Email validation requires full domain structure including a top-level
//!   domain.
//! - User ids are lowercase `[a-z0-9_]` after normalization.

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum password length accepted by account forms.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("valid email regex")
});

/// First-failure validation error for account forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    EmptyUserId,
    InvalidEmail,
    PasswordTooShort,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "display name cannot be empty"),
            Self::EmptyUserId => write!(f, "user id cannot be empty"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::PasswordTooShort => write!(
                f,
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            ),
        }
    }
}

impl Error for ValidationError {}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_CHARS
}

/// Lowercases and strips everything outside the id alphabet `[a-z0-9_]`.
pub fn normalize_user_id(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Lowercase hex SHA-256 of the input.
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();

    let mut output = String::with_capacity(digest.len() * 2);
    for byte in digest {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

/// Digest stored in place of the plaintext password.
pub fn digest_password(password: &str) -> String {
    sha256_hex(password)
}

/// Compares a candidate password against a stored digest.
pub fn verify_password(candidate: &str, stored_digest: &str) -> bool {
    sha256_hex(candidate) == stored_digest
}
