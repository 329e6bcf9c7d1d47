//! Profile and settings use-case service.
//!
//! # Responsibility
//! - Run onboarding validation and persist the initialized profile.
//! - Serve and update the stored settings document.
//! - Rotate the password digest after verifying the old password.
//!
//! # Invariants
//! - Passwords are persisted as SHA-256 hex digests, never as plaintext.
//! - `change_password` verifies old, validates new, then compares the
//!   confirmation, in that order; the first failure wins and nothing is
//!   written.
//! - Avatar payloads above `MAX_AVATAR_BYTES` are rejected before encoding.

use crate::model::settings::UserSettings;
use crate::repo::settings_repo::SettingsRepository;
use crate::repo::thought_repo::{RepoError, RepoResult};
use crate::validation::{
    digest_password, is_valid_email, is_valid_password, normalize_user_id, verify_password,
    ValidationError,
};
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine as _;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for an uploaded avatar image (10 MiB).
pub const MAX_AVATAR_BYTES: usize = 10 * 1024 * 1024;

/// Input of the first-run onboarding form.
#[derive(Debug, Clone)]
pub struct OnboardingRequest {
    pub user_name: String,
    pub user_id: String,
    pub email: String,
    pub password: String,
    /// Pre-encoded avatar URL; `None` keeps the generated placeholder.
    pub avatar_url: Option<String>,
}

/// Service error for profile use-cases.
#[derive(Debug)]
pub enum ProfileServiceError {
    /// Form-level validation failure.
    Validation(ValidationError),
    /// Old password did not match the stored digest.
    WrongPassword,
    /// New password and confirmation differ.
    PasswordMismatch,
    /// Avatar payload exceeds `MAX_AVATAR_BYTES`.
    AvatarTooLarge { size: usize },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ProfileServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::WrongPassword => write!(f, "old password does not match"),
            Self::PasswordMismatch => write!(f, "new password and confirmation do not match"),
            Self::AvatarTooLarge { size } => {
                write!(f, "avatar is too large: {size} bytes (max {MAX_AVATAR_BYTES})")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProfileServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ProfileServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ProfileServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Profile service facade over repository implementations.
pub struct ProfileService<R: SettingsRepository> {
    repo: R,
}

impl<R: SettingsRepository> ProfileService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Current settings; defaults when nothing is stored yet.
    pub fn settings(&self) -> RepoResult<UserSettings> {
        self.repo.get()
    }

    /// Persists the full settings document.
    pub fn update_settings(&self, settings: &UserSettings) -> RepoResult<()> {
        self.repo.save(settings)
    }

    /// Validates the onboarding form and persists the initialized profile.
    ///
    /// Validation order: name, user id, email, password. The first failure
    /// is returned and nothing is written.
    pub fn complete_onboarding(
        &self,
        request: &OnboardingRequest,
    ) -> Result<UserSettings, ProfileServiceError> {
        let user_name = request.user_name.trim();
        if user_name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let user_id = normalize_user_id(&request.user_id);
        if user_id.is_empty() {
            return Err(ValidationError::EmptyUserId.into());
        }
        let email = request.email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_valid_password(&request.password) {
            return Err(ValidationError::PasswordTooShort.into());
        }

        let mut settings = self.repo.get()?;
        settings.user_name = user_name.to_string();
        settings.user_id = user_id;
        settings.email = Some(email.to_string());
        settings.password_digest = Some(digest_password(&request.password));
        if let Some(avatar_url) = &request.avatar_url {
            settings.avatar_url = avatar_url.clone();
        }
        settings.is_initialized = true;
        self.repo.save(&settings)?;
        info!(
            "event=onboarding_complete module=service status=ok user_id={}",
            settings.user_id
        );
        Ok(settings)
    }

    /// Rotates the stored password digest. A profile without a stored
    /// digest fails the old-password check unconditionally.
    pub fn change_password(
        &self,
        old: &str,
        new: &str,
        confirm: &str,
    ) -> Result<(), ProfileServiceError> {
        let mut settings = self.repo.get()?;
        let old_matches = settings
            .password_digest
            .as_deref()
            .map_or(false, |digest| verify_password(old, digest));
        if !old_matches {
            return Err(ProfileServiceError::WrongPassword);
        }
        if !is_valid_password(new) {
            return Err(ValidationError::PasswordTooShort.into());
        }
        if new != confirm {
            return Err(ProfileServiceError::PasswordMismatch);
        }

        settings.password_digest = Some(digest_password(new));
        self.repo.save(&settings)?;
        info!("event=password_change module=service status=ok");
        Ok(())
    }
}

/// Encodes an uploaded avatar as a `data:` URL for inline storage.
pub fn avatar_data_url(mime: &str, bytes: &[u8]) -> Result<String, ProfileServiceError> {
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(ProfileServiceError::AvatarTooLarge { size: bytes.len() });
    }
    Ok(format!("data:{mime};base64,{}", BASE64_ENGINE.encode(bytes)))
}
