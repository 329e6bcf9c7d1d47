//! Core domain logic for Ethereal, a local-first journaling app.
//! This crate is the single source of truth for business invariants.

pub mod ai;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod validation;

pub use ai::client::{ClientError, GenerateRequest, GenerativeClient, HttpGenerativeClient};
pub use ai::enrich::{
    http_client_for, AnalysisHandle, ConnectionOverrides, ConnectionReport, EnrichmentService,
    API_KEY_ENV,
};
pub use db::{default_store_dir, open_store, open_store_in_memory, DbError, DbResult};
pub use export::{
    backup_file_name, journal_file_name, render_journal_text, thoughts_from_json, thoughts_to_json,
    ExportError, ExportResult,
};
pub use logging::{default_log_dir, default_log_level, init_logging, logging_status};
pub use model::analysis::AnalysisResult;
pub use model::settings::{default_avatar_url, AiPersonality, UserSettings};
pub use model::thought::{Thought, ThoughtId, MOOD_PALETTE};
pub use repo::settings_repo::{KvSettingsRepository, SettingsRepository};
pub use repo::thought_repo::{KvThoughtRepository, RepoError, RepoResult, ThoughtRepository};
pub use search::filter::{effective_category, filter_thoughts, stats_available, FilterCategory};
pub use service::journal_service::{JournalService, JournalServiceError};
pub use service::profile_service::{
    avatar_data_url, OnboardingRequest, ProfileService, ProfileServiceError, MAX_AVATAR_BYTES,
};
pub use validation::{digest_password, is_valid_email, is_valid_password, ValidationError};
