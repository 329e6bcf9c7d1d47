//! Thought use-case service.
//!
//! # Responsibility
//! - Capture, revise, delete and favorite thought entries.
//! - Apply optional enrichment before a thought is persisted.
//! - Serve the filtered browse projection.
//!
//! # Invariants
//! - `capture` and `revise` reject whitespace-only content before any write.
//! - Enrichment never blocks a save: both accept `None` and persist anyway.
//! - `clear_all` replaces the collection with an empty one in a single write.

use crate::model::analysis::AnalysisResult;
use crate::model::thought::{Thought, ThoughtId};
use crate::repo::thought_repo::{RepoError, RepoResult, ThoughtRepository};
use crate::search::filter::{filter_thoughts, FilterCategory};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for thought use-cases.
#[derive(Debug)]
pub enum JournalServiceError {
    /// Content was empty or whitespace-only.
    EmptyContent,
    /// Target thought does not exist.
    ThoughtNotFound(ThoughtId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for JournalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "thought content is empty"),
            Self::ThoughtNotFound(id) => write!(f, "thought not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for JournalServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Journal service facade over repository implementations.
pub struct JournalService<R: ThoughtRepository> {
    repo: R,
}

impl<R: ThoughtRepository> JournalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Captures a new thought, newest-first, applying enrichment when the
    /// analysis arrived in time.
    pub fn capture(
        &self,
        content: impl Into<String>,
        analysis: Option<&AnalysisResult>,
    ) -> Result<Thought, JournalServiceError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(JournalServiceError::EmptyContent);
        }

        let mut thought = Thought::new(content);
        if let Some(analysis) = analysis {
            thought.apply_analysis(analysis);
        }
        self.repo.add(thought.clone())?;
        info!(
            "event=thought_capture module=service status=ok id={} enriched={}",
            thought.id,
            analysis.is_some()
        );
        Ok(thought)
    }

    /// Replaces the content of an existing thought. Enrichment follows the
    /// same fill rules as capture, so user-entered tags survive a revision.
    pub fn revise(
        &self,
        id: &str,
        content: impl Into<String>,
        analysis: Option<&AnalysisResult>,
    ) -> Result<Thought, JournalServiceError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(JournalServiceError::EmptyContent);
        }

        let mut thought = self
            .repo
            .list()?
            .into_iter()
            .find(|thought| thought.id == id)
            .ok_or_else(|| JournalServiceError::ThoughtNotFound(id.to_string()))?;
        thought.content = content;
        if let Some(analysis) = analysis {
            thought.apply_analysis(analysis);
        }
        self.repo.update(&thought)?;
        info!(
            "event=thought_revise module=service status=ok id={}",
            thought.id
        );
        Ok(thought)
    }

    /// Lists the collection in stored order (newest first).
    pub fn list(&self) -> RepoResult<Vec<Thought>> {
        self.repo.list()
    }

    /// Lists the collection filtered by search text and category.
    pub fn filtered(&self, query: &str, category: FilterCategory) -> RepoResult<Vec<Thought>> {
        Ok(filter_thoughts(&self.repo.list()?, query, category))
    }

    /// Deletes the thought with the given id; absent ids are a no-op.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        self.repo.delete(id)
    }

    /// Flips the favorite flag; absent ids are a no-op.
    pub fn toggle_favorite(&self, id: &str) -> RepoResult<()> {
        self.repo.toggle_favorite(id)
    }

    /// Removes every thought in a single collection write.
    pub fn clear_all(&self) -> RepoResult<()> {
        self.repo.replace_all(&[])?;
        info!("event=thoughts_clear module=service status=ok");
        Ok(())
    }
}
