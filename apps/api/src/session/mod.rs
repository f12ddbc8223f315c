//! Multi-step form session — typed access to drafts kept in an injected `KeyValueStore`.
//!
//! Steps run in order: user info → job info → generate. Each step requires the
//! previous one to have been saved.

pub mod handlers;
pub mod store;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::errors::AppError;
use crate::models::letter::LetterConfiguration;
use crate::models::profile::{CandidateProfile, JobProfile};
use crate::session::store::KeyValueStore;

const USER_INFO_KEY: &str = "userInfo";
const JOB_INFO_KEY: &str = "jobInfo";
const LETTER_OPTIONS_KEY: &str = "letterOptions";
const COVER_LETTER_KEY: &str = "generatedCoverLetter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    UserInfo,
    JobInfo,
}

impl fmt::Display for FormStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormStep::UserInfo => write!(f, "user info"),
            FormStep::JobInfo => write!(f, "job info"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Complete the {0} step first")]
    StepMissing(FormStep),

    #[error("Stored draft under '{key}' is unreadable: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    #[error("Failed to serialize draft: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::StepMissing(_) => AppError::Validation(err.to_string()),
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

/// One user's drafts, namespaced by session id inside the shared store.
pub struct FormSession<'a> {
    store: &'a dyn KeyValueStore,
    session_id: &'a str,
}

impl<'a> FormSession<'a> {
    pub fn new(store: &'a dyn KeyValueStore, session_id: &'a str) -> Self {
        Self { store, session_id }
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, SessionError> {
        match self.store.get(self.session_id, name) {
            Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|source| {
                SessionError::Corrupt {
                    key: format!("{}:{}", self.session_id, name),
                    source,
                }
            }),
            None => Ok(None),
        }
    }

    fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<(), SessionError> {
        let raw = serde_json::to_string(value)?;
        self.store.put(self.session_id, name, raw);
        Ok(())
    }

    pub fn candidate(&self) -> Result<Option<CandidateProfile>, SessionError> {
        self.load(USER_INFO_KEY)
    }

    pub fn save_candidate(&self, candidate: &CandidateProfile) -> Result<(), SessionError> {
        self.save(USER_INFO_KEY, candidate)
    }

    pub fn job(&self) -> Result<Option<JobProfile>, SessionError> {
        self.load(JOB_INFO_KEY)
    }

    /// Saves the job draft. The user info step must already be saved.
    pub fn save_job(&self, job: &JobProfile) -> Result<(), SessionError> {
        if self.candidate()?.is_none() {
            return Err(SessionError::StepMissing(FormStep::UserInfo));
        }
        self.save(JOB_INFO_KEY, job)
    }

    /// Both drafts, or the first step that is still missing.
    pub fn generation_inputs(&self) -> Result<(CandidateProfile, JobProfile), SessionError> {
        let candidate = self
            .candidate()?
            .ok_or(SessionError::StepMissing(FormStep::UserInfo))?;
        let job = self
            .job()?
            .ok_or(SessionError::StepMissing(FormStep::JobInfo))?;
        Ok((candidate, job))
    }

    /// Current letter options; form defaults until the user changes something.
    pub fn letter_options(&self) -> Result<LetterConfiguration, SessionError> {
        Ok(self
            .load(LETTER_OPTIONS_KEY)?
            .unwrap_or_else(LetterConfiguration::form_defaults))
    }

    pub fn save_letter_options(&self, options: &LetterConfiguration) -> Result<(), SessionError> {
        self.save(LETTER_OPTIONS_KEY, options)
    }

    pub fn cover_letter(&self) -> Option<String> {
        self.store.get(self.session_id, COVER_LETTER_KEY)
    }

    pub fn save_cover_letter(&self, letter: &str) {
        self.store.put(self.session_id, COVER_LETTER_KEY, letter.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::MemoryStore;

    fn candidate() -> CandidateProfile {
        CandidateProfile {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            experience: "5 years in QA".to_string(),
            skills: "automation testing".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_job_step_requires_user_info() {
        let store = MemoryStore::new();
        let session = FormSession::new(&store, "s1");

        let err = session.save_job(&JobProfile::default()).unwrap_err();
        assert!(matches!(err, SessionError::StepMissing(FormStep::UserInfo)));

        session.save_candidate(&candidate()).unwrap();
        session.save_job(&JobProfile::default()).unwrap();
        assert_eq!(session.job().unwrap(), Some(JobProfile::default()));
    }

    #[test]
    fn test_generation_inputs_report_first_missing_step() {
        let store = MemoryStore::new();
        let session = FormSession::new(&store, "s1");

        assert!(matches!(
            session.generation_inputs(),
            Err(SessionError::StepMissing(FormStep::UserInfo))
        ));

        session.save_candidate(&candidate()).unwrap();
        assert!(matches!(
            session.generation_inputs(),
            Err(SessionError::StepMissing(FormStep::JobInfo))
        ));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = MemoryStore::new();
        FormSession::new(&store, "a")
            .save_candidate(&candidate())
            .unwrap();
        FormSession::new(&store, "a").save_cover_letter("Dear Acme");

        let other = FormSession::new(&store, "b");
        assert_eq!(other.candidate().unwrap(), None);
        assert_eq!(other.cover_letter(), None);
        assert_eq!(
            FormSession::new(&store, "a").cover_letter().as_deref(),
            Some("Dear Acme")
        );
    }

    #[test]
    fn test_letter_options_default_until_saved() {
        let store = MemoryStore::new();
        let session = FormSession::new(&store, "s1");
        assert_eq!(
            session.letter_options().unwrap(),
            LetterConfiguration::form_defaults()
        );

        let mut options = LetterConfiguration::form_defaults();
        options.set_trust_mode(true);
        session.save_letter_options(&options).unwrap();
        assert!(session.letter_options().unwrap().trust_mode);
    }

    #[test]
    fn test_corrupt_draft_is_reported() {
        let store = MemoryStore::new();
        store.put("s1", "userInfo", "{not json".to_string());
        let err = FormSession::new(&store, "s1").candidate().unwrap_err();
        assert!(matches!(err, SessionError::Corrupt { .. }));
    }

    #[test]
    fn test_step_missing_maps_to_validation_error() {
        let err: AppError = SessionError::StepMissing(FormStep::JobInfo).into();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Complete the job info step first"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
