//! # Domain Errors
//!
//! Error types for the marketplace lifecycle engine.
//!
//! Every failure is returned to the calling surface, which renders it as a
//! user-facing message. Nothing here is fatal to the process.

use super::value_objects::SubmissionStatus;
use thiserror::Error;

/// Marketplace error types.
#[derive(Debug, Error)]
pub enum MarketError {
    /// A required field is missing or out of range.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An account with this email already exists.
    #[error("User already exists with this email: {0}")]
    DuplicateEmail(String),

    /// The respondent already submitted to this survey.
    #[error("Already submitted: survey={survey_id}, user={user_id}")]
    DuplicateSubmission {
        /// Survey the submission targets
        survey_id: String,
        /// Respondent who submitted
        user_id: String,
    },

    /// No account matches the email/password pair.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Author balance cannot fund the survey reward.
    #[error("Insufficient points: need {required}, have {available}")]
    InsufficientPoints {
        /// Points the survey reward requires
        required: u64,
        /// Points on the author's balance
        available: u64,
    },

    /// The survey no longer accepts submissions.
    #[error("Survey is closed: {0}")]
    SurveyClosed(String),

    /// The submission was already reviewed.
    #[error("Submission {submission_id} is not pending (status: {status})")]
    NotPending {
        /// Reviewed submission
        submission_id: String,
        /// Its terminal status
        status: SubmissionStatus,
    },

    /// A survey, submission or account id did not resolve.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind ("survey", "submission", "account")
        kind: &'static str,
        /// The unresolved id
        id: String,
    },

    /// The acting account may not perform this operation.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Key-value store failure.
    #[error(transparent)]
    Storage(#[from] KVStoreError),

    /// Stored collection could not be encoded or decoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl MarketError {
    /// Shorthand for an unresolved survey id.
    pub fn survey_not_found(id: &str) -> Self {
        MarketError::NotFound {
            kind: "survey",
            id: id.to_string(),
        }
    }

    /// Shorthand for an unresolved submission id.
    pub fn submission_not_found(id: &str) -> Self {
        MarketError::NotFound {
            kind: "submission",
            id: id.to_string(),
        }
    }

    /// Shorthand for an unresolved account id.
    pub fn account_not_found(id: &str) -> Self {
        MarketError::NotFound {
            kind: "account",
            id: id.to_string(),
        }
    }
}

/// Key-value store errors.
#[derive(Debug, Error)]
pub enum KVStoreError {
    /// Underlying I/O failed.
    #[error("Storage I/O error: {message}")]
    IOError {
        /// Error detail
        message: String,
    },

    /// Stored data is unreadable.
    #[error("Storage corrupted: {message}")]
    Corrupted {
        /// Error detail
        message: String,
    },
}

/// Collection (de)serialization errors.
#[derive(Debug, Error)]
#[error("Serialization error for '{key}': {message}")]
pub struct SerializationError {
    /// Storage key of the collection
    pub key: String,
    /// Error detail
    pub message: String,
}
