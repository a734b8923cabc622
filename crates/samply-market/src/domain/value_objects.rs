//! # Domain Value Objects
//!
//! Roles, lifecycle states, storage keys and configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wall-clock instant used for every stamp in the marketplace.
pub type Timestamp = DateTime<Utc>;

/// Topic catalog offered to surfaces when picking survey topics or
/// respondent interests. Topics remain free text; this list is not enforced.
pub const AVAILABLE_TOPICS: [&str; 11] = [
    "Education",
    "Psychology",
    "Healthcare",
    "Technology",
    "Marketing",
    "Business",
    "Social Science",
    "Environment",
    "Political Science",
    "Economics",
    "Communication",
];

/// Account role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Completes surveys for points.
    #[default]
    Respondent,
    /// Posts surveys and reviews submissions.
    Researcher,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Respondent => write!(f, "respondent"),
            Role::Researcher => write!(f, "researcher"),
        }
    }
}

/// Survey lifecycle: `Open → Closed`, once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    /// Accepting submissions.
    #[default]
    Open,
    /// Closed by its author or by deadline expiry.
    Closed,
}

impl SurveyStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: SurveyStatus) -> bool {
        matches!((self, next), (Self::Open, Self::Closed))
    }
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurveyStatus::Open => write!(f, "open"),
            SurveyStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Submission review state machine.
///
/// ```text
/// [pending] ──approve──→ [approved]
///     │
///     └──────reject───→ [rejected]
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    /// Awaiting researcher review.
    #[default]
    Pending,
    /// Settled: points credited.
    Approved,
    /// Refused: nothing moves.
    Rejected,
}

impl SubmissionStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: SubmissionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "pending"),
            SubmissionStatus::Approved => write!(f, "approved"),
            SubmissionStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Storage keys of the persisted collections.
///
/// | Key | Value |
/// |-----|-------|
/// | `samplyUsers` | `[AccountRecord]` |
/// | `samplySurveys` | `[Survey]` |
/// | `surveySubmissions` | `[Submission]` |
/// | `samplyUser` | `ActiveSession` |
pub struct StorageKey;

impl StorageKey {
    /// Account collection.
    pub const ACCOUNTS: &'static str = "samplyUsers";
    /// Survey collection.
    pub const SURVEYS: &'static str = "samplySurveys";
    /// Submission collection.
    pub const SUBMISSIONS: &'static str = "surveySubmissions";
    /// Active session record.
    pub const ACTIVE_SESSION: &'static str = "samplyUser";
}

/// Configuration for the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// Points granted to a researcher at registration (default: 100).
    pub researcher_starting_points: u64,
    /// Points granted to a respondent at registration (default: 0).
    pub respondent_starting_points: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            researcher_starting_points: 100,
            respondent_starting_points: 0,
        }
    }
}

impl MarketConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the researcher starting grant.
    pub fn with_researcher_starting_points(mut self, points: u64) -> Self {
        self.researcher_starting_points = points;
        self
    }

    /// Set the respondent starting grant.
    pub fn with_respondent_starting_points(mut self, points: u64) -> Self {
        self.respondent_starting_points = points;
        self
    }

    /// Starting balance for a freshly registered account.
    pub fn starting_points(&self, role: Role) -> u64 {
        match role {
            Role::Researcher => self.researcher_starting_points,
            Role::Respondent => self.respondent_starting_points,
        }
    }
}
