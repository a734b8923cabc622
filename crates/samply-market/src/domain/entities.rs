//! # Domain Entities
//!
//! Accounts, surveys, submissions and the session handle.

use super::credentials::Credential;
use super::errors::MarketError;
use super::value_objects::{Role, SubmissionStatus, SurveyStatus, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A marketplace user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier (`user_…`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email, unique across accounts.
    pub email: String,
    /// Respondent or researcher.
    pub role: Role,
    /// Affiliation shown on authored surveys.
    #[serde(default)]
    pub institution: String,
    /// Point balance.
    #[serde(default)]
    pub points: u64,
    /// Interests used to narrow the browse list.
    #[serde(default)]
    pub selected_topics: BTreeSet<String>,
}

impl Account {
    /// Add settlement points.
    pub fn credit(&mut self, points: u64) {
        self.points = self.points.saturating_add(points);
    }

    /// Remove points, failing when the balance cannot cover them.
    pub fn debit(&mut self, points: u64) -> Result<(), MarketError> {
        if self.points < points {
            return Err(MarketError::InsufficientPoints {
                required: points,
                available: self.points,
            });
        }
        self.points -= points;
        Ok(())
    }

    /// Check if account is a researcher.
    pub fn is_researcher(&self) -> bool {
        self.role == Role::Researcher
    }
}

/// Account as persisted: profile plus credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Public profile.
    #[serde(flatten)]
    pub account: Account,
    /// Password digest.
    #[serde(flatten)]
    pub credential: Credential,
}

/// Registration form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password (hashed before storage).
    pub password: String,
    /// Requested role.
    pub role: Role,
    /// Affiliation.
    pub institution: String,
}

/// Editable profile fields. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    /// New display name.
    pub name: Option<String>,
    /// New affiliation.
    pub institution: Option<String>,
    /// New interest set.
    pub selected_topics: Option<BTreeSet<String>>,
}

impl ProfilePatch {
    /// Merge the patch into an account.
    pub fn apply_to(self, account: &mut Account) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(institution) = self.institution {
            account.institution = institution;
        }
        if let Some(topics) = self.selected_topics {
            account.selected_topics = topics;
        }
    }
}

/// Handle for the acting account, passed into every engine call.
///
/// Holds a reference, never a copy of the account: the current user is
/// always read back through the account store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Account this session acts for.
    pub account_id: String,
}

impl Session {
    /// Create a session for an account id.
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

/// Persisted active-session record (single active user per store).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    /// Logged-in account.
    pub account_id: String,
    /// Login time.
    pub started_at: Timestamp,
}

/// A researcher's survey posting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    /// Unique identifier (`survey_…`).
    pub id: String,
    /// Title.
    pub title: String,
    /// Description shown to respondents.
    pub description: String,
    /// Owning account id.
    pub researcher_id: String,
    /// Author display name at creation time.
    pub researcher_name: String,
    /// Author affiliation at creation time.
    #[serde(default)]
    pub institution: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Topic tags (non-empty).
    pub topics: BTreeSet<String>,
    /// Approved responses counted while open.
    #[serde(default)]
    pub respondent_count: u64,
    /// Desired number of responses.
    pub target_respondents: u64,
    /// Lifecycle status.
    pub status: SurveyStatus,
    /// External form URL.
    pub form_link: String,
    /// Reward per approved submission.
    pub points: u64,
    /// Last day the survey runs; expires once this date has begun (UTC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// When the survey closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Timestamp>,
}

/// Draft submitted by a researcher to create a survey.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurveyDraft {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Topic tags.
    pub topics: BTreeSet<String>,
    /// Desired number of responses.
    pub target_respondents: u64,
    /// External form URL.
    pub form_link: String,
    /// Reward per approved submission.
    pub points: u64,
    /// Optional deadline date.
    pub deadline: Option<NaiveDate>,
}

impl Survey {
    /// Create an open survey from a validated draft.
    pub fn new(id: String, draft: SurveyDraft, author: &Account, created_at: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            researcher_id: author.id.clone(),
            researcher_name: author.name.clone(),
            institution: author.institution.clone(),
            created_at,
            topics: draft.topics,
            respondent_count: 0,
            target_respondents: draft.target_respondents,
            status: SurveyStatus::Open,
            form_link: draft.form_link,
            points: draft.points,
            deadline: draft.deadline,
            closed_at: None,
        }
    }

    /// Check if survey accepts submissions.
    pub fn is_open(&self) -> bool {
        self.status == SurveyStatus::Open
    }

    /// Instant the deadline takes effect (midnight UTC of the deadline date).
    pub fn deadline_instant(&self) -> Option<Timestamp> {
        self.deadline
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Check if an open survey has a deadline strictly before `now`.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        self.is_open() && self.deadline_instant().is_some_and(|deadline| deadline < now)
    }

    /// Check if `account_id` owns this survey.
    pub fn is_owned_by(&self, account_id: &str) -> bool {
        self.researcher_id == account_id
    }

    /// Close the survey. Happens exactly once.
    pub fn close(&mut self, now: Timestamp) -> Result<(), MarketError> {
        if !self.status.can_transition_to(SurveyStatus::Closed) {
            return Err(MarketError::SurveyClosed(self.id.clone()));
        }
        self.status = SurveyStatus::Closed;
        self.closed_at = Some(now);
        Ok(())
    }

    /// Count an approved response. A closed survey's counter is frozen.
    ///
    /// Returns whether the counter moved.
    pub fn record_approval(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.respondent_count += 1;
        true
    }

    /// Case-insensitive match on title or description.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }

    /// Check if any topic is in `topics`.
    pub fn shares_topic(&self, topics: &BTreeSet<String>) -> bool {
        !self.topics.is_disjoint(topics)
    }
}

/// A respondent's claim of having completed a survey.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Unique identifier (`submission_…`).
    pub id: String,
    /// Target survey.
    pub survey_id: String,
    /// Submitting account.
    pub user_id: String,
    /// Respondent display name at submission time.
    pub user_name: String,
    /// Respondent email at submission time.
    pub user_email: String,
    /// Submission time.
    pub submitted_at: Timestamp,
    /// Review status.
    pub status: SubmissionStatus,
}

impl Submission {
    /// Create a pending submission.
    pub fn new(id: String, survey: &Survey, respondent: &Account, submitted_at: Timestamp) -> Self {
        Self {
            id,
            survey_id: survey.id.clone(),
            user_id: respondent.id.clone(),
            user_name: respondent.name.clone(),
            user_email: respondent.email.clone(),
            submitted_at,
            status: SubmissionStatus::Pending,
        }
    }

    /// Check if awaiting review.
    pub fn is_pending(&self) -> bool {
        self.status == SubmissionStatus::Pending
    }

    /// Transition to a review outcome. Only `pending` may move.
    pub fn transition_to(&mut self, new_status: SubmissionStatus) -> Result<(), MarketError> {
        if !self.status.can_transition_to(new_status) {
            return Err(MarketError::NotPending {
                submission_id: self.id.clone(),
                status: self.status,
            });
        }
        self.status = new_status;
        Ok(())
    }
}

/// Outcome of an approval.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// The approved submission.
    pub submission: Submission,
    /// The survey after the (possibly frozen) count update.
    pub survey: Survey,
    /// Whether `respondent_count` moved.
    pub counted: bool,
    /// Points credited to the respondent.
    pub credited: u64,
    /// Respondent balance after the credit.
    pub respondent_points: u64,
}
