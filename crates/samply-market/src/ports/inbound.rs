//! # Inbound Ports (Driving Ports)
//!
//! What the marketplace can do. Every call names its actor through an
//! explicit [`Session`]; nothing is read from ambient state.

use crate::domain::{
    Account, MarketError, ProfilePatch, Registration, Session, Settlement, Submission, Survey,
    SurveyDraft, Timestamp,
};

/// Account lifecycle and authentication capability.
pub trait AccountApi {
    /// Create an account and make it the active session.
    fn register(&mut self, registration: Registration) -> Result<Session, MarketError>;

    /// Authenticate and make the account the active session.
    fn login(&mut self, email: &str, password: &str) -> Result<Session, MarketError>;

    /// Clear the active session.
    fn logout(&mut self, session: &Session) -> Result<(), MarketError>;

    /// The persisted active session, if any.
    fn active_session(&self) -> Result<Option<Session>, MarketError>;

    /// Read-through view of the session's account.
    fn current_user(&self, session: &Session) -> Result<Account, MarketError>;

    /// Merge profile fields. `Ok(None)` when the session resolves to no account.
    fn update_profile(
        &mut self,
        session: &Session,
        patch: ProfilePatch,
    ) -> Result<Option<Account>, MarketError>;

    /// Replace the point balance. `Ok(None)` when the session resolves to no account.
    fn update_points(
        &mut self,
        session: &Session,
        new_balance: u64,
    ) -> Result<Option<Account>, MarketError>;
}

/// Survey and submission lifecycle.
pub trait SurveyLifecycleApi {
    /// Publish a survey, debiting its reward from the author once.
    fn create_survey(&mut self, session: &Session, draft: SurveyDraft)
        -> Result<Survey, MarketError>;

    /// Close every open survey whose deadline is strictly before `now`.
    ///
    /// Returns the ids closed by this call; a repeat call returns none.
    fn expire_overdue_surveys(&mut self, now: Timestamp) -> Result<Vec<String>, MarketError>;

    /// Close a survey on its author's request. No refund.
    fn close_survey(&mut self, session: &Session, survey_id: &str)
        -> Result<Survey, MarketError>;

    /// Record a pending submission.
    fn submit(&mut self, session: &Session, survey_id: &str) -> Result<Submission, MarketError>;

    /// Approve a pending submission and settle its points.
    fn approve(&mut self, session: &Session, submission_id: &str)
        -> Result<Settlement, MarketError>;

    /// Reject a pending submission.
    fn reject(&mut self, session: &Session, submission_id: &str)
        -> Result<Submission, MarketError>;
}

/// Read-only queries backing the dashboards.
pub trait MarketQueryApi {
    /// Look up a survey.
    fn get_survey(&self, survey_id: &str) -> Result<Survey, MarketError>;

    /// Open surveys the respondent may still take.
    fn browse_surveys(&self, session: &Session, query: &str) -> Result<Vec<Survey>, MarketError>;

    /// Surveys authored by the session's researcher.
    fn researcher_surveys(&self, session: &Session, query: &str)
        -> Result<Vec<Survey>, MarketError>;

    /// Surveys with an approved submission by the session's respondent.
    fn completed_surveys(&self, session: &Session) -> Result<Vec<Survey>, MarketError>;

    /// All submissions of a survey. Owner only.
    fn survey_responses(
        &self,
        session: &Session,
        survey_id: &str,
    ) -> Result<Vec<Submission>, MarketError>;

    /// The session's own submission on a survey.
    fn submission_for(
        &self,
        session: &Session,
        survey_id: &str,
    ) -> Result<Option<Submission>, MarketError>;
}
