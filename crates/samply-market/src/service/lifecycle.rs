//! # Survey Lifecycle Implementation
//!
//! Survey creation and expiry, submission intake, and settlement.
//!
//! ## Settlement
//!
//! ```text
//! [pending] ──approve──→ [approved]  respondent.points += survey.points
//!     │                              survey.respondent_count += 1 (open only)
//!     └──────reject───→ [rejected]   nothing moves
//! ```

use super::helpers::{account_index, put_json, submission_index, survey_index};
use super::*;
use crate::domain::{
    invariant_first_submission, invariant_role, invariant_sufficient_points,
    invariant_survey_open, invariant_survey_owner, validate_draft, MarketError, Role, Session,
    Settlement, StorageKey, Submission, SubmissionStatus, Survey, SurveyDraft, Timestamp,
};
use crate::ports::inbound::SurveyLifecycleApi;
use tracing::{debug, info};

impl<KV, TS, IG> MarketplaceService<KV, TS, IG>
where
    KV: KeyValueStore,
    TS: TimeSource,
    IG: IdGenerator,
{
    /// Run the deadline sweep at the service clock's current time.
    pub fn sweep_expired(&mut self) -> Result<Vec<String>, MarketError> {
        let now = self.time_source.now();
        self.expire_overdue_surveys(now)
    }

    /// Load the submission and its survey, checking the actor owns the survey.
    fn review_target(
        &self,
        session: &Session,
        submission_id: &str,
    ) -> Result<(Vec<Submission>, usize, Vec<Survey>, usize), MarketError> {
        let reviewer = self.actor(session)?;
        let submissions = self.load_submissions()?;
        let sub_idx = submission_index(&submissions, submission_id)?;
        let surveys = self.load_surveys()?;
        let survey_idx = survey_index(&surveys, &submissions[sub_idx].survey_id)?;
        invariant_survey_owner(&surveys[survey_idx], &reviewer)?;
        Ok((submissions, sub_idx, surveys, survey_idx))
    }
}

impl<KV, TS, IG> SurveyLifecycleApi for MarketplaceService<KV, TS, IG>
where
    KV: KeyValueStore,
    TS: TimeSource,
    IG: IdGenerator,
{
    fn create_survey(
        &mut self,
        session: &Session,
        draft: SurveyDraft,
    ) -> Result<Survey, MarketError> {
        let mut records = self.load_accounts()?;
        let author_idx = account_index(&records, &session.account_id)
            .ok_or_else(|| MarketError::account_not_found(&session.account_id))?;

        let author = &mut records[author_idx].account;
        invariant_role(author, Role::Researcher, "create surveys")?;
        validate_draft(&draft)?;
        invariant_sufficient_points(author, draft.points)?;

        // The reward pool is paid once, up front
        author.debit(draft.points)?;

        let survey = Survey::new(
            self.ids.next_id("survey"),
            draft,
            author,
            self.time_source.now(),
        );

        let mut surveys = self.load_surveys()?;
        surveys.push(survey.clone());

        self.kv_store.atomic_batch_write(vec![
            put_json(StorageKey::SURVEYS, &surveys)?,
            put_json(StorageKey::ACCOUNTS, &records)?,
        ])?;

        info!(
            "[samply] 📋 Survey {} published by {} ({} points per response)",
            survey.id, survey.researcher_id, survey.points
        );
        Ok(survey)
    }

    fn expire_overdue_surveys(&mut self, now: Timestamp) -> Result<Vec<String>, MarketError> {
        let mut surveys = self.load_surveys()?;
        let mut expired = Vec::new();

        for survey in surveys.iter_mut().filter(|s| s.is_overdue(now)) {
            survey.close(now)?;
            expired.push(survey.id.clone());
        }

        if expired.is_empty() {
            debug!("[samply] Deadline sweep: nothing overdue");
            return Ok(expired);
        }

        self.kv_store
            .atomic_batch_write(vec![put_json(StorageKey::SURVEYS, &surveys)?])?;

        info!("[samply] ⏰ Closed {} overdue survey(s)", expired.len());
        Ok(expired)
    }

    fn close_survey(&mut self, session: &Session, survey_id: &str) -> Result<Survey, MarketError> {
        let actor = self.actor(session)?;
        let mut surveys = self.load_surveys()?;
        let idx = survey_index(&surveys, survey_id)?;

        invariant_survey_owner(&surveys[idx], &actor)?;
        surveys[idx].close(self.time_source.now())?;
        let closed = surveys[idx].clone();

        self.kv_store
            .atomic_batch_write(vec![put_json(StorageKey::SURVEYS, &surveys)?])?;

        info!(
            "[samply] 🔒 Survey {} closed by its author ({} responses)",
            closed.id, closed.respondent_count
        );
        Ok(closed)
    }

    fn submit(&mut self, session: &Session, survey_id: &str) -> Result<Submission, MarketError> {
        let respondent = self.actor(session)?;
        invariant_role(&respondent, Role::Respondent, "submit responses")?;

        let surveys = self.load_surveys()?;
        let survey = &surveys[survey_index(&surveys, survey_id)?];
        invariant_survey_open(survey)?;

        let mut submissions = self.load_submissions()?;
        invariant_first_submission(&submissions, &survey.id, &respondent.id)?;

        let submission = Submission::new(
            self.ids.next_id("submission"),
            survey,
            &respondent,
            self.time_source.now(),
        );
        submissions.push(submission.clone());

        self.kv_store
            .atomic_batch_write(vec![put_json(StorageKey::SUBMISSIONS, &submissions)?])?;

        info!(
            "[samply] 📨 Submission {} recorded for survey {}",
            submission.id, submission.survey_id
        );
        Ok(submission)
    }

    fn approve(
        &mut self,
        session: &Session,
        submission_id: &str,
    ) -> Result<Settlement, MarketError> {
        let (mut submissions, sub_idx, mut surveys, survey_idx) =
            self.review_target(session, submission_id)?;

        submissions[sub_idx].transition_to(SubmissionStatus::Approved)?;
        let counted = surveys[survey_idx].record_approval();

        let mut records = self.load_accounts()?;
        let respondent_id = submissions[sub_idx].user_id.clone();
        let respondent_idx = account_index(&records, &respondent_id)
            .ok_or_else(|| MarketError::account_not_found(&respondent_id))?;

        let credited = surveys[survey_idx].points;
        let respondent = &mut records[respondent_idx].account;
        respondent.credit(credited);
        let respondent_points = respondent.points;

        self.kv_store.atomic_batch_write(vec![
            put_json(StorageKey::SUBMISSIONS, &submissions)?,
            put_json(StorageKey::SURVEYS, &surveys)?,
            put_json(StorageKey::ACCOUNTS, &records)?,
        ])?;

        info!(
            "[samply] ✓ Submission {} approved: +{} points to {}{}",
            submission_id,
            credited,
            respondent_id,
            if counted { "" } else { " (survey closed, count frozen)" }
        );

        Ok(Settlement {
            submission: submissions.swap_remove(sub_idx),
            survey: surveys.swap_remove(survey_idx),
            counted,
            credited,
            respondent_points,
        })
    }

    fn reject(&mut self, session: &Session, submission_id: &str) -> Result<Submission, MarketError> {
        let (mut submissions, sub_idx, _, _) = self.review_target(session, submission_id)?;

        submissions[sub_idx].transition_to(SubmissionStatus::Rejected)?;

        self.kv_store
            .atomic_batch_write(vec![put_json(StorageKey::SUBMISSIONS, &submissions)?])?;

        info!("[samply] ✗ Submission {} rejected", submission_id);
        Ok(submissions.swap_remove(sub_idx))
    }
}
