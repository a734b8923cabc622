//! # Domain Invariants
//!
//! Business rules checked before any store is touched.

use super::entities::{Account, AccountRecord, Registration, Submission, Survey, SurveyDraft};
use super::errors::MarketError;
use super::value_objects::Role;

/// Invariant: required registration fields are present.
pub fn validate_registration(registration: &Registration) -> Result<(), MarketError> {
    require_non_empty("name", &registration.name)?;
    require_non_empty("email", &registration.email)?;
    require_non_empty("password", &registration.password)?;
    Ok(())
}

/// Invariant: a survey draft is complete.
///
/// Title, description and form link are non-empty, at least one topic is
/// chosen, the reward and the target are positive.
pub fn validate_draft(draft: &SurveyDraft) -> Result<(), MarketError> {
    require_non_empty("title", &draft.title)?;
    require_non_empty("description", &draft.description)?;
    require_non_empty("formLink", &draft.form_link)?;
    if draft.topics.is_empty() {
        return Err(MarketError::Validation(
            "at least one topic is required".to_string(),
        ));
    }
    if draft.points == 0 {
        return Err(MarketError::Validation(
            "points must be greater than 0".to_string(),
        ));
    }
    if draft.target_respondents == 0 {
        return Err(MarketError::Validation(
            "targetRespondents must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Invariant: email is unique across accounts.
pub fn invariant_unique_email(accounts: &[AccountRecord], email: &str) -> Result<(), MarketError> {
    if accounts.iter().any(|r| r.account.email == email) {
        return Err(MarketError::DuplicateEmail(email.to_string()));
    }
    Ok(())
}

/// Invariant: author can fund the survey reward.
pub fn invariant_sufficient_points(author: &Account, required: u64) -> Result<(), MarketError> {
    if author.points < required {
        return Err(MarketError::InsufficientPoints {
            required,
            available: author.points,
        });
    }
    Ok(())
}

/// Invariant: actor holds the role the operation needs.
pub fn invariant_role(account: &Account, role: Role, action: &str) -> Result<(), MarketError> {
    if account.role != role {
        return Err(MarketError::PermissionDenied(format!(
            "only a {} may {}",
            role, action
        )));
    }
    Ok(())
}

/// Invariant: actor owns the survey.
pub fn invariant_survey_owner(survey: &Survey, account: &Account) -> Result<(), MarketError> {
    if !survey.is_owned_by(&account.id) {
        return Err(MarketError::PermissionDenied(format!(
            "survey {} is not owned by {}",
            survey.id, account.id
        )));
    }
    Ok(())
}

/// Invariant: submissions only reach open surveys.
pub fn invariant_survey_open(survey: &Survey) -> Result<(), MarketError> {
    if !survey.is_open() {
        return Err(MarketError::SurveyClosed(survey.id.clone()));
    }
    Ok(())
}

/// Invariant: one submission per (survey, respondent), whatever its status.
pub fn invariant_first_submission(
    submissions: &[Submission],
    survey_id: &str,
    user_id: &str,
) -> Result<(), MarketError> {
    if submissions
        .iter()
        .any(|s| s.survey_id == survey_id && s.user_id == user_id)
    {
        return Err(MarketError::DuplicateSubmission {
            survey_id: survey_id.to_string(),
            user_id: user_id.to_string(),
        });
    }
    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), MarketError> {
    if value.trim().is_empty() {
        return Err(MarketError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
