//! # Browse Projections
//!
//! Read-only views over the survey and submission collections. The stores
//! never hide anything; visibility is decided here, by the consuming surface.

use super::entities::{Account, Submission, Survey};
use super::value_objects::SubmissionStatus;
use std::collections::HashSet;

/// Surveys a respondent can still take.
///
/// Drops surveys the respondent already submitted to (any status) and
/// surveys that are not open, keeps only surveys sharing a topic with the
/// respondent's interests when any are set, then applies the free-text query.
pub fn browseable_surveys(
    surveys: &[Survey],
    submissions: &[Submission],
    respondent: &Account,
    query: &str,
) -> Vec<Survey> {
    let submitted: HashSet<&str> = submissions
        .iter()
        .filter(|s| s.user_id == respondent.id)
        .map(|s| s.survey_id.as_str())
        .collect();

    surveys
        .iter()
        .filter(|survey| !submitted.contains(survey.id.as_str()))
        .filter(|survey| survey.matches_query(query))
        .filter(|survey| {
            respondent.selected_topics.is_empty() || survey.shares_topic(&respondent.selected_topics)
        })
        .filter(|survey| survey.is_open())
        .cloned()
        .collect()
}

/// Surveys authored by `researcher`, optionally narrowed by a query.
pub fn authored_surveys(surveys: &[Survey], researcher: &Account, query: &str) -> Vec<Survey> {
    surveys
        .iter()
        .filter(|survey| survey.is_owned_by(&researcher.id))
        .filter(|survey| survey.matches_query(query))
        .cloned()
        .collect()
}

/// Surveys for which `respondent` holds an approved submission.
pub fn completed_surveys(
    surveys: &[Survey],
    submissions: &[Submission],
    respondent: &Account,
) -> Vec<Survey> {
    let approved: HashSet<&str> = submissions
        .iter()
        .filter(|s| s.user_id == respondent.id && s.status == SubmissionStatus::Approved)
        .map(|s| s.survey_id.as_str())
        .collect();

    surveys
        .iter()
        .filter(|survey| approved.contains(survey.id.as_str()))
        .cloned()
        .collect()
}
