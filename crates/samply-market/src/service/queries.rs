//! # Query API Implementation
//!
//! Read-only dashboard projections. Nothing here writes to the store.

use super::helpers::survey_index;
use super::*;
use crate::domain::{browse, invariant_survey_owner, MarketError, Session, Submission, Survey};
use crate::ports::inbound::MarketQueryApi;

impl<KV, TS, IG> MarketQueryApi for MarketplaceService<KV, TS, IG>
where
    KV: KeyValueStore,
    TS: TimeSource,
    IG: IdGenerator,
{
    fn get_survey(&self, survey_id: &str) -> Result<Survey, MarketError> {
        let mut surveys = self.load_surveys()?;
        let idx = survey_index(&surveys, survey_id)?;
        Ok(surveys.swap_remove(idx))
    }

    fn browse_surveys(&self, session: &Session, query: &str) -> Result<Vec<Survey>, MarketError> {
        let respondent = self.actor(session)?;
        Ok(browse::browseable_surveys(
            &self.load_surveys()?,
            &self.load_submissions()?,
            &respondent,
            query,
        ))
    }

    fn researcher_surveys(
        &self,
        session: &Session,
        query: &str,
    ) -> Result<Vec<Survey>, MarketError> {
        let researcher = self.actor(session)?;
        Ok(browse::authored_surveys(
            &self.load_surveys()?,
            &researcher,
            query,
        ))
    }

    fn completed_surveys(&self, session: &Session) -> Result<Vec<Survey>, MarketError> {
        let respondent = self.actor(session)?;
        Ok(browse::completed_surveys(
            &self.load_surveys()?,
            &self.load_submissions()?,
            &respondent,
        ))
    }

    fn survey_responses(
        &self,
        session: &Session,
        survey_id: &str,
    ) -> Result<Vec<Submission>, MarketError> {
        let researcher = self.actor(session)?;
        let surveys = self.load_surveys()?;
        invariant_survey_owner(&surveys[survey_index(&surveys, survey_id)?], &researcher)?;

        Ok(self
            .load_submissions()?
            .into_iter()
            .filter(|s| s.survey_id == survey_id)
            .collect())
    }

    fn submission_for(
        &self,
        session: &Session,
        survey_id: &str,
    ) -> Result<Option<Submission>, MarketError> {
        Ok(self
            .load_submissions()?
            .into_iter()
            .find(|s| s.survey_id == survey_id && s.user_id == session.account_id))
    }
}
