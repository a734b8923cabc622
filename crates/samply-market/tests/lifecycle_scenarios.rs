//! # Marketplace Lifecycle Scenarios
//!
//! End-to-end flows through the public API, from registration to settlement.
//!
//! ## Test Strategy
//!
//! - Scenarios drive the service only through `AccountApi`,
//!   `SurveyLifecycleApi` and `MarketQueryApi`
//! - Time is a `ManualTimeSource`, so deadline behavior is deterministic
//! - The file-backed store is reopened to prove state survives a restart

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use samply_market::{
    AccountApi, FileBackedKVStore, InMemoryKVStore, KeyValueStore, ManualTimeSource, MarketConfig,
    MarketDependencies, MarketError, MarketQueryApi, MarketplaceService, Registration, Role,
    SequentialIdGenerator, Session, StorageKey, SubmissionStatus, SurveyDraft, SurveyLifecycleApi,
    SurveyStatus, TimeSource,
};

fn clock() -> ManualTimeSource {
    ManualTimeSource::new(Utc.with_ymd_and_hms(2026, 5, 4, 8, 0, 0).unwrap())
}

fn service_over<KV: KeyValueStore>(
    kv_store: KV,
    clock: &ManualTimeSource,
) -> MarketplaceService<KV, ManualTimeSource, SequentialIdGenerator> {
    MarketplaceService::new(
        MarketDependencies {
            kv_store,
            time_source: clock.clone(),
            ids: SequentialIdGenerator::new(),
        },
        MarketConfig::default(),
    )
}

fn registration(name: &str, email: &str, role: Role) -> Registration {
    Registration {
        name: name.to_string(),
        email: email.to_string(),
        password: "hunter2".to_string(),
        role,
        institution: "Northfield College".to_string(),
    }
}

fn survey_draft(points: u64, deadline: Option<NaiveDate>) -> SurveyDraft {
    SurveyDraft {
        title: "Sleep and screen time".to_string(),
        description: "A short questionnaire about evening device use".to_string(),
        topics: ["Health".to_string(), "Technology".to_string()]
            .into_iter()
            .collect(),
        target_respondents: 40,
        form_link: "https://forms.example/sleep".to_string(),
        points,
        deadline,
    }
}

#[test]
fn test_full_settlement_flow() {
    let clock = clock();
    let mut market = service_over(InMemoryKVStore::new(), &clock);

    let researcher = market
        .register(registration("Dr. Rao", "rao@northfield.edu", Role::Researcher))
        .unwrap();
    let alice = market
        .register(registration("Alice", "alice@mail.test", Role::Respondent))
        .unwrap();
    let bob = market
        .register(registration("Bob", "bob@mail.test", Role::Respondent))
        .unwrap();

    let survey = market
        .create_survey(&researcher, survey_draft(10, None))
        .unwrap();
    assert_eq!(market.current_user(&researcher).unwrap().points, 90);

    let from_alice = market.submit(&alice, &survey.id).unwrap();
    let from_bob = market.submit(&bob, &survey.id).unwrap();
    assert_eq!(market.survey_responses(&researcher, &survey.id).unwrap().len(), 2);

    let settlement = market.approve(&researcher, &from_alice.id).unwrap();
    assert_eq!(settlement.respondent_points, 10);
    assert_eq!(settlement.survey.respondent_count, 1);

    market.reject(&researcher, &from_bob.id).unwrap();

    assert_eq!(market.current_user(&alice).unwrap().points, 10);
    assert_eq!(market.current_user(&bob).unwrap().points, 0);
    assert_eq!(market.current_user(&researcher).unwrap().points, 90);
    assert_eq!(market.get_survey(&survey.id).unwrap().respondent_count, 1);

    let statuses: Vec<SubmissionStatus> = market
        .survey_responses(&researcher, &survey.id)
        .unwrap()
        .into_iter()
        .map(|s| s.status)
        .collect();
    assert_eq!(
        statuses,
        vec![SubmissionStatus::Approved, SubmissionStatus::Rejected]
    );
}

#[test]
fn test_deadline_closes_survey_and_blocks_intake() {
    let clock = clock();
    let mut market = service_over(InMemoryKVStore::new(), &clock);

    let researcher = market
        .register(registration("Dr. Rao", "rao@northfield.edu", Role::Researcher))
        .unwrap();
    let respondent = market
        .register(registration("Alice", "alice@mail.test", Role::Respondent))
        .unwrap();

    let survey = market
        .create_survey(&researcher, survey_draft(5, NaiveDate::from_ymd_opt(2026, 5, 5)))
        .unwrap();

    // The deadline date itself has started but not passed
    clock.set(Utc.with_ymd_and_hms(2026, 5, 5, 0, 0, 0).unwrap());
    assert!(market.sweep_expired().unwrap().is_empty());

    clock.advance(Duration::seconds(1));
    assert_eq!(market.sweep_expired().unwrap(), vec![survey.id.clone()]);

    let closed = market.get_survey(&survey.id).unwrap();
    assert_eq!(closed.status, SurveyStatus::Closed);
    assert_eq!(closed.closed_at, Some(clock.now()));

    assert!(matches!(
        market.submit(&respondent, &survey.id),
        Err(MarketError::SurveyClosed(_))
    ));
    assert!(market.browse_surveys(&respondent, "").unwrap().is_empty());
    assert!(market.sweep_expired().unwrap().is_empty());
}

#[test]
fn test_failed_operations_leave_store_untouched() {
    let clock = clock();
    let mut market = service_over(InMemoryKVStore::new(), &clock);

    let researcher = market
        .register(registration("Dr. Rao", "rao@northfield.edu", Role::Researcher))
        .unwrap();
    let snapshot = |m: &MarketplaceService<InMemoryKVStore, _, _>| {
        (
            m.store().get(StorageKey::ACCOUNTS).unwrap(),
            m.store().get(StorageKey::SURVEYS).unwrap(),
        )
    };
    let before = snapshot(&market);

    assert!(market
        .create_survey(&researcher, survey_draft(250, None))
        .is_err());
    assert!(market
        .create_survey(&researcher, SurveyDraft::default())
        .is_err());
    assert!(market
        .register(registration("Imposter", "rao@northfield.edu", Role::Researcher))
        .is_err());

    assert_eq!(snapshot(&market), before);
}

#[test]
fn test_session_survives_reload_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samply.json");
    let clock = clock();

    let (researcher, survey_id) = {
        let mut market = service_over(FileBackedKVStore::open(&path).unwrap(), &clock);
        let researcher = market
            .register(registration("Dr. Rao", "rao@northfield.edu", Role::Researcher))
            .unwrap();
        let survey = market
            .create_survey(&researcher, survey_draft(20, None))
            .unwrap();
        (researcher, survey.id)
    };

    let mut market = service_over(FileBackedKVStore::open(&path).unwrap(), &clock);
    assert_eq!(market.active_session().unwrap(), Some(researcher.clone()));
    assert_eq!(market.current_user(&researcher).unwrap().points, 80);
    assert_eq!(market.get_survey(&survey_id).unwrap().points, 20);

    market.logout(&researcher).unwrap();
    let session = market.login("rao@northfield.edu", "hunter2").unwrap();
    assert_eq!(session, researcher);
}

#[test]
fn test_unknown_session_is_rejected() {
    let clock = clock();
    let mut market = service_over(InMemoryKVStore::new(), &clock);
    let ghost = Session::new("user_missing");

    assert!(matches!(
        market.current_user(&ghost),
        Err(MarketError::NotFound { kind: "account", .. })
    ));
    assert!(matches!(
        market.create_survey(&ghost, survey_draft(1, None)),
        Err(MarketError::NotFound { .. })
    ));
}
