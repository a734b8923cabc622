//! # Deadline Sweeper
//!
//! Background task that closes overdue surveys on a fixed interval until the
//! shutdown signal fires.

use parking_lot::Mutex;
use samply_market::{IdGenerator, KeyValueStore, MarketplaceService, TimeSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Service shared between the sweeper and its callers.
pub type SharedMarket<KV, TS, IG> = Arc<Mutex<MarketplaceService<KV, TS, IG>>>;

/// Handle to a running sweep task.
pub struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Spawn the sweep loop. The first sweep runs immediately.
    pub fn spawn<KV, TS, IG>(market: SharedMarket<KV, TS, IG>, interval: Duration) -> Self
    where
        KV: KeyValueStore + 'static,
        TS: TimeSource + 'static,
        IG: IdGenerator + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let result = market.lock().sweep_expired();
                        match result {
                            Ok(closed) if !closed.is_empty() => {
                                info!("[samply] ⏰ Sweep closed: {}", closed.join(", "));
                            }
                            Ok(_) => debug!("[samply] Sweep found nothing to close"),
                            Err(e) => error!("[samply] Deadline sweep failed: {}", e),
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        info!("[samply] Sweeper shutting down");
                        break;
                    }
                }
            }
        });

        info!("[samply] 🧹 Deadline sweeper started (every {:?})", interval);
        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Signal the loop to stop and wait for it to finish.
    pub async fn stop(self) {
        if self.shutdown_tx.send(true).is_err() {
            debug!("[samply] Sweeper already stopped");
        }
        if let Err(e) = self.handle.await {
            error!("[samply] Sweeper task failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use samply_market::{
        AccountApi, InMemoryKVStore, ManualTimeSource, MarketConfig, MarketDependencies,
        MarketQueryApi, Registration, Role, SequentialIdGenerator, SurveyDraft,
        SurveyLifecycleApi, SurveyStatus,
    };

    type TestMarket = SharedMarket<InMemoryKVStore, ManualTimeSource, SequentialIdGenerator>;

    fn market_with_survey(clock: &ManualTimeSource) -> (TestMarket, String) {
        let mut market = MarketplaceService::new(
            MarketDependencies {
                kv_store: InMemoryKVStore::new(),
                time_source: clock.clone(),
                ids: SequentialIdGenerator::new(),
            },
            MarketConfig::default(),
        );
        let researcher = market
            .register(Registration {
                name: "Dr. Rao".to_string(),
                email: "rao@northfield.edu".to_string(),
                password: "pw".to_string(),
                role: Role::Researcher,
                institution: String::new(),
            })
            .unwrap();
        let survey = market
            .create_survey(
                &researcher,
                SurveyDraft {
                    title: "Campus food".to_string(),
                    description: "Rate the cafeteria".to_string(),
                    topics: ["Food".to_string()].into_iter().collect(),
                    target_respondents: 10,
                    form_link: "https://forms.example/food".to_string(),
                    points: 5,
                    deadline: NaiveDate::from_ymd_opt(2026, 6, 2),
                },
            )
            .unwrap();
        (Arc::new(Mutex::new(market)), survey.id)
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_closes_overdue_survey() {
        let clock = ManualTimeSource::new(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap());
        let (market, survey_id) = market_with_survey(&clock);

        let sweeper = Sweeper::spawn(market.clone(), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(market.lock().get_survey(&survey_id).unwrap().is_open());

        clock.set(Utc.with_ymd_and_hms(2026, 6, 2, 0, 0, 1).unwrap());
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(
            market.lock().get_survey(&survey_id).unwrap().status,
            SurveyStatus::Closed
        );

        sweeper.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_on_shutdown() {
        let clock = ManualTimeSource::new(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap());
        let (market, survey_id) = market_with_survey(&clock);

        let sweeper = Sweeper::spawn(market.clone(), Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(1)).await;
        sweeper.stop().await;

        clock.set(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert!(market.lock().get_survey(&survey_id).unwrap().is_open());
    }
}
