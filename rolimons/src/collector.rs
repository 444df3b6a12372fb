use crate::config::Config;
use crate::http::MarketApi;
use crate::ledger::{AppendSummary, Ledger};
use crate::update::{fetch_item_catalog, fetch_sale_activity};
use crate::Result;
use tokio::time::sleep;

/// What a single polling cycle ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    NoActivity,
    CatalogUnavailable,
    Appended(AppendSummary),
}

/// Polls the activity feed and records new sales into the ledger.
pub struct Collector<A> {
    api: A,
    ledger: Ledger,
    config: Config,
}

impl<A: MarketApi> Collector<A> {
    pub fn new(api: A, ledger: Ledger, config: Config) -> Self {
        Self {
            api,
            ledger,
            config,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Fetch, enrich and append once. The catalog is only requested when
    /// there is activity to record.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        let activities = fetch_sale_activity(&self.api, &self.config).await?;
        if activities.is_empty() {
            return Ok(CycleOutcome::NoActivity);
        }

        let catalog = match fetch_item_catalog(&self.api, &self.config).await? {
            Some(catalog) if !catalog.is_empty() => catalog,
            _ => return Ok(CycleOutcome::CatalogUnavailable),
        };

        let summary = self.ledger.append(&activities, &catalog)?;
        log::info!(
            "Recorded {} new sales, skipped {} duplicates",
            summary.added,
            summary.skipped
        );
        Ok(CycleOutcome::Appended(summary))
    }

    /// Runs cycles forever, waiting `poll_interval` between them. Only
    /// returns if a cycle fails.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            log::info!("Starting data collection");
            self.run_cycle().await?;

            log::info!(
                "Waiting for {}s before the next fetch",
                self.config.poll_interval.as_secs()
            );
            sleep(self.config.poll_interval).await;
        }
    }
}
