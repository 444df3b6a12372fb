use crate::config::Config;
use crate::http::{Fetched, MarketApi};
use crate::schema::{ItemCatalog, SaleRecord};
use crate::Result;
use tokio::time::sleep;

/// Collects recent sales, one page at a time, starting from page 1.
///
/// Paging stops at `max_activity_pages`, at an empty page, once
/// `activity_target` sales have been collected, or on the first failed
/// request. A rate limit waits out the cooldown and then gives up on the
/// remaining pages. Whatever was collected is returned.
pub async fn fetch_sale_activity<A: MarketApi + ?Sized>(
    api: &A,
    config: &Config,
) -> Result<Vec<SaleRecord>> {
    let mut activities = Vec::new();

    for page in 1..=config.max_activity_pages {
        log::info!("Fetching sale activities from page {page}");

        match api.sale_activity(page).await? {
            Fetched::RateLimited => {
                log::warn!(
                    "Rate limit reached for sale activity, sleeping for {}s",
                    config.activity_rate_limit_cooldown.as_secs()
                );
                sleep(config.activity_rate_limit_cooldown).await;
                break;
            }
            Fetched::Failed(reason) => {
                log::error!("Failed to fetch sale activities: {reason}");
                break;
            }
            Fetched::Data(response) if response.activities.is_empty() => {
                log::info!("No more sale activities found");
                break;
            }
            Fetched::Data(response) => {
                activities.extend(response.activities);
                if activities.len() >= config.activity_target {
                    break;
                }
            }
        }
    }

    Ok(activities)
}

/// Fetches the id to name mapping for every item.
///
/// A rate limit is waited out and retried, forever unless
/// `catalog_max_retries` is set. Any other failure yields `None`.
pub async fn fetch_item_catalog<A: MarketApi + ?Sized>(
    api: &A,
    config: &Config,
) -> Result<Option<ItemCatalog>> {
    let mut retries = 0u32;

    loop {
        match api.item_details().await? {
            Fetched::Data(response) => return Ok(Some(response.into())),
            Fetched::Failed(reason) => {
                log::error!("Failed to fetch item details: {reason}");
                return Ok(None);
            }
            Fetched::RateLimited => {
                if config.catalog_max_retries.is_some_and(|max| retries >= max) {
                    log::warn!("Item details still rate limited after {retries} retries, giving up");
                    return Ok(None);
                }
                log::warn!(
                    "Rate limit reached for item details, sleeping for {}s",
                    config.catalog_rate_limit_cooldown.as_secs()
                );
                sleep(config.catalog_rate_limit_cooldown).await;
                retries += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{activity_page, item_details, ScriptedApi};
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn stops_once_target_volume_is_reached() {
        let api = ScriptedApi::new().with_activity(vec![
            activity_page(1_700_000_000, 40),
            activity_page(1_700_001_000, 40),
            activity_page(1_700_002_000, 40),
        ]);
        let config = Config {
            max_activity_pages: 5,
            ..Config::default()
        };

        let sales = fetch_sale_activity(&api, &config).await.unwrap();

        assert_eq!(sales.len(), 80);
        assert_eq!(api.activity_pages_requested(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn respects_page_ceiling() {
        let api = ScriptedApi::new().with_activity(vec![
            activity_page(1_700_000_000, 10),
            activity_page(1_700_001_000, 10),
            activity_page(1_700_002_000, 10),
        ]);

        let sales = fetch_sale_activity(&api, &Config::default()).await.unwrap();

        assert_eq!(sales.len(), 20);
        assert_eq!(api.activity_pages_requested(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_page_stops_paging() {
        let api = ScriptedApi::new().with_activity(vec![
            activity_page(1_700_000_000, 0),
            activity_page(1_700_001_000, 10),
        ]);

        let sales = fetch_sale_activity(&api, &Config::default()).await.unwrap();

        assert!(sales.is_empty());
        assert_eq!(api.activity_pages_requested(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_sleeps_and_aborts_cycle() {
        let api = ScriptedApi::new().with_activity(vec![
            activity_page(1_700_000_000, 10),
            Fetched::RateLimited,
            activity_page(1_700_002_000, 10),
        ]);
        let config = Config {
            max_activity_pages: 3,
            ..Config::default()
        };

        let start = Instant::now();
        let sales = fetch_sale_activity(&api, &config).await.unwrap();

        assert_eq!(sales.len(), 10);
        assert_eq!(api.activity_pages_requested(), vec![1, 2]);
        assert!(start.elapsed() >= Duration::from_secs(45));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_keeps_partial_results() {
        let api = ScriptedApi::new().with_activity(vec![
            activity_page(1_700_000_000, 10),
            Fetched::Failed("500 Internal Server Error".to_string()),
        ]);

        let start = Instant::now();
        let sales = fetch_sale_activity(&api, &Config::default()).await.unwrap();

        assert_eq!(sales.len(), 10);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn catalog_retries_after_rate_limit() {
        let api = ScriptedApi::new().with_catalog(vec![
            Fetched::RateLimited,
            item_details(&[(1028606, "Red Baseball Cap")]),
        ]);

        let start = Instant::now();
        let catalog = fetch_item_catalog(&api, &Config::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(catalog.name_of(1028606), "Red Baseball Cap");
        assert_eq!(api.catalog_requests(), 2);
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn catalog_failure_is_not_retried() {
        let api = ScriptedApi::new().with_catalog(vec![
            Fetched::Failed("503 Service Unavailable".to_string()),
            item_details(&[(1, "Dominus Frigidus")]),
        ]);

        let catalog = fetch_item_catalog(&api, &Config::default()).await.unwrap();

        assert!(catalog.is_none());
        assert_eq!(api.catalog_requests(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn capped_catalog_retries_give_up() {
        let api = ScriptedApi::new().with_catalog(vec![
            Fetched::RateLimited,
            Fetched::RateLimited,
            Fetched::RateLimited,
            item_details(&[(1, "Dominus Frigidus")]),
        ]);
        let config = Config {
            catalog_max_retries: Some(2),
            ..Config::default()
        };

        let catalog = fetch_item_catalog(&api, &config).await.unwrap();

        assert!(catalog.is_none());
        assert_eq!(api.catalog_requests(), 3);
    }
}
