//! Test doubles shared by the unit tests.
use crate::date::DateTime;
use crate::http::{Fetched, MarketApi};
use crate::schema::{ActivityResponse, ItemCatalog, ItemDetailsResponse, SaleRecord};
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) fn sale(timestamp: i64, item_id: i64, price: i64, prev_price: Option<i64>) -> SaleRecord {
    SaleRecord {
        timestamp: DateTime::from_unix(timestamp).unwrap(),
        item_id,
        price,
        prev_price,
        serial_id: None,
    }
}

pub(crate) fn catalog(names: &[(i64, &str)]) -> ItemCatalog {
    names
        .iter()
        .map(|(id, name)| (id.to_string(), name.to_string()))
        .collect()
}

/// A page of `count` distinct sales one second apart.
pub(crate) fn activity_page(start: i64, count: usize) -> Fetched<ActivityResponse> {
    Fetched::Data(ActivityResponse {
        activities: (0..count as i64)
            .map(|i| sale(start + i, i + 1, 100 + i, Some(90 + i)))
            .collect(),
    })
}

pub(crate) fn item_details(names: &[(i64, &str)]) -> Fetched<ItemDetailsResponse> {
    Fetched::Data(ItemDetailsResponse {
        items: names
            .iter()
            .map(|(id, name)| (id.to_string(), vec![Value::String(name.to_string())]))
            .collect(),
    })
}

/// Replays canned responses in order. Once a script runs out, activity
/// pages come back empty and catalog requests fail.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    activity: Mutex<VecDeque<Fetched<ActivityResponse>>>,
    catalog: Mutex<VecDeque<Fetched<ItemDetailsResponse>>>,
    pages: Mutex<Vec<u32>>,
    catalog_requests: Mutex<usize>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_activity(self, responses: Vec<Fetched<ActivityResponse>>) -> Self {
        self.activity.lock().unwrap().extend(responses);
        self
    }

    pub(crate) fn with_catalog(self, responses: Vec<Fetched<ItemDetailsResponse>>) -> Self {
        self.catalog.lock().unwrap().extend(responses);
        self
    }

    pub(crate) fn activity_pages_requested(&self) -> Vec<u32> {
        self.pages.lock().unwrap().clone()
    }

    pub(crate) fn catalog_requests(&self) -> usize {
        *self.catalog_requests.lock().unwrap()
    }
}

#[async_trait]
impl MarketApi for ScriptedApi {
    async fn sale_activity(&self, page: u32) -> Result<Fetched<ActivityResponse>> {
        self.pages.lock().unwrap().push(page);
        Ok(self
            .activity
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Fetched::Data(ActivityResponse { activities: Vec::new() })))
    }

    async fn item_details(&self) -> Result<Fetched<ItemDetailsResponse>> {
        *self.catalog_requests.lock().unwrap() += 1;
        Ok(self
            .catalog
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Fetched::Failed("no scripted response".to_string())))
    }
}
