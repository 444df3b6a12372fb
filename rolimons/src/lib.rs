//! Collects Rolimons sale activity into a deduplicated CSV ledger.
//!
//! The [`Collector`] polls the sale activity feed, resolves item names from
//! the item catalog and hands both to the [`Ledger`], which appends only the
//! sales it has not recorded before.
mod collector;
mod config;
mod conversion;
mod date;
mod endpoint;
mod error;
mod http;
pub mod ledger;
pub mod schema;
#[cfg(test)]
mod testing;
mod update;

pub use collector::{Collector, CycleOutcome};
pub use config::Config;
pub use date::DateTime;
pub use endpoint::Endpoint;
pub use error::Error;
pub use http::{Fetched, HttpClient, MarketApi};
pub use ledger::{AppendSummary, DedupKey, Ledger, PersistedRow};
pub use schema::{ItemCatalog, SaleRecord};
pub use update::{fetch_item_catalog, fetch_sale_activity};

pub type Result<T> = std::result::Result<T, Error>;
