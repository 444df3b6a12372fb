use crate::date::DateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// One entry of the sale activity feed.
///
/// The API sends these as positional arrays:
/// `[timestamp, item_id, price, prev_price, serial_id]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSale")]
pub struct SaleRecord {
    pub timestamp: DateTime,
    pub item_id: i64,
    pub price: i64,
    pub prev_price: Option<i64>,
    pub serial_id: Option<i64>,
}

type RawSale = (DateTime, i64, i64, Option<i64>, Option<i64>);

impl From<RawSale> for SaleRecord {
    fn from((timestamp, item_id, price, prev_price, serial_id): RawSale) -> Self {
        Self {
            timestamp,
            item_id,
            price,
            prev_price,
            serial_id,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ActivityResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<SaleRecord>,
}

#[derive(Deserialize, Debug)]
pub struct ItemDetailsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: HashMap<String, Vec<Value>>,
}

/// A field sent as `null` reads the same as a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Item id to display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalog {
    names: HashMap<String, String>,
}

impl ItemCatalog {
    pub fn name_of(&self, item_id: i64) -> &str {
        self.names
            .get(&item_id.to_string())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_ITEM)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<ItemDetailsResponse> for ItemCatalog {
    fn from(response: ItemDetailsResponse) -> Self {
        // Only the first field of each detail list is the name; the rest is unused.
        response
            .items
            .into_iter()
            .filter_map(|(id, details)| match details.into_iter().next() {
                Some(Value::String(name)) => Some((id, name)),
                _ => None,
            })
            .collect()
    }
}

impl FromIterator<(String, String)> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}
