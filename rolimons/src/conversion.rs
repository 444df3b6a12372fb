use crate::ledger::{DedupKey, PersistedRow};
use crate::schema::{ItemCatalog, SaleRecord};
use crate::Result;

impl PersistedRow {
    pub(crate) fn from_sale(sale: &SaleRecord, catalog: &ItemCatalog) -> Result<Self> {
        Ok(Self {
            timestamp: sale.timestamp.to_ledger_string()?,
            item_name: catalog.name_of(sale.item_id).to_owned(),
            sale_price: sale.price,
            prev_price: sale.prev_price,
            item_id: sale.item_id,
        })
    }
}

impl From<&PersistedRow> for DedupKey {
    fn from(row: &PersistedRow) -> Self {
        Self {
            timestamp: row.timestamp.clone(),
            item_name: row.item_name.clone(),
            sale_price: row.sale_price.to_string(),
            item_id: row.item_id.to_string(),
        }
    }
}
