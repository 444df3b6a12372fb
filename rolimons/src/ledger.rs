//! Append-only CSV ledger of observed sales.
//!
//! The ledger keeps every [`DedupKey`] it has seen in memory so that a sale
//! already present on disk is never written twice. The set is rebuilt from
//! the file on [`Ledger::load`] and only grows afterwards.
use crate::schema::{ItemCatalog, SaleRecord};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

pub const HEADER: [&str; 5] = ["timestamp", "item_name", "sale_price", "prev_price", "item_id"];

/// A sale as it is stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersistedRow {
    pub timestamp: String,
    pub item_name: String,
    pub sale_price: i64,
    pub prev_price: Option<i64>,
    pub item_id: i64,
}

/// Uniqueness key of a row. The previous price is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub timestamp: String,
    pub item_name: String,
    pub sale_price: String,
    pub item_id: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AppendSummary {
    pub added: usize,
    pub skipped: usize,
}

/// Owns the ledger file and the set of keys already written to it.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    seen: HashSet<DedupKey>,
}

impl Ledger {
    /// Opens the ledger at `path` and rebuilds the set of known keys.
    ///
    /// A missing file yields an empty ledger; the file is created on the
    /// first [`append`](Self::append). The header row is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a row has fewer than
    /// five columns.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut seen = HashSet::new();

        if path.exists() {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_path(&path)?;

            for record in reader.records() {
                let record = record?;
                seen.insert(DedupKey::from_record(&record)?);
            }
        }

        log::info!("Loaded {} existing entries from {}", seen.len(), path.display());
        Ok(Self { path, seen })
    }

    /// Appends every sale whose key has not been seen yet.
    ///
    /// Item names are resolved through `catalog`, falling back to
    /// `"Unknown Item"`. The header is written first if the file is empty.
    /// Duplicates, including repeats inside `sales` itself, are logged and
    /// skipped.
    pub fn append(&mut self, sales: &[SaleRecord], catalog: &ItemCatalog) -> Result<AppendSummary> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(HEADER)?;
            writer.flush()?;
        }

        let mut summary = AppendSummary::default();

        for sale in sales {
            let row = PersistedRow::from_sale(sale, catalog)?;
            let key = DedupKey::from(&row);

            if self.seen.contains(&key) {
                log::info!(
                    "Duplicate skipped: {}, {}, {}, {}",
                    key.timestamp,
                    key.item_name,
                    key.sale_price,
                    key.item_id
                );
                summary.skipped += 1;
                continue;
            }

            writer.serialize(&row)?;
            writer.flush()?;
            self.seen.insert(key);
            summary.added += 1;

            log::info!(
                "Added to ledger: {}, {}, {}, {}, {}",
                row.timestamp,
                row.item_name,
                row.sale_price,
                row.prev_price.map(|p| p.to_string()).unwrap_or_default(),
                row.item_id
            );
        }

        Ok(summary)
    }

    pub fn contains(&self, key: &DedupKey) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DedupKey {
    fn from_record(record: &csv::StringRecord) -> Result<Self> {
        let field = |i: usize| {
            record.get(i).map(str::to_owned).ok_or_else(|| Error::MalformedRow {
                row: record.position().map(|p| p.line()).unwrap_or_default(),
                found: record.len(),
            })
        };

        Ok(Self {
            timestamp: field(0)?,
            item_name: field(1)?,
            sale_price: field(2)?,
            item_id: field(4)?,
        })
    }
}
