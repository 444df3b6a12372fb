use crate::Result;
use serde::{Deserialize, Deserializer};
use time::macros::format_description;
use time::OffsetDateTime;

/// Sale time as reported by the activity feed, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime(pub OffsetDateTime);

impl DateTime {
    pub fn from_unix(seconds: i64) -> Result<Self> {
        Ok(Self(OffsetDateTime::from_unix_timestamp(seconds)?))
    }

    /// `YYYY-MM-DD HH:MM:SS`, the form stored in the ledger.
    pub fn to_ledger_string(&self) -> Result<String> {
        Ok(self
            .0
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))?)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        OffsetDateTime::from_unix_timestamp(i64::deserialize(deserializer)?)
            .map(DateTime)
            .map_err(serde::de::Error::custom)
    }
}
