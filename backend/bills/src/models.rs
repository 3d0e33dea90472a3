//! # Bill Models
//!
//! A bill is addressed everywhere by its key, `"<billNo>/<billYear>"`. The key is
//! the only thing persisted locally; full records always come from the remote
//! source and are otherwise treated as opaque JSON.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::KeyError;

/// Bill year written by clients that serialised a key from a half-loaded record.
const UNDEFINED_YEAR: &str = "undefined";

/// Filter value meaning "no bill type filter".
pub const ALL_BILL_TYPES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BillKey {
    bill_no: String,
    bill_year: String,
}

impl BillKey {
    pub fn new(bill_no: impl Into<String>, bill_year: impl Into<String>) -> Result<Self, KeyError> {
        let bill_no = bill_no.into();
        let bill_year = bill_year.into();

        if bill_no.is_empty() {
            return Err(KeyError::EmptyNumber(format!("{bill_no}/{bill_year}")));
        }

        if bill_year.is_empty() || bill_year == UNDEFINED_YEAR || bill_year.contains('/') {
            return Err(KeyError::InvalidYear(format!("{bill_no}/{bill_year}")));
        }

        Ok(Self { bill_no, bill_year })
    }

    /// Lenient form of [`FromStr`], for persisted keys that may be malformed.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    pub fn bill_no(&self) -> &str {
        &self.bill_no
    }

    pub fn bill_year(&self) -> &str {
        &self.bill_year
    }
}

impl FromStr for BillKey {
    type Err = KeyError;

    // Split at the last separator so any bill number survives a round trip.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (bill_no, bill_year) = raw
            .rsplit_once('/')
            .ok_or_else(|| KeyError::MissingSeparator(raw.to_string()))?;

        Self::new(bill_no, bill_year)
    }
}

impl fmt::Display for BillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bill_no, self.bill_year)
    }
}

/// One result entry from the legislation API, shaped `{ "bill": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillRecord(Value);

impl BillRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn key(&self) -> Option<BillKey> {
        let bill_no = scalar(self.0.pointer("/bill/billNo")?)?;
        let bill_year = scalar(self.0.pointer("/bill/billYear")?)?;

        BillKey::new(bill_no, bill_year).ok()
    }

    pub fn bill(&self) -> Option<&Value> {
        self.0.get("bill")
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BillTypeFilter {
    #[default]
    All,
    Only(String),
}

impl BillTypeFilter {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_BILL_TYPES) => Self::All,
            Some(bill_type) => Self::Only(bill_type.to_string()),
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(bill_type) => Some(bill_type),
        }
    }
}
