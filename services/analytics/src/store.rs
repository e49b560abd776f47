//! Record store for the analytics engine
//!
//! Validates incoming rows and holds the normalized record set every
//! downstream component reads from.
//!
//! Invariants:
//! - Every stored record passed validation
//! - A batch is accepted whole or rejected whole (no silent row drops)
//! - Records keep their input order

use std::hash::Hash;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use sales_types::columns::{Column, KeyValue};
use sales_types::errors::{InvalidArgument, ValidationError};
use sales_types::record::{LoaderConfig, RawSaleRow, SaleRecord};

use crate::aggregate::group_by;

/// Immutable, validated set of sale records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: Vec<SaleRecord>,
}

impl RecordStore {
    /// Validate raw rows with the default loader limits.
    pub fn load(rows: &[RawSaleRow]) -> Result<Self, ValidationError> {
        Self::load_with(rows, &LoaderConfig::default())
    }

    /// Validate raw rows.
    ///
    /// Stops at the first invalid row and returns its error; nothing from
    /// the batch is kept.
    pub fn load_with(rows: &[RawSaleRow], config: &LoaderConfig) -> Result<Self, ValidationError> {
        let mut records = Vec::with_capacity(rows.len());

        for (index, raw) in rows.iter().enumerate() {
            match SaleRecord::from_raw(index, raw, config) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(
                        row = err.row,
                        column = %err.column,
                        reason = %err.reason,
                        "Rejecting batch: invalid row"
                    );
                    return Err(err);
                }
            }
        }

        info!(records = records.len(), "RecordStore loaded");
        Ok(Self { records })
    }

    /// Build a store from already typed records, re-checking each one.
    pub fn from_records(
        records: Vec<SaleRecord>,
        config: &LoaderConfig,
    ) -> Result<Self, ValidationError> {
        for (index, record) in records.iter().enumerate() {
            if let Err(err) = record.validate(index, config) {
                warn!(row = err.row, column = %err.column, "Rejecting batch: invalid record");
                return Err(err);
            }
        }
        debug!(records = records.len(), "RecordStore built from typed records");
        Ok(Self { records })
    }

    /// Records in input order.
    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SaleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Partition records by `key`, keys in first-seen order.
    pub fn group_by<K, F>(&self, key: F) -> IndexMap<K, Vec<&SaleRecord>>
    where
        K: Eq + Hash,
        F: Fn(&SaleRecord) -> K,
    {
        group_by(&self.records, key)
    }

    /// Partition records by the tuple of the named columns.
    pub fn group_by_columns(
        &self,
        columns: &[Column],
    ) -> Result<IndexMap<Vec<KeyValue>, Vec<&SaleRecord>>, InvalidArgument> {
        if columns.is_empty() {
            return Err(InvalidArgument::new("columns", "at least one key column is required"));
        }
        Ok(self.group_by(|record| columns.iter().map(|c| c.key_of(record)).collect::<Vec<_>>()))
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a SaleRecord;
    type IntoIter = std::slice::Iter<'a, SaleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
