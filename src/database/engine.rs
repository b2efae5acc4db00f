use std::fmt::Display;

use crate::{
    database::{coerce, matches, ColumnDef, Conditions, Record, SchemaStore, Value, ID_COLUMN},
    DbError, Result,
};

/// Summary returned by `info`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub record_count: usize,
}

impl Display for TableInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns = self.columns.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ");
        write!(f, "Table: {}\nColumns: {}\nRecords: {}", self.name, columns, self.record_count)
    }
}

/// CRUD over a table's record collection.
///
/// Every operation is a function of its arguments only; loading and saving the
/// collection is the caller's job.
pub struct RecordEngine;

impl RecordEngine {
    /// Validates and coerces one row of raw values against the table schema.
    ///
    /// The returned record has every data column but no identity; see
    /// [`RecordEngine::assign_identity`].
    pub fn insert(schema_store: &SchemaStore, table_name: &str, raw_values: &[String]) -> Result<Record> {
        let schema = schema_store.require(table_name)?;
        let columns = schema.data_columns();

        if raw_values.len() != columns.len() {
            return Err(DbError::validation(format!(
                "expected {} values, got {}",
                columns.len(),
                raw_values.len()
            )));
        }

        let mut record = Record::with_capacity(schema.columns.len());
        for (column, raw) in columns.iter().zip(raw_values) {
            let value = coerce(raw, column.ty).ok_or_else(|| DbError::validation(raw.as_str()))?;
            record.insert(column.name.clone(), value);
        }

        Ok(record)
    }

    /// Current watermark + 1, or 1 for a collection without integer ids.
    ///
    /// Fails once the watermark is `i64::MAX`, which `update` can set.
    pub fn next_identity(records: &[Record]) -> Result<i64> {
        match records.iter().filter_map(|r| r.get(ID_COLUMN).and_then(Value::as_int)).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| DbError::validation(format!("no identity left after ID={max}"))),
        }
    }

    /// Stamps `record` with the next identity (as its first field) and returns it.
    pub fn assign_identity(records: &[Record], record: &mut Record) -> Result<i64> {
        let id = Self::next_identity(records)?;
        record.shift_insert(0, ID_COLUMN.to_string(), Value::Int(id));
        Ok(id)
    }

    /// Records matching every condition, in their original order. `None`
    /// returns the whole collection.
    pub fn select(records: &[Record], conditions: Option<&Conditions>) -> Vec<Record> {
        match conditions {
            None => records.to_vec(),
            Some(conditions) => records.iter().filter(|r| matches(r, conditions)).cloned().collect(),
        }
    }

    /// Overwrites the `set` columns of every record matching `filter`, adding
    /// columns that are absent. Returns how many records matched.
    pub fn update(records: &mut [Record], set: &Conditions, filter: &Conditions) -> usize {
        let mut updated = 0;
        for record in records.iter_mut().filter(|r| matches(r, filter)) {
            for (column, value) in set {
                record.insert(column.clone(), value.clone());
            }
            updated += 1;
        }
        updated
    }

    /// Splits off every record matching `filter`; returns the survivors and the
    /// number removed.
    pub fn delete(records: Vec<Record>, filter: &Conditions) -> (Vec<Record>, usize) {
        let before = records.len();
        let kept = records.into_iter().filter(|r| !matches(r, filter)).collect::<Vec<_>>();
        let removed = before - kept.len();
        (kept, removed)
    }

    /// Identity values of the records matching `filter`.
    pub fn matching_ids(records: &[Record], filter: &Conditions) -> Vec<Value> {
        records
            .iter()
            .filter(|r| matches(r, filter))
            .filter_map(|r| r.get(ID_COLUMN).cloned())
            .collect()
    }

    pub fn get_table_info(schema_store: &SchemaStore, table_name: &str, records: &[Record]) -> Result<TableInfo> {
        let schema = schema_store.require(table_name)?;
        Ok(TableInfo {
            name: table_name.to_string(),
            columns: schema.columns.clone(),
            record_count: records.len(),
        })
    }
}
