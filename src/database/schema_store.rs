use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{database::ColumnDef, DbError, Result};

/// Ordered column list of a table. The identity column is always first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Columns supplied by the user on insert, i.e. everything after the identity.
    pub fn data_columns(&self) -> &[ColumnDef] {
        match self.columns.first() {
            Some(first) if first.is_identity() => &self.columns[1..],
            _ => &self.columns,
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Table name -> schema, in creation order.
///
/// Serialized as `{ "<table>": { "columns": ["ID:int", ...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SchemaStore {
    tables: IndexMap<String, TableSchema>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table_name: &str) -> Option<&TableSchema> {
        self.tables.get(table_name)
    }

    /// Like [`SchemaStore::get`] but fails with `NotFound`.
    pub fn require(&self, table_name: &str) -> Result<&TableSchema> {
        self.get(table_name).ok_or_else(|| DbError::NotFound(table_name.to_string()))
    }

    pub fn contains(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Whether `table_name` can name a data file: non-empty, with no path
    /// separator, NUL or `..`.
    pub fn is_valid_table_name(table_name: &str) -> bool {
        !table_name.is_empty()
            && !table_name.contains(['/', '\\', '\0'])
            && !table_name.contains("..")
    }

    /// Registers a table from `name:type` definitions.
    ///
    /// Every definition is validated before anything is stored; on success the
    /// identity column is prepended and the full schema is returned.
    pub fn create_table(&mut self, table_name: &str, column_defs: &[String]) -> Result<&TableSchema> {
        if !Self::is_valid_table_name(table_name) {
            return Err(DbError::validation(table_name));
        }
        if self.contains(table_name) {
            return Err(DbError::AlreadyExists(table_name.to_string()));
        }
        if column_defs.is_empty() {
            return Err(DbError::validation("a table needs at least one column"));
        }

        let mut columns = vec![ColumnDef::identity()];
        let mut seen = HashSet::new();
        for raw in column_defs {
            let def = raw.parse::<ColumnDef>().map_err(|_| DbError::validation(raw.as_str()))?;
            if def.is_identity() || !seen.insert(def.name.clone()) {
                return Err(DbError::validation(raw.as_str()));
            }
            columns.push(def);
        }

        let schema = self.tables.entry(table_name.to_string()).or_insert(TableSchema { columns });
        Ok(&*schema)
    }

    /// Removes a table's schema, returning it.
    pub fn drop_table(&mut self, table_name: &str) -> Result<TableSchema> {
        self.tables
            .shift_remove(table_name)
            .ok_or_else(|| DbError::NotFound(table_name.to_string()))
    }

    /// One `- name` line per table, or a "no tables" notice.
    pub fn list_tables(&self) -> String {
        if self.is_empty() {
            return "No tables created.".to_string();
        }
        self.tables.keys().map(|name| format!("- {name}")).collect::<Vec<_>>().join("\n")
    }
}
