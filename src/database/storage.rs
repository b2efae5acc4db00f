use std::{
    collections::HashMap,
    fs,
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    database::{DbConfig, Record, SchemaStore},
    Result,
};

/// Where schemas and table collections live between commands.
///
/// Loading something that was never saved yields an empty value, never an
/// error. Saving replaces the previous state as a whole.
pub trait Storage {
    fn load_schema(&self) -> Result<SchemaStore>;
    fn save_schema(&mut self, schema: &SchemaStore) -> Result<()>;
    fn load_table(&self, table_name: &str) -> Result<Vec<Record>>;
    fn save_table(&mut self, table_name: &str, records: &[Record]) -> Result<()>;
    /// Discards a table's records; a missing table is not an error.
    fn remove_table(&mut self, table_name: &str) -> Result<()>;
}

/// Pretty-printed JSON files: one for the schema store, one per table.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    data_dir: PathBuf,
    metadata_file: PathBuf,
}

impl JsonFileStorage {
    pub fn new(config: &DbConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            metadata_file: config.metadata_file.clone(),
        }
    }

    pub fn table_path(&self, table_name: &str) -> PathBuf {
        self.data_dir.join(format!("{table_name}.json"))
    }

    fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes to a sibling temp file, then renames it over `path`.
    fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let file = fs::File::create(&tmp)?;
        let mut w = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut w, data)?;
        w.flush()?;
        drop(w);

        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), "saved");
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn load_schema(&self) -> Result<SchemaStore> {
        Self::read_json(&self.metadata_file)
    }

    fn save_schema(&mut self, schema: &SchemaStore) -> Result<()> {
        Self::write_json(&self.metadata_file, schema)
    }

    fn load_table(&self, table_name: &str) -> Result<Vec<Record>> {
        Self::read_json(&self.table_path(table_name))
    }

    fn save_table(&mut self, table_name: &str, records: &[Record]) -> Result<()> {
        Self::write_json(&self.table_path(table_name), records)
    }

    fn remove_table(&mut self, table_name: &str) -> Result<()> {
        match fs::remove_file(self.table_path(table_name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps everything in memory; handy for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    pub schema: SchemaStore,
    pub tables: HashMap<String, Vec<Record>>,
    /// Number of successful saves, schema and tables alike
    pub writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load_schema(&self) -> Result<SchemaStore> {
        Ok(self.schema.clone())
    }

    fn save_schema(&mut self, schema: &SchemaStore) -> Result<()> {
        self.schema = schema.clone();
        self.writes += 1;
        Ok(())
    }

    fn load_table(&self, table_name: &str) -> Result<Vec<Record>> {
        Ok(self.tables.get(table_name).cloned().unwrap_or_default())
    }

    fn save_table(&mut self, table_name: &str, records: &[Record]) -> Result<()> {
        self.tables.insert(table_name.to_string(), records.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn remove_table(&mut self, table_name: &str) -> Result<()> {
        self.tables.remove(table_name);
        Ok(())
    }
}
