//! A flat-file record store driven by a line-oriented command language.
//!
//! Tables have a fixed schema of `int`, `str` and `bool` columns plus an
//! implicit `ID` identity column. The schema store and each table's records
//! are JSON files that are loaded before, and rewritten after, every command.
//!
//! ```
//! use flatdb::{DbConfig, Dispatcher, MemoryStorage, Reply};
//!
//! let mut db = Dispatcher::new(MemoryStorage::new(), DbConfig::default());
//! db.execute("create_table users name:str age:int active:bool");
//! db.execute("insert into users values (\"Alice\", 30, true)");
//!
//! match db.execute("select from users where active = true") {
//!     Reply::Message(table) => assert!(table.contains("Alice")),
//!     other => panic!("unexpected reply {other:?}"),
//! }
//! ```

pub mod error;
pub use error::{DbError, Result};

pub mod database;
pub use database::{ColumnDef, ColumnType, DbConfig, JsonFileStorage, MemoryStorage, Record, RecordEngine, SchemaStore, Storage, Value};

pub mod parser;

pub mod dispatcher;
pub use dispatcher::{Dispatcher, Outcome, Reply};
