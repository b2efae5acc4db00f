pub mod column_type;
pub use column_type::*;

pub mod column_def;
pub use column_def::*;

pub mod value;
pub use value::*;

pub mod record;
pub use record::*;

pub mod schema_store;
pub use schema_store::*;

pub mod engine;
pub use engine::*;

pub mod db_config;
pub use db_config::*;

pub mod storage;
pub use storage::*;
