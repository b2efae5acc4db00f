pub mod middleware;
pub use middleware::*;

pub mod query_cache;
pub use query_cache::*;

pub mod format;
pub use format::*;

pub mod command_dispatcher;
pub use command_dispatcher::*;
