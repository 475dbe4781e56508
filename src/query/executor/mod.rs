// Oracle Executor Module
//
// Selection, fetch, aggregation and arithmetic over in-memory columns, plus
// the engine that runs a command plan through them.

pub mod engine;
pub mod fetch;
pub mod operators;
pub mod result;
pub mod select;

// Export key types
pub use self::engine::OracleEngine;
pub use self::fetch::fetch;
pub use self::result::{OracleError, OracleResult};
pub use self::select::{select, select_fetched};
