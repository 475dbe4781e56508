// Query Oracle Module
//
// The command language, its independent evaluator, and the result formatter.

pub mod executor;
pub mod format;
pub mod script;

// Export key public interfaces
pub use executor::OracleEngine;
pub use script::Command;
