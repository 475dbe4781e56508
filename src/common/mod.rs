pub mod types;

pub use types::{Bound, Position, PositionSet, Value, ValueVector};
