pub mod error;
pub mod types;

pub use error::{Result, WarlineError};
pub use types::{Round, Side, UnitId};
