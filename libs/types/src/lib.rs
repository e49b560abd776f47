//! Types library for the car-sales analytics engine
//!
//! This library provides the value types shared by the aggregation engine
//! and its host process, ensuring type safety and deterministic arithmetic.
//!
//! # Modules
//! - `numeric`: Exact decimal money type (`Money`)
//! - `period`: Calendar month identifier (`YearMonth`)
//! - `columns`: Named input columns and numeric fields
//! - `record`: Raw input rows and validated sale records
//! - `errors`: Error taxonomy

// Public modules
pub mod numeric;
pub mod period;
pub mod columns;
pub mod record;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::numeric::*;
    pub use crate::period::*;
    pub use crate::columns::*;
    pub use crate::record::*;
    pub use crate::errors::*;
}
