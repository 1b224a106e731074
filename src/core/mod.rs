//! Core data types for the gamma exposure engine
//!
//! Defines fundamental types:
//! - Contract: strike, call/put side, volume, OI, supplied gamma
//! - OptionType: call/put enum
//! - GexError / GexResult: crate-wide error taxonomy

pub mod contract;
pub mod error;

pub use contract::*;
pub use error::*;
