//! Data fetching and storage
//!
//! External collaborators around the pure engine:
//! - Yahoo Finance for SPX/ES prices and a live option feed
//! - Contract sources (synthetic generator, range filter)
//! - Local JSON stores for snapshots and the session spread
//! - Daily CSV summary table

pub mod cache;
pub mod report;
pub mod source;
pub mod yahoo;

pub use cache::*;
pub use report::*;
pub use source::*;
pub use yahoo::*;
