//! Runtime layer for Retail Pulse.
//!
//! Owns the dashboard session state (data source, filters, pass
//! configuration) and the memoized datasets it reads from.

pub mod dataset_cache;
pub mod session;

pub use pulse_core as core;
pub use pulse_data as data;
