//! Data layer for Retail Pulse.
//!
//! Loads transaction records from CSV files or the seeded demo generator,
//! normalizes them, applies the categorical filters and runs the full
//! dashboard pass.

pub mod aggregator;
pub mod analysis;
pub mod demo;
pub mod filter;
pub mod normalizer;
pub mod reader;

pub use pulse_core as core;
