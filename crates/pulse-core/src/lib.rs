//! Domain layer for Retail Pulse.
//!
//! Holds the transaction and summary models, the error taxonomy, business
//! assumptions, day-first date parsing, the ABC / priority classifiers, the
//! monthly trend engine, number formatting and CLI settings.

pub mod assumptions;
pub mod classification;
pub mod config;
pub mod dates;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod trend;
