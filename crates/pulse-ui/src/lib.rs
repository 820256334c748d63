//! Terminal UI layer for Retail Pulse.
//!
//! Themes, line-level components, the trend chart, the category table and
//! the interactive dashboard event loop, built on [`ratatui`].

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod table_view;
pub mod themes;
pub mod trend_view;

pub use pulse_core as core;
