//! Reusable line-level building blocks for the dashboard screens.

pub mod header;
pub mod indicators;
pub mod kpi_card;
