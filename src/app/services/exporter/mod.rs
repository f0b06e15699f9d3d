//! Persistence and export of the consolidated dataset
//!
//! The corpus is persisted once as a flat CSV table (the canonical form) and
//! re-projected into JSON structures optimized for different lookup patterns:
//! a flat array, a by-date index, a by-currency history index and a compact
//! transmission form.
//!
//! - [`csv_store`] - Canonical CSV dataset read/write
//! - [`json_views`] - Derived JSON projections

pub mod csv_store;
pub mod json_views;

pub use csv_store::{load_corpus, write_corpus};
pub use json_views::export_json_views;
