//! Derived-view computation engine for the competition dashboard.
//!
//! Every view is a pure function of (resource collections, filter
//! parameters): the presentation layer recomputes eagerly on each state
//! change and identical inputs yield identical output, rank assignment
//! included.

pub mod chart;
pub mod data;
pub mod history;
pub mod join;
pub mod leaderboard;
pub mod metric;
pub mod selection;

pub use data::ProgramData;
pub use selection::Selection;
