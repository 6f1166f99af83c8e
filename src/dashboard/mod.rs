//! Dashboard module
//!
//! Provides an overview page for one month showing sales totals, charts and
//! a searchable listing of the records.

mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
