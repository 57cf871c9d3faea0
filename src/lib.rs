//! HomeBudget - household expense tracking with budget reports
//!
//! This library provides the core of the `homebudget` command-line tool:
//! categories and expenses kept in JSON files, and four read-only reports
//! over them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and settings management
//! - `error`: Custom error types
//! - `models`: Categories, expenses, ids and money
//! - `storage`: JSON file storage layer
//! - `services`: Validation and referential rules over the stores
//! - `reports`: Budget items, month and category groupings, category by month table
//! - `display`: Terminal tables
//! - `export`: CSV, JSON and YAML output
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use homebudget::config::BudgetPaths;
//! use homebudget::reports::{BudgetReports, ReportQuery};
//! use homebudget::storage::Storage;
//!
//! let storage = Storage::open(BudgetPaths::new()?)?;
//! let items = BudgetReports::new(&storage).budget_items(&ReportQuery::all())?;
//! storage.close()?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

use std::sync::Once;

pub use error::{BudgetError, BudgetResult};

static INIT_TRACING: Once = Once::new();

/// Install the global tracing subscriber, writing to stderr
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. Only the
/// first call has any effect.
pub fn init_tracing(default_filter: &str) {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // another subscriber may already be installed, e.g. by a test harness
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
