//! Lines of code added per language per day, across every git repository under a
//! directory.
//!
//! [`scan::scan`] is the entry point: it finds repositories, runs [`stats::repo_stats`] on
//! each of them in parallel and merges the per-day, per-language totals.

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod lines;
pub mod model;
pub mod report;
pub mod scan;
pub mod stats;
pub mod totals;
pub mod util;

pub use config::{FiletypeDb, IgnoreConfig, IgnoreRules, ScanConfig};
pub use error::{LinelogError, Result};
pub use model::{DateTotals, LanguageTotals};
pub use scan::{scan, Scanner};
