pub mod exec;
pub mod output;

pub use exec::exec;
pub use output::{output_chart, output_json, output_ndjson, output_table};

use chrono::NaiveDate;
use std::path::Path;

/// What a report says about the scan besides the totals themselves.
pub struct ReportContext<'a> {
    pub root: &'a Path,
    pub since: NaiveDate,
    pub until: NaiveDate,
    pub author: Option<&'a str>,
    pub repositories: usize,
}
