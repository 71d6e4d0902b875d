pub mod aggregate;
pub mod repo;
pub mod select;
pub mod snapshot;

pub use aggregate::{aggregate_day, day_totals};
pub use repo::repo_stats;
pub use select::select_day_commits;
pub use snapshot::{summarize, SnapshotBlob, SnapshotEntry, SnapshotTree};
