use crate::error::Result;
use crate::model::{CommitMeta, DayCommit, LanguageTotals};
use crate::totals::{growth, merge_all};

/// Lines added over a day, given snapshot totals ordered newest-first.
///
/// Consecutive snapshots are compared oldest to newest and each language's growth is
/// floored at zero before summing, so code that moves or is rewritten within the day
/// counts only where a snapshot actually grew.
pub fn aggregate_day(snapshots: &[LanguageTotals]) -> LanguageTotals {
    let oldest_first: Vec<&LanguageTotals> = snapshots.iter().rev().collect();
    merge_all(
        oldest_first
            .windows(2)
            .map(|pair| growth(pair[0], pair[1])),
    )
}

/// Summarizes each of the day's commits with `summarize` and aggregates the results.
/// The empty baseline counts as a snapshot with no lines.
pub fn day_totals<F>(commits: &[DayCommit], mut summarize: F) -> Result<LanguageTotals>
where
    F: FnMut(&CommitMeta) -> Result<LanguageTotals>,
{
    if commits.len() < 2 {
        return Ok(LanguageTotals::new());
    }

    let snapshots = commits
        .iter()
        .map(|commit| match commit {
            DayCommit::Commit(meta) => summarize(meta),
            DayCommit::Empty => Ok(LanguageTotals::new()),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(aggregate_day(&snapshots))
}
