use super::aggregate::day_totals;
use super::select::select_day_commits;
use super::snapshot::summarize;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::filter::IgnoreFilter;
use crate::git::GitRepo;
use crate::model::{CommitMeta, DateTotals, DayWindow, LanguageTotals};
use crate::util::iter_days;
use chrono::{Days, NaiveDate};
use gix::ObjectId;
use std::collections::HashMap;

/// Lines added per day in `[start, end)` for one repository.
///
/// `end` defaults to the day after `start`. When `end < start` the days are visited
/// backwards. Every visited day appears in the result, with an empty map when nothing
/// was added. Fails with `RepositoryState` when HEAD is unborn.
pub fn repo_stats(
    repo: &GitRepo,
    start: NaiveDate,
    end: Option<NaiveDate>,
    author: Option<&str>,
    config: &ScanConfig,
) -> Result<DateTotals> {
    let end = end.unwrap_or_else(|| start.checked_add_days(Days::new(1)).unwrap_or(start));
    let days: Vec<NaiveDate> = iter_days(start, end).collect();

    let history = load_history(repo, days.iter().min().copied())?;
    log::debug!(
        "{}: {} commits in range, {} days",
        repo.path().display(),
        history.len(),
        days.len()
    );

    let matcher = repo.ignore_matcher();
    let mut snapshots = SnapshotCache {
        repo,
        filter: IgnoreFilter::new(&config.rules, Some(&matcher)),
        config,
        summaries: HashMap::new(),
    };

    let mut totals = DateTotals::new();
    for day in days {
        let commits = select_day_commits(
            history.iter().cloned().map(Ok),
            DayWindow::local(day),
            author,
        )?;
        let added = day_totals(&commits, |meta| snapshots.summary(meta))?;
        totals.insert(day, added);
    }

    Ok(totals)
}

/// The newest-first prefix of the history that any day from `earliest` on can need:
/// everything down to and including the first commit older than that day.
fn load_history(repo: &GitRepo, earliest: Option<NaiveDate>) -> Result<Vec<CommitMeta>> {
    let walk = repo.history()?;
    let Some(earliest) = earliest else {
        return Ok(Vec::new());
    };
    let cutoff = DayWindow::local(earliest).start;

    let mut history = Vec::new();
    for commit in walk {
        let commit = commit?;
        let older = commit.time < cutoff;
        history.push(commit);
        if older {
            break;
        }
    }
    Ok(history)
}

struct SnapshotCache<'a> {
    repo: &'a GitRepo,
    filter: IgnoreFilter<'a>,
    config: &'a ScanConfig,
    summaries: HashMap<ObjectId, LanguageTotals>,
}

impl SnapshotCache<'_> {
    fn summary(&mut self, commit: &CommitMeta) -> Result<LanguageTotals> {
        if let Some(totals) = self.summaries.get(&commit.id) {
            return Ok(totals.clone());
        }
        let tree = self.repo.snapshot(commit.id)?;
        let totals = summarize(&tree, &self.filter, self.config)?;
        self.summaries.insert(commit.id, totals.clone());
        Ok(totals)
    }
}
