use crate::error::Result;
use crate::model::{CommitMeta, DayCommit, DayWindow};

/// Picks the commits of one day out of a newest-first history walk.
///
/// The result is newest-first and always ends with a baseline: the first commit older
/// than the window (whoever authored it), or [`DayCommit::Empty`] when the walk runs
/// out before reaching one. A day with a single matching commit therefore yields two
/// entries, and a day without matching commits yields only the baseline.
pub fn select_day_commits<I>(
    history: I,
    window: DayWindow,
    author: Option<&str>,
) -> Result<Vec<DayCommit>>
where
    I: IntoIterator<Item = Result<CommitMeta>>,
{
    let wanted = author.map(normalize_author);
    let mut day = Vec::new();

    for commit in history {
        let commit = commit?;
        if commit.time > window.end {
            continue;
        }
        if commit.time < window.start {
            day.push(DayCommit::Commit(commit));
            return Ok(day);
        }
        if author_matches(&commit, wanted.as_deref()) {
            day.push(DayCommit::Commit(commit));
        }
    }

    day.push(DayCommit::Empty);
    Ok(day)
}

fn author_matches(commit: &CommitMeta, wanted: Option<&str>) -> bool {
    match wanted {
        Some(name) => normalize_author(&commit.author_name) == name,
        None => true,
    }
}

pub fn normalize_author(name: &str) -> String {
    name.trim().to_lowercase()
}
