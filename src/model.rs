use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use gix::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Language label → significant line count. Never holds a zero entry once merged.
pub type LanguageTotals = BTreeMap<String, u64>;

/// Calendar day → per-language totals.
pub type DateTotals = BTreeMap<NaiveDate, LanguageTotals>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMeta {
    pub id: ObjectId,
    /// Committer time, seconds since the epoch.
    pub time: i64,
    pub author_name: String,
}

/// One element of a day's commit list. `Empty` stands in for "no earlier commit",
/// i.e. a zero baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayCommit {
    Commit(CommitMeta),
    Empty,
}

impl DayCommit {
    pub fn time(&self) -> Option<i64> {
        match self {
            DayCommit::Commit(meta) => Some(meta.time),
            DayCommit::Empty => None,
        }
    }
}

/// Inclusive `[start, end]` bounds of one calendar day, in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: i64,
    pub end: i64,
}

impl DayWindow {
    /// Window for `date` in the local time zone.
    pub fn local(date: NaiveDate) -> Self {
        Self::in_zone(date, &Local)
    }

    pub fn utc(date: NaiveDate) -> Self {
        Self::in_zone(date, &Utc)
    }

    pub fn in_zone<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let start = midnight(date, tz);
        let end = date
            .succ_opt()
            .map(|next| midnight(next, tz) - 1)
            .unwrap_or(i64::MAX);
        Self { start, end }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

fn midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    // Zones that skip midnight on a DST switch have no local 00:00; fall back to UTC.
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| naive.and_utc().timestamp())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub languages: LanguageTotals,
    pub total: u64,
}

impl DayEntry {
    pub fn new(date: NaiveDate, languages: LanguageTotals) -> Self {
        let total = languages.values().sum();
        Self { date, languages, total }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub since: NaiveDate,
    pub until: NaiveDate,
    pub author: Option<String>,
    pub repositories: usize,
    pub days: Vec<DayEntry>,
}
