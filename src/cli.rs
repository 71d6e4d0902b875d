use crate::error::{LinelogError, Result};
use chrono::{Days, NaiveDate};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linelog")]
#[command(about = "Count lines of code added per language per day across git repositories")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Directory to scan (defaults to the current directory)")]
    pub start_dir: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Only count commits by this author (defaults to the global git user.name)"
    )]
    pub username: Option<String>,

    #[arg(short = 'c', long, help = "Count commits by every author; overrides --username")]
    pub all_commits: bool,

    #[arg(short, long, help = "Search subdirectories of START_DIR for repositories")]
    pub recursive: bool,

    #[arg(short, long, help = "Scan every repository under the home directory")]
    pub all: bool,

    #[arg(
        short,
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Number of days to report, ending today"
    )]
    pub days: u32,

    #[arg(long, help = "First day to report (YYYY-MM-DD or a duration ago, e.g. 2weeks)")]
    pub since: Option<String>,

    #[arg(long, help = "Day after the last reported day (YYYY-MM-DD or a duration ago)")]
    pub until: Option<String>,

    #[arg(long, help = "Path to the ignore configuration (JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Path to the filetype database (JSON)")]
    pub filetypes: Option<PathBuf>,

    #[arg(long, help = "Scan repositories one at a time")]
    pub sequential: bool,

    #[arg(long, conflicts_with = "ndjson", help = "Output as JSON")]
    pub json: bool,

    #[arg(long, help = "Output as NDJSON")]
    pub ndjson: bool,

    #[arg(long, help = "Hide the progress bar")]
    pub no_progress: bool,

    #[arg(short, long, action = ArgAction::Count, help = "More logging (-v info, -vv debug)")]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> anyhow::Result<()> {
        crate::report::exec(self)
    }

    /// `[since, until)` relative to `today`; by default the last `--days` days.
    pub fn resolve_range(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
        let since = match &self.since {
            Some(input) => parse_date(input, today)?,
            None => today
                .checked_sub_days(Days::new(u64::from(self.days.saturating_sub(1))))
                .ok_or_else(|| LinelogError::InvalidDate(format!("{} days ago", self.days)))?,
        };

        let until = match &self.until {
            Some(input) => parse_date(input, today)?,
            None => today
                .checked_add_days(Days::new(1))
                .ok_or_else(|| LinelogError::InvalidDate(today.to_string()))?,
        };

        Ok((since, until))
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// `YYYY-MM-DD`, `today`, or a humantime duration counted back from `today`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    if input.eq_ignore_ascii_case("today") {
        return Ok(today);
    }

    let spec = input.strip_suffix("ago").unwrap_or(input).trim();
    let duration = humantime::parse_duration(spec)
        .map_err(|e| LinelogError::InvalidDate(format!("'{input}': {e}")))?;

    today
        .checked_sub_days(Days::new(duration.as_secs() / 86_400))
        .ok_or_else(|| LinelogError::InvalidDate(format!("'{input}' is out of range")))
}
