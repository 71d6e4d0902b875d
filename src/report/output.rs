use super::ReportContext;
use crate::model::{DateTotals, DayEntry, LanguageTotals, ScanOutput, SCHEMA_VERSION};
use crate::totals::merge_all;
use crate::util::iter_days;
use anyhow::Result;
use chrono::Utc;
use console::style;

const BAR_WIDTH: usize = 40;

pub fn output_json(totals: &DateTotals, ctx: &ReportContext<'_>) -> Result<()> {
    let output = ScanOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        root: ctx.root.to_string_lossy().to_string(),
        since: ctx.since,
        until: ctx.until,
        author: ctx.author.map(str::to_string),
        repositories: ctx.repositories,
        days: day_entries(totals),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(totals: &DateTotals) -> Result<()> {
    for entry in day_entries(totals) {
        println!("{}", serde_json::to_string(&entry)?);
    }
    Ok(())
}

/// One bar per day of the range, scaled to the busiest day. Skipped for single-day ranges.
pub fn output_chart(totals: &DateTotals, ctx: &ReportContext<'_>) -> Result<()> {
    let days: Vec<_> = iter_days(ctx.since, ctx.until).collect();
    if days.len() < 2 {
        return Ok(());
    }

    let daily: Vec<(chrono::NaiveDate, u64)> = days
        .iter()
        .map(|day| {
            let lines = totals.get(day).map(|l| l.values().sum()).unwrap_or(0);
            (*day, lines)
        })
        .collect();
    let max_lines = daily.iter().map(|(_, lines)| *lines).max().unwrap_or(0).max(1);

    println!("{}", style("Lines Added per Day").bold());
    println!("{}", "─".repeat(BAR_WIDTH + 20));

    for (day, lines) in daily {
        let width = ((lines as f64 / max_lines as f64) * BAR_WIDTH as f64).round() as usize;
        println!(
            "{} {}{} {:>8}",
            day.format("%m/%d"),
            style("█".repeat(width)).cyan(),
            " ".repeat(BAR_WIDTH - width),
            lines
        );
    }
    println!();

    Ok(())
}

pub fn output_table(totals: &DateTotals, ctx: &ReportContext<'_>) -> Result<()> {
    let languages: LanguageTotals = merge_all(totals.values().cloned());

    if let Some(author) = ctx.author {
        println!("Commits by {}", style(author).bold());
    }
    println!(
        "{} repositories under {}, {} to {}",
        ctx.repositories,
        ctx.root.display(),
        ctx.since,
        ctx.until
    );

    if languages.is_empty() {
        println!("No lines added");
        return Ok(());
    }

    let mut rows: Vec<(&String, &u64)> = languages.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!("{:<24} {:>10}", style("Language").bold(), style("Lines").bold());
    println!("{}", "─".repeat(35));
    for (language, lines) in rows {
        println!("{:<24} {:>10}", language, lines);
    }
    println!("{}", "─".repeat(35));
    println!(
        "{:<24} {:>10}",
        style("Total").bold(),
        style(languages.values().sum::<u64>()).green()
    );

    Ok(())
}

fn day_entries(totals: &DateTotals) -> Vec<DayEntry> {
    totals
        .iter()
        .map(|(date, languages)| DayEntry::new(*date, languages.clone()))
        .collect()
}
