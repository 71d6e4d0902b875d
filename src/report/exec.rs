use super::{output_chart, output_json, output_ndjson, output_table, ReportContext};
use crate::cli::Cli;
use crate::config::ScanConfig;
use crate::git::global_username;
use crate::scan::Scanner;
use anyhow::Context;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};

pub fn exec(cli: Cli) -> anyhow::Result<()> {
    let root = if cli.all {
        dirs::home_dir().context("Failed to locate the home directory")?
    } else {
        match &cli.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to read the current directory")?,
        }
    };
    let recursive = cli.recursive || cli.all;

    let author = if cli.all_commits {
        None
    } else {
        cli.username.clone().or_else(global_username)
    };
    match &author {
        Some(name) => log::info!("Counting commits by {name}"),
        None => log::info!("Counting commits by every author"),
    }

    let today = Local::now().date_naive();
    let (since, until) = cli
        .resolve_range(today)
        .context("Failed to resolve date range")?;

    let config = ScanConfig::load(cli.config.as_deref(), cli.filetypes.as_deref())
        .context("Failed to load configuration")?;

    let mut scanner = Scanner::new(&config)
        .author(author.as_deref())
        .recursive(recursive)
        .parallel(!cli.sequential);

    let repos = scanner
        .discover(&root)
        .with_context(|| format!("Failed to search {} for repositories", root.display()))?;

    let machine_output = cli.json || cli.ndjson;
    if !machine_output && !cli.no_progress {
        let pb = ProgressBar::new(repos.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Scanning repositories...");
        scanner = scanner.progress(pb);
    }

    let totals = scanner.scan_repositories(&repos, since, until);

    let ctx = ReportContext {
        root: &root,
        since,
        until,
        author: author.as_deref(),
        repositories: repos.len(),
    };

    if cli.json {
        output_json(&totals, &ctx)?;
    } else if cli.ndjson {
        output_ndjson(&totals)?;
    } else {
        output_chart(&totals, &ctx)?;
        output_table(&totals, &ctx)?;
    }

    Ok(())
}
