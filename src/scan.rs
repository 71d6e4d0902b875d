//! Repository discovery under a directory tree and the multi-repository merge.

use crate::config::{IgnoreRules, ScanConfig};
use crate::error::{LinelogError, Result};
use crate::git::GitRepo;
use crate::model::DateTotals;
use crate::stats::repo_stats;
use crate::totals::{merge_all, sparse, Merge};
use chrono::NaiveDate;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// Lines added per day across every repository found under `root`.
///
/// Days on which no repository added anything are left out.
pub fn scan(
    root: &Path,
    start: NaiveDate,
    end: NaiveDate,
    config: &ScanConfig,
    author: Option<&str>,
) -> Result<DateTotals> {
    Scanner::new(config).author(author).scan(root, start, end)
}

pub struct Scanner<'a> {
    config: &'a ScanConfig,
    author: Option<String>,
    recursive: bool,
    parallel: bool,
    progress: Option<ProgressBar>,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Self {
            config,
            author: None,
            recursive: true,
            parallel: true,
            progress: None,
        }
    }

    pub fn author(mut self, author: Option<&str>) -> Self {
        self.author = author.map(str::to_string);
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Advanced once per finished repository.
    pub fn progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn scan(&self, root: &Path, start: NaiveDate, end: NaiveDate) -> Result<DateTotals> {
        let repos = self.discover(root)?;
        Ok(self.scan_repositories(&repos, start, end))
    }

    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        discover_repositories(root, &self.config.rules, self.recursive)
    }

    /// Runs every repository independently and merges the results.
    pub fn scan_repositories(&self, repos: &[PathBuf], start: NaiveDate, end: NaiveDate) -> DateTotals {
        if let Some(pb) = &self.progress {
            pb.set_length(repos.len() as u64);
        }

        let merged = if self.parallel {
            repos
                .par_iter()
                .map(|path| self.scan_one(path, start, end))
                .reduce(DateTotals::new, Merge::merge)
        } else {
            merge_all(repos.iter().map(|path| self.scan_one(path, start, end)))
        };

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
        sparse(merged)
    }

    /// One repository's totals; any failure leaves this repository out.
    fn scan_one(&self, path: &Path, start: NaiveDate, end: NaiveDate) -> DateTotals {
        let result = GitRepo::open(path)
            .and_then(|repo| repo_stats(&repo, start, Some(end), self.author.as_deref(), self.config));

        if let Some(pb) = &self.progress {
            pb.inc(1);
        }

        match result {
            Ok(totals) => totals,
            Err(err) if err.is_repository_state() => {
                log::debug!("Skipping {}: {err}", path.display());
                DateTotals::new()
            }
            Err(err) => {
                log::warn!("Skipping {}: {err}", path.display());
                DateTotals::new()
            }
        }
    }
}

/// Breadth-first search for repositories under `root`.
///
/// `root` itself is returned alone when it is a repository. Without `recursive`, the
/// repository enclosing `root` is used, if any. With `recursive`, every directory below
/// it is visited except hidden ones, those matched by the path patterns of `rules`
/// (tested as `relative/path/`), and the insides of repositories.
pub fn discover_repositories(root: &Path, rules: &IgnoreRules, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(LinelogError::Path(root.to_path_buf()));
    }
    if GitRepo::is_repository_root(root) {
        return Ok(vec![root.to_path_buf()]);
    }
    if !recursive {
        return Ok(match GitRepo::discover_workdir(root) {
            Some(workdir) => vec![workdir],
            None => {
                log::warn!("{} is not inside a git repository", root.display());
                Vec::new()
            }
        });
    }

    let mut repos = Vec::new();
    let mut queue: VecDeque<PathBuf> = subdirectories(root)?.into();

    while let Some(dir) = queue.pop_front() {
        if is_hidden(&dir) {
            continue;
        }
        if rules.path_excluded(&relative_dir(root, &dir)) {
            log::debug!("Ignoring {}", dir.display());
            continue;
        }
        if GitRepo::is_repository_root(&dir) {
            log::debug!("Found repository {}", dir.display());
            repos.push(dir);
            continue;
        }
        match subdirectories(&dir) {
            Ok(children) => queue.extend(children),
            Err(err) => log::warn!("Cannot read {}: {err}", dir.display()),
        }
    }

    Ok(repos)
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // file_type does not follow symlinks
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn is_hidden(dir: &Path) -> bool {
    dir.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn relative_dir(root: &Path, dir: &Path) -> String {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("{}/", parts.join("/"))
}
