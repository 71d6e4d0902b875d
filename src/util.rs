use chrono::{Days, NaiveDate};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::{Match, WalkBuilder};
use std::path::{Path, PathBuf};

/// Every day from `start` up to but excluding `end`, walking backwards when `end < start`.
pub fn iter_days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let backwards = end < start;
    let mut current = Some(start);
    std::iter::from_fn(move || {
        let day = current.filter(|day| *day != end)?;
        current = if backwards {
            day.checked_sub_days(Days::new(1))
        } else {
            day.checked_add_days(Days::new(1))
        };
        Some(day)
    })
}

/// The working tree's own ignore rules: `.git/info/exclude` and every `.gitignore`, each
/// scoped to the directory it lives in.
pub struct GitIgnoreMatcher {
    /// `(directory relative to the working tree, rules)`, deepest directories first.
    levels: Vec<(PathBuf, Gitignore)>,
}

impl GitIgnoreMatcher {
    pub fn new(workdir: &Path) -> Self {
        let mut dirs = gitignore_dirs(workdir);
        dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));

        let mut levels = Vec::new();
        for dir in dirs {
            let root = workdir.join(&dir);
            let mut builder = GitignoreBuilder::new(&root);
            let mut files = Vec::new();
            if dir.as_os_str().is_empty() {
                files.push(workdir.join(".git/info/exclude"));
            }
            files.push(root.join(".gitignore"));

            for file in files.iter().filter(|file| file.is_file()) {
                if let Some(err) = builder.add(file) {
                    log::warn!("Ignoring unreadable rules in {}: {err}", file.display());
                }
            }
            match builder.build() {
                Ok(gi) if !gi.is_empty() => levels.push((dir, gi)),
                Ok(_) => {}
                Err(err) => {
                    log::warn!("Failed to build ignore rules for {}: {err}", root.display());
                }
            }
        }
        Self { levels }
    }

    pub fn empty() -> Self {
        Self { levels: Vec::new() }
    }

    /// `path` is relative to the working directory root. The deepest rule file with an
    /// opinion on `path` decides, so nested `!pattern` lines can re-include.
    pub fn is_ignored(&self, path: &str, is_dir: bool) -> bool {
        let path = Path::new(path);
        for (dir, gi) in &self.levels {
            let Ok(inner) = path.strip_prefix(dir) else {
                continue;
            };
            if inner.as_os_str().is_empty() {
                continue;
            }
            match gi.matched_path_or_any_parents(inner, is_dir) {
                Match::None => continue,
                found => return found.is_ignore(),
            }
        }
        false
    }
}

/// Directories (relative to `workdir`) that hold rule files, the root always included.
fn gitignore_dirs(workdir: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::new()];
    let walk = WalkBuilder::new(workdir)
        .hidden(false)
        .parents(false)
        .filter_entry(|entry| entry.file_name() != ".git")
        .build();

    for entry in walk {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("Skipping part of {}: {err}", workdir.display());
                continue;
            }
        };
        if entry.file_name() != ".gitignore" || entry.depth() < 2 {
            continue;
        }
        if let Some(dir) = entry.path().parent().and_then(|p| p.strip_prefix(workdir).ok()) {
            dirs.push(dir.to_path_buf());
        }
    }
    dirs
}
