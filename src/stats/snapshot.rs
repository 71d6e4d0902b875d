use crate::config::ScanConfig;
use crate::error::Result;
use crate::filter::IgnoreFilter;
use crate::lines::{count_significant_lines, looks_binary};
use crate::model::LanguageTotals;

/// A directory inside one commit's snapshot.
pub trait SnapshotTree: Sized {
    type Blob: SnapshotBlob;

    fn entries(&self) -> Result<Vec<SnapshotEntry<Self>>>;
}

/// A file inside one commit's snapshot; content is loaded on demand.
pub trait SnapshotBlob {
    fn data(&self) -> Result<Vec<u8>>;
}

pub enum SnapshotEntry<T: SnapshotTree> {
    /// `name` is `None` when the stored name is not valid UTF-8.
    Dir { name: Option<String>, tree: T },
    File { name: Option<String>, blob: T::Blob },
}

/// Sums significant lines per language over every file reachable from `tree`.
pub fn summarize<T: SnapshotTree>(
    tree: &T,
    filter: &IgnoreFilter<'_>,
    config: &ScanConfig,
) -> Result<LanguageTotals> {
    let mut totals = LanguageTotals::new();
    walk(tree, "", filter, config, &mut totals)?;
    totals.retain(|_, lines| *lines != 0);
    Ok(totals)
}

fn walk<T: SnapshotTree>(
    tree: &T,
    prefix: &str,
    filter: &IgnoreFilter<'_>,
    config: &ScanConfig,
    totals: &mut LanguageTotals,
) -> Result<()> {
    for entry in tree.entries()? {
        match entry {
            SnapshotEntry::Dir { name: Some(name), tree } => {
                let path = join(prefix, &name);
                if filter.is_dir_ignored(&path) {
                    continue;
                }
                walk(&tree, &path, filter, config, totals)?;
            }
            SnapshotEntry::File { name: Some(name), blob } => {
                let path = join(prefix, &name);
                if filter.is_file_ignored(&path) {
                    continue;
                }
                let Some(language) = config.filetypes.classify(&name) else {
                    continue;
                };
                let data = blob.data()?;
                if looks_binary(&data) {
                    continue;
                }
                let rules = filter.rules();
                let lines =
                    count_significant_lines(&data, rules.noise_for(language), rules.min_chars());
                *totals.entry(language.to_string()).or_insert(0) += lines as u64;
            }
            SnapshotEntry::Dir { name: None, .. } | SnapshotEntry::File { name: None, .. } => {}
        }
    }
    Ok(())
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
