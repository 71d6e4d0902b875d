use crate::error::{LinelogError, Result};
use crate::model::CommitMeta;
use crate::stats::snapshot::{SnapshotBlob, SnapshotEntry, SnapshotTree};
use crate::util::GitIgnoreMatcher;
use gix::revision::walk::Sorting;
use gix::traverse::commit::simple::CommitTimeOrder;
use gix::{ObjectId, Repository};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository whose working tree (or git dir) is exactly `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = gix::open(path.as_ref())?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// True when `dir` carries git metadata of its own.
    pub fn is_repository_root(dir: &Path) -> bool {
        dir.join(".git").exists()
    }

    /// Working tree of the repository enclosing `dir`, searching upwards.
    pub fn discover_workdir(dir: &Path) -> Option<PathBuf> {
        match gix::discover(dir) {
            Ok(repo) => repo.workdir().map(Path::to_path_buf),
            Err(err) => {
                log::debug!("No repository encloses {}: {err}", dir.display());
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_unborn(&self) -> Result<bool> {
        Ok(self.repo.head()?.is_unborn())
    }

    /// The commit HEAD points at, or `RepositoryState` for an unborn HEAD.
    pub fn tip(&self) -> Result<ObjectId> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Err(LinelogError::RepositoryState(self.path.clone()));
        }
        let head_commit = head.peel_to_commit_in_place()?;
        Ok(head_commit.id)
    }

    /// Walks every commit reachable from the tip, newest committer time first.
    ///
    /// Parents of shallow commits are not followed, so a shallow clone simply ends early.
    pub fn history(&self) -> Result<History<'_>> {
        let tip = self.tip()?;
        let walk = self
            .repo
            .rev_walk([tip])
            .sorting(Sorting::ByCommitTime(CommitTimeOrder::NewestFirst))
            .all()?;

        Ok(History { walk })
    }

    /// Root tree of `commit`.
    pub fn snapshot(&self, commit: ObjectId) -> Result<GitTree<'_>> {
        let tree_id = self.repo.find_commit(commit)?.tree_id()?.detach();
        Ok(GitTree {
            repo: &self.repo,
            id: tree_id,
        })
    }

    pub fn ignore_matcher(&self) -> GitIgnoreMatcher {
        match self.repo.workdir() {
            Some(workdir) => GitIgnoreMatcher::new(workdir),
            None => GitIgnoreMatcher::empty(),
        }
    }
}

pub struct History<'repo> {
    walk: gix::revision::Walk<'repo>,
}

impl Iterator for History<'_> {
    type Item = Result<CommitMeta>;

    fn next(&mut self) -> Option<Self::Item> {
        let info = self.walk.next()?;
        Some(info.map_err(LinelogError::from).and_then(|info| {
            let commit = info.object()?;
            let time = match info.commit_time {
                Some(seconds) => seconds,
                None => commit.time()?.seconds,
            };
            let author_name = commit.author()?.name.to_string();
            Ok(CommitMeta {
                id: info.id,
                time,
                author_name,
            })
        }))
    }
}

pub struct GitTree<'repo> {
    repo: &'repo Repository,
    id: ObjectId,
}

pub struct GitBlob<'repo> {
    repo: &'repo Repository,
    id: ObjectId,
}

impl<'repo> SnapshotTree for GitTree<'repo> {
    type Blob = GitBlob<'repo>;

    fn entries(&self) -> Result<Vec<SnapshotEntry<Self>>> {
        let tree = self.repo.find_tree(self.id)?;
        let decoded = tree.decode()?;

        let mut entries = Vec::with_capacity(decoded.entries.len());
        for entry in &decoded.entries {
            let name = std::str::from_utf8(entry.filename).ok().map(str::to_owned);
            let id = entry.oid.to_owned();
            if entry.mode.is_tree() {
                entries.push(SnapshotEntry::Dir {
                    name,
                    tree: GitTree { repo: self.repo, id },
                });
            } else if entry.mode.is_blob() {
                entries.push(SnapshotEntry::File {
                    name,
                    blob: GitBlob { repo: self.repo, id },
                });
            }
            // symlinks and submodules carry no countable content
        }
        Ok(entries)
    }
}

impl SnapshotBlob for GitBlob<'_> {
    fn data(&self) -> Result<Vec<u8>> {
        Ok(self.repo.find_object(self.id)?.detach().data)
    }
}
