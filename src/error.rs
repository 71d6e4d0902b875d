use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinelogError>;

#[derive(Error, Debug)]
pub enum LinelogError {
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Repository has no commits: {}", .0.display())]
    RepositoryState(PathBuf),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Not a directory: {}", .0.display())]
    Path(PathBuf),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("History walk error: {0}")]
    Walk(#[from] Box<gix::revision::walk::Error>),
    #[error("History walk error: {0}")]
    WalkStep(#[from] Box<gix::revision::walk::iter::Error>),
}

impl LinelogError {
    /// True for errors that only mean "this repository has nothing to report".
    pub fn is_repository_state(&self) -> bool {
        matches!(self, LinelogError::RepositoryState(_))
    }
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::open::Error> for LinelogError {
    fn from(err: gix::open::Error) -> Self {
        LinelogError::Git(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for LinelogError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        LinelogError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for LinelogError {
    fn from(err: gix::object::commit::Error) -> Self {
        LinelogError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for LinelogError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        LinelogError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for LinelogError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        LinelogError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for LinelogError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        LinelogError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for LinelogError {
    fn from(err: gix::objs::decode::Error) -> Self {
        LinelogError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::revision::walk::Error> for LinelogError {
    fn from(err: gix::revision::walk::Error) -> Self {
        LinelogError::Walk(Box::new(err))
    }
}

impl From<gix::revision::walk::iter::Error> for LinelogError {
    fn from(err: gix::revision::walk::iter::Error) -> Self {
        LinelogError::WalkStep(Box::new(err))
    }
}
