pub mod identity;
pub mod repo;

pub use identity::global_username;
pub use repo::{GitBlob, GitRepo, GitTree, History};
