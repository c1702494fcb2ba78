use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::user::{User, UserId};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open csv {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to read csv {} at line {line}: {source}", path.display())]
    Read {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("invalid record at line {line}: {message}")]
    InvalidRecord { line: u64, message: String },
    #[error("duplicate user id {id} at line {line}")]
    DuplicateId { id: UserId, line: u64 },
}

/// Where a session's record set comes from.
pub trait UserSource: Send + Sync {
    fn describe(&self) -> String;

    fn load_users(&self) -> Result<Vec<User>, SourceError>;
}
