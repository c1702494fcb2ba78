use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::user::{User, UserId};
use crate::usecase::ports::source::{SourceError, UserSource};

/// Reads users from a csv with an `id,name,email,role,status,joinDate` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvUserSource {
    pub path: PathBuf,
}

impl CsvUserSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Deserialize)]
struct CsvUserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
    status: String,
    #[serde(rename = "joinDate", alias = "join_date")]
    join_date: String,
}

impl CsvUserRow {
    fn into_user(self, line: u64) -> Result<User, SourceError> {
        let invalid = |message: String| SourceError::InvalidRecord { line, message };
        let join_date = DateTime::parse_from_rfc3339(self.join_date.trim())
            .map(|date| date.with_timezone(&Utc))
            .map_err(|err| invalid(format!("bad joinDate {:?}: {err}", self.join_date)))?;
        Ok(User {
            id: UserId(self.id),
            name: self.name,
            email: self.email,
            role: self.role.parse().map_err(invalid)?,
            status: self.status.parse().map_err(invalid)?,
            join_date,
        })
    }
}

impl UserSource for CsvUserSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_users(&self) -> Result<Vec<User>, SourceError> {
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|source| SourceError::Open {
                path: self.path.clone(),
                source,
            })?;

        let read_error = |line: u64, source: csv::Error| SourceError::Read {
            path: self.path.clone(),
            line,
            source,
        };
        let headers = reader.headers().map_err(|err| read_error(1, err))?.clone();

        let mut users = Vec::new();
        let mut seen = HashSet::new();
        for result in reader.records() {
            let record = result.map_err(|err| {
                let line = err.position().map(|pos| pos.line()).unwrap_or(0);
                read_error(line, err)
            })?;
            let line = record.position().map(|pos| pos.line()).unwrap_or(0);
            let row: CsvUserRow = record
                .deserialize(Some(&headers))
                .map_err(|err| read_error(line, err))?;
            let user = row.into_user(line)?;
            if !seen.insert(user.id) {
                return Err(SourceError::DuplicateId { id: user.id, line });
            }
            users.push(user);
        }

        tracing::debug!(path = %self.path.display(), rows = users.len(), "parsed csv users");
        Ok(users)
    }
}
