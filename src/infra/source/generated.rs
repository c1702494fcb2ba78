use crate::domain::entities::user::{generate_users, User};
use crate::usecase::ports::source::{SourceError, UserSource};

pub const DEFAULT_GENERATED_USERS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedUsers {
    pub count: usize,
}

impl UserSource for GeneratedUsers {
    fn describe(&self) -> String {
        format!("{} generated users", self.count)
    }

    fn load_users(&self) -> Result<Vec<User>, SourceError> {
        Ok(generate_users(self.count))
    }
}
