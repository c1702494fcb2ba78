use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::usecase::ports::source::{SourceError, UserSource};

pub struct QueryService {
    source: Arc<dyn UserSource>,
}

impl QueryService {
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        Self { source }
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }

    pub fn load_users(&self) -> Result<Arc<[User]>, SourceError> {
        let users = self.source.load_users()?;
        tracing::info!(
            source = %self.source.describe(),
            count = users.len(),
            "loaded user records"
        );
        Ok(users.into())
    }
}
