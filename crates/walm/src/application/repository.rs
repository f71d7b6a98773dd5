use async_trait::async_trait;

use super::domain::{Application, ApplicationId};
use crate::error::ObjectDoesNotExist;

/// Equality predicates narrowing a listing query.
///
/// `Default` carries no predicates and matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl ApplicationFilter {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }

    pub fn matches(&self, application: &Application) -> bool {
        self.id
            .as_deref()
            .map_or(true, |id| application.id.as_str() == id)
            && self
                .name
                .as_deref()
                .map_or(true, |name| application.name == name)
    }
}

/// Storage abstraction so the service and router can be exercised in
/// isolation from any particular backing store.
///
/// The read surface is `get` and `list`; `insert` exists only for the
/// external write paths (seeding, tests) that populate the table.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Exactly-one lookup by identifier; a miss is [`RepositoryError::NotFound`].
    async fn get(&self, id: &ApplicationId) -> Result<Application, RepositoryError>;

    /// Every row matching all predicates, ordered by id. An empty result is
    /// not an error.
    async fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError>;

    async fn insert(&self, application: &Application) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    NotFound(#[from] ObjectDoesNotExist),
    #[error("record already exists")]
    Conflict,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    /// Not-found condition naming the missing identifier.
    pub fn missing(id: &ApplicationId) -> Self {
        Self::NotFound(ObjectDoesNotExist::new(format!(
            "Application \"{id}\" does not exist"
        )))
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(value: sqlx::Error) -> Self {
        Self::Unavailable(value.to_string())
    }
}
