use std::sync::Arc;

use super::domain::{Application, ApplicationId};
use super::repository::{ApplicationFilter, ApplicationRepository, RepositoryError};

/// Read-facing service in front of the application repository.
pub struct ApplicationService<R> {
    repository: Arc<R>,
}

impl<R> ApplicationService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fetch exactly one application by identifier.
    pub async fn get(&self, id: &ApplicationId) -> Result<Application, ServiceError> {
        Ok(self.repository.get(id).await?)
    }

    /// List every application matching the filter; the empty filter lists
    /// all rows.
    pub async fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, ServiceError> {
        Ok(self.repository.list(filter).await?)
    }

    /// Combined lookup contract: an identifier wins over filter predicates.
    ///
    /// With an identifier this behaves like [`get`] and a miss is an error;
    /// without one it behaves like [`list`] and an empty result is fine.
    ///
    /// [`get`]: ApplicationService::get
    /// [`list`]: ApplicationService::list
    pub async fn lookup(
        &self,
        id: Option<&ApplicationId>,
        filter: &ApplicationFilter,
    ) -> Result<ApplicationLookup, ServiceError> {
        match id {
            Some(id) => Ok(ApplicationLookup::One(self.repository.get(id).await?)),
            None => Ok(ApplicationLookup::Many(self.repository.list(filter).await?)),
        }
    }

    /// Seed path used by the demo CLI and tests; the HTTP surface stays
    /// read-only.
    pub async fn insert(&self, application: &Application) -> Result<(), ServiceError> {
        Ok(self.repository.insert(application).await?)
    }
}

/// Result of the combined lookup contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationLookup {
    One(Application),
    Many(Vec<Application>),
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
