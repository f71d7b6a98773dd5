use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::application::domain::{Application, ApplicationId};
use crate::application::repository::{
    ApplicationFilter, ApplicationRepository, RepositoryError,
};
use crate::application::service::ApplicationService;
use crate::application::application_router;

pub(super) fn sample_applications() -> Vec<Application> {
    vec![
        Application::new("app-1", "Demo"),
        Application::new("app-2", "Guestbook"),
        Application::new("app-3", "Demo"),
    ]
}

pub(super) async fn seeded_service() -> (
    Arc<ApplicationService<MemoryRepository>>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(ApplicationService::new(repository.clone()));
    for application in sample_applications() {
        service
            .insert(&application)
            .await
            .expect("seed insert succeeds");
    }
    (service, repository)
}

pub(super) fn empty_service() -> Arc<ApplicationService<MemoryRepository>> {
    Arc::new(ApplicationService::new(Arc::new(
        MemoryRepository::default(),
    )))
}

pub(super) fn unavailable_router() -> axum::Router {
    application_router(Arc::new(ApplicationService::new(Arc::new(
        UnavailableRepository,
    ))))
}

/// Ordered in-memory stand-in for the relational table.
#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<BTreeMap<ApplicationId, Application>>>,
}

#[async_trait]
impl ApplicationRepository for MemoryRepository {
    async fn get(&self, id: &ApplicationId) -> Result<Application, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::missing(id))
    }

    async fn list(&self, filter: &ApplicationFilter) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| filter.matches(application))
            .cloned()
            .collect())
    }

    async fn insert(&self, application: &Application) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(())
    }
}

/// Stub simulating a store outage.
pub(super) struct UnavailableRepository;

#[async_trait]
impl ApplicationRepository for UnavailableRepository {
    async fn get(&self, _id: &ApplicationId) -> Result<Application, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn list(
        &self,
        _filter: &ApplicationFilter,
    ) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn insert(&self, _application: &Application) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
