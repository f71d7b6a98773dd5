//! The `application` resource: entity, repository contract, backing store,
//! and the HTTP router exposing the read surface.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use domain::{Application, ApplicationId, ApplicationView};
pub use repository::{ApplicationFilter, ApplicationRepository, RepositoryError};
pub use router::application_router;
pub use service::{ApplicationLookup, ApplicationService, ServiceError};
pub use sqlite::SqliteApplicationRepository;
