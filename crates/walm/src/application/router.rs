use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::{Application, ApplicationId};
use super::repository::{ApplicationFilter, ApplicationRepository, RepositoryError};
use super::service::{ApplicationService, ServiceError};

/// Router builder exposing the application read surface under `/api/v1`.
///
/// Both the collection listing and the single-entity fetch are wired; the
/// caller picks which to route to.
pub fn application_router<R>(service: Arc<ApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route("/api/v1/application", get(list_handler::<R>))
        .route("/api/v1/application/", get(list_handler::<R>))
        .route(
            "/api/v1/application/:application_id",
            get(get_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    match service.list(&ApplicationFilter::default()).await {
        Ok(applications) => {
            let views: Vec<_> = applications.iter().map(Application::view).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: ApplicationRepository + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id).await {
        Ok(application) => (StatusCode::OK, axum::Json(application.view())).into_response(),
        Err(ServiceError::Repository(RepositoryError::NotFound(missing))) => {
            let payload = json!({ "error": missing.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => store_failure(error),
    }
}

fn store_failure(error: ServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
