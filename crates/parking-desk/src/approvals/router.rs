use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RegistrationId, RegistrationRequest, RegistrationStatus};
use super::repository::{ApprovalConfirmation, NotificationLog, RegistrationStore};
use super::service::{ApprovalError, ParkingDeskService};

/// Router builder exposing the approval desk endpoints consumed by the
/// operator console.
pub fn approvals_router<S, N>(service: Arc<ParkingDeskService<S, N>>) -> Router
where
    S: RegistrationStore + 'static,
    N: NotificationLog + 'static,
{
    Router::new()
        .route(
            "/api/v1/parking/registrations",
            post(register_handler::<S, N>).get(list_handler::<S, N>),
        )
        .route(
            "/api/v1/parking/registrations/:registration_id/status",
            post(status_handler::<S, N>),
        )
        .route(
            "/api/v1/parking/notifications",
            get(feed_handler::<S, N>),
        )
        .route("/api/v1/parking/summary", get(summary_handler::<S, N>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    pub(crate) status: RegistrationStatus,
}

pub(crate) async fn register_handler<S, N>(
    State(service): State<Arc<ParkingDeskService<S, N>>>,
    axum::Json(request): axum::Json<RegistrationRequest>,
) -> Response
where
    S: RegistrationStore + 'static,
    N: NotificationLog + 'static,
{
    match service.register(request) {
        Ok(registration) => {
            let confirmation = ApprovalConfirmation::from(&registration);
            (StatusCode::CREATED, axum::Json(confirmation)).into_response()
        }
        Err(ApprovalError::Rejected(rejection)) => {
            let payload = json!({
                "error": rejection.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<S, N>(
    State(service): State<Arc<ParkingDeskService<S, N>>>,
    Path(registration_id): Path<String>,
    axum::Json(request): axum::Json<StatusUpdateRequest>,
) -> Response
where
    S: RegistrationStore + 'static,
    N: NotificationLog + 'static,
{
    let id = RegistrationId(registration_id);
    match service.update_status(&id, request.status) {
        // Unknown ids fall through here too: the update is a documented no-op.
        Ok(()) => {
            let payload = json!({
                "registration_id": id.0,
                "status": request.status.label(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error @ ApprovalError::InvalidTransition { .. }) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<S, N>(
    State(service): State<Arc<ParkingDeskService<S, N>>>,
) -> Response
where
    S: RegistrationStore + 'static,
    N: NotificationLog + 'static,
{
    match service.registrations() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn feed_handler<S, N>(
    State(service): State<Arc<ParkingDeskService<S, N>>>,
) -> Response
where
    S: RegistrationStore + 'static,
    N: NotificationLog + 'static,
{
    match service.notifications() {
        Ok(feed) => (StatusCode::OK, axum::Json(feed)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn summary_handler<S, N>(
    State(service): State<Arc<ParkingDeskService<S, N>>>,
) -> Response
where
    S: RegistrationStore + 'static,
    N: NotificationLog + 'static,
{
    match service.summary() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: ApprovalError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
