use super::protocol::{
    AckResponse, DanglingResponse, ENDPOINT_ANNOUNCE, ENDPOINT_CFG, ENDPOINT_DANGLING,
    ENDPOINT_OFFLINE, ENDPOINT_REGISTER, ENDPOINT_STATUS, ENDPOINT_VERSION, StatusResponse,
    VersionResponse,
};
use super::service::ControllerService;
use crate::error::CtlrError;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use std::sync::Arc;

/// HTTP ingress for the controller.
pub fn router(service: Arc<ControllerService>) -> Router {
    Router::new()
        .route(ENDPOINT_ANNOUNCE, post(handle_announce))
        .route(ENDPOINT_REGISTER, post(handle_register))
        .route(ENDPOINT_CFG, post(handle_cfg))
        .route(ENDPOINT_VERSION, post(handle_version))
        .route(ENDPOINT_OFFLINE, post(handle_offline))
        .route(ENDPOINT_STATUS, get(handle_status))
        .route(ENDPOINT_DANGLING, get(handle_dangling))
        .layer(Extension(service))
}

fn status_for(err: &CtlrError) -> StatusCode {
    if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn ack(result: Result<(), CtlrError>) -> (StatusCode, Json<AckResponse>) {
    match result {
        Ok(()) => (StatusCode::OK, Json(AckResponse::ok())),
        Err(e) => {
            if !e.is_validation() {
                tracing::error!("Request failed: {}", e);
            }
            (status_for(&e), Json(AckResponse::rejected(e)))
        }
    }
}

pub async fn handle_announce(
    Extension(service): Extension<Arc<ControllerService>>,
    body: String,
) -> (StatusCode, Json<AckResponse>) {
    ack(service.handle_announce(&body).await)
}

pub async fn handle_register(
    Extension(service): Extension<Arc<ControllerService>>,
    body: String,
) -> (StatusCode, Json<AckResponse>) {
    ack(service.handle_register(&body).await)
}

pub async fn handle_cfg(
    Extension(service): Extension<Arc<ControllerService>>,
    body: String,
) -> (StatusCode, Json<AckResponse>) {
    ack(service.handle_cfg(&body).await)
}

pub async fn handle_offline(
    Extension(service): Extension<Arc<ControllerService>>,
    body: String,
) -> (StatusCode, Json<AckResponse>) {
    ack(service.handle_offline(&body).await)
}

pub async fn handle_version(
    Extension(service): Extension<Arc<ControllerService>>,
    body: String,
) -> (StatusCode, Json<VersionResponse>) {
    match service.handle_version(&body).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(VersionResponse {
                reply: Some(reply),
                error: None,
            }),
        ),
        Err(e) => (
            status_for(&e),
            Json(VersionResponse {
                reply: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}

pub async fn handle_status(
    Extension(service): Extension<Arc<ControllerService>>,
) -> (StatusCode, Json<StatusResponse>) {
    (StatusCode::OK, Json(service.status().await))
}

pub async fn handle_dangling(
    Extension(service): Extension<Arc<ControllerService>>,
) -> (StatusCode, Json<DanglingResponse>) {
    let links = service.dangling().await;
    (StatusCode::OK, Json(DanglingResponse { links }))
}
