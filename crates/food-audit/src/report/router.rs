use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use super::repository::{AuditRepository, ManagerDirectory, NotificationMailer};
use super::service::{AuditReportError, AuditReportService};
use crate::audit::{compute_scores, AuditAnswer, AuditId, ItemCatalog, ScoreCard, SeverityLevel};
use crate::error::AppError;

/// Router builder exposing report, notification, and scoring endpoints.
pub fn audit_router<R, D, M>(service: Arc<AuditReportService<R, D, M>>) -> Router
where
    R: AuditRepository + 'static,
    D: ManagerDirectory + 'static,
    M: NotificationMailer + 'static,
{
    Router::new()
        .route(
            "/api/v1/audits/:audit_id/report",
            get(report_handler::<R, D, M>),
        )
        .route(
            "/api/v1/audits/:audit_id/notifications",
            post(notify_handler::<R, D, M>),
        )
        .route(
            "/api/v1/recipients/resolve",
            post(resolve_handler::<R, D, M>),
        )
        .route("/api/v1/scores", post(score_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResolveRequest {
    pub(crate) store_identifier: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ScoreRequest {
    pub(crate) answers: Vec<AuditAnswer>,
    #[serde(default)]
    pub(crate) catalog: ItemCatalog,
}

#[derive(Debug, Serialize)]
struct ScoreResponse {
    #[serde(flatten)]
    scores: ScoreCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<SeverityLevel>,
}

pub(crate) async fn report_handler<R, D, M>(
    State(service): State<Arc<AuditReportService<R, D, M>>>,
    Path(audit_id): Path<String>,
) -> Result<Response, AppError>
where
    R: AuditRepository + 'static,
    D: ManagerDirectory + 'static,
    M: NotificationMailer + 'static,
{
    let report = service.report(&AuditId(audit_id))?;
    Ok((StatusCode::OK, axum::Json(report.summary())).into_response())
}

pub(crate) async fn notify_handler<R, D, M>(
    State(service): State<Arc<AuditReportService<R, D, M>>>,
    Path(audit_id): Path<String>,
) -> Result<Response, AppError>
where
    R: AuditRepository + 'static,
    D: ManagerDirectory + 'static,
    M: NotificationMailer + 'static,
{
    let summary = service.notify(&AuditId(audit_id))?;
    Ok((StatusCode::ACCEPTED, axum::Json(summary)).into_response())
}

pub(crate) async fn resolve_handler<R, D, M>(
    State(service): State<Arc<AuditReportService<R, D, M>>>,
    axum::Json(request): axum::Json<ResolveRequest>,
) -> Result<Response, AppError>
where
    R: AuditRepository + 'static,
    D: ManagerDirectory + 'static,
    M: NotificationMailer + 'static,
{
    let resolution = service.recipients(&request.store_identifier)?;
    Ok((StatusCode::OK, axum::Json(resolution)).into_response())
}

pub(crate) async fn score_handler(
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Result<Response, AppError> {
    let scores = compute_scores(&request.answers, &request.catalog)
        .map_err(AuditReportError::InvalidData)?;
    let severity = scores.overall_severity();
    Ok((StatusCode::OK, axum::Json(ScoreResponse { scores, severity })).into_response())
}
