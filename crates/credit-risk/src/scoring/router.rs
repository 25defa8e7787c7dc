use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::dashboard::{DashboardView, ImportanceSummary};
use super::form::applicant_form;
use super::importance::TOP_FEATURE_COUNT;
use super::intake::SubmissionPayload;
use super::pipeline::InferencePipeline;
use super::service::CreditRiskService;
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub struct ImportanceQuery {
    pub limit: Option<usize>,
}

/// Router builder exposing the assessment, importance and form endpoints.
pub fn assessment_router<P>(service: Arc<CreditRiskService<P>>) -> Router
where
    P: InferencePipeline + 'static,
{
    Router::new()
        .route("/api/v1/credit/assessments", post(assess_handler::<P>))
        .route(
            "/api/v1/credit/feature-importances",
            get(importances_handler::<P>),
        )
        .route("/api/v1/credit/form", get(form_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler<P>(
    State(service): State<Arc<CreditRiskService<P>>>,
    payload: Result<Json<SubmissionPayload>, JsonRejection>,
) -> Result<Json<DashboardView>, AppError>
where
    P: InferencePipeline + 'static,
{
    let Json(payload) = payload?;
    let assessment = service.assess_payload(payload)?;
    Ok(Json(DashboardView::build(
        &assessment,
        service.feature_importances(),
    )))
}

pub(crate) async fn importances_handler<P>(
    State(service): State<Arc<CreditRiskService<P>>>,
    Query(query): Query<ImportanceQuery>,
) -> Response
where
    P: InferencePipeline + 'static,
{
    let limit = query.limit.unwrap_or(TOP_FEATURE_COUNT);
    let summary = ImportanceSummary::from_ranking(service.feature_importances(), limit);
    (StatusCode::OK, Json(summary)).into_response()
}

pub(crate) async fn form_handler() -> Response {
    (StatusCode::OK, Json(json!({ "fields": applicant_form() }))).into_response()
}
