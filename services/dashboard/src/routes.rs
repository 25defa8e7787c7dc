use crate::infra::{AppState, ModelSummary};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use credit_risk::scoring::{assessment_router, CreditRiskService, InferencePipeline};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_dashboard_routes<P>(service: Arc<CreditRiskService<P>>) -> Router
where
    P: InferencePipeline + 'static,
{
    assessment_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/credit/model", get(model_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Which artifact is serving predictions, and since when.
pub(crate) async fn model_endpoint(Extension(state): Extension<AppState>) -> Json<ModelSummary> {
    Json(state.model.as_ref().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{load_service, shipped_artifact_path};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn test_app(ready: bool) -> Router {
        let (service, summary) = load_service(&shipped_artifact_path()).expect("artifact loads");
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            model: Arc::new(summary),
        };
        with_dashboard_routes(service).layer(Extension(state))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let (status, body) = get_json(test_app(false), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        let (status, body) = get_json(test_app(true), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn model_endpoint_describes_loaded_artifact() {
        let (status, body) = get_json(test_app(true), "/api/v1/credit/model").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["feature_count"], 42);
        assert_eq!(body["tree_count"], 3);
        assert_eq!(body["probability_threshold"], 0.54);
        assert!(body["source"]
            .as_str()
            .expect("source path")
            .ends_with("credit_risk_model.json"));
    }

    #[tokio::test]
    async fn assessment_routes_are_mounted() {
        let (status, body) = get_json(test_app(true), "/api/v1/credit/feature-importances?limit=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["features"].as_array().expect("features").len(), 3);
        assert_eq!(body["top_feature"]["feature"], "num__Credit amount");
    }

    #[tokio::test]
    async fn readiness_flag_is_shared_with_state() {
        let flag = Arc::new(AtomicBool::new(false));
        let state = AppState {
            readiness: flag.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            model: Arc::new(
                load_service(&shipped_artifact_path())
                    .expect("artifact loads")
                    .1,
            ),
        };
        flag.store(true, Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
