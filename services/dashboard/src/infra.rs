use chrono::{DateTime, Utc};
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::scoring::{
    CreditRiskService, InferencePipeline, ModelArtifact, DEFAULT_PROBABILITY_THRESHOLD,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) model: Arc<ModelSummary>,
}

/// Facts about the loaded artifact exposed on the model endpoint.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ModelSummary {
    pub(crate) source: PathBuf,
    pub(crate) feature_count: usize,
    pub(crate) tree_count: usize,
    pub(crate) probability_threshold: f64,
    pub(crate) loaded_at: DateTime<Utc>,
}

impl ModelSummary {
    pub(crate) fn describe(artifact: &ModelArtifact) -> Self {
        Self {
            source: artifact.source().to_path_buf(),
            feature_count: artifact.feature_names().len(),
            tree_count: artifact.tree_count(),
            probability_threshold: DEFAULT_PROBABILITY_THRESHOLD,
            loaded_at: Utc::now(),
        }
    }
}

pub(crate) fn apply_model_override(config: &mut AppConfig, model: Option<PathBuf>) {
    if let Some(path) = model {
        config.model.artifact_path = path;
    }
}

/// Loads the artifact and wraps it in the shared scoring service.
/// Any failure here is fatal for the caller.
pub(crate) fn load_service(
    path: &Path,
) -> Result<(Arc<CreditRiskService<ModelArtifact>>, ModelSummary), AppError> {
    let artifact = ModelArtifact::load(path)?;
    let summary = ModelSummary::describe(&artifact);
    let service = CreditRiskService::new(Arc::new(artifact))?;
    Ok((Arc::new(service), summary))
}

#[cfg(test)]
pub(crate) fn shipped_artifact_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../model/credit_risk_model.json")
}
