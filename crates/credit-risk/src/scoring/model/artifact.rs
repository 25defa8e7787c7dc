use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info};

use super::forest::RandomForest;
use super::transformer::ColumnTransformer;
use crate::scoring::domain::ApplicantRecord;
use crate::scoring::pipeline::{InferencePipeline, PredictionError};

/// Relative path the dashboard loads the artifact from unless configured otherwise.
pub const DEFAULT_ARTIFACT_PATH: &str = "model/credit_risk_model.json";

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model artifact not found at {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("unable to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model artifact {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("model artifact {} has format version {found}, expected {expected}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("model artifact {} is inconsistent: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Debug, Deserialize)]
struct ArtifactFile {
    format_version: u32,
    steps: PipelineSteps,
}

/// The two named pipeline stages.
#[derive(Debug, Deserialize)]
struct PipelineSteps {
    transformer: ColumnTransformer,
    model: RandomForest,
}

/// Loaded, validated pipeline. Immutable after `load`.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    source: PathBuf,
    transformer: ColumnTransformer,
    classifier: RandomForest,
    feature_names: Vec<String>,
}

impl ModelArtifact {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading credit risk model artifact");

        let result = File::open(path)
            .map_err(|source| match source.kind() {
                std::io::ErrorKind::NotFound => ModelLoadError::NotFound {
                    path: path.to_path_buf(),
                },
                _ => ModelLoadError::Io {
                    path: path.to_path_buf(),
                    source,
                },
            })
            .and_then(|file| Self::from_reader(BufReader::new(file), path));

        if let Err(err) = &result {
            error!(error = %err, "model artifact failed to load");
        }
        result
    }

    /// Parses an artifact from any reader; `origin` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, ModelLoadError> {
        let file: ArtifactFile =
            serde_json::from_reader(reader).map_err(|source| ModelLoadError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;

        if file.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ModelLoadError::UnsupportedVersion {
                path: origin.to_path_buf(),
                found: file.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        Self::from_parts(file.steps.transformer, file.steps.model, origin)
    }

    pub fn from_parts(
        transformer: ColumnTransformer,
        classifier: RandomForest,
        origin: &Path,
    ) -> Result<Self, ModelLoadError> {
        let invalid = |reason: String| ModelLoadError::Invalid {
            path: origin.to_path_buf(),
            reason,
        };

        transformer
            .validate()
            .map_err(|reason| invalid(format!("transformer: {reason}")))?;
        classifier
            .validate()
            .map_err(|reason| invalid(format!("model: {reason}")))?;

        let width = transformer.output_width();
        if classifier.n_features != width {
            return Err(invalid(format!(
                "transformer emits {width} features but the model expects {}",
                classifier.n_features
            )));
        }

        let feature_names = transformer.feature_names_out();
        info!(
            path = %origin.display(),
            features = feature_names.len(),
            trees = classifier.trees.len(),
            "model artifact ready"
        );

        Ok(Self {
            source: origin.to_path_buf(),
            transformer,
            classifier,
            feature_names,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn tree_count(&self) -> usize {
        self.classifier.trees.len()
    }
}

impl InferencePipeline for ModelArtifact {
    fn transform(&self, record: &ApplicantRecord) -> Result<Vec<f64>, PredictionError> {
        self.transformer.transform(record)
    }

    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictionError> {
        self.classifier.predict_probability(features)
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn feature_importances(&self) -> &[f64] {
        &self.classifier.feature_importances
    }
}
