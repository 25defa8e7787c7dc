//! Serialized scoring pipeline: a fitted column transformer and a random
//! forest classifier, bundled in one JSON artifact.

mod artifact;
mod forest;
mod transformer;

pub use artifact::{ModelArtifact, ModelLoadError, ARTIFACT_FORMAT_VERSION, DEFAULT_ARTIFACT_PATH};
pub use forest::{DecisionTree, RandomForest, TREE_LEAF};
pub use transformer::{ColumnTransformer, OneHotColumn, ScaledColumn};
