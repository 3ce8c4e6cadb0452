//! The win-probability model.
//!
//! The model itself is trained elsewhere and treated as a black box behind
//! [`ProbabilityOracle`]. The shipped implementation, [`LogisticOracle`], reads
//! a JSON artifact holding a one-hot logistic regression over the feature
//! columns.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error::OracleError;

use super::features::{FeatureRow, FeatureValue, FEATURE_COLUMNS};

/// Artifact format understood by [`LogisticOracle`].
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Tolerance on `loss + win == 1`.
const DISTRIBUTION_TOLERANCE: f64 = 1e-6;

/// Anything that maps a feature row to `[loss_prob, win_prob]`.
pub trait ProbabilityOracle: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Column identifiers, in order, that `predict_proba` expects.
    fn schema(&self) -> &[String];

    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], OracleError>;
}

/// Serialized form of the logistic model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default = "default_model_name")]
    pub name: String,
    pub columns: Vec<String>,
    pub intercept: f64,
    /// Linear weight per numeric column
    #[serde(default)]
    pub numeric: BTreeMap<String, f64>,
    /// One-hot weight per category value, per categorical column
    #[serde(default)]
    pub categorical: BTreeMap<String, BTreeMap<String, f64>>,
}

fn default_model_name() -> String {
    "logistic".to_string()
}

/// Logistic regression: `win = sigmoid(intercept + Σ contributions)`.
#[derive(Debug, Clone)]
pub struct LogisticOracle {
    artifact: ModelArtifact,
}

impl LogisticOracle {
    /// Read and check an artifact from disk.
    pub fn from_path(path: &Path) -> Result<Self, OracleError> {
        let raw = std::fs::read_to_string(path).map_err(|source| OracleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: ModelArtifact =
            serde_json::from_str(&raw).map_err(|source| OracleError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, OracleError> {
        if artifact.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(OracleError::UnsupportedVersion {
                expected: ARTIFACT_FORMAT_VERSION,
                found: artifact.format_version,
            });
        }

        if artifact.columns.iter().map(String::as_str).ne(FEATURE_COLUMNS) {
            return Err(OracleError::SchemaMismatch {
                expected: artifact.columns.clone(),
                found: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            });
        }

        for column in &artifact.columns {
            let numeric = artifact.numeric.contains_key(column);
            let categorical = artifact.categorical.contains_key(column);
            if numeric == categorical {
                return Err(OracleError::Malformed(format!(
                    "column `{}` needs exactly one numeric or categorical weight table",
                    column
                )));
            }
        }

        if let Some(extra) = artifact
            .numeric
            .keys()
            .chain(artifact.categorical.keys())
            .find(|c| !artifact.columns.contains(*c))
        {
            return Err(OracleError::Malformed(format!(
                "weights given for undeclared column `{}`",
                extra
            )));
        }

        let all_finite = artifact.intercept.is_finite()
            && artifact.numeric.values().all(|w| w.is_finite())
            && artifact
                .categorical
                .values()
                .flat_map(|levels| levels.values())
                .all(|w| w.is_finite());
        if !all_finite {
            return Err(OracleError::Malformed("non-finite weight".to_string()));
        }

        Ok(LogisticOracle { artifact })
    }

    fn contribution(&self, column: &str, value: &FeatureValue) -> Result<f64, OracleError> {
        let wrong_type = || OracleError::ColumnType {
            column: column.to_string(),
        };
        match value {
            FeatureValue::Number(x) => {
                let w = self.artifact.numeric.get(column).ok_or_else(wrong_type)?;
                Ok(w * x)
            }
            FeatureValue::Category(level) => {
                let levels = self
                    .artifact
                    .categorical
                    .get(column)
                    .ok_or_else(wrong_type)?;
                // Unseen levels encode to all zeros
                Ok(levels.get(level).copied().unwrap_or_else(|| {
                    debug!("Unseen value `{}` for column `{}`", level, column);
                    0.0
                }))
            }
        }
    }
}

impl ProbabilityOracle for LogisticOracle {
    fn name(&self) -> &str {
        &self.artifact.name
    }

    fn schema(&self) -> &[String] {
        &self.artifact.columns
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<[f64; 2], OracleError> {
        let mut z = self.artifact.intercept;
        for (column, value) in row.cells() {
            z += self.contribution(column, value)?;
        }
        let win = sigmoid(z);
        Ok([1.0 - win, win])
    }
}

/// Numerically stable logistic function.
fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

/// Win/loss probabilities for the batting side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub win: f64,
    pub loss: f64,
}

/// Check that an oracle response is a proper `[loss, win]` distribution.
pub fn check_distribution([loss, win]: [f64; 2]) -> Result<Prediction, OracleError> {
    let in_unit = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
    if !in_unit(loss) || !in_unit(win) || ((loss + win) - 1.0).abs() > DISTRIBUTION_TOLERANCE {
        return Err(OracleError::InvalidDistribution { loss, win });
    }
    Ok(Prediction { win, loss })
}

/// Load-once, read-only access to the model.
///
/// The first [`get`](OracleHandle::get) loads the artifact; the result, good
/// or bad, is kept for the life of the handle. A failed load is logged once
/// and every later call reports the oracle as unavailable.
pub struct OracleHandle {
    path: PathBuf,
    cell: OnceCell<Result<Arc<dyn ProbabilityOracle>, String>>,
}

impl OracleHandle {
    pub fn from_artifact(path: impl Into<PathBuf>) -> Self {
        OracleHandle {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Wrap an already-built model; the path is never read.
    #[cfg(test)]
    pub fn from_oracle(oracle: Arc<dyn ProbabilityOracle>) -> Self {
        OracleHandle {
            path: PathBuf::new(),
            cell: OnceCell::with_value(Ok(oracle)),
        }
    }

    pub fn get(&self) -> Result<&Arc<dyn ProbabilityOracle>, OracleError> {
        self.cell
            .get_or_init(|| self.load())
            .as_ref()
            .map_err(|reason| OracleError::Unavailable(reason.clone()))
    }

    pub fn is_available(&self) -> bool {
        self.get().is_ok()
    }

    fn load(&self) -> Result<Arc<dyn ProbabilityOracle>, String> {
        let path = &self.path;
        match LogisticOracle::from_path(path) {
            Ok(oracle) => {
                info!(
                    "Loaded win-probability model '{}' from {}",
                    oracle.name(),
                    path.display()
                );
                Ok(Arc::new(oracle))
            }
            Err(e) => {
                error!("Failed to load win-probability model: {}", e);
                Err(e.to_string())
            }
        }
    }
}
