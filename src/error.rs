use std::path::PathBuf;

use thiserror::Error;

/// A problem with the match state supplied by the caller.
///
/// Always recoverable: the caller re-supplies corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown team `{0}`")]
    UnknownTeam(String),

    #[error("unknown venue `{0}`")]
    UnknownVenue(String),

    #[error("target {0} must be between 0 and 300")]
    TargetOutOfRange(i32),

    #[error("score {0} must not be negative")]
    NegativeScore(i32),

    #[error("overs completed {0} must be between 0 and 20")]
    OversOutOfRange(i32),

    #[error("wickets fallen {0} must be between 0 and 10")]
    WicketsOutOfRange(i32),

    /// Several range checks failed at once.
    #[error("{}", join_all(.0))]
    Multiple(Vec<InputError>),
}

fn join_all(errors: &[InputError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures around the win-probability model.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("failed to read model artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported model format version {found} (expected {expected})")]
    UnsupportedVersion { expected: u32, found: u32 },

    #[error("malformed model artifact: {0}")]
    Malformed(String),

    #[error("feature schema mismatch: model expects {expected:?}, got {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("column `{column}` has the wrong value type for this model")]
    ColumnType { column: String },

    #[error("model returned an invalid distribution (loss={loss}, win={win})")]
    InvalidDistribution { loss: f64, win: f64 },

    #[error("win-probability model unavailable: {0}")]
    Unavailable(String),
}

/// Everything that can stop an evaluation from producing a result.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("There is something wrong with the input, please fill the correct details ({0})")]
    InvalidInput(#[from] InputError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
