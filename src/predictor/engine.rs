use serde::Serialize;
use tracing::{debug, info};

use crate::error::{OracleError, PredictError};
use crate::match_state::MatchState;

use super::classifier::{classify, validate_ranges, Outcome};
use super::features::{derive_features, FeatureVector};
use super::oracle::{check_distribution, OracleHandle, Prediction};
use super::presenter::{render_outcome, render_prediction, Rendered};

/// Result of running one match state through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Evaluation {
    /// Decided without consulting the model.
    Concluded { outcome: Outcome, rendered: Rendered },
    /// In progress; the model was asked.
    Predicted {
        features: FeatureVector,
        prediction: Prediction,
        rendered: Rendered,
    },
}

impl Evaluation {
    pub fn rendered(&self) -> &Rendered {
        match self {
            Evaluation::Concluded { rendered, .. } | Evaluation::Predicted { rendered, .. } => {
                rendered
            }
        }
    }
}

/// Classify, validate, derive features and, for an in-progress match, ask the
/// model.
///
/// Concluded matches and identical-team selections never reach the model.
pub fn evaluate(state: &MatchState, oracle: &OracleHandle) -> Result<Evaluation, PredictError> {
    let outcome = classify(state);
    if let Some(rendered) = render_outcome(outcome, state) {
        debug!("Match state classified as {:?}", outcome);
        return Ok(Evaluation::Concluded { outcome, rendered });
    }

    validate_ranges(state)?;
    let features = derive_features(state);
    let row = features.to_row();

    let oracle = oracle.get()?;
    let expected = oracle.schema();
    if row.columns().into_iter().ne(expected.iter().map(String::as_str)) {
        return Err(OracleError::SchemaMismatch {
            expected: expected.to_vec(),
            found: row.columns().iter().map(|c| c.to_string()).collect(),
        }
        .into());
    }

    let prediction = check_distribution(oracle.predict_proba(&row)?)?;
    info!(
        "{} vs {} at {}: need {} off {} with {} wickets in hand -> win {:.3}",
        state.batting_team,
        state.bowling_team,
        state.venue,
        features.runs_left,
        features.balls_left,
        features.wickets_left,
        prediction.win
    );

    let rendered = render_prediction(state, prediction);
    Ok(Evaluation::Predicted {
        features,
        prediction,
        rendered,
    })
}
