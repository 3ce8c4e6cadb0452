use serde::Serialize;

use crate::match_state::MatchState;

use super::classifier::{MAX_OVERS, MAX_WICKETS};

const BALLS_PER_OVER: i32 = 6;
const INNINGS_BALLS: i32 = MAX_OVERS * BALLS_PER_OVER;

/// Column identifiers, in order, that the win-probability model is trained on.
pub const FEATURE_COLUMNS: [&str; 9] = [
    "batting_team",
    "bowling_team",
    "city",
    "runs_left",
    "balls_left",
    "wickets",
    "total_runs_x",
    "cur_run_rate",
    "req_run_rate",
];

/// Model inputs derived from an in-progress match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub batting_team: String,
    pub bowling_team: String,
    pub city: String,
    pub runs_left: i32,
    pub balls_left: i32,
    pub wickets_left: i32,
    pub target: i32,
    pub current_run_rate: f64,
    pub required_run_rate: f64,
}

/// One cell of a feature row. Categorical values stay raw strings; encoding
/// is the model's business.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Category(String),
    Number(f64),
}

/// Named feature values in model column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    cells: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    pub fn new(cells: Vec<(String, FeatureValue)>) -> Self {
        FeatureRow { cells }
    }

    pub fn columns(&self) -> Vec<&str> {
        self.cells.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn cells(&self) -> &[(String, FeatureValue)] {
        &self.cells
    }
}

/// Derive model features from the match state.
///
/// Only meaningful for a classified, range-checked, in-progress state: with
/// `overs_completed <= 20` the balls left can never go negative. Both run
/// rates are 0 where their divisor is 0.
pub fn derive_features(state: &MatchState) -> FeatureVector {
    let runs_left = state.target - state.score;
    let balls_left = INNINGS_BALLS - state.overs_completed * BALLS_PER_OVER;
    let wickets_left = MAX_WICKETS - state.wickets_fallen;

    let current_run_rate = if state.overs_completed > 0 {
        state.score as f64 / state.overs_completed as f64
    } else {
        0.0
    };
    let required_run_rate = if balls_left > 0 {
        (runs_left * BALLS_PER_OVER) as f64 / balls_left as f64
    } else {
        0.0
    };

    FeatureVector {
        batting_team: state.batting_team.clone(),
        bowling_team: state.bowling_team.clone(),
        city: state.venue.clone(),
        runs_left,
        balls_left,
        wickets_left,
        target: state.target,
        current_run_rate,
        required_run_rate,
    }
}

impl FeatureVector {
    /// Lay the features out in [`FEATURE_COLUMNS`] order.
    pub fn to_row(&self) -> FeatureRow {
        let values = [
            FeatureValue::Category(self.batting_team.clone()),
            FeatureValue::Category(self.bowling_team.clone()),
            FeatureValue::Category(self.city.clone()),
            FeatureValue::Number(self.runs_left as f64),
            FeatureValue::Number(self.balls_left as f64),
            FeatureValue::Number(self.wickets_left as f64),
            FeatureValue::Number(self.target as f64),
            FeatureValue::Number(self.current_run_rate),
            FeatureValue::Number(self.required_run_rate),
        ];
        FeatureRow::new(
            FEATURE_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .zip(values)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_state(target: i32, score: i32, overs: i32, wickets: i32) -> MatchState {
        MatchState {
            batting_team: "Mumbai Indians".into(),
            bowling_team: "Chennai Super Kings".into(),
            venue: "Mumbai".into(),
            target,
            score,
            overs_completed: overs,
            wickets_fallen: wickets,
        }
    }

    #[test]
    fn mid_innings_chase() {
        let f = derive_features(&make_state(150, 100, 12, 3));
        assert_eq!(f.runs_left, 50);
        assert_eq!(f.balls_left, 48);
        assert_eq!(f.wickets_left, 7);
        assert_eq!(f.target, 150);
        assert_relative_eq!(f.current_run_rate, 100.0 / 12.0, epsilon = 1e-9);
        assert_relative_eq!(f.current_run_rate, 8.33, epsilon = 0.005);
        assert_relative_eq!(f.required_run_rate, 6.25, epsilon = 1e-9);
    }

    #[test]
    fn no_overs_bowled_gives_zero_current_rate() {
        let f = derive_features(&make_state(160, 0, 0, 0));
        assert_eq!(f.balls_left, 120);
        assert_relative_eq!(f.current_run_rate, 0.0);
        assert_relative_eq!(f.required_run_rate, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn all_overs_bowled_gives_zero_required_rate() {
        let f = derive_features(&make_state(150, 120, 20, 4));
        assert_eq!(f.balls_left, 0);
        assert_relative_eq!(f.required_run_rate, 0.0);
        assert_relative_eq!(f.current_run_rate, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn derivation_is_deterministic() {
        let s = make_state(181, 77, 9, 2);
        assert_eq!(derive_features(&s), derive_features(&s));
    }

    #[test]
    fn row_follows_model_column_order() {
        let row = derive_features(&make_state(150, 100, 12, 3)).to_row();
        assert_eq!(row.columns(), FEATURE_COLUMNS.to_vec());
        let value = |name: &str| {
            row.cells()
                .iter()
                .find(|(column, _)| column == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(value("city"), Some(FeatureValue::Category("Mumbai".into())));
        assert_eq!(value("wickets"), Some(FeatureValue::Number(7.0)));
        assert_eq!(value("total_runs_x"), Some(FeatureValue::Number(150.0)));
        assert_eq!(value("missing"), None);
    }
}
