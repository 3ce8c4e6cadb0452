pub mod catalog;
pub mod models;

pub use catalog::Catalog;
pub use models::{MatchInput, MatchState};

use crate::error::InputError;

impl MatchInput {
    /// Resolve the raw form payload against the catalog.
    ///
    /// Surrounding whitespace is trimmed from names before the exact,
    /// case-sensitive catalog lookup.
    ///
    /// Only team and venue names are checked here. Numeric ranges are left
    /// to the classifier, which must see concluded matches before any range
    /// check runs.
    pub fn into_state(self, catalog: &Catalog) -> Result<MatchState, InputError> {
        let batting_team = self.batting_team.trim().to_string();
        let bowling_team = self.bowling_team.trim().to_string();
        let venue = self.city.trim().to_string();

        if !catalog.is_team(&batting_team) {
            return Err(InputError::UnknownTeam(batting_team));
        }
        if !catalog.is_team(&bowling_team) {
            return Err(InputError::UnknownTeam(bowling_team));
        }
        if !catalog.is_city(&venue) {
            return Err(InputError::UnknownVenue(venue));
        }

        Ok(MatchState {
            batting_team,
            bowling_team,
            venue,
            target: self.target,
            score: self.score,
            overs_completed: self.overs,
            wickets_fallen: self.wickets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(batting: &str, bowling: &str, city: &str) -> MatchInput {
        MatchInput {
            batting_team: batting.into(),
            bowling_team: bowling.into(),
            city: city.into(),
            target: 150,
            score: 100,
            overs: 12,
            wickets: 3,
        }
    }

    #[test]
    fn resolves_known_names() {
        let state = input("Mumbai Indians", "Chennai Super Kings", "Mumbai")
            .into_state(&Catalog::default())
            .unwrap();
        assert_eq!(state.batting_team, "Mumbai Indians");
        assert_eq!(state.venue, "Mumbai");
        assert_eq!(state.overs_completed, 12);
        assert_eq!(state.wickets_fallen, 3);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let state = input(" Mumbai Indians", "Chennai Super Kings\n", " Pune ")
            .into_state(&Catalog::default())
            .unwrap();
        assert_eq!(state.bowling_team, "Chennai Super Kings");
        assert_eq!(state.venue, "Pune");
    }

    #[test]
    fn names_are_case_sensitive_after_trimming() {
        let err = input(" mumbai indians ", "Chennai Super Kings", "Mumbai")
            .into_state(&Catalog::default())
            .unwrap_err();
        assert_eq!(err, InputError::UnknownTeam("mumbai indians".into()));
    }

    #[test]
    fn unknown_team_is_rejected() {
        let err = input("Mumbai Indians", "Gujarat Titans", "Mumbai")
            .into_state(&Catalog::default())
            .unwrap_err();
        assert_eq!(err, InputError::UnknownTeam("Gujarat Titans".into()));
    }

    #[test]
    fn unknown_venue_is_rejected() {
        let err = input("Mumbai Indians", "Delhi Capitals", "Lucknow")
            .into_state(&Catalog::default())
            .unwrap_err();
        assert_eq!(err, InputError::UnknownVenue("Lucknow".into()));
    }

    #[test]
    fn out_of_range_numbers_pass_through_unchecked() {
        let mut raw = input("Mumbai Indians", "Delhi Capitals", "Delhi");
        raw.target = 400;
        raw.wickets = -2;
        let state = raw.into_state(&Catalog::default()).unwrap();
        assert_eq!(state.target, 400);
        assert_eq!(state.wickets_fallen, -2);
    }
}
