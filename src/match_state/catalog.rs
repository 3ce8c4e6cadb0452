/// Franchises the model was trained on.
pub const TEAMS: [&str; 8] = [
    "Sunrisers Hyderabad",
    "Mumbai Indians",
    "Royal Challengers Bangalore",
    "Kolkata Knight Riders",
    "Kings XI Punjab",
    "Chennai Super Kings",
    "Rajasthan Royals",
    "Delhi Capitals",
];

/// Host cities seen in the training data.
pub const CITIES: [&str; 29] = [
    "Hyderabad",
    "Bangalore",
    "Mumbai",
    "Indore",
    "Kolkata",
    "Delhi",
    "Chandigarh",
    "Jaipur",
    "Chennai",
    "Cape Town",
    "Port Elizabeth",
    "Durban",
    "Centurion",
    "East London",
    "Johannesburg",
    "Kimberley",
    "Bloemfontein",
    "Ahmedabad",
    "Cuttack",
    "Nagpur",
    "Dharamsala",
    "Visakhapatnam",
    "Pune",
    "Raipur",
    "Ranchi",
    "Abu Dhabi",
    "Sharjah",
    "Mohali",
    "Bengaluru",
];

/// The enumerated team and venue choices offered by every input surface,
/// sorted alphabetically.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Catalog {
    teams: Vec<String>,
    cities: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::new(&TEAMS, &CITIES)
    }
}

impl Catalog {
    pub fn new(teams: &[&str], cities: &[&str]) -> Self {
        let mut teams: Vec<String> = teams.iter().map(|t| t.to_string()).collect();
        let mut cities: Vec<String> = cities.iter().map(|c| c.to_string()).collect();
        teams.sort();
        teams.dedup();
        cities.sort();
        cities.dedup();
        Catalog { teams, cities }
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Exact, case-sensitive membership.
    pub fn is_team(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t == name)
    }

    pub fn is_city(&self, name: &str) -> bool {
        self.cities.iter().any(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_sorted_and_complete() {
        let c = Catalog::default();
        assert_eq!(c.teams().len(), TEAMS.len());
        assert_eq!(c.cities().len(), CITIES.len());
        assert!(c.teams().windows(2).all(|w| w[0] < w[1]));
        assert!(c.cities().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(c.teams()[0], "Chennai Super Kings");
    }

    #[test]
    fn team_set_has_at_least_two_members() {
        assert!(Catalog::default().teams().len() >= 2);
    }

    #[test]
    fn membership_is_exact() {
        // Trimming is the collector's job; the catalog compares verbatim
        let c = Catalog::default();
        assert!(c.is_team("Mumbai Indians"));
        assert!(!c.is_team("mumbai indians"));
        assert!(!c.is_team("Mumbai Indians "));
        assert!(c.is_city("Abu Dhabi"));
        assert!(!c.is_city("Lord's"));
    }
}
