use super::normalize;
use crate::types::ParseOutcome;
use crate::QuadratError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Continent {
    Africa,
    Antarctica,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Continent {
    pub const ALL: [Continent; 7] = [
        Continent::Africa,
        Continent::Antarctica,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::Oceania,
        Continent::SouthAmerica,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Antarctica => "Antarctica",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::Oceania => "Oceania",
            Continent::SouthAmerica => "South America",
        }
    }

    /// Two-letter code as used by several gazetteers
    pub fn code(&self) -> &'static str {
        match self {
            Continent::Africa => "AF",
            Continent::Antarctica => "AN",
            Continent::Asia => "AS",
            Continent::Europe => "EU",
            Continent::NorthAmerica => "NA",
            Continent::Oceania => "OC",
            Continent::SouthAmerica => "SA",
        }
    }

    /// Titles and codes are definite; looser variants are probable
    pub fn parse(text: &str) -> ParseOutcome<Continent> {
        let key = normalize(text);
        if key.is_empty() {
            return ParseOutcome::fail();
        }
        if let Some(c) = Continent::ALL
            .iter()
            .find(|c| normalize(c.title()) == key || normalize(c.code()) == key)
        {
            return ParseOutcome::success(*c);
        }
        let variant = match key.as_str() {
            "afrika" | "afrique" => Some(Continent::Africa),
            "antarctic" | "antartica" | "antarctique" => Some(Continent::Antarctica),
            "asien" | "asie" => Some(Continent::Asia),
            "europa" | "eurasia" => Some(Continent::Europe),
            "northernamerica" | "centralamerica" | "nordamerika" | "caribbean" => {
                Some(Continent::NorthAmerica)
            }
            "australia" | "australasia" | "oceanie" | "pacific" => Some(Continent::Oceania),
            "southernamerica" | "sudamerica" | "sydamerika" | "latinamerica" => {
                Some(Continent::SouthAmerica)
            }
            _ => None,
        };
        match variant {
            Some(c) => ParseOutcome::probable(c),
            None => ParseOutcome::fail(),
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Continent {
    type Err = QuadratError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Continent::parse(s)
            .into_payload()
            .ok_or_else(|| QuadratError::Parse(format!("Unknown continent: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Confidence;

    #[test]
    fn test_parse_titles_and_codes() {
        assert_eq!(Continent::parse("North America").payload(), Some(&Continent::NorthAmerica));
        assert_eq!(Continent::parse("NORTH_AMERICA").payload(), Some(&Continent::NorthAmerica));
        assert_eq!(Continent::parse("eu").payload(), Some(&Continent::Europe));
        assert_eq!(Continent::parse("Europe").confidence(), Some(Confidence::Definite));
    }

    #[test]
    fn test_parse_variants() {
        let outcome = Continent::parse("Europa");
        assert_eq!(outcome.payload(), Some(&Continent::Europe));
        assert_eq!(outcome.confidence(), Some(Confidence::Probable));
        assert_eq!(Continent::parse("Australia").payload(), Some(&Continent::Oceania));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(!Continent::parse("Atlantis").is_success());
        assert!(!Continent::parse("").is_success());
    }

    #[test]
    fn test_serde_name() {
        assert_eq!(
            serde_json::to_string(&Continent::SouthAmerica).unwrap(),
            "\"SOUTH_AMERICA\""
        );
    }
}
