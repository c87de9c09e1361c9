// Domain types shared by every layer.
// Kind partitions all data; Breed is the snapshot handed to consumers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PawError;

/// Which catalog a breed belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Cat,
    Dog,
}

impl Kind {
    pub const ALL: [Kind; 2] = [Kind::Cat, Kind::Dog];

    /// Value stored in the `kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Cat => "cat",
            Kind::Dog => "dog",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Kind::Cat => "Cats",
            Kind::Dog => "Dogs",
        }
    }

    /// Stable slot for per-kind arrays.
    pub fn index(&self) -> usize {
        match self {
            Kind::Cat => 0,
            Kind::Dog => 1,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = PawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cat" => Ok(Kind::Cat),
            "dog" => Ok(Kind::Dog),
            other => Err(PawError::Other(format!("Unknown pet kind: {}", other))),
        }
    }
}

/// A catalogued breed as seen by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breed {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub temperament: String,
    pub description: String,
    pub life_span: String,
    pub image_url: Option<String>,
    /// Additional images beyond the primary one.
    pub images: Vec<String>,
    pub is_favorite: bool,
    pub kind: Kind,
    /// When the refresh that wrote this row committed.
    pub synced_at: DateTime<Utc>,
}

impl Breed {
    /// Temperament split into trimmed traits.
    pub fn traits(&self) -> Vec<&str> {
        self.temperament
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in Kind::ALL {
            assert_eq!(kind.as_str().parse::<Kind>().unwrap(), kind);
        }
        assert_eq!(" DOG ".parse::<Kind>().unwrap(), Kind::Dog);
        assert!("hamster".parse::<Kind>().is_err());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Kind::Cat).unwrap(), "\"cat\"");
        let kind: Kind = serde_json::from_str("\"dog\"").unwrap();
        assert_eq!(kind, Kind::Dog);
    }

    #[test]
    fn test_traits() {
        let breed = Breed {
            id: "beng".to_string(),
            name: "Bengal".to_string(),
            origin: "United States".to_string(),
            temperament: "Alert, Agile,  Energetic,".to_string(),
            description: String::new(),
            life_span: "12 - 15".to_string(),
            image_url: None,
            images: Vec::new(),
            is_favorite: false,
            kind: Kind::Cat,
            synced_at: Utc::now(),
        };
        assert_eq!(breed.traits(), vec!["Alert", "Agile", "Energetic"]);
    }
}
