//! Person in the family graph.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque person identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PersonId {
    fn from(raw: u64) -> Self {
        PersonId(raw)
    }
}

/// Gender as recorded by the editor. Drives kinship term selection.
///
/// Serializes as a lowercase name. Deserializing goes through [`FromStr`],
/// so `"Male"`, `"F"`, `"unknown"` or `null` never fail a whole record.
///
/// [`FromStr`]: std::str::FromStr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    /// Member ordering inside a family unit: male, female, other.
    pub(crate) fn unit_rank(self) -> u8 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
            Gender::Other => 2,
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = std::convert::Infallible;

    /// Lenient parse: anything unrecognised is `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Other,
        })
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
    }
}

/// Alive or deceased, with an optional date of death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LifeStatus {
    #[default]
    Alive,
    Deceased {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        died_on: Option<NaiveDate>,
    },
}

/// A member of the family graph.
///
/// The id is immutable; every other field belongs to the external editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub life: LifeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub born_on: Option<NaiveDate>,
    /// Display-only fields (nickname, village, photo key, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Person {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: PersonId(id),
            name: name.into(),
            gender: Gender::Other,
            life: LifeStatus::Alive,
            born_on: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn male(id: u64, name: impl Into<String>) -> Self {
        Self::new(id, name).with_gender(Gender::Male)
    }

    pub fn female(id: u64, name: impl Into<String>) -> Self {
        Self::new(id, name).with_gender(Gender::Female)
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn born(mut self, date: NaiveDate) -> Self {
        self.born_on = Some(date);
        self
    }

    pub fn deceased(mut self, died_on: Option<NaiveDate>) -> Self {
        self.life = LifeStatus::Deceased { died_on };
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.life, LifeStatus::Alive)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
