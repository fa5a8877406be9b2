//! Record - a single character fetched from the upstream catalog.
//!
//! Records are consumed, never owned: they are decoded from the upstream
//! payload and treated as immutable values. Field names follow the
//! upstream's hyphenated JSON keys. Everything except `id` and `name`
//! defaults when absent, so partial payloads still decode.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub powerstats: PowerStats,
    #[serde(default)]
    pub biography: Biography,
    #[serde(default)]
    pub appearance: Appearance,
    #[serde(default)]
    pub work: Option<Work>,
    #[serde(default)]
    pub connections: Option<Connections>,
    #[serde(default)]
    pub image: Image,
}

impl Record {
    /// Minimal record with only identity set. Mostly useful for fixtures.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            powerstats: PowerStats::default(),
            biography: Biography::default(),
            appearance: Appearance::default(),
            work: None,
            connections: None,
            image: Image::default(),
        }
    }

    /// Builder-style setter for a single power statistic.
    pub fn with_stat(mut self, key: StatKey, value: impl Into<String>) -> Self {
        *self.powerstats.get_mut(key) = value.into();
        self
    }

    /// Raw string value of a power statistic.
    pub fn stat(&self, key: StatKey) -> &str {
        self.powerstats.get(key)
    }
}

/// The six power statistics. Upstream sends them as strings, and
/// `"null"` is a common value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerStats {
    pub intelligence: String,
    pub strength: String,
    pub speed: String,
    pub durability: String,
    pub power: String,
    pub combat: String,
}

impl PowerStats {
    pub fn get(&self, key: StatKey) -> &str {
        match key {
            StatKey::Intelligence => &self.intelligence,
            StatKey::Strength => &self.strength,
            StatKey::Speed => &self.speed,
            StatKey::Durability => &self.durability,
            StatKey::Power => &self.power,
            StatKey::Combat => &self.combat,
        }
    }

    fn get_mut(&mut self, key: StatKey) -> &mut String {
        match key {
            StatKey::Intelligence => &mut self.intelligence,
            StatKey::Strength => &mut self.strength,
            StatKey::Speed => &mut self.speed,
            StatKey::Durability => &mut self.durability,
            StatKey::Power => &mut self.power,
            StatKey::Combat => &mut self.combat,
        }
    }
}

/// Names one of the six power statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Intelligence,
    Strength,
    Speed,
    Durability,
    Power,
    Combat,
}

impl StatKey {
    pub const ALL: [StatKey; 6] = [
        StatKey::Intelligence,
        StatKey::Strength,
        StatKey::Speed,
        StatKey::Durability,
        StatKey::Power,
        StatKey::Combat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Intelligence => "intelligence",
            StatKey::Strength => "strength",
            StatKey::Speed => "speed",
            StatKey::Durability => "durability",
            StatKey::Power => "power",
            StatKey::Combat => "combat",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Biography {
    #[serde(rename = "full-name")]
    pub full_name: String,
    #[serde(rename = "alter-egos")]
    pub alter_egos: String,
    pub aliases: Vec<String>,
    #[serde(rename = "place-of-birth")]
    pub place_of_birth: String,
    #[serde(rename = "first-appearance")]
    pub first_appearance: String,
    pub publisher: String,
    pub alignment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub gender: String,
    pub race: String,
    pub height: Vec<String>,
    pub weight: Vec<String>,
    #[serde(rename = "eye-color")]
    pub eye_color: String,
    #[serde(rename = "hair-color")]
    pub hair_color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Work {
    pub occupation: String,
    pub base: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connections {
    #[serde(rename = "group-affiliation")]
    pub group_affiliation: String,
    pub relatives: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
}
