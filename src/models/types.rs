use crate::error::InventoryError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Location label used when a record does not say where it is stored
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Sentinel for "no location filter"
pub const ALL_LOCATIONS: &str = "ALL";

/// Sentinel for "no quality filter"
pub const ALL_QUALITIES: &str = "All";

/// Stable identity of an item across stacks, characters and locations.
///
/// A catalog id always wins over the display name, so two stacks with the same id group
/// together even when their names drifted (localization, renames). Names and ids live in
/// different variants and can never collide, even for numeric-looking names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Identity {
    ById(u64),
    ByName(String),
}

impl Identity {
    /// Picks the identity for a record. An id of 0 counts as "no id".
    pub fn resolve(id: Option<u64>, name: &str) -> Self {
        match id {
            Some(id) if id != 0 => Identity::ById(id),
            _ => Identity::ByName(name.to_string()),
        }
    }

    /// String key as used by the dashboards (`id-123` / `name-Linen Cloth`)
    pub fn key(&self) -> String {
        match self {
            Identity::ById(id) => format!("id-{id}"),
            Identity::ByName(name) => format!("name-{name}"),
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Quality {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Common, Quality::Uncommon, Quality::Rare, Quality::Epic];

    /// Strict, case-insensitive tier lookup
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|q| q.name().eq_ignore_ascii_case(s))
    }

    /// Lenient lookup for raw records: anything unrecognized is Common
    pub fn normalize(s: Option<&str>) -> Self {
        s.and_then(Self::parse).unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Quality::Common => "Common",
            Quality::Uncommon => "Uncommon",
            Quality::Rare => "Rare",
            Quality::Epic => "Epic",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QualityFilter {
    #[default]
    All,
    Only(Quality),
}

impl FromStr for QualityFilter {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_QUALITIES {
            return Ok(QualityFilter::All);
        }
        Quality::parse(s)
            .map(QualityFilter::Only)
            .ok_or_else(|| InventoryError::InvalidQuality(s.to_string()))
    }
}

/// Storage location filter.
///
/// Tags are stored normalized: lowercase, underscores turned into spaces, so `REAGENT_BANK`
/// becomes `reagent bank`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LocationFilter {
    #[default]
    All,
    Tag(String),
}

impl LocationFilter {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == ALL_LOCATIONS {
            return LocationFilter::All;
        }
        LocationFilter::Tag(s.replace('_', " ").to_lowercase())
    }
}

impl From<&str> for LocationFilter {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
