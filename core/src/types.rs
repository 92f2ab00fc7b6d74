use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PackError, PackResult};

/// Maximum number of element tags on a single card
pub const MAX_ELEMENTS: usize = 3;

/// Unique identifier for cards
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Encode,
    Decode,
    TypeInfo,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rarity tiers, ordered from highest to lowest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo)]
pub enum Rarity {
    UltraRare,
    Rare,
    Uncommon,
    Common,
}

static TIERS: [Rarity; 4] = Rarity::ALL;

impl Rarity {
    /// All tiers in priority order
    pub const ALL: [Rarity; 4] = [
        Rarity::UltraRare,
        Rarity::Rare,
        Rarity::Uncommon,
        Rarity::Common,
    ];

    pub fn index(self) -> usize {
        match self {
            Rarity::UltraRare => 0,
            Rarity::Rare => 1,
            Rarity::Uncommon => 2,
            Rarity::Common => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::UltraRare => "Ultra Rare",
            Rarity::Rare => "Rare",
            Rarity::Uncommon => "Uncommon",
            Rarity::Common => "Common",
        }
    }

    /// Parse a rarity name. Case, spaces, dashes and underscores are ignored,
    /// so "Ultra Rare", "ultra_rare" and "UltraRare" all match.
    pub fn from_name(name: &str) -> PackResult<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "ultrarare" => Ok(Rarity::UltraRare),
            "rare" => Ok(Rarity::Rare),
            "uncommon" => Ok(Rarity::Uncommon),
            "common" => Ok(Rarity::Common),
            _ => Err(PackError::UnknownRarity {
                name: name.to_string(),
            }),
        }
    }

    /// Pools a slot of this rarity tries, in order.
    ///
    /// A slot never falls back to a higher tier, so the chain is this tier
    /// followed by every lower one.
    pub fn fallback_chain(self) -> &'static [Rarity] {
        &TIERS[self.index()..]
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rarity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rarity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Rarity::from_name(&name).map_err(serde::de::Error::custom)
    }
}

/// A card in the catalog. Reference data, never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub elements: Vec<String>,
    pub set: String,
}

impl Card {
    pub fn new(id: &str, name: &str, rarity: Rarity, set: &str) -> Self {
        Self {
            id: CardId::from(id),
            name: name.to_string(),
            rarity,
            elements: Vec::new(),
            set: set.to_string(),
        }
    }

    pub fn with_elements(mut self, elements: &[&str]) -> Self {
        self.elements = elements.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn has_element(&self, element: &str) -> bool {
        self.elements.iter().any(|e| e == element)
    }

    /// Check the element tag limit
    pub fn validate(&self) -> PackResult<()> {
        if self.elements.len() > MAX_ELEMENTS {
            return Err(PackError::TooManyElements {
                id: self.id.clone(),
                count: self.elements.len(),
            });
        }
        Ok(())
    }
}
