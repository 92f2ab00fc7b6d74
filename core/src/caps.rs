//! Per-rarity duplicate caps and the format table that selects them

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::error::{PackError, PackResult};
use crate::types::Rarity;

/// Maximum copies of a single card allowed per rarity tier.
///
/// A missing cap means unbounded. Serialized as a map from rarity name to
/// cap, e.g. `{ "Ultra Rare": 1, "Rare": 3 }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Rarity, u32>", into = "BTreeMap<Rarity, u32>")]
pub struct RarityCaps {
    caps: [Option<u32>; 4],
}

impl RarityCaps {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_cap(mut self, rarity: Rarity, cap: u32) -> Self {
        self.set_cap(rarity, Some(cap));
        self
    }

    pub fn set_cap(&mut self, rarity: Rarity, cap: Option<u32>) {
        self.caps[rarity.index()] = cap;
    }

    pub fn cap(&self, rarity: Rarity) -> Option<u32> {
        self.caps[rarity.index()]
    }

    /// Whether one more copy may be drawn when `held` copies already count
    /// against this tier.
    pub fn allows(&self, rarity: Rarity, held: u32) -> bool {
        match self.cap(rarity) {
            Some(cap) => held < cap,
            None => true,
        }
    }

    /// Copies still available under the cap, `None` if unbounded
    pub fn remaining(&self, rarity: Rarity, held: u32) -> Option<u32> {
        self.cap(rarity).map(|cap| cap.saturating_sub(held))
    }
}

impl From<BTreeMap<Rarity, u32>> for RarityCaps {
    fn from(map: BTreeMap<Rarity, u32>) -> Self {
        let mut caps = Self::unbounded();
        for (rarity, cap) in map {
            caps.set_cap(rarity, Some(cap));
        }
        caps
    }
}

impl From<RarityCaps> for BTreeMap<Rarity, u32> {
    fn from(caps: RarityCaps) -> Self {
        Rarity::ALL
            .iter()
            .filter_map(|&rarity| caps.cap(rarity).map(|cap| (rarity, cap)))
            .collect()
    }
}

/// Cap tables keyed by format name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatCaps {
    formats: BTreeMap<String, RarityCaps>,
}

impl FormatCaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, format: &str, caps: RarityCaps) {
        self.formats.insert(format.to_string(), caps);
    }

    pub fn with_format(mut self, format: &str, caps: RarityCaps) -> Self {
        self.insert(format, caps);
        self
    }

    pub fn get(&self, format: &str) -> PackResult<&RarityCaps> {
        self.formats
            .get(format)
            .ok_or_else(|| PackError::UnknownFormat {
                format: format.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// Load `{ "format": { "Ultra Rare": 1, ... }, ... }`
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> PackResult<Self> {
        let formats: Self = serde_json::from_str(json)?;
        crate::log::data_loaded("formats", formats.len());
        Ok(formats)
    }
}
