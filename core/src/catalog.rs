//! Card catalog partitioned into rarity pools
//!
//! A card's pool is normally its own rarity, but data files keyed by rarity
//! decide pool membership themselves. The allocator only ever looks at the
//! pool a card sits in.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{PackError, PackResult};
use crate::types::{Card, CardId, Rarity};

/// Cards grouped into the four rarity pools
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pools: [Vec<Card>; 4],
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition cards by their own rarity
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card);
        }
        catalog
    }

    /// Add a card to the pool of its own rarity
    pub fn insert(&mut self, card: Card) {
        let rarity = card.rarity;
        self.insert_into(rarity, card);
    }

    /// Add a card to a specific pool regardless of its rarity
    pub fn insert_into(&mut self, pool: Rarity, card: Card) {
        self.pools[pool.index()].push(card);
    }

    pub fn pool(&self, rarity: Rarity) -> &[Card] {
        &self.pools[rarity.index()]
    }

    pub fn len(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.iter().all(Vec::is_empty)
    }

    /// Iterate every card with the pool it belongs to
    pub fn iter(&self) -> impl Iterator<Item = (Rarity, &Card)> {
        Rarity::ALL
            .into_iter()
            .flat_map(move |rarity| self.pool(rarity).iter().map(move |card| (rarity, card)))
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.iter().map(|(_, card)| card).find(|card| &card.id == id)
    }

    /// Look up a card or fail with `UnknownCard`
    pub fn require(&self, id: &CardId) -> PackResult<&Card> {
        self.get(id).ok_or_else(|| PackError::UnknownCard { id: id.clone() })
    }

    /// Copy of the catalog holding only cards the filter passes.
    /// Pool membership is preserved.
    pub fn filtered(&self, filter: &ElementFilter) -> Catalog {
        let mut catalog = Catalog::new();
        for (pool, card) in self.iter() {
            if filter.matches(card) {
                catalog.insert_into(pool, card.clone());
            }
        }
        catalog
    }

    /// Check element limits and identifier uniqueness across all pools
    pub fn validate(&self) -> PackResult<()> {
        let mut seen = BTreeSet::new();
        for (_, card) in self.iter() {
            card.validate()?;
            if !seen.insert(&card.id) {
                return Err(PackError::DuplicateCard {
                    id: card.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Load a catalog from JSON.
    ///
    /// Accepts either a flat array of cards, partitioned by each card's
    /// rarity, or an object keyed by rarity name whose arrays define the
    /// pools directly. In the keyed form a card's own `rarity` may be omitted.
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> PackResult<Self> {
        let catalog = json::parse(json)?;
        catalog.validate()?;
        crate::log::data_loaded("cards", catalog.len());
        Ok(catalog)
    }
}

#[cfg(feature = "std")]
mod json {
    //! On-disk schema, only used while loading

    use alloc::string::String;
    use alloc::vec::Vec;

    use serde::Deserialize;
    use serde_json::Value;

    use super::Catalog;
    use crate::error::{PackError, PackResult};
    use crate::types::{Card, CardId, Rarity};

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CardRecord {
        id: CardId,
        name: String,
        // Parsed by hand so a bad name reports `UnknownRarity`
        rarity: Option<String>,
        #[serde(default)]
        elements: Vec<String>,
        set: String,
    }

    impl CardRecord {
        fn into_card(self, pool: Option<Rarity>) -> PackResult<Card> {
            let rarity = match (self.rarity.as_deref(), pool) {
                (Some(name), _) => Rarity::from_name(name)?,
                (None, Some(rarity)) => rarity,
                (None, None) => {
                    return Err(PackError::MalformedData {
                        reason: alloc::format!("card '{}' has no rarity", self.id),
                    })
                }
            };
            Ok(Card {
                id: self.id,
                name: self.name,
                rarity,
                elements: self.elements,
                set: self.set,
            })
        }
    }

    /// Build a catalog from either a flat card array or an object of pools
    pub(super) fn parse(json: &str) -> PackResult<Catalog> {
        let value: Value = serde_json::from_str(json)?;
        let mut catalog = Catalog::new();
        match value {
            Value::Array(records) => {
                for record in records {
                    let record: CardRecord = serde_json::from_value(record)?;
                    catalog.insert(record.into_card(None)?);
                }
            }
            Value::Object(pools) => {
                for (name, records) in pools {
                    let pool = Rarity::from_name(&name)?;
                    let records: Vec<CardRecord> = serde_json::from_value(records)?;
                    for record in records {
                        catalog.insert_into(pool, record.into_card(Some(pool))?);
                    }
                }
            }
            _ => {
                return Err(PackError::MalformedData {
                    reason: "catalog must be an array of cards or an object of pools".into(),
                })
            }
        }
        Ok(catalog)
    }
}

/// Element tags a card must share to be offered.
///
/// Built from the partner card. An empty filter passes every card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementFilter {
    elements: BTreeSet<String>,
}

impl ElementFilter {
    /// Filter that passes every card
    pub fn any() -> Self {
        Self::default()
    }

    pub fn from_partner(partner: &Card) -> Self {
        Self::from_elements(partner.elements.iter().cloned())
    }

    pub fn from_elements<I: IntoIterator<Item = String>>(elements: I) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn matches(&self, card: &Card) -> bool {
        self.is_open() || card.elements.iter().any(|e| self.elements.contains(e))
    }
}
