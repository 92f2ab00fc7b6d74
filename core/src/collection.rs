//! Caller-owned running collection
//!
//! The allocator never writes here. After an opening the caller merges the
//! pulls, and before the next opening derives a `SessionBaseline` from it.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::allocator::Allocation;
use crate::error::{PackError, PackResult};
use crate::session::SessionBaseline;
use crate::types::{Card, CardId};

/// Quantity and set of one collected card
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
pub struct CollectionEntry {
    pub quantity: u32,
    pub set: String,
}

/// A named collection of held cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode, TypeInfo)]
pub struct Collection {
    pub name: String,
    entries: BTreeMap<CardId, CollectionEntry>,
}

impl Collection {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, id: &CardId, set: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let entry = self
            .entries
            .entry(id.clone())
            .or_insert_with(|| CollectionEntry {
                quantity: 0,
                set: set.to_string(),
            });
        entry.quantity = entry.quantity.saturating_add(quantity);
    }

    pub fn add_card(&mut self, card: &Card) {
        self.add(&card.id, &card.set, 1);
    }

    /// Add one copy of every card drawn
    pub fn merge(&mut self, allocation: &Allocation<'_>) {
        self.merge_cards(allocation.cards().iter().copied());
    }

    pub fn merge_cards<'c, I: IntoIterator<Item = &'c Card>>(&mut self, cards: I) {
        for card in cards {
            self.add_card(card);
        }
    }

    pub fn quantity(&self, id: &CardId) -> u32 {
        self.entries.get(id).map(|e| e.quantity).unwrap_or(0)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&CardId, &CollectionEntry)> {
        self.entries.iter()
    }

    /// Number of distinct cards
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total copies across all cards
    pub fn total(&self) -> u64 {
        self.entries.values().map(|e| e.quantity as u64).sum()
    }

    pub fn baseline(&self) -> SessionBaseline {
        self.entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.quantity))
            .collect()
    }

    /// Export in the `{ name, cards: [{ id, quantity, set }] }` shape,
    /// sorted by identifier
    pub fn export(&self) -> CollectionExport {
        CollectionExport {
            name: self.name.clone(),
            cards: self
                .entries
                .iter()
                .map(|(id, entry)| ExportedCard {
                    id: id.clone(),
                    quantity: entry.quantity,
                    set: entry.set.clone(),
                })
                .collect(),
        }
    }

    /// Rebuild from an export. Duplicate identifiers are summed and zero
    /// quantities dropped.
    pub fn import(export: CollectionExport) -> Self {
        let mut collection = Self::new(&export.name);
        for card in export.cards {
            collection.add(&card.id, &card.set, card.quantity);
        }
        collection
    }

    /// Compact SCALE-encoded snapshot for local storage
    pub fn to_snapshot(&self) -> Vec<u8> {
        self.encode()
    }

    pub fn from_snapshot(bytes: &[u8]) -> PackResult<Self> {
        Self::decode(&mut &bytes[..]).map_err(|_| PackError::MalformedData {
            reason: "collection snapshot".to_string(),
        })
    }
}

/// Persisted collection shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionExport {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<ExportedCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedCard {
    pub id: CardId,
    pub quantity: u32,
    pub set: String,
}

#[cfg(feature = "std")]
impl CollectionExport {
    pub fn from_json(json: &str) -> PackResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> PackResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
