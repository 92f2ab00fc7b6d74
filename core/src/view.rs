//! View types for UI serialization
//!
//! This module provides view structs for sending an opening to frontends.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::allocator::Allocation;
use crate::request::PackRequest;
use crate::types::{Card, CardId, Rarity};

/// View of a drawn card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: CardId,
    pub name: String,
    pub rarity: Rarity,
    pub elements: Vec<String>,
    pub set: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            rarity: card.rarity,
            elements: card.elements.clone(),
            set: card.set.clone(),
        }
    }
}

/// View of one opened pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackView {
    pub index: u32,
    pub cards: Vec<CardView>,
    /// Slots left empty because every pool in the chain was exhausted
    pub unfilled: u32,
}

/// A whole opening, pack by pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationView {
    pub packs: Vec<PackView>,
    pub total_cards: u32,
    pub slots_per_pack: u32,
}

impl AllocationView {
    pub fn new(allocation: &Allocation<'_>, request: &PackRequest) -> Self {
        let slots_per_pack = request.slots_per_pack().min(u32::MAX as u64) as u32;
        let packs = allocation
            .packs()
            .enumerate()
            .map(|(index, cards)| PackView {
                index: index as u32,
                cards: cards.iter().map(|card| CardView::from(*card)).collect(),
                unfilled: slots_per_pack.saturating_sub(cards.len() as u32),
            })
            .collect();
        Self {
            packs,
            total_cards: allocation.len() as u32,
            slots_per_pack,
        }
    }

    /// Every drawn card, flattened in generation order
    pub fn cards(&self) -> impl Iterator<Item = &CardView> {
        self.packs.iter().flat_map(|pack| pack.cards.iter())
    }
}
