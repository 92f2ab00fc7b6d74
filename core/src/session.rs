//! Read-only baseline of cards already held when packs are opened

use alloc::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::CardId;

/// Quantities already held per card.
///
/// Counts toward cap checks. The allocator only reads it; merging new pulls
/// is the caller's job (see `Collection`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionBaseline {
    held: BTreeMap<CardId, u32>,
}

impl SessionBaseline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, quantity: u32) -> Self {
        self.set(CardId::from(id), quantity);
        self
    }

    pub fn set(&mut self, id: CardId, quantity: u32) {
        if quantity == 0 {
            self.held.remove(&id);
        } else {
            self.held.insert(id, quantity);
        }
    }

    pub fn quantity(&self, id: &CardId) -> u32 {
        self.held.get(id).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl FromIterator<(CardId, u32)> for SessionBaseline {
    fn from_iter<I: IntoIterator<Item = (CardId, u32)>>(iter: I) -> Self {
        let mut baseline = Self::new();
        for (id, quantity) in iter {
            let total = baseline.quantity(&id).saturating_add(quantity);
            baseline.set(id, total);
        }
        baseline
    }
}
