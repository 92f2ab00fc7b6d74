mod caps;
mod view;

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::vec::Vec;

use crate::allocator::Allocation;
use crate::catalog::Catalog;
use crate::rng::PackRng;
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// Replays a fixed list of values, wrapping around at the end
struct ScriptedRng {
    values: Vec<u32>,
    pos: usize,
}

impl ScriptedRng {
    fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            pos: 0,
        }
    }
}

impl PackRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}

fn card(id: &str, rarity: Rarity) -> Card {
    Card::new(id, id, rarity, "base").with_elements(&["Fire"])
}

fn cards(prefix: &str, rarity: Rarity, count: usize) -> Vec<Card> {
    (0..count)
        .map(|i| card(&format!("{}-{}", prefix, i), rarity))
        .collect()
}

/// 1 Ultra Rare, 5 Rare, 10 Uncommon, 20 Common
fn standard_catalog() -> Catalog {
    let mut all = cards("ur", Rarity::UltraRare, 1);
    all.extend(cards("r", Rarity::Rare, 5));
    all.extend(cards("u", Rarity::Uncommon, 10));
    all.extend(cards("c", Rarity::Common, 20));
    Catalog::from_cards(all)
}

fn ids<'a>(allocation: &Allocation<'a>) -> Vec<&'a str> {
    allocation.cards().iter().map(|c| c.id.as_str()).collect()
}

fn assert_unique_per_pack(allocation: &Allocation<'_>) {
    for (index, pack) in allocation.packs().enumerate() {
        let unique: BTreeSet<&CardId> = pack.iter().map(|c| &c.id).collect();
        assert_eq!(unique.len(), pack.len(), "pack {} repeats a card", index);
    }
}
