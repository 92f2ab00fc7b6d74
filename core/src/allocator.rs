//! Pack allocation
//!
//! Opens packs from a rarity-partitioned catalog. Each pack splits its rare
//! slots between Ultra Rare and Rare with independent percentage rolls, then
//! fills slots in tier order. A slot that finds nothing eligible in its own
//! pool falls through to lower pools, and is left empty once every pool in
//! its chain is exhausted.
//!
//! Eligibility has two parts:
//! - the card is not already in the current pack
//! - baseline copies plus copies drawn earlier in this opening stay under
//!   the cap of the pool being drawn from
//!
//! The allocator never fails. Missing pools, zero slot counts and caps that
//! exclude everything only make the result shorter.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::caps::RarityCaps;
use crate::catalog::Catalog;
use crate::error::PackResult;
use crate::log;
use crate::request::PackRequest;
use crate::rng::PackRng;
use crate::session::SessionBaseline;
use crate::types::{Card, CardId, Rarity};

/// Cards drawn by one opening, in generation order.
///
/// Within a pack the order is Ultra Rare slots, Rare slots, Uncommon slots,
/// then Common slots. Pack boundaries are kept so callers can walk the result
/// pack by pack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation<'a> {
    cards: Vec<&'a Card>,
    pack_ends: Vec<usize>,
    /// Rare slots each pack turned into Ultra Rare slots
    ultra_slots: Vec<u32>,
}

impl<'a> Allocation<'a> {
    /// All drawn cards, flattened
    pub fn cards(&self) -> &[&'a Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pack_count(&self) -> usize {
        self.pack_ends.len()
    }

    /// Cards of each pack, in order. Packs with no filled slot are empty
    /// slices.
    pub fn packs(&self) -> impl Iterator<Item = &[&'a Card]> + '_ {
        let starts = core::iter::once(0).chain(self.pack_ends.iter().copied());
        starts
            .zip(self.pack_ends.iter().copied())
            .map(move |(start, end)| &self.cards[start..end])
    }

    /// Ultra Rare slots rolled per pack, whether or not they were filled
    /// from the Ultra Rare pool
    pub fn ultra_slots(&self) -> &[u32] {
        &self.ultra_slots
    }

    /// How many times a card was drawn across all packs
    pub fn count_of(&self, id: &CardId) -> usize {
        self.cards.iter().filter(|card| &card.id == id).count()
    }

    pub fn into_cards(self) -> Vec<&'a Card> {
        self.cards
    }

    fn push(&mut self, card: &'a Card) {
        self.cards.push(card);
    }

    fn end_pack(&mut self, ultra_slots: u32) {
        self.pack_ends.push(self.cards.len());
        self.ultra_slots.push(ultra_slots);
    }
}

/// Validate the request, then allocate.
///
/// This is the entry point for callers holding user input. `allocate` itself
/// assumes a sanitized request.
pub fn open_packs<'a, R: PackRng>(
    catalog: &'a Catalog,
    caps: &RarityCaps,
    baseline: &SessionBaseline,
    request: &PackRequest,
    rng: &mut R,
) -> PackResult<Allocation<'a>> {
    if let Err(err) = request.validate() {
        log::rejected(&err);
        return Err(err);
    }
    Ok(allocate(catalog, caps, baseline, request, rng))
}

/// Open `request.pack_count` packs.
///
/// Packs are resolved one after another. Copies drawn in earlier packs count
/// toward caps in later ones, while the no-duplicates rule resets per pack.
/// `baseline` is read, never written.
pub fn allocate<'a, R: PackRng>(
    catalog: &'a Catalog,
    caps: &RarityCaps,
    baseline: &SessionBaseline,
    request: &PackRequest,
    rng: &mut R,
) -> Allocation<'a> {
    let mut allocation = Allocation::default();
    let mut draw = Draw {
        catalog,
        caps,
        baseline,
        drawn: BTreeMap::new(),
        in_pack: BTreeSet::new(),
    };

    for pack in 0..request.pack_count {
        draw.in_pack.clear();
        let start = allocation.len();

        let ultra_slots = (0..request.rare_slots)
            .filter(|_| rng.roll_percent() < request.ultra_rate_percent)
            .count() as u32;
        let slots = [
            (Rarity::UltraRare, ultra_slots),
            (Rarity::Rare, request.rare_slots - ultra_slots),
            (Rarity::Uncommon, request.uncommon_slots),
            (Rarity::Common, request.common_slots),
        ];

        let mut unfilled = 0;
        for (slot, count) in slots {
            for _ in 0..count {
                match draw.fill(slot, rng) {
                    Some(card) => allocation.push(card),
                    None => {
                        unfilled += 1;
                        log::slot_unfilled(pack, slot);
                    }
                }
            }
        }

        allocation.end_pack(ultra_slots);
        log::pack_opened(pack, ultra_slots, allocation.len() - start, unfilled);
    }

    log::opening_done(request.pack_count, allocation.len(), request.max_cards());
    allocation
}

/// Draw state shared by every pack of one opening
struct Draw<'a, 'c> {
    catalog: &'a Catalog,
    caps: &'c RarityCaps,
    baseline: &'c SessionBaseline,
    /// Copies drawn so far in this opening
    drawn: BTreeMap<&'a CardId, u32>,
    /// Identifiers already in the current pack
    in_pack: BTreeSet<&'a CardId>,
}

impl<'a, 'c> Draw<'a, 'c> {
    /// Fill one slot, walking its fallback chain
    fn fill<R: PackRng>(&mut self, slot: Rarity, rng: &mut R) -> Option<&'a Card> {
        let catalog = self.catalog;
        for &pool in slot.fallback_chain() {
            let eligible: Vec<&'a Card> = catalog
                .pool(pool)
                .iter()
                .filter(|card| self.is_eligible(card, pool))
                .collect();
            if eligible.is_empty() {
                continue;
            }
            let card = eligible[rng.gen_range(eligible.len())];
            self.record(card);
            return Some(card);
        }
        None
    }

    fn held(&self, id: &CardId) -> u32 {
        let drawn = self.drawn.get(id).copied().unwrap_or(0);
        self.baseline.quantity(id).saturating_add(drawn)
    }

    // The cap is the pool's, which need not match the card's own rarity
    fn is_eligible(&self, card: &Card, pool: Rarity) -> bool {
        !self.in_pack.contains(&card.id) && self.caps.allows(pool, self.held(&card.id))
    }

    fn record(&mut self, card: &'a Card) {
        self.in_pack.insert(&card.id);
        *self.drawn.entry(&card.id).or_insert(0) += 1;
    }
}
