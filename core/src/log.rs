//! Logging utilities
//!
//! Thin wrappers over the `log` facade. Nothing is printed unless the host
//! installs a logger (`console_log` in the browser, `simplelog` in the CLI).

use crate::types::Rarity;

const TARGET: &str = "packsim";

/// Log a finished pack
#[inline]
pub fn pack_opened(pack: u32, ultra_slots: u32, filled: usize, unfilled: usize) {
    log::debug!(
        target: TARGET,
        "pack {}: {} cards, {} ultra slots, {} unfilled",
        pack,
        filled,
        ultra_slots,
        unfilled
    );
}

/// Log a slot whose whole fallback chain was exhausted
#[inline]
pub fn slot_unfilled(pack: u32, slot: Rarity) {
    log::trace!(target: TARGET, "pack {}: no eligible card for {} slot", pack, slot);
}

/// Log a finished opening
#[inline]
pub fn opening_done(packs: u32, cards: usize, max_cards: u64) {
    log::info!(
        target: TARGET,
        "opened {} packs: {} of {} slots filled",
        packs,
        cards,
        max_cards
    );
}

/// Log loaded reference data
#[inline]
pub fn data_loaded(kind: &str, count: usize) {
    log::info!(target: TARGET, "loaded {} {}", count, kind);
}

/// Log a rejected request
#[inline]
pub fn rejected(reason: &dyn core::fmt::Display) {
    log::warn!(target: TARGET, "request rejected: {}", reason);
}
