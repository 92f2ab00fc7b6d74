//! Pack request configuration and input coercion

use serde::{Deserialize, Serialize};

use crate::error::{PackError, PackResult};

/// Slot layout and count for one opening
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackRequest {
    /// Slots decided between Ultra Rare and Rare
    pub rare_slots: u32,
    /// Percent chance (0-100) that a rare slot is Ultra Rare
    pub ultra_rate_percent: u32,
    pub uncommon_slots: u32,
    pub common_slots: u32,
    pub pack_count: u32,
}

impl PackRequest {
    pub fn new(
        rare_slots: u32,
        ultra_rate_percent: u32,
        uncommon_slots: u32,
        common_slots: u32,
    ) -> Self {
        Self {
            rare_slots,
            ultra_rate_percent,
            uncommon_slots,
            common_slots,
            pack_count: 1,
        }
    }

    pub fn with_packs(mut self, pack_count: u32) -> Self {
        self.pack_count = pack_count;
        self
    }

    pub fn slots_per_pack(&self) -> u64 {
        self.rare_slots as u64 + self.uncommon_slots as u64 + self.common_slots as u64
    }

    /// Upper bound on the number of cards an opening can produce
    pub fn max_cards(&self) -> u64 {
        self.slots_per_pack().saturating_mul(self.pack_count as u64)
    }

    pub fn validate(&self) -> PackResult<()> {
        if self.pack_count == 0 {
            return Err(PackError::NoPacks);
        }
        if self.ultra_rate_percent > 100 {
            return Err(PackError::InvalidUltraRate {
                rate: self.ultra_rate_percent,
            });
        }
        Ok(())
    }
}

impl Default for PackRequest {
    fn default() -> Self {
        Self::new(1, 10, 3, 6)
    }
}

/// Untyped request as it arrives from a form: any number, possibly
/// negative, fractional or not finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPackRequest {
    pub rare_slots: f64,
    pub ultra_rate_percent: f64,
    pub uncommon_slots: f64,
    pub common_slots: f64,
    pub pack_count: f64,
}

impl RawPackRequest {
    /// Sanitize into a `PackRequest`.
    ///
    /// Counts that are negative or not finite become 0 and fractions are
    /// truncated. The ultra rate is clamped to 0..=100. A pack count that
    /// ends up 0 is still rejected.
    pub fn coerce(&self) -> PackResult<PackRequest> {
        let request = PackRequest {
            rare_slots: coerce_count(self.rare_slots),
            ultra_rate_percent: coerce_count(self.ultra_rate_percent).min(100),
            uncommon_slots: coerce_count(self.uncommon_slots),
            common_slots: coerce_count(self.common_slots),
            pack_count: coerce_count(self.pack_count),
        };
        request.validate()?;
        Ok(request)
    }
}

fn coerce_count(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    // Float to int casts saturate at u32::MAX
    value as u32
}
