//! Drop statistics over many independent openings

use std::collections::BTreeMap;

use packsim_core::{Allocation, PackRequest, Rarity};
use serde::Serialize;

/// Running totals, merged across worker threads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialTotals {
    pub trials: u64,
    pub by_rarity: [u64; 4],
    /// Rare slots that rolled Ultra Rare, filled or not
    pub ultra_slots: u64,
    pub filled: u64,
    pub slots: u64,
    /// Trials where every slot was filled
    pub complete: u64,
}

impl TrialTotals {
    pub fn record(&mut self, allocation: &Allocation<'_>, request: &PackRequest) {
        self.trials += 1;
        for card in allocation.cards() {
            self.by_rarity[card.rarity.index()] += 1;
        }
        self.ultra_slots += allocation.ultra_slots().iter().map(|&n| n as u64).sum::<u64>();
        let filled = allocation.len() as u64;
        let slots = request.max_cards();
        self.filled += filled;
        self.slots += slots;
        if filled == slots {
            self.complete += 1;
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        for (mine, theirs) in self.by_rarity.iter_mut().zip(other.by_rarity) {
            *mine += theirs;
        }
        self.ultra_slots += other.ultra_slots;
        self.filled += other.filled;
        self.slots += other.slots;
        self.complete += other.complete;
        self
    }

    pub fn report(&self) -> Report {
        let per_trial = |value: u64| {
            if self.trials == 0 {
                0.0
            } else {
                value as f64 / self.trials as f64
            }
        };
        Report {
            trials: self.trials,
            average_per_opening: Rarity::ALL
                .into_iter()
                .map(|rarity| (rarity, per_trial(self.by_rarity[rarity.index()])))
                .collect(),
            average_ultra_slots: per_trial(self.ultra_slots),
            fill_rate: if self.slots == 0 {
                1.0
            } else {
                self.filled as f64 / self.slots as f64
            },
            complete_openings: per_trial(self.complete),
        }
    }
}

/// Averages ready for printing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub trials: u64,
    /// Cards of each rarity per opening
    pub average_per_opening: BTreeMap<Rarity, f64>,
    /// Ultra Rare slots rolled per opening
    pub average_ultra_slots: f64,
    /// Share of slots that received a card
    pub fill_rate: f64,
    /// Share of openings with no empty slot
    pub complete_openings: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsim_core::{allocate, Card, Catalog, RarityCaps, SessionBaseline, XorShiftRng};

    fn catalog() -> Catalog {
        Catalog::from_cards(vec![
            Card::new("r", "R", Rarity::Rare, "s"),
            Card::new("c1", "C1", Rarity::Common, "s"),
            Card::new("c2", "C2", Rarity::Common, "s"),
        ])
    }

    #[test]
    fn test_record_and_merge() {
        let catalog = catalog();
        let request = PackRequest::new(1, 0, 0, 3);
        let baseline = SessionBaseline::new();
        let caps = RarityCaps::unbounded();

        let mut a = TrialTotals::default();
        let mut b = TrialTotals::default();
        for seed in 0..4_u64 {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let allocation = allocate(&catalog, &caps, &baseline, &request, &mut rng);
            if seed % 2 == 0 {
                a.record(&allocation, &request);
            } else {
                b.record(&allocation, &request);
            }
        }
        let totals = a.merge(b);

        // Every opening: the rare, both commons, one empty common slot
        assert_eq!(totals.trials, 4);
        assert_eq!(totals.by_rarity, [0, 4, 0, 8]);
        assert_eq!(totals.ultra_slots, 0);
        assert_eq!(totals.filled, 12);
        assert_eq!(totals.slots, 16);
        assert_eq!(totals.complete, 0);

        let report = totals.report();
        assert_eq!(report.average_per_opening[&Rarity::Common], 2.0);
        assert_eq!(report.fill_rate, 0.75);
        assert_eq!(report.complete_openings, 0.0);
    }

    #[test]
    fn test_ultra_slots_counted_even_when_they_fall_back() {
        // No Ultra Rare pool, so every ultra slot is filled from Rare
        let catalog = catalog();
        let request = PackRequest::new(1, 100, 0, 0).with_packs(2);
        let baseline = SessionBaseline::new();
        let caps = RarityCaps::unbounded();

        let mut totals = TrialTotals::default();
        for seed in 0..3_u64 {
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let allocation = allocate(&catalog, &caps, &baseline, &request, &mut rng);
            totals.record(&allocation, &request);
        }

        assert_eq!(totals.ultra_slots, 6);
        assert_eq!(totals.by_rarity[Rarity::UltraRare.index()], 0);
        let report = totals.report();
        assert_eq!(report.average_ultra_slots, 2.0);
        assert_eq!(report.average_per_opening[&Rarity::Rare], 2.0);
    }

    #[test]
    fn test_empty_report() {
        let report = TrialTotals::default().report();
        assert_eq!(report.trials, 0);
        assert_eq!(report.fill_rate, 1.0);
        assert_eq!(report.average_ultra_slots, 0.0);
        assert!(report.average_per_opening.values().all(|v| *v == 0.0));
    }
}
