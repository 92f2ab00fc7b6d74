use super::*;
use crate::allocator::allocate;
use crate::caps::RarityCaps;
use crate::request::PackRequest;
use crate::rng::XorShiftRng;
use crate::session::SessionBaseline;
use crate::view::AllocationView;

#[test]
fn test_view_reports_unfilled_slots_per_pack() {
    let catalog = Catalog::from_cards(cards("c", Rarity::Common, 3));
    let request = PackRequest::new(0, 0, 1, 3).with_packs(2);
    let mut rng = XorShiftRng::seed_from_u64(6);
    let allocation = allocate(
        &catalog,
        &RarityCaps::unbounded(),
        &SessionBaseline::new(),
        &request,
        &mut rng,
    );
    let view = AllocationView::new(&allocation, &request);

    assert_eq!(view.slots_per_pack, 4);
    assert_eq!(view.total_cards, 6);
    assert_eq!(view.packs.len(), 2);
    for (index, pack) in view.packs.iter().enumerate() {
        assert_eq!(pack.index, index as u32);
        assert_eq!(pack.cards.len(), 3);
        assert_eq!(pack.unfilled, 1);
    }
    let flat: Vec<&CardId> = view.cards().map(|c| &c.id).collect();
    let expected: Vec<&CardId> = allocation.cards().iter().map(|c| &c.id).collect();
    assert_eq!(flat, expected);
}

#[cfg(feature = "std")]
#[test]
fn test_view_serializes_camel_case() {
    let catalog = standard_catalog();
    let request = PackRequest::new(1, 100, 0, 0);
    let mut rng = XorShiftRng::seed_from_u64(1);
    let allocation = allocate(
        &catalog,
        &RarityCaps::unbounded(),
        &SessionBaseline::new(),
        &request,
        &mut rng,
    );

    let value =
        serde_json::to_value(AllocationView::new(&allocation, &request)).expect("serializes");
    assert_eq!(value["totalCards"], 1);
    assert_eq!(value["slotsPerPack"], 1);
    assert_eq!(value["packs"][0]["cards"][0]["rarity"], "Ultra Rare");
    assert_eq!(value["packs"][0]["cards"][0]["elements"][0], "Fire");
}
