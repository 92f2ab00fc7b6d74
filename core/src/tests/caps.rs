use super::*;
use crate::caps::{FormatCaps, RarityCaps};
use crate::error::PackError;

#[test]
fn test_unbounded_allows_everything() {
    let caps = RarityCaps::unbounded();
    for rarity in Rarity::ALL {
        assert_eq!(caps.cap(rarity), None);
        assert!(caps.allows(rarity, u32::MAX - 1));
        assert_eq!(caps.remaining(rarity, 7), None);
    }
}

#[test]
fn test_cap_is_exclusive_upper_bound() {
    let caps = RarityCaps::unbounded().with_cap(Rarity::Rare, 2);
    assert!(caps.allows(Rarity::Rare, 0));
    assert!(caps.allows(Rarity::Rare, 1));
    assert!(!caps.allows(Rarity::Rare, 2));
    assert!(caps.allows(Rarity::Common, 100));
}

#[test]
fn test_remaining_clamps_at_zero() {
    let caps = RarityCaps::unbounded().with_cap(Rarity::UltraRare, 1);
    assert_eq!(caps.remaining(Rarity::UltraRare, 0), Some(1));
    assert_eq!(caps.remaining(Rarity::UltraRare, 4), Some(0));
}

#[test]
fn test_zero_cap_blocks_tier() {
    let caps = RarityCaps::unbounded().with_cap(Rarity::Uncommon, 0);
    assert!(!caps.allows(Rarity::Uncommon, 0));
}

#[test]
fn test_unknown_format() {
    let formats = FormatCaps::new().with_format("standard", RarityCaps::unbounded());
    assert!(formats.get("standard").is_ok());
    assert_eq!(
        formats.get("draft"),
        Err(PackError::UnknownFormat {
            format: "draft".into()
        })
    );
}

#[cfg(feature = "std")]
#[test]
fn test_format_table_from_json() {
    let json = r#"{
        "standard": { "Ultra Rare": 1, "Rare": 2, "uncommon": 3 },
        "casual": {}
    }"#;
    let formats = FormatCaps::from_json(json).expect("valid table");

    assert_eq!(formats.names().collect::<Vec<_>>(), ["casual", "standard"]);
    let standard = formats.get("standard").expect("standard exists");
    assert_eq!(standard.cap(Rarity::UltraRare), Some(1));
    assert_eq!(standard.cap(Rarity::Rare), Some(2));
    assert_eq!(standard.cap(Rarity::Uncommon), Some(3));
    assert_eq!(standard.cap(Rarity::Common), None);
    assert_eq!(formats.get("casual"), Ok(&RarityCaps::unbounded()));
}

#[cfg(feature = "std")]
#[test]
fn test_format_table_rejects_unknown_rarity() {
    let json = r#"{ "standard": { "Mythic": 1 } }"#;
    assert!(matches!(
        FormatCaps::from_json(json),
        Err(PackError::MalformedData { .. })
    ));
}

#[cfg(feature = "std")]
#[test]
fn test_caps_serialize_by_rarity_name() {
    let caps = RarityCaps::unbounded()
        .with_cap(Rarity::UltraRare, 1)
        .with_cap(Rarity::Common, 4);
    let json = serde_json::to_string(&caps).expect("serializes");
    assert_eq!(json, r#"{"Ultra Rare":1,"Common":4}"#);
}
