//! Pack simulator exposed to the browser
//!
//! Holds everything the "open pack" form needs between clicks: the catalog,
//! the format cap tables, the chosen partner, the running collection and the
//! last opening. Every opening is a fresh call into the core allocator with
//! the collection as its baseline; pulls only reach the collection when the
//! user keeps them.

use packsim_core::{
    open_packs, AllocationView, Card, CardId, Catalog, Collection, CollectionExport,
    ElementFilter, FormatCaps, PackError, PackResult, RawPackRequest, XorShiftRng,
};
use wasm_bindgen::prelude::*;

const DEFAULT_COLLECTION: &str = "My Collection";

/// The pack simulator exposed to WASM
#[wasm_bindgen]
pub struct PackSimulator {
    catalog: Option<Catalog>,
    formats: FormatCaps,
    partner: Option<CardId>,
    collection: Collection,
    // Cards of the last opening, not yet kept
    last_opening: Vec<Card>,
    rng: XorShiftRng,
}

#[wasm_bindgen]
impl PackSimulator {
    /// Create a simulator. Without a seed one is drawn from the browser.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(random_seed);
        log::info!("pack simulator initialized (seed {})", seed);
        Self {
            catalog: None,
            formats: FormatCaps::new(),
            partner: None,
            collection: Collection::new(DEFAULT_COLLECTION),
            last_opening: Vec::new(),
            rng: XorShiftRng::seed_from_u64(seed),
        }
    }

    /// Load the card catalog from JSON
    #[wasm_bindgen]
    pub fn load_catalog(&mut self, json: &str) -> Result<(), String> {
        let catalog =
            Catalog::from_json(json).map_err(|e| format!("Failed to load catalog: {}", e))?;
        self.catalog = Some(catalog);
        self.partner = None;
        Ok(())
    }

    /// Load the format cap tables from JSON
    #[wasm_bindgen]
    pub fn load_formats(&mut self, json: &str) -> Result<(), String> {
        self.formats =
            FormatCaps::from_json(json).map_err(|e| format!("Failed to load formats: {}", e))?;
        Ok(())
    }

    /// Format names for the format picker
    #[wasm_bindgen]
    pub fn get_format_names(&self) -> Vec<String> {
        self.formats.names().map(String::from).collect()
    }

    /// Select the partner card whose elements filter the packs, or clear it
    #[wasm_bindgen]
    pub fn set_partner(&mut self, card_id: Option<String>) -> Result<(), String> {
        self.select_partner(card_id.map(CardId::new))
            .map_err(|e| format!("Failed to set partner: {}", e))
    }

    /// Open packs for a format. `request_js` is the raw form state.
    #[wasm_bindgen]
    pub fn open_packs(
        &mut self,
        format: Option<String>,
        request_js: JsValue,
    ) -> Result<JsValue, String> {
        let raw: RawPackRequest = serde_wasm_bindgen::from_value(request_js)
            .map_err(|e| format!("Failed to parse request: {:?}", e))?;
        let view = self
            .open(format.as_deref(), &raw)
            .map_err(|e| format!("Cannot open packs: {}", e))?;
        serde_wasm_bindgen::to_value(&view)
            .map_err(|e| format!("Failed to serialize opening: {:?}", e))
    }

    /// Merge the last opening into the collection. Returns the cards added.
    #[wasm_bindgen]
    pub fn keep_last_opening(&mut self) -> u32 {
        let kept = self.last_opening.len() as u32;
        self.collection.merge_cards(self.last_opening.iter());
        self.last_opening.clear();
        log::debug!("kept {} cards, collection holds {}", kept, self.collection.total());
        kept
    }

    /// Drop the last opening without keeping it
    #[wasm_bindgen]
    pub fn discard_last_opening(&mut self) {
        self.last_opening.clear();
    }

    /// Export the collection as `{ name, cards: [{ id, quantity, set }] }`
    #[wasm_bindgen]
    pub fn export_collection(&self, name: Option<String>) -> JsValue {
        let mut export = self.collection.export();
        if let Some(name) = name {
            export.name = name;
        }
        match serde_wasm_bindgen::to_value(&export) {
            Ok(val) => val,
            Err(e) => {
                log::error!("export_collection serialization failed: {:?}", e);
                JsValue::NULL
            }
        }
    }

    /// Replace the collection with an imported one
    #[wasm_bindgen]
    pub fn import_collection(&mut self, export_js: JsValue) -> Result<(), String> {
        let export: CollectionExport = serde_wasm_bindgen::from_value(export_js)
            .map_err(|e| format!("Failed to parse collection: {:?}", e))?;
        self.collection = Collection::import(export);
        Ok(())
    }

    /// Collection as SCALE bytes for local storage
    #[wasm_bindgen]
    pub fn get_collection_snapshot(&self) -> Vec<u8> {
        self.collection.to_snapshot()
    }

    #[wasm_bindgen]
    pub fn restore_collection_snapshot(&mut self, bytes: &[u8]) -> Result<(), String> {
        self.collection = Collection::from_snapshot(bytes)
            .map_err(|e| format!("Failed to restore collection: {}", e))?;
        Ok(())
    }

    #[wasm_bindgen]
    pub fn collection_size(&self) -> u32 {
        self.collection.total().min(u32::MAX as u64) as u32
    }
}

impl PackSimulator {
    fn select_partner(&mut self, card_id: Option<CardId>) -> PackResult<()> {
        if let Some(id) = &card_id {
            let catalog = self.catalog.as_ref().ok_or(PackError::MissingCatalog)?;
            catalog.require(id)?;
        }
        self.partner = card_id;
        Ok(())
    }

    fn element_filter(&self, catalog: &Catalog) -> ElementFilter {
        self.partner
            .as_ref()
            .and_then(|id| catalog.get(id))
            .map(ElementFilter::from_partner)
            .unwrap_or_default()
    }

    /// Open packs against the current collection.
    ///
    /// A missing catalog or format is a precondition failure and never reaches
    /// the allocator.
    pub fn open(
        &mut self,
        format: Option<&str>,
        raw: &RawPackRequest,
    ) -> PackResult<AllocationView> {
        let catalog = self.catalog.as_ref().ok_or(PackError::MissingCatalog)?;
        let format = format.ok_or_else(|| PackError::UnknownFormat {
            format: String::new(),
        })?;
        let caps = self.formats.get(format)?;
        let request = raw.coerce()?;

        let offered = catalog.filtered(&self.element_filter(catalog));
        let baseline = self.collection.baseline();
        let allocation = open_packs(&offered, caps, &baseline, &request, &mut self.rng)?;

        let view = AllocationView::new(&allocation, &request);
        self.last_opening = allocation.cards().iter().map(|card| (*card).clone()).collect();
        Ok(view)
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }
}

fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    if let Err(e) = getrandom::getrandom(&mut bytes) {
        log::warn!("no entropy source ({}), using fixed seed", e);
        return 42;
    }
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
    { "id": "flare", "name": "Flare", "rarity": "Ultra Rare", "elements": ["Fire"], "set": "s" },
    { "id": "blaze", "name": "Blaze", "rarity": "Rare", "elements": ["Fire"], "set": "s" },
    { "id": "tide", "name": "Tide", "rarity": "Rare", "elements": ["Water"], "set": "s" },
    { "id": "ember", "name": "Ember", "rarity": "Common", "elements": ["Fire"], "set": "s" },
    { "id": "spray", "name": "Spray", "rarity": "Common", "elements": ["Water"], "set": "s" }
    ]"#;

    const FORMATS: &str = r#"{ "standard": { "Ultra Rare": 1, "Rare": 2 } }"#;

    fn request(rare: f64, rate: f64, common: f64, packs: f64) -> RawPackRequest {
        RawPackRequest {
            rare_slots: rare,
            ultra_rate_percent: rate,
            uncommon_slots: 0.0,
            common_slots: common,
            pack_count: packs,
        }
    }

    fn loaded() -> PackSimulator {
        let mut sim = PackSimulator::new(Some(7));
        sim.load_catalog(CATALOG).expect("catalog loads");
        sim.load_formats(FORMATS).expect("formats load");
        sim
    }

    #[test]
    fn test_open_requires_catalog_and_format() {
        let mut sim = PackSimulator::new(Some(1));
        assert_eq!(
            sim.open(Some("standard"), &request(1.0, 0.0, 1.0, 1.0)),
            Err(PackError::MissingCatalog)
        );

        let mut sim = loaded();
        assert!(matches!(
            sim.open(None, &request(1.0, 0.0, 1.0, 1.0)),
            Err(PackError::UnknownFormat { .. })
        ));
        assert!(matches!(
            sim.open(Some("draft"), &request(1.0, 0.0, 1.0, 1.0)),
            Err(PackError::UnknownFormat { .. })
        ));
        assert_eq!(
            sim.open(Some("standard"), &request(1.0, 0.0, 1.0, -2.0)),
            Err(PackError::NoPacks)
        );
    }

    #[test]
    fn test_partner_filters_elements() {
        let mut sim = loaded();
        sim.set_partner(Some("blaze".into())).expect("partner exists");

        let view = sim
            .open(Some("standard"), &request(2.0, 50.0, 2.0, 3.0))
            .expect("opens");
        assert!(view
            .cards()
            .all(|card| card.elements.iter().any(|e| e == "Fire")));

        assert!(sim.set_partner(Some("nobody".into())).is_err());
        sim.set_partner(None).expect("clearing always works");
    }

    #[test]
    fn test_kept_openings_count_toward_caps() {
        let mut sim = loaded();
        sim.set_partner(Some("flare".into())).expect("partner exists");

        // Fire pool: flare (cap 1), blaze (cap 2), ember (unbounded)
        for _ in 0..5 {
            sim.open(Some("standard"), &request(1.0, 100.0, 0.0, 1.0))
                .expect("opens");
            sim.keep_last_opening();
        }
        let collection = sim.collection();
        assert_eq!(collection.quantity(&CardId::from("flare")), 1);
        assert_eq!(collection.quantity(&CardId::from("blaze")), 2);
        assert_eq!(collection.quantity(&CardId::from("tide")), 0);
    }

    #[test]
    fn test_discarded_openings_are_not_kept() {
        let mut sim = loaded();
        sim.open(Some("standard"), &request(1.0, 0.0, 2.0, 1.0))
            .expect("opens");
        sim.discard_last_opening();
        assert_eq!(sim.keep_last_opening(), 0);
        assert_eq!(sim.collection_size(), 0);
    }

    #[test]
    fn test_snapshot_restores_collection() {
        let mut sim = loaded();
        sim.open(Some("standard"), &request(1.0, 0.0, 2.0, 2.0))
            .expect("opens");
        let kept = sim.keep_last_opening();
        assert!(kept > 0);

        let bytes = sim.get_collection_snapshot();
        let mut other = loaded();
        other.restore_collection_snapshot(&bytes).expect("restores");
        assert_eq!(other.collection(), sim.collection());
        assert_eq!(other.collection_size(), kept);
    }
}
