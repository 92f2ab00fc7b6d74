pub mod simulator;

use wasm_bindgen::prelude::*;

pub use simulator::PackSimulator;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(feature = "browser_log")]
    let _ = console_log::init_with_level(log::Level::Debug);
}
