//! Pack generation for the card companion app.
//!
//! The crate is `no_std` compatible (with `alloc`) so the same rules run in
//! the browser client and the native simulator.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod allocator;
pub mod caps;
pub mod catalog;
pub mod collection;
pub mod error;
pub mod log;
pub mod request;
pub mod rng;
pub mod session;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use allocator::{allocate, open_packs, Allocation};
pub use caps::{FormatCaps, RarityCaps};
pub use catalog::{Catalog, ElementFilter};
pub use collection::{Collection, CollectionExport, ExportedCard};
pub use error::{PackError, PackResult};
pub use request::{PackRequest, RawPackRequest};
pub use rng::{PackRng, XorShiftRng};
pub use session::SessionBaseline;
pub use types::*;
pub use view::*;
