//! Error types for pack operations
//!
//! The allocator itself never fails. These errors cover loading card data and
//! the preconditions checked before a pack is opened.

use alloc::string::String;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::CardId;

/// Errors raised while loading data or validating a pack request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PackError {
    /// Pack count must be at least 1
    NoPacks,
    /// Ultra-rare rate is a percentage and cannot exceed 100
    InvalidUltraRate { rate: u32 },
    /// No catalog has been loaded
    MissingCatalog,
    /// Format name has no cap table
    UnknownFormat { format: String },
    /// Rarity name is not one of the four tiers
    UnknownRarity { name: String },
    /// Card identifier is not in the catalog
    UnknownCard { id: CardId },
    /// Card identifier appears twice in the catalog
    DuplicateCard { id: CardId },
    /// Card carries more element tags than allowed
    TooManyElements { id: CardId, count: usize },
    /// Input data could not be parsed
    MalformedData { reason: String },
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::NoPacks => write!(f, "pack count must be at least 1"),
            PackError::InvalidUltraRate { rate } => {
                write!(f, "ultra rare rate {}% is outside 0..=100", rate)
            }
            PackError::MissingCatalog => write!(f, "no card catalog loaded"),
            PackError::UnknownFormat { format } => write!(f, "unknown format '{}'", format),
            PackError::UnknownRarity { name } => write!(f, "unknown rarity '{}'", name),
            PackError::UnknownCard { id } => write!(f, "unknown card '{}'", id),
            PackError::DuplicateCard { id } => write!(f, "card '{}' listed more than once", id),
            PackError::TooManyElements { id, count } => write!(
                f,
                "card '{}' has {} elements (max {})",
                id,
                count,
                crate::types::MAX_ELEMENTS
            ),
            PackError::MalformedData { reason } => write!(f, "malformed data: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PackError {}

#[cfg(feature = "std")]
impl From<serde_json::Error> for PackError {
    fn from(err: serde_json::Error) -> Self {
        use alloc::string::ToString;
        PackError::MalformedData {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for pack operations
pub type PackResult<T> = Result<T, PackError>;
