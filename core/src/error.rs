//! Error taxonomy for the conversion engine.
//!
//! # Design
//! Every variant except `Calculation` describes a caller-correctable input
//! problem and is detected before any arithmetic runs. `Calculation` means
//! the arithmetic itself produced a non-finite value despite valid inputs;
//! given the magnitude bound that should not happen, so its occurrence
//! signals a registry or formula defect and the HTTP layer reports it as an
//! internal error. Conversion is deterministic, so nothing here is worth
//! retrying.

use crate::registry::{self, UnitCategory};

/// Maximum accepted input magnitude. Values beyond this are rejected before
/// arithmetic so intermediate products stay comfortably finite.
pub const MAX_MAGNITUDE: f64 = 1e15;

/// Failure modes of the conversion engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// The input value was NaN or infinite.
    #[error("value must be a finite number")]
    InvalidValue,

    /// The input magnitude exceeded [`MAX_MAGNITUDE`].
    #[error("value magnitude {0:e} exceeds the supported maximum of 1e15")]
    ValueTooLarge(f64),

    /// A unit identifier is not in its category's registry. The message
    /// enumerates the valid set (sorted) for discoverability.
    #[error("unknown {category} unit '{unit}'; valid units: {valid}")]
    InvalidUnit {
        category: UnitCategory,
        unit: String,
        valid: String,
    },

    /// Source and destination canonicalize to the same unit. Converting a
    /// unit to itself is a caller error, never a silent no-op.
    #[error("source and destination are both '{0}'; conversion requires two distinct units")]
    IdenticalUnits(String),

    /// A temperature below absolute zero, on input or as a result.
    #[error("temperature {0} kelvin is below absolute zero")]
    PhysicallyInvalid(f64),

    /// The category tag is not one of length, weight, temperature.
    #[error("unsupported unit type '{0}'; supported types: length, weight, temperature")]
    UnsupportedCategory(String),

    /// Arithmetic produced a non-finite value from valid inputs.
    #[error("conversion produced a non-finite result")]
    Calculation,
}

impl ConvertError {
    /// Build an `InvalidUnit` with the category's valid set pre-rendered.
    pub fn unknown_unit(category: UnitCategory, unit: &str) -> Self {
        ConvertError::InvalidUnit {
            category,
            unit: unit.to_string(),
            valid: registry::units_sorted(category).join(", "),
        }
    }

    /// Whether the failure is correctable by the caller. `Calculation` is
    /// the one internal defect class; everything else maps to a 400 at the
    /// HTTP boundary.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ConvertError::Calculation)
    }
}
