//! Unit-conversion engine for the todo backend.
//!
//! # Overview
//! Converts values between units of length, weight, and temperature. Length
//! and weight pivot through a base unit (meter, kilogram) using fixed
//! `to_base`/`from_base` factors; temperature pivots through Celsius with
//! affine formulas. Adding a unit only requires its pair of pivot
//! conversions, never pairwise formulas against every existing unit.
//!
//! # Design
//! - The registry is static constant data, read-only for the process
//!   lifetime. Unknown units always fail validation; there is no silent
//!   fallback factor.
//! - `convert` is a pure function of its inputs: no I/O, no shared mutable
//!   state, safe to call from any number of concurrent request handlers.
//! - All validation runs eagerly before arithmetic. The only post-hoc check
//!   is the finiteness of the computed result, which is an internal defect
//!   class rather than a caller error.

pub mod engine;
pub mod error;
pub mod registry;
pub mod types;

pub use engine::{convert, convert_length, convert_temperature, convert_weight};
pub use error::ConvertError;
pub use registry::UnitCategory;
pub use types::{Conversion, ConversionRequest};
