//! Conversion arithmetic and request validation.
//!
//! # Design
//! `convert` runs the full validation sequence, dispatches on the category,
//! and rounds to 6 decimal digits. The per-category functions implement the
//! pivot schemes: multiply through the base unit for length and weight,
//! affine through Celsius for temperature. Validation order matters and is
//! fixed: finiteness, magnitude, unit membership, distinct units, then (after
//! arithmetic) result finiteness.

use crate::error::{ConvertError, MAX_MAGNITUDE};
use crate::registry::{self, UnitCategory};
use crate::types::{Conversion, ConversionRequest};

/// Validate `request`, perform the conversion, and round the result to
/// 6 decimal digits.
pub fn convert(request: &ConversionRequest) -> Result<Conversion, ConvertError> {
    if !request.value.is_finite() {
        return Err(ConvertError::InvalidValue);
    }
    if request.value.abs() > MAX_MAGNITUDE {
        return Err(ConvertError::ValueTooLarge(request.value));
    }

    let from = registry::require(request.unit_type, &request.from_unit)?;
    let to = registry::require(request.unit_type, &request.to_unit)?;
    if from == to {
        return Err(ConvertError::IdenticalUnits(from));
    }

    let raw = match request.unit_type {
        UnitCategory::Length => convert_length(request.value, &from, &to)?,
        UnitCategory::Weight => convert_weight(request.value, &from, &to)?,
        UnitCategory::Temperature => convert_temperature(request.value, &from, &to)?,
    };
    if !raw.is_finite() {
        return Err(ConvertError::Calculation);
    }

    Ok(Conversion {
        value: request.value,
        from_unit: request.from_unit.clone(),
        to_unit: request.to_unit.clone(),
        result: round6(raw),
        unit_type: request.unit_type,
    })
}

/// Convert a length value by pivoting through meters.
pub fn convert_length(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConvertError> {
    scale(UnitCategory::Length, value, from_unit, to_unit)
}

/// Convert a weight value by pivoting through kilograms.
pub fn convert_weight(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConvertError> {
    scale(UnitCategory::Weight, value, from_unit, to_unit)
}

fn scale(
    category: UnitCategory,
    value: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<f64, ConvertError> {
    let from = registry::canonical(from_unit);
    let to = registry::canonical(to_unit);
    let (to_base, _) = registry::coefficients(category, &from)
        .ok_or_else(|| ConvertError::unknown_unit(category, &from))?;
    let (_, from_base) = registry::coefficients(category, &to)
        .ok_or_else(|| ConvertError::unknown_unit(category, &to))?;

    let in_base = value * to_base;
    if !in_base.is_finite() {
        return Err(ConvertError::Calculation);
    }
    let out = in_base * from_base;
    if !out.is_finite() {
        return Err(ConvertError::Calculation);
    }
    Ok(out)
}

/// Convert a temperature value by pivoting through Celsius. Kelvin inputs
/// and results below zero are physically impossible and rejected.
pub fn convert_temperature(
    value: f64,
    from_unit: &str,
    to_unit: &str,
) -> Result<f64, ConvertError> {
    let from = registry::require(UnitCategory::Temperature, from_unit)?;
    let to = registry::require(UnitCategory::Temperature, to_unit)?;

    let celsius = match from.as_str() {
        "fahrenheit" => (value - 32.0) * 5.0 / 9.0,
        "kelvin" => {
            if value < 0.0 {
                return Err(ConvertError::PhysicallyInvalid(value));
            }
            value - 273.15
        }
        _ => value,
    };
    if !celsius.is_finite() {
        return Err(ConvertError::Calculation);
    }

    let out = match to.as_str() {
        "fahrenheit" => celsius * 9.0 / 5.0 + 32.0,
        "kelvin" => {
            let kelvin = celsius + 273.15;
            if kelvin < 0.0 {
                return Err(ConvertError::PhysicallyInvalid(kelvin));
            }
            kelvin
        }
        _ => celsius,
    };
    if !out.is_finite() {
        return Err(ConvertError::Calculation);
    }
    Ok(out)
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
