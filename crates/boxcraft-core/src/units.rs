//! Unit conversion utilities
//!
//! All geometry is computed in millimetres. This module parses lengths typed
//! in metric or imperial notation (including fractional inches) and formats
//! millimetre values for SVG output.

use crate::error::UnitError;

const MM_PER_INCH: f64 = 25.4;

/// Notation a bare number is read in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

/// Format a millimetre coordinate with 3-decimal precision.
///
/// Negative zero is folded to `0.000` so identical geometry always
/// serialises identically.
pub fn format_mm(value: f64) -> String {
    let s = format!("{:.3}", value);
    if s == "-0.000" {
        "0.000".to_string()
    } else {
        s
    }
}

fn parse_number(input: &str) -> Result<f64, UnitError> {
    input
        .parse::<f64>()
        .map_err(|e| UnitError::InvalidNumber {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

/// Parse length string to millimeters
///
/// * `input` - String to parse
/// * `system` - Assumed measurement system
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, UnitError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    match system {
        MeasurementSystem::Metric => parse_number(input),
        MeasurementSystem::Imperial => {
            if !input.contains('/') {
                return Ok(parse_number(input)? * MM_PER_INCH);
            }

            // "-1 1/2" means -(1 + 1/2)
            let (sign, body) = match input.strip_prefix('-') {
                Some(rest) => (-1.0, rest.trim_start()),
                None => (1.0, input),
            };

            let mut total_inches = 0.0;
            for part in body.split_whitespace() {
                if part.contains('/') {
                    let frac_parts: Vec<&str> = part.split('/').collect();
                    if frac_parts.len() != 2 {
                        return Err(UnitError::InvalidFraction(input.to_string()));
                    }
                    let num = parse_number(frac_parts[0])?;
                    let den = parse_number(frac_parts[1])?;
                    if den == 0.0 {
                        return Err(UnitError::DivisionByZero(input.to_string()));
                    }
                    total_inches += num / den;
                } else {
                    total_inches += parse_number(part)?;
                }
            }
            Ok(sign * total_inches * MM_PER_INCH)
        }
    }
}

/// Parse a length with an optional unit suffix (`mm`, `cm`, `in`, `"`).
///
/// A bare number is taken as millimetres.
pub fn parse_length_with_unit(input: &str) -> Result<f64, UnitError> {
    let input = input.trim();
    let lower = input.to_lowercase();

    if let Some(value) = lower.strip_suffix("mm") {
        parse_length(value, MeasurementSystem::Metric)
    } else if let Some(value) = lower.strip_suffix("cm") {
        Ok(parse_length(value, MeasurementSystem::Metric)? * 10.0)
    } else if let Some(value) = lower.strip_suffix("in").or_else(|| lower.strip_suffix('"')) {
        parse_length(value, MeasurementSystem::Imperial)
    } else if lower.ends_with(|c: char| c.is_ascii_alphabetic()) {
        let unit_start = lower
            .rfind(|c: char| !c.is_ascii_alphabetic())
            .map_or(0, |i| i + 1);
        Err(UnitError::UnknownUnit(lower[unit_start..].to_string()))
    } else {
        parse_length(input, MeasurementSystem::Metric)
    }
}
