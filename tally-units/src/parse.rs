//! Quantity string parsing - "1 1/2 cups", "3 tbsp", "2"

use tally_core::UnitError;
use crate::{Quantity, Unit, UNITS};

/// Parse a unit identifier or alias
pub fn parse_unit(s: &str) -> Result<Unit, UnitError> {
    UNITS.lookup(s)
}

/// Parse a magnitude: decimal ("1.5"), fraction ("3/4") or a mixed
/// number ("1 1/2"). Returns `None` if `s` is not one of those.
pub fn parse_magnitude(s: &str) -> Option<f64> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let value = match tokens.as_slice() {
        [single] => parse_number_token(single)?,
        [whole, fraction] => {
            let whole: u64 = whole.parse().ok()?;
            whole as f64 + parse_proper_fraction(fraction)?
        }
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Parse a quantity string like "2 cups" or "1/2 tsp".
///
/// A bare number is a count.
pub fn parse_quantity_string(s: &str) -> Result<Quantity, UnitError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();

    // Leading numeric tokens form the magnitude; a unit may be glued to the
    // last of them ("100tsp")
    let numeric = tokens.iter()
        .take_while(|t| parse_number_token(t).is_some())
        .count();

    let (magnitude_str, unit_str) = if numeric > 0 {
        (tokens[..numeric].join(" "), tokens[numeric..].join(" "))
    } else {
        let first = tokens.first().copied().unwrap_or("");
        let split = first
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '/'))
            .unwrap_or(first.len());
        if split == 0 {
            return Err(UnitError::InvalidNumber(s.trim().to_string()));
        }
        let mut rest = vec![&first[split..]];
        rest.extend_from_slice(&tokens[1..]);
        (first[..split].to_string(), rest.join(" "))
    };

    let magnitude = parse_magnitude(&magnitude_str)
        .ok_or(UnitError::InvalidNumber(magnitude_str))?;

    let unit = if unit_str.trim().is_empty() {
        Unit::Count
    } else {
        parse_unit(&unit_str)?
    };

    Quantity::try_new(magnitude, unit)
}

fn parse_number_token(token: &str) -> Option<f64> {
    match token.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            (den != 0.0).then(|| num / den)
        }
        None => token.parse().ok(),
    }
}

/// "1/2" but not "3/2", "0.5/1" or "1/0"
fn parse_proper_fraction(token: &str) -> Option<f64> {
    let (num, den) = token.split_once('/')?;
    let num: u64 = num.parse().ok()?;
    let den: u64 = den.parse().ok()?;
    (den > 0 && num < den).then(|| num as f64 / den as f64)
}
