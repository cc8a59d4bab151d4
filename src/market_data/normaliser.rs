// Convert contract numeral strings into plain decimal strings.
// Everything stays textual: exponents only move the decimal point, no float ever sees the value.

use crate::error::FormatError;
use crate::market_data::types::{NormalisedOrder, OrderBook, RawOrder};

/// Largest exponent magnitude accepted. Bounds the zero padding we emit.
pub const MAX_EXPONENT: u64 = 10_000;

// sign / integer digits / fraction digits / optional exponent
struct Numeral<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: Option<i64>,
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// Grammar: [+-]? DIGIT+ ("." DIGIT+)? ([eE] [+-]? DIGIT+)?
fn parse(value: &str) -> Result<Numeral<'_>, FormatError> {
    let invalid = || FormatError::InvalidNumeral(value.to_string());

    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let (integer, fraction) = match mantissa.split_once('.') {
        Some((integer, fraction)) if is_digits(fraction) => (integer, fraction),
        Some(_) => return Err(invalid()),
        None => (mantissa, ""),
    };
    if !is_digits(integer) {
        return Err(invalid());
    }

    let exponent = match exponent {
        None => None,
        Some(exp) => {
            let magnitude = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if !is_digits(magnitude) {
                return Err(invalid());
            }
            let exp: i64 = exp
                .parse()
                .map_err(|_| FormatError::ExponentOutOfRange(value.to_string()))?;
            if exp.unsigned_abs() > MAX_EXPONENT {
                return Err(FormatError::ExponentOutOfRange(value.to_string()));
            }
            Some(exp)
        }
    };

    Ok(Numeral { negative, integer, fraction, exponent })
}

/// Rewrite a decimal or exponential numeral without its exponent.
///
/// Input without an exponent is returned as-is once it has been validated.
/// Otherwise the decimal point is shifted by the exponent, padding with zeros
/// on either side as needed. No significant digit is ever dropped, and `-` is
/// carried over to the result.
///
/// ```
/// use spinbook_rs::market_data::normaliser::normalise;
///
/// assert_eq!(normalise("1.5e-3").unwrap(), "0.0015");
/// assert_eq!(normalise("-3.2e1").unwrap(), "-32");
/// ```
pub fn normalise(value: &str) -> Result<String, FormatError> {
    let numeral = parse(value)?;
    let Some(exponent) = numeral.exponent else {
        return Ok(value.to_string());
    };

    let digits = [numeral.integer, numeral.fraction].concat();
    // Index of the decimal point inside `digits` once shifted
    let point = numeral.integer.len() as i64 + exponent;

    let (whole, fraction) = if point <= 0 {
        (String::new(), "0".repeat(point.unsigned_abs() as usize) + &digits)
    } else if point as usize >= digits.len() {
        (digits.clone() + &"0".repeat(point as usize - digits.len()), String::new())
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        (whole.to_string(), fraction.to_string())
    };

    let whole = whole.trim_start_matches('0');
    let mut out = String::with_capacity(whole.len() + fraction.len() + 3);
    if numeral.negative {
        out.push('-');
    }
    out.push_str(if whole.is_empty() { "0" } else { whole });
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(&fraction);
    }
    Ok(out)
}

pub fn normalise_order(order: &RawOrder) -> Result<NormalisedOrder, FormatError> {
    Ok(NormalisedOrder {
        price: normalise(&order.price)?,
        quantity: normalise(&order.quantity)?,
    })
}

/// Normalise every price and quantity of a book.
///
/// Order within each side is kept. A single bad numeral fails the whole book.
pub fn normalise_book(book: &OrderBook<RawOrder>) -> Result<OrderBook<NormalisedOrder>, FormatError> {
    Ok(OrderBook {
        ask_orders: norm_side(&book.ask_orders)?,
        bid_orders: norm_side(&book.bid_orders)?,
    })
}

fn norm_side(side: &[RawOrder]) -> Result<Vec<NormalisedOrder>, FormatError> {
    side.iter().map(normalise_order).collect()
}
