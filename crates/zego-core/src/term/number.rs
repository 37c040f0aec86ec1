//! Number literals.
//!
//! A [`Number`] keeps the literal exactly as written. The numeric value is only
//! materialized (as an exact big-integer mantissa scaled by powers of two and
//! ten) to validate the literal and to order two numbers.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::{BigInt, Sign};
use serde::Serialize;

/// Largest accepted decimal magnitude of a number literal, in either direction.
/// Bounds the written exponent as well, zero mantissas included.
pub const MAX_EXPONENT: i64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    #[error("expected number")]
    Invalid,
    #[error("number too big")]
    TooBig,
}

/// A number literal, stored verbatim.
///
/// Equality and hashing use the literal text, so `1` and `1.0` are distinct
/// values. Ordering compares the exact numeric values first and falls back
/// to the text, which keeps `cmp == Equal` in step with `==`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Number(Box<str>);

impl Number {
    /// Validates `literal` and wraps it without renormalizing.
    ///
    /// Accepts an optional sign, `0x`/`0o`/`0b` prefixes, `_` between digits,
    /// one fractional part, `e` exponents for decimal and `p` exponents for
    /// hexadecimal literals.
    pub fn parse(literal: &str) -> Result<Self, NumberError> {
        Exact::parse(literal)?.check_magnitude()?;
        Ok(Self(literal.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value as an `i64` when the literal is a plain decimal integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self(value.to_string().into())
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        let numeric = match (self.as_i64(), other.as_i64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => match (Exact::parse(&self.0), Exact::parse(&other.0)) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => Ordering::Equal,
            },
        };
        numeric.then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `mantissa * 2^pow2 * 10^pow10`
#[derive(Debug)]
struct Exact {
    mantissa: BigInt,
    pow2: i64,
    pow10: i64,
}

impl Exact {
    fn parse(literal: &str) -> Result<Self, NumberError> {
        let (negative, rest) = split_sign(literal);
        let (radix, body) = split_radix(rest);
        let prefixed = radix != 10;

        let markers: &[char] = match radix {
            10 => &['e', 'E'],
            16 => &['p', 'P'],
            _ => &[],
        };
        let (mantissa_text, exponent_text) = match body.find(markers) {
            Some(at) => (&body[..at], Some(&body[at + 1..])),
            None => (body, None),
        };
        let (int_part, frac_part) = mantissa_text.split_once('.').unwrap_or((mantissa_text, ""));

        let int_digits = strip_separators(int_part, radix, prefixed)?;
        let frac_digits = strip_separators(frac_part, radix, false)?;
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(NumberError::Invalid);
        }

        let digits = format!("{int_digits}{frac_digits}");
        let mut mantissa =
            BigInt::parse_bytes(digits.as_bytes(), radix).ok_or(NumberError::Invalid)?;
        if negative {
            mantissa = -mantissa;
        }

        let frac_len = frac_digits.len() as i64;
        let (mut pow2, mut pow10) = match radix {
            10 => (0, -frac_len),
            16 => (-4 * frac_len, 0),
            8 => (-3 * frac_len, 0),
            _ => (-frac_len, 0),
        };
        if let Some(text) = exponent_text {
            let exponent = parse_exponent(text)?;
            if exponent.abs() > MAX_EXPONENT {
                return Err(NumberError::TooBig);
            }
            if radix == 10 {
                pow10 = pow10.checked_add(exponent).ok_or(NumberError::TooBig)?;
            } else {
                pow2 = pow2.checked_add(exponent).ok_or(NumberError::TooBig)?;
            }
        }

        Ok(Self {
            mantissa,
            pow2,
            pow10,
        })
    }

    fn check_magnitude(&self) -> Result<(), NumberError> {
        if self.mantissa.sign() == Sign::NoSign {
            return Ok(());
        }
        let magnitude = (self.mantissa.bits() as f64 + self.pow2 as f64)
            * std::f64::consts::LOG10_2
            + self.pow10 as f64;
        if magnitude.abs() > MAX_EXPONENT as f64 {
            return Err(NumberError::TooBig);
        }
        Ok(())
    }

    fn cmp(&self, other: &Self) -> Ordering {
        let (sign, other_sign) = (self.mantissa.sign(), other.mantissa.sign());
        if sign != other_sign || sign == Sign::NoSign {
            return sign.cmp(&other_sign);
        }
        let pow2 = self.pow2.min(other.pow2);
        let pow10 = self.pow10.min(other.pow10);
        self.scaled(pow2, pow10).cmp(&other.scaled(pow2, pow10))
    }

    /// Mantissa rescaled so that its exponents drop to `pow2` and `pow10`.
    fn scaled(&self, pow2: i64, pow10: i64) -> BigInt {
        let tens = (self.pow10 - pow10) as u32;
        let twos = (self.pow2 - pow2) as usize;
        (&self.mantissa * BigInt::from(10u8).pow(tens)) << twos
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn split_radix(text: &str) -> (u32, &str) {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (16, &text[2..]),
            b'o' | b'O' => return (8, &text[2..]),
            b'b' | b'B' => return (2, &text[2..]),
            _ => {}
        }
    }
    (10, text)
}

/// Drops `_` separators, which must sit between two digits (or right after a
/// radix prefix).
fn strip_separators(part: &str, radix: u32, after_prefix: bool) -> Result<String, NumberError> {
    let mut digits = String::with_capacity(part.len());
    let mut prev_digit = after_prefix;
    let mut chars = part.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            let next_digit = chars.peek().is_some_and(|next| next.is_digit(radix));
            if !prev_digit || !next_digit {
                return Err(NumberError::Invalid);
            }
            prev_digit = false;
        } else if c.is_digit(radix) {
            digits.push(c);
            prev_digit = true;
        } else {
            return Err(NumberError::Invalid);
        }
    }
    Ok(digits)
}

fn parse_exponent(text: &str) -> Result<i64, NumberError> {
    let (negative, rest) = split_sign(text);
    let digits = strip_separators(rest, 10, false)?;
    if digits.is_empty() {
        return Err(NumberError::Invalid);
    }
    let mut value: i64 = 0;
    for d in digits.bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(d - b'0')))
            .ok_or(NumberError::TooBig)?;
    }
    Ok(if negative { -value } else { value })
}
