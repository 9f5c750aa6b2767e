// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use crate::errors::TranslateError;
use serde::Serialize;
use std::fmt::Display;

/// Outside this adjusted-exponent range a literal is not a `NUMBER`.
const MIN_EXPONENT: i64 = -130;
const MAX_EXPONENT: i64 = 125;

/// A normalized decimal literal, kept as exact text.
///
/// The digits are carried verbatim so literals of any precision survive translation. The text
/// is always plain notation with no trailing fractional zeros, so `3.0`, `3` and `0.3e1` are the
/// same constant.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct Number(String);

impl Number {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts a numeric literal the way the runtime's `TO_NUMBER` does.
///
/// Accepts an optional sign, digits with an optional fraction, an optional exponent, and the
/// `f`/`d` binary-float suffixes. No digit is rounded away.
pub fn to_number(text: &str) -> Result<Number, TranslateError> {
    let invalid = || TranslateError::InvalidNumber(text.to_string());

    let mut literal = text.trim();
    if let Some(stripped) = literal.strip_suffix(['f', 'F', 'd', 'D']) {
        literal = stripped;
    }
    let (negative, unsigned) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };
    if !is_well_formed(unsigned) {
        return Err(invalid());
    }

    let (whole, fraction, exponent) = split_literal(unsigned);
    let exponent = match exponent {
        None => 0,
        Some(exp) => parse_exponent(exp).ok_or_else(invalid)?,
    };

    // value = digits * 10^-scale
    let all_digits = format!("{whole}{fraction}");
    let digits = all_digits.trim_start_matches('0');
    let significant = digits.trim_end_matches('0');
    if significant.is_empty() {
        return Ok(Number("0".to_string()));
    }
    let scale = fraction.len() as i64 - exponent - (digits.len() - significant.len()) as i64;
    let adjusted = significant.len() as i64 - 1 - scale;
    if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&adjusted) {
        return Err(invalid());
    }

    let plain = plain_notation(significant, scale);
    Ok(Number(if negative { format!("-{plain}") } else { plain }))
}

/// `digits * 10^-scale` without an exponent.
fn plain_notation(digits: &str, scale: i64) -> String {
    if scale <= 0 {
        return format!("{digits}{}", "0".repeat(scale.unsigned_abs() as usize));
    }
    let scale = scale as usize;
    if scale >= digits.len() {
        format!("0.{}{digits}", "0".repeat(scale - digits.len()))
    } else {
        let (int, frac) = digits.split_at(digits.len() - scale);
        format!("{int}.{frac}")
    }
}

/// Signed exponent digits. Leading zeros are insignificant; anything wider than `i32` is not a
/// usable exponent.
fn parse_exponent(exp: &str) -> Option<i64> {
    let (negative, digits) = match exp.as_bytes().first() {
        Some(b'-') => (true, &exp[1..]),
        Some(b'+') => (false, &exp[1..]),
        _ => (false, exp),
    };
    let digits = digits.trim_start_matches('0');
    let value: i32 = if digits.is_empty() { 0 } else { digits.parse().ok()? };
    let value = i64::from(value);
    Some(if negative { -value } else { value })
}

/// Splits `whole.fraction e exponent` without validating the pieces.
fn split_literal(text: &str) -> (&str, &str, Option<&str>) {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    (whole, fraction, exponent)
}

/// `digits [. digits] [e [sign] digits]`, where one side of the point may be empty.
fn is_well_formed(text: &str) -> bool {
    let (whole, fraction, exponent) = split_literal(text);
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() && fraction.is_empty() {
        return false;
    }
    if !digits(whole) || !digits(fraction) {
        return false;
    }
    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && digits(exp)
        }
    }
}
