//! Decimal text encoding for [`WideInt`].
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::wide_int::WideInt;

/// Largest power of ten that fits in one word.
const WORD_POW10: u64 = 10_000_000_000_000_000_000;
const WORD_POW10_DIGITS: usize = 19;
const PRECISION_STEP: u64 = 1_000_000_000_000_000_000;

/// Errors returned when parsing a decimal wide integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidNumber {
    #[error("cannot parse integer from empty string")]
    Empty,
    #[error("invalid digit found in string")]
    InvalidDigit,
    #[error("number too large to fit in target type")]
    Overflow,
}

/// In-place `words / d`, big-endian words. Returns the remainder.
fn div_rem_word<const W: usize>(words: &mut [u64; W], d: u64) -> u64 {
    let mut rem = 0u64;
    for w in words.iter_mut() {
        let n = ((rem as u128) << 64) | *w as u128;
        *w = (n / d as u128) as u64;
        rem = (n % d as u128) as u64;
    }
    rem
}

/// In-place `words * m + a`. Returns true on unsigned overflow.
fn mul_add_word<const W: usize>(words: &mut [u64; W], m: u64, a: u64) -> bool {
    let mut carry = a as u128;
    for w in words.iter_mut().rev() {
        let t = *w as u128 * m as u128 + carry;
        *w = t as u64;
        carry = t >> 64;
    }
    carry != 0
}

impl<const W: usize> WideInt<W> {
    /// Digits of `|MIN|`, which has no positive counterpart.
    pub const MIN_PRECISION: u32 = match W {
        2 => 39,
        4 => 77,
        _ => 0,
    };

    /// Parses an optionally signed run of decimal digits.
    pub fn parse(s: &str) -> Result<Self, InvalidNumber> {
        let (neg, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if digits.is_empty() {
            return Err(InvalidNumber::Empty);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidNumber::InvalidDigit);
        }

        let mut mag = [0u64; W];
        for chunk in digits.as_bytes().chunks(WORD_POW10_DIGITS) {
            let value = chunk.iter().fold(0u64, |acc, b| acc * 10 + (b - b'0') as u64);
            let scale = 10u64.pow(chunk.len() as u32);
            if mul_add_word(&mut mag, scale, value) {
                return Err(InvalidNumber::Overflow);
            }
        }

        // |MIN| has only the top bit set; anything else with it is too large.
        let top_set = mag[0] >> 63 == 1;
        if top_set {
            let is_min_mag = mag[0] == 1 << 63 && mag[1..].iter().all(|&w| w == 0);
            if !(neg && is_min_mag) {
                return Err(InvalidNumber::Overflow);
            }
        }
        let value = Self(mag);
        Ok(if neg { value.wrapping_neg() } else { value })
    }

    /// Parses `s`, panicking on malformed input. For literals known to be valid.
    pub fn must_parse(s: &str) -> Self {
        match Self::parse(s) {
            Ok(v) => v,
            Err(e) => panic!("invalid wide integer literal {s:?}: {e}"),
        }
    }

    /// Number of decimal digits in `|self|`. Zero has one digit.
    pub fn precision(self) -> u32 {
        if self == Self::MIN {
            return Self::MIN_PRECISION;
        }
        let mut mag = self.unsigned_abs();
        let mut digits = 0;
        while mag[..W - 1].iter().any(|&w| w != 0) || mag[W - 1] >= PRECISION_STEP {
            div_rem_word(&mut mag, PRECISION_STEP);
            digits += 18;
        }
        digits + mag[W - 1].checked_ilog10().map_or(1, |d| d + 1)
    }
}

impl<const W: usize> fmt::Display for WideInt<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut mag = self.unsigned_abs();
        let mut chunks = Vec::with_capacity(W * 64 / 63 + 1);
        loop {
            chunks.push(div_rem_word(&mut mag, WORD_POW10));
            if mag.iter().all(|&w| w == 0) {
                break;
            }
        }
        let mut digits = String::with_capacity(chunks.len() * WORD_POW10_DIGITS);
        let mut rev = chunks.iter().rev();
        if let Some(first) = rev.next() {
            digits.push_str(&first.to_string());
        }
        for chunk in rev {
            digits.push_str(&format!("{chunk:019}"));
        }
        f.pad_integral(!self.is_negative(), "", &digits)
    }
}

impl<const W: usize> fmt::Debug for WideInt<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<const W: usize> FromStr for WideInt<W> {
    type Err = InvalidNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
