//! Fixed-width two's-complement signed integers built from 64-bit words.
//!
//! `WideInt<W>` stores `W` words most-significant first. Every arithmetic,
//! bitwise and shift operation is total: overflow wraps the same way native
//! fixed-width integers do with `wrapping_*`, and division by zero yields zero.
//! Predicate evaluation relies on that, e.g. the `Between` offset trick needs
//! wrapping subtraction.
//!
//! Only the 128-bit and 256-bit instantiations are exported, as [`Int128`]
//! and [`Int256`].
use std::cmp::Ordering;
use std::ops::{Add, BitAnd, BitOr, BitXor, Mul, Neg, Not, Shl, Shr, Sub};

/// Signed 128-bit integer.
pub type Int128 = WideInt<2>;
/// Signed 256-bit integer.
pub type Int256 = WideInt<4>;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WideInt<const W: usize>(pub(crate) [u64; W]);

impl<const W: usize> WideInt<W> {
    pub const BITS: u32 = (W * 64) as u32;
    pub const ZERO: Self = Self([0; W]);
    pub const ONE: Self = {
        let mut w = [0; W];
        w[W - 1] = 1;
        Self(w)
    };
    pub const MINUS_ONE: Self = Self([u64::MAX; W]);
    pub const MAX: Self = {
        let mut w = [u64::MAX; W];
        w[0] = i64::MAX as u64;
        Self(w)
    };
    pub const MIN: Self = {
        let mut w = [0; W];
        w[0] = 1 << 63;
        Self(w)
    };

    /// Build from raw words, most-significant first.
    #[inline]
    pub const fn from_words(words: [u64; W]) -> Self {
        Self(words)
    }

    /// Raw words, most-significant first.
    #[inline]
    pub const fn to_words(self) -> [u64; W] {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0[0] >> 63 == 1
    }

    /// -1, 0 or 1.
    pub fn signum(self) -> i32 {
        if self.is_negative() {
            -1
        } else if self.is_zero() {
            0
        } else {
            1
        }
    }

    pub fn wrapping_add(self, rhs: Self) -> Self {
        let mut out = [0u64; W];
        let mut carry = false;
        for i in (0..W).rev() {
            let (s, c1) = self.0[i].overflowing_add(rhs.0[i]);
            let (s, c2) = s.overflowing_add(carry as u64);
            out[i] = s;
            carry = c1 | c2;
        }
        Self(out)
    }

    pub fn wrapping_sub(self, rhs: Self) -> Self {
        let mut out = [0u64; W];
        let mut borrow = false;
        for i in (0..W).rev() {
            let (d, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (d, b2) = d.overflowing_sub(borrow as u64);
            out[i] = d;
            borrow = b1 | b2;
        }
        Self(out)
    }

    #[inline]
    pub fn wrapping_neg(self) -> Self {
        (!self).wrapping_add(Self::ONE)
    }

    /// Low `W` words of the schoolbook product. Two's-complement
    /// multiplication needs no sign handling when the high half is dropped.
    pub fn wrapping_mul(self, rhs: Self) -> Self {
        let a = to_le(self.0);
        let b = to_le(rhs.0);
        let mut r = [0u64; W];
        for i in 0..W {
            if a[i] == 0 {
                continue;
            }
            let mut carry = 0u128;
            for j in 0..W - i {
                let t = a[i] as u128 * b[j] as u128 + r[i + j] as u128 + carry;
                r[i + j] = t as u64;
                carry = t >> 64;
            }
        }
        Self(to_le(r))
    }

    /// Wrapping sum plus whether the signed result overflowed. Overflow
    /// happens only when both operands share a sign the result lacks.
    pub fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let r = self.wrapping_add(rhs);
        let overflow =
            self.is_negative() == rhs.is_negative() && r.is_negative() != self.is_negative();
        (r, overflow)
    }

    pub fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let r = self.wrapping_sub(rhs);
        let overflow =
            self.is_negative() != rhs.is_negative() && r.is_negative() != self.is_negative();
        (r, overflow)
    }

    pub fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
        let r = self.wrapping_mul(rhs);
        if self.is_zero() {
            return (r, false);
        }
        // MIN * -1 wraps back to MIN, which the division check cannot see.
        let overflow = r.quo_rem(self).0 != rhs
            || (self == Self::MINUS_ONE && rhs == Self::MIN);
        (r, overflow)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.overflowing_add(rhs) {
            (r, false) => Some(r),
            _ => None,
        }
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.overflowing_sub(rhs) {
            (r, false) => Some(r),
            _ => None,
        }
    }

    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        match self.overflowing_mul(rhs) {
            (r, false) => Some(r),
            _ => None,
        }
    }

    /// Absolute value; `MIN` maps to itself.
    #[inline]
    pub fn wrapping_abs(self) -> Self {
        if self.is_negative() {
            self.wrapping_neg()
        } else {
            self
        }
    }

    /// Magnitude as raw unsigned words. Exact for `MIN` too.
    #[inline]
    pub(crate) fn unsigned_abs(self) -> [u64; W] {
        self.wrapping_abs().0
    }

    /// Left shift. Shifts of `BITS` or more produce zero.
    pub fn lsh(self, n: u32) -> Self {
        if n >= Self::BITS {
            return Self::ZERO;
        }
        Self(shl_words(self.0, n))
    }

    /// Arithmetic (sign-extending) right shift. Shifts of `BITS` or more
    /// produce 0 for non-negative values and -1 for negative ones.
    pub fn rsh(self, n: u32) -> Self {
        let fill = if self.is_negative() { u64::MAX } else { 0 };
        if n >= Self::BITS {
            return Self([fill; W]);
        }
        Self(shr_words(self.0, n, fill))
    }

    pub fn leading_zeros(self) -> u32 {
        leading_zeros_words(&self.0)
    }
}

impl<const W: usize> Default for WideInt<W> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const W: usize> Ord for WideInt<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // same sign: two's complement order equals unsigned word order
            _ => self.0.cmp(&other.0),
        }
    }
}

impl<const W: usize> PartialOrd for WideInt<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const W: usize> Add for WideInt<W> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl<const W: usize> Sub for WideInt<W> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

impl<const W: usize> Mul for WideInt<W> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
}

impl<const W: usize> Neg for WideInt<W> {
    type Output = Self;
    fn neg(self) -> Self {
        self.wrapping_neg()
    }
}

impl<const W: usize> Not for WideInt<W> {
    type Output = Self;
    fn not(self) -> Self {
        Self(self.0.map(|w| !w))
    }
}

impl<const W: usize> BitAnd for WideInt<W> {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        let mut out = self.0;
        out.iter_mut().zip(rhs.0).for_each(|(a, b)| *a &= b);
        Self(out)
    }
}

impl<const W: usize> BitOr for WideInt<W> {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        let mut out = self.0;
        out.iter_mut().zip(rhs.0).for_each(|(a, b)| *a |= b);
        Self(out)
    }
}

impl<const W: usize> BitXor for WideInt<W> {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        let mut out = self.0;
        out.iter_mut().zip(rhs.0).for_each(|(a, b)| *a ^= b);
        Self(out)
    }
}

impl<const W: usize> Shl<u32> for WideInt<W> {
    type Output = Self;
    fn shl(self, n: u32) -> Self {
        self.lsh(n)
    }
}

impl<const W: usize> Shr<u32> for WideInt<W> {
    type Output = Self;
    fn shr(self, n: u32) -> Self {
        self.rsh(n)
    }
}

// ==============================
// Word helpers (most-significant first unless noted)
// ==============================

/// Reverse word order; converts between big- and little-endian word layout.
#[inline]
pub(crate) fn to_le<const W: usize>(mut words: [u64; W]) -> [u64; W] {
    words.reverse();
    words
}

pub(crate) fn leading_zeros_words(words: &[u64]) -> u32 {
    let mut n = 0;
    for &w in words {
        if w != 0 {
            return n + w.leading_zeros();
        }
        n += 64;
    }
    n
}

/// Logical left shift, `n < W * 64`.
pub(crate) fn shl_words<const W: usize>(src: [u64; W], n: u32) -> [u64; W] {
    let words = (n / 64) as usize;
    let bits = n % 64;
    let mut out = [0u64; W];
    if bits == 0 {
        // word-aligned: plain word move
        out[..W - words].copy_from_slice(&src[words..]);
        return out;
    }
    for i in 0..W - words {
        let hi = src[i + words] << bits;
        let lo = if i + words + 1 < W {
            src[i + words + 1] >> (64 - bits)
        } else {
            0
        };
        out[i] = hi | lo;
    }
    out
}

/// Right shift filling vacated words with `fill` (0 or all ones), `n < W * 64`.
pub(crate) fn shr_words<const W: usize>(src: [u64; W], n: u32, fill: u64) -> [u64; W] {
    let words = (n / 64) as usize;
    let bits = n % 64;
    let mut out = [fill; W];
    if bits == 0 {
        out[words..].copy_from_slice(&src[..W - words]);
        return out;
    }
    for i in words..W {
        let j = i - words;
        let upper = if j == 0 { fill } else { src[j - 1] };
        out[i] = (src[j] >> bits) | (upper << (64 - bits));
    }
    out
}
