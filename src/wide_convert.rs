//! Conversions between [`WideInt`] and native integers, byte strings and
//! `f64`.
use crate::wide_int::{Int128, Int256, WideInt, shl_words, shr_words};

/// How a converted value relates to its exact source value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    /// Result is smaller than the source.
    Below,
    Exact,
    /// Result is larger than the source.
    Above,
}

impl<const W: usize> From<i64> for WideInt<W> {
    fn from(v: i64) -> Self {
        let mut w = [if v < 0 { u64::MAX } else { 0 }; W];
        w[W - 1] = v as u64;
        Self(w)
    }
}

impl<const W: usize> From<u64> for WideInt<W> {
    fn from(v: u64) -> Self {
        let mut w = [0; W];
        w[W - 1] = v;
        Self(w)
    }
}

impl<const W: usize> From<i32> for WideInt<W> {
    fn from(v: i32) -> Self {
        Self::from(v as i64)
    }
}

impl<const W: usize> WideInt<W> {
    #[inline]
    pub fn from_i64(v: i64) -> Self {
        Self::from(v)
    }

    /// Low 64 bits as `i64`. Only meaningful when
    /// [`is_i64_representable`](Self::is_i64_representable) holds.
    #[inline]
    pub fn to_i64(self) -> i64 {
        self.0[W - 1] as i64
    }

    pub fn is_i64_representable(self) -> bool {
        let fill = if (self.0[W - 1] as i64) < 0 { u64::MAX } else { 0 };
        self.0[..W - 1].iter().all(|&w| w == fill)
    }

    pub(crate) fn read_be(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), W * 8);
        let mut w = [0u64; W];
        for (word, chunk) in w.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_be_bytes(buf);
        }
        Self(w)
    }

    pub(crate) fn write_be(self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), W * 8);
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.0) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
    }

    /// Converts a float, rounding half to even. Values outside the
    /// representable range saturate to `MIN`/`MAX`; NaN converts to zero.
    /// The returned [`Accuracy`] tells whether the result is exact or which
    /// side of the source it landed on.
    pub fn from_f64(f: f64) -> (Self, Accuracy) {
        if f.is_nan() {
            return (Self::ZERO, Accuracy::Exact);
        }
        let bits = f.to_bits();
        let neg = bits >> 63 == 1;
        let exp = ((bits >> 52) & 0x7ff) as i32;
        let frac = bits & ((1 << 52) - 1);

        let saturated = if neg {
            (Self::MIN, Accuracy::Above)
        } else {
            (Self::MAX, Accuracy::Below)
        };
        if exp == 0x7ff {
            return saturated;
        }
        // value = mant * 2^e
        let (mant, e) = if exp == 0 {
            (frac, -1074)
        } else {
            (frac | (1 << 52), exp - 1075)
        };
        if mant == 0 {
            return (Self::ZERO, Accuracy::Exact);
        }

        let limit = Self::BITS as i32 - 1;
        if e >= 0 {
            let top = 63 - mant.leading_zeros() as i32 + e;
            if top >= limit {
                if neg && top == limit && mant.is_power_of_two() {
                    return (Self::MIN, Accuracy::Exact);
                }
                return saturated;
            }
            let mag = Self::from(mant).lsh(e as u32);
            return (if neg { mag.wrapping_neg() } else { mag }, Accuracy::Exact);
        }

        let shift = (-e) as u32;
        let (int, rem, round_up) = if shift >= 64 {
            // below 2^53 / 2^64, so always under one half
            (0u64, mant, false)
        } else {
            let int = mant >> shift;
            let rem = mant & ((1u64 << shift) - 1);
            let half = 1u64 << (shift - 1);
            (int, rem, rem > half || (rem == half && int & 1 == 1))
        };
        let mag = Self::from(int + round_up as u64);
        let value = if neg { mag.wrapping_neg() } else { mag };
        let accuracy = match (rem == 0, round_up != neg) {
            (true, _) => Accuracy::Exact,
            (false, true) => Accuracy::Above,
            (false, false) => Accuracy::Below,
        };
        (value, accuracy)
    }

    /// Nearest `f64`, ties to even.
    pub fn to_f64(self) -> f64 {
        let neg = self.is_negative();
        let mag = self.unsigned_abs();
        let lz = crate::wide_int::leading_zeros_words(&mag);
        let f = if lz >= Self::BITS - 64 {
            mag[W - 1] as f64
        } else {
            // Keep the top 64 significant bits and fold everything below
            // into a sticky bit so the u64 -> f64 rounding stays correct.
            let shift = Self::BITS - 64 - lz;
            let top = shr_words(mag, shift, 0)[W - 1];
            let sticky = shl_words(shr_words(mag, shift, 0), shift) != mag;
            let scale = f64::from_bits(((1023 + shift) as u64) << 52);
            (top | sticky as u64) as f64 * scale
        };
        if neg { -f } else { f }
    }
}

impl Int128 {
    pub fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self::read_be(&bytes)
    }

    pub fn to_be_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        self.write_be(&mut out);
        out
    }

    #[inline]
    pub fn from_i128(v: i128) -> Self {
        Self([(v >> 64) as u64, v as u64])
    }

    #[inline]
    pub fn to_i128(self) -> i128 {
        (((self.0[0] as u128) << 64) | self.0[1] as u128) as i128
    }

    /// Sign-extends to 256 bits.
    pub fn to_int256(self) -> Int256 {
        let fill = if self.is_negative() { u64::MAX } else { 0 };
        Int256::from_words([fill, fill, self.0[0], self.0[1]])
    }
}

impl From<i128> for Int128 {
    fn from(v: i128) -> Self {
        Self::from_i128(v)
    }
}

impl From<Int128> for i128 {
    fn from(v: Int128) -> Self {
        v.to_i128()
    }
}

impl From<Int128> for Int256 {
    fn from(v: Int128) -> Self {
        v.to_int256()
    }
}

impl Int256 {
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self::read_be(&bytes)
    }

    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.write_be(&mut out);
        out
    }

    /// Low 128 bits; wraps when the value does not fit.
    pub fn as_int128(self) -> Int128 {
        Int128::from_words([self.0[2], self.0[3]])
    }

    pub fn is_int128_representable(self) -> bool {
        self.as_int128().to_int256() == self
    }
}
