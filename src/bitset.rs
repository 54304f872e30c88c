//! Packed boolean vector with a cached population count.
//!
//! Bit `i` lives in byte `i >> 3` at position `7 - (i & 7)` (MSB-first), the
//! layout shared by the scalar evaluator and every block kernel. Storage is a
//! `BitVec<u8, Msb0>` so the raw bytes are exactly that layout.
use bitvec::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitset {
    bits: BitVec<u8, Msb0>,
    cnt: usize,
}

impl Bitset {
    /// `n` cleared bits.
    pub fn new(n: usize) -> Self {
        Self {
            bits: BitVec::repeat(false, n),
            cnt: 0,
        }
    }

    /// `n` set bits.
    pub fn ones(n: usize) -> Self {
        Self {
            bits: BitVec::repeat(true, n),
            cnt: n,
        }
    }

    /// Wraps packed MSB-first bytes holding `n` flags.
    pub fn from_bytes(bytes: &[u8], n: usize) -> Self {
        debug_assert!(bytes.len() >= n.div_ceil(8));
        let mut bits = BitVec::from_slice(&bytes[..n.div_ceil(8)]);
        bits.truncate(n);
        let mut bitset = Self { bits, cnt: 0 };
        bitset.set_count();
        bitset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Makes the bitset exactly `n` flags long. Growing zero-fills the new
    /// region; existing bits in the kept region are preserved and the
    /// allocation is reused whenever it is large enough.
    pub fn ensure_size(&mut self, n: usize) -> &mut Self {
        if n > self.bits.len() {
            self.bits.resize(n, false);
        } else {
            self.bits.truncate(n);
        }
        self
    }

    /// Recomputes the cached population count from the packed bytes.
    pub fn set_count(&mut self) -> usize {
        self.cnt = self.bits.count_ones();
        self.cnt
    }

    /// Cached population count, valid after an evaluation or `set_count`.
    #[inline]
    pub fn count(&self) -> usize {
        self.cnt
    }

    #[inline]
    pub(crate) fn store_count(&mut self, cnt: usize) {
        self.cnt = cnt;
    }

    #[inline]
    pub fn is_set(&self, i: usize) -> bool {
        self.bits.get(i).is_some_and(|b| *b)
    }

    /// Sets bit `i`. Does not touch the cached count.
    #[inline]
    pub fn set(&mut self, i: usize) {
        self.bits.set(i, true);
    }

    /// Clears bit `i`. Does not touch the cached count.
    #[inline]
    pub fn clear(&mut self, i: usize) {
        self.bits.set(i, false);
    }

    /// Packed bytes, `ceil(len / 8)` long. Bits past `len` in the last byte
    /// are unspecified.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    #[inline]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.bits.as_raw_mut_slice()
    }

    /// Packed bytes with the bits past `len` cleared, for serialization.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.bytes().to_vec();
        let tail = self.len() % 8;
        if let (Some(last), true) = (out.last_mut(), tail != 0) {
            *last &= !(0xFFu8 >> tail);
        }
        out
    }

    /// Indexes of set bits in ascending order.
    pub fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// `self &= other` over the common length; recounts.
    pub fn and(&mut self, other: &Bitset) -> &mut Self {
        self.zip_bytes(other, |a, b| a & b)
    }

    /// `self |= other` over the common length; recounts.
    pub fn or(&mut self, other: &Bitset) -> &mut Self {
        self.zip_bytes(other, |a, b| a | b)
    }

    /// `self &= !other` over the common length; recounts.
    pub fn and_not(&mut self, other: &Bitset) -> &mut Self {
        self.zip_bytes(other, |a, b| a & !b)
    }

    fn zip_bytes(&mut self, other: &Bitset, op: impl Fn(u8, u8) -> u8) -> &mut Self {
        debug_assert_eq!(self.len(), other.len());
        self.bytes_mut()
            .iter_mut()
            .zip(other.bytes())
            .for_each(|(a, &b)| *a = op(*a, b));
        self.set_count();
        self
    }
}

/// Writes `new` into `slot` under `valid & mask`, leaving the other bits of
/// `slot` untouched, and returns the number of set bits written.
#[inline]
pub(crate) fn merge_byte(slot: &mut u8, new: u8, valid: u8, mask: Option<u8>) -> usize {
    let m = valid & mask.unwrap_or(0xFF);
    *slot = (*slot & !m) | (new & m);
    (new & m).count_ones() as usize
}
