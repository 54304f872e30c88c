//! Block kernels for 32- and 64-bit integer columns.
//!
//! Each kernel compares one fixed-size block of rows using `wide` lanes and
//! writes exactly `block / 8` MSB-first output bytes. Two block sizes are
//! provided: 32 rows for 256-bit registers and 64 rows for 512-bit ones.
//! Unsigned columns are compared as signed after flipping the sign bit.

use wide::*;

use crate::dispatch::{Kernel, KernelSet};
use crate::predicate::Predicate;

pub const BLOCK_256: usize = 32;
pub const BLOCK_512: usize = 64;

/// One 8-row chunk of 64-bit lanes, as two `i64x4` halves.
type Halves = [i64x4; 2];

#[inline]
fn halves(chunk: &[i64]) -> Halves {
    debug_assert_eq!(chunk.len(), 8);
    [i64x4::from(&chunk[..4]), i64x4::from(&chunk[4..])]
}

/// Compares both halves against `x`; the low half fills bits 0..4.
#[inline]
fn bits64(v: &Halves, x: i64, cmp: impl Fn(i64x4, i64x4) -> i64x4) -> u8 {
    let x = i64x4::splat(x);
    let low = cmp(v[0], x).move_mask() as u8;
    let high = cmp(v[1], x).move_mask() as u8;
    low | (high << 4)
}

/// Lane `j` of the result is bit `j` (LSB-first).
#[inline]
fn lanes_to_bits(lanes: [i32; 8]) -> u8 {
    lanes
        .iter()
        .enumerate()
        .fold(0u8, |bits, (j, &l)| bits | (((l != 0) as u8) << j))
}

#[inline]
fn ordered<T: Ord>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Element types with an 8-row lane comparison.
pub trait LaneCompare: Copy + Ord {
    /// Compares 8 rows; lane `j` of the result is bit `j` (LSB-first).
    fn mask8(chunk: &[Self], pred: &Predicate<Self>) -> u8;
}

#[inline]
fn mask8_i64(v: Halves, pred: &Predicate<i64>) -> u8 {
    let eq = |a: i64x4, b: i64x4| a.cmp_eq(b);
    let lt = |a: i64x4, b: i64x4| a.cmp_lt(b);
    let gt = |a: i64x4, b: i64x4| a.cmp_gt(b);
    match *pred {
        Predicate::Eq(x) => bits64(&v, x, eq),
        Predicate::Neq(x) => !bits64(&v, x, eq),
        Predicate::Lt(x) => bits64(&v, x, lt),
        Predicate::Lte(x) => !bits64(&v, x, gt),
        Predicate::Gt(x) => bits64(&v, x, gt),
        Predicate::Gte(x) => !bits64(&v, x, lt),
        Predicate::Between(a, b) => {
            let (a, b) = ordered(a, b);
            !(bits64(&v, a, lt) | bits64(&v, b, gt))
        }
    }
}

#[inline]
fn mask8_i32(v: i32x8, pred: &Predicate<i32>) -> u8 {
    match *pred {
        Predicate::Eq(x) => lanes_to_bits(v.cmp_eq(i32x8::splat(x)).to_array()),
        Predicate::Neq(x) => !lanes_to_bits(v.cmp_eq(i32x8::splat(x)).to_array()),
        Predicate::Lt(x) => lanes_to_bits(v.cmp_lt(i32x8::splat(x)).to_array()),
        Predicate::Lte(x) => !lanes_to_bits(v.cmp_gt(i32x8::splat(x)).to_array()),
        Predicate::Gt(x) => lanes_to_bits(v.cmp_gt(i32x8::splat(x)).to_array()),
        Predicate::Gte(x) => !lanes_to_bits(v.cmp_lt(i32x8::splat(x)).to_array()),
        Predicate::Between(a, b) => {
            let (a, b) = ordered(a, b);
            let below = lanes_to_bits(v.cmp_lt(i32x8::splat(a)).to_array());
            let above = lanes_to_bits(v.cmp_gt(i32x8::splat(b)).to_array());
            !(below | above)
        }
    }
}

#[inline]
fn flip64(x: u64) -> i64 {
    (x ^ (1 << 63)) as i64
}

#[inline]
fn flip32(x: u32) -> i32 {
    (x ^ (1 << 31)) as i32
}

impl LaneCompare for i64 {
    #[inline]
    fn mask8(chunk: &[Self], pred: &Predicate<Self>) -> u8 {
        mask8_i64(halves(chunk), pred)
    }
}

impl LaneCompare for u64 {
    #[inline]
    fn mask8(chunk: &[Self], pred: &Predicate<Self>) -> u8 {
        let mut lanes = [0i64; 8];
        lanes.iter_mut().zip(chunk).for_each(|(l, &x)| *l = flip64(x));
        mask8_i64(halves(&lanes), &pred.map(flip64))
    }
}

impl LaneCompare for i32 {
    #[inline]
    fn mask8(chunk: &[Self], pred: &Predicate<Self>) -> u8 {
        let mut lanes = [0i32; 8];
        lanes.copy_from_slice(chunk);
        mask8_i32(i32x8::new(lanes), pred)
    }
}

impl LaneCompare for u32 {
    #[inline]
    fn mask8(chunk: &[Self], pred: &Predicate<Self>) -> u8 {
        let mut lanes = [0i32; 8];
        lanes.iter_mut().zip(chunk).for_each(|(l, &x)| *l = flip32(x));
        mask8_i32(i32x8::new(lanes), &pred.map(flip32))
    }
}

/// Evaluates exactly one block of `BLOCK` rows into `BLOCK / 8` bytes of
/// `out` and returns the number of matches.
pub fn block_kernel<T: LaneCompare, const BLOCK: usize>(
    block: &[T],
    pred: &Predicate<T>,
    out: &mut [u8],
) -> usize {
    debug_assert_eq!(block.len(), BLOCK);
    debug_assert_eq!(out.len(), BLOCK / 8);
    let mut count = 0;
    for (chunk, slot) in block.chunks_exact(8).zip(out.iter_mut()) {
        // lanes are LSB-first, output bytes are MSB-first
        let byte = T::mask8(chunk, pred).reverse_bits();
        *slot = byte;
        count += byte.count_ones() as usize;
    }
    count
}

/// Both block kernels for `T`.
pub fn kernel_set<T: LaneCompare>() -> KernelSet<T> {
    KernelSet {
        avx512: Some(Kernel {
            run: block_kernel::<T, BLOCK_512>,
            block_size: BLOCK_512,
        }),
        avx2: Some(Kernel {
            run: block_kernel::<T, BLOCK_256>,
            block_size: BLOCK_256,
        }),
    }
}
