//! Scalar predicate evaluation: compare a column against a predicate and
//! write one MSB-first bit per row.
//!
//! One generic loop ([`scan_with`]) serves every element type; the per-type
//! [`Scan`] impls only pick the comparison closure. Accelerated types route
//! through [`crate::dispatch`] first, which falls back here for the tail.
use crate::bitset::{Bitset, merge_byte};
use crate::dispatch::Accelerated;
use crate::predicate::Predicate;
use crate::sorted::{SortKey, contains};
use crate::wide_int::WideInt;

/// Element types a column can hold.
pub trait Scan: Sized {
    /// Scalar evaluation into packed bytes. `out` must hold at least
    /// `ceil(column.len() / 8)` bytes, and so must `mask` when present.
    /// Returns the number of rows that are in the mask and match.
    fn scan(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize;

    /// Evaluation through the best kernel available for this type.
    #[inline]
    fn scan_dispatched(
        column: &[Self],
        pred: &Predicate<Self>,
        out: &mut [u8],
        mask: Option<&[u8]>,
    ) -> usize {
        Self::scan(column, pred, out, mask)
    }
}

/// Ordered fixed-width values with wrapping subtraction, which lets
/// `Between(a, b)` test `a <= v <= b` as one unsigned compare:
/// `(v - a) <=u (b - a)`.
pub trait Numeric: Copy + Ord {
    type Offset: Copy + Ord;

    /// `self - base` with wraparound, reinterpreted as unsigned.
    fn wrapping_offset(self, base: Self) -> Self::Offset;
}

macro_rules! impl_numeric {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                type Offset = $u;
                #[inline]
                fn wrapping_offset(self, base: Self) -> $u {
                    (self as $u).wrapping_sub(base as $u)
                }
            }
        )*
    };
}

impl_numeric!(
    i8 => u8, i16 => u16, i32 => u32, i64 => u64,
    u8 => u8, u16 => u16, u32 => u32, u64 => u64,
);

impl<const W: usize> Numeric for WideInt<W> {
    // big-endian words order lexicographically as an unsigned integer
    type Offset = [u64; W];

    #[inline]
    fn wrapping_offset(self, base: Self) -> [u64; W] {
        self.wrapping_sub(base).to_words()
    }
}

/// Runs `f` over every row and writes the results 8 rows per byte.
///
/// Rows whose mask bit is clear keep their previous output bit and are not
/// counted. Bits past the end of the column in the last byte are left as
/// they were.
pub(crate) fn scan_with<T>(
    column: &[T],
    out: &mut [u8],
    mask: Option<&[u8]>,
    f: impl Fn(&T) -> bool,
) -> usize {
    let n = column.len();
    debug_assert!(out.len() >= n.div_ceil(8));
    debug_assert!(mask.is_none_or(|m| m.len() >= n.div_ceil(8)));

    let mut count = 0;
    for (i, chunk) in column.chunks(8).enumerate() {
        let mut byte = 0u8;
        for (j, v) in chunk.iter().enumerate() {
            byte |= (f(v) as u8) << (7 - j);
        }
        let valid = (0xFF00u16 >> chunk.len()) as u8;
        count += merge_byte(&mut out[i], byte, valid, mask.map(|m| m[i]));
    }
    count
}

pub(crate) fn scan_numeric<T: Numeric>(
    column: &[T],
    pred: &Predicate<T>,
    out: &mut [u8],
    mask: Option<&[u8]>,
) -> usize {
    match *pred {
        Predicate::Eq(x) => scan_with(column, out, mask, |v| *v == x),
        Predicate::Neq(x) => scan_with(column, out, mask, |v| *v != x),
        Predicate::Lt(x) => scan_with(column, out, mask, |v| *v < x),
        Predicate::Lte(x) => scan_with(column, out, mask, |v| *v <= x),
        Predicate::Gt(x) => scan_with(column, out, mask, |v| *v > x),
        Predicate::Gte(x) => scan_with(column, out, mask, |v| *v >= x),
        Predicate::Between(a, b) => {
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            let width = b.wrapping_offset(a);
            scan_with(column, out, mask, |v| v.wrapping_offset(a) <= width)
        }
    }
}

macro_rules! impl_scan_scalar {
    ($($t:ty),*) => {
        $(
            impl Scan for $t {
                #[inline]
                fn scan(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize {
                    scan_numeric(column, pred, out, mask)
                }
            }
        )*
    };
}

macro_rules! impl_scan_accelerated {
    ($($t:ty),*) => {
        $(
            impl Scan for $t {
                #[inline]
                fn scan(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize {
                    scan_numeric(column, pred, out, mask)
                }

                #[inline]
                fn scan_dispatched(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize {
                    <$t as Accelerated>::dispatch().evaluate(column, pred, out, mask)
                }
            }
        )*
    };
}

impl_scan_scalar!(i8, i16, u8, u16);
impl_scan_accelerated!(i32, i64, u32, u64);

impl<const W: usize> Scan for WideInt<W> {
    #[inline]
    fn scan(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize {
        scan_numeric(column, pred, out, mask)
    }
}

// Two-valued domain: a predicate is fully described by whether it accepts
// `false` and whether it accepts `true`.
impl Scan for bool {
    fn scan(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize {
        let pred = pred.normalized();
        match (pred.test(&false), pred.test(&true)) {
            (false, false) => scan_with(column, out, mask, |_| false),
            (true, true) => scan_with(column, out, mask, |_| true),
            (false, true) => scan_with(column, out, mask, |v| *v),
            (true, false) => scan_with(column, out, mask, |v| !*v),
        }
    }
}

/// Byte-lexicographic comparison for string-like columns.
fn scan_bytes<S: AsRef<[u8]>>(
    column: &[S],
    pred: &Predicate<S>,
    out: &mut [u8],
    mask: Option<&[u8]>,
) -> usize {
    match pred {
        Predicate::Eq(x) => {
            let x = x.as_ref();
            scan_with(column, out, mask, |v| v.as_ref() == x)
        }
        Predicate::Neq(x) => {
            let x = x.as_ref();
            scan_with(column, out, mask, |v| v.as_ref() != x)
        }
        Predicate::Lt(x) => {
            let x = x.as_ref();
            scan_with(column, out, mask, |v| v.as_ref() < x)
        }
        Predicate::Lte(x) => {
            let x = x.as_ref();
            scan_with(column, out, mask, |v| v.as_ref() <= x)
        }
        Predicate::Gt(x) => {
            let x = x.as_ref();
            scan_with(column, out, mask, |v| v.as_ref() > x)
        }
        Predicate::Gte(x) => {
            let x = x.as_ref();
            scan_with(column, out, mask, |v| v.as_ref() >= x)
        }
        Predicate::Between(a, b) => {
            let (a, b) = (a.as_ref(), b.as_ref());
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            if a == b {
                scan_with(column, out, mask, |v| v.as_ref() == a)
            } else if a.is_empty() {
                // every string is >= ""
                scan_with(column, out, mask, |v| v.as_ref() <= b)
            } else {
                scan_with(column, out, mask, |v| {
                    let v = v.as_ref();
                    v >= a && v <= b
                })
            }
        }
    }
}

impl Scan for String {
    fn scan(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize {
        scan_bytes(column, pred, out, mask)
    }
}

impl Scan for Vec<u8> {
    fn scan(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize {
        scan_bytes(column, pred, out, mask)
    }
}

impl<'a> Scan for &'a str {
    fn scan(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize {
        scan_bytes(column, pred, out, mask)
    }
}

impl<'a> Scan for &'a [u8] {
    fn scan(column: &[Self], pred: &Predicate<Self>, out: &mut [u8], mask: Option<&[u8]>) -> usize {
        scan_bytes(column, pred, out, mask)
    }
}

/// Evaluates `pred` over `column` into `bits`, resized to the column length.
///
/// With a `mask`, only rows whose mask bit is set are evaluated; the other
/// output bits keep their previous value, so one `Bitset` can be narrowed by
/// successive predicates. Returns the number of rows that are in the mask and
/// match, which is also cached as `bits.count()`.
pub fn evaluate<T: Scan + Ord + Clone>(
    column: &[T],
    pred: &Predicate<T>,
    bits: &mut Bitset,
    mask: Option<&Bitset>,
) -> usize {
    bits.ensure_size(column.len());
    debug_assert!(mask.is_none_or(|m| m.len() >= column.len()));
    let count = evaluate_raw(column, pred, bits.bytes_mut(), mask.map(Bitset::bytes));
    bits.store_count(count);
    count
}

/// Byte-level form of [`evaluate`]. Writes at most `ceil(column.len() / 8)`
/// bytes of `out`.
pub fn evaluate_raw<T: Scan + Ord + Clone>(
    column: &[T],
    pred: &Predicate<T>,
    out: &mut [u8],
    mask: Option<&[u8]>,
) -> usize {
    if column.is_empty() {
        return 0;
    }
    T::scan_dispatched(column, &pred.normalized(), out, mask)
}

/// Marks rows whose value is in `set` (or not in it, with `negate`). `set`
/// must be unique-sorted.
pub fn evaluate_in<T: SortKey>(
    column: &[T],
    set: &[T],
    negate: bool,
    bits: &mut Bitset,
    mask: Option<&Bitset>,
) -> usize {
    debug_assert!(set.is_sorted());
    bits.ensure_size(column.len());
    let count = scan_with(column, bits.bytes_mut(), mask.map(Bitset::bytes), |v| {
        contains(set, v) != negate
    });
    bits.store_count(count);
    count
}
