//! Algorithms over ascending slices.
//!
//! Every function assumes its input is sorted ascending (and, where noted,
//! free of duplicates). Order is established by the caller, usually through
//! [`unique`]; it is checked only by debug assertions.
use crate::wide_int::WideInt;

/// Ordered element of a sorted array.
pub trait SortKey: Ord + Clone {
    /// `self - base` as an index when both are integers and the distance
    /// fits in `usize`. `None` disables the dense fast path.
    #[inline]
    fn dense_offset(&self, _base: &Self) -> Option<usize> {
        None
    }
}

macro_rules! impl_sort_key_int {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(
            impl SortKey for $t {
                #[inline]
                fn dense_offset(&self, base: &Self) -> Option<usize> {
                    usize::try_from((*self as $u).wrapping_sub(*base as $u)).ok()
                }
            }
        )*
    };
}

impl_sort_key_int!(
    i8 => u8, i16 => u16, i32 => u32, i64 => u64,
    u8 => u8, u16 => u16, u32 => u32, u64 => u64,
);

impl<const W: usize> SortKey for WideInt<W> {
    fn dense_offset(&self, base: &Self) -> Option<usize> {
        let d = self.wrapping_sub(*base).to_words();
        if d[..W - 1].iter().any(|&w| w != 0) {
            return None;
        }
        usize::try_from(d[W - 1]).ok()
    }
}

impl SortKey for bool {}
impl SortKey for String {}
impl SortKey for Vec<u8> {}
impl SortKey for &str {}
impl SortKey for &[u8] {}

/// Position of the first element `>= v`.
#[inline]
fn lower_bound<T: Ord>(arr: &[T], v: &T) -> usize {
    arr.partition_point(|x| x < v)
}

/// True when `arr[last] - arr[0] == len - 1`, i.e. a unique-sorted integer
/// run without gaps.
#[inline]
fn is_dense<T: SortKey>(arr: &[T]) -> bool {
    match (arr.first(), arr.last()) {
        (Some(first), Some(last)) => last.dense_offset(first) == Some(arr.len() - 1),
        _ => false,
    }
}

/// Membership test on a unique-sorted slice.
pub fn contains<T: SortKey>(arr: &[T], v: &T) -> bool {
    index(arr, v, 0).is_some()
}

/// Index of `v` in `arr[start..]`, as an absolute position. Meant for
/// repeated probes with an advancing cursor.
pub fn index<T: SortKey>(arr: &[T], v: &T, start: usize) -> Option<usize> {
    let tail = arr.get(start..)?;
    debug_assert!(tail.is_sorted());
    let (first, last) = (tail.first()?, tail.last()?);
    if v < first || v > last {
        return None;
    }
    if is_dense(tail) {
        let i = v.dense_offset(first)?;
        return (tail[i] == *v).then_some(start + i);
    }
    let i = lower_bound(tail, v);
    (i < tail.len() && tail[i] == *v).then_some(start + i)
}

/// Smallest and largest element in one pass; works on unsorted input too.
pub fn min_max<T: Ord + Clone>(arr: &[T]) -> Option<(T, T)> {
    match arr {
        [] => None,
        [x] => Some((x.clone(), x.clone())),
        [a, b, rest @ ..] => {
            let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
            for x in rest {
                if x < lo {
                    lo = x;
                } else if x > hi {
                    hi = x;
                }
            }
            Some((lo.clone(), hi.clone()))
        }
    }
}

/// True when some element lies in `[from, to]`. An empty interval
/// (`from > to`) contains nothing.
pub fn contains_range<T: Ord>(arr: &[T], from: &T, to: &T) -> bool {
    debug_assert!(arr.is_sorted());
    let (Some(first), Some(last)) = (arr.first(), arr.last()) else {
        return false;
    };
    if from > to || to < first || from > last {
        return false;
    }
    // An endpoint on the first or last element is itself a hit.
    if from == first || from == last || to == first || to == last {
        return true;
    }
    let lo = lower_bound(arr, from);
    if lo == arr.len() {
        return false;
    }
    let hi = lo + arr[lo..].partition_point(|x| x <= to);
    hi > lo
}

/// Sorted, duplicate-free intersection of two ascending slices, written into
/// `out` (cleared first) and returned.
pub fn intersect<T: Ord + Clone>(x: &[T], y: &[T], mut out: Vec<T>) -> Vec<T> {
    debug_assert!(x.is_sorted() && y.is_sorted());
    out.clear();
    let (mut i, mut j) = (0, 0);
    while i < x.len() && j < y.len() {
        if x[i] < y[j] {
            i += 1;
        } else if x[i] > y[j] {
            j += 1;
        } else {
            if out.last() != Some(&x[i]) {
                out.push(x[i].clone());
            }
            i += 1;
            j += 1;
        }
    }
    out
}

/// Sorted, duplicate-free union of two ascending slices.
pub fn union<T: Ord + Clone>(x: &[T], y: &[T]) -> Vec<T> {
    debug_assert!(x.is_sorted() && y.is_sorted());
    let mut out: Vec<T> = Vec::with_capacity(x.len() + y.len());
    let mut push = |v: &T| {
        if out.last() != Some(v) {
            out.push(v.clone());
        }
    };
    let (mut i, mut j) = (0, 0);
    while i < x.len() && j < y.len() {
        if x[i] <= y[j] {
            push(&x[i]);
            i += 1;
        } else {
            push(&y[j]);
            j += 1;
        }
    }
    x[i..].iter().chain(&y[j..]).for_each(&mut push);
    out
}

/// Ascending, duplicate-free copy of `arr`. The input is left untouched.
pub fn unique<T: Ord + Clone>(arr: &[T]) -> Vec<T> {
    let mut out = arr.to_vec();
    if !out.is_sorted() {
        out.sort_unstable();
    }
    out.dedup();
    out
}
