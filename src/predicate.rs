//! Predicates evaluated against a column.
//!
//! A predicate is a comparison kind plus one operand, or an inclusive
//! `Between` range with two. Build them directly or with the small helper
//! functions:
//!
//! ```rust
//! use colfilter::predicate::{Predicate, between, lt};
//!
//! let p: Predicate<i64> = lt(40);
//! let r = between(10i64, 20);
//! assert_eq!(r, Predicate::Between(10, 20));
//! ```

/// Comparison kind of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Between,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<T> {
    Eq(T),
    Neq(T),
    Lt(T),
    Lte(T),
    Gt(T),
    Gte(T),
    /// Inclusive on both ends.
    Between(T, T),
}

pub fn eq<T>(v: T) -> Predicate<T> {
    Predicate::Eq(v)
}
pub fn neq<T>(v: T) -> Predicate<T> {
    Predicate::Neq(v)
}
pub fn lt<T>(v: T) -> Predicate<T> {
    Predicate::Lt(v)
}
pub fn lte<T>(v: T) -> Predicate<T> {
    Predicate::Lte(v)
}
pub fn gt<T>(v: T) -> Predicate<T> {
    Predicate::Gt(v)
}
pub fn gte<T>(v: T) -> Predicate<T> {
    Predicate::Gte(v)
}
pub fn between<T>(lo: T, hi: T) -> Predicate<T> {
    Predicate::Between(lo, hi)
}

impl<T> Predicate<T> {
    pub fn kind(&self) -> CmpOp {
        match self {
            Predicate::Eq(_) => CmpOp::Eq,
            Predicate::Neq(_) => CmpOp::Neq,
            Predicate::Lt(_) => CmpOp::Lt,
            Predicate::Lte(_) => CmpOp::Lte,
            Predicate::Gt(_) => CmpOp::Gt,
            Predicate::Gte(_) => CmpOp::Gte,
            Predicate::Between(..) => CmpOp::Between,
        }
    }

    /// Scalar test of a single value. Reference semantics for every scan.
    pub fn test<V>(&self, v: &V) -> bool
    where
        V: PartialOrd<T> + ?Sized,
    {
        match self {
            Predicate::Eq(x) => v == x,
            Predicate::Neq(x) => v != x,
            Predicate::Lt(x) => v < x,
            Predicate::Lte(x) => v <= x,
            Predicate::Gt(x) => v > x,
            Predicate::Gte(x) => v >= x,
            Predicate::Between(a, b) => v >= a && v <= b,
        }
    }
}

impl<T: Ord + Clone> Predicate<T> {
    /// Canonical form used by every evaluator: a reversed `Between` range is
    /// swapped into ascending order and a single-point range becomes `Eq`.
    pub fn normalized(&self) -> Predicate<T> {
        match self {
            Predicate::Between(a, b) if a == b => Predicate::Eq(a.clone()),
            Predicate::Between(a, b) if a > b => Predicate::Between(b.clone(), a.clone()),
            other => other.clone(),
        }
    }
}

impl<T: Copy> Predicate<T> {
    /// Applies `f` to every operand. `f` must be monotone for the mapped
    /// predicate to select the same rows.
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Predicate<U> {
        match *self {
            Predicate::Eq(x) => Predicate::Eq(f(x)),
            Predicate::Neq(x) => Predicate::Neq(f(x)),
            Predicate::Lt(x) => Predicate::Lt(f(x)),
            Predicate::Lte(x) => Predicate::Lte(f(x)),
            Predicate::Gt(x) => Predicate::Gt(f(x)),
            Predicate::Gte(x) => Predicate::Gte(f(x)),
            Predicate::Between(a, b) => Predicate::Between(f(a), f(b)),
        }
    }
}
