//! Convenient re-exports for common types and functions
//!
//! Import everything you typically need with:
//! `use colfilter::prelude::*;`.

// Fixed-width integers
pub use crate::wide_int::{Int128, Int256, WideInt};
pub use crate::{Accuracy, InvalidNumber};

// Predicates and evaluation
pub use crate::bitset::Bitset;
pub use crate::predicate::*;
pub use crate::scan::{Scan, evaluate, evaluate_in, evaluate_raw};

// Kernel selection
pub use crate::dispatch::{Accelerated, CpuFeatures, Dispatch, Strategy, has_avx2, has_avx512};

// Sorted-array helpers
pub use crate::sorted::{SortKey, contains, contains_range, index, intersect, min_max, union, unique};
