//! Run-time choice between block kernels and the scalar evaluator.
//!
//! CPU features are probed once. Each accelerated element type then gets one
//! memoised [`Dispatch`] holding the widest kernel the CPU supports, or none.
//! A column is split into a head of whole blocks, run through the kernel,
//! and a tail evaluated by the scalar path into the same output buffer.
use std::fmt;
use std::sync::OnceLock;

use crate::bitset::merge_byte;
use crate::kernels::{BLOCK_512, LaneCompare};
use crate::predicate::Predicate;
use crate::scan::Scan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    pub avx2: bool,
    pub avx512: bool,
}

impl CpuFeatures {
    pub const fn none() -> Self {
        Self {
            avx2: false,
            avx512: false,
        }
    }

    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        let features = Self {
            avx2: std::is_x86_feature_detected!("avx2"),
            avx512: std::is_x86_feature_detected!("avx512f")
                && std::is_x86_feature_detected!("avx512bw"),
        };
        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        let features = Self::none();

        log::trace!("detected cpu features: {features:?}");
        features
    }

    /// Features of the running CPU, probed on first use.
    pub fn get() -> Self {
        static FEATURES: OnceLock<CpuFeatures> = OnceLock::new();
        *FEATURES.get_or_init(Self::detect)
    }
}

pub fn has_avx2() -> bool {
    CpuFeatures::get().avx2
}

pub fn has_avx512() -> bool {
    CpuFeatures::get().avx512
}

/// Evaluates exactly one block into `block / 8` bytes and returns the match
/// count. Must not touch bytes outside its output slice.
pub type BlockKernel<T> = fn(&[T], &Predicate<T>, &mut [u8]) -> usize;

pub struct Kernel<T> {
    pub run: BlockKernel<T>,
    pub block_size: usize,
}

impl<T> Clone for Kernel<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Kernel<T> {}

/// Kernels available for one element type.
pub struct KernelSet<T> {
    pub avx512: Option<Kernel<T>>,
    pub avx2: Option<Kernel<T>>,
}

impl<T> KernelSet<T> {
    pub const fn empty() -> Self {
        Self {
            avx512: None,
            avx2: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Avx512,
    Avx2,
    Scalar,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Avx512 => "avx512",
            Strategy::Avx2 => "avx2",
            Strategy::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

pub struct Dispatch<T> {
    strategy: Strategy,
    kernel: Option<Kernel<T>>,
}

impl<T: Scan> Dispatch<T> {
    /// Picks the widest kernel both registered in `set` and supported by
    /// `features`.
    pub fn select(features: CpuFeatures, set: KernelSet<T>) -> Self {
        let (strategy, kernel) = match (set.avx512, set.avx2) {
            (Some(k), _) if features.avx512 => (Strategy::Avx512, Some(k)),
            (_, Some(k)) if features.avx2 => (Strategy::Avx2, Some(k)),
            _ => (Strategy::Scalar, None),
        };
        if let Some(k) = &kernel {
            assert!(
                k.block_size.is_power_of_two() && (8..=BLOCK_512).contains(&k.block_size),
                "block size {} must be a power of two in 8..={BLOCK_512}",
                k.block_size
            );
        }
        log::debug!(
            "predicate evaluation for {} uses {strategy}",
            std::any::type_name::<T>()
        );
        Self { strategy, kernel }
    }

    pub fn scalar() -> Self {
        Self {
            strategy: Strategy::Scalar,
            kernel: None,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Rows per kernel call, 1 for the scalar path.
    pub fn block_size(&self) -> usize {
        self.kernel.map_or(1, |k| k.block_size)
    }

    /// Evaluates `pred` over `column`, same contract as [`Scan::scan`].
    pub fn evaluate(
        &self,
        column: &[T],
        pred: &Predicate<T>,
        out: &mut [u8],
        mask: Option<&[u8]>,
    ) -> usize {
        let Some(kernel) = self.kernel else {
            return T::scan(column, pred, out, mask);
        };
        let n = column.len();
        let block = kernel.block_size;
        let block_bytes = block / 8;
        let head_len = n & !(block - 1);
        let head_bytes = head_len / 8;
        debug_assert!(out.len() >= n.div_ceil(8));

        let mut count = 0;
        let mut scratch = [0u8; BLOCK_512 / 8];
        for (i, rows) in column[..head_len].chunks_exact(block).enumerate() {
            let bytes = i * block_bytes..(i + 1) * block_bytes;
            match mask {
                None => count += (kernel.run)(rows, pred, &mut out[bytes]),
                Some(m) => {
                    let tmp = &mut scratch[..block_bytes];
                    (kernel.run)(rows, pred, tmp);
                    for ((slot, &new), &mb) in out[bytes.clone()].iter_mut().zip(&*tmp).zip(&m[bytes]) {
                        count += merge_byte(slot, new, 0xFF, Some(mb));
                    }
                }
            }
        }
        if head_len < n {
            count += T::scan(
                &column[head_len..],
                pred,
                &mut out[head_bytes..],
                mask.map(|m| &m[head_bytes..]),
            );
        }
        count
    }
}

/// Element types with block kernels and a memoised dispatch table.
pub trait Accelerated: Scan + LaneCompare + 'static {
    fn dispatch() -> &'static Dispatch<Self>;
}

#[cfg(feature = "simd")]
fn registered_kernels<T: LaneCompare>() -> KernelSet<T> {
    crate::kernels::kernel_set::<T>()
}

#[cfg(not(feature = "simd"))]
fn registered_kernels<T: LaneCompare>() -> KernelSet<T> {
    KernelSet::empty()
}

macro_rules! impl_accelerated {
    ($($t:ty),*) => {
        $(
            impl Accelerated for $t {
                fn dispatch() -> &'static Dispatch<Self> {
                    static DISPATCH: OnceLock<Dispatch<$t>> = OnceLock::new();
                    DISPATCH.get_or_init(|| Dispatch::select(CpuFeatures::get(), registered_kernels::<$t>()))
                }
            }
        )*
    };
}

impl_accelerated!(i32, u32, i64, u64);
