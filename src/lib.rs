pub mod bitset;
pub mod dispatch;
pub mod kernels;
pub mod predicate;
pub mod prelude;
pub mod scan;
pub mod sorted;
pub mod wide_int;

mod wide_convert;
mod wide_div;
mod wide_text;

pub use crate::wide_convert::Accuracy;
pub use crate::wide_text::InvalidNumber;
