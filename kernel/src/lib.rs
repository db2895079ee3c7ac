//! # kernel
//!
//! Complex arithmetic over an interchangeable scalar representation, with a
//! Q14 fixed-point representation tuned for butterfly-style signal processing,
//! and an owned buffer whose element view starts on a power-of-two boundary.
//!
//! ## Layout
//!
//! - [`Complex`] -- value type `(re, im)` generic over a [`ScalarArithmetic`] policy.
//! - [`ScalarArithmetic`] -- per-representation arithmetic, implemented for
//!   [`f32`], [`f64`] and [`Q14`].
//! - [`Q14`] -- signed 16-bit integer with 14 fractional bits (`16384 == 1.0`).
//! - [`AlignedBuffer`] -- fixed-size owned storage aligned to `2^align_log` bytes.
//!
//! ## Numerical contract
//!
//! No operation checks for overflow, division by zero or degenerate inputs.
//! Failures surface as numeric values, never as errors:
//!
//! - dividing by a zero scalar yields `inf`/`NaN` for floats and saturates to
//!   `i16::MAX` for [`Q14`];
//! - [`Complex::normalized`] and [`Complex::angle`] of a zero value divide by a
//!   zero norm;
//! - [`Q14`] multiplication, negation and shifts wrap silently on overflow.
//!
//! [`Q14`] addition and subtraction are **not** plain addition: both operands
//! are halved before they are combined, `(a >> 1) + (b >> 1)`. This bounds the
//! growth of intermediate values across repeated butterfly stages at the cost
//! of one bit of precision per operation. Porting code that expects ordinary
//! sums onto [`Complex<Q14>`] changes its results by a factor of two per add.
//!
//! The only memory-unsafe surface is [`AlignedBuffer::get_unchecked`] and
//! [`AlignedBuffer::get_unchecked_mut`]; indexing through the safe API panics
//! out of bounds.

pub mod buffer;
pub mod complex;
pub mod fixed;
pub mod scalar;

pub use buffer::*;
pub use complex::*;
pub use fixed::*;
pub use scalar::*;

/// Returns `true` if `ptr` is a multiple of `align` bytes.
pub fn is_aligned<T>(ptr: *const T, align: usize) -> bool {
    (ptr as usize).is_multiple_of(align)
}
