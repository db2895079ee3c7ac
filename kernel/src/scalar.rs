use std::fmt::{Debug, Display};

use rand_distr::num_traits::{AsPrimitive, Float};

/// Arithmetic policy of a scalar representation.
///
/// [`crate::Complex`] only ever combines its components through this trait,
/// so a representation decides what "add" or "multiply" means for it. The
/// floating implementations are the textbook field operations. The
/// [`crate::Q14`] implementation rescales after products and halves both
/// operands of every sum.
///
/// None of the functions check their inputs; see the crate level numerical
/// contract.
pub trait ScalarArithmetic: Copy + PartialEq + Debug + Display {
    fn scalar_zero() -> Self;

    /// `(cos(phase), sin(phase))` in the natural scale of the representation.
    fn scalar_unit(phase: f64) -> (Self, Self);

    fn scalar_add(a: Self, b: Self) -> Self;
    fn scalar_sub(a: Self, b: Self) -> Self;
    fn scalar_neg(a: Self) -> Self;
    fn scalar_mul(a: Self, b: Self) -> Self;

    /// Divides `a` by `2^shift`.
    fn scalar_shr(a: Self, shift: u32) -> Self;

    fn scalar_recip(a: Self) -> Self;

    /// Complex product `(ar + i*ai) * (br + i*bi)`.
    fn scalar_complex_mul(ar: Self, ai: Self, br: Self, bi: Self) -> (Self, Self);

    /// Squared magnitude of `re + i*im`, in the scale [`Self::scalar_norm`] expects.
    fn scalar_norm_sqr(re: Self, im: Self) -> Self;

    /// Magnitude from a value returned by [`Self::scalar_norm_sqr`].
    fn scalar_norm(norm_sqr: Self) -> Self;

    fn scalar_to_f64(a: Self) -> f64;
}

#[inline(always)]
fn float_unit<R: Float + 'static>(phase: f64) -> (R, R)
where
    f64: AsPrimitive<R>,
{
    (phase.cos().as_(), phase.sin().as_())
}

#[inline(always)]
fn float_shr<R: Float>(a: R, shift: u32) -> R {
    let half: R = R::one() / (R::one() + R::one());
    // powi takes an i32; larger shifts already underflow to zero
    a * half.powi(shift.min(i32::MAX as u32) as i32)
}

macro_rules! impl_scalar_arithmetic_float {
    ($t:ty) => {
        impl ScalarArithmetic for $t {
            #[inline(always)]
            fn scalar_zero() -> Self {
                0.0
            }

            #[inline(always)]
            fn scalar_unit(phase: f64) -> (Self, Self) {
                float_unit::<$t>(phase)
            }

            #[inline(always)]
            fn scalar_add(a: Self, b: Self) -> Self {
                a + b
            }

            #[inline(always)]
            fn scalar_sub(a: Self, b: Self) -> Self {
                a - b
            }

            #[inline(always)]
            fn scalar_neg(a: Self) -> Self {
                -a
            }

            #[inline(always)]
            fn scalar_mul(a: Self, b: Self) -> Self {
                a * b
            }

            #[inline(always)]
            fn scalar_shr(a: Self, shift: u32) -> Self {
                float_shr::<$t>(a, shift)
            }

            #[inline(always)]
            fn scalar_recip(a: Self) -> Self {
                a.recip()
            }

            #[inline(always)]
            fn scalar_complex_mul(ar: Self, ai: Self, br: Self, bi: Self) -> (Self, Self) {
                (ar * br - ai * bi, ar * bi + ai * br)
            }

            #[inline(always)]
            fn scalar_norm_sqr(re: Self, im: Self) -> Self {
                re * re + im * im
            }

            #[inline(always)]
            fn scalar_norm(norm_sqr: Self) -> Self {
                norm_sqr.sqrt()
            }

            #[inline(always)]
            fn scalar_to_f64(a: Self) -> f64 {
                a as f64
            }
        }
    };
}

impl_scalar_arithmetic_float!(f32);
impl_scalar_arithmetic_float!(f64);
