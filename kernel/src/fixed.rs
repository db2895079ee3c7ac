use std::fmt;

use crate::ScalarArithmetic;

/// Rescale constant of [`Q14`] magnitudes.
///
/// [`ScalarArithmetic::scalar_norm_sqr`] for [`Q14`] lands in half scale
/// (`1.0 == 8192`), and `32768 * sqrt(sq / 32768)` maps it back to Q14.
pub const NORM_RESCALE: f64 = 32768.0;

/// `1.0 / x` in Q14 is `2^28 / x`.
const RECIP_NUMERATOR: f64 = (1u32 << (2 * Q14::FRAC_BITS)) as f64;

/// Fixed-point scalar with 14 fractional bits stored in an [`i16`].
///
/// The raw integer `v` stands for `v / 16384`, so the representable range is
/// `[-2.0, 2.0)`. Arithmetic through [`ScalarArithmetic`]:
///
/// - products are computed in [`i32`] and shifted right by 14 (truncating
///   toward negative infinity);
/// - sums and differences halve both operands first:
///   `(a >> 1) + (b >> 1)`, i.e. the result is `(a + b) / 2` with the low bit
///   of each operand discarded;
/// - shifts are literal arithmetic shifts of the raw integer;
/// - overflow wraps silently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Q14(pub i16);

impl Q14 {
    pub const FRAC_BITS: u32 = 14;
    pub const SCALE: f64 = (1 << Self::FRAC_BITS) as f64;
    pub const ZERO: Q14 = Q14(0);
    pub const ONE: Q14 = Q14(1 << Self::FRAC_BITS);

    /// Rounds `x * 16384` to the nearest integer. Values outside `[-2.0, 2.0)`
    /// saturate to the [`i16`] bounds.
    pub fn from_f64(x: f64) -> Self {
        Q14((x * Self::SCALE).round() as i16)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE
    }

    pub fn raw(self) -> i16 {
        self.0
    }
}

impl From<i16> for Q14 {
    fn from(raw: i16) -> Self {
        Q14(raw)
    }
}

impl fmt::Display for Q14 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ScalarArithmetic for Q14 {
    #[inline(always)]
    fn scalar_zero() -> Self {
        Q14::ZERO
    }

    #[inline(always)]
    fn scalar_unit(phase: f64) -> (Self, Self) {
        (Q14::from_f64(phase.cos()), Q14::from_f64(phase.sin()))
    }

    /// Butterfly-scaled addition: `(a >> 1) + (b >> 1)`.
    #[inline(always)]
    fn scalar_add(a: Self, b: Self) -> Self {
        // halves lie in [-2^14, 2^14 - 1], their sum fits in i16
        Q14((a.0 >> 1) + (b.0 >> 1))
    }

    /// Butterfly-scaled subtraction: `(a >> 1) - (b >> 1)`.
    #[inline(always)]
    fn scalar_sub(a: Self, b: Self) -> Self {
        Q14((a.0 >> 1) - (b.0 >> 1))
    }

    #[inline(always)]
    fn scalar_neg(a: Self) -> Self {
        Q14(a.0.wrapping_neg())
    }

    #[inline(always)]
    fn scalar_mul(a: Self, b: Self) -> Self {
        Q14(((a.0 as i32 * b.0 as i32) >> Q14::FRAC_BITS) as i16)
    }

    /// Arithmetic shift of the raw integer. Shifts of 15 or more leave only
    /// the sign: `0` or `-1`.
    #[inline(always)]
    fn scalar_shr(a: Self, shift: u32) -> Self {
        Q14(a.0 >> shift.min(i16::BITS - 1))
    }

    /// `2^28 / a` evaluated in [`f64`]: a zero or tiny divisor saturates to
    /// `i16::MAX` (or `i16::MIN`) rather than trapping.
    #[inline(always)]
    fn scalar_recip(a: Self) -> Self {
        Q14((RECIP_NUMERATOR / a.0 as f64) as i16)
    }

    /// Cross terms are accumulated in [`i32`] and rescaled once per component.
    #[inline(always)]
    fn scalar_complex_mul(ar: Self, ai: Self, br: Self, bi: Self) -> (Self, Self) {
        let (ar, ai, br, bi) = (ar.0 as i32, ai.0 as i32, br.0 as i32, bi.0 as i32);
        let re: i32 = (ar * br).wrapping_sub(ai * bi) >> Q14::FRAC_BITS;
        let im: i32 = (ar * bi).wrapping_add(ai * br) >> Q14::FRAC_BITS;
        (Q14(re as i16), Q14(im as i16))
    }

    /// Scaled sum of the two Q14 squares, `(re^2 >> 15) + (im^2 >> 15)`.
    /// The result is in half scale: a unit vector gives `8192`.
    #[inline(always)]
    fn scalar_norm_sqr(re: Self, im: Self) -> Self {
        let (re, im) = (re.0 as i32, im.0 as i32);
        let shift: u32 = Q14::FRAC_BITS + 1;
        Q14(((re * re >> shift) + (im * im >> shift)) as i16)
    }

    #[inline(always)]
    fn scalar_norm(norm_sqr: Self) -> Self {
        Q14((NORM_RESCALE * (norm_sqr.0 as f64 / NORM_RESCALE).sqrt()).round() as i16)
    }

    #[inline(always)]
    fn scalar_to_f64(a: Self) -> f64 {
        a.to_f64()
    }
}
