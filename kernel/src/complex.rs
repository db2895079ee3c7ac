use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Shr, Sub, SubAssign};

use crate::{Q14, ScalarArithmetic};

/// Complex value `re + i*im` over the scalar representation `R`.
///
/// Every operation goes through `R`'s [`ScalarArithmetic`] policy, so the
/// meaning of the operators follows the representation:
///
/// | op | `f32` / `f64` | [`Q14`] |
/// |----|---------------|---------|
/// | `a + b`, `a - b` | componentwise | componentwise on halved operands |
/// | `a * b` | complex product | complex product, `>> 14` after each cross-term sum |
/// | `a >> s` | `a * 0.5^s` | arithmetic shift of both components |
///
/// Equality is exact and componentwise, which is only meaningful for [`Q14`]
/// or for floats produced by identical computations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Complex<R> {
    pub re: R,
    pub im: R,
}

impl<R: ScalarArithmetic> Complex<R> {
    pub fn new(re: R, im: R) -> Self {
        Self { re, im }
    }

    pub fn from_real(re: R) -> Self {
        Self::new(re, R::scalar_zero())
    }

    pub fn zero() -> Self {
        Self::new(R::scalar_zero(), R::scalar_zero())
    }

    /// Unit-magnitude value at angle `phase` (radians).
    pub fn unit(phase: f64) -> Self {
        let (re, im) = R::scalar_unit(phase);
        Self::new(re, im)
    }

    pub fn re(&self) -> R {
        self.re
    }

    pub fn im(&self) -> R {
        self.im
    }

    pub fn conj(&self) -> Self {
        Self::new(self.re, R::scalar_neg(self.im))
    }

    /// Multiplies both components by the scalar `c`.
    pub fn scale(&self, c: R) -> Self {
        Self::new(R::scalar_mul(c, self.re), R::scalar_mul(c, self.im))
    }

    /// Squared magnitude. For floats this is the real part of
    /// `self * self.conj()`; for [`Q14`] it is in half scale (see
    /// [`ScalarArithmetic::scalar_norm_sqr`]).
    pub fn norm_sqr(&self) -> R {
        R::scalar_norm_sqr(self.re, self.im)
    }

    pub fn norm(&self) -> R {
        R::scalar_norm(self.norm_sqr())
    }

    /// `self / self.norm()`. Not defined for a zero value: floats yield `NaN`
    /// components, [`Q14`] yields garbage.
    pub fn normalized(&self) -> Self {
        *self / self.norm()
    }

    /// Argument in radians, in `(-pi, pi]`, computed on the normalized value.
    pub fn angle(&self) -> f64 {
        let n: Self = self.normalized();
        R::scalar_to_f64(n.im).atan2(R::scalar_to_f64(n.re))
    }
}

impl Complex<Q14> {
    /// Quantizes a floating complex value to Q14.
    pub fn from_f64(re: f64, im: f64) -> Self {
        Self::new(Q14::from_f64(re), Q14::from_f64(im))
    }

    pub fn to_f64(&self) -> Complex<f64> {
        Complex::new(self.re.to_f64(), self.im.to_f64())
    }
}

impl<R: ScalarArithmetic> From<R> for Complex<R> {
    fn from(re: R) -> Self {
        Self::from_real(re)
    }
}

impl<R: ScalarArithmetic> Add for Complex<R> {
    type Output = Self;

    /// For [`Q14`] this is the butterfly-scaled sum `(a >> 1) + (b >> 1)`.
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        Self::new(R::scalar_add(self.re, rhs.re), R::scalar_add(self.im, rhs.im))
    }
}

impl<R: ScalarArithmetic> Sub for Complex<R> {
    type Output = Self;

    /// For [`Q14`] this is the butterfly-scaled difference `(a >> 1) - (b >> 1)`.
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self::new(R::scalar_sub(self.re, rhs.re), R::scalar_sub(self.im, rhs.im))
    }
}

impl<R: ScalarArithmetic> AddAssign for Complex<R> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl<R: ScalarArithmetic> SubAssign for Complex<R> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs
    }
}

impl<R: ScalarArithmetic> Mul for Complex<R> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        let (re, im) = R::scalar_complex_mul(self.re, self.im, rhs.re, rhs.im);
        Self::new(re, im)
    }
}

impl<R: ScalarArithmetic> Mul<R> for Complex<R> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: R) -> Self {
        self.scale(rhs)
    }
}

macro_rules! impl_scalar_mul_complex {
    ($t:ty) => {
        impl Mul<Complex<$t>> for $t {
            type Output = Complex<$t>;

            #[inline(always)]
            fn mul(self, rhs: Complex<$t>) -> Complex<$t> {
                rhs.scale(self)
            }
        }
    };
}

impl_scalar_mul_complex!(f32);
impl_scalar_mul_complex!(f64);
impl_scalar_mul_complex!(Q14);

impl<R: ScalarArithmetic> Div<R> for Complex<R> {
    type Output = Self;

    /// `(1 / rhs) * self`; a zero `rhs` is not checked.
    #[inline(always)]
    fn div(self, rhs: R) -> Self {
        self.scale(R::scalar_recip(rhs))
    }
}

impl<R: ScalarArithmetic> Shr<u32> for Complex<R> {
    type Output = Self;

    #[inline(always)]
    fn shr(self, shift: u32) -> Self {
        Self::new(R::scalar_shr(self.re, shift), R::scalar_shr(self.im, shift))
    }
}

impl<R: fmt::Display> fmt::Display for Complex<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.re, self.im)
    }
}
