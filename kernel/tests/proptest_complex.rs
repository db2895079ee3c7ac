use std::f64::consts::PI;

use kernel::{AlignedBuffer, Complex, Q14, is_aligned};
use proptest::prelude::*;

fn complex_f64(bound: f64) -> impl Strategy<Value = Complex<f64>> {
    (-bound..bound, -bound..bound).prop_map(|(re, im)| Complex::new(re, im))
}

fn complex_q14() -> impl Strategy<Value = Complex<Q14>> {
    (any::<i16>(), any::<i16>()).prop_map(|(re, im)| Complex::new(Q14(re), Q14(im)))
}

// Float addition is commutative bit for bit.
proptest! {
    #[test]
    fn prop_add_commutative(a in complex_f64(1e3), b in complex_f64(1e3)) {
        prop_assert_eq!(a + b, b + a);
    }
}

// Float addition is associative up to rounding.
proptest! {
    #[test]
    fn prop_add_associative(a in complex_f64(1e3), b in complex_f64(1e3), c in complex_f64(1e3)) {
        let lhs: Complex<f64> = (a + b) + c;
        let rhs: Complex<f64> = a + (b + c);
        prop_assert!((lhs.re - rhs.re).abs() < 1e-9, "{} != {}", lhs, rhs);
        prop_assert!((lhs.im - rhs.im).abs() < 1e-9, "{} != {}", lhs, rhs);
    }
}

// a * conj(a) is real and equals the squared norm.
proptest! {
    #[test]
    fn prop_mul_conj_is_norm_sqr(a in complex_f64(1e3)) {
        let p: Complex<f64> = a * a.conj();
        prop_assert_eq!(p.im, 0.0);
        prop_assert_eq!(p.re, a.norm_sqr());
    }
}

proptest! {
    #[test]
    fn prop_normalized_has_unit_norm(a in complex_f64(1e3)) {
        prop_assume!(a.norm() > 1e-3);
        prop_assert!((a.normalized().norm() - 1.0).abs() < 1e-12);
    }
}

proptest! {
    #[test]
    fn prop_angle_of_unit(phase in -PI..PI) {
        let angle: f64 = Complex::<f64>::unit(phase).angle();
        let diff: f64 = (angle - phase).abs();
        prop_assert!(diff < 1e-12 || (diff - 2.0 * PI).abs() < 1e-12, "angle={} phase={}", angle, phase);
    }
}

// Q14 sums are the halved exact sum, off by at most one LSB.
proptest! {
    #[test]
    fn prop_q14_add_is_half_sum(a in complex_q14(), b in complex_q14()) {
        let sum: Complex<Q14> = a + b;
        let diff: Complex<Q14> = a - b;
        let half_sum_re: f64 = (a.re.raw() as f64 + b.re.raw() as f64) / 2.0;
        let half_diff_im: f64 = (a.im.raw() as f64 - b.im.raw() as f64) / 2.0;
        prop_assert!((sum.re.raw() as f64 - half_sum_re).abs() <= 1.0);
        prop_assert!((diff.im.raw() as f64 - half_diff_im).abs() <= 1.0);
    }
}

// Q14 products track the exact product when the result stays in range.
proptest! {
    #[test]
    fn prop_q14_mul_tracks_f64(a in complex_f64(0.7), b in complex_f64(0.7)) {
        let qa: Complex<Q14> = Complex::from_f64(a.re, a.im);
        let qb: Complex<Q14> = Complex::from_f64(b.re, b.im);
        let exact: Complex<f64> = qa.to_f64() * qb.to_f64();
        let got: Complex<f64> = (qa * qb).to_f64();
        let lsb: f64 = 1.0 / Q14::SCALE;
        prop_assert!((got.re - exact.re).abs() <= lsb, "{} != {}", got, exact);
        prop_assert!((got.im - exact.im).abs() <= lsb, "{} != {}", got, exact);
    }
}

proptest! {
    #[test]
    fn prop_q14_shr_is_bit_shift(a in complex_q14(), shift in 0u32..16) {
        let s: Complex<Q14> = a >> shift;
        prop_assert_eq!(s.re.raw(), a.re.raw() >> shift);
        prop_assert_eq!(s.im.raw(), a.im.raw() >> shift);
    }
}

proptest! {
    #[test]
    fn prop_buffer_alignment_and_roundtrip(
        values in prop::collection::vec(complex_q14(), 1..512),
        align_log in 0u32..=7,
    ) {
        let mut buf: AlignedBuffer<Complex<Q14>> = AlignedBuffer::with_align_log(values.len(), align_log);
        prop_assert!(is_aligned(buf.as_ptr(), 1 << align_log));
        buf.as_mut_slice().copy_from_slice(&values);
        prop_assert_eq!(buf.as_slice(), values.as_slice());
    }
}
