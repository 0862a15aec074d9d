use crate::TdError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Tolerance used when comparing polynomial values from adjacent intervals.
    ///
    /// The published coefficients carry 10 significant digits, so values at a
    /// shared boundary agree to roughly 1e-8 relative.
    pub const BOUNDARY: Tolerances = Tolerances {
        abs: 1e-9,
        rel: 1e-6,
    };
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TdError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TdError::NonFinite { what, value: v })
    }
}

/// Raise `base` to a tabulated exponent.
///
/// Exponents read from the database are stored as floats but are almost
/// always integral; `powi` keeps those exact and cheap.
#[inline]
pub fn pow_exponent(base: Real, exponent: Real) -> Real {
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as Real {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn boundary_tolerance_is_looser() {
        assert!(nearly_equal(3.6329636181, 3.6329636219, Tolerances::BOUNDARY));
        assert!(!nearly_equal(3.63, 3.64, Tolerances::BOUNDARY));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn pow_exponent_integral_and_fractional() {
        assert!((pow_exponent(10.0, -2.0) - 0.01).abs() < 1e-18);
        assert_eq!(pow_exponent(3.0, 0.0), 1.0);
        assert!((pow_exponent(4.0, 0.5) - 2.0).abs() < 1e-15);
    }

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn pow_exponent_matches_powf(t in 50.0f64..20000.0, e in -2i32..=4) {
            let expected = t.powf(e as f64);
            let actual = pow_exponent(t, e as f64);
            prop_assert!(nearly_equal(expected, actual, Tolerances::default()));
        }
    }
}
