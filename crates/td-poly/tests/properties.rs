//! Property evaluation against the sample database.
//!
//! Reference values come from the published polynomial fits; tolerances
//! cover rounding of the 10-digit coefficients only.

use proptest::prelude::*;
use td_core::numeric::{Tolerances, nearly_equal};
use td_core::units::k;
use td_inp::{Database, parse};
use td_poly::{EvalError, EvalMode, evaluate, evaluate_species};

const SAMPLE: &str = include_str!("../../td-inp/tests/data/thermo_sample.inp");

fn db() -> Database {
    parse(SAMPLE).unwrap()
}

#[test]
fn air_heat_capacity_at_300k() {
    let db = db();
    let air = db.lookup("Air").unwrap();
    let props = evaluate_species(air, k(300.0), EvalMode::Strict).unwrap();

    assert!((props.cp() - 29.104627).abs() < 1e-3, "cp = {}", props.cp());
    assert!(
        (props.cp_mass() - 1004.82).abs() < 1e-2,
        "cp = {} J/kg-K",
        props.cp_mass()
    );
    assert!(!props.extrapolated());
}

#[test]
fn reference_state_values() {
    let db = db();
    let t = k(298.15);

    let h2 = evaluate_species(db.lookup("H2").unwrap(), t, EvalMode::Strict).unwrap();
    assert!((h2.s() - 130.681).abs() < 1e-3);
    assert!((h2.cp() - 28.8363).abs() < 1e-3);
    // Reference elements have zero enthalpy at 298.15 K.
    assert!(h2.h().abs() < 0.01);

    let ar = evaluate_species(db.lookup("Ar").unwrap(), t, EvalMode::Strict).unwrap();
    assert!((ar.s() - 154.8467).abs() < 1e-3);
    assert!((ar.cp() - 2.5 * 8.314510).abs() < 1e-9);
}

#[test]
fn below_range_is_rejected_or_extrapolated() {
    let db = db();
    let air = db.lookup("Air").unwrap();

    match evaluate_species(air, k(150.0), EvalMode::Strict) {
        Err(EvalError::OutOfRange { t, min, max }) => {
            assert_eq!((t, min, max), (150.0, 200.0, 6000.0));
        }
        other => panic!("expected out of range, got {other:?}"),
    }

    let props = evaluate_species(air, k(150.0), EvalMode::Extrapolate).unwrap();
    assert!(props.extrapolated());
    assert!((props.cp() - 29.0678).abs() < 1e-2, "cp = {}", props.cp());
}

#[test]
fn species_without_polynomials() {
    let db = db();
    let rp1 = db.lookup("RP-1").unwrap();
    let err = evaluate_species(rp1, k(298.15), EvalMode::Strict).unwrap_err();
    assert!(matches!(err, EvalError::NoInterval { .. }));
    let err: td_core::TdError = err.into();
    assert!(matches!(err, td_core::TdError::NotFound { .. }));
}

#[test]
fn adjacent_intervals_agree_at_shared_bounds() {
    let db = db();
    for name in ["H2", "Ar", "Air", "JP-10(g)"] {
        let sp = db.lookup(name).unwrap();
        for pair in sp.intervals().windows(2) {
            let t = pair[0].bounds().max;
            assert_eq!(t, pair[1].bounds().min, "{name}");
            let lo = evaluate(&pair[0], k(t), EvalMode::Strict).unwrap();
            let hi = evaluate(&pair[1], k(t), EvalMode::Strict).unwrap();
            for (what, a, b) in [
                ("Cp/R", lo.cp_r, hi.cp_r),
                ("H/RT", lo.h_rt, hi.h_rt),
                ("S/R", lo.s_r, hi.s_r),
            ] {
                assert!(
                    nearly_equal(a, b, Tolerances::BOUNDARY),
                    "{name} {what} at {t} K: {a} vs {b}"
                );
            }
        }
    }
}

proptest! {
    #[test]
    fn heat_capacity_positive_within_range(t in 200.0f64..6000.0) {
        let db = db();
        for name in ["H2", "Ar", "Air", "JP-10(g)"] {
            let props = evaluate_species(db.lookup(name).unwrap(), k(t), EvalMode::Strict).unwrap();
            prop_assert!(props.cp() > 0.0);
            prop_assert!(props.s() > 0.0);
        }
    }

    #[test]
    fn enthalpy_increases_with_temperature(t in 200.0f64..5900.0, dt in 1.0f64..100.0) {
        let db = db();
        let air = db.lookup("Air").unwrap();
        let a = evaluate_species(air, k(t), EvalMode::Strict).unwrap();
        let b = evaluate_species(air, k(t + dt), EvalMode::Strict).unwrap();
        prop_assert!(b.h() > a.h());
        prop_assert!(b.s() > a.s());
    }
}
