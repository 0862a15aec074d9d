//! Property tables and sweeps over a species.

use td_inp::parse;
use td_poly::{EvalError, EvalMode, PropertyTable, SweepType, TemperatureSweep};

const SAMPLE: &str = include_str!("../../td-inp/tests/data/thermo_sample.inp");

const AIR_TABLE: &str = concat!(
    "         T        Cp    H-H298         S         H\n",
    "         K   J/mol-K    kJ/mol   J/mol-K    kJ/mol\n",
    "--------------------------------------------------\n",
    "  200         29.034    -2.852   187.221    -2.978\n",
    "  500         29.821     5.932   214.001     5.807\n",
    "  2000        36.216    56.595   259.764    56.470",
);

#[test]
fn air_table_layout() {
    let db = parse(SAMPLE).unwrap();
    let air = db.lookup("Air").unwrap();
    let table = PropertyTable::new(air, &[200.0, 500.0, 2000.0], EvalMode::Strict).unwrap();

    assert_eq!(table.formatted(), AIR_TABLE);
    assert_eq!(
        table.to_string(),
        "Property table: T = 200-2000 K, 3 points (moles)"
    );
    assert_eq!(table.species, "Air");
}

#[test]
fn reference_element_row_has_no_negative_zero() {
    let db = parse(SAMPLE).unwrap();
    let h2 = db.lookup("H2").unwrap();
    let table = PropertyTable::new(h2, &[298.15], EvalMode::Strict).unwrap();
    let formatted = table.formatted();
    let row = formatted.lines().last().unwrap();
    assert!(!row.contains("-0.000"), "{row}");
    assert!(row.ends_with("     0.000"), "{row}");
}

#[test]
fn out_of_range_temperature_fails_the_table() {
    let db = parse(SAMPLE).unwrap();
    let air = db.lookup("Air").unwrap();
    let err = PropertyTable::new(air, &[300.0, 100.0], EvalMode::Strict).unwrap_err();
    assert!(matches!(err, EvalError::OutOfRange { .. }));
    assert!(PropertyTable::new(air, &[300.0, 100.0], EvalMode::Extrapolate).is_ok());
}

#[test]
fn table_from_sweep() {
    let db = parse(SAMPLE).unwrap();
    let ar = db.lookup("Ar").unwrap();
    let sweep = TemperatureSweep::new(300.0, 3000.0, 4, SweepType::Linear).unwrap();
    let table = PropertyTable::from_sweep(ar, &sweep, EvalMode::Strict).unwrap();

    let temps: Vec<_> = table.rows.iter().map(|r| r.t_k).collect();
    assert_eq!(temps, vec![300.0, 1200.0, 2100.0, 3000.0]);
    for row in &table.rows {
        assert!((row.cp - 20.786).abs() < 0.01, "cp = {}", row.cp);
    }
}
