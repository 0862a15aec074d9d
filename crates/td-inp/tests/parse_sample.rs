//! Loading a sample of the NASA Glenn database.
//!
//! The sample keeps the real file's layout: comment lines, the `thermo`
//! header, gas and condensed products, `END PRODUCTS`, reactants including a
//! species without intervals, and `END REACTANTS`.

use std::collections::HashSet;
use td_inp::{Category, LookupError, Phase, ReferenceSource, lookup, parse};

const SAMPLE: &str = include_str!("data/thermo_sample.inp");

#[test]
fn categories_follow_sections() {
    let db = parse(SAMPLE).unwrap();
    assert_eq!(db.names(Category::GasProducts), vec!["H2", "Ar"]);
    assert_eq!(db.names(Category::CondensedProducts), vec!["Ag(cr)"]);
    assert_eq!(db.names(Category::Reactants), vec!["Air", "JP-10(g)", "RP-1"]);
    assert_eq!(db.len(), 6);
}

#[test]
fn header_is_kept() {
    let db = parse(SAMPLE).unwrap();
    let header = db.header().unwrap();
    assert_eq!(header.breakpoints(), &[200.0, 1000.0, 6000.0, 20000.0]);
    assert_eq!(header.date_code(), "9/09/04");
}

#[test]
fn air_record_fields() {
    let db = parse(SAMPLE).unwrap();
    let air = db.lookup("Air").unwrap();

    assert_eq!(db.category_of("Air"), Some(Category::Reactants));
    assert_eq!(air.intervals().len(), 2);
    assert_eq!(air.molar_mass(), 28.9651159);
    assert_eq!(air.heat_of_formation(), -125.53);
    assert_eq!(air.phase(), Phase::Gas);
    assert!(air.comment().starts_with("Mole%:N2 78.084"));

    let elements: Vec<_> = air.formula().iter().map(|t| t.element.as_str()).collect();
    assert_eq!(elements, vec!["N", "O", "AR", "C"]);
    assert_eq!(air.formula()[0].count, 1.5617);
    assert_eq!(air.formula()[1].count, 0.41959);

    let span = air.temperature_span().unwrap();
    assert_eq!((span.min, span.max), (200.0, 6000.0));

    let reference = air.reference();
    assert_eq!(reference.sources, vec![ReferenceSource::Glenn]);
    assert_eq!(reference.year, Some(1995));
}

#[test]
fn every_interval_has_seven_terms_and_ascending_bounds() {
    let db = parse(SAMPLE).unwrap();
    for (_, sp) in db.iter() {
        let mut previous_max = f64::NEG_INFINITY;
        for iv in sp.intervals() {
            assert_eq!(iv.coefficients().len(), 7, "{}", sp.name());
            assert_eq!(iv.exponents().len(), 7, "{}", sp.name());
            assert!(iv.bounds().min < iv.bounds().max);
            assert!(iv.bounds().min >= previous_max, "{}", sp.name());
            previous_max = iv.bounds().max;
        }
    }
}

#[test]
fn names_partition_across_categories() {
    let db = parse(SAMPLE).unwrap();
    let mut seen = HashSet::new();
    let mut total = 0;
    for category in Category::ALL {
        for name in db.names(category) {
            assert!(seen.insert(name.to_string()), "{name} listed twice");
            assert_eq!(db.category_of(name), Some(category));
            total += 1;
        }
    }
    assert_eq!(total, db.len());
}

#[test]
fn zero_interval_species() {
    let db = parse(SAMPLE).unwrap();
    let rp1 = lookup(&db, "RP-1").unwrap();
    assert!(rp1.intervals().is_empty());
    assert_eq!(rp1.phase(), Phase::Condensed);
    assert_eq!(rp1.assigned_enthalpy(), Some(-24717.7));
    assert_eq!(rp1.reference_temperature(), Some(298.15));
}

#[test]
fn condensed_product_and_markers() {
    let db = parse(SAMPLE).unwrap();
    let ag = db.lookup("Ag(cr)").unwrap();
    assert_eq!(ag.phase_flag(), 1);
    assert_eq!(ag.intervals().len(), 1);
    assert_eq!(ag.intervals()[0].bounds().max, 1235.08);
    assert!(ag.is_reference_element());

    let h2 = db.lookup("H2").unwrap();
    assert!(h2.is_reference_element());
    assert_eq!(h2.reference().sources, vec![ReferenceSource::Gurvich]);
}

#[test]
fn unknown_name_is_not_found() {
    let db = parse(SAMPLE).unwrap();
    assert_eq!(
        db.lookup("NonexistentSpecies").unwrap_err(),
        LookupError::NotFound {
            name: "NonexistentSpecies".to_string()
        }
    );
    assert!(db.lookup("air").is_err());
}

#[test]
fn prefix_search() {
    let db = parse(SAMPLE).unwrap();
    let hits: Vec<_> = db.search("A").map(|(_, sp)| sp.name()).collect();
    assert_eq!(hits, vec!["Ar", "Ag(cr)", "Air"]);
}

#[test]
fn parsing_is_idempotent() {
    assert_eq!(parse(SAMPLE).unwrap(), parse(SAMPLE).unwrap());
}

#[test]
fn load_file_reads_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/thermo_sample.inp");
    let db = td_inp::load_file(path).unwrap();
    assert_eq!(db, parse(SAMPLE).unwrap());

    let err = td_inp::load_file("/nonexistent/thermo.inp").unwrap_err();
    assert!(matches!(err, td_inp::ParseError::Io(_)));
}
