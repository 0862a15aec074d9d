//! Malformed databases are rejected with the offending line.

use td_inp::{ParseError, parse};

const SAMPLE: &str = include_str!("data/thermo_sample.inp");

fn without_line(text: &str, line: &str) -> String {
    text.lines()
        .filter(|l| l.trim_end() != line)
        .map(|l| format!("{l}\n"))
        .collect()
}

#[test]
fn empty_input() {
    assert!(matches!(parse(""), Err(ParseError::Source { line: None, .. })));
}

#[test]
fn header_without_body() {
    let text = "thermo\n    200.000  1000.000  6000.000 20000.000   9/09/04\n";
    assert!(matches!(parse(text), Err(ParseError::Source { .. })));
}

#[test]
fn non_numeric_coefficient_reports_field_and_line() {
    let text = SAMPLE.replacen("8.214702010D+00", "8.21470201OD+00", 1);
    match parse(&text) {
        Err(ParseError::FieldDecode {
            field, line, raw, ..
        }) => {
            assert_eq!(field, "coefficient 3");
            assert_eq!(line, 8);
            assert!(raw.contains("8.21470201OD+00"));
        }
        other => panic!("expected field decode error, got {other:?}"),
    }
}

#[test]
fn coefficient_without_digits_is_rejected() {
    for blanked in ["               -", "            D+05"] {
        let text = SAMPLE.replacen(" 8.214702010D+00", blanked, 1);
        match parse(&text) {
            Err(ParseError::FieldDecode { field, line, .. }) => {
                assert_eq!((field, line), ("coefficient 3", 8), "{blanked:?}");
            }
            other => panic!("expected field decode error for {blanked:?}, got {other:?}"),
        }
    }
}

#[test]
fn missing_end_reactants() {
    let text = without_line(SAMPLE, "END REACTANTS");
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, ParseError::Classification { .. }));
    assert!(err.to_string().contains("END REACTANTS"));
}

#[test]
fn missing_end_products() {
    let text = without_line(SAMPLE, "END PRODUCTS");
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, ParseError::Classification { line: Some(_), .. }));
}

#[test]
fn truncated_final_block() {
    // Cut the file inside the last interval of JP-10(g).
    let cut = SAMPLE.find("-2.052060369D-10").unwrap();
    let err = parse(&SAMPLE[..cut]).unwrap_err();
    assert!(matches!(err, ParseError::Segmentation { .. }), "{err}");
}

#[test]
fn duplicate_species_name() {
    let ar_start = SAMPLE.find("Ar   ").unwrap();
    let ar_end = SAMPLE.find("Ag(cr)").unwrap();
    let ar_block = &SAMPLE[ar_start..ar_end];
    let text = SAMPLE.replacen("END REACTANTS", &format!("{ar_block}END REACTANTS"), 1);
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, ParseError::Classification { .. }));
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn interval_count_overstates_records() {
    let text = SAMPLE.replacen(" 1 coda89", " 2 coda89", 1);
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, ParseError::Segmentation { .. }), "{err}");
}

#[test]
fn tab_characters_are_rejected() {
    let text = SAMPLE.replacen("H2                Ref-Elm", "H2\t\t\tRef-Elm", 1);
    let err = parse(&text).unwrap_err();
    assert!(matches!(err, ParseError::Source { line: Some(5), .. }));
}

#[test]
fn errors_convert_to_core_error() {
    let err: td_core::TdError = parse("").unwrap_err().into();
    assert!(matches!(err, td_core::TdError::Source { .. }));
}
