//! Category Classifier: assigns decoded species to database sections.
//!
//! Sections follow the file order gas products → condensed products →
//! `END PRODUCTS` → reactants → `END REACTANTS`. The classifier walks the
//! stream once, carrying the current [`Section`]; a missing or misplaced
//! boundary is an error rather than a guess.

use crate::config::{CondensedStart, SectionMarkers};
use crate::database::Database;
use crate::error::{ParseError, ParseResult};
use crate::reader::Header;
use crate::segment::Boundary;
use crate::species::{Phase, SpeciesRecord};
use std::collections::HashMap;
use tracing::{debug, info};

/// A decoded item of the body, in source order.
#[derive(Clone, Debug)]
pub enum Entry {
    Species { record: SpeciesRecord, line: usize },
    Boundary { kind: Boundary, line: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Gas,
    Condensed,
    Reactants,
    Done,
}

fn opens_condensed(record: &SpeciesRecord, start: &CondensedStart) -> bool {
    match start {
        CondensedStart::Species(name) => record.name() == name,
        CondensedStart::FirstCondensedPhase => record.phase() == Phase::Condensed,
    }
}

fn error(line: Option<usize>, what: impl Into<String>) -> ParseError {
    ParseError::Classification {
        line,
        what: what.into(),
    }
}

/// Partition entries into a [`Database`].
///
/// Returns a database only when the whole stream classifies cleanly.
pub fn classify<I>(entries: I, markers: &SectionMarkers, header: Option<Header>) -> ParseResult<Database>
where
    I: IntoIterator<Item = ParseResult<Entry>>,
{
    let mut section = Section::Gas;
    let mut lists: [Vec<SpeciesRecord>; 3] = Default::default();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        match entry? {
            Entry::Species { record, line } => {
                if section == Section::Gas && opens_condensed(&record, &markers.condensed_start) {
                    debug!(line, name = record.name(), "condensed products start");
                    section = Section::Condensed;
                }

                let slot = match section {
                    Section::Gas => 0,
                    Section::Condensed => 1,
                    Section::Reactants => 2,
                    Section::Done => {
                        return Err(error(
                            Some(line),
                            format!(
                                "species '{}' follows {}",
                                record.name(),
                                markers.end_reactants
                            ),
                        ));
                    }
                };

                if let Some(first) = seen.insert(record.name().to_string(), line) {
                    return Err(error(
                        Some(line),
                        format!(
                            "duplicate species name '{}' (first defined at line {first})",
                            record.name()
                        ),
                    ));
                }
                lists[slot].push(record);
            }
            Entry::Boundary { kind, line } => {
                section = match (section, kind) {
                    (Section::Condensed, Boundary::EndProducts) => Section::Reactants,
                    (Section::Gas, Boundary::EndProducts) => match &markers.condensed_start {
                        // Positional boundaries allow an empty condensed section.
                        CondensedStart::FirstCondensedPhase => Section::Reactants,
                        CondensedStart::Species(name) => {
                            return Err(error(
                                Some(line),
                                format!(
                                    "{} reached before condensed marker species '{name}'",
                                    markers.end_products
                                ),
                            ));
                        }
                    },
                    (Section::Reactants, Boundary::EndReactants) => Section::Done,
                    (Section::Gas | Section::Condensed, Boundary::EndReactants) => {
                        return Err(error(
                            Some(line),
                            format!(
                                "{} before {}",
                                markers.end_reactants, markers.end_products
                            ),
                        ));
                    }
                    (_, Boundary::EndProducts) => {
                        return Err(error(
                            Some(line),
                            format!("repeated {}", markers.end_products),
                        ));
                    }
                    (Section::Done, Boundary::EndReactants) => {
                        return Err(error(
                            Some(line),
                            format!("repeated {}", markers.end_reactants),
                        ));
                    }
                };
                debug!(line, ?kind, ?section, "section boundary");
            }
        }
    }

    match section {
        Section::Done => {}
        Section::Reactants => {
            return Err(error(None, format!("missing {}", markers.end_reactants)));
        }
        Section::Gas | Section::Condensed => {
            return Err(error(None, format!("missing {}", markers.end_products)));
        }
    }

    let [gas, condensed, reactants] = lists;
    info!(
        gas_products = gas.len(),
        condensed_products = condensed.len(),
        reactants = reactants.len(),
        "classified database"
    );
    Ok(Database::from_parts(header, gas, condensed, reactants))
}
