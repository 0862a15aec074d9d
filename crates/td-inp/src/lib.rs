//! td-inp: reader for the NASA Glenn `thermo.inp` thermodynamic database.
//!
//! The file is a fixed-column Fortran-era format: one species per block of
//! 80-column records, grouped into gas products, condensed products and
//! reactants. Loading runs a one-pass pipeline:
//!
//! - [`reader`]: fixed-width records, header, comments
//! - [`segment`]: records grouped into species blocks and section sentinels
//! - [`decode`]: fields sliced per the [`columns`] table
//! - [`classify`]: species assigned to categories
//!
//! The result is an immutable [`Database`]. [`encode`] writes species and
//! whole databases back in the same layout.
//!
//! # Example
//!
//! ```no_run
//! let db = td_inp::load_file("thermo.inp")?;
//! let air = db.lookup("Air")?;
//! println!("{} intervals", air.intervals().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod classify;
pub mod columns;
pub mod config;
pub mod database;
pub mod decode;
pub mod encode;
pub mod error;
pub mod reader;
pub mod refcode;
pub mod segment;
pub mod species;

pub use config::{CondensedStart, ParseOptions, SectionMarkers};
pub use database::{Category, Database, lookup};
pub use encode::{encode_species, write_database, write_database_with};
pub use error::{LookupError, ParseError, ParseResult};
pub use reader::Header;
pub use refcode::{RefCode, ReferenceSource};
pub use species::{
    CANONICAL_EXPONENTS, FormulaTerm, Phase, SpeciesRecord, TemperatureBounds,
    TemperatureInterval,
};

use classify::Entry;
use reader::RecordReader;
use segment::{Segment, Segmenter};
use std::path::Path;
use tracing::debug;

/// Parse database text with default section markers.
pub fn parse(text: &str) -> ParseResult<Database> {
    parse_with(text, &ParseOptions::default())
}

/// Parse database text.
///
/// Either every species decodes and classifies, or the first error is
/// returned; no partial database is produced.
pub fn parse_with(text: &str, options: &ParseOptions) -> ParseResult<Database> {
    let reader = RecordReader::new(text)?;
    let header = reader.header().cloned();
    let markers = &options.markers;

    let entries = Segmenter::new(reader, markers).map(|segment| -> ParseResult<Entry> {
        Ok(match segment? {
            Segment::Species(block) => Entry::Species {
                line: block.first_line(),
                record: decode::decode_species(&block)?,
            },
            Segment::Boundary { kind, line } => Entry::Boundary { kind, line },
        })
    });

    classify::classify(entries, markers, header)
}

/// Read and parse a database file.
pub fn load_file(path: impl AsRef<Path>) -> ParseResult<Database> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading database");
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}
