//! Species Segmenter: groups body records into species blocks.
//!
//! A species starts on a record whose column 1 is not blank; its second
//! record declares the interval count `n`, and the block spans `2 + 3n`
//! records. Coefficient records are taken on the declared count alone. Section sentinel lines pass through as [`Segment::Boundary`].

use crate::columns;
use crate::config::SectionMarkers;
use crate::error::{ParseError, ParseResult};
use crate::reader::Record;
use std::iter::Peekable;

/// Records per temperature interval.
pub const RECORDS_PER_INTERVAL: usize = 3;

/// Gas species carry at most this many intervals; the one-digit count field
/// cannot hold a block larger than the segmenter is willing to read.
pub const MAX_INTERVALS: usize = 3;

/// Section sentinel lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    EndProducts,
    EndReactants,
}

/// The raw records of one species.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeciesBlock {
    records: Vec<Record>,
}

impl SpeciesBlock {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Line number of the name record.
    pub fn first_line(&self) -> usize {
        self.records[0].number()
    }

    /// Declared interval count, already validated by the segmenter.
    pub fn interval_count(&self) -> usize {
        (self.records.len() - 2) / RECORDS_PER_INTERVAL
    }

    /// Third record of a species without intervals, when present.
    pub fn reference_record(&self) -> Option<&Record> {
        (self.records.len() == 3).then(|| &self.records[2])
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Species(SpeciesBlock),
    Boundary { kind: Boundary, line: usize },
}

/// Lazy one-pass segmenter over a record stream.
pub struct Segmenter<I: Iterator<Item = ParseResult<Record>>> {
    records: Peekable<I>,
    markers: SectionMarkers,
    failed: bool,
}

impl<I: Iterator<Item = ParseResult<Record>>> Segmenter<I> {
    pub fn new(records: I, markers: &SectionMarkers) -> Self {
        Self {
            records: records.peekable(),
            markers: markers.clone(),
            failed: false,
        }
    }

    fn boundary_of(&self, record: &Record) -> Option<Boundary> {
        let text = record.trimmed();
        if text.starts_with(self.markers.end_products.as_str()) {
            Some(Boundary::EndProducts)
        } else if text.starts_with(self.markers.end_reactants.as_str()) {
            Some(Boundary::EndReactants)
        } else {
            None
        }
    }

    /// Next record that must belong to the block starting at `first`.
    fn continuation(&mut self, first: usize, expected: usize, got: usize) -> ParseResult<Record> {
        let record = match self.records.next() {
            Some(record) => record?,
            None => {
                return Err(ParseError::Segmentation {
                    line: first,
                    what: format!(
                        "species block truncated: expected {expected} records, input ends after {got}"
                    ),
                });
            }
        };
        if self.boundary_of(&record).is_some() {
            return Err(ParseError::Segmentation {
                line: record.number(),
                what: format!(
                    "section boundary inside species block starting at line {first} \
                     ({got} of {expected} records read)"
                ),
            });
        }
        Ok(record)
    }

    fn read_block(&mut self, first: Record) -> ParseResult<SpeciesBlock> {
        let first_line = first.number();
        let second = self.continuation(first_line, 2, 1)?;
        if !second.is_continuation() {
            return Err(ParseError::Segmentation {
                line: second.number(),
                what: format!("species at line {first_line} has no second record"),
            });
        }

        // The count is a single digit; anything else cannot be segmented.
        let count = match columns::INTERVAL_COUNT.integer(&second) {
            Ok(n) if (0..=MAX_INTERVALS as i64).contains(&n) => n as usize,
            Ok(n) => {
                return Err(ParseError::Segmentation {
                    line: second.number(),
                    what: format!("declared interval count {n} exceeds {MAX_INTERVALS}"),
                });
            }
            Err(_) => {
                return Err(ParseError::Segmentation {
                    line: second.number(),
                    what: format!(
                        "interval count in column 2 is not a digit: {:?}",
                        second.column(2)
                    ),
                });
            }
        };

        let expected = 2 + count * RECORDS_PER_INTERVAL;
        let mut records = Vec::with_capacity(expected);
        records.push(first);
        records.push(second);

        while records.len() < expected {
            let record = self.continuation(first_line, expected, records.len())?;
            // Coefficient records may start with a minus sign in column 1;
            // only the bounds record of each interval is known to be blank there.
            let opens_interval = (records.len() - 2) % RECORDS_PER_INTERVAL == 0;
            if opens_interval && !record.is_continuation() {
                return Err(ParseError::Segmentation {
                    line: record.number(),
                    what: format!(
                        "new species starts inside the block beginning at line {first_line} \
                         ({} of {expected} records read)",
                        records.len()
                    ),
                });
            }
            records.push(record);
        }

        // Species without intervals may carry a reference-temperature record.
        let has_reference =
            matches!(self.records.peek(), Some(Ok(next)) if next.is_continuation());
        if count == 0 && has_reference {
            if let Some(Ok(next)) = self.records.next() {
                records.push(next);
            }
        }

        Ok(SpeciesBlock { records })
    }

    fn next_segment(&mut self) -> Option<ParseResult<Segment>> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e)),
        };

        if let Some(kind) = self.boundary_of(&record) {
            return Some(Ok(Segment::Boundary {
                kind,
                line: record.number(),
            }));
        }

        if record.is_continuation() {
            return Some(Err(ParseError::Segmentation {
                line: record.number(),
                what: "continuation record where a species name was expected".to_string(),
            }));
        }

        Some(self.read_block(record).map(Segment::Species))
    }
}

impl<I: Iterator<Item = ParseResult<Record>>> Iterator for Segmenter<I> {
    type Item = ParseResult<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_segment();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::RecordReader;

    fn segments(text: &str) -> Vec<ParseResult<Segment>> {
        let reader = RecordReader::new(text).unwrap();
        Segmenter::new(reader, &SectionMarkers::default()).collect()
    }

    const AR: &str = "\
Ar                Ref-Elm. Moore,1971. Gordon,1999.
 1 g 3/98 AR  1.00    0.00    0.00    0.00    0.00 0   39.9480000          0.000
    200.000   1000.0007 -2.0 -1.0  0.0  1.0  2.0  3.0  4.0  0.0         6197.428
 0.000000000D+00 0.000000000D+00 2.500000000D+00 0.000000000D+00 0.000000000D+00
 0.000000000D+00 0.000000000D+00                -7.453750000D+02 4.379674910D+00
";

    #[test]
    fn groups_records_by_declared_count() {
        let text = format!("{AR}END PRODUCTS\nEND REACTANTS\n");
        let segs: Vec<_> = segments(&text).into_iter().map(Result::unwrap).collect();
        assert_eq!(segs.len(), 3);
        match &segs[0] {
            Segment::Species(block) => {
                assert_eq!(block.records().len(), 5);
                assert_eq!(block.first_line(), 1);
                assert_eq!(block.interval_count(), 1);
            }
            other => panic!("expected species, got {other:?}"),
        }
        assert_eq!(
            segs[1],
            Segment::Boundary {
                kind: Boundary::EndProducts,
                line: 6
            }
        );
    }

    #[test]
    fn zero_interval_species_takes_reference_record() {
        let text = "\
RP-1              Mehta et.al.
 0 gll/00 C   1.00H   1.95    0.00    0.00    0.00 1   13.9761830     -24717.700
    298.150
END REACTANTS
";
        let segs: Vec<_> = segments(text).into_iter().map(Result::unwrap).collect();
        match &segs[0] {
            Segment::Species(block) => {
                assert_eq!(block.records().len(), 3);
                assert_eq!(block.interval_count(), 0);
                assert!(block.reference_record().is_some());
            }
            other => panic!("expected species, got {other:?}"),
        }
    }

    #[test]
    fn truncated_block_is_segmentation_error() {
        let truncated: String = AR.lines().take(4).map(|l| format!("{l}\n")).collect();
        let segs = segments(&truncated);
        let err = segs.last().unwrap().as_ref().unwrap_err();
        assert!(matches!(err, ParseError::Segmentation { line: 1, .. }));
    }

    #[test]
    fn overlong_count_is_segmentation_error() {
        let text = AR.replacen(" 1 g 3/98", " 4 g 3/98", 1);
        let err = segments(&text).remove(0).unwrap_err();
        assert!(matches!(err, ParseError::Segmentation { line: 2, .. }));
    }

    #[test]
    fn stray_continuation_is_rejected() {
        let text = format!("    200.000   1000.000\n{AR}");
        let err = segments(&text).remove(0).unwrap_err();
        assert!(matches!(err, ParseError::Segmentation { line: 1, .. }));
    }

    #[test]
    fn species_start_inside_block_is_rejected() {
        let text = AR.replacen(" 1 g 3/98", " 2 g 3/98", 1) + "H2   next species\n";
        let segs = segments(&text);
        let err = segs.last().unwrap().as_ref().unwrap_err();
        assert!(matches!(err, ParseError::Segmentation { line: 6, .. }));
    }

    #[test]
    fn negative_leading_coefficient_stays_in_block() {
        let text = "\
H2                Ref-Elm. Gurvich,1978 pt1 p103 pt2 p31.
 1 tpis78 H   2.00    0.00    0.00    0.00    0.00 0    2.0158800          0.000
    200.000   1000.0007 -2.0 -1.0  0.0  1.0  2.0  3.0  4.0  0.0         8468.102
-4.078323210D+04-8.009186040D+02 8.214702010D+00-1.269714457D-02 1.753605076D-05
-1.202860270D-08 3.368093490D-12                 2.682484665D+03-3.043788844D+01
END PRODUCTS
";
        let segs: Vec<_> = segments(text).into_iter().map(Result::unwrap).collect();
        assert_eq!(segs.len(), 2);
        match &segs[0] {
            Segment::Species(block) => {
                assert_eq!(block.records().len(), 5);
                assert_eq!(block.interval_count(), 1);
            }
            other => panic!("expected species, got {other:?}"),
        }
    }

    #[test]
    fn species_name_on_second_record_is_rejected() {
        let text = "Ar   first
H2   second
";
        let err = segments(text).remove(0).unwrap_err();
        assert!(matches!(err, ParseError::Segmentation { line: 2, .. }));
    }

    #[test]
    fn stops_after_first_error() {
        let text = format!("    orphan\n{AR}");
        let segs = segments(&text);
        assert_eq!(segs.len(), 1);
    }
}
