//! # Locating sections
//!
//! One left-to-right pass over the buffer that finds every section header, checks the required
//! ones are present in order, and measures each body. The body line counts size the name tables
//! before the detailed parse starts.
use std::mem::take;

use crate::diag::{Diagnostics, Warning};
use crate::error::{FileLocation, Parse, ParseResult};
use crate::token;

/// Where each section of the program lives.
///
/// Bodies hold the numbered data lines of a section; comments and blank lines are already
/// filtered out, so a body's length is the empirical line count of that section.
#[derive(Debug)]
pub(crate) struct Layout<'a> {
    /// The line holding the `NAME` header and possibly the program name.
    pub name: FileLocation<'a>,
    /// A single line below a bare `NAME` header, holding the program name on its own.
    pub name_continuation: Option<FileLocation<'a>>,
    /// Body of the `ROWS` section. Never empty.
    pub rows: Vec<FileLocation<'a>>,
    /// Body of the `COLUMNS` section. Never empty.
    pub columns: Vec<FileLocation<'a>>,
    /// Body of the `RHS` section. May be empty, which is only a warning.
    pub rhs: Vec<FileLocation<'a>>,
    /// Body of the `RANGES` section, if the section is present.
    pub ranges: Option<Vec<FileLocation<'a>>>,
    /// Body of the `BOUNDS` section, if the section is present.
    pub bounds: Option<Vec<FileLocation<'a>>>,
}

/// A header line together with the body lines below it, before any sequence checking.
struct RawSection<'a> {
    header: FileLocation<'a>,
    body: Vec<FileLocation<'a>>,
}

/// Find the section boundaries of a program.
///
/// # Arguments
///
/// * `text`: The whole program.
/// * `diagnostics`: Sink for the empty-RHS warning.
///
/// # Errors
///
/// When the buffer is too small to be an MPS file, when a required section is missing or out of
/// order, when an unknown (e.g. misspelled optional) header is encountered, or when the `ROWS` or
/// `COLUMNS` body is empty.
pub(crate) fn locate_sections<'a>(
    text: &'a str,
    diagnostics: &mut Diagnostics,
) -> ParseResult<Layout<'a>> {
    if text.len() < token::MINIMUM_FILE_SIZE {
        return Err(Parse::new(
            "Not an MPS file: the buffer is too small to hold the required sections.",
        ));
    }

    let mut raw: Vec<RawSection> = Vec::new();
    for (number, line) in numbered_lines(text) {
        if line.starts_with(char::is_whitespace) {
            match raw.last_mut() {
                Some(section) => section.body.push((number, line)),
                None => return Err(Parse::with_location(
                    "Data before the first section header.", (number, line),
                )),
            }
        } else {
            raw.push(RawSection { header: (number, line), body: Vec::new(), });
        }
    }

    let mut raw = raw.into_iter();

    let name_section = required(raw.next(), token::NAME)?;
    let name = name_section.header;
    let name_continuation = name_continuation(&name_section)?;
    let rows = required(raw.next(), token::ROWS)?;
    if rows.body.is_empty() {
        return Err(Parse::with_location("Section \"ROWS\" holds no rows.", rows.header));
    }
    let columns = required(raw.next(), token::COLUMNS)?;
    if columns.body.is_empty() {
        return Err(Parse::with_location("Section \"COLUMNS\" holds no columns.", columns.header));
    }
    let rhs = required(raw.next(), token::RHS)?;
    if rhs.body.is_empty() {
        diagnostics.push(Warning::EmptyRhs);
    }

    let mut next = raw.next();
    let ranges = take_optional(&mut next, &mut raw, token::RANGES);
    let bounds = take_optional(&mut next, &mut raw, token::BOUNDS);

    match next {
        None => Err(Parse::new(format!("Section \"{}\" is missing.", token::ENDATA))),
        Some(section) => {
            let found = header_keyword(section.header);
            if found != token::ENDATA {
                return Err(Parse::with_location(
                    format!(
                        "Unknown section header \"{}\"; expected \"{}\", \"{}\" or \"{}\".",
                        found, token::RANGES, token::BOUNDS, token::ENDATA,
                    ),
                    section.header,
                ));
            }
            if let Some(&location) = section.body.first() {
                return Err(Parse::with_location(
                    "Nonempty lines after the end of the program.", location,
                ));
            }
            if let Some(trailing) = raw.next() {
                return Err(Parse::with_location(
                    "Nonempty lines after the end of the program.", trailing.header,
                ));
            }

            Ok(Layout {
                name,
                name_continuation,
                rows: rows.body,
                columns: columns.body,
                rhs: rhs.body,
                ranges,
                bounds,
            })
        },
    }
}

/// Split a program into numbered lines, skipping comments and blank lines.
///
/// Skipped lines still advance the line number, so diagnostics match the file on disk.
fn numbered_lines(text: &str) -> impl Iterator<Item = FileLocation<'_>> {
    text.lines()
        .enumerate()
        .map(|(number, line)| (number as u64 + 1, line)) // Count from 1
        .filter(|(_, line)| !line.trim_start().starts_with(token::COMMENT_INDICATOR))
        .filter(|(_, line)| !line.trim_start().is_empty())
}

/// Accept a program name sitting alone on the line below a bare `NAME` header.
///
/// Anything more under the header is an error, as is a body when the header already carries
/// a name.
fn name_continuation<'a>(section: &RawSection<'a>) -> ParseResult<Option<FileLocation<'a>>> {
    let name_on_header = section.header.1.split_whitespace().nth(1).is_some();
    match section.body.as_slice() {
        [] => Ok(None),
        &[line] if !name_on_header => Ok(Some(line)),
        &[line, ..] => Err(Parse::with_location(
            "Unexpected data below the \"NAME\" header.", line,
        )),
    }
}

/// Demand that the next section is the one the format requires here.
fn required<'a>(section: Option<RawSection<'a>>, keyword: &str) -> ParseResult<RawSection<'a>> {
    match section {
        None => Err(Parse::new(format!("Section \"{}\" is missing.", keyword))),
        Some(section) => {
            let found = header_keyword(section.header);
            if found == keyword {
                Ok(section)
            } else {
                Err(Parse::with_location(
                    format!("Expected section \"{}\", found \"{}\".", keyword, found),
                    section.header,
                ))
            }
        },
    }
}

/// Consume `next` as an optional section if its header matches `keyword`.
fn take_optional<'a, I: Iterator<Item = RawSection<'a>>>(
    next: &mut Option<RawSection<'a>>,
    rest: &mut I,
    keyword: &str,
) -> Option<Vec<FileLocation<'a>>> {
    match next {
        Some(section) if header_keyword(section.header) == keyword => {
            let body = take(&mut section.body);
            *next = rest.next();
            Some(body)
        },
        _ => None,
    }
}

fn header_keyword(location: FileLocation<'_>) -> &'_ str {
    let (_, line) = location;
    line.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod test {
    use crate::diag::{Diagnostics, Warning};
    use crate::scan::{locate_sections, numbered_lines};

    const FIXTURE: &str = "\
* A small problem
NAME          TESTPROB
ROWS
 N  COST
 L  LIM1
COLUMNS
* coefficients follow
    XONE      COST             1   LIM1             1
RHS
    RHS1      LIM1             5
BOUNDS
 UP BND1      XONE             4
ENDATA";

    #[test]
    fn numbering_skips_comments_but_counts_them() {
        let result = numbered_lines(FIXTURE).collect::<Vec<_>>();

        assert_eq!(result[0], (2, "NAME          TESTPROB"));
        assert_eq!(result[1], (3, "ROWS"));
        assert_eq!(result[5], (8, "    XONE      COST             1   LIM1             1"));
        assert_eq!(result.last(), Some(&(13, "ENDATA")));
    }

    #[test]
    fn sections_are_located_with_counts() {
        let mut diagnostics = Diagnostics::new();
        let layout = locate_sections(FIXTURE, &mut diagnostics).unwrap();

        assert_eq!(layout.name, (2, "NAME          TESTPROB"));
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.columns.len(), 1);
        assert_eq!(layout.rhs.len(), 1);
        assert!(layout.ranges.is_none());
        assert_eq!(layout.bounds.as_ref().map(Vec::len), Some(1));
        assert!(diagnostics.into_warnings().is_empty());
    }

    #[test]
    fn bare_name_header_may_continue_below() {
        let program = "\
NAME
    TESTPROB
ROWS
 N  COST
COLUMNS
    XONE      COST             1
RHS
    RHS1      COST             5
ENDATA";
        let mut diagnostics = Diagnostics::new();
        let layout = locate_sections(program, &mut diagnostics).unwrap();

        assert_eq!(layout.name, (1, "NAME"));
        assert_eq!(layout.name_continuation, Some((2, "    TESTPROB")));
    }

    #[test]
    fn extra_data_below_the_name_header_is_an_error() {
        let program = "\
NAME          TESTPROB
    STRAGGLER
ROWS
 N  COST
COLUMNS
    XONE      COST             1
RHS
    RHS1      COST             5
ENDATA";
        let mut diagnostics = Diagnostics::new();
        let result = locate_sections(program, &mut diagnostics);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("STRAGGLER"));
    }

    #[test]
    fn too_small_buffer_is_rejected() {
        let mut diagnostics = Diagnostics::new();
        assert!(locate_sections("NAME\nENDATA", &mut diagnostics).is_err());
    }

    #[test]
    fn missing_rhs_is_an_error() {
        let program = "\
NAME          TESTPROB
ROWS
 N  COST
COLUMNS
    XONE      COST             1
ENDATA";
        let mut diagnostics = Diagnostics::new();
        let result = locate_sections(program, &mut diagnostics);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("RHS"));
    }

    #[test]
    fn empty_rows_section_is_an_error() {
        let program = "\
NAME          TESTPROB
ROWS
COLUMNS
    XONE      COST             1
RHS
ENDATA";
        let mut diagnostics = Diagnostics::new();
        assert!(locate_sections(program, &mut diagnostics).is_err());
    }

    #[test]
    fn empty_rhs_section_is_only_a_warning() {
        let program = "\
NAME          TESTPROB
ROWS
 N  COST
COLUMNS
    XONE      COST             1
RHS
ENDATA";
        let mut diagnostics = Diagnostics::new();
        let layout = locate_sections(program, &mut diagnostics).unwrap();

        assert!(layout.rhs.is_empty());
        assert_eq!(diagnostics.into_warnings(), vec![Warning::EmptyRhs]);
    }

    #[test]
    fn misspelled_optional_header_is_an_error() {
        let program = "\
NAME          TESTPROB
ROWS
 N  COST
COLUMNS
    XONE      COST             1
RHS
RNAGES
    RNG1      COST             1
ENDATA";
        let mut diagnostics = Diagnostics::new();
        let result = locate_sections(program, &mut diagnostics);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("RNAGES"));
    }

    #[test]
    fn data_after_endata_is_an_error() {
        let program = "\
NAME          TESTPROB
ROWS
 N  COST
COLUMNS
    XONE      COST             1
RHS
ENDATA
    XONE      COST             1";
        let mut diagnostics = Diagnostics::new();
        assert!(locate_sections(program, &mut diagnostics).is_err());
    }
}
