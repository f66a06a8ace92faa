//! # Parsing MPS programs
//!
//! Second stage of a load. The scanner has already located every section; here each body is
//! tokenized and turned into the final model. Sections are processed in file order and the
//! auxiliary name tables live exactly as long as the last section that reads them.
use crate::diag::{Diagnostics, WarningSection};
use crate::error::{FileLocation, Import};
use crate::model::Mps;
use crate::scan;
use crate::table::NameTable;

pub(crate) mod bounds;
pub(crate) mod columns;
pub(crate) mod rim;
pub(crate) mod rows;

/// Parse a program, in string form, to an `Mps`.
///
/// # Arguments
///
/// * `text`: String holding the entire program.
///
/// # Errors
///
/// Parse errors if the file structure is found out to be wrong, inconsistency errors if e.g. a
/// row is mentioned that wasn't declared in advance. Partially built tables and vectors are
/// released on the way out.
pub(crate) fn parse_program(text: &str) -> Result<Mps, Import> {
    let mut diagnostics = Diagnostics::new();
    let layout = scan::locate_sections(text, &mut diagnostics)?;

    let name = program_name(layout.name, layout.name_continuation);

    let mut row_table = NameTable::with_capacity(layout.rows.len());
    let (row_names, row_kinds) = rows::parse(&layout.rows, &mut row_table)?;
    let row_count = row_names.len();

    let mut column_table = NameTable::with_capacity(layout.columns.len());
    let columns = {
        let mut element_table = NameTable::with_capacity(2 * layout.columns.len());
        columns::parse(
            &layout.columns,
            &row_table,
            &mut column_table,
            &mut element_table,
            row_count,
            &mut diagnostics,
        )?
        // The element table has no reader beyond this point.
    };
    let column_count = columns.names.len();

    let mut rhs = vec![0.0; row_count];
    let rhs_name = rim::parse(
        &layout.rhs, WarningSection::Rhs, &row_table, &mut rhs, &mut diagnostics,
    )?;

    let mut ranges = vec![0.0; row_count];
    let range_name = match &layout.ranges {
        Some(lines) => rim::parse(
            lines, WarningSection::Ranges, &row_table, &mut ranges, &mut diagnostics,
        )?,
        None => String::new(),
    };
    // RHS and RANGES were the last readers of the row table.
    drop(row_table);

    let mut lower_bounds = vec![0.0; column_count];
    let mut upper_bounds = vec![f64::INFINITY; column_count];
    let bound_name = match &layout.bounds {
        Some(lines) => bounds::parse(
            lines, &column_table, &mut lower_bounds, &mut upper_bounds, &mut diagnostics,
        )?,
        None => String::new(),
    };
    drop(column_table);

    Ok(Mps {
        name,
        row_names,
        row_kinds,
        column_names: columns.names,
        rhs_name,
        range_name,
        bound_name,
        rhs,
        ranges,
        lower_bounds,
        upper_bounds,
        kernel: columns.kernel,
        column_starts: columns.column_starts,
        zero_count: columns.zero_count,
        warnings: diagnostics.into_warnings(),
    })
}

/// Read the optional program name from the `NAME` header line, or from the line below it.
fn program_name(location: FileLocation<'_>, continuation: Option<FileLocation<'_>>) -> String {
    let (_, line) = location;
    line.split_whitespace().nth(1)
        .or_else(|| continuation.and_then(|(_, line)| line.split_whitespace().next()))
        .map_or_else(String::new, str::to_string)
}

/// Parse a numeric token, treating anything unparsable as zero.
///
/// The format convention can't distinguish an explicit zero from a token the numeric parser
/// rejects; both end up on the warn-and-drop path.
pub(crate) fn parse_value(token: &str) -> f64 {
    token.parse().unwrap_or(0.0)
}
