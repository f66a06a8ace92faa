//! # The RHS and RANGES sections
//!
//! Both sections share one shape: a set name followed by one or two (row name, value) pairs per
//! line, written into a dense per-row vector.
use itertools::Itertools;

use crate::diag::{Diagnostics, Warning, WarningSection};
use crate::error::{FileLocation, Import, Inconsistency, Parse};
use crate::parse::parse_value;
use crate::table::NameTable;

/// Parse an `RHS` or `RANGES` body into a dense per-row vector.
///
/// The set name is taken from the first data line. A value that parses to zero is warned about
/// and left at the default, which is also zero.
///
/// # Return value
///
/// The name of the set, empty when the body holds no data.
///
/// # Errors
///
/// When a row name was never declared, or a row name has no value next to it.
pub(crate) fn parse(
    lines: &[FileLocation],
    section: WarningSection,
    row_table: &NameTable,
    values: &mut [f64],
    diagnostics: &mut Diagnostics,
) -> Result<String, Import> {
    let mut set_name = String::new();

    for &(number, line) in lines {
        let mut fields = line.split_whitespace();
        let Some(group) = fields.next() else { continue };
        if set_name.is_empty() {
            set_name = group.to_string();
        }

        let mut pairs = fields.tuples();
        for (row_name, value_text) in pairs.by_ref() {
            let row = row_table.get(row_name).ok_or_else(|| Inconsistency::new(format!(
                "Row name \"{}\" on line {} does not exist.", row_name, number,
            )))?;

            let value = parse_value(value_text);
            if value == 0.0 {
                diagnostics.push(Warning::ZeroValue {
                    section,
                    line: number,
                    token: value_text.to_string(),
                });
            } else {
                values[row] = value;
            }
        }
        if let Some(orphan) = pairs.into_buffer().next() {
            return Err(Parse::with_location(
                format!("Row name \"{}\" has no value.", orphan), (number, line),
            ).into());
        }
    }

    Ok(set_name)
}
