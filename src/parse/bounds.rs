//! # The BOUNDS section
//!
//! Each line carries a two-letter bound type, the bound set name, a column name and, depending on
//! the type, a value. Results land in the dense lower and upper bound vectors, which default to
//! zero and positive infinity.
use crate::diag::{Diagnostics, Warning, WarningSection};
use crate::error::{FileLocation, Import, Inconsistency, Parse};
use crate::parse::parse_value;
use crate::table::NameTable;

/// Parse a `BOUNDS` body into the dense bound vectors.
///
/// An empty body is a no-op. Lines with an undefined type code are warned about and skipped,
/// but only after their column name has been resolved.
///
/// # Return value
///
/// The name of the bound set, empty when the body holds no data.
///
/// # Errors
///
/// When a column name was never declared, or a bound type that requires a value has none.
pub(crate) fn parse(
    lines: &[FileLocation],
    column_table: &NameTable,
    lower: &mut [f64],
    upper: &mut [f64],
    diagnostics: &mut Diagnostics,
) -> Result<String, Import> {
    let mut set_name = String::new();

    for &(number, line) in lines {
        let mut fields = line.split_whitespace();
        let Some(code) = fields.next() else { continue };
        let Some(group) = fields.next() else {
            return Err(Parse::with_location("Missing bound set name.", (number, line)).into());
        };
        let Some(column_name) = fields.next() else {
            return Err(Parse::with_location("Missing column name.", (number, line)).into());
        };

        // The column is resolved before the type code is judged, so a bad name is fatal even on
        // a line that is otherwise skipped.
        let column = column_table.get(column_name).ok_or_else(|| Inconsistency::new(format!(
            "Column name \"{}\" on line {} does not exist.", column_name, number,
        )))?;
        if !matches!(code, "LO" | "UP" | "FX" | "FR" | "MI" | "PL" | "BV") {
            diagnostics.push(Warning::UnknownBoundType { line: number, code: code.to_string(), });
            continue;
        }
        if set_name.is_empty() {
            set_name = group.to_string();
        }

        let value_text = fields.next();

        match code {
            "LO" | "UP" | "FX" => {
                let Some(text) = value_text else {
                    return Err(Parse::with_location(
                        format!("Bound type \"{}\" requires a value.", code), (number, line),
                    ).into());
                };
                let value = parse_value(text);
                if value == 0.0 {
                    diagnostics.push(Warning::ZeroValue {
                        section: WarningSection::Bounds,
                        line: number,
                        token: text.to_string(),
                    });
                }

                match code {
                    "LO" => lower[column] = value,
                    // An upper bound of zero stays unset; the default is infinity.
                    "UP" => if value != 0.0 {
                        upper[column] = value;
                    },
                    "FX" => {
                        lower[column] = value;
                        upper[column] = value;
                    },
                    _ => unreachable!(),
                }
            },
            "FR" => {
                lower[column] = f64::NEG_INFINITY;
                upper[column] = f64::INFINITY;
            },
            "MI" => {
                if let Some(text) = value_text {
                    let value = parse_value(text);
                    if value == 0.0 {
                        diagnostics.push(Warning::ZeroValue {
                            section: WarningSection::Bounds,
                            line: number,
                            token: text.to_string(),
                        });
                    } else {
                        upper[column] = value;
                    }
                }
                lower[column] = f64::NEG_INFINITY;
            },
            "PL" => {
                if let Some(text) = value_text {
                    let value = parse_value(text);
                    if value == 0.0 {
                        diagnostics.push(Warning::ZeroValue {
                            section: WarningSection::Bounds,
                            line: number,
                            token: text.to_string(),
                        });
                    } else {
                        lower[column] = value;
                    }
                }
                upper[column] = f64::INFINITY;
            },
            "BV" => {
                lower[column] = 0.0;
                upper[column] = 1.0;
            },
            _ => unreachable!(),
        }
    }

    Ok(set_name)
}
