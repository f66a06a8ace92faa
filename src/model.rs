//! # The loaded program
//!
//! The validated, densely indexed result of a load: name arrays parallel to the dense ids, the
//! rim vectors, and the sparse kernel with its column-start index.
use std::str::FromStr;

use crate::diag::Warning;
use crate::error::Parse;

/// Row id terminating the kernel.
///
/// The final kernel entry is always `(KERNEL_SENTINEL_ROW, 0.0)`, and the last column-start entry
/// points at it. Every column's span is then `kernel[column_starts[c]..column_starts[c + 1]]`
/// without a special case for the last column.
pub const KERNEL_SENTINEL_ROW: i64 = -1;

/// Relational role of a row.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RowKind {
    /// A free row holding objective coefficients (`N`).
    Objective,
    /// A less-than-or-equal constraint (`L`).
    Less,
    /// A greater-than-or-equal constraint (`G`).
    Greater,
    /// An equality constraint (`E`).
    Equal,
}

impl FromStr for RowKind {
    type Err = Parse;

    /// Try to read a `RowKind` from the type field of a `ROWS` line.
    ///
    /// # Errors
    ///
    /// Any token other than `N`, `L`, `G` or `E` fails to parse.
    fn from_str(word: &str) -> Result<RowKind, Self::Err> {
        match word {
            "N" => Ok(RowKind::Objective),
            "L" => Ok(RowKind::Less),
            "G" => Ok(RowKind::Greater),
            "E" => Ok(RowKind::Equal),
            _ => Err(Parse::new(format!("Row type \"{}\" unknown.", word))),
        }
    }
}

impl RowKind {
    /// The relational code as it appears in the file.
    pub fn code(self) -> char {
        match self {
            RowKind::Objective => 'N',
            RowKind::Less => 'L',
            RowKind::Greater => 'G',
            RowKind::Equal => 'E',
        }
    }
}

/// A loaded and validated MPS program.
///
/// Row and column ids are dense integers assigned in first-seen order; all vectors here are
/// indexed by them. Only complete, internally consistent instances exist: any failure during
/// loading unwinds before one is built.
#[derive(Debug, PartialEq)]
pub struct Mps {
    pub(crate) name: String,
    pub(crate) row_names: Vec<String>,
    pub(crate) row_kinds: Vec<RowKind>,
    pub(crate) column_names: Vec<String>,
    pub(crate) rhs_name: String,
    pub(crate) range_name: String,
    pub(crate) bound_name: String,
    pub(crate) rhs: Vec<f64>,
    pub(crate) ranges: Vec<f64>,
    pub(crate) lower_bounds: Vec<f64>,
    pub(crate) upper_bounds: Vec<f64>,
    pub(crate) kernel: Vec<(i64, f64)>,
    pub(crate) column_starts: Vec<usize>,
    pub(crate) zero_count: usize,
    pub(crate) warnings: Vec<Warning>,
}

impl Mps {
    /// Name of the program, empty if the file didn't provide one.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows, the objective row included.
    pub fn row_count(&self) -> usize {
        self.row_names.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// Number of nonzero coefficients stored in the kernel.
    pub fn element_count(&self) -> usize {
        self.kernel.len() - 1
    }

    /// Number of coefficients that parsed to zero and were dropped.
    pub fn zero_element_count(&self) -> usize {
        self.zero_count
    }

    /// Row names, in declaration order, parallel to the dense row ids.
    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    /// Relational code per row, parallel to `row_names`.
    pub fn row_kinds(&self) -> &[RowKind] {
        &self.row_kinds
    }

    /// Column names, in first-seen order, parallel to the dense column ids.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Name of the right-hand side set, empty if the section held no data.
    pub fn rhs_name(&self) -> &str {
        &self.rhs_name
    }

    /// Name of the ranges set, empty if the section was absent or held no data.
    pub fn range_name(&self) -> &str {
        &self.range_name
    }

    /// Name of the bounds set, empty if the section was absent or held no data.
    pub fn bound_name(&self) -> &str {
        &self.bound_name
    }

    /// Right-hand side per row. Defaults to zero.
    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    /// Range value per row. Defaults to zero.
    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    /// Lower bound per column. Defaults to zero.
    pub fn lower_bounds(&self) -> &[f64] {
        &self.lower_bounds
    }

    /// Upper bound per column. Defaults to positive infinity.
    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper_bounds
    }

    /// The flat column-major coefficient storage, terminated by the sentinel pair.
    ///
    /// Within each column the row ids strictly increase.
    pub fn kernel(&self) -> &[(i64, f64)] {
        &self.kernel
    }

    /// Start offset of every column's kernel span, with one trailing entry for the sentinel.
    ///
    /// Has length `column_count() + 1`.
    pub fn column_starts(&self) -> &[usize] {
        &self.column_starts
    }

    /// The `(row id, value)` coefficients of one column, sorted ascending by row id.
    pub fn column(&self, column: usize) -> &[(i64, f64)] {
        &self.kernel[self.column_starts[column]..self.column_starts[column + 1]]
    }

    /// Non-fatal observations made during the load, in the order they occurred.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
