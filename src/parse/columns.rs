//! # The COLUMNS section
//!
//! Assembles the sparse kernel. Coefficients for one column arrive over consecutive lines in
//! arbitrary row order; they are staged in a holder array indexed by row id and purged into the
//! kernel in ascending row order once the column is complete. The purge picks between sorting
//! the pending ids and sweeping all rows, based on which estimate is cheaper.
use std::mem::take;

use itertools::Itertools;

use crate::diag::{Diagnostics, Warning, WarningSection};
use crate::error::{FileLocation, Import, Inconsistency, Parse};
use crate::model::KERNEL_SENTINEL_ROW;
use crate::parse::parse_value;
use crate::sort;
use crate::table::NameTable;

/// Everything the `COLUMNS` section contributes to the model.
#[derive(Debug)]
pub(crate) struct ColumnData {
    /// Column names in first-seen order, parallel to the dense column ids.
    pub names: Vec<String>,
    /// Flat column-major coefficient storage, sealed with the sentinel pair.
    pub kernel: Vec<(i64, f64)>,
    /// Start offset per column, with a trailing entry pointing at the sentinel.
    pub column_starts: Vec<usize>,
    /// How many coefficients parsed to zero and were dropped.
    pub zero_count: usize,
}

/// A coefficient waiting in the holder until its column is complete.
///
/// The value is kept as the raw token; it is only parsed at purge time.
struct Pending<'a> {
    line: u64,
    row_name: &'a str,
    value_text: &'a str,
}

/// Parse the `COLUMNS` body and assemble the kernel.
///
/// # Arguments
///
/// * `lines`: Body of the section.
/// * `row_table`: Interned row names; read only.
/// * `column_table`: Receives every column name; detects split column blocks.
/// * `element_table`: Receives every (column, row) pair; detects repeated coefficients.
/// * `row_count`: Total number of rows, sizing the holder and driving the purge cost model.
///
/// # Errors
///
/// Unknown row names, a row name without a value, repeated (column, row) pairs and column names
/// declared in more than one contiguous block are all fatal. Diagnostics cite the conflicting
/// line numbers.
pub(crate) fn parse<'a>(
    lines: &[FileLocation<'a>],
    row_table: &NameTable,
    column_table: &mut NameTable,
    element_table: &mut NameTable,
    row_count: usize,
    diagnostics: &mut Diagnostics,
) -> Result<ColumnData, Import> {
    let mut assembler = Assembler::new(row_count, lines.len());
    // Name and first line of the column currently accumulating.
    let mut current: Option<(&str, u64)> = None;

    for &(number, line) in lines {
        let mut fields = line.split_whitespace();
        let Some(column_name) = fields.next() else { continue };

        match current {
            Some((active, _)) if active == column_name => {},
            Some((finished, first_line)) => {
                assembler.finish_column(finished, first_line, column_table, element_table, diagnostics)?;
                current = Some((column_name, number));
            },
            None => current = Some((column_name, number)),
        }

        let mut pairs = fields.tuples();
        for (row_name, value_text) in pairs.by_ref() {
            let row = row_table.get(row_name).ok_or_else(|| Inconsistency::new(format!(
                "Row name \"{}\" on line {} does not exist.", row_name, number,
            )))?;
            assembler.stage(row, column_name, Pending { line: number, row_name, value_text, })?;
        }
        if let Some(orphan) = pairs.into_buffer().next() {
            return Err(Parse::with_location(
                format!("Row name \"{}\" has no value.", orphan), (number, line),
            ).into());
        }
    }

    if let Some((finished, first_line)) = current {
        assembler.finish_column(finished, first_line, column_table, element_table, diagnostics)?;
    }

    let data = assembler.seal();
    debug_assert_eq!(element_table.len(), data.kernel.len() - 1);

    Ok(data)
}

/// Accumulates one column at a time and grows the kernel.
struct Assembler<'a> {
    names: Vec<String>,
    kernel: Vec<(i64, f64)>,
    column_starts: Vec<usize>,
    zero_count: usize,
    /// One slot per row, holding the coefficient staged for that row, if any.
    holder: Vec<Option<Pending<'a>>>,
    /// Row ids staged for the current column, in arrival order.
    pending_rows: Vec<i64>,
}

impl<'a> Assembler<'a> {
    fn new(row_count: usize, line_count: usize) -> Self {
        Self {
            names: Vec::new(),
            // Two coefficients per line at most, plus the sentinel.
            kernel: Vec::with_capacity(2 * line_count + 1),
            column_starts: Vec::new(),
            zero_count: 0,
            holder: (0..row_count).map(|_| None).collect(),
            pending_rows: Vec::with_capacity(row_count),
        }
    }

    /// Stage one coefficient for the current column.
    fn stage(&mut self, row: usize, column_name: &str, pending: Pending<'a>) -> Result<(), Inconsistency> {
        if let Some(existing) = &self.holder[row] {
            return Err(Inconsistency::new(format!(
                "Duplicate coefficient for column \"{}\" and row \"{}\" on line {}; \
                first given on line {}.",
                column_name, pending.row_name, pending.line, existing.line,
            )));
        }

        self.pending_rows.push(row as i64);
        self.holder[row] = Some(pending);

        Ok(())
    }

    /// Purge the finished column into the kernel and register its name.
    fn finish_column(
        &mut self,
        name: &str,
        first_line: u64,
        column_table: &mut NameTable,
        element_table: &mut NameTable,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), Import> {
        let id = self.names.len();
        self.column_starts.push(self.kernel.len());
        self.purge(name, element_table, diagnostics)?;

        if let Err(original) = column_table.insert(id, first_line, name) {
            return Err(Inconsistency::new(format!(
                "Column \"{}\" on line {} was already defined on line {}; \
                a column must be declared in one contiguous block.",
                name, first_line, original,
            )).into());
        }
        self.names.push(name.to_string());

        Ok(())
    }

    /// Move the staged coefficients into the kernel in ascending row order.
    ///
    /// Small tallies skip the strategy choice entirely. Beyond that, sorting the pending ids
    /// costs about `tally log2 tally` and sweeping the holder costs `rows`; the cheaper one runs.
    fn purge(
        &mut self,
        column_name: &str,
        element_table: &mut NameTable,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), Inconsistency> {
        match self.pending_rows.len() {
            0 => {},
            1 => {
                let row = self.pending_rows[0];
                self.emit(row, column_name, element_table, diagnostics)?;
            },
            2 => {
                let (first, second) = (self.pending_rows[0], self.pending_rows[1]);
                let (low, high) = if first < second { (first, second) } else { (second, first) };
                self.emit(low, column_name, element_table, diagnostics)?;
                self.emit(high, column_name, element_table, diagnostics)?;
            },
            tally => {
                if tally * ceil_log2(tally) < self.holder.len() {
                    let mut pending = take(&mut self.pending_rows);
                    if !pending.is_sorted() {
                        sort::sort(&mut pending);
                    }
                    for &row in &pending {
                        self.emit(row, column_name, element_table, diagnostics)?;
                    }
                    // Keep the allocation for the next column.
                    self.pending_rows = pending;
                } else {
                    for row in 0..self.holder.len() as i64 {
                        if self.holder[row as usize].is_some() {
                            self.emit(row, column_name, element_table, diagnostics)?;
                        }
                    }
                }
            },
        }
        self.pending_rows.clear();

        Ok(())
    }

    /// Emit a single staged coefficient, dropping values that parse to zero.
    fn emit(
        &mut self,
        row: i64,
        column_name: &str,
        element_table: &mut NameTable,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), Inconsistency> {
        let Some(pending) = self.holder[row as usize].take() else { return Ok(()) };

        let value = parse_value(pending.value_text);
        if value == 0.0 {
            diagnostics.push(Warning::ZeroValue {
                section: WarningSection::Columns,
                line: pending.line,
                token: pending.value_text.to_string(),
            });
            self.zero_count += 1;
            return Ok(());
        }

        if let Err(original) = element_table.insert_pair(
            self.kernel.len(), pending.line, column_name, pending.row_name,
        ) {
            return Err(Inconsistency::new(format!(
                "Coefficient for column \"{}\" and row \"{}\" on line {} was already given \
                on line {}.",
                column_name, pending.row_name, pending.line, original,
            )));
        }

        self.kernel.push((row, value));

        Ok(())
    }

    /// Seal the kernel with the sentinel pair and shrink everything to its true size.
    fn seal(mut self) -> ColumnData {
        self.column_starts.push(self.kernel.len());
        self.kernel.push((KERNEL_SENTINEL_ROW, 0.0));

        self.kernel.shrink_to_fit();
        self.column_starts.shrink_to_fit();
        self.names.shrink_to_fit();

        ColumnData {
            names: self.names,
            kernel: self.kernel,
            column_starts: self.column_starts,
            zero_count: self.zero_count,
        }
    }
}

/// Ceiling of the base-2 logarithm, the `n log2 n` factor of the sort cost estimate.
fn ceil_log2(n: usize) -> usize {
    debug_assert!(n >= 2);

    (usize::BITS - (n - 1).leading_zeros()) as usize
}

#[cfg(test)]
mod test {
    use crate::diag::Diagnostics;
    use crate::error::{FileLocation, Import};
    use crate::parse::columns::{ceil_log2, ColumnData, parse};
    use crate::table::NameTable;

    fn row_table(count: usize) -> NameTable {
        let mut table = NameTable::with_capacity(count);
        for id in 0..count {
            table.insert(id, id as u64 + 1, &format!("R{}", id)).unwrap();
        }
        table
    }

    fn assemble(lines: &[FileLocation], row_count: usize) -> Result<ColumnData, Import> {
        let mut column_table = NameTable::with_capacity(lines.len());
        let mut element_table = NameTable::with_capacity(2 * lines.len());
        let mut diagnostics = Diagnostics::new();
        parse(lines, &row_table(row_count), &mut column_table, &mut element_table, row_count, &mut diagnostics)
    }

    #[test]
    fn single_column_sorted_and_sealed() {
        let lines = vec![
            (10, "    X1  R5  5.0  R1  1.0"),
            (11, "    X1  R3  3.0"),
        ];
        let data = assemble(&lines, 8).unwrap();

        assert_eq!(data.names, vec!["X1"]);
        assert_eq!(data.kernel, vec![(1, 1.0), (3, 3.0), (5, 5.0), (-1, 0.0)]);
        assert_eq!(data.column_starts, vec![0, 3]);
        assert_eq!(data.zero_count, 0);
    }

    #[test]
    fn both_purge_strategies_produce_the_same_kernel() {
        let lines = vec![
            (10, "    X1  R5  5.0  R1  1.0"),
            (11, "    X1  R3  3.0"),
        ];
        // tally = 3, cost 3 * 2 = 6: below 100 rows the pending ids are sorted, at 6 rows the
        // holder is swept instead.
        let sorted_path = assemble(&lines, 100).unwrap();
        let swept_path = assemble(&lines, 6).unwrap();

        assert_eq!(sorted_path.kernel, swept_path.kernel);
        assert_eq!(sorted_path.column_starts, swept_path.column_starts);
    }

    #[test]
    fn zero_coefficient_is_dropped_and_counted() {
        let lines = vec![
            (10, "    X1  R0  1.0  R1  0.0"),
            (11, "    X2  R1  2.0"),
        ];
        let data = assemble(&lines, 4).unwrap();

        assert_eq!(data.kernel, vec![(0, 1.0), (1, 2.0), (-1, 0.0)]);
        assert_eq!(data.column_starts, vec![0, 1, 2]);
        assert_eq!(data.zero_count, 1);
    }

    #[test]
    fn unknown_row_is_rejected() {
        let lines = vec![(10, "    X1  R9  1.0")];
        let result = assemble(&lines, 4);

        assert!(matches!(result, Err(Import::Inconsistency(_))));
    }

    #[test]
    fn row_name_without_value_is_rejected() {
        let lines = vec![(10, "    X1  R0  1.0  R1")];
        let result = assemble(&lines, 4);

        assert!(matches!(result, Err(Import::Parse(_))));
        assert!(result.unwrap_err().to_string().contains("R1"));
    }

    #[test]
    fn repeated_coefficient_cites_both_lines() {
        let lines = vec![
            (10, "    X1  R1  1.0"),
            (12, "    X1  R1  2.0"),
        ];
        let message = assemble(&lines, 4).unwrap_err().to_string();

        assert!(message.contains("10"));
        assert!(message.contains("12"));
    }

    #[test]
    fn split_column_block_is_rejected() {
        let lines = vec![
            (10, "    X1  R0  1.0"),
            (11, "    X2  R0  2.0"),
            (12, "    X1  R1  3.0"),
        ];
        let message = assemble(&lines, 4).unwrap_err().to_string();

        assert!(message.contains("X1"));
        assert!(message.contains("contiguous"));
    }

    #[test]
    fn ceiling_log2() {
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(1024), 10);
        assert_eq!(ceil_log2(1025), 11);
    }
}
