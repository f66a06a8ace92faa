//! # The ROWS section
use std::str::FromStr;

use crate::error::{FileLocation, Import, Inconsistency, Parse};
use crate::model::RowKind;
use crate::table::NameTable;

/// Parse the `ROWS` body, interning every row name under the next dense id.
///
/// # Return value
///
/// The row names in declaration order and, parallel to them, the relational code of each row.
///
/// # Errors
///
/// When a row type is not one of `N`, `L`, `G`, `E`, when a row name is missing, or when a name
/// is declared twice. Duplicates cite both line numbers.
pub(crate) fn parse(
    lines: &[FileLocation],
    table: &mut NameTable,
) -> Result<(Vec<String>, Vec<RowKind>), Import> {
    let mut names = Vec::with_capacity(lines.len());
    let mut kinds = Vec::with_capacity(lines.len());

    for &(number, line) in lines {
        let mut fields = line.split_whitespace();
        let kind_field = fields.next()
            .ok_or_else(|| Parse::with_location("Missing row type.", (number, line)))?;
        let name = fields.next()
            .ok_or_else(|| Parse::with_location("Missing row name.", (number, line)))?;

        let kind = RowKind::from_str(kind_field)
            .map_err(|error| error.wrap(format!("Invalid row type on line {}.", number)))?;

        if let Err(original) = table.insert(names.len(), number, name) {
            return Err(Inconsistency::new(format!(
                "Duplicate row name \"{}\" on line {}; first declared on line {}.",
                name, number, original,
            )).into());
        }
        names.push(name.to_string());
        kinds.push(kind);
    }

    Ok((names, kinds))
}

#[cfg(test)]
mod test {
    use crate::error::Import;
    use crate::model::RowKind;
    use crate::parse::rows;
    use crate::table::NameTable;

    #[test]
    fn names_and_kinds_in_declaration_order() {
        let lines = vec![
            (2, " N  COST"),
            (3, " L  LIM1"),
            (4, " G  LIM2"),
            (5, " E  MYEQN"),
        ];
        let mut table = NameTable::with_capacity(lines.len());
        let (names, kinds) = rows::parse(&lines, &mut table).unwrap();

        assert_eq!(names, vec!["COST", "LIM1", "LIM2", "MYEQN"]);
        assert_eq!(kinds, vec![RowKind::Objective, RowKind::Less, RowKind::Greater, RowKind::Equal]);
        assert_eq!(table.get("LIM2"), Some(2));
        assert_eq!(table.get("COST"), Some(0));
    }

    #[test]
    fn invalid_row_type_is_rejected() {
        let lines = vec![(2, " X  COST")];
        let mut table = NameTable::with_capacity(1);

        assert!(matches!(rows::parse(&lines, &mut table), Err(Import::Parse(_))));
    }

    #[test]
    fn duplicate_name_cites_both_lines() {
        let lines = vec![
            (2, " N  COST"),
            (3, " L  LIM1"),
            (7, " G  LIM1"),
        ];
        let mut table = NameTable::with_capacity(lines.len());
        let error = rows::parse(&lines, &mut table).unwrap_err();

        let message = error.to_string();
        assert!(message.contains("LIM1"));
        assert!(message.contains('3'));
        assert!(message.contains('7'));
    }
}
