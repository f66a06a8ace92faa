//! Integration tests loading complete programs from literal strings.
use mps_load::error::Import;
use mps_load::{KERNEL_SENTINEL_ROW, RowKind, Warning, WarningSection, parse};

/// A complete program exercising every section.
const TESTPROB: &str = "\
* A classic test problem
NAME          TESTPROB
ROWS
 N  COST
 L  LIM1
 G  LIM2
 E  MYEQN
COLUMNS
    XONE      COST             1   LIM1             1
    XONE      LIM2             1
    YTWO      COST             4   LIM1             1
    YTWO      MYEQN           -1
    ZTHREE    COST             9   LIM2             1
    ZTHREE    MYEQN            1
RHS
    RHS1      LIM1             5   LIM2            10
    RHS1      MYEQN            7
RANGES
    RNG1      LIM1             4
BOUNDS
 UP BND1      XONE             4
 LO BND1      YTWO            -1
 UP BND1      YTWO             1
ENDATA";

#[test]
fn full_program() {
    let mps = parse(TESTPROB).unwrap();

    assert_eq!(mps.name(), "TESTPROB");
    assert_eq!(mps.row_count(), 4);
    assert_eq!(mps.column_count(), 3);
    assert_eq!(mps.element_count(), 9);
    assert_eq!(mps.zero_element_count(), 0);

    assert_eq!(mps.row_names(), ["COST", "LIM1", "LIM2", "MYEQN"]);
    assert_eq!(mps.row_kinds(), [
        RowKind::Objective, RowKind::Less, RowKind::Greater, RowKind::Equal,
    ]);
    assert_eq!(mps.column_names(), ["XONE", "YTWO", "ZTHREE"]);

    assert_eq!(mps.kernel(), [
        (0, 1.0), (1, 1.0), (2, 1.0),
        (0, 4.0), (1, 1.0), (3, -1.0),
        (0, 9.0), (2, 1.0), (3, 1.0),
        (KERNEL_SENTINEL_ROW, 0.0),
    ]);
    assert_eq!(mps.column_starts(), [0, 3, 6, 9]);
    assert_eq!(mps.column(1), [(0, 4.0), (1, 1.0), (3, -1.0)]);

    assert_eq!(mps.rhs_name(), "RHS1");
    assert_eq!(mps.rhs(), [0.0, 5.0, 10.0, 7.0]);
    assert_eq!(mps.range_name(), "RNG1");
    assert_eq!(mps.ranges(), [0.0, 4.0, 0.0, 0.0]);

    assert_eq!(mps.bound_name(), "BND1");
    assert_eq!(mps.lower_bounds(), [0.0, -1.0, 0.0]);
    assert_eq!(mps.upper_bounds(), [4.0, 1.0, f64::INFINITY]);

    assert!(mps.warnings().is_empty());
}

#[test]
fn kernel_invariants() {
    let mps = parse(TESTPROB).unwrap();

    assert_eq!(mps.row_names().len(), mps.row_kinds().len());
    assert_eq!(mps.column_starts().len(), mps.column_count() + 1);

    for column in 0..mps.column_count() {
        let span = mps.column(column);
        assert!(span.windows(2).all(|pair| pair[0].0 < pair[1].0));
        assert!(span.iter().all(|&(row, _)| row >= 0 && (row as usize) < mps.row_count()));
    }

    let sentinel_position = mps.column_starts()[mps.column_count()];
    assert_eq!(mps.kernel()[sentinel_position], (KERNEL_SENTINEL_ROW, 0.0));
    assert_eq!(sentinel_position, mps.kernel().len() - 1);
}

#[test]
fn minimal_program_with_empty_rhs() {
    let program = "\
NAME
ROWS
 N  OBJ
COLUMNS
    X1        OBJ              1.0
RHS
ENDATA";
    let mps = parse(program).unwrap();

    assert_eq!(mps.name(), "");
    assert_eq!(mps.row_count(), 1);
    assert_eq!(mps.column_count(), 1);
    assert_eq!(mps.kernel().len(), 2);
    assert_eq!(mps.rhs(), [0.0]);
    assert_eq!(mps.warnings(), [Warning::EmptyRhs]);
}

#[test]
fn name_on_the_line_below_the_header() {
    let program = "\
NAME
    BELOW
ROWS
 N  OBJ
COLUMNS
    X1        OBJ              1.0
RHS
    RHS1      OBJ              2.0
ENDATA";
    let mps = parse(program).unwrap();

    assert_eq!(mps.name(), "BELOW");
    assert_eq!(mps.element_count(), 1);
}

#[test]
fn row_name_without_value_is_rejected() {
    let program = "\
NAME          ORPHAN
ROWS
 N  COST
 L  LIM1
COLUMNS
    X1        COST             1.0 LIM1
RHS
    RHS1      LIM1             3.0
ENDATA";
    let error = parse(program).unwrap_err();

    assert!(matches!(error, Import::Parse(_)));
    assert!(error.to_string().contains("LIM1"));
}

#[test]
fn rhs_row_name_without_value_is_rejected() {
    let program = "\
NAME          ORPHAN
ROWS
 N  COST
 L  LIM1
COLUMNS
    X1        COST             1.0
RHS
    RHS1      LIM1
ENDATA";
    let error = parse(program).unwrap_err();

    assert!(matches!(error, Import::Parse(_)));
}

#[test]
fn duplicate_row_cites_both_lines() {
    let program = "\
NAME          DUPROW
ROWS
 N  COST
 L  LIM1
 G  LIM1
COLUMNS
    X1        COST             1.0
RHS
ENDATA";
    let error = parse(program).unwrap_err();

    assert!(matches!(error, Import::Inconsistency(_)));
    let message = error.to_string();
    assert!(message.contains("LIM1"));
    assert!(message.contains('4'));
    assert!(message.contains('5'));
}

#[test]
fn unknown_row_in_columns() {
    let program = "\
NAME          BADROW
ROWS
 N  COST
COLUMNS
    X1        NOSUCH           1.0
RHS
ENDATA";
    let error = parse(program).unwrap_err();

    assert!(matches!(error, Import::Inconsistency(_)));
    assert!(error.to_string().contains("NOSUCH"));
}

#[test]
fn fixed_bound_sets_both_sides() {
    let program = "\
NAME          FIXED
ROWS
 N  COST
COLUMNS
    X1        COST             1.0
RHS
    RHS1      COST             2.0
BOUNDS
 FX BND1      X1               5.0
ENDATA";
    let mps = parse(program).unwrap();

    assert_eq!(mps.lower_bounds(), [5.0]);
    assert_eq!(mps.upper_bounds(), [5.0]);
}

#[test]
fn zero_coefficient_is_dropped() {
    let program = "\
NAME          ZEROES
ROWS
 N  COST
 L  LIM1
COLUMNS
    X1        COST             1.0 LIM1             0.0
RHS
    RHS1      LIM1             3.0
ENDATA";
    let mps = parse(program).unwrap();

    assert_eq!(mps.element_count(), 1);
    assert_eq!(mps.zero_element_count(), 1);
    assert_eq!(mps.kernel(), [(0, 1.0), (KERNEL_SENTINEL_ROW, 0.0)]);
    assert_eq!(mps.warnings(), [Warning::ZeroValue {
        section: WarningSection::Columns,
        line: 6,
        token: "0.0".to_string(),
    }]);
}

#[test]
fn excess_warnings_are_summarized() {
    let program = "\
NAME          NOISY
ROWS
 N  COST
 L  LIM1
 G  LIM2
 E  MYEQN
COLUMNS
    X1        COST             0.0 LIM1             0.0
    X1        LIM2             0.0 MYEQN            0.0
    X2        COST             1.0
RHS
    RHS1      LIM1             3.0
ENDATA";
    let mps = parse(program).unwrap();

    assert_eq!(mps.zero_element_count(), 4);
    let verbatim = mps.warnings().iter()
        .filter(|w| matches!(w, Warning::ZeroValue { .. }))
        .count();
    assert_eq!(verbatim, 2);
    assert!(mps.warnings().contains(&Warning::Suppressed {
        section: WarningSection::Columns,
        count: 2,
    }));
}

#[test]
fn too_small_buffer_is_not_an_mps_file() {
    let error = parse("NAME\nENDATA").unwrap_err();

    assert!(matches!(error, Import::Parse(_)));
}

#[test]
fn misspelled_optional_section_is_fatal() {
    let program = "\
NAME          TYPO
ROWS
 N  COST
COLUMNS
    X1        COST             1.0
RHS
    RHS1      COST             2.0
RNAGES
    RNG1      COST             1.0
ENDATA";
    let error = parse(program).unwrap_err();

    assert!(matches!(error, Import::Parse(_)));
    assert!(error.to_string().contains("RNAGES"));
}

#[test]
fn load_requires_a_known_extension() {
    let path = std::env::temp_dir().join(format!("mps_load_test_{}.txt", std::process::id()));
    std::fs::write(&path, TESTPROB).unwrap();

    let result = mps_load::load(&path);
    assert!(matches!(result, Err(Import::FileExtension(_))));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn load_reads_from_disk() {
    let path = std::env::temp_dir().join(format!("mps_load_test_{}.mps", std::process::id()));
    std::fs::write(&path, TESTPROB).unwrap();

    let mps = mps_load::load(&path).unwrap();
    assert_eq!(mps.name(), "TESTPROB");
    assert_eq!(mps.element_count(), 9);

    std::fs::remove_file(&path).unwrap();
}
