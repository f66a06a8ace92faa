//! # Tokens used in MPS files

/// Indicates the start of a comment.
pub const COMMENT_INDICATOR: &str = "*";

/// Header of the line holding the program name.
///
/// Should be the first non-comment line of the file.
pub const NAME: &str = "NAME";

/// Header of the row declaration section.
pub const ROWS: &str = "ROWS";

/// Header of the coefficient section.
pub const COLUMNS: &str = "COLUMNS";

/// Header of the right-hand side section.
pub const RHS: &str = "RHS";

/// Header of the optional ranges section.
pub const RANGES: &str = "RANGES";

/// Header of the optional bounds section.
pub const BOUNDS: &str = "BOUNDS";

/// Marks the end of the program.
pub const ENDATA: &str = "ENDATA";

/// Buffers shorter than this can't hold all required section headers.
///
/// Used as a cheap early-out before any scanning happens.
pub const MINIMUM_FILE_SIZE: usize = 41;
