//! # Loading MPS programs
//!
//! A loader for linear programs in the [MPS format](https://en.wikipedia.org/wiki/MPS_(format)):
//! plain-text sections `NAME`, `ROWS`, `COLUMNS`, `RHS`, optionally `RANGES` and `BOUNDS`,
//! terminated by `ENDATA`. The result is a validated [`Mps`] model with dense row and column
//! ids, dense rim vectors and a flat column-major sparse kernel, ready to feed a solver.
//!
//! Either a complete, internally consistent model is returned, or an error; nothing partial
//! survives a failed load.
#![warn(missing_docs)]

use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub mod error;
pub mod model;

mod diag;
mod parse;
mod scan;
mod sort;
mod table;
mod token;

pub use diag::{Warning, WarningSection};
pub use model::{KERNEL_SENTINEL_ROW, Mps, RowKind};

use crate::error::Import;

/// Load an MPS program from a file.
///
/// The whole file is read into memory up front; parsing is a single pass over that buffer.
///
/// # Errors
///
/// When the file extension is not recognized, the file cannot be read, or its contents don't
/// describe a consistent program.
pub fn load(file_path: &Path) -> Result<Mps, Import> {
    let mut program = String::new();
    File::open(file_path)
        .map_err(Import::IO)?
        .read_to_string(&mut program)
        .map_err(Import::IO)?;

    match file_path.extension().and_then(OsStr::to_str) {
        Some("mps" | "MPS") => parse(&program),
        Some(extension) => Err(Import::FileExtension(format!(
            "Could not recognise file extension \"{}\" of file: {:?}", extension, file_path,
        ))),
        None => Err(Import::FileExtension(format!(
            "Could not read an extension from file path: {:?}", file_path,
        ))),
    }
}

/// Parse an MPS program held in memory.
///
/// # Arguments
///
/// * `program`: The entire program, sections in file order.
///
/// # Errors
///
/// When the program is structurally malformed or contradicts itself.
pub fn parse(program: &str) -> Result<Mps, Import> {
    parse::parse_program(program)
}
