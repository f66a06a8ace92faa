//! # Error reporting for loading MPS files
//!
//! A collection of enums and structures describing any problems encountered while reading and
//! parsing a program.
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::io;

/// An `Import` error is created when a program could not be loaded.
///
/// It is the highest error in the error hierarchy.
#[derive(Debug)]
pub enum Import {
    /// The file extension of the provided file path is not known or supported.
    ///
    /// The contained `String` is a message for the end user.
    FileExtension(String),
    /// The file to read isn't found, or the reading of the file couldn't start or was interrupted.
    IO(io::Error),
    /// Contents of the file could not be parsed into a program.
    ///
    /// # Note
    ///
    /// This variant should only be created for structurally incorrect files; a file that is
    /// structured like an MPS program but contradicts itself is an `Inconsistency` instead.
    Parse(Parse),
    /// There is a logical inconsistency in the program described by the file.
    ///
    /// For example, a coefficient might be given for a row which is not known.
    Inconsistency(Inconsistency),
}

impl Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Import::FileExtension(description) => description.fmt(f),
            Import::IO(error) => error.fmt(f),
            Import::Parse(error) => error.fmt(f),
            Import::Inconsistency(error) => error.fmt(f),
        }
    }
}

impl Error for Import {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Import::FileExtension(_) => None,
            Import::IO(error) => Some(error),
            Import::Parse(error) => Some(error),
            Import::Inconsistency(error) => Some(error),
        }
    }
}

impl From<Parse> for Import {
    fn from(error: Parse) -> Self {
        Import::Parse(error)
    }
}

impl From<Inconsistency> for Import {
    fn from(error: Inconsistency) -> Self {
        Import::Inconsistency(error)
    }
}

/// Shorthand for results of fallible parsing steps.
pub type ParseResult<T> = Result<T, Parse>;

/// A `Parse` error represents a structural problem encountered in the file.
///
/// It may recursively hold more `Parse` errors to provide more detail. At the end of this chain,
/// there may be a file location containing a line number and line at which the error was caused.
#[derive(Debug)]
pub struct Parse {
    description: String,
    source: Option<ParseSource>,
}

/// Describes what caused a `Parse` error.
///
/// Either a file line number with the line contents, or another `Parse` error with its own
/// description and, optionally, a cause.
#[derive(Debug)]
enum ParseSource {
    FileLocation(u64, String),
    Nested(Box<Parse>),
}

impl Parse {
    /// Create a new `Parse` error with only a description.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong at the moment of creation.
    pub fn new(description: impl Into<String>) -> Parse {
        Parse { description: description.into(), source: None, }
    }

    /// Create a new `Parse` error caused at a known location in the file.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong at the moment of creation.
    /// * `file_location`: Line number and line contents that caused the error.
    pub fn with_location(description: impl Into<String>, file_location: FileLocation) -> Parse {
        let (line_number, line) = file_location;
        Parse {
            description: description.into(),
            source: Some(ParseSource::FileLocation(line_number, line.to_string())),
        }
    }

    /// Wrap this error in a new one with a broader description.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong at the moment of wrapping.
    pub fn wrap(self, description: impl Into<String>) -> Parse {
        Parse {
            description: description.into(),
            source: Some(ParseSource::Nested(Box::new(self))),
        }
    }
}

impl Display for Parse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description)?;
        match &self.source {
            None => Ok(()),
            Some(ParseSource::FileLocation(line_number, line)) => {
                write!(f, "\n\tcaused at line {}:\t{}", line_number, line)
            },
            Some(ParseSource::Nested(error)) => write!(f, "\n{}", error),
        }
    }
}

impl Error for Parse {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.source {
            Some(ParseSource::Nested(error)) => Some(error),
            _ => None,
        }
    }
}

/// A `FileLocation` references a line in the file by the line number of the file as originally
/// read from the disk. It contains a reference to the line itself.
pub type FileLocation<'a> = (u64, &'a str);

/// An `Inconsistency` is created when the program contradicts itself.
///
/// This error is not returned for structurally malformed files; it is meant for name clashes and
/// references to names that were never declared. Conflicting line numbers are part of the
/// description.
#[derive(Debug)]
pub struct Inconsistency {
    description: String,
}

impl Inconsistency {
    /// Wrap a text in an `Inconsistency`.
    ///
    /// # Arguments
    ///
    /// * `description`: A human-readable text meant for the end user.
    pub fn new(description: impl Into<String>) -> Inconsistency {
        Inconsistency { description: description.into(), }
    }
}

impl Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

impl Error for Inconsistency {}
