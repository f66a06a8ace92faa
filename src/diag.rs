//! # Non-fatal diagnostics
//!
//! Warnings don't abort a load. They are collected with a small per-section cap on how many are
//! recorded verbatim; further occurrences are only counted and summarized at the end.
use std::fmt;
use std::fmt::Display;

use enum_map::{Enum, EnumMap};

/// How many warnings per section are recorded verbatim.
const MAX_WARNINGS_PER_SECTION: u64 = 2;

/// Sections that can produce capped value warnings.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum WarningSection {
    /// The coefficient section.
    Columns,
    /// The right-hand side section.
    Rhs,
    /// The ranges section.
    Ranges,
    /// The bounds section.
    Bounds,
}

impl Display for WarningSection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            WarningSection::Columns => "COLUMNS",
            WarningSection::Rhs => "RHS",
            WarningSection::Ranges => "RANGES",
            WarningSection::Bounds => "BOUNDS",
        };
        write!(f, "{}", name)
    }
}

/// A non-fatal observation made while loading a program.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The RHS section holds no data lines. All right-hand sides keep their zero default.
    EmptyRhs,
    /// A value token parsed to exactly zero and was not stored.
    ZeroValue {
        /// Section the token appeared in.
        section: WarningSection,
        /// Line the token appeared on.
        line: u64,
        /// The token as it appeared in the file.
        token: String,
    },
    /// A BOUNDS line used a type code outside the defined set. The line was skipped.
    UnknownBoundType {
        /// Line the code appeared on.
        line: u64,
        /// The unrecognized code.
        code: String,
    },
    /// More warnings occurred in a section than were recorded verbatim.
    Suppressed {
        /// Section the warnings occurred in.
        section: WarningSection,
        /// How many warnings were not recorded.
        count: u64,
    },
}

impl Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::EmptyRhs => {
                write!(f, "RHS section holds no data")
            },
            Warning::ZeroValue { section, line, token } => {
                write!(f, "{} warning (line {}): value given = {}, not set", section, line, token)
            },
            Warning::UnknownBoundType { line, code } => {
                write!(f, "BOUNDS warning (line {}): undefined type \"{}\"", line, code)
            },
            Warning::Suppressed { section, count } => {
                write!(f, "{} warnings not reported = {}", section, count)
            },
        }
    }
}

impl Warning {
    /// The section this warning counts against, if it is capped.
    fn capped_section(&self) -> Option<WarningSection> {
        match self {
            Warning::ZeroValue { section, .. } => Some(*section),
            Warning::UnknownBoundType { .. } => Some(WarningSection::Bounds),
            Warning::EmptyRhs | Warning::Suppressed { .. } => None,
        }
    }
}

/// Collects warnings during a load.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    recorded: Vec<Warning>,
    shown: EnumMap<WarningSection, u64>,
    suppressed: EnumMap<WarningSection, u64>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning, or only count it once its section's cap is reached.
    pub fn push(&mut self, warning: Warning) {
        match warning.capped_section() {
            None => self.recorded.push(warning),
            Some(section) => {
                if self.shown[section] < MAX_WARNINGS_PER_SECTION {
                    self.shown[section] += 1;
                    self.recorded.push(warning);
                } else {
                    self.suppressed[section] += 1;
                }
            },
        }
    }

    /// All recorded warnings, with a summary entry per section that exceeded its cap.
    pub fn into_warnings(mut self) -> Vec<Warning> {
        for (section, count) in self.suppressed {
            if count > 0 {
                self.recorded.push(Warning::Suppressed { section, count });
            }
        }

        self.recorded
    }
}
