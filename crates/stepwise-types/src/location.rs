use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location of a step handler registration.
///
/// `line` is 1-based for human-readable reports. A line of `0` means the
/// registration site is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    /// Create a new location.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// A location for handlers registered without a known call site.
    pub fn unknown() -> Self {
        Self::new("<unknown>", 0)
    }

    /// Whether the registration site is known.
    pub fn is_known(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}:{}", self.file, self.line)
        } else {
            write!(f, "{}", self.file)
        }
    }
}

/// Descriptive metadata of a step definition, consumed by reporters.
///
/// Opaque to the invoker: it never influences coercion or dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepMetadata {
    /// The pattern text the step was matched against.
    pub pattern: String,
    /// Where the handler was registered.
    pub location: Location,
}

impl StepMetadata {
    /// Create metadata for a pattern registered at `location`.
    pub fn new(pattern: impl Into<String>, location: Location) -> Self {
        Self {
            pattern: pattern.into(),
            location,
        }
    }
}

impl fmt::Display for StepMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pattern, self.location)
    }
}
