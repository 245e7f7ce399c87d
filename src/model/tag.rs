//! Tag and record identifiers and static tag definitions.

use std::fmt;

use serde::Serialize;

use crate::codec::DataType;

// =============================================================================
// Name-or-number references
// =============================================================================

/// A tag given either by number or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagRef {
    Number(u32),
    Name(String),
}

impl From<u32> for TagRef {
    fn from(number: u32) -> Self {
        TagRef::Number(number)
    }
}

impl From<u16> for TagRef {
    fn from(number: u16) -> Self {
        TagRef::Number(number as u32)
    }
}

impl From<&str> for TagRef {
    fn from(name: &str) -> Self {
        TagRef::Name(name.to_owned())
    }
}

impl From<String> for TagRef {
    fn from(name: String) -> Self {
        TagRef::Name(name)
    }
}

impl fmt::Display for TagRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagRef::Number(n) => write!(f, "{n}"),
            TagRef::Name(name) => write!(f, "\"{name}\""),
        }
    }
}

/// A record given either by number or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordRef {
    Number(u32),
    Name(String),
}

impl From<u32> for RecordRef {
    fn from(number: u32) -> Self {
        RecordRef::Number(number)
    }
}

impl From<&str> for RecordRef {
    fn from(name: &str) -> Self {
        RecordRef::Name(name.to_owned())
    }
}

impl From<String> for RecordRef {
    fn from(name: String) -> Self {
        RecordRef::Name(name)
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Number(n) => write!(f, "{n}"),
            RecordRef::Name(name) => write!(f, "\"{name}\""),
        }
    }
}

// =============================================================================
// Count constraints
// =============================================================================

/// Allowed number of words in a tag's payload.
///
/// ASCII counts include the terminating null of each string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountConstraint {
    Exact(usize),
    /// Inclusive bounds
    Range(usize, usize),
    Unbounded,
}

impl CountConstraint {
    pub fn allows(self, count: usize) -> bool {
        match self {
            CountConstraint::Exact(n) => count == n,
            CountConstraint::Range(min, max) => (min..=max).contains(&count),
            CountConstraint::Unbounded => true,
        }
    }
}

impl fmt::Display for CountConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountConstraint::Exact(n) => write!(f, "exactly {n}"),
            CountConstraint::Range(min, max) => write!(f, "{min} to {max}"),
            CountConstraint::Unbounded => f.write_str("any count"),
        }
    }
}

// =============================================================================
// Tag definitions
// =============================================================================

/// Static description of a known tag within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDefinition {
    pub number: u32,
    pub name: &'static str,
    /// Allowed types; the first one is used when a write names no type.
    pub allowed_types: &'static [DataType],
    pub count: CountConstraint,
}

impl TagDefinition {
    pub const fn new(
        number: u32,
        name: &'static str,
        allowed_types: &'static [DataType],
        count: CountConstraint,
    ) -> Self {
        Self {
            number,
            name,
            allowed_types,
            count,
        }
    }

    /// Type used when none is given explicitly.
    pub fn primary_type(&self) -> Option<DataType> {
        self.allowed_types.first().copied()
    }

    pub fn allows_type(&self, data_type: DataType) -> bool {
        self.allowed_types.contains(&data_type)
    }
}
