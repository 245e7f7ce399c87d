use thiserror::Error;

use crate::codec::DataType;
use crate::model::{CountConstraint, RecordRef, TagRef};

/// Errors raised while encoding or decoding a payload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// Byte count is not a whole number of words
    #[error("Malformed {data_type} payload: {len} bytes is not a multiple of the {word_width}-byte word width")]
    MalformedPayload {
        data_type: DataType,
        len: usize,
        word_width: usize,
    },

    /// Value does not fit in the type's word
    #[error("Value {value} is out of range for {data_type}")]
    EncodingRange { data_type: DataType, value: String },

    /// Payload has the wrong shape for the type
    #[error("Invalid input for {data_type}: {reason}")]
    InvalidInput {
        data_type: DataType,
        reason: &'static str,
    },

    /// Type code outside 1..=12
    #[error("Unknown data type code: {0}")]
    UnknownType(u16),
}

/// Errors raised while resolving or manipulating tags in a record or block
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TagError {
    /// Encoding or decoding failed
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Tag is not defined, or has no field set
    #[error("Unknown tag {tag}{}", .record.as_ref().map(|r| format!(" in record {r}")).unwrap_or_default())]
    UnknownTag {
        tag: TagRef,
        record: Option<RecordRef>,
    },

    /// Tag matches more than one record and no record was given
    #[error("Tag {tag} is ambiguous: defined in records {records:?}")]
    AmbiguousTag { tag: TagRef, records: Vec<u32> },

    /// Record number or name is not part of the block
    #[error("Unknown record: {0}")]
    UnknownRecord(RecordRef),

    /// Data type not allowed by the tag definition
    #[error("Tag {tag} does not accept {data_type} (allowed: {allowed:?})")]
    TypeMismatch {
        tag: u32,
        data_type: DataType,
        allowed: &'static [DataType],
    },

    /// Word count violates the tag definition or the declared count
    #[error("Tag {tag} has count {count}, expected {expected}")]
    CountMismatch {
        tag: u32,
        count: usize,
        expected: CountConstraint,
    },

    /// Caller supplied an inconsistent set of arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl TagError {
    /// Whether this error means "the tag is not there".
    ///
    /// Facade reads turn these into an absent value instead of an error.
    pub fn is_unknown_tag(&self) -> bool {
        matches!(self, TagError::UnknownTag { .. })
    }
}
