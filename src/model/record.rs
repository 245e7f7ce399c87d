//! A single metadata record: one IFD, or one IPTC record class.
//!
//! A record owns its static tag definitions and the fields that have been
//! set. Fields are stored encoded; the codec runs eagerly on write and
//! lazily on read.

use std::collections::{BTreeMap, HashMap};

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use super::tag::{CountConstraint, RecordRef, TagDefinition, TagRef};
use crate::codec::{decode, encode, word_count, ByteOrder, DataType, Payload, Value};
use crate::error::TagError;

// =============================================================================
// RawField
// =============================================================================

/// Encoded payload of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Type the payload was written with, if known.
    ///
    /// Fields loaded from IPTC data carry no type on disk.
    pub data_type: Option<DataType>,
    pub data: Bytes,
}

// =============================================================================
// TagWrite
// =============================================================================

/// Arguments of a tag write.
///
/// Exactly one of `payload` and `raw_data` must be set. With `check`
/// (the default) the tag must be defined by the record and the type and
/// count are validated; without it `data_type` is required and nothing is
/// validated.
#[derive(Debug, Clone, PartialEq)]
pub struct TagWrite {
    pub payload: Option<Payload>,
    pub raw_data: Option<Bytes>,
    pub check: bool,
    pub data_type: Option<DataType>,
    pub data_count: Option<usize>,
}

impl Default for TagWrite {
    fn default() -> Self {
        Self {
            payload: None,
            raw_data: None,
            check: true,
            data_type: None,
            data_count: None,
        }
    }
}

impl TagWrite {
    /// Write an unencoded payload.
    pub fn payload(payload: impl Into<Payload>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    /// Write already-encoded bytes.
    pub fn raw(data: impl Into<Bytes>) -> Self {
        Self {
            raw_data: Some(data.into()),
            ..Self::default()
        }
    }

    /// Skip validation; for vendor or otherwise undefined tags.
    pub fn unchecked(mut self) -> Self {
        self.check = false;
        self
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// Expected word count, checked against the encoded payload.
    pub fn with_count(mut self, count: usize) -> Self {
        self.data_count = Some(count);
        self
    }
}

/// Where the bytes of a write come from.
enum Source {
    Payload(Payload),
    Raw(Bytes),
}

// =============================================================================
// Record
// =============================================================================

/// One record of a metadata block.
#[derive(Debug, Clone)]
pub struct Record {
    number: u32,
    name: &'static str,
    byte_order: ByteOrder,
    definitions: &'static [TagDefinition],
    by_number: HashMap<u32, usize>,
    by_name: HashMap<&'static str, u32>,
    fields: BTreeMap<u32, RawField>,
}

impl Record {
    /// Create an empty record over a static definition table.
    pub fn new(number: u32, name: &'static str, definitions: &'static [TagDefinition]) -> Self {
        let by_number = definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (def.number, i))
            .collect();
        let by_name = definitions.iter().map(|def| (def.name, def.number)).collect();

        Self {
            number,
            name,
            byte_order: ByteOrder::default(),
            definitions,
            by_number,
            by_name,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn definitions(&self) -> &'static [TagDefinition] {
        self.definitions
    }

    pub fn tag_definition(&self, tag: u32) -> Option<&'static TagDefinition> {
        let definitions = self.definitions;
        self.by_number.get(&tag).map(|&i| &definitions[i])
    }

    /// Resolve a tag number or name against this record's definitions.
    ///
    /// Returns `None` when the record does not define the tag; the caller
    /// decides whether that is an error.
    pub fn resolve_tag_number(&self, tag: &TagRef) -> Option<u32> {
        match tag {
            TagRef::Number(n) => self.by_number.contains_key(n).then_some(*n),
            TagRef::Name(name) => self.by_name.get(name.as_str()).copied(),
        }
    }

    fn unknown_tag(&self, tag: u32) -> TagError {
        TagError::UnknownTag {
            tag: TagRef::Number(tag),
            record: Some(RecordRef::Number(self.number)),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Decode the field set for `tag`.
    ///
    /// The type used is, in order: `explicit_type`, the type the field was
    /// written with, the definition's primary type.
    ///
    /// # Errors
    /// - `UnknownTag` if no field is set
    /// - `InvalidArgument` if no type is available to decode with
    /// - `Codec` if the stored bytes are malformed for the type
    pub fn get_tag(&self, tag: u32, explicit_type: Option<DataType>) -> Result<Value, TagError> {
        let field = self.fields.get(&tag).ok_or_else(|| self.unknown_tag(tag))?;
        let data_type = explicit_type
            .or(field.data_type)
            .or_else(|| self.tag_definition(tag).and_then(TagDefinition::primary_type))
            .ok_or(TagError::InvalidArgument(
                "a data type is required to decode an undefined tag",
            ))?;

        Ok(decode(data_type, &field.data, self.byte_order)?)
    }

    pub fn raw_field(&self, tag: u32) -> Option<&RawField> {
        self.fields.get(&tag)
    }

    pub fn has_tags(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Numbers of all set tags, ascending.
    pub fn tag_nums(&self) -> Vec<u32> {
        self.fields.keys().copied().collect()
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Create or overwrite the field for `tag`.
    ///
    /// All validation happens before the field map is touched, so a failed
    /// write leaves the record unchanged.
    pub fn set_tag(&mut self, tag: u32, write: TagWrite) -> Result<(), TagError> {
        let TagWrite {
            payload,
            raw_data,
            check,
            data_type,
            data_count,
        } = write;

        let source = match (payload, raw_data) {
            (Some(payload), None) => Source::Payload(payload),
            (None, Some(raw)) => Source::Raw(raw),
            (Some(_), Some(_)) => {
                return Err(TagError::InvalidArgument(
                    "supply either a payload or raw data, not both",
                ))
            }
            (None, None) => {
                return Err(TagError::InvalidArgument(
                    "supply either a payload or raw data",
                ))
            }
        };

        let definition = self.tag_definition(tag);
        let data_type = if check {
            let definition = definition.ok_or_else(|| self.unknown_tag(tag))?;
            let data_type = data_type
                .or_else(|| definition.primary_type())
                .ok_or(TagError::InvalidArgument("tag definition has no data type"))?;
            if !definition.allows_type(data_type) {
                return Err(TagError::TypeMismatch {
                    tag,
                    data_type,
                    allowed: definition.allowed_types,
                });
            }
            data_type
        } else {
            if definition.is_some() {
                return Err(TagError::InvalidArgument(
                    "unchecked writes are only allowed for undefined tags",
                ));
            }
            data_type.ok_or(TagError::InvalidArgument(
                "unchecked writes need an explicit data type",
            ))?
        };

        let data = match source {
            Source::Payload(payload) => encode(data_type, &payload, self.byte_order)?,
            Source::Raw(raw) => raw,
        };

        if let Some(definition) = definition.filter(|_| check) {
            let count = word_count(data_type, data.len())?;
            if let Some(declared) = data_count {
                if declared != count {
                    return Err(TagError::CountMismatch {
                        tag,
                        count,
                        expected: CountConstraint::Exact(declared),
                    });
                }
            }
            if !definition.count.allows(count) {
                return Err(TagError::CountMismatch {
                    tag,
                    count,
                    expected: definition.count,
                });
            }
        } else {
            debug!(record = self.number, tag, %data_type, "writing undefined tag unchecked");
        }

        trace!(record = self.number, tag, data = %hex::encode(&data), "field stored");
        self.fields.insert(
            tag,
            RawField {
                data_type: Some(data_type),
                data,
            },
        );
        Ok(())
    }

    /// Append `payload` to the field for `tag`, creating it if absent.
    ///
    /// Used for repeatable IPTC datasets. The type is the one the field
    /// was written with, or the definition's primary type; the count
    /// constraint applies to the appended piece.
    pub fn append_tag(&mut self, tag: u32, payload: impl Into<Payload>) -> Result<(), TagError> {
        let definition = self.tag_definition(tag).ok_or_else(|| self.unknown_tag(tag))?;
        let data_type = self
            .fields
            .get(&tag)
            .and_then(|field| field.data_type)
            .or_else(|| definition.primary_type())
            .ok_or(TagError::InvalidArgument("tag definition has no data type"))?;
        if !definition.allows_type(data_type) {
            return Err(TagError::TypeMismatch {
                tag,
                data_type,
                allowed: definition.allowed_types,
            });
        }

        let piece = encode(data_type, &payload.into(), self.byte_order)?;
        let count = word_count(data_type, piece.len())?;
        if !definition.count.allows(count) {
            return Err(TagError::CountMismatch {
                tag,
                count,
                expected: definition.count,
            });
        }

        let field = self.fields.entry(tag).or_insert_with(|| RawField {
            data_type: Some(data_type),
            data: Bytes::new(),
        });
        let mut data = BytesMut::with_capacity(field.data.len() + piece.len());
        data.extend_from_slice(&field.data);
        data.extend_from_slice(&piece);
        field.data = data.freeze();
        field.data_type = Some(data_type);

        trace!(record = self.number, tag, piece = %hex::encode(&piece), "field appended");
        Ok(())
    }

    /// Store a field as read from disk, without validation.
    ///
    /// Container parsers use this to populate a record; `data_type` is
    /// `None` when the container does not record one.
    pub fn load_field(&mut self, tag: u32, data: impl Into<Bytes>, data_type: Option<DataType>) {
        self.fields.insert(
            tag,
            RawField {
                data_type,
                data: data.into(),
            },
        );
    }

    /// Remove the field for `tag`; removing an absent tag is not an error.
    pub fn remove_tag(&mut self, tag: u32) -> Option<RawField> {
        let removed = self.fields.remove(&tag);
        if removed.is_some() {
            debug!(record = self.number, tag, "field removed");
        }
        removed
    }
}

// =============================================================================
// Tests
// =============================================================================
