//! A metadata block: the records of one metadata kind (Exif, IPTC).
//!
//! The block resolves a tag given by name or number to the single record
//! that owns it, then forwards reads and writes to that record.
//!
//! # Resolution
//!
//! Tag numbers and names repeat across records (IFD0 and IFD1 both define
//! `ImageWidth`; IPTC records 1 and 2 both define dataset 5). A lookup that
//! names a record searches only that record. A lookup without one collects
//! every match across all records and fails if there is more than one; the
//! block never picks a preferred record.

use std::collections::HashMap;

use tracing::debug;

use super::record::{Record, TagWrite};
use super::tag::{RecordRef, TagRef};
use crate::codec::{ByteOrder, DataType, Payload, Value};
use crate::error::TagError;

/// The records of one metadata kind.
#[derive(Debug, Clone)]
pub struct Block {
    name: &'static str,
    byte_order: ByteOrder,
    records: Vec<Record>,
    by_number: HashMap<u32, usize>,
    by_name: HashMap<&'static str, u32>,
}

impl Block {
    /// Create a block from its records, in declaration order.
    ///
    /// Every record takes the block's byte order. If two records share a
    /// number or name, the first one wins.
    pub fn new(name: &'static str, byte_order: ByteOrder, records: Vec<Record>) -> Self {
        let records: Vec<Record> = records
            .into_iter()
            .map(|record| record.with_byte_order(byte_order))
            .collect();

        let mut by_number = HashMap::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            by_number.entry(record.number()).or_insert(i);
            by_name.entry(record.name()).or_insert(record.number());
        }

        Self {
            name,
            byte_order,
            records,
            by_number,
            by_name,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Records in declaration order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, record: &RecordRef) -> Result<&Record, TagError> {
        let index = self.record_index(self.resolve_record_number(record)?)?;
        Ok(&self.records[index])
    }

    pub fn record_mut(&mut self, record: &RecordRef) -> Result<&mut Record, TagError> {
        let index = self.record_index(self.resolve_record_number(record)?)?;
        Ok(&mut self.records[index])
    }

    /// True if any record has a field set.
    pub fn has_tags(&self) -> bool {
        self.records.iter().any(Record::has_tags)
    }

    fn record_index(&self, number: u32) -> Result<usize, TagError> {
        self.by_number
            .get(&number)
            .copied()
            .ok_or(TagError::UnknownRecord(RecordRef::Number(number)))
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// Resolve a record number or name to the record number.
    pub fn resolve_record_number(&self, record: &RecordRef) -> Result<u32, TagError> {
        let number = match record {
            RecordRef::Number(n) => self.by_number.contains_key(n).then_some(*n),
            RecordRef::Name(name) => self.by_name.get(name.as_str()).copied(),
        };
        number.ok_or_else(|| TagError::UnknownRecord(record.clone()))
    }

    /// Find the `(record number, tag number)` that owns `tag`.
    ///
    /// # Errors
    /// - `UnknownRecord` if `record` is given but not part of the block
    /// - `UnknownTag` if no searched record defines the tag
    /// - `AmbiguousTag` if no record is given and several records define it
    pub fn locate(
        &self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
    ) -> Result<(u32, u32), TagError> {
        self.find(&tag.into(), record.as_ref())
    }

    fn find(&self, tag: &TagRef, record: Option<&RecordRef>) -> Result<(u32, u32), TagError> {
        let searched: Vec<&Record> = match record {
            Some(record) => {
                let index = self.record_index(self.resolve_record_number(record)?)?;
                vec![&self.records[index]]
            }
            None => self.records.iter().collect(),
        };

        let found: Vec<(u32, u32)> = searched
            .iter()
            .filter_map(|r| r.resolve_tag_number(tag).map(|t| (r.number(), t)))
            .collect();

        match found.as_slice() {
            [] => Err(TagError::UnknownTag {
                tag: tag.clone(),
                record: record.cloned(),
            }),
            [single] => Ok(*single),
            _ => {
                let records: Vec<u32> = found.iter().map(|&(r, _)| r).collect();
                debug!(block = self.name, %tag, ?records, "ambiguous tag lookup");
                Err(TagError::AmbiguousTag {
                    tag: tag.clone(),
                    records,
                })
            }
        }
    }

    /// Like `find`, but a numeric tag in an explicit record resolves even
    /// when no definition exists, so unchecked fields stay reachable.
    fn find_field(&self, tag: &TagRef, record: Option<&RecordRef>) -> Result<(u32, u32), TagError> {
        match self.find(tag, record) {
            Err(err) if err.is_unknown_tag() => match (tag, record) {
                (TagRef::Number(number), Some(record)) => {
                    Ok((self.resolve_record_number(record)?, *number))
                }
                _ => Err(err),
            },
            other => other,
        }
    }

    // -------------------------------------------------------------------------
    // Facade
    // -------------------------------------------------------------------------

    /// Read a tag, or `None` if it is unknown or not set.
    ///
    /// `data_type` is needed to decode undefined tags loaded without a type.
    /// Ambiguity and other errors are still returned.
    pub fn get_tag(
        &self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
        data_type: Option<DataType>,
    ) -> Result<Option<Value>, TagError> {
        let tag = tag.into();
        let result = self
            .find_field(&tag, record.as_ref())
            .and_then(|(r, t)| self.records[self.record_index(r)?].get_tag(t, data_type));

        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_unknown_tag() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Write a tag.
    ///
    /// A tag no record defines can only be written by number into an
    /// explicit record; such writes are unchecked and need `write.data_type`.
    pub fn set_tag(
        &mut self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
        write: TagWrite,
    ) -> Result<(), TagError> {
        let tag = tag.into();
        let (record_number, tag_number, write) = match self.find(&tag, record.as_ref()) {
            Ok((r, t)) => (r, t, write),
            Err(err) if err.is_unknown_tag() => {
                let (TagRef::Number(number), Some(record)) = (&tag, record.as_ref()) else {
                    return Err(err);
                };
                let record_number = self.resolve_record_number(record)?;
                (record_number, *number, TagWrite { check: false, ..write })
            }
            Err(err) => return Err(err),
        };

        let index = self.record_index(record_number)?;
        self.records[index].set_tag(tag_number, write)
    }

    /// Append to a defined tag, as for repeatable IPTC datasets.
    pub fn append_tag(
        &mut self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
        payload: impl Into<Payload>,
    ) -> Result<(), TagError> {
        let (record_number, tag_number) = self.find(&tag.into(), record.as_ref())?;
        let index = self.record_index(record_number)?;
        self.records[index].append_tag(tag_number, payload)
    }

    /// Remove a tag; removing a tag that is not set is not an error.
    pub fn remove_tag(
        &mut self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
    ) -> Result<(), TagError> {
        let (record_number, tag_number) = self.find_field(&tag.into(), record.as_ref())?;
        let index = self.record_index(record_number)?;
        self.records[index].remove_tag(tag_number);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
