//! Top-level owner of a file's metadata blocks.
//!
//! `MetaInfoFile` holds at most one Exif and one IPTC block. A container
//! parser attaches them after locating the metadata in a file; until then
//! reads return `None` and writes do nothing.

use crate::codec::{DataType, Payload, Value};
use crate::error::TagError;
use crate::model::{Block, RecordRef, TagRef, TagWrite};

/// Exif and IPTC metadata of one file.
#[derive(Debug, Clone, Default)]
pub struct MetaInfoFile {
    exif: Option<Block>,
    iptc: Option<Block>,
}

impl MetaInfoFile {
    /// A file with no metadata blocks attached.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exif(&self) -> Option<&Block> {
        self.exif.as_ref()
    }

    pub fn exif_mut(&mut self) -> Option<&mut Block> {
        self.exif.as_mut()
    }

    /// Attach an Exif block, returning the previous one.
    pub fn set_exif(&mut self, block: Block) -> Option<Block> {
        self.exif.replace(block)
    }

    pub fn take_exif(&mut self) -> Option<Block> {
        self.exif.take()
    }

    pub fn iptc(&self) -> Option<&Block> {
        self.iptc.as_ref()
    }

    pub fn iptc_mut(&mut self) -> Option<&mut Block> {
        self.iptc.as_mut()
    }

    /// Attach an IPTC block, returning the previous one.
    pub fn set_iptc(&mut self, block: Block) -> Option<Block> {
        self.iptc.replace(block)
    }

    pub fn take_iptc(&mut self) -> Option<Block> {
        self.iptc.take()
    }

    // -------------------------------------------------------------------------
    // Exif
    // -------------------------------------------------------------------------

    /// Read an Exif tag by name or number.
    ///
    /// Returns `None` if there is no Exif block or the tag is not set.
    pub fn get_exif_tag(
        &self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
    ) -> Result<Option<Value>, TagError> {
        match &self.exif {
            Some(block) => block.get_tag(tag, record, None),
            None => Ok(None),
        }
    }

    /// Write an Exif tag. Does nothing if there is no Exif block.
    ///
    /// Unknown tags are rejected unless written by number into an explicit
    /// record with a data type; see [`Block::set_tag`].
    pub fn set_exif_tag(
        &mut self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
        write: TagWrite,
    ) -> Result<(), TagError> {
        match &mut self.exif {
            Some(block) => block.set_tag(tag, record, write),
            None => Ok(()),
        }
    }

    pub fn del_exif_tag(
        &mut self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
    ) -> Result<(), TagError> {
        match &mut self.exif {
            Some(block) => block.remove_tag(tag, record),
            None => Ok(()),
        }
    }

    // -------------------------------------------------------------------------
    // IPTC
    // -------------------------------------------------------------------------

    /// Read an IPTC dataset by name or number.
    ///
    /// `data_type` decodes datasets that have no definition and were
    /// loaded without a type.
    pub fn get_iptc_tag(
        &self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
        data_type: Option<DataType>,
    ) -> Result<Option<Value>, TagError> {
        match &self.iptc {
            Some(block) => block.get_tag(tag, record, data_type),
            None => Ok(None),
        }
    }

    pub fn set_iptc_tag(
        &mut self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
        write: TagWrite,
    ) -> Result<(), TagError> {
        match &mut self.iptc {
            Some(block) => block.set_tag(tag, record, write),
            None => Ok(()),
        }
    }

    /// Add one more repetition to an IPTC dataset.
    pub fn append_iptc_tag(
        &mut self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
        payload: impl Into<Payload>,
    ) -> Result<(), TagError> {
        match &mut self.iptc {
            Some(block) => block.append_tag(tag, record, payload),
            None => Ok(()),
        }
    }

    pub fn del_iptc_tag(
        &mut self,
        tag: impl Into<TagRef>,
        record: Option<RecordRef>,
    ) -> Result<(), TagError> {
        match &mut self.iptc {
            Some(block) => block.remove_tag(tag, record),
            None => Ok(()),
        }
    }
}
