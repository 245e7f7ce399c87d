//! # metainfo
//!
//! Typed access to the Exif and IPTC metadata of image files.
//!
//! This library provides the value codec and tag model that sit between a
//! container parser (which locates the metadata in a JPEG or TIFF) and an
//! application that wants to read or edit individual tags by name.
//!
//! ## Features
//!
//! - **Data-type codec**: all twelve TIFF data types, in either byte order
//! - **Tag definitions**: Exif (IFD0, IFD1, Exif, GPS, Interop) and IPTC
//!   (Envelope, Application) tag tables with allowed types and counts
//! - **Validation**: type and count checks before any field is changed
//! - **Name resolution**: tags addressed by name or number, with ambiguity
//!   detection across records
//!
//! ## Architecture
//!
//! - [`codec`] - data types, byte order, and payload encode/decode
//! - [`model`] - tag definitions, records and blocks
//! - [`file`] - per-file owner of the Exif and IPTC blocks
//! - [`config`] - settings for newly created blocks
//! - [`error`] - codec and tag errors
//!
//! ## Example
//!
//! ```rust
//! use metainfo::{Block, BlockConfig, MetaInfoFile, TagWrite, Value};
//!
//! let mut file = MetaInfoFile::new();
//! file.set_exif(Block::exif(&BlockConfig::default()));
//!
//! file.set_exif_tag("Model", None, TagWrite::payload("Canon EOS")).unwrap();
//! assert_eq!(
//!     file.get_exif_tag("Model", None).unwrap(),
//!     Some(Value::Ascii(vec!["Canon EOS".to_string()]))
//! );
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod file;
pub mod model;

// Re-export commonly used types
pub use codec::{decode, encode, ByteOrder, DataType, Payload, Rational, SRational, Value};
pub use config::{BlockConfig, DEFAULT_BYTE_ORDER};
pub use error::{CodecError, TagError};
pub use file::MetaInfoFile;
pub use model::{
    Block, CountConstraint, RawField, Record, RecordRef, TagDefinition, TagRef, TagWrite,
};
