//! TIFF/Exif data-type codec.
//!
//! Converts between the byte form of a field and typed values for the
//! twelve TIFF data types.
//!
//! # Key Concepts
//!
//! - **Word**: every type except ASCII and UNDEFINED is a sequence of
//!   fixed-width words (1, 2, 4 or 8 bytes). A payload whose length is not
//!   a whole number of words is malformed.
//!
//! - **Byte order**: multi-byte words follow the byte order of the
//!   enclosing structure (the TIFF header for Exif, big-endian for IPTC).
//!
//! - **Text**: ASCII fields hold one or more null-terminated strings.

pub mod byteform;
mod types;
mod values;

pub use byteform::ByteOrder;
pub use types::{DataType, Descriptor, WordCodec};
pub use values::{decode, encode, word_count, Payload, Rational, SRational, Value};
