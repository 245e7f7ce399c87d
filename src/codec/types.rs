//! TIFF/Exif data type definitions.
//!
//! The twelve data types of TIFF 6.0 (also used by Exif and, through this
//! crate, by IPTC datasets). Each type has a fixed word width and, for the
//! integer and rational types, a signedness. The static [`Descriptor`]
//! registry is indexed by type code.

use std::fmt;

use serde::Serialize;

use crate::error::CodecError;

// =============================================================================
// DataType
// =============================================================================

/// TIFF field data types, by their type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum DataType {
    /// Unsigned 8-bit integer
    Byte = 1,
    /// Null-terminated 8-bit text
    Ascii = 2,
    /// Unsigned 16-bit integer
    Short = 3,
    /// Unsigned 32-bit integer
    Long = 4,
    /// Two unsigned 32-bit integers: numerator, denominator
    Rational = 5,
    /// Signed 8-bit integer
    SByte = 6,
    /// Opaque bytes, structured by the caller
    Undefined = 7,
    /// Signed 16-bit integer
    SShort = 8,
    /// Signed 32-bit integer
    SLong = 9,
    /// Two signed 32-bit integers: numerator, denominator
    SRational = 10,
    /// IEEE-754 single precision
    Float = 11,
    /// IEEE-754 double precision
    Double = 12,
}

impl DataType {
    /// All data types in code order.
    pub const ALL: [DataType; 12] = [
        DataType::Byte,
        DataType::Ascii,
        DataType::Short,
        DataType::Long,
        DataType::Rational,
        DataType::SByte,
        DataType::Undefined,
        DataType::SShort,
        DataType::SLong,
        DataType::SRational,
        DataType::Float,
        DataType::Double,
    ];

    /// Look up a data type by its TIFF type code.
    ///
    /// Codes outside 1..=12 are an error rather than a silent default.
    pub fn from_code(code: u16) -> Result<Self, CodecError> {
        match code {
            1..=12 => Ok(Self::ALL[code as usize - 1]),
            _ => Err(CodecError::UnknownType(code)),
        }
    }

    /// The TIFF type code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Registry entry for this type.
    #[inline]
    pub fn descriptor(self) -> &'static Descriptor {
        &DESCRIPTORS[self as usize - 1]
    }

    /// Bytes per word.
    #[inline]
    pub fn word_width(self) -> usize {
        self.descriptor().word_width
    }

    /// Signedness of the words, `None` where it does not apply.
    #[inline]
    pub fn signed(self) -> Option<bool> {
        self.descriptor().signed
    }

    /// Upper-case name as used in the TIFF specification.
    pub const fn name(self) -> &'static str {
        match self {
            DataType::Byte => "BYTE",
            DataType::Ascii => "ASCII",
            DataType::Short => "SHORT",
            DataType::Long => "LONG",
            DataType::Rational => "RATIONAL",
            DataType::SByte => "SBYTE",
            DataType::Undefined => "UNDEFINED",
            DataType::SShort => "SSHORT",
            DataType::SLong => "SLONG",
            DataType::SRational => "SRATIONAL",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u16> for DataType {
    type Error = CodecError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        DataType::from_code(code)
    }
}

// =============================================================================
// Descriptor registry
// =============================================================================

/// How the words of a type are packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCodec {
    /// One integer per word
    Integer,
    /// Numerator and denominator, 4 bytes each
    Rational,
    /// IEEE-754 float
    Float,
    /// Null-delimited strings; replaces the word contract entirely
    Text,
    /// Raw bytes passed through unchanged
    Opaque,
}

/// Static description of one data type.
#[derive(Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub data_type: DataType,
    pub word_width: usize,
    pub signed: Option<bool>,
    pub codec: WordCodec,
}

const fn descriptor(
    data_type: DataType,
    word_width: usize,
    signed: Option<bool>,
    codec: WordCodec,
) -> Descriptor {
    Descriptor {
        data_type,
        word_width,
        signed,
        codec,
    }
}

static DESCRIPTORS: [Descriptor; 12] = [
    descriptor(DataType::Byte, 1, Some(false), WordCodec::Integer),
    descriptor(DataType::Ascii, 1, None, WordCodec::Text),
    descriptor(DataType::Short, 2, Some(false), WordCodec::Integer),
    descriptor(DataType::Long, 4, Some(false), WordCodec::Integer),
    descriptor(DataType::Rational, 8, Some(false), WordCodec::Rational),
    descriptor(DataType::SByte, 1, Some(true), WordCodec::Integer),
    descriptor(DataType::Undefined, 1, None, WordCodec::Opaque),
    descriptor(DataType::SShort, 2, Some(true), WordCodec::Integer),
    descriptor(DataType::SLong, 4, Some(true), WordCodec::Integer),
    descriptor(DataType::SRational, 8, Some(true), WordCodec::Rational),
    descriptor(DataType::Float, 4, None, WordCodec::Float),
    descriptor(DataType::Double, 8, None, WordCodec::Float),
];

// =============================================================================
// Tests
// =============================================================================
