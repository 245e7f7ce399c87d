//! Typed payload encoding and decoding.
//!
//! [`encode`] turns an application-facing [`Payload`] into the byte form of
//! a field; [`decode`] turns field bytes back into a typed [`Value`]. Both
//! follow the word contract of the type's [`Descriptor`](super::Descriptor):
//! each scalar occupies exactly one word of the type's width, in input
//! order. ASCII and UNDEFINED replace that contract: ASCII is a run of
//! null-terminated strings and UNDEFINED is passed through unchanged.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;
use tracing::trace;

use super::byteform::{
    decode_float, decode_int, decode_rational, encode_float, encode_int, encode_rational,
    ByteOrder,
};
use super::types::{DataType, WordCodec};
use crate::error::CodecError;

// =============================================================================
// Rationals
// =============================================================================

/// An unsigned rational number, which is a pair of 32-bit unsigned integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rational {
    pub num: u32,
    pub denom: u32,
}

impl Rational {
    pub const fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.denom as f64
    }
}

impl From<(u32, u32)> for Rational {
    fn from((num, denom): (u32, u32)) -> Self {
        Self::new(num, denom)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

/// A signed rational number, which is a pair of 32-bit signed integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SRational {
    pub num: i32,
    pub denom: i32,
}

impl SRational {
    pub const fn new(num: i32, denom: i32) -> Self {
        Self { num, denom }
    }

    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.denom as f64
    }
}

impl From<(i32, i32)> for SRational {
    fn from((num, denom): (i32, i32)) -> Self {
        Self::new(num, denom)
    }
}

impl fmt::Display for SRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

// =============================================================================
// Payload
// =============================================================================

/// Unencoded value(s) supplied by the application for a field.
///
/// A bare scalar converts into a one-element sequence, so `Payload::from(3u16)`
/// and `Payload::from(vec![3u16])` encode identically.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Integers for BYTE, SHORT, LONG and their signed variants
    Int(Vec<i64>),
    /// `(numerator, denominator)` pairs for RATIONAL and SRATIONAL
    Rational(Vec<(i64, i64)>),
    /// Floating-point values for FLOAT and DOUBLE
    Float(Vec<f64>),
    /// Strings for ASCII
    Text(Vec<String>),
    /// Pre-structured bytes for UNDEFINED (also accepted by BYTE)
    Bytes(Bytes),
}

impl Payload {
    /// Short description of the payload shape, for error messages.
    fn shape(&self) -> &'static str {
        match self {
            Payload::Int(_) => "integers",
            Payload::Rational(_) => "rationals",
            Payload::Float(_) => "floats",
            Payload::Text(_) => "text",
            Payload::Bytes(_) => "raw bytes",
        }
    }
}

macro_rules! int_payload {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Payload {
                fn from(value: $t) -> Self {
                    Payload::Int(vec![value as i64])
                }
            }
        )*
    };
}

macro_rules! int_seq_payload {
    ($($t:ty),*) => {
        $(
            impl From<Vec<$t>> for Payload {
                fn from(values: Vec<$t>) -> Self {
                    Payload::Int(values.into_iter().map(|v| v as i64).collect())
                }
            }

            impl From<&[$t]> for Payload {
                fn from(values: &[$t]) -> Self {
                    Payload::Int(values.iter().map(|&v| v as i64).collect())
                }
            }
        )*
    };
}

int_payload!(u8, u16, u32, i8, i16, i32, i64);
int_seq_payload!(u16, u32, i8, i16, i32, i64);

impl From<f32> for Payload {
    fn from(value: f32) -> Self {
        Payload::Float(vec![value as f64])
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Payload::Float(vec![value])
    }
}

impl From<Vec<f64>> for Payload {
    fn from(values: Vec<f64>) -> Self {
        Payload::Float(values)
    }
}

impl From<Rational> for Payload {
    fn from(r: Rational) -> Self {
        Payload::Rational(vec![(r.num as i64, r.denom as i64)])
    }
}

impl From<Vec<Rational>> for Payload {
    fn from(values: Vec<Rational>) -> Self {
        Payload::Rational(
            values
                .into_iter()
                .map(|r| (r.num as i64, r.denom as i64))
                .collect(),
        )
    }
}

impl From<SRational> for Payload {
    fn from(r: SRational) -> Self {
        Payload::Rational(vec![(r.num as i64, r.denom as i64)])
    }
}

impl From<Vec<SRational>> for Payload {
    fn from(values: Vec<SRational>) -> Self {
        Payload::Rational(
            values
                .into_iter()
                .map(|r| (r.num as i64, r.denom as i64))
                .collect(),
        )
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(vec![s.to_owned()])
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(vec![s])
    }
}

impl From<Vec<&str>> for Payload {
    fn from(strings: Vec<&str>) -> Self {
        Payload::Text(strings.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<String>> for Payload {
    fn from(strings: Vec<String>) -> Self {
        Payload::Text(strings)
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Byte(v) => Payload::Int(v.into_iter().map(i64::from).collect()),
            Value::Ascii(v) => Payload::Text(v),
            Value::Short(v) => Payload::Int(v.into_iter().map(i64::from).collect()),
            Value::Long(v) => Payload::Int(v.into_iter().map(i64::from).collect()),
            Value::Rational(v) => v.into(),
            Value::SByte(v) => Payload::Int(v.into_iter().map(i64::from).collect()),
            Value::Undefined(v) => Payload::Bytes(Bytes::from(v)),
            Value::SShort(v) => Payload::Int(v.into_iter().map(i64::from).collect()),
            Value::SLong(v) => Payload::Int(v.into_iter().map(i64::from).collect()),
            Value::SRational(v) => v.into(),
            Value::Float(v) => Payload::Float(v.into_iter().map(f64::from).collect()),
            Value::Double(v) => Payload::Float(v),
        }
    }
}

// =============================================================================
// Value
// =============================================================================

/// Decoded field value: one element per word, in stream order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Byte(Vec<u8>),
    /// One string per null-terminated run; terminators are stripped.
    /// Bytes are read as Latin-1.
    Ascii(Vec<String>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<SRational>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

impl Value {
    /// The data type this value was decoded as.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Byte(_) => DataType::Byte,
            Value::Ascii(_) => DataType::Ascii,
            Value::Short(_) => DataType::Short,
            Value::Long(_) => DataType::Long,
            Value::Rational(_) => DataType::Rational,
            Value::SByte(_) => DataType::SByte,
            Value::Undefined(_) => DataType::Undefined,
            Value::SShort(_) => DataType::SShort,
            Value::SLong(_) => DataType::SLong,
            Value::SRational(_) => DataType::SRational,
            Value::Float(_) => DataType::Float,
            Value::Double(_) => DataType::Double,
        }
    }

    /// Number of decoded elements (strings for ASCII, bytes for UNDEFINED).
    pub fn len(&self) -> usize {
        match self {
            Value::Byte(v) | Value::Undefined(v) => v.len(),
            Value::Ascii(v) => v.len(),
            Value::Short(v) => v.len(),
            Value::Long(v) => v.len(),
            Value::Rational(v) => v.len(),
            Value::SByte(v) => v.len(),
            Value::SShort(v) => v.len(),
            Value::SLong(v) => v.len(),
            Value::SRational(v) => v.len(),
            Value::Float(v) => v.len(),
            Value::Double(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `index` as an unsigned integer.
    ///
    /// Handles BYTE, SHORT and LONG, which tags such as `ImageWidth`
    /// use interchangeably.
    pub fn get_uint(&self, index: usize) -> Option<u32> {
        match self {
            Value::Byte(v) => v.get(index).map(|&x| x as u32),
            Value::Short(v) => v.get(index).map(|&x| x as u32),
            Value::Long(v) => v.get(index).copied(),
            _ => None,
        }
    }

    /// The strings of an ASCII value.
    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Value::Ascii(v) => Some(v),
            _ => None,
        }
    }
}

// =============================================================================
// Encode
// =============================================================================

/// Encode `payload` as `data_type` at the given byte order.
///
/// # Errors
/// - `InvalidInput` if the payload shape does not fit the type
///   (e.g. integers for UNDEFINED, or text with an embedded null or a
///   character above U+00FF)
/// - `EncodingRange` if a value does not fit in one word
pub fn encode(
    data_type: DataType,
    payload: &Payload,
    order: ByteOrder,
) -> Result<Bytes, CodecError> {
    let desc = data_type.descriptor();
    let invalid = |reason| CodecError::InvalidInput { data_type, reason };

    match (desc.codec, payload) {
        (WordCodec::Text, Payload::Text(strings)) => encode_text(data_type, strings),
        (WordCodec::Text, _) => Err(invalid("text required")),

        (WordCodec::Opaque, Payload::Bytes(bytes)) => Ok(bytes.clone()),
        (WordCodec::Opaque, _) => Err(invalid("raw bytes required; encode the structure yourself")),

        (WordCodec::Integer, Payload::Int(values)) => {
            let signed = desc.signed == Some(true);
            let mut buf = BytesMut::with_capacity(values.len() * desc.word_width);
            for &value in values {
                encode_int(&mut buf, value, desc.word_width, signed, order)
                    .map_err(|_| out_of_range(data_type, value))?;
            }
            Ok(buf.freeze())
        }
        (WordCodec::Integer, Payload::Bytes(bytes)) if data_type == DataType::Byte => {
            Ok(bytes.clone())
        }

        (WordCodec::Rational, Payload::Rational(pairs)) => {
            let signed = desc.signed == Some(true);
            let mut buf = BytesMut::with_capacity(pairs.len() * desc.word_width);
            for &(num, denom) in pairs {
                encode_rational(&mut buf, num, denom, signed, order)
                    .map_err(|_| out_of_range(data_type, format!("{num}/{denom}")))?;
            }
            Ok(buf.freeze())
        }

        (WordCodec::Float, Payload::Float(values)) => {
            encode_floats(data_type, values.iter().copied(), values.len(), order)
        }
        (WordCodec::Float, Payload::Int(values)) => {
            encode_floats(data_type, values.iter().map(|&v| v as f64), values.len(), order)
        }

        (_, other) => {
            trace!(%data_type, shape = other.shape(), "payload shape rejected");
            Err(invalid("payload shape does not match the data type"))
        }
    }
}

fn out_of_range(data_type: DataType, value: impl ToString) -> CodecError {
    CodecError::EncodingRange {
        data_type,
        value: value.to_string(),
    }
}

fn encode_floats(
    data_type: DataType,
    values: impl Iterator<Item = f64>,
    count: usize,
    order: ByteOrder,
) -> Result<Bytes, CodecError> {
    let width = data_type.word_width();
    let mut buf = BytesMut::with_capacity(count * width);
    for value in values {
        encode_float(&mut buf, value, width, order).map_err(|_| out_of_range(data_type, value))?;
    }
    Ok(buf.freeze())
}

fn encode_text(data_type: DataType, strings: &[String]) -> Result<Bytes, CodecError> {
    let mut buf = BytesMut::with_capacity(strings.iter().map(|s| s.chars().count() + 1).sum());
    for s in strings {
        for c in s.chars() {
            let byte = match u8::try_from(c) {
                Ok(0) => {
                    return Err(CodecError::InvalidInput {
                        data_type,
                        reason: "text contains a null byte",
                    })
                }
                Ok(byte) => byte,
                Err(_) => {
                    return Err(CodecError::InvalidInput {
                        data_type,
                        reason: "text contains a character outside Latin-1",
                    })
                }
            };
            buf.put_u8(byte);
        }
        buf.put_u8(0);
    }
    Ok(buf.freeze())
}

// =============================================================================
// Decode
// =============================================================================

/// Decode field bytes as `data_type` at the given byte order.
///
/// # Errors
/// `MalformedPayload` if the byte count is not a multiple of the word
/// width. ASCII and UNDEFINED accept any length.
pub fn decode(data_type: DataType, bytes: &[u8], order: ByteOrder) -> Result<Value, CodecError> {
    let desc = data_type.descriptor();
    let width = desc.word_width;
    let signed = desc.signed == Some(true);
    if bytes.len() % width != 0 {
        return Err(CodecError::MalformedPayload {
            data_type,
            len: bytes.len(),
            word_width: width,
        });
    }

    let ints = || -> Vec<i64> {
        bytes
            .chunks_exact(width)
            .map(|w| decode_int(w, signed, order))
            .collect()
    };
    let rationals = || -> Vec<(i64, i64)> {
        bytes
            .chunks_exact(width)
            .map(|w| decode_rational(w, signed, order))
            .collect()
    };
    let floats = || -> Vec<f64> {
        bytes
            .chunks_exact(width)
            .map(|w| decode_float(w, order))
            .collect()
    };

    Ok(match data_type {
        DataType::Byte => Value::Byte(bytes.to_vec()),
        DataType::Ascii => Value::Ascii(decode_text(bytes)),
        DataType::Short => Value::Short(ints().into_iter().map(|v| v as u16).collect()),
        DataType::Long => Value::Long(ints().into_iter().map(|v| v as u32).collect()),
        DataType::Rational => Value::Rational(
            rationals()
                .into_iter()
                .map(|(n, d)| Rational::new(n as u32, d as u32))
                .collect(),
        ),
        DataType::SByte => Value::SByte(bytes.iter().map(|&b| b as i8).collect()),
        DataType::Undefined => Value::Undefined(bytes.to_vec()),
        DataType::SShort => Value::SShort(ints().into_iter().map(|v| v as i16).collect()),
        DataType::SLong => Value::SLong(ints().into_iter().map(|v| v as i32).collect()),
        DataType::SRational => Value::SRational(
            rationals()
                .into_iter()
                .map(|(n, d)| SRational::new(n as i32, d as i32))
                .collect(),
        ),
        DataType::Float => Value::Float(floats().into_iter().map(|v| v as f32).collect()),
        DataType::Double => Value::Double(floats()),
    })
}

/// Number of words in an encoded payload of `len` bytes.
pub fn word_count(data_type: DataType, len: usize) -> Result<usize, CodecError> {
    let width = data_type.word_width();
    if len % width != 0 {
        return Err(CodecError::MalformedPayload {
            data_type,
            len,
            word_width: width,
        });
    }
    Ok(len / width)
}

/// Split at null terminators.
///
/// Only terminated runs are strings; bytes after the last null are dropped.
/// Each byte maps to the char with the same code point (Latin-1), so any
/// byte string survives a decode/encode round trip.
fn decode_text(bytes: &[u8]) -> Vec<String> {
    let mut strings = Vec::new();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b == 0 {
            strings.push(bytes[start..i].iter().map(|&b| char::from(b)).collect());
            start = i + 1;
        }
    }
    if start < bytes.len() {
        trace!(dropped = bytes.len() - start, "unterminated text run dropped");
    }
    strings
}

// =============================================================================
// Tests
// =============================================================================
