//! Word-level pack/unpack primitives.
//!
//! Every TIFF/Exif data type is a run of fixed-width words. These helpers
//! pack and unpack a single word (integer, rational pair or IEEE float)
//! at a given byte order; the typed codec in [`super::values`] builds on
//! them.

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of an encoded payload.
///
/// Exif data declares its byte order in the TIFF header ("II" or "MM").
/// IPTC data is always big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    #[serde(rename = "little_endian", alias = "II")]
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    #[default]
    #[serde(rename = "big_endian", alias = "MM")]
    BigEndian,
}

impl ByteOrder {
    /// Byte order from the two marker bytes at the start of a TIFF header.
    pub fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match &marker {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    #[inline]
    pub fn is_big_endian(self) -> bool {
        self == ByteOrder::BigEndian
    }
}

/// A value did not fit in the requested word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange;

// =============================================================================
// Integers
// =============================================================================

/// Inclusive bounds of an integer word of `width` bytes.
///
/// Only widths up to 4 are used by TIFF integer types.
pub fn int_bounds(width: usize, signed: bool) -> (i64, i64) {
    let bits = (width.clamp(1, 4) * 8) as u32;
    if signed {
        (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1)
    } else {
        (0, (1i64 << bits) - 1)
    }
}

/// Append `value` as a `width`-byte integer word.
pub fn encode_int(
    buf: &mut BytesMut,
    value: i64,
    width: usize,
    signed: bool,
    order: ByteOrder,
) -> Result<(), OutOfRange> {
    if !(1..=4).contains(&width) {
        return Err(OutOfRange);
    }
    let (min, max) = int_bounds(width, signed);
    if value < min || value > max {
        return Err(OutOfRange);
    }

    match order {
        ByteOrder::BigEndian => buf.put_int(value, width),
        ByteOrder::LittleEndian => buf.put_int_le(value, width),
    }
    Ok(())
}

/// Read one integer word; the word width is the length of `bytes`.
///
/// # Panics
/// Panics if `bytes` is empty or longer than 8 bytes.
pub fn decode_int(mut bytes: &[u8], signed: bool, order: ByteOrder) -> i64 {
    let width = bytes.len();
    match (order, signed) {
        (ByteOrder::BigEndian, true) => bytes.get_int(width),
        (ByteOrder::BigEndian, false) => bytes.get_uint(width) as i64,
        (ByteOrder::LittleEndian, true) => bytes.get_int_le(width),
        (ByteOrder::LittleEndian, false) => bytes.get_uint_le(width) as i64,
    }
}

// =============================================================================
// Rationals
// =============================================================================

/// Append a rational as two 4-byte integers: numerator, then denominator.
pub fn encode_rational(
    buf: &mut BytesMut,
    num: i64,
    denom: i64,
    signed: bool,
    order: ByteOrder,
) -> Result<(), OutOfRange> {
    // Check both halves before writing so a failure leaves `buf` untouched.
    let (min, max) = int_bounds(4, signed);
    if !(min..=max).contains(&num) || !(min..=max).contains(&denom) {
        return Err(OutOfRange);
    }
    encode_int(buf, num, 4, signed, order)?;
    encode_int(buf, denom, 4, signed, order)
}

/// Read an 8-byte rational word as `(numerator, denominator)`.
///
/// # Panics
/// Panics if `bytes` is shorter than 8 bytes.
pub fn decode_rational(bytes: &[u8], signed: bool, order: ByteOrder) -> (i64, i64) {
    (
        decode_int(&bytes[..4], signed, order),
        decode_int(&bytes[4..8], signed, order),
    )
}

// =============================================================================
// Floats
// =============================================================================

/// Append an IEEE-754 float of 4 or 8 bytes.
///
/// Finite values beyond `f32::MAX` cannot be narrowed to a 4-byte word.
pub fn encode_float(
    buf: &mut BytesMut,
    value: f64,
    width: usize,
    order: ByteOrder,
) -> Result<(), OutOfRange> {
    match (width, order) {
        (4, _) if value.is_finite() && value.abs() > f32::MAX as f64 => return Err(OutOfRange),
        (4, ByteOrder::BigEndian) => buf.put_f32(value as f32),
        (4, ByteOrder::LittleEndian) => buf.put_f32_le(value as f32),
        (8, ByteOrder::BigEndian) => buf.put_f64(value),
        (8, ByteOrder::LittleEndian) => buf.put_f64_le(value),
        _ => return Err(OutOfRange),
    }
    Ok(())
}

/// Read one IEEE-754 word; 4 bytes is single precision, anything else double.
///
/// # Panics
/// Panics if `bytes` is neither 4 nor at least 8 bytes long.
pub fn decode_float(mut bytes: &[u8], order: ByteOrder) -> f64 {
    match (bytes.len(), order) {
        (4, ByteOrder::BigEndian) => bytes.get_f32() as f64,
        (4, ByteOrder::LittleEndian) => bytes.get_f32_le() as f64,
        (_, ByteOrder::BigEndian) => bytes.get_f64(),
        (_, ByteOrder::LittleEndian) => bytes.get_f64_le(),
    }
}

// =============================================================================
// Tests
// =============================================================================
