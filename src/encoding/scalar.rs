//! # Fixed-Width Scalar Encoding
//!
//! This module provides the pack/unpack primitives for fixed-width
//! integers, floats, and length prefixes. All multi-byte values are
//! big-endian; 8-bit values have no byte order.
//!
//! ## Encoding Format
//!
//! | Annotation | Bytes | Representation |
//! |------------|-------|----------------|
//! | I8 / U8 | 1 | raw byte |
//! | I16 / U16 | 2 | big-endian |
//! | I32 / U32 | 4 | big-endian |
//! | I64 / U64 | 8 | big-endian |
//! | F32 | 4 | IEEE-754 single, big-endian |
//! | F64 | 8 | IEEE-754 double, big-endian |
//!
//! Narrowing on encode truncates like an `as` cast; the wire carries no
//! width tag, so decode applies exactly the annotation the schema
//! declares. A width mismatch between the two sides misaligns every
//! following offset, which is fatal and undetected past the explicit
//! bounds checks here.
//!
//! ## Zero-Copy Design
//!
//! Encoders append to a growable `Vec<u8>`; decoders read from a borrowed
//! slice and advance a caller-owned cursor. No function here allocates.
//!
//! ## Error Handling
//!
//! Decoders fail with `CodecError::Malformed` when the buffer ends before
//! the requested width.

use eyre::{bail, Result};

use crate::error::CodecError;
use crate::types::{FloatWidth, IntWidth, LenPrefix};

/// Consumes exactly `n` bytes at the cursor.
pub fn take<'a>(data: &'a [u8], cursor: &mut usize, n: usize) -> Result<&'a [u8]> {
    if *cursor + n > data.len() {
        bail!(CodecError::Malformed(format!(
            "need {} bytes at offset {} but buffer holds {}",
            n,
            *cursor,
            data.len()
        )));
    }
    let slice = &data[*cursor..*cursor + n];
    *cursor += n;
    Ok(slice)
}

pub fn put_int(buf: &mut Vec<u8>, width: IntWidth, value: i64) {
    match width {
        IntWidth::I8 => buf.push(value as i8 as u8),
        IntWidth::U8 => buf.push(value as u8),
        IntWidth::I16 => buf.extend((value as i16).to_be_bytes()),
        IntWidth::U16 => buf.extend((value as u16).to_be_bytes()),
        IntWidth::I32 => buf.extend((value as i32).to_be_bytes()),
        IntWidth::U32 => buf.extend((value as u32).to_be_bytes()),
        IntWidth::I64 => buf.extend(value.to_be_bytes()),
        IntWidth::U64 => buf.extend((value as u64).to_be_bytes()),
    }
}

pub fn get_int(data: &[u8], cursor: &mut usize, width: IntWidth) -> Result<i64> {
    let bytes = take(data, cursor, width.size())?;
    let value = match width {
        IntWidth::I8 => bytes[0] as i8 as i64,
        IntWidth::U8 => bytes[0] as i64,
        IntWidth::I16 => i16::from_be_bytes([bytes[0], bytes[1]]) as i64,
        IntWidth::U16 => u16::from_be_bytes([bytes[0], bytes[1]]) as i64,
        IntWidth::I32 => i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64,
        IntWidth::U32 => u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64,
        IntWidth::I64 => i64::from_be_bytes(bytes.try_into().unwrap()),
        // Bit-for-bit round trip; values above i64::MAX surface negative.
        IntWidth::U64 => u64::from_be_bytes(bytes.try_into().unwrap()) as i64,
    };
    Ok(value)
}

pub fn put_float(buf: &mut Vec<u8>, width: FloatWidth, value: f64) {
    match width {
        FloatWidth::F32 => buf.extend((value as f32).to_be_bytes()),
        FloatWidth::F64 => buf.extend(value.to_be_bytes()),
    }
}

pub fn get_float(data: &[u8], cursor: &mut usize, width: FloatWidth) -> Result<f64> {
    let bytes = take(data, cursor, width.size())?;
    let value = match width {
        FloatWidth::F32 => {
            f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64
        }
        FloatWidth::F64 => f64::from_be_bytes(bytes.try_into().unwrap()),
    };
    Ok(value)
}

/// Writes a length prefix. The caller has already checked capacity.
pub fn put_len(buf: &mut Vec<u8>, prefix: LenPrefix, len: usize) {
    debug_assert!(len as u64 <= prefix.capacity());
    match prefix {
        LenPrefix::Short => buf.extend((len as u16).to_be_bytes()),
        LenPrefix::Long => buf.extend((len as u32).to_be_bytes()),
    }
}

pub fn get_len(data: &[u8], cursor: &mut usize, prefix: LenPrefix) -> Result<usize> {
    let bytes = take(data, cursor, prefix.size())?;
    let len = match prefix {
        LenPrefix::Short => u16::from_be_bytes([bytes[0], bytes[1]]) as usize,
        LenPrefix::Long => u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize,
    };
    Ok(len)
}
