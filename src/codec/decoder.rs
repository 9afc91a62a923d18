//! # Record Decoder
//!
//! Decodes `[mask bytes][value bytes]` back into a `Record`, mirroring the
//! encoder field by field. The mask width comes from the schema's plan, so
//! it is consumed before any value bytes; the same null-short-circuit bit
//! walk the encoder ran keeps every bit position in agreement.
//!
//! The cursor is local to one top-level call and its recursive
//! descendants: array items and nested records continue at exactly the
//! offset the previous item left, with no per-item delimiters. Decoding
//! stops after exactly the declared field list; trailing buffer bytes are
//! the caller's business (they may hold the next record of a shared
//! buffer).
//!
//! ## Failure Modes
//!
//! `CodecError::Malformed` when the buffer ends before a read, a union tag
//! is at or above the declared variant count, or string bytes are not
//! UTF-8. Any failure aborts the whole top-level call; no partial record
//! is returned.

use std::sync::Arc;

use eyre::{bail, Result};

use crate::encoding::scalar;
use crate::encoding::MaskReader;
use crate::error::CodecError;
use crate::schema::{FieldDef, RecordSchema};
use crate::types::{LenPrefix, Record, Value, WireType};

/// Decodes one record at `cursor`, returning it with the advanced cursor.
///
/// Top-level callers pass `cursor = 0` and usually discard the returned
/// offset; callers parsing a shared buffer use it to continue.
pub fn decode(data: &[u8], schema: &Arc<RecordSchema>, cursor: usize) -> Result<(Record, usize)> {
    let mut cursor = cursor;
    let record = decode_record(data, schema, &mut cursor)?;
    Ok((record, cursor))
}

pub(crate) fn decode_record(
    data: &[u8],
    schema: &Arc<RecordSchema>,
    cursor: &mut usize,
) -> Result<Record> {
    let mask_bytes = scalar::take(data, cursor, schema.mask_len())?;
    let mut mask = MaskReader::new(mask_bytes);

    let mut values = Vec::with_capacity(schema.field_count());
    for field in schema.fields() {
        values.push(decode_field(data, cursor, field, &mut mask)?);
    }
    Ok(Record::from_parts(schema.clone(), values))
}

fn decode_field(
    data: &[u8],
    cursor: &mut usize,
    field: &FieldDef,
    mask: &mut MaskReader<'_>,
) -> Result<Value> {
    if field.is_nullable() && mask.read_bit() {
        return Ok(Value::Null);
    }

    match field.wire_type() {
        WireType::Bool => Ok(Value::Bool(mask.read_bit())),
        WireType::Union(variants) => {
            let tag = mask.read_bits(WireType::tag_bits(variants.len())) as usize;
            if tag >= variants.len() {
                bail!(CodecError::Malformed(format!(
                    "union tag {} out of range for field '{}' ({} variants)",
                    tag,
                    field.name(),
                    variants.len()
                )));
            }
            match &variants[tag] {
                WireType::Bool => Ok(Value::Bool(mask.read_bit())),
                variant => decode_payload(data, cursor, variant),
            }
        }
        ty => decode_payload(data, cursor, ty),
    }
}

/// Consumes value-section bytes for a present, non-mask-resident value.
fn decode_payload(data: &[u8], cursor: &mut usize, ty: &WireType) -> Result<Value> {
    match ty {
        WireType::Int(width) => Ok(Value::Int(scalar::get_int(data, cursor, *width)?)),
        WireType::Float(width) => Ok(Value::Float(scalar::get_float(data, cursor, *width)?)),
        WireType::Text(prefix) => Ok(Value::Text(get_str(data, cursor, *prefix)?)),
        WireType::Array { prefix, item } => decode_array(data, cursor, *prefix, item),
        WireType::Record(sub) => Ok(Value::Record(decode_record(data, sub, cursor)?)),
        WireType::Bool | WireType::Union(_) => {
            unreachable!("{} values never reach the value section", ty.category())
        }
    }
}

fn decode_array(
    data: &[u8],
    cursor: &mut usize,
    prefix: LenPrefix,
    item: &WireType,
) -> Result<Value> {
    let count = scalar::get_len(data, cursor, prefix)?;

    let items = match item {
        WireType::Bool => {
            let bitmap = scalar::take(data, cursor, count.div_ceil(8))?;
            (0..count)
                .map(|idx| Value::Bool(bitmap[idx / 8] & (0x80 >> (idx % 8)) != 0))
                .collect()
        }
        WireType::Int(width) => {
            // Bounds-check the whole span before building the vector so a
            // corrupt count fails without a huge allocation.
            let span = scalar::take(data, cursor, count * width.size())?;
            let mut local = 0;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(Value::Int(scalar::get_int(span, &mut local, *width)?));
            }
            items
        }
        WireType::Float(width) => {
            let span = scalar::take(data, cursor, count * width.size())?;
            let mut local = 0;
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(Value::Float(scalar::get_float(span, &mut local, *width)?));
            }
            items
        }
        _ => {
            let mut items = Vec::new();
            for _ in 0..count {
                items.push(decode_payload(data, cursor, item)?);
            }
            items
        }
    };
    Ok(Value::Array(items))
}

fn get_str(data: &[u8], cursor: &mut usize, prefix: LenPrefix) -> Result<String> {
    let len = scalar::get_len(data, cursor, prefix)?;
    let bytes = scalar::take(data, cursor, len)?;
    let s = std::str::from_utf8(bytes)
        .map_err(|e| CodecError::Malformed(format!("invalid UTF-8 in string payload: {}", e)))?;
    Ok(s.to_string())
}
