//! # Record Encoder
//!
//! Encodes a `Record` into the `[mask bytes][value bytes]` wire layout.
//! One strict linear traversal per record handles both mask application
//! and value emission: the mask span is reserved up front, bits accumulate
//! in a `MaskWriter` while values append behind the span, and the span is
//! patched once the walk completes. Nested records and object-typed array
//! items recurse into the same routine, so their `[mask][values]` spans
//! nest inside the parent's value section.
//!
//! ## Per-Field Protocol
//!
//! In wire order, each field contributes: its nullability bit (if
//! declared nullable); then, only when the value is present, union tag
//! bits and the boolean value bit; then its value bytes. A null field
//! short-circuits after the nullability bit and emits nothing else.
//!
//! ## Failure Modes
//!
//! `CodecError::Schema` when a value does not fit its declared field type
//! (including a union value matching no declared variant, and `Null` in a
//! non-nullable field); `CodecError::LengthExceeded` when a string or
//! array overflows its selected prefix, raised before any bytes for that
//! field are written.

use std::sync::Arc;

use eyre::{bail, Result};

use crate::encoding::scalar;
use crate::encoding::MaskWriter;
use crate::error::CodecError;
use crate::schema::FieldDef;
use crate::types::{LenPrefix, Record, Value, WireType};

/// Encodes a record into a fresh byte buffer.
pub fn encode(record: &Record) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(64);
    encode_record(record, &mut out)?;
    Ok(out)
}

pub(crate) fn encode_record(record: &Record, out: &mut Vec<u8>) -> Result<()> {
    let schema = record.schema();
    let mask_off = out.len();
    let mask_len = schema.mask_len();
    out.resize(mask_off + mask_len, 0);

    let mut mask = MaskWriter::new(schema.mask_bits());
    for (field, value) in schema.fields().iter().zip(record.values()) {
        encode_field(field, value, &mut mask, out)?;
    }

    out[mask_off..mask_off + mask_len].copy_from_slice(mask.as_bytes());
    Ok(())
}

fn encode_field(
    field: &FieldDef,
    value: &Value,
    mask: &mut MaskWriter,
    out: &mut Vec<u8>,
) -> Result<()> {
    if field.is_nullable() {
        mask.push_bit(value.is_null());
    }
    if value.is_null() {
        if !field.is_nullable() {
            bail!(CodecError::Schema(format!(
                "field '{}' is not nullable but holds no value",
                field.name()
            )));
        }
        return Ok(());
    }

    match field.wire_type() {
        WireType::Bool => {
            mask.push_bit(expect_bool(field.name(), value)?);
            Ok(())
        }
        WireType::Union(variants) => {
            let tag = resolve_variant(field.name(), variants, value)?;
            mask.push_bits(tag as u64, WireType::tag_bits(variants.len()));
            match &variants[tag] {
                WireType::Bool => {
                    mask.push_bit(expect_bool(field.name(), value)?);
                    Ok(())
                }
                variant => encode_payload(field.name(), variant, value, out),
            }
        }
        ty => encode_payload(field.name(), ty, value, out),
    }
}

/// Emits value-section bytes for a non-null, non-mask-resident value.
fn encode_payload(name: &str, ty: &WireType, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match ty {
        WireType::Int(width) => {
            let v = match value {
                Value::Int(v) => *v,
                other => return Err(mismatch(name, ty, other)),
            };
            scalar::put_int(out, *width, v);
            Ok(())
        }
        WireType::Float(width) => {
            let v = match value {
                Value::Float(v) => *v,
                other => return Err(mismatch(name, ty, other)),
            };
            scalar::put_float(out, *width, v);
            Ok(())
        }
        WireType::Text(prefix) => {
            let s = match value {
                Value::Text(s) => s.as_str(),
                other => return Err(mismatch(name, ty, other)),
            };
            put_str(out, *prefix, s)
        }
        WireType::Array { prefix, item } => {
            let items = match value {
                Value::Array(items) => items.as_slice(),
                other => return Err(mismatch(name, ty, other)),
            };
            encode_array(name, *prefix, item, items, out)
        }
        WireType::Record(sub) => {
            let rec = match value {
                Value::Record(rec) => rec,
                other => return Err(mismatch(name, ty, other)),
            };
            if !Arc::ptr_eq(rec.schema(), sub) {
                bail!(CodecError::Schema(format!(
                    "field '{}' expects schema '{}' but record carries '{}'",
                    name,
                    sub.name(),
                    rec.schema().name()
                )));
            }
            encode_record(rec, out)
        }
        // Booleans live in the mask and unions cannot reach the payload
        // level (schema validation forbids them as array items).
        WireType::Bool | WireType::Union(_) => {
            unreachable!("{} values never reach the value section", ty.category())
        }
    }
}

fn encode_array(
    name: &str,
    prefix: LenPrefix,
    item: &WireType,
    items: &[Value],
    out: &mut Vec<u8>,
) -> Result<()> {
    if items.len() as u64 > prefix.capacity() {
        bail!(CodecError::LengthExceeded {
            what: "array",
            len: items.len(),
            cap: prefix.capacity(),
        });
    }
    scalar::put_len(out, prefix, items.len());

    match item {
        WireType::Bool => {
            let mut bitmap = vec![0u8; items.len().div_ceil(8)];
            for (idx, value) in items.iter().enumerate() {
                if expect_bool(name, value)? {
                    bitmap[idx / 8] |= 0x80 >> (idx % 8);
                }
            }
            out.extend_from_slice(&bitmap);
            Ok(())
        }
        _ => {
            for value in items {
                encode_payload(name, item, value, out)?;
            }
            Ok(())
        }
    }
}

fn put_str(out: &mut Vec<u8>, prefix: LenPrefix, s: &str) -> Result<()> {
    if s.len() as u64 > prefix.capacity() {
        bail!(CodecError::LengthExceeded {
            what: "string",
            len: s.len(),
            cap: prefix.capacity(),
        });
    }
    scalar::put_len(out, prefix, s.len());
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Resolves a union value to the index of its declared variant.
fn resolve_variant(name: &str, variants: &[WireType], value: &Value) -> Result<usize> {
    variants
        .iter()
        .position(|variant| variant_matches(variant, value))
        .ok_or_else(|| {
            CodecError::Schema(format!(
                "{} value of field '{}' matches no declared union variant",
                value.category(),
                name
            ))
            .into()
        })
}

fn variant_matches(variant: &WireType, value: &Value) -> bool {
    match (variant, value) {
        (WireType::Bool, Value::Bool(_))
        | (WireType::Int(_), Value::Int(_))
        | (WireType::Float(_), Value::Float(_))
        | (WireType::Text(_), Value::Text(_))
        | (WireType::Array { .. }, Value::Array(_)) => true,
        (WireType::Record(schema), Value::Record(rec)) => Arc::ptr_eq(schema, rec.schema()),
        _ => false,
    }
}

fn expect_bool(name: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch(name, &WireType::Bool, other)),
    }
}

fn mismatch(name: &str, ty: &WireType, value: &Value) -> eyre::Report {
    CodecError::Schema(format!(
        "field '{}' expects {} but holds {}",
        name,
        ty.category(),
        value.category()
    ))
    .into()
}
