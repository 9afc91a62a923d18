//! # Wire Type Descriptors
//!
//! This module provides `WireType`, the closed descriptor for one field's
//! on-wire representation, together with the width and prefix annotations
//! that refine it.
//!
//! ## Categories
//!
//! | Category | Annotation | Wire representation |
//! |----------|------------|---------------------|
//! | `Bool` | - | one bit in the record mask, zero value bytes |
//! | `Int` | `IntWidth` (default I64) | 1/2/4/8 bytes, big-endian above 8 bits |
//! | `Float` | `FloatWidth` (default F64) | IEEE-754 single/double, big-endian |
//! | `Text` | `LenPrefix` (default Short) | `[prefix][UTF-8 bytes]` |
//! | `Array` | `LenPrefix` + item type | `[count prefix][items]` |
//! | `Record` | nested schema | nested `[mask][values]` span |
//! | `Union` | ordered variant list | tag bits in the mask, then the variant's layout |
//!
//! Widths and prefixes are declarations, not measurements: decode applies
//! exactly the annotation the schema carries, so both sides must compile
//! from identical annotations.
//!
//! ## Union Tags
//!
//! A union's tag is the zero-based index of the value's variant within the
//! declared order, written as `ceil(log2(N))` bits. A single-variant union
//! therefore occupies zero tag bits.

use std::sync::Arc;

use crate::schema::RecordSchema;

/// Integer width and signedness annotation.
///
/// The default (unannotated) integer is a 64-bit signed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    #[default]
    I64,
    U64,
}

impl IntWidth {
    /// Encoded size in bytes.
    pub fn size(self) -> usize {
        match self {
            IntWidth::I8 | IntWidth::U8 => 1,
            IntWidth::I16 | IntWidth::U16 => 2,
            IntWidth::I32 | IntWidth::U32 => 4,
            IntWidth::I64 | IntWidth::U64 => 8,
        }
    }
}

/// Float precision annotation. The default is double precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FloatWidth {
    F32,
    #[default]
    F64,
}

impl FloatWidth {
    pub fn size(self) -> usize {
        match self {
            FloatWidth::F32 => 4,
            FloatWidth::F64 => 8,
        }
    }
}

/// Length-prefix width for strings and arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LenPrefix {
    /// 2-byte prefix, capacity 65 535.
    #[default]
    Short,
    /// 4-byte prefix, capacity 4 294 967 295.
    Long,
}

impl LenPrefix {
    pub fn size(self) -> usize {
        match self {
            LenPrefix::Short => 2,
            LenPrefix::Long => 4,
        }
    }

    /// Largest byte/item count the prefix can represent.
    pub fn capacity(self) -> u64 {
        match self {
            LenPrefix::Short => u16::MAX as u64,
            LenPrefix::Long => u32::MAX as u64,
        }
    }
}

/// On-wire type of one field or array item.
#[derive(Debug, Clone)]
pub enum WireType {
    Bool,
    Int(IntWidth),
    Float(FloatWidth),
    Text(LenPrefix),
    Array {
        prefix: LenPrefix,
        item: Box<WireType>,
    },
    Record(Arc<RecordSchema>),
    Union(Vec<WireType>),
}

impl WireType {
    /// Default 64-bit signed integer.
    pub fn int() -> Self {
        WireType::Int(IntWidth::default())
    }

    /// Default double-precision float.
    pub fn float() -> Self {
        WireType::Float(FloatWidth::default())
    }

    /// Default short-prefixed string.
    pub fn text() -> Self {
        WireType::Text(LenPrefix::default())
    }

    /// Short-prefixed array of the given item type.
    pub fn array(item: WireType) -> Self {
        WireType::Array {
            prefix: LenPrefix::default(),
            item: Box::new(item),
        }
    }

    /// Category name for diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            WireType::Bool => "bool",
            WireType::Int(_) => "int",
            WireType::Float(_) => "float",
            WireType::Text(_) => "string",
            WireType::Array { .. } => "array",
            WireType::Record(_) => "record",
            WireType::Union(_) => "union",
        }
    }

    /// Number of tag bits needed to address `variants` union variants.
    pub fn tag_bits(variants: usize) -> usize {
        if variants <= 1 {
            0
        } else {
            (usize::BITS - (variants - 1).leading_zeros()) as usize
        }
    }

    /// Mask bits this field can occupy, counted data-independently so the
    /// mask width is derivable from the schema alone. Union tag bits are
    /// reserved whether or not the value turns out null, and a union that
    /// declares a `Bool` variant reserves the boolean value bit too.
    pub(crate) fn mask_bits(&self, nullable: bool) -> usize {
        let own = match self {
            WireType::Bool => 1,
            WireType::Union(variants) => {
                let value_bit = variants.iter().any(|v| matches!(v, WireType::Bool));
                Self::tag_bits(variants.len()) + usize::from(value_bit)
            }
            _ => 0,
        };
        usize::from(nullable) + own
    }
}
