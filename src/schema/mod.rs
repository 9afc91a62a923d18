//! # Schema Definition
//!
//! This module provides `FieldDef` and `RecordSchema`, the compiled
//! descriptor of one record type's encodable fields in wire order.
//!
//! ## Schema Internals
//!
//! - `fields`: ordered field definitions, ignored fields already dropped
//! - `mask_bits`: pre-computed mask-bit capacity over all fields
//!
//! Construction walks the declared fields once, validates union and array
//! shapes, and fixes the mask plan. The result is immutable and shared
//! behind an `Arc`; nested record fields and the registry hand out clones
//! of the same handle.
//!
//! ## Mask Plan
//!
//! Each field contributes a data-independent number of mask bits:
//! one if nullable, `ceil(log2(N))` tag bits if it is an N-variant union,
//! and one boolean value bit if it is a boolean scalar or a union that
//! declares a `Bool` variant. The mask byte width is the bit total rounded
//! up to whole bytes, and zero contributing fields mean zero mask bytes.
//! Bits a null value leaves unconsumed stay zero; encode and decode run
//! the identical bit walk, so positions always agree.

mod registry;

use std::sync::Arc;

use eyre::{bail, Result};
use hashbrown::HashSet;

use crate::error::CodecError;
use crate::types::WireType;

pub use registry::SchemaRegistry;

/// One declared field: name, wire type, and modifiers.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: String,
    ty: WireType,
    nullable: bool,
    ignored: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: WireType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            ignored: false,
        }
    }

    /// Marks the field's type as admitting absence of a value.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Excludes the field from the wire format entirely.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wire_type(&self) -> &WireType {
        &self.ty
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// Compiled, immutable descriptor of one record type.
#[derive(Debug)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDef>,
    mask_bits: usize,
}

impl RecordSchema {
    /// Compiles a schema from declared fields, dropping ignored ones.
    ///
    /// Fails with a `CodecError::Schema` when a union declares no
    /// variants, a union nests another union, an array's item type is a
    /// union, or two fields share a name.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Result<Arc<Self>> {
        let name = name.into();
        let fields: Vec<FieldDef> = fields.into_iter().filter(|f| !f.ignored).collect();

        {
            let mut seen = HashSet::with_capacity(fields.len());
            for field in &fields {
                if !seen.insert(field.name.as_str()) {
                    bail!(CodecError::Schema(format!(
                        "duplicate field '{}' in schema '{}'",
                        field.name, name
                    )));
                }
                validate_type(&name, &field.name, &field.ty, false)?;
            }
        }

        let mask_bits = fields
            .iter()
            .map(|f| f.ty.mask_bits(f.nullable))
            .sum();

        Ok(Arc::new(Self {
            name,
            fields,
            mask_bits,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, idx: usize) -> Option<&FieldDef> {
        self.fields.get(idx)
    }

    /// Wire-order index of the named field.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Total mask-bit capacity across all fields.
    pub fn mask_bits(&self) -> usize {
        self.mask_bits
    }

    /// Mask width in bytes.
    pub fn mask_len(&self) -> usize {
        self.mask_bits.div_ceil(8)
    }
}

fn validate_type(schema: &str, field: &str, ty: &WireType, inside_union: bool) -> Result<()> {
    match ty {
        WireType::Union(variants) => {
            if inside_union {
                bail!(CodecError::Schema(format!(
                    "field '{}' in schema '{}' nests a union inside a union",
                    field, schema
                )));
            }
            if variants.is_empty() {
                bail!(CodecError::Schema(format!(
                    "union field '{}' in schema '{}' declares no variants",
                    field, schema
                )));
            }
            for variant in variants {
                validate_type(schema, field, variant, true)?;
            }
        }
        WireType::Array { item, .. } => {
            if matches!(**item, WireType::Union(_)) {
                bail!(CodecError::Schema(format!(
                    "array field '{}' in schema '{}' cannot carry union items",
                    field, schema
                )));
            }
            validate_type(schema, field, item, inside_union)?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IntWidth, LenPrefix};

    #[test]
    fn schema_drops_ignored_fields() {
        let schema = RecordSchema::new(
            "job",
            vec![
                FieldDef::new("id", WireType::int()),
                FieldDef::new("scratch", WireType::text()).ignored(),
                FieldDef::new("name", WireType::text()),
            ],
        )
        .unwrap();

        assert_eq!(schema.field_count(), 2);
        assert_eq!(schema.field_index("name"), Some(1));
        assert_eq!(schema.field_index("scratch"), None);
    }

    #[test]
    fn schema_rejects_duplicate_field_names() {
        let result = RecordSchema::new(
            "dup",
            vec![
                FieldDef::new("a", WireType::int()),
                FieldDef::new("a", WireType::text()),
            ],
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn schema_rejects_empty_union() {
        let result = RecordSchema::new(
            "u",
            vec![FieldDef::new("v", WireType::Union(vec![]))],
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no variants"));
    }

    #[test]
    fn schema_rejects_union_inside_union() {
        let inner = WireType::Union(vec![WireType::int()]);
        let result = RecordSchema::new(
            "u",
            vec![FieldDef::new("v", WireType::Union(vec![inner]))],
        );
        assert!(result.is_err());
    }

    #[test]
    fn schema_rejects_union_array_items() {
        let result = RecordSchema::new(
            "u",
            vec![FieldDef::new(
                "v",
                WireType::array(WireType::Union(vec![WireType::int()])),
            )],
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("union items"));
    }

    #[test]
    fn mask_plan_counts_null_union_and_bool_bits() {
        let schema = RecordSchema::new(
            "m",
            vec![
                FieldDef::new("a", WireType::text()).nullable(),
                FieldDef::new("b", WireType::Bool),
                FieldDef::new(
                    "c",
                    WireType::Union(vec![
                        WireType::int(),
                        WireType::text(),
                        WireType::Bool,
                    ]),
                )
                .nullable(),
                FieldDef::new("d", WireType::Int(IntWidth::U16)),
            ],
        )
        .unwrap();

        // a: 1 null bit; b: 1 bool bit; c: 1 null + 2 tag + 1 bool value; d: 0.
        assert_eq!(schema.mask_bits(), 6);
        assert_eq!(schema.mask_len(), 1);
    }

    #[test]
    fn mask_plan_is_zero_without_contributing_fields() {
        let schema = RecordSchema::new(
            "plain",
            vec![
                FieldDef::new("title", WireType::Text(LenPrefix::Short)),
                FieldDef::new("score", WireType::Int(IntWidth::U16)),
                FieldDef::new("tags", WireType::array(WireType::text())),
            ],
        )
        .unwrap();

        assert_eq!(schema.mask_bits(), 0);
        assert_eq!(schema.mask_len(), 0);
    }

    #[test]
    fn single_variant_union_needs_no_tag_bits() {
        assert_eq!(WireType::tag_bits(1), 0);
        assert_eq!(WireType::tag_bits(2), 1);
        assert_eq!(WireType::tag_bits(3), 2);
        assert_eq!(WireType::tag_bits(4), 2);
        assert_eq!(WireType::tag_bits(5), 3);
    }
}
