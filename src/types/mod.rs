//! # Type System for valwire
//!
//! This module provides the value model and the wire-type descriptors.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `WireType` | declared on-wire type of a field or array item |
//! | `IntWidth` / `FloatWidth` | width and signedness/precision annotations |
//! | `LenPrefix` | 2- or 4-byte length-prefix annotation |
//! | `Value` | owned runtime value |
//! | `Record` | ordered field values plus schema handle |
//!
//! ## Usage
//!
//! ```ignore
//! use valwire::types::{Record, Value, WireType};
//!
//! let mut rec = Record::new(schema.clone());
//! rec.set_named("title", "hello")?;
//! rec.set_named("score", 42i64)?;
//! ```

mod value;
mod wire_type;

pub use value::{Record, Value};
pub use wire_type::{FloatWidth, IntWidth, LenPrefix, WireType};
