//! # valwire - Schema-Driven Value-Only Serialization
//!
//! valwire encodes records into a compact byte stream carrying only
//! values: no field names, no embedded type information beyond the bits
//! strictly required to resolve a declared union. Sender and receiver
//! agree on the schema out-of-band, the usual arrangement for distributed
//! job queues and object caches where self-describing formats pay for
//! their flexibility on every single payload.
//!
//! ## Quick Start
//!
//! ```ignore
//! use valwire::{decode, encode, FieldDef, Record, RecordSchema, WireType};
//!
//! let schema = RecordSchema::new(
//!     "job",
//!     vec![
//!         FieldDef::new("title", WireType::text()),
//!         FieldDef::new("attempts", WireType::int()).nullable(),
//!         FieldDef::new("tags", WireType::array(WireType::text())),
//!     ],
//! )?;
//!
//! let mut job = Record::new(schema.clone());
//! job.set_named("title", "crawl")?;
//! job.set_named("tags", vec!["fast".into(), "retry".into()])?;
//!
//! let bytes = encode(&job)?;
//! let (restored, _) = decode(&bytes, &schema, 0)?;
//! assert_eq!(restored, job);
//! ```
//!
//! ## Wire Layout
//!
//! Every record is `[mask bytes][value bytes]`, with nested records and
//! arrays recursively nesting their own spans inside the parent's value
//! section:
//!
//! ```text
//! +------------------+---------------------------------------------+
//! | Mask             | Values                                      |
//! | [u8; ceil(B/8)]  | fixed-width scalars, [prefix][payload]      |
//! |                  | strings/arrays, nested [mask][values] spans |
//! +------------------+---------------------------------------------+
//! ```
//!
//! The mask packs three concerns into one MSB-first bit stream sharing a
//! single monotonically increasing counter: nullability bits, union tag
//! bits, and boolean values. Boolean scalars therefore occupy no value
//! bytes at all, and a null field costs exactly one bit.
//!
//! ## Compatibility Contract
//!
//! The format is deliberately not self-describing: no magic number, no
//! version tag, no field names. Both ends must compile their schema from
//! the same field list, order, and annotations; a mismatch silently
//! misaligns every offset after the first divergence. Treat any decode
//! error as "discard this buffer".
//!
//! ## Module Overview
//!
//! - [`types`]: `Value`/`Record` runtime model and `WireType` descriptors
//! - [`schema`]: `RecordSchema` compilation and the process-wide registry
//! - [`encoding`]: big-endian scalar pack/unpack and mask bit plumbing
//! - [`codec`]: the recursive encode/decode walk
//! - [`error`]: the `CodecError` kinds

pub mod codec;
pub mod encoding;
pub mod error;
pub mod schema;
pub mod types;

pub use codec::{decode, encode};
pub use error::CodecError;
pub use schema::{FieldDef, RecordSchema, SchemaRegistry};
pub use types::{FloatWidth, IntWidth, LenPrefix, Record, Value, WireType};
