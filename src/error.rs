//! # Codec Error Kinds
//!
//! This module provides `CodecError`, the typed error carried by every
//! fallible valwire operation. Errors flow through `eyre::Result` like the
//! rest of the crate; callers that need to distinguish the kind can
//! downcast the report.
//!
//! ## Error Kinds
//!
//! | Kind | Raised | Meaning |
//! |------|--------|---------|
//! | `Schema` | encode / schema build | field set is invalid, or a value does not fit its declared type |
//! | `LengthExceeded` | encode | string/array size exceeds the selected length prefix's capacity |
//! | `Malformed` | decode | buffer ends early, invalid UTF-8, or a union tag outside the declared variant set |
//!
//! All kinds are fatal to the current call: no partial record is ever
//! returned and the wire format carries no resynchronization marker.
//!
//! ## Usage
//!
//! ```ignore
//! match encode(&record) {
//!     Ok(bytes) => ...,
//!     Err(report) => match report.downcast_ref::<CodecError>() {
//!         Some(CodecError::LengthExceeded { .. }) => ...,
//!         _ => ...,
//!     },
//! }
//! ```

#[derive(Debug)]
pub enum CodecError {
    /// The schema itself is invalid, or a value does not match its
    /// declared field type.
    Schema(String),
    /// A string or array is larger than the selected length prefix can
    /// represent. The codec never auto-promotes to a wider prefix.
    LengthExceeded {
        what: &'static str,
        len: usize,
        cap: u64,
    },
    /// The input buffer cannot be decoded against the schema.
    Malformed(String),
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Schema(msg) => write!(f, "schema error: {}", msg),
            CodecError::LengthExceeded { what, len, cap } => write!(
                f,
                "length exceeded: {} of {} bytes/items does not fit a prefix capacity of {}",
                what, len, cap
            ),
            CodecError::Malformed(msg) => write!(f, "malformed input: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}
