//! # Encoding Module
//!
//! This module provides the byte- and bit-level primitives for valwire:
//!
//! - **Scalar encoding**: big-endian fixed-width integer/float and
//!   length-prefix pack/unpack
//! - **Mask plumbing**: MSB-first bit reader/writer behind the record mask

pub mod mask;
pub mod scalar;

pub use mask::{MaskReader, MaskWriter};
