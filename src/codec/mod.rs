//! # Record Codec
//!
//! This module provides the object graph walker: `encode` turning a
//! `Record` into its `[mask bytes][value bytes]` wire form, and `decode`
//! rebuilding the record from a buffer and a cursor. Both sides walk the
//! schema's field list in declaration order with no backtracking; the
//! structural correspondence between the two walks is the whole wire
//! contract.

pub mod decoder;
pub mod encoder;


pub use decoder::decode;
pub use encoder::encode;
