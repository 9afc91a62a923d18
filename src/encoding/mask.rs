//! # Bit-Mask Plumbing
//!
//! This module provides the bit-level reader and writer behind the record
//! mask: the leading bit-packed header carrying nullability, union tags,
//! and boolean values.
//!
//! ## Bit Layout
//!
//! Bits are assigned by a single monotonically increasing counter shared
//! across every mask-contributing concern of the whole field list, packed
//! most-significant-bit first within each byte:
//!
//! ```text
//! bit index:  0  1  2  3  4  5  6  7 | 8  9 ...
//! byte 0:    b7 b6 b5 b4 b3 b2 b1 b0 | byte 1: ...
//! ```
//!
//! Multi-bit values (union tags) are written most significant bit first.
//! The writer is sized to the schema's planned capacity up front; bits a
//! null field leaves unconsumed simply stay zero.
//!
//! Boolean array items never pass through here: they are packed as their
//! own bitmap inside the value section.

use smallvec::SmallVec;

/// Appends bits into a mask sized to a fixed capacity.
#[derive(Debug)]
pub struct MaskWriter {
    bytes: SmallVec<[u8; 8]>,
    bit: usize,
}

impl MaskWriter {
    /// Creates a writer holding `capacity_bits` rounded up to whole bytes.
    pub fn new(capacity_bits: usize) -> Self {
        let mut bytes = SmallVec::new();
        bytes.resize(capacity_bits.div_ceil(8), 0);
        Self { bytes, bit: 0 }
    }

    pub fn push_bit(&mut self, bit: bool) {
        debug_assert!(self.bit < self.bytes.len() * 8, "mask capacity overrun");
        if bit {
            self.bytes[self.bit / 8] |= 0x80 >> (self.bit % 8);
        }
        self.bit += 1;
    }

    /// Pushes the low `width` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u64, width: usize) {
        for shift in (0..width).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Consumes bits from a mask span in the same order the writer produced
/// them.
#[derive(Debug)]
pub struct MaskReader<'a> {
    bytes: &'a [u8],
    bit: usize,
}

impl<'a> MaskReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, bit: 0 }
    }

    pub fn read_bit(&mut self) -> bool {
        debug_assert!(self.bit < self.bytes.len() * 8, "mask capacity overrun");
        let bit = self.bytes[self.bit / 8] & (0x80 >> (self.bit % 8)) != 0;
        self.bit += 1;
        bit
    }

    /// Reads `width` bits as an unsigned value, most significant first.
    pub fn read_bits(&mut self, width: usize) -> u64 {
        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 1) | u64::from(self.read_bit());
        }
        value
    }
}
