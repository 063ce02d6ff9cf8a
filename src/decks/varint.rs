//! LEB128 variable-length integers, as used by hsd deck strings.
//!
//! Seven bits per byte, least-significant group first; every byte except
//! the last has its high bit set.

use crate::error::{CardGameError, Result};

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

/// Append `value` to `out`, returning the number of bytes written.
pub fn write(out: &mut Vec<u8>, mut value: u64) -> usize {
    let start = out.len();
    loop {
        let byte = (value & u64::from(PAYLOAD)) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | CONTINUATION);
    }
    out.len() - start
}

/// Decode the varint starting at `offset`.
///
/// Returns the value and the number of bytes it occupied.
pub fn read(bytes: &[u8], offset: usize) -> Result<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0u32;
    for (consumed, &byte) in bytes.get(offset..).unwrap_or_default().iter().enumerate() {
        let group = u64::from(byte & PAYLOAD);
        if shift > 63 || (shift == 63 && group > 1) {
            return Err(CardGameError::VarIntOverflow { offset });
        }
        value |= group << shift;
        if byte & CONTINUATION == 0 {
            return Ok((value, consumed + 1));
        }
        shift += 7;
    }
    Err(CardGameError::UnexpectedEof { offset })
}

/// Sequential reader over a varint buffer.
#[derive(Clone, Debug)]
pub struct VarIntReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> VarIntReader<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, offset }
    }

    /// Read the next varint and advance past it.
    pub fn next_value(&mut self) -> Result<u64> {
        let (value, consumed) = read(self.bytes, self.offset)?;
        self.offset += consumed;
        Ok(value)
    }

    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}
