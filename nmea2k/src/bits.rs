//! Bit-level reader and writer for NMEA 2000 payloads.
//!
//! Fields are packed little-endian, least significant bit first, and seldom
//! align with byte boundaries.
use crate::error::{BitReaderError, BitWriterError};

/// Reads bit segments from a borrowed payload.
pub struct BitReader<'a> {
    buffer: &'a [u8],
    bit_cursor: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            bit_cursor: 0,
        }
    }

    /// Current position in bits from the start of the payload.
    pub fn bit_cursor(&self) -> usize {
        self.bit_cursor
    }

    /// Bits left between the cursor and the end of the payload.
    pub fn remaining_bits(&self) -> usize {
        self.buffer.len() * 8 - self.bit_cursor
    }

    /// Read `num_bits` (1..=64) bits at the cursor.
    pub fn read_u64(&mut self, num_bits: u16) -> Result<u64, BitReaderError> {
        if !(1..=64).contains(&num_bits) {
            return Err(BitReaderError::TooLongForType {
                max: 64,
                asked: num_bits,
            });
        }
        let available = self.remaining_bits();
        if num_bits as usize > available {
            return Err(BitReaderError::OutOfBounds {
                asked: num_bits as usize,
                available,
            });
        }

        let mut result: u64 = 0;
        let mut bits_read: usize = 0;
        let wanted = num_bits as usize;

        while bits_read < wanted {
            let position = self.bit_cursor + bits_read;
            let byte = self.buffer[position / 8];
            let offset = position % 8;
            let take = (8 - offset).min(wanted - bits_read);
            let mask = ((1u16 << take) - 1) as u8;
            let chunk = (byte >> offset) & mask;
            result |= (chunk as u64) << bits_read;
            bits_read += take;
        }

        self.bit_cursor += wanted;
        Ok(result)
    }

    /// Skip `length` bits.
    pub fn advance(&mut self, length: usize) -> Result<(), BitReaderError> {
        let available = self.remaining_bits();
        if length > available {
            return Err(BitReaderError::OutOfBounds {
                asked: length,
                available,
            });
        }
        self.bit_cursor += length;
        Ok(())
    }

    /// Borrow `len` whole bytes. The cursor must sit on a byte boundary.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], BitReaderError> {
        if self.bit_cursor % 8 != 0 {
            return Err(BitReaderError::NonAlignedBit {
                cursor: self.bit_cursor,
            });
        }
        let start = self.bit_cursor / 8;
        let end = start + len;
        if end > self.buffer.len() {
            return Err(BitReaderError::OutOfBounds {
                asked: len * 8,
                available: self.remaining_bits(),
            });
        }
        self.bit_cursor += len * 8;
        Ok(&self.buffer[start..end])
    }
}

/// Lays bit segments into a growable payload.
///
/// Unlike the reader, the writer owns its buffer: fast-packet payloads can be
/// up to 223 bytes and their final length is only known once every field,
/// including variable strings and repeating groups, has been written.
#[derive(Debug, Default)]
pub struct BitWriter {
    buffer: Vec<u8>,
    bit_cursor: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_cursor(&self) -> usize {
        self.bit_cursor
    }

    /// Write the low `num_bits` (1..=64) bits of `value`.
    pub fn write_u64(&mut self, value: u64, num_bits: u16) -> Result<(), BitWriterError> {
        if !(1..=64).contains(&num_bits) {
            return Err(BitWriterError::TooLongForType {
                max: 64,
                asked: num_bits,
            });
        }
        let wanted = num_bits as usize;
        let end_bit = self.bit_cursor + wanted;
        self.buffer.resize(end_bit.div_ceil(8), 0);

        let mut written: usize = 0;
        while written < wanted {
            let position = self.bit_cursor + written;
            let offset = position % 8;
            let take = (8 - offset).min(wanted - written);
            let mask = ((1u16 << take) - 1) as u8;
            let chunk = ((value >> written) as u8) & mask;
            let byte = &mut self.buffer[position / 8];
            *byte &= !(mask << offset);
            *byte |= chunk << offset;
            written += take;
        }

        self.bit_cursor = end_bit;
        Ok(())
    }

    /// Fill `length` bits with ones (reserved or "not available" data).
    pub fn write_ones(&mut self, mut length: usize) -> Result<(), BitWriterError> {
        while length > 0 {
            let chunk = length.min(64);
            self.write_u64(u64::MAX, chunk as u16)?;
            length -= chunk;
        }
        Ok(())
    }

    /// Append whole bytes. The cursor must sit on a byte boundary.
    pub fn write_slice(&mut self, bytes: &[u8]) -> Result<(), BitWriterError> {
        if self.bit_cursor % 8 != 0 {
            return Err(BitWriterError::NonAlignedBit {
                cursor: self.bit_cursor,
            });
        }
        self.buffer.extend_from_slice(bytes);
        self.bit_cursor += bytes.len() * 8;
        Ok(())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}
