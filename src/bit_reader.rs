//! Bit-granularity cursor layered on a byte [`Reader`].
//!
//! Bits are read in MSB-first order: the first bit delivered is the high bit
//! of the next unread byte. The reader keeps a one-byte cache of unread bits
//! (left-aligned) so reads and seeks may land on any bit offset; spanning a
//! byte boundary combines the cache with freshly read bytes.

use std::io::SeekFrom;

use crate::cursor::Reader;
use crate::errors::ParseError;

/// Capability extension of [`Reader`] for cursors with sub-byte offsets.
pub trait BitRead: Reader {
    /// Reads up to `n` (max 64) bits MSB-first.
    ///
    /// Returns the value and the number of bits actually read. Fewer bits
    /// than requested means the input ended mid-read; the partial value and
    /// true count let the caller distinguish truncation precisely.
    fn read_bits(&mut self, n: u32) -> Result<(u64, u32), ParseError>;

    /// Repositions the cursor to a bit offset and returns the new one.
    fn seek_bits(&mut self, pos: SeekFrom) -> Result<u64, ParseError>;

    /// Current offset in bits.
    fn bit_position(&mut self) -> Result<u64, ParseError>;

    /// True when the cursor sits on a byte boundary.
    fn is_aligned(&self) -> bool;

    /// Reads a single bit as a flag.
    fn read_bool(&mut self) -> Result<bool, ParseError> {
        let (bit, got) = self.read_bits(1)?;
        if got < 1 {
            return Err(ParseError::EndOfInput);
        }
        Ok(bit == 1)
    }
}

/// A [`BitRead`] cursor over any byte [`Reader`].
#[derive(Debug)]
pub struct BitReader<R> {
    inner: R,
    /// Unread bits of the last byte fetched, left-aligned.
    cache: u8,
    /// Number of valid bits in `cache`, 0..=8.
    cache_bits: u32,
}

impl<R: Reader> BitReader<R> {
    /// Wraps a byte reader at its current position.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: 0,
            cache_bits: 0,
        }
    }

    /// Returns the underlying byte reader.
    ///
    /// Fails with `RemainingBits` when the cursor is not on a byte boundary,
    /// rather than silently dropping the cached bits.
    pub fn into_inner(self) -> Result<R, ParseError> {
        if self.cache_bits != 0 {
            return Err(ParseError::RemainingBits(self.cache_bits));
        }
        Ok(self.inner)
    }
}

impl<R: Reader> BitRead for BitReader<R> {
    fn read_bits(&mut self, n: u32) -> Result<(u64, u32), ParseError> {
        if n > 64 {
            return Err(ParseError::TooManyBits);
        }

        let mut value = 0u64;
        let mut got = 0u32;

        while got < n {
            if self.cache_bits == 0 {
                match self.inner.read_byte() {
                    Ok(b) => {
                        self.cache = b;
                        self.cache_bits = 8;
                    }
                    Err(ParseError::EndOfInput) => return Ok((value, got)),
                    Err(e) => return Err(e),
                }
            }

            let take = (n - got).min(self.cache_bits);
            let bits = u64::from(self.cache >> (8 - take));
            value = (value << take) | bits;
            self.cache = if take == 8 { 0 } else { self.cache << take };
            self.cache_bits -= take;
            got += take;
        }

        Ok((value, n))
    }

    fn bit_position(&mut self) -> Result<u64, ParseError> {
        // The inner cursor is already past the byte whose tail is cached.
        let byte_pos = self.inner.position()?;
        Ok(byte_pos * 8 - u64::from(self.cache_bits))
    }

    fn is_aligned(&self) -> bool {
        self.cache_bits == 0
    }

    fn seek_bits(&mut self, pos: SeekFrom) -> Result<u64, ParseError> {
        let (byte_target, remainder) = match pos {
            SeekFrom::Start(bits) => (SeekFrom::Start(bits / 8), (bits % 8) as u32),
            SeekFrom::Current(delta) => {
                // bit_position already discounts cached-but-unread bits.
                let target = self.bit_position()? as i128 + i128::from(delta);
                if target < 0 {
                    return Err(ParseError::OutOfBounds);
                }
                let target = target as u64;
                (SeekFrom::Start(target / 8), (target % 8) as u32)
            }
            SeekFrom::End(delta) => {
                let mut byte_off = delta / 8;
                let mut remainder = delta % 8;
                if remainder < 0 {
                    // Round one byte further from the end so the remainder
                    // becomes a forward in-byte offset.
                    byte_off -= 1;
                    remainder += 8;
                }
                (SeekFrom::End(byte_off), remainder as u32)
            }
        };

        self.inner.seek(byte_target)?;
        self.cache = 0;
        self.cache_bits = 0;

        if remainder > 0 {
            let (_, got) = self.read_bits(remainder)?;
            if got < remainder {
                return Err(ParseError::EndOfInput);
            }
        }

        self.bit_position()
    }
}

impl<R: Reader> Reader for BitReader<R> {
    fn read_byte(&mut self) -> Result<u8, ParseError> {
        if self.cache_bits == 0 {
            return self.inner.read_byte();
        }

        // Unaligned: reassemble one byte by shifting the cache against
        // freshly read input.
        let start = self.bit_position()?;
        let (value, got) = self.read_bits(8)?;
        if got < 8 {
            self.seek_bits(SeekFrom::Start(start))?;
            return Err(ParseError::EndOfInput);
        }
        Ok(value as u8)
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ParseError> {
        if self.cache_bits != 0 {
            return Err(ParseError::RemainingBits(self.cache_bits));
        }
        self.inner.seek(pos)
    }

    fn mark(&mut self) -> Result<u64, ParseError> {
        self.bit_position()
    }

    fn reset(&mut self, mark: u64) -> Result<(), ParseError> {
        self.seek_bits(SeekFrom::Start(mark)).map(|_| ())
    }
}
