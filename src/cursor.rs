//! Seekable byte-oriented input cursors.
//!
//! A [`Reader`] exposes byte reads, UTF-8 code-point reads, and absolute or
//! relative repositioning. Backtracking combinators use the [`Reader::mark`]
//! and [`Reader::reset`] checkpoints exclusively, so a cursor with finer
//! granularity (a bit cursor) can refine them without changing the byte-domain
//! meaning of [`Reader::seek`].

use std::io::SeekFrom;

use crate::errors::ParseError;

/// A seekable byte cursor threaded through a parse.
pub trait Reader {
    /// Reads the next byte, or `EndOfInput`.
    fn read_byte(&mut self) -> Result<u8, ParseError>;

    /// Repositions the cursor and returns the new byte offset. Negative
    /// targets fail with `OutOfBounds`; seeking beyond the end is permitted
    /// and subsequent reads yield `EndOfInput`.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ParseError>;

    /// Reads one UTF-8 code point and its byte width.
    ///
    /// An invalid sequence rewinds fully and fails with `NotMatched`; a
    /// sequence truncated by end of input rewinds fully and fails with
    /// `EndOfInput`.
    fn read_char(&mut self) -> Result<(char, u32), ParseError> {
        let start = self.mark()?;
        match decode_utf8(self) {
            Ok(decoded) => Ok(decoded),
            Err(e) => {
                self.reset(start)?;
                Err(e)
            }
        }
    }

    /// Current byte offset.
    fn position(&mut self) -> Result<u64, ParseError> {
        self.seek(SeekFrom::Current(0))
    }

    /// Checkpoint for backtracking, in the cursor's finest granularity.
    fn mark(&mut self) -> Result<u64, ParseError> {
        self.position()
    }

    /// Restores a checkpoint previously obtained from [`Reader::mark`].
    fn reset(&mut self, mark: u64) -> Result<(), ParseError> {
        self.seek(SeekFrom::Start(mark)).map(|_| ())
    }
}

fn decode_utf8<R: Reader + ?Sized>(reader: &mut R) -> Result<(char, u32), ParseError> {
    let b0 = reader.read_byte()?;
    let (width, init) = match b0 {
        0x00..=0x7F => return Ok((b0 as char, 1)),
        0xC2..=0xDF => (2u32, u32::from(b0 & 0x1F)),
        0xE0..=0xEF => (3, u32::from(b0 & 0x0F)),
        0xF0..=0xF4 => (4, u32::from(b0 & 0x07)),
        _ => return Err(ParseError::NotMatched),
    };

    let mut code_point = init;
    for _ in 1..width {
        let b = reader.read_byte()?;
        if b & 0xC0 != 0x80 {
            return Err(ParseError::NotMatched);
        }
        code_point = (code_point << 6) | u32::from(b & 0x3F);
    }

    // Overlong encodings never reach the minimum value for their width.
    let min = match width {
        2 => 0x80,
        3 => 0x800,
        _ => 0x1_0000,
    };
    if code_point < min {
        return Err(ParseError::NotMatched);
    }

    match char::from_u32(code_point) {
        Some(c) => Ok((c, width)),
        None => Err(ParseError::NotMatched),
    }
}

/// An in-memory [`Reader`] over a byte slice.
#[derive(Debug, Clone)]
pub struct SliceReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    /// Creates a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The unconsumed tail of the input.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }
}

impl Reader for SliceReader<'_> {
    fn read_byte(&mut self) -> Result<u8, ParseError> {
        match self.data.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                Ok(b)
            }
            None => Err(ParseError::EndOfInput),
        }
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, ParseError> {
        let target = match pos {
            SeekFrom::Start(n) => i128::from(n),
            SeekFrom::Current(d) => self.pos as i128 + i128::from(d),
            SeekFrom::End(d) => self.data.len() as i128 + i128::from(d),
        };
        if target < 0 {
            return Err(ParseError::OutOfBounds);
        }
        self.pos = usize::try_from(target).map_err(|_| ParseError::OutOfBounds)?;
        Ok(self.pos as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_byte() {
        let mut reader = SliceReader::new(&[0x01, 0x02]);
        assert_eq!(reader.read_byte().unwrap(), 0x01);
        assert_eq!(reader.read_byte().unwrap(), 0x02);
        assert_eq!(reader.read_byte().unwrap_err(), ParseError::EndOfInput);
    }

    #[test]
    fn test_seek_whence() {
        let mut reader = SliceReader::new(b"abcdef");
        assert_eq!(reader.seek(SeekFrom::Start(4)).unwrap(), 4);
        assert_eq!(reader.seek(SeekFrom::Current(-2)).unwrap(), 2);
        assert_eq!(reader.read_byte().unwrap(), b'c');
        assert_eq!(reader.seek(SeekFrom::End(-1)).unwrap(), 5);
        assert_eq!(reader.read_byte().unwrap(), b'f');
    }

    #[test]
    fn test_seek_negative_is_out_of_bounds() {
        let mut reader = SliceReader::new(b"ab");
        assert_eq!(
            reader.seek(SeekFrom::Current(-1)).unwrap_err(),
            ParseError::OutOfBounds
        );
    }

    #[test]
    fn test_seek_past_end_then_read() {
        let mut reader = SliceReader::new(b"ab");
        assert_eq!(reader.seek(SeekFrom::End(3)).unwrap(), 5);
        assert_eq!(reader.read_byte().unwrap_err(), ParseError::EndOfInput);
    }

    #[test]
    fn test_read_char_ascii_and_multibyte() {
        let mut reader = SliceReader::new("aé€🎉".as_bytes());
        assert_eq!(reader.read_char().unwrap(), ('a', 1));
        assert_eq!(reader.read_char().unwrap(), ('é', 2));
        assert_eq!(reader.read_char().unwrap(), ('€', 3));
        assert_eq!(reader.read_char().unwrap(), ('🎉', 4));
        assert_eq!(reader.read_char().unwrap_err(), ParseError::EndOfInput);
    }

    #[test]
    fn test_read_char_invalid_rewinds() {
        // 0xC0 is an overlong lead byte and never valid.
        let mut reader = SliceReader::new(&[0xC0, 0x80]);
        assert_eq!(reader.read_char().unwrap_err(), ParseError::NotMatched);
        assert_eq!(reader.position().unwrap(), 0);
    }

    #[test]
    fn test_read_char_bad_continuation_rewinds() {
        let mut reader = SliceReader::new(&[0xE2, 0x28, 0xA1]);
        assert_eq!(reader.read_char().unwrap_err(), ParseError::NotMatched);
        assert_eq!(reader.position().unwrap(), 0);
    }

    #[test]
    fn test_read_char_truncated_is_end_of_input() {
        // First two bytes of a three-byte sequence.
        let mut reader = SliceReader::new(&[0xE2, 0x82]);
        assert_eq!(reader.read_char().unwrap_err(), ParseError::EndOfInput);
        assert_eq!(reader.position().unwrap(), 0);
    }

    #[test]
    fn test_read_char_rejects_surrogate() {
        // 0xED 0xA0 0x80 encodes U+D800.
        let mut reader = SliceReader::new(&[0xED, 0xA0, 0x80]);
        assert_eq!(reader.read_char().unwrap_err(), ParseError::NotMatched);
        assert_eq!(reader.position().unwrap(), 0);
    }

    #[test]
    fn test_remaining() {
        let mut reader = SliceReader::new(b"abc");
        reader.read_byte().unwrap();
        assert_eq!(reader.remaining(), b"bc");
    }
}
