//! Bit-level primitive parsers over a [`BitRead`] cursor.
//!
//! Widths are validated at construction time: asking for more than 64 bits
//! is a programming error and panics when the parser is built, not when it
//! runs.

use std::io::SeekFrom;

use crate::bit_reader::BitRead;
use crate::errors::ParseError;
use crate::parser::Parser;

/// Reads exactly `n` bits MSB-first as an unsigned value.
///
/// # Panics
///
/// Panics at construction when `n` exceeds 64.
pub fn take<R>(n: u32) -> impl Parser<R, Output = u64>
where
    R: BitRead,
{
    assert!(n <= 64, "bit width must be 64 or less");
    move |reader: &mut R| {
        let start = reader.bit_position()?;
        let (value, got) = reader.read_bits(n)?;
        if got < n {
            reader.seek_bits(SeekFrom::Start(start))?;
            return Err(ParseError::EndOfInput);
        }
        Ok(value)
    }
}

/// Matches exactly `n` bits against `pattern`.
///
/// # Panics
///
/// Panics at construction when `n` exceeds 64 or `pattern` does not fit in
/// `n` bits.
pub fn tag<R>(n: u32, pattern: u64) -> impl Parser<R, Output = u64>
where
    R: BitRead,
{
    assert!(n <= 64, "bit width must be 64 or less");
    assert!(n == 64 || pattern >> n == 0, "pattern wider than the tag");
    move |reader: &mut R| {
        let start = reader.bit_position()?;
        let (value, got) = reader.read_bits(n)?;
        if got < n {
            reader.seek_bits(SeekFrom::Start(start))?;
            return Err(ParseError::EndOfInput);
        }
        if value != pattern {
            reader.seek_bits(SeekFrom::Start(start))?;
            return Err(ParseError::NotMatched);
        }
        Ok(value)
    }
}

/// Reads a single bit as a flag.
pub fn boolean<R>(reader: &mut R) -> Result<bool, ParseError>
where
    R: BitRead,
{
    reader.read_bool()
}

/// Reads exactly `n` bits and sign-extends them to an `i64`.
///
/// # Panics
///
/// Panics at construction when `n` is zero or exceeds 64.
pub fn signed<R>(n: u32) -> impl Parser<R, Output = i64>
where
    R: BitRead,
{
    assert!(n >= 1 && n <= 64, "bit width must be between 1 and 64");
    let unsigned = take(n);
    move |reader: &mut R| {
        let value = unsigned.parse(reader)?;
        Ok(sign_extend(value, n))
    }
}

/// Discards bits up to the next byte boundary. Does nothing when already
/// aligned.
pub fn align<R>(reader: &mut R) -> Result<(), ParseError>
where
    R: BitRead,
{
    let remainder = (reader.bit_position()? % 8) as u32;
    if remainder != 0 {
        // The cached tail of the current byte always holds these bits.
        reader.read_bits(8 - remainder)?;
    }
    Ok(())
}

/// Sign-extends the low `bits` of `value` to a full `i64`.
fn sign_extend(value: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}
