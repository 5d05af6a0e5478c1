//! Byte-level primitive parsers and fixed-width numeric decoders.

use crate::cursor::Reader;
use crate::errors::ParseError;
use crate::parser::{Parser, attempt};

/// Reads any single byte.
pub fn any_byte<R: Reader>(reader: &mut R) -> Result<u8, ParseError> {
    reader.read_byte()
}

/// Matches one exact byte.
pub fn exact<R: Reader>(expected: u8) -> impl Parser<R, Output = u8> {
    move |reader: &mut R| {
        attempt(reader, |r| {
            let b = r.read_byte()?;
            if b == expected {
                Ok(b)
            } else {
                Err(ParseError::NotMatched)
            }
        })
    }
}

/// Matches an exact byte sequence.
pub fn tag<R: Reader>(expected: &'static [u8]) -> impl Parser<R, Output = &'static [u8]> {
    move |reader: &mut R| {
        attempt(reader, |r| {
            for &want in expected {
                if r.read_byte()? != want {
                    return Err(ParseError::NotMatched);
                }
            }
            Ok(expected)
        })
    }
}

/// Reads exactly `n` bytes.
pub fn take<R: Reader>(n: usize) -> impl Parser<R, Output = Vec<u8>> {
    move |reader: &mut R| {
        attempt(reader, |r| {
            let mut bytes = Vec::with_capacity(n);
            for _ in 0..n {
                bytes.push(r.read_byte()?);
            }
            Ok(bytes)
        })
    }
}

macro_rules! int_parser {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $from:ident) => {
        $(#[$doc])*
        pub fn $name<R: Reader>(reader: &mut R) -> Result<$ty, ParseError> {
            attempt(reader, |r| {
                let mut bytes = [0u8; size_of::<$ty>()];
                for b in &mut bytes {
                    *b = r.read_byte()?;
                }
                Ok(<$ty>::$from(bytes))
            })
        }
    };
}

int_parser!(
    /// Reads a big-endian `u16`.
    be_u16, u16, from_be_bytes
);
int_parser!(
    /// Reads a big-endian `u32`.
    be_u32, u32, from_be_bytes
);
int_parser!(
    /// Reads a big-endian `u64`.
    be_u64, u64, from_be_bytes
);
int_parser!(
    /// Reads a little-endian `u16`.
    le_u16, u16, from_le_bytes
);
int_parser!(
    /// Reads a little-endian `u32`.
    le_u32, u32, from_le_bytes
);
int_parser!(
    /// Reads a little-endian `u64`.
    le_u64, u64, from_le_bytes
);

/// Reads a big-endian IEEE 754 `f32`.
pub fn be_f32<R: Reader>(reader: &mut R) -> Result<f32, ParseError> {
    Ok(f32::from_bits(be_u32(reader)?))
}

/// Reads a big-endian IEEE 754 `f64`.
pub fn be_f64<R: Reader>(reader: &mut R) -> Result<f64, ParseError> {
    Ok(f64::from_bits(be_u64(reader)?))
}

/// Reads a little-endian IEEE 754 `f32`.
pub fn le_f32<R: Reader>(reader: &mut R) -> Result<f32, ParseError> {
    Ok(f32::from_bits(le_u32(reader)?))
}

/// Reads a little-endian IEEE 754 `f64`.
pub fn le_f64<R: Reader>(reader: &mut R) -> Result<f64, ParseError> {
    Ok(f64::from_bits(le_u64(reader)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::SliceReader;

    #[test]
    fn test_exact() {
        let parser = exact(0x42);
        let mut reader = SliceReader::new(&[0x42, 0x43]);
        assert_eq!(parser.parse(&mut reader).unwrap(), 0x42);
        assert_eq!(parser.parse(&mut reader).unwrap_err(), ParseError::NotMatched);
        assert_eq!(reader.remaining(), &[0x43]);
    }

    #[test]
    fn test_tag_restores_on_partial_match() {
        let parser = tag(b"\x01\x02\x03");
        let mut reader = SliceReader::new(&[0x01, 0x02, 0xFF]);
        assert_eq!(parser.parse(&mut reader).unwrap_err(), ParseError::NotMatched);
        assert_eq!(reader.remaining(), &[0x01, 0x02, 0xFF]);
    }

    #[test]
    fn test_take() {
        let parser = take(2);
        let mut reader = SliceReader::new(&[0x01, 0x02, 0x03]);
        assert_eq!(parser.parse(&mut reader).unwrap(), vec![0x01, 0x02]);
        assert_eq!(reader.remaining(), &[0x03]);
    }

    #[test]
    fn test_take_past_end_restores() {
        let parser = take(4);
        let mut reader = SliceReader::new(&[0x01, 0x02]);
        assert_eq!(parser.parse(&mut reader).unwrap_err(), ParseError::EndOfInput);
        assert_eq!(reader.remaining(), &[0x01, 0x02]);
    }

    #[test]
    fn test_endian_integers() {
        let mut reader = SliceReader::new(&[0x01, 0x02, 0x01, 0x02]);
        assert_eq!(be_u16(&mut reader).unwrap(), 0x0102);
        assert_eq!(le_u16(&mut reader).unwrap(), 0x0201);
    }

    #[test]
    fn test_be_u32_truncated_restores() {
        let mut reader = SliceReader::new(&[0x01, 0x02]);
        assert_eq!(be_u32(&mut reader).unwrap_err(), ParseError::EndOfInput);
        assert_eq!(reader.remaining(), &[0x01, 0x02]);
    }

    #[test]
    fn test_be_f32() {
        let bytes = 1.5f32.to_be_bytes();
        let mut reader = SliceReader::new(&bytes);
        assert_eq!(be_f32(&mut reader).unwrap(), 1.5);
    }

    #[test]
    fn test_le_f64() {
        let bytes = (-0.25f64).to_le_bytes();
        let mut reader = SliceReader::new(&bytes);
        assert_eq!(le_f64(&mut reader).unwrap(), -0.25);
    }
}
