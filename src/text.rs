//! UTF-8 character primitives, ASCII class predicates, and checked numeric
//! conversion.

use crate::cursor::Reader;
use crate::errors::ParseError;
use crate::parser::{Parser, attempt};

/// Reads any single code point.
pub fn any_char<R: Reader>(reader: &mut R) -> Result<char, ParseError> {
    reader.read_char().map(|(c, _)| c)
}

/// Reads one code point accepted by `predicate`.
pub fn satisfy<R, F>(predicate: F) -> impl Parser<R, Output = char>
where
    R: Reader,
    F: Fn(char) -> bool,
{
    move |reader: &mut R| {
        attempt(reader, |r| {
            let (c, _) = r.read_char()?;
            if predicate(c) {
                Ok(c)
            } else {
                Err(ParseError::NotMatched)
            }
        })
    }
}

/// Matches one exact code point.
pub fn char_<R: Reader>(expected: char) -> impl Parser<R, Output = char> {
    satisfy(move |c| c == expected)
}

/// Matches any code point contained in `set`.
pub fn one_of<R: Reader>(set: &'static str) -> impl Parser<R, Output = char> {
    satisfy(move |c| set.contains(c))
}

/// Matches an exact string.
pub fn tag<R: Reader>(expected: &'static str) -> impl Parser<R, Output = &'static str> {
    move |reader: &mut R| {
        attempt(reader, |r| {
            for &want in expected.as_bytes() {
                if r.read_byte()? != want {
                    return Err(ParseError::NotMatched);
                }
            }
            Ok(expected)
        })
    }
}

/// Skips zero or more ASCII whitespace characters.
pub fn whitespace0<R: Reader>(reader: &mut R) -> Result<(), ParseError> {
    loop {
        let before = reader.mark()?;
        match reader.read_char() {
            Ok((c, _)) if is_whitespace(c) => {}
            Ok(_) => {
                reader.reset(before)?;
                return Ok(());
            }
            Err(e) if e.is_recoverable() => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

/// ASCII decimal digit.
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// ASCII hexadecimal digit.
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// ASCII letter.
pub fn is_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// ASCII letter or decimal digit.
pub fn is_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// ASCII space, tab, carriage return, or newline.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Parses one or more digits in `radix` into a `u64` with checked
/// accumulation.
///
/// A value exceeding `u64::MAX` fails with `Overflow`, fully restoring the
/// cursor, so an over-long literal behaves as a semantic rejection rather
/// than a wrapped number.
///
/// # Panics
///
/// Panics at construction when `radix` is outside 2..=36.
pub fn unsigned<R: Reader>(radix: u32) -> impl Parser<R, Output = u64> {
    assert!((2..=36).contains(&radix), "radix must be between 2 and 36");
    move |reader: &mut R| {
        let start = reader.mark()?;
        let mut value = 0u64;
        let mut digits = 0usize;
        loop {
            let before = reader.mark()?;
            match reader.read_char() {
                Ok((c, _)) => match c.to_digit(radix) {
                    Some(d) => {
                        let next = value
                            .checked_mul(u64::from(radix))
                            .and_then(|v| v.checked_add(u64::from(d)));
                        match next {
                            Some(v) => value = v,
                            None => {
                                reader.reset(start)?;
                                return Err(ParseError::Overflow);
                            }
                        }
                        digits += 1;
                    }
                    None => {
                        reader.reset(before)?;
                        break;
                    }
                },
                Err(e) if e.is_recoverable() => {
                    if digits == 0 {
                        return Err(e);
                    }
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        if digits == 0 {
            return Err(ParseError::NotMatched);
        }
        Ok(value)
    }
}
