//! Ordered choice and lookahead combinators.

use crate::cursor::Reader;
use crate::errors::ParseError;
use crate::parser::{Parser, attempt};

/// A fixed-arity list of alternatives with a common output type.
/// Implemented for tuples of two through eight parsers.
pub trait Alternative<R> {
    /// The common output of every alternative.
    type Output;

    /// Tries each alternative in order.
    fn parse_alt(&self, reader: &mut R) -> Result<Self::Output, ParseError>;
}

macro_rules! alternative_impl {
    ($($parser:ident $idx:tt),+) => {
        impl<R: Reader, T, $($parser: Parser<R, Output = T>),+> Alternative<R> for ($($parser,)+) {
            type Output = T;

            fn parse_alt(&self, reader: &mut R) -> Result<T, ParseError> {
                $(
                    match attempt(reader, |r| self.$idx.parse(r)) {
                        Ok(value) => return Ok(value),
                        Err(e) if e.is_recoverable() => {}
                        Err(e) => return Err(e),
                    }
                )+
                Err(ParseError::NotMatched)
            }
        }
    };
}

alternative_impl!(A 0, B 1);
alternative_impl!(A 0, B 1, C 2);
alternative_impl!(A 0, B 1, C 2, D 3);
alternative_impl!(A 0, B 1, C 2, D 3, E 4);
alternative_impl!(A 0, B 1, C 2, D 3, E 4, F 5);
alternative_impl!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
alternative_impl!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

/// Ordered choice: the first alternative to succeed wins, a recoverable
/// failure tries the next one, and a fatal failure aborts immediately.
/// Exhausting every alternative yields `NotMatched`.
pub fn alt<R, A>(alternatives: A) -> impl Parser<R, Output = A::Output>
where
    R: Reader,
    A: Alternative<R>,
{
    move |reader: &mut R| alternatives.parse_alt(reader)
}

/// Makes `parser` optional: a recoverable failure produces `None` and
/// consumes nothing. Fatal failures still propagate.
pub fn optional<R, P>(parser: P) -> impl Parser<R, Output = Option<P::Output>>
where
    R: Reader,
    P: Parser<R>,
{
    move |reader: &mut R| match attempt(reader, |r| parser.parse(r)) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Runs `parser` and unconditionally rewinds, returning its result for
/// inspection without consumption.
pub fn peek<R, P>(parser: P) -> impl Parser<R, Output = P::Output>
where
    R: Reader,
    P: Parser<R>,
{
    move |reader: &mut R| {
        let start = reader.mark()?;
        let result = parser.parse(reader);
        reader.reset(start)?;
        result
    }
}

/// Negative lookahead: succeeds consuming nothing iff `parser` fails
/// recoverably, fails consuming nothing iff it succeeds.
pub fn not<R, P>(parser: P) -> impl Parser<R, Output = ()>
where
    R: Reader,
    P: Parser<R>,
{
    move |reader: &mut R| {
        let start = reader.mark()?;
        match parser.parse(reader) {
            Ok(_) => {
                reader.reset(start)?;
                Err(ParseError::NotMatched)
            }
            Err(e) if e.is_recoverable() => {
                reader.reset(start)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::SliceReader;
    use crate::modifier::cut;
    use crate::sequence::pair;
    use crate::text::{char_, tag};

    #[test]
    fn test_alt_first_match_wins() {
        let parser = alt((char_('a'), char_('b')));
        let mut reader = SliceReader::new(b"b");
        assert_eq!(parser.parse(&mut reader).unwrap(), 'b');
        assert_eq!(reader.remaining(), b"");
    }

    #[test]
    fn test_alt_exhausted() {
        let parser = alt((char_('a'), char_('b')));
        let mut reader = SliceReader::new(b"c");
        assert_eq!(parser.parse(&mut reader).unwrap_err(), ParseError::NotMatched);
        assert_eq!(reader.remaining(), b"c");
    }

    #[test]
    fn test_alt_fatal_short_circuits() {
        // The first branch matches "ab" then fails under cut; the second
        // branch would match but must never run.
        let parser = alt((cut(pair(tag("ab"), char_('!'))), pair(tag("abc"), char_('d'))));
        let mut reader = SliceReader::new(b"abcd");
        assert!(parser.parse(&mut reader).unwrap_err().is_fatal());
    }

    #[test]
    fn test_optional_none_consumes_nothing() {
        let parser = optional(char_('a'));
        let mut reader = SliceReader::new(b"b");
        assert_eq!(parser.parse(&mut reader).unwrap(), None);
        assert_eq!(reader.remaining(), b"b");
    }

    #[test]
    fn test_optional_some() {
        let parser = optional(char_('a'));
        let mut reader = SliceReader::new(b"ab");
        assert_eq!(parser.parse(&mut reader).unwrap(), Some('a'));
        assert_eq!(reader.remaining(), b"b");
    }

    #[test]
    fn test_optional_propagates_fatal() {
        let parser = optional(cut(char_('a')));
        let mut reader = SliceReader::new(b"b");
        assert!(parser.parse(&mut reader).unwrap_err().is_fatal());
    }

    #[test]
    fn test_peek_consumes_nothing() {
        let parser = peek(tag("ab"));
        let mut reader = SliceReader::new(b"abc");
        assert_eq!(parser.parse(&mut reader).unwrap(), "ab");
        assert_eq!(reader.remaining(), b"abc");
    }

    #[test]
    fn test_not() {
        let parser = not(char_('a'));
        let mut reader = SliceReader::new(b"b");
        parser.parse(&mut reader).unwrap();
        assert_eq!(reader.remaining(), b"b");

        let mut reader = SliceReader::new(b"a");
        assert_eq!(parser.parse(&mut reader).unwrap_err(), ParseError::NotMatched);
        assert_eq!(reader.remaining(), b"a");
    }
}
