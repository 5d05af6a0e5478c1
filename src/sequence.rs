//! Sequencing combinators.
//!
//! A sequence is one atomic attempt: when any later component fails
//! recoverably, the cursor is restored to the position before the *first*
//! component ran, not merely before the failing suffix.

use std::io::SeekFrom;

use crate::cursor::Reader;
use crate::errors::ParseError;
use crate::parser::{Parser, attempt};

/// Runs `first` then `second`, producing both values.
pub fn pair<R, A, B>(first: A, second: B) -> impl Parser<R, Output = (A::Output, B::Output)>
where
    R: Reader,
    A: Parser<R>,
    B: Parser<R>,
{
    move |reader: &mut R| {
        attempt(reader, |reader| {
            let a = first.parse(reader)?;
            let b = second.parse(reader)?;
            Ok((a, b))
        })
    }
}

/// Runs `first` for its consumption only, then produces `second`'s value.
pub fn preceded<R, A, B>(first: A, second: B) -> impl Parser<R, Output = B::Output>
where
    R: Reader,
    A: Parser<R>,
    B: Parser<R>,
{
    move |reader: &mut R| {
        attempt(reader, |reader| {
            first.parse(reader)?;
            second.parse(reader)
        })
    }
}

/// Produces `first`'s value, then runs `second` for its consumption only.
pub fn terminated<R, A, B>(first: A, second: B) -> impl Parser<R, Output = A::Output>
where
    R: Reader,
    A: Parser<R>,
    B: Parser<R>,
{
    move |reader: &mut R| {
        attempt(reader, |reader| {
            let a = first.parse(reader)?;
            second.parse(reader)?;
            Ok(a)
        })
    }
}

/// Produces `inner`'s value surrounded by `open` and `close`.
pub fn delimited<R, O, P, C>(open: O, inner: P, close: C) -> impl Parser<R, Output = P::Output>
where
    R: Reader,
    O: Parser<R>,
    P: Parser<R>,
    C: Parser<R>,
{
    move |reader: &mut R| {
        attempt(reader, |reader| {
            open.parse(reader)?;
            let value = inner.parse(reader)?;
            close.parse(reader)?;
            Ok(value)
        })
    }
}

/// Runs `first`, `separator`, `second`; produces the two outer values.
pub fn separated_pair<R, A, S, B>(
    first: A,
    separator: S,
    second: B,
) -> impl Parser<R, Output = (A::Output, B::Output)>
where
    R: Reader,
    A: Parser<R>,
    S: Parser<R>,
    B: Parser<R>,
{
    move |reader: &mut R| {
        attempt(reader, |reader| {
            let a = first.parse(reader)?;
            separator.parse(reader)?;
            let b = second.parse(reader)?;
            Ok((a, b))
        })
    }
}

/// A fixed-arity sequence of parsers producing a tuple of their outputs.
/// Implemented for tuples of one through seven parsers.
pub trait Tuple<R> {
    /// The product of the component outputs.
    type Output;

    /// Runs every component in order as one atomic attempt.
    fn parse_tuple(&self, reader: &mut R) -> Result<Self::Output, ParseError>;
}

macro_rules! tuple_impl {
    ($($parser:ident $idx:tt),+) => {
        impl<R: Reader, $($parser: Parser<R>),+> Tuple<R> for ($($parser,)+) {
            type Output = ($($parser::Output,)+);

            fn parse_tuple(&self, reader: &mut R) -> Result<Self::Output, ParseError> {
                attempt(reader, |reader| Ok(($(self.$idx.parse(reader)?,)+)))
            }
        }
    };
}

tuple_impl!(A 0);
tuple_impl!(A 0, B 1);
tuple_impl!(A 0, B 1, C 2);
tuple_impl!(A 0, B 1, C 2, D 3);
tuple_impl!(A 0, B 1, C 2, D 3, E 4);
tuple_impl!(A 0, B 1, C 2, D 3, E 4, F 5);
tuple_impl!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);

/// Runs a tuple of parsers in order, producing the tuple of their values.
pub fn tuple<R, T>(parsers: T) -> impl Parser<R, Output = T::Output>
where
    R: Reader,
    T: Tuple<R>,
{
    move |reader: &mut R| parsers.parse_tuple(reader)
}

/// Runs `parser` for its cursor effect only and produces the raw byte span
/// it consumed.
///
/// The span is byte-granular: on an unaligned bit cursor the position query
/// surfaces `RemainingBits` instead of returning a misleading span.
pub fn recognize<R, P>(parser: P) -> impl Parser<R, Output = Vec<u8>>
where
    R: Reader,
    P: Parser<R>,
{
    move |reader: &mut R| {
        attempt(reader, |reader| {
            let start = reader.position()?;
            parser.parse(reader)?;
            let end = reader.position()?;

            reader.seek(SeekFrom::Start(start))?;
            let mut bytes = Vec::with_capacity((end - start) as usize);
            for _ in start..end {
                bytes.push(reader.read_byte()?);
            }
            Ok(bytes)
        })
    }
}

/// Parses zero or more `pair` occurrences separated by `separator`.
///
/// Unlike [`crate::multi::separated_list0`], a confirmed separator never
/// swallows input: when the pair after a consumed separator fails, the cursor
/// rolls back to before the separator, so trailing separators are left
/// unconsumed.
pub fn key_values0<R, P, S>(pair: P, separator: S) -> impl Parser<R, Output = Vec<P::Output>>
where
    R: Reader,
    P: Parser<R>,
    S: Parser<R>,
{
    move |reader: &mut R| {
        let mut items = Vec::new();
        match pair.parse(reader) {
            Ok(first) => items.push(first),
            Err(e) if e.is_recoverable() => return Ok(items),
            Err(e) => return Err(e),
        }
        key_values_tail(reader, &pair, &separator, &mut items)?;
        Ok(items)
    }
}

/// Like [`key_values0`] but requires at least one pair, propagating the
/// first failure otherwise.
pub fn key_values1<R, P, S>(pair: P, separator: S) -> impl Parser<R, Output = Vec<P::Output>>
where
    R: Reader,
    P: Parser<R>,
    S: Parser<R>,
{
    move |reader: &mut R| {
        let first = pair.parse(reader)?;
        let mut items = vec![first];
        key_values_tail(reader, &pair, &separator, &mut items)?;
        Ok(items)
    }
}

fn key_values_tail<R, P, S>(
    reader: &mut R,
    pair: &P,
    separator: &S,
    items: &mut Vec<P::Output>,
) -> Result<(), ParseError>
where
    R: Reader,
    P: Parser<R>,
    S: Parser<R>,
{
    loop {
        let before_separator = reader.mark()?;
        match separator.parse(reader) {
            Ok(_) => {}
            Err(e) if e.is_recoverable() => return Ok(()),
            Err(e) => return Err(e),
        }
        match pair.parse(reader) {
            Ok(item) => items.push(item),
            Err(e) if e.is_recoverable() => {
                reader.reset(before_separator)?;
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}
