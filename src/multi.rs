//! Repetition combinators.
//!
//! Repetition relies on each repeated sub-parser honoring the atomicity
//! invariant on its own failing attempt: a recoverable failure stops the
//! loop with the cursor exactly where the last success left it. A successful
//! inner parse that consumes nothing also stops the loop (and is not
//! recorded), so repetition always terminates.

use crate::cursor::Reader;
use crate::errors::ParseError;
use crate::parser::{Parser, attempt};

/// Repeats `parser` until it fails recoverably. Never fails itself: zero
/// matches produce an empty collection with nothing consumed.
pub fn many0<R, P>(parser: P) -> impl Parser<R, Output = Vec<P::Output>>
where
    R: Reader,
    P: Parser<R>,
{
    move |reader: &mut R| {
        let mut items = Vec::new();
        many_tail(reader, &parser, &mut items)?;
        Ok(items)
    }
}

/// Like [`many0`] but requires at least one match, propagating the first
/// failure otherwise.
pub fn many1<R, P>(parser: P) -> impl Parser<R, Output = Vec<P::Output>>
where
    R: Reader,
    P: Parser<R>,
{
    move |reader: &mut R| {
        let first = parser.parse(reader)?;
        let mut items = vec![first];
        many_tail(reader, &parser, &mut items)?;
        Ok(items)
    }
}

fn many_tail<R, P>(reader: &mut R, parser: &P, items: &mut Vec<P::Output>) -> Result<(), ParseError>
where
    R: Reader,
    P: Parser<R>,
{
    loop {
        let before = reader.mark()?;
        match parser.parse(reader) {
            Ok(item) => {
                if reader.mark()? == before {
                    return Ok(());
                }
                items.push(item);
            }
            Err(e) if e.is_recoverable() => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

/// Runs `parser` exactly `n` times as one atomic attempt.
pub fn count<R, P>(parser: P, n: usize) -> impl Parser<R, Output = Vec<P::Output>>
where
    R: Reader,
    P: Parser<R>,
{
    move |reader: &mut R| {
        attempt(reader, |reader| {
            let mut items = Vec::with_capacity(n);
            for _ in 0..n {
                items.push(parser.parse(reader)?);
            }
            Ok(items)
        })
    }
}

/// Parses `element (separator element)*`, zero or more elements.
///
/// A failing separator is never consumed. A consumed separator followed by a
/// failing element stays consumed; see [`crate::sequence::key_values0`] for
/// the variant that rolls it back.
pub fn separated_list0<R, P, S>(element: P, separator: S) -> impl Parser<R, Output = Vec<P::Output>>
where
    R: Reader,
    P: Parser<R>,
    S: Parser<R>,
{
    move |reader: &mut R| {
        let mut items = Vec::new();
        match element.parse(reader) {
            Ok(first) => items.push(first),
            Err(e) if e.is_recoverable() => return Ok(items),
            Err(e) => return Err(e),
        }
        separated_tail(reader, &element, &separator, &mut items)?;
        Ok(items)
    }
}

/// Like [`separated_list0`] but requires at least one element.
pub fn separated_list1<R, P, S>(element: P, separator: S) -> impl Parser<R, Output = Vec<P::Output>>
where
    R: Reader,
    P: Parser<R>,
    S: Parser<R>,
{
    move |reader: &mut R| {
        let first = element.parse(reader)?;
        let mut items = vec![first];
        separated_tail(reader, &element, &separator, &mut items)?;
        Ok(items)
    }
}

fn separated_tail<R, P, S>(
    reader: &mut R,
    element: &P,
    separator: &S,
    items: &mut Vec<P::Output>,
) -> Result<(), ParseError>
where
    R: Reader,
    P: Parser<R>,
    S: Parser<R>,
{
    loop {
        match separator.parse(reader) {
            Ok(_) => {}
            Err(e) if e.is_recoverable() => return Ok(()),
            Err(e) => return Err(e),
        }
        match element.parse(reader) {
            Ok(item) => items.push(item),
            // The separator stays consumed when no element follows.
            Err(e) if e.is_recoverable() => return Ok(()),
            Err(e) => return Err(e),
        }
    }
}

/// Streaming-accumulator variant of [`many0`]: folds every match into an
/// accumulator without materializing an intermediate collection.
pub fn fold_many0<R, P, Acc, F>(parser: P, init: Acc, fold: F) -> impl Parser<R, Output = Acc>
where
    R: Reader,
    P: Parser<R>,
    Acc: Clone,
    F: Fn(Acc, P::Output) -> Acc,
{
    move |reader: &mut R| {
        let mut acc = init.clone();
        loop {
            let before = reader.mark()?;
            match parser.parse(reader) {
                Ok(item) => {
                    if reader.mark()? == before {
                        return Ok(acc);
                    }
                    acc = fold(acc, item);
                }
                Err(e) if e.is_recoverable() => return Ok(acc),
                Err(e) => return Err(e),
            }
        }
    }
}

/// Bounded repetition with a post-parse filter: collects up to `max`
/// elements parsed by `parser` while `predicate` accepts them, un-consuming
/// the first rejected element. Fails, fully restoring, when fewer than `min`
/// elements are accepted.
pub fn take_while_m_n<R, P, F>(
    min: usize,
    max: usize,
    parser: P,
    predicate: F,
) -> impl Parser<R, Output = Vec<P::Output>>
where
    R: Reader,
    P: Parser<R>,
    F: Fn(&P::Output) -> bool,
{
    move |reader: &mut R| {
        attempt(reader, |reader| {
            let mut items = Vec::new();
            while items.len() < max {
                let before = reader.mark()?;
                match parser.parse(reader) {
                    Ok(item) if predicate(&item) => {
                        if reader.mark()? == before {
                            break;
                        }
                        items.push(item);
                    }
                    Ok(_) => {
                        reader.reset(before)?;
                        break;
                    }
                    Err(e) if e.is_recoverable() => break,
                    Err(e) => return Err(e),
                }
            }
            if items.len() < min {
                return Err(ParseError::NotMatched);
            }
            Ok(items)
        })
    }
}
