//! Modifiers wrapping a single parser.

use crate::cursor::Reader;
use crate::errors::ParseError;
use crate::parser::Parser;

/// Transforms the produced value.
pub fn map<R, P, F, T>(parser: P, f: F) -> impl Parser<R, Output = T>
where
    R: Reader,
    P: Parser<R>,
    F: Fn(P::Output) -> T,
{
    move |reader: &mut R| parser.parse(reader).map(|value| f(value))
}

/// Transforms the produced value through a fallible function.
///
/// When `f` rejects, the cursor rolls back to before `parser` ran, so a
/// syntactically valid but semantically invalid parse behaves as "this
/// grammar didn't match". Fatal errors skip the rollback.
pub fn try_map<R, P, F, T>(parser: P, f: F) -> impl Parser<R, Output = T>
where
    R: Reader,
    P: Parser<R>,
    F: Fn(P::Output) -> Result<T, ParseError>,
{
    move |reader: &mut R| {
        let start = reader.mark()?;
        let value = parser.parse(reader)?;
        match f(value) {
            Ok(mapped) => Ok(mapped),
            Err(e) => {
                if !e.is_fatal() {
                    reader.reset(start)?;
                }
                Err(e)
            }
        }
    }
}

/// Rejects an otherwise successful parse when `predicate` refuses the value,
/// rolling back to before `parser` ran.
pub fn verify<R, P, F>(parser: P, predicate: F) -> impl Parser<R, Output = P::Output>
where
    R: Reader,
    P: Parser<R>,
    F: Fn(&P::Output) -> bool,
{
    move |reader: &mut R| {
        let start = reader.mark()?;
        let value = parser.parse(reader)?;
        if predicate(&value) {
            Ok(value)
        } else {
            reader.reset(start)?;
            Err(ParseError::NotMatched)
        }
    }
}

/// Keeps `parser`'s consumption, discards its value, substitutes a constant.
pub fn value<R, P, T>(parser: P, constant: T) -> impl Parser<R, Output = T>
where
    R: Reader,
    P: Parser<R>,
    T: Clone,
{
    move |reader: &mut R| {
        parser.parse(reader)?;
        Ok(constant.clone())
    }
}

/// Promotes any failure of `parser` to fatal, committing the current grammar
/// branch: choice and repetition combinators stop backtracking past it.
pub fn cut<R, P>(parser: P) -> impl Parser<R, Output = P::Output>
where
    R: Reader,
    P: Parser<R>,
{
    move |reader: &mut R| {
        parser
            .parse(reader)
            .map_err(|e| if e.is_fatal() { e } else { ParseError::fatal(e) })
    }
}

/// Passes success and failure through, replacing a produced collection with
/// its length.
pub fn length<R, P, T>(parser: P) -> impl Parser<R, Output = usize>
where
    R: Reader,
    P: Parser<R, Output = Vec<T>>,
{
    move |reader: &mut R| Ok(parser.parse(reader)?.len())
}

/// Labels any failure of `parser` for error reporting. Recoverability and
/// fatality are preserved through the label.
pub fn context<R, P>(label: &'static str, parser: P) -> impl Parser<R, Output = P::Output>
where
    R: Reader,
    P: Parser<R>,
{
    move |reader: &mut R| parser.parse(reader).map_err(|e| e.label(label))
}
