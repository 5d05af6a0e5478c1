//! The generic parser contract and the backtracking protocol.
//!
//! A [`Parser`] is a pure function of cursor state: it either produces a
//! value with the cursor advanced past what it consumed, or an error. When
//! the error is recoverable the cursor must be back at its pre-attempt
//! position; [`attempt`] centralizes that protocol. Any
//! `Fn(&mut R) -> Result<T, ParseError>` is a parser, so leaf parsers are
//! usually plain functions or closures.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cursor::Reader;
use crate::errors::ParseError;

/// The unit of composition: consumes input from a cursor of type `R` and
/// produces an [`Output`](Parser::Output) or a [`ParseError`].
pub trait Parser<R> {
    /// The value produced on success.
    type Output;

    /// Runs this parser against the cursor.
    fn parse(&self, reader: &mut R) -> Result<Self::Output, ParseError>;
}

impl<R, T, F> Parser<R> for F
where
    F: Fn(&mut R) -> Result<T, ParseError>,
{
    type Output = T;

    fn parse(&self, reader: &mut R) -> Result<T, ParseError> {
        self(reader)
    }
}

/// Runs `f`, restoring the cursor to its entry position when `f` fails
/// recoverably. Non-recoverable errors pass through with the cursor wherever
/// the failure left it.
///
/// Every combinator that may partially consume before failing goes through
/// this helper, which is what makes backtracking atomic.
pub fn attempt<R, T>(
    reader: &mut R,
    f: impl FnOnce(&mut R) -> Result<T, ParseError>,
) -> Result<T, ParseError>
where
    R: Reader,
{
    let start = reader.mark()?;
    match f(reader) {
        Err(e) if e.is_recoverable() => {
            reader.reset(start)?;
            Err(e)
        }
        other => other,
    }
}

/// A clonable, heap-allocated parser handle for storage and sharing.
pub struct BoxedParser<'p, R, T> {
    inner: Rc<dyn Parser<R, Output = T> + 'p>,
}

impl<'p, R, T> BoxedParser<'p, R, T> {
    /// Erases the concrete type of `parser`.
    pub fn new(parser: impl Parser<R, Output = T> + 'p) -> Self {
        Self {
            inner: Rc::new(parser),
        }
    }
}

impl<R, T> Clone for BoxedParser<'_, R, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<R, T> Parser<R> for BoxedParser<'_, R, T> {
    type Output = T;

    fn parse(&self, reader: &mut R) -> Result<T, ParseError> {
        self.inner.parse(reader)
    }
}

/// A late-bound parser slot for recursive grammars.
///
/// A combinator value captures its children at construction time, before a
/// recursive definition exists. `Forward` breaks the cycle: clone the handle
/// into the grammar wherever the recursive rule is referenced, then call
/// [`define`](Forward::define) once the full rule is built. Running an
/// undefined slot fails with `Unbound`.
pub struct Forward<'p, R, T> {
    slot: Rc<RefCell<Option<BoxedParser<'p, R, T>>>>,
}

impl<'p, R, T> Forward<'p, R, T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Fills the slot. All clones of this handle see the definition.
    pub fn define(&self, parser: impl Parser<R, Output = T> + 'p) {
        *self.slot.borrow_mut() = Some(BoxedParser::new(parser));
    }
}

impl<R, T> Default for Forward<'_, R, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, T> Clone for Forward<'_, R, T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<R, T> Parser<R> for Forward<'_, R, T> {
    type Output = T;

    fn parse(&self, reader: &mut R) -> Result<T, ParseError> {
        let defined = self.slot.borrow().clone();
        match defined {
            Some(parser) => parser.parse(reader),
            None => Err(ParseError::Unbound),
        }
    }
}
