//! Cross-cutting diagnostic decorator.
//!
//! [`Traced`] wraps any parser without being part of the core contract: it
//! emits `tracing` events per call and accumulates call counts, consumed
//! cursor units, and wall-clock time. Counters live in `Cell`s, so a traced
//! value stays usable through shared references but is not `Sync`.

use std::cell::Cell;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::cursor::Reader;
use crate::errors::ParseError;
use crate::parser::Parser;

/// Snapshot of a [`Traced`] parser's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceStats {
    /// Total number of parse calls.
    pub calls: u64,
    /// Calls that produced a value.
    pub successes: u64,
    /// Cursor units consumed by successful calls: bytes for a byte cursor,
    /// bits for a bit cursor.
    pub consumed: u64,
    /// Wall-clock time spent inside the wrapped parser.
    pub elapsed: Duration,
}

/// A parser wrapper recording per-call diagnostics. Built by [`traced`].
pub struct Traced<P> {
    name: &'static str,
    inner: P,
    calls: Cell<u64>,
    successes: Cell<u64>,
    consumed: Cell<u64>,
    elapsed: Cell<Duration>,
}

/// Wraps `parser` with the diagnostic decorator under `name`.
pub fn traced<P>(name: &'static str, parser: P) -> Traced<P> {
    Traced {
        name,
        inner: parser,
        calls: Cell::new(0),
        successes: Cell::new(0),
        consumed: Cell::new(0),
        elapsed: Cell::new(Duration::ZERO),
    }
}

impl<P> Traced<P> {
    /// Current counter values.
    pub fn stats(&self) -> TraceStats {
        TraceStats {
            calls: self.calls.get(),
            successes: self.successes.get(),
            consumed: self.consumed.get(),
            elapsed: self.elapsed.get(),
        }
    }
}

impl<R, P> Parser<R> for Traced<P>
where
    R: Reader,
    P: Parser<R>,
{
    type Output = P::Output;

    fn parse(&self, reader: &mut R) -> Result<P::Output, ParseError> {
        let start = reader.mark()?;
        let began = Instant::now();
        let result = self.inner.parse(reader);
        let took = began.elapsed();
        let end = reader.mark()?;

        self.calls.set(self.calls.get() + 1);
        self.elapsed.set(self.elapsed.get() + took);
        match &result {
            Ok(_) => {
                let consumed = end.saturating_sub(start);
                self.successes.set(self.successes.get() + 1);
                self.consumed.set(self.consumed.get() + consumed);
                trace!(parser = self.name, consumed, "parse succeeded");
            }
            Err(e) => {
                trace!(parser = self.name, error = %e, "parse failed");
            }
        }
        result
    }
}
