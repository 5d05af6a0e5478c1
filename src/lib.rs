//! # parsecraft
//!
//! Composable parser combinators over seekable byte and bit cursors.
//!
//! Grammars are assembled from small reusable parsers instead of
//! hand-written recursive-descent code: a [`Parser`] consumes input through
//! a [`Reader`] cursor and either produces a value or fails. Recoverable
//! failures restore the cursor so ordered choice can try another branch;
//! [`modifier::cut`] commits a branch and turns later failures fatal. A
//! [`BitReader`] layers sub-byte reads on any byte cursor for bit-packed
//! formats.
//!
//! ## Example
//!
//! ```
//! use parsecraft::modifier::map;
//! use parsecraft::sequence::{pair, preceded, tuple};
//! use parsecraft::text::{char_, is_hex_digit, satisfy};
//! use parsecraft::{Parser, SliceReader};
//!
//! fn hex_digit(c: char) -> u8 {
//!     c.to_digit(16).unwrap() as u8
//! }
//!
//! let hex_byte = || {
//!     map(pair(satisfy(is_hex_digit), satisfy(is_hex_digit)), |(hi, lo)| {
//!         hex_digit(hi) << 4 | hex_digit(lo)
//!     })
//! };
//!
//! let color = preceded(char_('#'), tuple((hex_byte(), hex_byte(), hex_byte())));
//! let mut input = SliceReader::new(b"#2F14DF");
//! assert_eq!(color.parse(&mut input).unwrap(), (0x2F, 0x14, 0xDF));
//! ```

pub mod bit_reader;
pub mod bits;
pub mod branch;
pub mod byte;
pub mod cursor;
pub mod errors;
pub mod modifier;
pub mod multi;
pub mod parser;
pub mod sequence;
pub mod text;
pub mod trace;

pub use bit_reader::{BitRead, BitReader};
pub use cursor::{Reader, SliceReader};
pub use errors::ParseError;
pub use parser::{BoxedParser, Forward, Parser, attempt};
