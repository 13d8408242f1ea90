//! # Nybble Encoding Scheme
//!
//! A series is a table of rows, each holding exactly 16 symbols, so a
//! position within a row is a 4-bit code.
//!
//! ```text
//!          code 0   1   2       13     14        15
//!               │   │   │        │      │         │
//!               ▼   ▼   ▼        ▼      ▼         ▼
//!   row 0      'a' 'b' 'c' ...  'n'  ^^ascii    ^^>1 ─┐
//!   row 1      'o' 'p' 'q' ...  '.'   '!'       '?'  ◄┘
//! ```
//!
//! Decoding starts in row 0. A literal is emitted and decoding returns to
//! row 0, an escape reference `^^>n` moves to row `n`, and `^^ascii` takes
//! the next two codes as the high and low nibbles of a raw byte.
//!
//! So with the table above `"ao"` is coded `0, 15 0` and `'5'` (absent from
//! the table) is coded `14, 3 5`.
//!
//! Codes are packed two per byte, first code in the high nibble. An odd
//! code count is padded with the null nibble: the first code on the way
//! to `^^ascii`. The decoder ends inside an unfinished escape and drops it.
//!
//! The encoding does not include a length, nor any table identifier. Both
//! sides MUST agree on the series.

#[macro_use]
extern crate log;

mod decode;
mod encode;
mod error;
pub mod load;
mod nibble;
pub mod presets;
mod series;

pub use decode::{decode, decode_codes, Decoder};
pub use encode::{encode_codes, encode_string, encode_symbol, Encoder};
pub use error::{Error, InflateError, LoadError, Result, SeriesError};
pub use nibble::{pack, pack_codes, unpack, unpack_codes};
pub use series::{is_printable, validate, ParseSymbolError, Row, Series, Symbol};

use std::io;

/// symbols per row, one per 4-bit code
const ROW_WIDTH: usize = 16;
const ESCAPE_PREFIX: &str = "^^>";
const ASCII_ESCAPE: &str = "^^ascii";

/// Compress `text` with `series`.
pub fn compress(series: &Series, text: &str) -> Result<Vec<u8>> {
    encode_string(series, text)
}

/// Inflate a stream produced by [`compress`] with the same series.
pub fn decompress(series: &Series, packed: &[u8]) -> Result<String> {
    decode(series, packed)
}

/// Read all of `reader` as UTF-8 text and compress it.
pub fn compress_reader<R: io::Read>(series: &Series, mut reader: R) -> Result<Vec<u8>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    compress(series, &text)
}

/// Read all of `reader` and inflate it.
pub fn decompress_reader<R: io::Read>(series: &Series, mut reader: R) -> Result<String> {
    let mut packed = Vec::new();
    reader.read_to_end(&mut packed)?;
    decompress(series, &packed)
}
