use crate::error::{Error, Result, SeriesError};
use crate::{ASCII_ESCAPE, ESCAPE_PREFIX, ROW_WIDTH};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One table entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A printable character.
    Literal(char),
    /// Continue in row `n`.
    EscapeRef(usize),
    /// The next two codes are the high and low nibbles of a raw byte.
    AsciiEscape,
}

/// A row of the table. The index of a symbol is its code.
pub type Row = [Symbol; ROW_WIDTH];

/// A validated lookup table.
///
/// The only way to obtain one is through validation, so every `Series`
/// upholds the table invariants for its whole lifetime.
#[derive(Clone, Debug)]
pub struct Series {
    rows: Vec<Row>,
    index: HashMap<Symbol, (usize, u8)>,
}

/// Check whether `rows` would make a usable series.
pub fn validate(rows: &[Vec<Symbol>]) -> Result<()> {
    build_index(rows).map(|_| ())
}

/// Printable as far as a series literal is concerned: ASCII graphic
/// characters plus the ASCII whitespace set.
pub fn is_printable(c: char) -> bool {
    c.is_ascii_graphic() || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn build_index(rows: &[Vec<Symbol>]) -> Result<HashMap<Symbol, (usize, u8)>> {
    if rows.is_empty() {
        return Err(SeriesError::Empty.into());
    }
    let mut seen = HashMap::with_capacity(rows.len() * ROW_WIDTH);
    for (row, symbols) in rows.iter().enumerate() {
        if symbols.len() != ROW_WIDTH {
            return Err(SeriesError::RowLength {
                row,
                len: symbols.len(),
            }
            .into());
        }
        for (position, &symbol) in symbols.iter().enumerate() {
            match symbol {
                Symbol::Literal(character) if !is_printable(character) => {
                    return Err(SeriesError::NonPrintable {
                        character,
                        row,
                        position,
                    }
                    .into());
                }
                Symbol::EscapeRef(target) if target >= rows.len() => {
                    return Err(SeriesError::EscapeOutOfRange {
                        target,
                        rows: rows.len(),
                        row,
                        position,
                    }
                    .into());
                }
                _ => {}
            }
            if seen.insert(symbol, (row, position as u8)).is_some() {
                return Err(SeriesError::Duplicate {
                    symbol,
                    row,
                    position,
                }
                .into());
            }
        }
    }
    if !seen.contains_key(&Symbol::AsciiEscape) {
        return Err(SeriesError::MissingAsciiEscape.into());
    }
    debug!("validated series of {} rows", rows.len());
    Ok(seen)
}

impl Series {
    /// Validate `rows` and build a series from them.
    pub fn new(rows: Vec<Vec<Symbol>>) -> Result<Self> {
        let index = build_index(&rows)?;
        let rows = rows
            .into_iter()
            .map(|row| Row::try_from(row).expect("row length checked during validation"))
            .collect();
        Ok(Series { rows, index })
    }

    /// Parse every cell with the textual symbol convention, then validate.
    pub fn from_text_rows<R, S>(rows: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (row, cells) in rows.into_iter().enumerate() {
            let mut symbols = Vec::with_capacity(ROW_WIDTH);
            for (position, cell) in cells.into_iter().enumerate() {
                let text = cell.as_ref();
                let symbol: Symbol = text.parse().map_err(|_| SeriesError::Malformed {
                    text: text.to_owned(),
                    row,
                    position,
                })?;
                symbols.push(symbol);
            }
            parsed.push(symbols);
        }
        Self::new(parsed)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false, a series has at least one row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The symbol `code` selects in `row`, if both are in range.
    #[inline(always)]
    pub fn get(&self, row: usize, code: u8) -> Option<Symbol> {
        self.rows
            .get(row)
            .and_then(|row| row.get(code as usize))
            .copied()
    }

    /// Row and position of `symbol`.
    #[inline(always)]
    pub fn locate(&self, symbol: Symbol) -> Option<(usize, u8)> {
        self.index.get(&symbol).copied()
    }
}

impl TryFrom<Vec<Vec<Symbol>>> for Series {
    type Error = Error;

    fn try_from(rows: Vec<Vec<Symbol>>) -> Result<Self> {
        Series::new(rows)
    }
}

impl Serialize for Series {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.rows.serialize(serializer)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Literal(c) => write!(f, "{c}"),
            Symbol::EscapeRef(row) => write!(f, "{ESCAPE_PREFIX}{row}"),
            Symbol::AsciiEscape => f.write_str(ASCII_ESCAPE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSymbolError;

impl fmt::Display for ParseSymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a single character, escape reference or ascii escape")
    }
}

impl std::error::Error for ParseSymbolError {}

impl FromStr for Symbol {
    type Err = ParseSymbolError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == ASCII_ESCAPE {
            return Ok(Symbol::AsciiEscape);
        }
        if let Some(row) = s.strip_prefix(ESCAPE_PREFIX) {
            if !row.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseSymbolError);
            }
            return row.parse().map(Symbol::EscapeRef).map_err(|_| ParseSymbolError);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Symbol::Literal(c)),
            _ => Err(ParseSymbolError),
        }
    }
}
