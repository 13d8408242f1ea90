use crate::error::{Error, Result};
use crate::nibble::{pack_codes, unpack};
use crate::series::{Series, Symbol};

/// Accumulates the code chains of a text and packs them into bytes.
pub struct Encoder<'s> {
    series: &'s Series,
    codes: Vec<u8>,
}

impl<'s> Encoder<'s> {
    pub fn new(series: &'s Series) -> Self {
        Encoder {
            series,
            codes: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn update(&mut self, c: char) -> Result<()> {
        let before = self.codes.len();
        push_symbol(self.series, c, &mut self.codes)?;
        trace!("encode {c:?} as {:?}", &self.codes[before..]);
        Ok(())
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    /// Pack the accumulated codes, padding an odd count with the null nibble.
    pub fn finalize(self) -> Result<Vec<u8>> {
        let filler = if self.codes.len() % 2 == 1 {
            self.series.null_nibble()?
        } else {
            0
        };
        let packed = pack_codes(&self.codes, filler);
        trace!("packed {} codes into {}", self.codes.len(), hex::encode(&packed));
        Ok(packed)
    }
}

impl Series {
    /// The code that pads an odd-length code sequence.
    ///
    /// It is the first code on the way to the ascii escape, so a decoder
    /// that meets it after the last character is left in an unfinished
    /// escape and emits nothing more.
    pub fn null_nibble(&self) -> Result<u8> {
        let chain = ascii_chain(self)?;
        Ok(chain[0])
    }
}

/// Codes that select the symbol at `row`, `position`, starting from row 0.
///
/// Rows other than row 0 are entered through the escape reference to them,
/// which may itself live outside row 0. Escape references are not checked
/// for cycles, so the walk gives up after visiting as many rows as the
/// series has.
fn escape_chain(series: &Series, mut row: usize, position: u8) -> Result<Vec<u8>> {
    let limit = series.len();
    let mut chain = vec![position];
    for _ in 0..limit {
        if row == 0 {
            chain.reverse();
            return Ok(chain);
        }
        let (parent, position) = series
            .locate(Symbol::EscapeRef(row))
            .ok_or(Error::UnreachableRow { row })?;
        trace!("row {row} entered from row {parent} at {position}");
        chain.push(position);
        row = parent;
    }
    Err(Error::RecursionLimitExceeded { row, limit })
}

fn ascii_chain(series: &Series) -> Result<Vec<u8>> {
    let (row, position) = series
        .locate(Symbol::AsciiEscape)
        .expect("validated series has an ascii escape");
    escape_chain(series, row, position)
}

/// Code chain of one character.
///
/// Characters missing from the series fall back to the ascii escape
/// followed by the high and low nibbles of their byte value.
pub fn encode_symbol(series: &Series, c: char) -> Result<Vec<u8>> {
    let mut codes = Vec::new();
    push_symbol(series, c, &mut codes)?;
    Ok(codes)
}

fn push_symbol(series: &Series, c: char, codes: &mut Vec<u8>) -> Result<()> {
    if let Some((row, position)) = series.locate(Symbol::Literal(c)) {
        codes.extend(escape_chain(series, row, position)?);
        return Ok(());
    }
    let byte = u8::try_from(u32::from(c)).map_err(|_| Error::Unrepresentable(c))?;
    let (high, low) = unpack(byte);
    codes.extend(ascii_chain(series)?);
    codes.extend([high, low]);
    Ok(())
}

/// Unpacked code sequence of `text`.
pub fn encode_codes(series: &Series, text: &str) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(series);
    for c in text.chars() {
        encoder.update(c)?;
    }
    Ok(encoder.codes)
}

/// Encode `text` into a packed byte stream.
pub fn encode_string(series: &Series, text: &str) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(series);
    for c in text.chars() {
        encoder.update(c)?;
    }
    encoder.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nibble::pack;
    use crate::series::Symbol::{AsciiEscape, EscapeRef, Literal};
    use crate::tests::{sample_rows, sample_series, setup, TEST_VECTOR};

    #[test]
    fn test_encode_vectors() {
        setup();
        let series = sample_series();
        for (text, expected) in TEST_VECTOR.into_iter() {
            let expected = hex::decode(expected).unwrap();
            assert_eq!(encode_string(&series, text).unwrap(), expected, "{text:?}");
        }
    }

    #[test]
    fn test_encode_symbol_chains() {
        setup();
        let series = sample_series();
        assert_eq!(encode_symbol(&series, 'a').unwrap(), vec![0]);
        assert_eq!(encode_symbol(&series, 'o').unwrap(), vec![15, 0]);
        assert_eq!(encode_symbol(&series, '?').unwrap(), vec![15, 15]);
        assert_eq!(encode_symbol(&series, '5').unwrap(), vec![14, 3, 5]);
        assert_eq!(encode_codes(&series, "ao").unwrap(), vec![0, 15, 0]);
    }

    #[test]
    fn test_ascii_fallback_covers_every_byte() {
        setup();
        let series = sample_series();
        for byte in 0..=u8::MAX {
            let c = char::from(byte);
            if series.locate(Literal(c)).is_some() {
                continue;
            }
            let codes = encode_symbol(&series, c).unwrap();
            assert_eq!(codes.len(), 3);
            assert_eq!(codes[0], 14);
            assert_eq!(pack(codes[1], codes[2]), byte);
        }
    }

    #[test]
    fn test_byte_length_is_half_the_codes() {
        setup();
        let series = sample_series();
        for text in ["", "a", "ao", "5", "hello world!", "\u{e9}t\u{e9}"] {
            let codes = encode_codes(&series, text).unwrap();
            let packed = encode_string(&series, text).unwrap();
            assert_eq!(packed.len(), codes.len().div_ceil(2));
        }
    }

    #[test]
    fn test_deep_rows_chain_through_escapes() {
        setup();
        let mut rows = sample_rows();
        let mut deep: Vec<Symbol> = ('A'..='P').map(Literal).collect();
        deep[0] = EscapeRef(0);
        rows[1][15] = EscapeRef(2);
        rows.push(deep);
        let series = Series::new(rows).unwrap();
        // row 0 -> row 1 at 15, row 1 -> row 2 at 15, 'B' at 1
        assert_eq!(encode_symbol(&series, 'B').unwrap(), vec![15, 15, 1]);
    }

    #[test]
    fn test_cyclic_escapes_hit_the_depth_limit() {
        setup();
        let mut rows = sample_rows();
        let mut third: Vec<Symbol> = ('A'..='P').map(Literal).collect();
        third[15] = EscapeRef(1);
        rows[0][15] = Literal('?');
        rows[1][15] = EscapeRef(2);
        rows.push(third);
        let series = Series::new(rows).unwrap();

        assert!(matches!(
            encode_symbol(&series, 'o'),
            Err(Error::RecursionLimitExceeded { limit: 3, .. })
        ));
        assert_eq!(encode_symbol(&series, 'a').unwrap(), vec![0]);
    }

    #[test]
    fn test_unreachable_row() {
        setup();
        let mut rows = sample_rows();
        rows[0][15] = Literal('?');
        rows[1][15] = Literal('A');
        let series = Series::new(rows).unwrap();
        assert!(matches!(
            encode_symbol(&series, 'o'),
            Err(Error::UnreachableRow { row: 1 })
        ));
    }

    #[test]
    fn test_wide_characters_are_unrepresentable() {
        setup();
        let series = sample_series();
        assert!(matches!(
            encode_string(&series, "a\u{263a}"),
            Err(Error::Unrepresentable('\u{263a}'))
        ));
    }

    #[test]
    fn test_null_nibble_follows_ascii_escape() {
        setup();
        assert_eq!(sample_series().null_nibble().unwrap(), 14);

        let mut rows = sample_rows();
        rows[0][14] = Literal('A');
        rows[1][3] = AsciiEscape;
        let series = Series::new(rows).unwrap();
        assert_eq!(series.null_nibble().unwrap(), 15);
        assert_eq!(encode_symbol(&series, '5').unwrap(), vec![15, 3, 3, 5]);
    }
}
