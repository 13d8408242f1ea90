use crate::error::{InflateError, Result};
use crate::nibble::{pack, unpack, MAX_CODE};
use crate::series::{Series, Symbol};
use std::fmt;

/// Turns codes back into text, one code at a time.
pub struct Decoder<'s> {
    series: &'s Series,
    status: DecodeStatus,
    consumed: usize,
    out: String,
}

#[derive(Copy, Clone)]
enum DecodeStatus {
    /// Look codes up in `row`.
    Table { row: usize },
    /// Collecting the nibbles of a raw byte.
    Raw { high: Option<u8> },
}

impl<'s> Decoder<'s> {
    pub fn new(series: &'s Series) -> Self {
        Decoder {
            series,
            status: DecodeStatus::Table { row: 0 },
            consumed: 0,
            out: String::new(),
        }
    }

    #[inline(always)]
    pub fn update(&mut self, code: u8) -> Result<()> {
        trace!("update code {code}, current status {:?}", self.status);
        let offset = self.consumed;
        self.consumed += 1;
        match self.status {
            DecodeStatus::Table { row } => {
                let symbol = self.series.get(row, code).ok_or(InflateError {
                    byte: offset / 2,
                    row,
                    code,
                })?;
                match symbol {
                    Symbol::EscapeRef(next) => {
                        self.status = DecodeStatus::Table { row: next };
                    }
                    Symbol::AsciiEscape => {
                        self.status = DecodeStatus::Raw { high: None };
                    }
                    Symbol::Literal(c) => {
                        trace!("decode: {c:?}");
                        self.out.push(c);
                        self.status = DecodeStatus::Table { row: 0 };
                    }
                }
            }
            DecodeStatus::Raw { high } => {
                if code > MAX_CODE {
                    return Err(InflateError {
                        byte: offset / 2,
                        row: 0,
                        code,
                    }
                    .into());
                }
                match high {
                    None => self.status = DecodeStatus::Raw { high: Some(code) },
                    Some(high) => {
                        let byte = pack(high, code);
                        trace!("decode raw: 0x{byte:02X}");
                        self.out.push(char::from(byte));
                        self.status = DecodeStatus::Table { row: 0 };
                    }
                }
            }
        }
        trace!("transit to {:?}", self.status);
        Ok(())
    }

    /// Finish decoding. An escape left open by the filler nibble is dropped.
    pub fn finalize(self) -> String {
        match self.status {
            DecodeStatus::Table { row: 0 } => {}
            status => debug!("discarding unfinished {status:?} at end of stream"),
        }
        self.out
    }
}

impl fmt::Debug for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStatus::Table { row } => f.debug_struct("Table").field("row", row).finish(),
            DecodeStatus::Raw { high } => f
                .debug_struct("Raw")
                .field("high", &high.map(|h| format!("{h:04b}")))
                .finish(),
        }
    }
}

/// Decode an unpacked code sequence.
pub fn decode_codes(series: &Series, codes: &[u8]) -> Result<String> {
    let mut decoder = Decoder::new(series);
    for &code in codes {
        decoder.update(code)?;
    }
    Ok(decoder.finalize())
}

/// Decode a packed byte stream.
pub fn decode(series: &Series, packed: &[u8]) -> Result<String> {
    let mut decoder = Decoder::new(series);
    for &byte in packed {
        let (high, low) = unpack(byte);
        decoder.update(high)?;
        decoder.update(low)?;
    }
    let text = decoder.finalize();
    trace!("inflated {} into {text:?}", hex::encode(packed));
    Ok(text)
}
