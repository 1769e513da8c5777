//! Prefix unquoting: escape units back to binary bytes

use std::io::{BufWriter, ErrorKind, Read, Write};

use crate::config::Config;
use crate::consts::{CHUNK_SIZE, HIGH_BIT, MAX_UNIT_LEN, ctl};
use crate::encode::escape;
use crate::error::{QuoteError, Result};

/// Outcome of looking at the start of some quoted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deframed {
    /// One complete unit decoded
    Byte { value: u8, consumed: usize },
    /// Input ends before the unit does
    Incomplete,
}

/// Number of characters in the unit starting at `input`
///
/// Only the first character decides, except after a prefix, where the
/// second one tells a two-character `&A` from a three-character `&#A`.
/// Returns `None` when `input` is too short to decide.
#[inline]
pub fn frame_len(input: &[u8], config: &Config) -> Option<usize> {
    let &first = input.first()?;
    if first == config.control() {
        Some(2)
    } else if first == config.prefix() {
        let &second = input.get(1)?;
        Some(if second == config.control() { 3 } else { 2 })
    } else {
        Some(1)
    }
}

/// Unquote the character following a control character
#[inline]
fn unquote(byte: u8, config: &Config) -> u8 {
    if config.is_marker(byte) {
        byte
    } else {
        ctl(byte)
    }
}

/// Decode exactly one escape unit
///
/// Returns `None` if `unit` is not a single complete unit under `config`.
///
/// # Example
/// ```
/// use kquote::{Config, unescape};
///
/// let config = Config::default();
/// assert_eq!(unescape(b"#A", &config), Some(0x01));
/// assert_eq!(unescape(b"&##", &config), Some(0xA3));
/// assert_eq!(unescape(b"&#", &config), None);
/// ```
pub fn unescape(unit: &[u8], config: &Config) -> Option<u8> {
    if frame_len(unit, config)? != unit.len() {
        return None;
    }

    let value = match *unit {
        [c, x] if c == config.control() => unquote(x, config),
        [_, _, x] => unquote(x, config) | HIGH_BIT,
        [_, x] => x | HIGH_BIT,
        [x] => x,
        _ => return None,
    };
    Some(value)
}

/// Decode the unit at the start of `input`
pub fn deframe(input: &[u8], config: &Config) -> Deframed {
    match frame_len(input, config) {
        Some(len) if len <= input.len() => match unescape(&input[..len], config) {
            Some(value) => Deframed::Byte {
                value,
                consumed: len,
            },
            None => Deframed::Incomplete,
        },
        _ => Deframed::Incomplete,
    }
}

/// Totals reported by [`Decoder::decode`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Quoted characters read
    pub chars_in: u64,
    /// Raw bytes written
    pub bytes_out: u64,
}

/// Decoder with configurable options
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: Config,
    strict: bool,
}

impl Decoder {
    /// Create a new decoder with default settings
    ///
    /// Default settings:
    /// - Markers `&`, `#`, `~`
    /// - Lenient mode (any character sequence is given a meaning)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder for an already validated configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            strict: false,
        }
    }

    /// Enable strict validation of escape units
    ///
    /// When enabled, each unit must be exactly what the encoder produces
    /// for the decoded byte under the same configuration, including the
    /// newline translation setting. Anything else is an error.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decode the unit at `input[pos..]`, `None` if it is incomplete
    fn step(&self, input: &[u8], pos: usize, base: u64) -> Result<Option<(u8, usize)>> {
        let Deframed::Byte { value, consumed } = deframe(&input[pos..], &self.config) else {
            return Ok(None);
        };

        if self.strict {
            let unit = &input[pos..pos + consumed];
            if escape(value, &self.config).as_bytes() != unit {
                return Err(QuoteError::InvalidEscape {
                    offset: base + pos as u64,
                    sequence: unit.to_vec(),
                });
            }
        }

        Ok(Some((value, consumed)))
    }

    /// Decode quoted text from a reader and write raw bytes to a writer
    ///
    /// Input is processed in chunks; a unit split across two reads is
    /// carried over. Bytes decoded before an error are still written and
    /// flushed.
    ///
    /// # Errors
    /// * [`QuoteError::TruncatedEscape`] if the input ends inside a unit
    /// * [`QuoteError::InvalidEscape`] for non-canonical units in strict mode
    ///
    /// # Example
    /// ```
    /// use kquote::Decoder;
    ///
    /// let mut output = Vec::new();
    /// let stats = Decoder::new()
    ///     .strict()
    ///     .decode(&b"Hi\r\n&A"[..], &mut output)
    ///     .unwrap();
    ///
    /// assert_eq!(output, b"Hi\r\n\xC1");
    /// assert_eq!(stats.bytes_out, 5);
    /// ```
    pub fn decode<R: Read, W: Write>(&self, mut reader: R, writer: W) -> Result<DecodeStats> {
        let mut writer = BufWriter::new(writer);
        let mut buf = vec![0u8; CHUNK_SIZE + MAX_UNIT_LEN];
        let mut out = Vec::with_capacity(CHUNK_SIZE);
        let mut carry = 0;
        let mut offset = 0u64;
        let mut stats = DecodeStats::default();

        loop {
            let read = match reader.read(&mut buf[carry..]) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };

            if read == 0 {
                writer.flush()?;
                if carry > 0 {
                    return Err(QuoteError::TruncatedEscape {
                        offset,
                        sequence: buf[..carry].to_vec(),
                    });
                }
                break;
            }

            let filled = carry + read;
            stats.chars_in += read as u64;

            let mut pos = 0;
            while pos < filled {
                match self.step(&buf[..filled], pos, offset) {
                    Ok(Some((value, consumed))) => {
                        out.push(value);
                        pos += consumed;
                    }
                    Ok(None) => break,
                    Err(err) => {
                        writer.write_all(&out)?;
                        writer.flush()?;
                        return Err(err);
                    }
                }
            }

            writer.write_all(&out)?;
            stats.bytes_out += out.len() as u64;
            out.clear();

            buf.copy_within(pos..filled, 0);
            carry = filled - pos;
            offset += pos as u64;
        }

        tracing::debug!(
            chars_in = stats.chars_in,
            bytes_out = stats.bytes_out,
            strict = self.strict,
            "decode finished"
        );
        Ok(stats)
    }

    /// Decode an in-memory buffer
    pub fn decode_to_vec(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(data.len());
        let mut pos = 0;
        while pos < data.len() {
            match self.step(data, pos, 0)? {
                Some((value, consumed)) => {
                    out.push(value);
                    pos += consumed;
                }
                None => {
                    return Err(QuoteError::TruncatedEscape {
                        offset: pos as u64,
                        sequence: data[pos..].to_vec(),
                    });
                }
            }
        }
        Ok(out)
    }
}

/// Decode quoted text with default settings (default markers, lenient mode)
///
/// This is a convenience function equivalent to `Decoder::new().decode(reader, writer)`
pub fn decode<R: Read, W: Write>(reader: R, writer: W) -> Result<DecodeStats> {
    Decoder::new().decode(reader, writer)
}
