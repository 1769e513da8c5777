//! Prefix quoting: binary bytes to printable escape units

use std::io::{BufWriter, ErrorKind, Read, Write};
use std::ops::Deref;

use crate::config::Config;
use crate::consts::{CHUNK_SIZE, DEL, LOW_BITS, MAX_UNIT_LEN, ctl, is_printable};
use crate::error::Result;

/// The 1 to 3 characters standing for one input byte
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EscapeUnit {
    buf: [u8; MAX_UNIT_LEN],
    len: u8,
}

impl EscapeUnit {
    #[inline]
    fn one(a: u8) -> Self {
        Self {
            buf: [a, 0, 0],
            len: 1,
        }
    }

    #[inline]
    fn two(a: u8, b: u8) -> Self {
        Self {
            buf: [a, b, 0],
            len: 2,
        }
    }

    #[inline]
    fn three(a: u8, b: u8, c: u8) -> Self {
        Self {
            buf: [a, b, c],
            len: 3,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl Deref for EscapeUnit {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for EscapeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EscapeUnit(\"{}\")", self.as_bytes().escape_ascii())
    }
}

/// Quote a single byte
///
/// Markers are quoted with the control character, other printable
/// characters pass through, control bytes are caret-quoted, and bytes
/// with the 8th bit set get the prefix character in front of the
/// quoted form of their low 7 bits.
///
/// # Example
/// ```
/// use kquote::{Config, escape};
///
/// let config = Config::default();
/// assert_eq!(escape(b'A', &config).as_bytes(), b"A");
/// assert_eq!(escape(0x01, &config).as_bytes(), b"#A");
/// assert_eq!(escape(0xA3, &config).as_bytes(), b"&##");
/// ```
pub fn escape(byte: u8, config: &Config) -> EscapeUnit {
    let control = config.control();

    if config.is_marker(byte) {
        return EscapeUnit::two(control, byte);
    }
    if is_printable(byte) {
        return EscapeUnit::one(byte);
    }
    if byte < b' ' || byte == DEL {
        if (byte == b'\r' || byte == b'\n') && !config.translates_newlines() {
            return EscapeUnit::one(byte);
        }
        return EscapeUnit::two(control, ctl(byte));
    }

    let low = byte & LOW_BITS;
    let prefix = config.prefix();
    if config.is_marker(low) {
        EscapeUnit::three(prefix, control, low)
    } else if is_printable(low) {
        EscapeUnit::two(prefix, low)
    } else {
        EscapeUnit::three(prefix, control, ctl(low))
    }
}

/// Totals reported by [`Encoder::encode`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Raw bytes read
    pub bytes_in: u64,
    /// Quoted characters written
    pub chars_out: u64,
}

/// Encoder with configurable markers
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: Config,
}

impl Encoder {
    /// Create a new encoder with the default markers (`&`, `#`, `~`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder for an already validated configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Quote everything from a reader into a writer
    ///
    /// The input is consumed in fixed-size chunks, so streams of any length
    /// are handled without being held in memory. The writer is flushed
    /// before returning.
    ///
    /// # Arguments
    /// * `reader` - Input reader containing raw data
    /// * `writer` - Output writer for quoted text
    pub fn encode<R: Read, W: Write>(&self, mut reader: R, writer: W) -> Result<EncodeStats> {
        let mut writer = BufWriter::new(writer);
        let mut chunk = [0u8; CHUNK_SIZE];
        let mut stats = EncodeStats::default();

        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };

            for &byte in &chunk[..read] {
                let unit = escape(byte, &self.config);
                writer.write_all(&unit)?;
                stats.chars_out += unit.len() as u64;
            }
            stats.bytes_in += read as u64;
        }

        writer.flush()?;
        tracing::debug!(
            bytes_in = stats.bytes_in,
            chars_out = stats.chars_out,
            "encode finished"
        );
        Ok(stats)
    }

    /// Quote an in-memory buffer
    pub fn encode_to_vec(&self, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(data.len() + data.len() / 4);
        for &byte in data {
            out.extend_from_slice(&escape(byte, &self.config));
        }
        out
    }
}

/// Encode data with the default markers
///
/// This is a convenience function equivalent to `Encoder::new().encode(reader, writer)`
pub fn encode<R: Read, W: Write>(reader: R, writer: W) -> Result<EncodeStats> {
    Encoder::new().encode(reader, writer)
}
