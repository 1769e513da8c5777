//! Kermit-style prefix quoting
//!
//! Maps arbitrary binary data onto printable 7-bit ASCII and back, using the
//! control and 8th-bit prefixing rules of the Kermit file transfer protocol.
//! Text stays readable; everything else is quoted with one of three marker
//! characters:
//!
//! | byte                      | quoted as      |
//! |---------------------------|----------------|
//! | printable, not a marker   | itself         |
//! | marker `m`                | `#m`           |
//! | control `c`               | `#` `c ^ 0x40` |
//! | `c \| 0x80`               | `&` + quoted `c` |
//!
//! Each byte is quoted independently, so encoding and decoding are pure
//! functions of one unit plus a [`Config`].
//!
//! ```
//! use kquote::{Decoder, Encoder};
//!
//! let quoted = Encoder::new().encode_to_vec(b"A#\x01\xC1");
//! assert_eq!(quoted, b"A###A&A");
//!
//! let raw = Decoder::new().decode_to_vec(&quoted).unwrap();
//! assert_eq!(raw, b"A#\x01\xC1");
//! ```

mod config;
mod consts;
mod decode;
mod encode;
mod error;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::{Config, Marker};
pub use consts::{DEFAULT_CONTROL, DEFAULT_PREFIX, DEFAULT_REPEAT, MAX_UNIT_LEN};
pub use decode::{DecodeStats, Decoder, Deframed, decode, deframe, frame_len, unescape};
pub use encode::{EncodeStats, Encoder, EscapeUnit, encode, escape};
pub use error::{ConfigError, QuoteError, Result};
