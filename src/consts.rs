//! Common constants for prefix quoting

/// Default 8th-bit prefix character
pub const DEFAULT_PREFIX: u8 = b'&';

/// Default control-quote character
pub const DEFAULT_CONTROL: u8 = b'#';

/// Default repeat character (reserved, never expands runs)
pub const DEFAULT_REPEAT: u8 = b'~';

/// Bit marking a byte as outside the 7-bit range
pub(crate) const HIGH_BIT: u8 = 0x80;

/// Mask for the low 7 bits of a byte
pub(crate) const LOW_BITS: u8 = 0x7F;

/// Caret-quoting toggle: `^A` (0x01) <-> `A` (0x41)
pub(crate) const CTL_TOGGLE: u8 = 0x40;

/// Delete, the only control byte above the printable range
pub(crate) const DEL: u8 = 0x7F;

/// Longest escape unit produced for one byte
pub const MAX_UNIT_LEN: usize = 3;

/// Read chunk size used by the stream drivers
pub(crate) const CHUNK_SIZE: usize = 8 * 1024;

/// Undo or apply caret-quoting
#[inline]
pub(crate) const fn ctl(byte: u8) -> u8 {
    byte ^ CTL_TOGGLE
}

/// Printable 7-bit range, space through tilde
#[inline]
pub(crate) const fn is_printable(byte: u8) -> bool {
    byte >= b' ' && byte <= b'~'
}
