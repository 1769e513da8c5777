//! Marker configuration shared by the encoder and decoder

use std::fmt;

use crate::consts::{CTL_TOGGLE, DEFAULT_CONTROL, DEFAULT_PREFIX, DEFAULT_REPEAT, DEL, ctl};
use crate::error::{ConfigError, Result};

/// Role of a marker character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Introduces a byte with the 8th bit set
    Prefix,
    /// Introduces a quoted control byte or marker literal
    Control,
    /// Reserved for run-length repeats; quoted but never expanded
    Repeat,
}

impl Marker {
    /// All roles, in classification priority order
    pub const ALL: [Marker; 3] = [Marker::Control, Marker::Prefix, Marker::Repeat];
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Marker::Prefix => "prefix",
            Marker::Control => "control",
            Marker::Repeat => "repeat",
        })
    }
}

/// Immutable marker configuration
///
/// Every `Config` has passed validation: the three markers are graphic
/// ASCII, pairwise distinct, and none of them is the caret form of a
/// control byte. Under those conditions every byte round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    prefix: u8,
    control: u8,
    repeat: u8,
    translate_newlines: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX,
            control: DEFAULT_CONTROL,
            repeat: DEFAULT_REPEAT,
            translate_newlines: false,
        }
    }
}

impl Config {
    /// Create a validated configuration from the three marker characters
    ///
    /// Newline translation starts disabled; see [`Config::with_translate_newlines`].
    ///
    /// # Example
    /// ```
    /// use kquote::Config;
    ///
    /// let config = Config::new(b'&', b'#', b'~').unwrap();
    /// assert_eq!(config, Config::default());
    ///
    /// assert!(Config::new(b'&', b'&', b'~').is_err());
    /// ```
    pub fn new(prefix: u8, control: u8, repeat: u8) -> Result<Self> {
        let config = Self {
            prefix,
            control,
            repeat,
            translate_newlines: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Quote carriage returns and line feeds instead of passing them through
    pub fn with_translate_newlines(mut self, enabled: bool) -> Self {
        self.translate_newlines = enabled;
        self
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    pub fn repeat(&self) -> u8 {
        self.repeat
    }

    pub fn translates_newlines(&self) -> bool {
        self.translate_newlines
    }

    /// Character configured for a role
    pub fn marker(&self, role: Marker) -> u8 {
        match role {
            Marker::Prefix => self.prefix,
            Marker::Control => self.control,
            Marker::Repeat => self.repeat,
        }
    }

    /// Role of `byte`, if it is one of the markers
    #[inline]
    pub fn role_of(&self, byte: u8) -> Option<Marker> {
        if byte == self.control {
            Some(Marker::Control)
        } else if byte == self.prefix {
            Some(Marker::Prefix)
        } else if byte == self.repeat {
            Some(Marker::Repeat)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn is_marker(&self, byte: u8) -> bool {
        self.role_of(byte).is_some()
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        for role in Marker::ALL {
            let value = self.marker(role);
            if !value.is_ascii_graphic() {
                return Err(ConfigError::MarkerNotGraphic { role, value });
            }
            if shadows_control_quote(value) {
                return Err(ConfigError::MarkerShadowsControlQuote { role, value });
            }
        }

        for (i, &first) in Marker::ALL.iter().enumerate() {
            for &second in &Marker::ALL[i + 1..] {
                let value = self.marker(first);
                if value == self.marker(second) {
                    return Err(ConfigError::DuplicateMarker {
                        first,
                        second,
                        value,
                    });
                }
            }
        }

        Ok(())
    }
}

/// True when `value` is `ctl(b)` for some control byte `b`
#[inline]
fn shadows_control_quote(value: u8) -> bool {
    value == ctl(DEL) || (CTL_TOGGLE..CTL_TOGGLE + 0x20).contains(&value)
}
