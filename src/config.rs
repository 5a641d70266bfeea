//! Configuration for the atgps decoder.
//!
//! Every section has working defaults, so a config file only needs the
//! values it changes:
//!
//! ```toml
//! [framing]
//! marker = "@"
//! max_record_len = 256
//!
//! [output]
//! format = "json"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::constants::{
    CONTROL_THRESHOLD, DEFAULT_MAX_RECORD_LEN, FULL_RECORD_LEN, MARKER, SENTINEL,
};
use crate::error::{AtGpsError, Result};
use crate::output::OutputFormat;

/// A single byte given as a character, hex or decimal literal.
///
/// # Parsing formats
/// - `@` - the character itself (must be one byte)
/// - `0x40` or `0X40` - hexadecimal
/// - `64` - decimal (only when more than one character)
///
/// # Example
/// ```
/// use atgps::config::ByteLiteral;
///
/// let marker: ByteLiteral = "0x40".parse().unwrap();
/// assert_eq!(marker.get(), b'@');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct ByteLiteral(u8);

impl ByteLiteral {
    pub const fn new(byte: u8) -> Self {
        Self(byte)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ByteLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "{}", self.0 as char)
        } else {
            write!(f, "0x{:02x}", self.0)
        }
    }
}

impl FromStr for ByteLiteral {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.len() == 1 {
            return Ok(Self(s.as_bytes()[0]));
        }

        let s = s.trim();
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return u8::from_str_radix(hex, 16)
                .map(Self)
                .map_err(|_| format!("invalid hex byte: {}", s));
        }

        s.parse::<u8>()
            .map(Self)
            .map_err(|_| format!("invalid byte: {}", s))
    }
}

impl TryFrom<String> for ByteLiteral {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AtGpsConfig {
    /// Record framing and field conventions
    pub framing: FramingConfig,
    /// Byte source settings
    pub input: InputConfig,
    /// Fix rendering
    pub output: OutputConfig,
}

/// Record framing
///
/// Controls how the byte stream is cut into records and how missing fields
/// are recognised.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    /// Byte that starts a record (and ends the previous one)
    pub marker: ByteLiteral,
    /// Byte marking a field as unavailable
    pub sentinel: ByteLiteral,
    /// Bytes at or below this are dropped from the stream
    pub control_threshold: ByteLiteral,
    /// Accumulator capacity, marker included
    pub max_record_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Read size for file and stdin sources
    pub chunk_size: usize,
    /// Queue depth for the channel source
    pub channel_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbose: bool,
}

impl AtGpsConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AtGpsConfig =
            toml::from_str(&contents).map_err(|e| AtGpsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.framing.validate()?;
        self.input.validate()
    }
}

impl FramingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_record_len < FULL_RECORD_LEN {
            return Err(AtGpsError::Config(format!(
                "max_record_len {} is below the {}-byte record layout",
                self.max_record_len, FULL_RECORD_LEN
            )));
        }
        if self.marker.get() <= self.control_threshold.get() {
            return Err(AtGpsError::Config(format!(
                "marker {} falls at or below control threshold {}",
                self.marker, self.control_threshold
            )));
        }
        if self.sentinel.get() <= self.control_threshold.get() {
            return Err(AtGpsError::Config(format!(
                "sentinel {} falls at or below control threshold {}",
                self.sentinel, self.control_threshold
            )));
        }
        if self.sentinel.get().is_ascii_digit() {
            return Err(AtGpsError::Config(format!(
                "sentinel {} is a digit and would mask field data",
                self.sentinel
            )));
        }
        if self.sentinel == self.marker {
            return Err(AtGpsError::Config(format!(
                "sentinel and marker are both {}",
                self.marker
            )));
        }
        Ok(())
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(AtGpsError::Config("chunk_size must be positive".into()));
        }
        if self.channel_capacity == 0 {
            return Err(AtGpsError::Config(
                "channel_capacity must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            marker: ByteLiteral(MARKER),
            sentinel: ByteLiteral(SENTINEL),
            control_threshold: ByteLiteral(CONTROL_THRESHOLD),
            max_record_len: DEFAULT_MAX_RECORD_LEN,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            chunk_size: 256,
            channel_capacity: 64,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            verbose: false,
        }
    }
}
