//! Packing of brightness values into pattern memory records.
//!
//! A record holds 24 three-bit brightness values in 72 bits. LED 23 occupies
//! the most significant bits and LED 0 the least significant ones; the board
//! firmware reads memory in exactly this layout.

use std::{fmt, str::FromStr};

use crate::{
    board::{FULL_BRIGHTNESS, LEDS_PER_BOARD},
    PatternError, Result,
};

/// Bits used by a single brightness value.
pub const BRIGHTNESS_BITS: usize = 3;

/// Hex characters in a rendered record.
pub const RECORD_HEX_LEN: usize = 18;

/// Bytes in a record as sent to the board.
pub const RECORD_BYTES: usize = 9;

const BRIGHTNESS_MASK: u128 = 0b111;

/// Encodes a brightness as a three character bit string, most significant bit
/// first.
pub fn encode_brightness(value: u8) -> Result<String> {
    if value > FULL_BRIGHTNESS {
        return Err(PatternError::InvalidBrightness(value));
    }
    Ok(format!("{value:03b}"))
}

/// Inverse of [`encode_brightness`].
pub fn decode_brightness(bits: &str) -> Result<u8> {
    if bits.len() != BRIGHTNESS_BITS || !bits.chars().all(|c| c == '0' || c == '1') {
        return Err(PatternError::msg(format!(
            "brightness needs {BRIGHTNESS_BITS} bits, got {bits:?}"
        )));
    }
    u8::from_str_radix(bits, 2)
        .map_err(|_| PatternError::msg(format!("invalid brightness bits {bits:?}")))
}

/// One complete brightness snapshot of the board.
///
/// The source line is diagnostic metadata only; two frames with the same LED
/// values compare equal regardless of where they came from.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    levels: [u8; LEDS_PER_BOARD],
    line: usize,
}

impl Frame {
    /// Builds a frame, rejecting any level above [`FULL_BRIGHTNESS`].
    pub fn new(levels: [u8; LEDS_PER_BOARD], line: usize) -> Result<Self> {
        if let Some(&bad) = levels.iter().find(|&&level| level > FULL_BRIGHTNESS) {
            return Err(PatternError::InvalidBrightness(bad));
        }
        Ok(Self { levels, line })
    }

    /// For frames computed from already valid frames.
    pub(crate) fn synthesized(levels: [u8; LEDS_PER_BOARD], line: usize) -> Self {
        debug_assert!(levels.iter().all(|&level| level <= FULL_BRIGHTNESS));
        Self { levels, line }
    }

    /// A frame with every channel at the same level.
    pub fn uniform(level: u8) -> Result<Self> {
        Self::new([level; LEDS_PER_BOARD], 0)
    }

    pub fn levels(&self) -> &[u8; LEDS_PER_BOARD] {
        &self.levels
    }

    pub fn level(&self, led: usize) -> Option<u8> {
        self.levels.get(led).copied()
    }

    /// Input line the frame started on, or 0 for synthesized frames.
    pub fn line(&self) -> usize {
        self.line
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.levels == other.levels
    }
}

impl Eq for Frame {}

/// A packed frame as stored in one slot of pattern memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRecord(u128);

impl MemoryRecord {
    /// Raw 72-bit value.
    pub fn bits(self) -> u128 {
        self.0
    }

    /// Record bytes, most significant first, as written to the board.
    pub fn to_bytes(self) -> [u8; RECORD_BYTES] {
        let wide = self.0.to_be_bytes();
        let mut bytes = [0u8; RECORD_BYTES];
        bytes.copy_from_slice(&wide[wide.len() - RECORD_BYTES..]);
        bytes
    }

    pub fn from_bytes(bytes: [u8; RECORD_BYTES]) -> Self {
        Self(bytes.iter().fold(0u128, |acc, &b| (acc << 8) | u128::from(b)))
    }
}

impl fmt::Display for MemoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$x}", self.0, width = RECORD_HEX_LEN)
    }
}

impl FromStr for MemoryRecord {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.len() != RECORD_HEX_LEN {
            return Err(format!(
                "expected {RECORD_HEX_LEN} hex characters, found {}",
                s.len()
            ));
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("{s:?} is not hexadecimal"));
        }
        u128::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| e.to_string())
    }
}

/// Packs a frame into its memory record.
pub fn encode_frame(frame: &Frame) -> MemoryRecord {
    let bits = frame
        .levels
        .iter()
        .rev()
        .fold(0u128, |acc, &level| {
            (acc << BRIGHTNESS_BITS) | (u128::from(level) & BRIGHTNESS_MASK)
        });
    MemoryRecord(bits)
}

/// Unpacks a memory record. Every 72-bit value is a valid frame.
pub fn decode_frame(record: MemoryRecord) -> Frame {
    let mut levels = [0u8; LEDS_PER_BOARD];
    for (led, level) in levels.iter_mut().enumerate() {
        // Masked to three bits, always fits.
        *level = ((record.0 >> (led * BRIGHTNESS_BITS)) & BRIGHTNESS_MASK) as u8;
    }
    Frame { levels, line: 0 }
}
