//! Fixed topology of the Christmas tree board.
//!
//! The board carries twelve bi-colour bulbs laid out as a tree. Each bulb has
//! a red and a green channel wired to two adjacent LED indices, but the order
//! within the pair depends on how the bulb was soldered.
//!
//! ```text
//!            *R
//!            RG
//!          RG  RG
//!        RG  GR  GR
//!      GR  RG  GR  RG
//!            RG
//! ```

/// Number of individually addressable LED channels.
pub const LEDS_PER_BOARD: usize = 24;

/// Number of records in the board's pattern memory.
pub const MEMORY_RECORDS: usize = 256;

/// Highest brightness a channel accepts.
pub const FULL_BRIGHTNESS: u8 = 7;

/// Lowest brightness (off).
pub const MIN_BRIGHTNESS: u8 = 0;

/// Bulbs per visual row, top to bottom.
pub const ROW_WIDTHS: [usize; 6] = [1, 1, 2, 3, 4, 1];

/// Red channel indices grouped by row, top to bottom.
pub const LEVELS_RED: [&[usize]; 6] = [&[0], &[2], &[4, 6], &[8, 11, 13], &[15, 16, 19, 20], &[22]];

/// Green channel indices grouped by row, top to bottom.
///
/// The star at the top only has a red channel, so its level reuses index 0.
pub const LEVELS_GREEN: [&[usize]; 6] =
    [&[0], &[3], &[5, 7], &[9, 10, 12], &[14, 17, 18, 21], &[23]];
