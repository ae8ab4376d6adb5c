//! Procedural patterns built directly from frames.

use crate::{
    board::{FULL_BRIGHTNESS, LEDS_PER_BOARD, LEVELS_GREEN, LEVELS_RED, MIN_BRIGHTNESS},
    Frame,
};

/// Frames the fully lit tree is held for after each waterfall colour.
const WATERFALL_HOLD: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Waterfall,
    Sweep,
    /// Waterfall followed by sweep.
    Both,
}

impl Pattern {
    pub fn frames(self) -> Vec<Frame> {
        match self {
            Self::Waterfall => waterfall(),
            Self::Sweep => sweep(),
            Self::Both => {
                let mut frames = waterfall();
                frames.extend(sweep());
                frames
            }
        }
    }
}

/// Each LED in turn steps up through every other brightness while the rest
/// stay off.
pub fn sweep() -> Vec<Frame> {
    let mut frames = Vec::new();
    for led in 0..LEDS_PER_BOARD {
        for step in 0..(FULL_BRIGHTNESS + 1) / 2 {
            let mut levels = [MIN_BRIGHTNESS; LEDS_PER_BOARD];
            levels[led] = step * 2;
            frames.push(Frame::synthesized(levels, 0));
        }
    }
    frames
}

/// Rows light up from the top of the tree down, first red then green. Rows
/// already lit stay at full brightness while the next one fades in.
pub fn waterfall() -> Vec<Frame> {
    let mut frames = Vec::new();

    for colour in [LEVELS_RED, LEVELS_GREEN] {
        let mut lit: Vec<usize> = Vec::new();
        let mut last = [MIN_BRIGHTNESS; LEDS_PER_BOARD];

        for row in colour {
            for intensity in MIN_BRIGHTNESS..=FULL_BRIGHTNESS {
                let mut levels = [MIN_BRIGHTNESS; LEDS_PER_BOARD];
                for &led in &lit {
                    levels[led] = FULL_BRIGHTNESS;
                }
                for &led in row.iter() {
                    levels[led] = intensity;
                }
                last = levels;
                frames.push(Frame::synthesized(levels, 0));
            }
            lit.extend_from_slice(row);
        }

        for _ in 0..WATERFALL_HOLD {
            frames.push(Frame::synthesized(last, 0));
        }
    }

    frames
}
