//! Linear cross-fades between two frames.
//!
//! The number of synthesized frames equals the largest single-channel change
//! times the speed divisor, minus one. Intermediate values are computed in
//! speed-scaled units and truncated toward zero when scaled back, so a fade
//! can land one unit below the exact linear value. Compiled patterns rely on
//! this arithmetic; do not switch it to rounding.

use crate::{
    board::{LEDS_PER_BOARD, MEMORY_RECORDS},
    Frame,
};

/// Largest absolute per-channel difference between two frames.
pub fn max_delta(start: &Frame, end: &Frame) -> u8 {
    start
        .levels()
        .iter()
        .zip(end.levels())
        .map(|(a, b)| a.abs_diff(*b))
        .max()
        .unwrap_or(0)
}

/// Frames to insert between `start` and `end`, in playback order.
///
/// Returns nothing when no channel changes by at least two steps. Output is
/// capped at one memory's worth of frames, since anything past that is
/// dropped when the animation is finalized.
pub fn interpolate(start: &Frame, end: &Frame, speed: u32) -> Vec<Frame> {
    let delta = max_delta(start, end);
    if delta < 2 {
        return Vec::new();
    }

    let speed = speed.max(1);
    let steps = u32::from(delta).saturating_mul(speed);
    let scale = f64::from(speed);

    (1..steps)
        .take(MEMORY_RECORDS)
        .map(|step| {
            let mut levels = [0u8; LEDS_PER_BOARD];
            for (led, level) in levels.iter_mut().enumerate() {
                let from = f64::from(start.levels()[led]) * scale;
                let to = f64::from(end.levels()[led]) * scale;
                let slope = (to - from) / f64::from(steps);
                // Both endpoints are within 0..=7, so the value is too.
                *level = ((from + slope * f64::from(step)) / scale) as u8;
            }
            Frame::synthesized(levels, start.line())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(led: usize, level: u8) -> Frame {
        let mut levels = [0u8; LEDS_PER_BOARD];
        levels[led] = level;
        Frame::new(levels, 1).unwrap()
    }

    #[test]
    fn identical_frames_need_no_fade() {
        let frame = frame_with(3, 5);
        assert!(interpolate(&frame, &frame, 1).is_empty());
        assert!(interpolate(&frame, &frame, 4).is_empty());
    }

    #[test]
    fn single_step_change_needs_no_fade() {
        assert!(interpolate(&frame_with(0, 3), &frame_with(0, 4), 2).is_empty());
    }

    #[test]
    fn full_fade_walks_every_level() {
        let start = Frame::uniform(0).unwrap();
        let end = frame_with(10, 7);
        let steps = interpolate(&start, &end, 1);
        assert_eq!(steps.len(), 6);
        let levels: Vec<u8> = steps.iter().map(|f| f.level(10).unwrap()).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
        assert!(steps.iter().all(|f| f.level(0) == Some(0)));
    }

    #[test]
    fn speed_stretches_the_fade() {
        let start = Frame::uniform(0).unwrap();
        let end = frame_with(0, 2);
        let steps = interpolate(&start, &end, 3);
        assert_eq!(steps.len(), 5);
        let levels: Vec<u8> = steps.iter().map(|f| f.level(0).unwrap()).collect();
        assert_eq!(levels, vec![0, 0, 1, 1, 1]);
    }

    #[test]
    fn fading_down_truncates_toward_zero() {
        let start = frame_with(0, 7);
        let end = frame_with(0, 0);
        let levels: Vec<u8> = interpolate(&start, &end, 1)
            .iter()
            .map(|f| f.level(0).unwrap())
            .collect();
        assert_eq!(levels, vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn smaller_channels_move_proportionally() {
        let start = Frame::uniform(0).unwrap();
        let mut levels = [0u8; LEDS_PER_BOARD];
        levels[0] = 4;
        levels[1] = 2;
        let end = Frame::new(levels, 2).unwrap();
        let steps = interpolate(&start, &end, 1);
        assert_eq!(steps.len(), 3);
        let slow: Vec<u8> = steps.iter().map(|f| f.level(1).unwrap()).collect();
        assert_eq!(slow, vec![0, 1, 1]);
    }

    #[test]
    fn huge_speeds_stay_bounded() {
        let steps = interpolate(&Frame::uniform(0).unwrap(), &Frame::uniform(7).unwrap(), u32::MAX);
        assert_eq!(steps.len(), MEMORY_RECORDS);
    }
}
