use crate::{board::MEMORY_RECORDS, Frame, PatternError, Result};

/// Informational outcome of fitting an animation into pattern memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Already exactly the memory size.
    Exact,
    /// Trailing frames were thrown away.
    Truncated { dropped: usize },
    /// The last frame was repeated to fill memory.
    Padded { added: usize },
}

/// Fits an animation to exactly [`MEMORY_RECORDS`] frames.
pub fn finalize(frames: &mut Vec<Frame>) -> Result<Fit> {
    let authored = frames.len();
    fit_to_memory(frames, authored)
}

/// Like [`finalize`], for animations whose frames past memory were never
/// stored. `authored` is the full length, used to report what was dropped.
pub fn fit_to_memory(frames: &mut Vec<Frame>, authored: usize) -> Result<Fit> {
    let Some(&last) = frames.last() else {
        return Err(PatternError::EmptyAnimation);
    };

    let total = authored.max(frames.len());
    let fit = if total > MEMORY_RECORDS {
        frames.truncate(MEMORY_RECORDS);
        let dropped = total - MEMORY_RECORDS;
        tracing::warn!(
            total,
            dropped,
            "animation exceeds pattern memory, {dropped} frames dropped"
        );
        Fit::Truncated { dropped }
    } else if total < MEMORY_RECORDS {
        let added = MEMORY_RECORDS - frames.len();
        frames.resize(MEMORY_RECORDS, last);
        tracing::info!(total, added, "repeating last frame to fill pattern memory");
        Fit::Padded { added }
    } else {
        Fit::Exact
    };

    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::LEDS_PER_BOARD;

    fn numbered(count: usize) -> Vec<Frame> {
        (0..count)
            .map(|i| {
                let mut levels = [0u8; LEDS_PER_BOARD];
                for (led, level) in levels.iter_mut().enumerate() {
                    *level = ((i >> (led % 8)) & 0b111) as u8;
                }
                Frame::new(levels, i + 1).unwrap()
            })
            .collect()
    }

    #[test]
    fn empty_animation_is_rejected() {
        let mut frames = Vec::new();
        assert!(matches!(
            finalize(&mut frames),
            Err(PatternError::EmptyAnimation)
        ));
    }

    #[test]
    fn truncates_long_animations() {
        let mut frames = numbered(300);
        let expected: Vec<Frame> = frames[..MEMORY_RECORDS].to_vec();
        let fit = finalize(&mut frames).unwrap();
        assert_eq!(fit, Fit::Truncated { dropped: 44 });
        assert_eq!(frames, expected);
        assert_eq!(frames.last().unwrap().line(), 256);
    }

    #[test]
    fn pads_with_last_frame() {
        let mut frames = numbered(10);
        let last = frames[9];
        let fit = finalize(&mut frames).unwrap();
        assert_eq!(fit, Fit::Padded { added: 246 });
        assert_eq!(frames.len(), MEMORY_RECORDS);
        assert!(frames[9..].iter().all(|f| *f == last));
    }

    #[test]
    fn reports_frames_that_were_never_stored() {
        let mut frames = numbered(MEMORY_RECORDS);
        let before = frames.clone();
        let fit = fit_to_memory(&mut frames, 1000).unwrap();
        assert_eq!(fit, Fit::Truncated { dropped: 744 });
        assert_eq!(frames, before);
    }

    #[test]
    fn exact_length_is_untouched() {
        let mut frames = numbered(MEMORY_RECORDS);
        let before = frames.clone();
        assert_eq!(finalize(&mut frames).unwrap(), Fit::Exact);
        assert_eq!(frames, before);
        assert_eq!(finalize(&mut frames).unwrap(), Fit::Exact);
    }
}
