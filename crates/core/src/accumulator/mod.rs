use crate::{
    board::{FULL_BRIGHTNESS, LEDS_PER_BOARD},
    Frame, PatternError, Result,
};

/// Collects LED digits across lines until a full frame is available.
///
/// A frame may be written on one line or spread over several; it is sealed at
/// the end of the line that supplies its 24th value.
#[derive(Debug, Default)]
pub struct FrameAccumulator {
    levels: [u8; LEDS_PER_BOARD],
    count: usize,
    start_line: usize,
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no digits of an unfinished frame are pending.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn len(&self) -> usize {
        self.count
    }

    /// Line on which the pending frame started.
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Adds the digits of one line of frame data.
    pub fn push_line(&mut self, line: usize, text: &str) -> Result<Option<Frame>> {
        for (index, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let column = index + 1;
            if self.count == 0 {
                self.start_line = line;
            }
            if self.count == LEDS_PER_BOARD {
                return Err(PatternError::FrameOverflow { line, column });
            }
            let level = ch
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .filter(|&d| d <= FULL_BRIGHTNESS)
                .ok_or(PatternError::InvalidDigit {
                    line,
                    column,
                    found: ch,
                })?;
            self.levels[self.count] = level;
            self.count += 1;
        }

        if self.count == LEDS_PER_BOARD {
            self.seal().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Handles a blank separator line.
    pub fn boundary(&mut self, line: usize) -> Result<Option<Frame>> {
        match self.count {
            0 => Ok(None),
            LEDS_PER_BOARD => self.seal().map(Some),
            count => Err(PatternError::IncompleteFrame {
                start_line: self.start_line,
                end_line: line,
                count,
            }),
        }
    }

    /// Checks that input did not end in the middle of a frame.
    pub fn finish(&self, last_line: usize) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(PatternError::IncompleteFrame {
                start_line: self.start_line,
                end_line: last_line,
                count: self.count,
            })
        }
    }

    fn seal(&mut self) -> Result<Frame> {
        let frame = Frame::new(self.levels, self.start_line)?;
        self.levels = [0; LEDS_PER_BOARD];
        self.count = 0;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_LINE: &str = "70  00  00 00  00 00 00  07 07 07 07  00";

    #[test]
    fn seals_single_line_frame() {
        let mut acc = FrameAccumulator::new();
        let frame = acc.push_line(1, ONE_LINE).unwrap().expect("frame is complete");
        assert_eq!(frame.level(0), Some(7));
        assert_eq!(frame.level(15), Some(7));
        assert_eq!(frame.level(23), Some(0));
        assert_eq!(frame.line(), 1);
        assert!(acc.is_empty());
    }

    #[test]
    fn spans_multiple_lines() {
        let mut acc = FrameAccumulator::new();
        let lines = ["    70", "    00", "  00  00", "00  00  00", "07 07 07 07"];
        for (i, text) in lines.iter().enumerate() {
            assert!(acc.push_line(i + 3, text).unwrap().is_none());
        }
        assert_eq!(acc.len(), 22);
        assert_eq!(acc.start_line(), 3);
        let frame = acc.push_line(8, "  00").unwrap().expect("frame is complete");
        assert_eq!(frame.line(), 3);
    }

    #[test]
    fn reports_invalid_digit_position() {
        let mut acc = FrameAccumulator::new();
        match acc.push_line(2, "70 80") {
            Err(PatternError::InvalidDigit {
                line,
                column,
                found,
            }) => {
                assert_eq!((line, column, found), (2, 4, '8'));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(acc.push_line(2, "x").is_err());
    }

    #[test]
    fn reports_overflow() {
        let mut acc = FrameAccumulator::new();
        let text = format!("{} 1", "0".repeat(24));
        match acc.push_line(5, &text) {
            Err(PatternError::FrameOverflow { line, column }) => {
                assert_eq!((line, column), (5, 26));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_line_inside_frame_is_an_error() {
        let mut acc = FrameAccumulator::new();
        assert!(acc.boundary(1).unwrap().is_none());
        acc.push_line(2, "7070").unwrap();
        match acc.boundary(3) {
            Err(PatternError::IncompleteFrame {
                start_line,
                end_line,
                count,
            }) => assert_eq!((start_line, end_line, count), (2, 3, 4)),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn finish_detects_dangling_frame() {
        let mut acc = FrameAccumulator::new();
        assert!(acc.finish(1).is_ok());
        acc.push_line(4, "12").unwrap();
        assert!(matches!(
            acc.finish(6),
            Err(PatternError::IncompleteFrame { count: 2, .. })
        ));
    }
}
