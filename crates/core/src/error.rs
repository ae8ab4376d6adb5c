/// Result alias that carries the custom [`PatternError`] type.
pub type Result<T> = std::result::Result<T, PatternError>;

/// Common error type for the core crate.
///
/// Line and column numbers are 1-based and refer to the raw input text.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// A character in frame data is neither whitespace nor a digit in `0..=7`.
    #[error("line {line}, character {column}: invalid brightness {found:?}, expected a digit between 0 and 7")]
    InvalidDigit {
        line: usize,
        column: usize,
        found: char,
    },
    /// More than 24 LED values were given for a single frame.
    #[error("line {line}, character {column}: too many LEDs for the current frame, there must be exactly 24")]
    FrameOverflow { line: usize, column: usize },
    /// A frame was interrupted by a blank line or the end of input.
    #[error("lines {start_line}-{end_line}: only {count} LEDs found, a frame needs exactly 24")]
    IncompleteFrame {
        start_line: usize,
        end_line: usize,
        count: usize,
    },
    /// A directive appeared while a frame was still being filled.
    #[error("line {line}: directive is in the middle of a frame")]
    DirectiveInsideFrame { line: usize },
    /// `fade_to` appeared before any complete frame.
    #[error("line {line}: fade_to must come after a complete frame")]
    FadeWithoutStartFrame { line: usize },
    /// The `fade_to` speed was not a positive integer.
    #[error("line {line}: invalid fade speed {value:?}, expected an integer of at least 1")]
    InvalidFadeSpeed { line: usize, value: String },
    /// `repeat` referenced a marker that was never set.
    #[error("line {line}: repeat refers to unknown marker `{name}`")]
    UnknownMarker { line: usize, name: String },
    /// The input produced no frames at all.
    #[error("no animation frames found in input")]
    EmptyAnimation,
    /// Something other than blank lines followed `repeat_forever`.
    #[error("line {line}: content after repeat_forever, which must be the last entry")]
    TrailingContentAfterRepeatForever { line: usize },
    /// A brightness outside `0..=7` reached the codec.
    #[error("brightness {0} is out of range 0..=7")]
    InvalidBrightness(u8),
    /// A line of a hex record file could not be decoded.
    #[error("record line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
    /// The board answered the upload handshake unexpectedly.
    #[error("upload protocol error: {0}")]
    Protocol(String),
    /// Free-form message for conditions without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl PatternError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    /// Input line the error points at, when it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidDigit { line, .. }
            | Self::FrameOverflow { line, .. }
            | Self::DirectiveInsideFrame { line }
            | Self::FadeWithoutStartFrame { line }
            | Self::InvalidFadeSpeed { line, .. }
            | Self::UnknownMarker { line, .. }
            | Self::TrailingContentAfterRepeatForever { line }
            | Self::InvalidRecord { line, .. } => Some(*line),
            Self::IncompleteFrame { end_line, .. } => Some(*end_line),
            _ => None,
        }
    }
}

impl From<&str> for PatternError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for PatternError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_carry_positions() {
        let err = PatternError::InvalidDigit {
            line: 4,
            column: 7,
            found: '9',
        };
        let text = format!("{err}");
        assert!(text.contains("line 4"));
        assert!(text.contains("character 7"));
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn incomplete_frame_reports_end_line() {
        let err = PatternError::IncompleteFrame {
            start_line: 2,
            end_line: 5,
            count: 10,
        };
        assert_eq!(err.line(), Some(5));
        assert!(format!("{err}").contains("only 10 LEDs"));
        assert_eq!(PatternError::EmptyAnimation.line(), None);
    }
}
