//! Classification of animation script lines.
//!
//! Every input line is parsed into a [`ScriptLine`] before the compiler acts
//! on it, so the grammar can be tested apart from its effects.

use crate::{PatternError, Result};

const FADE_TO: &str = "fade_to";
const SET_MARKER: &str = "set_marker";
const REPEAT_FOREVER: &str = "repeat_forever";
const REPEAT: &str = "repeat";

/// One line of an animation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine<'a> {
    /// Empty or whitespace-only line; a frame boundary.
    Blank,
    /// LED digits, possibly only part of a frame.
    FrameData(&'a str),
    /// `fade_to[:speed]`; `None` means the configured default speed.
    Fade(Option<u32>),
    /// `set_marker[:name]`
    SetMarker(Option<&'a str>),
    /// `repeat[:name]`
    Repeat(Option<&'a str>),
    /// `repeat_forever[:name]`
    RepeatForever(Option<&'a str>),
}

impl ScriptLine<'_> {
    pub fn is_directive(&self) -> bool {
        !matches!(self, Self::Blank | Self::FrameData(_))
    }
}

/// Parses a raw input line. `line` is the 1-based line number used in errors.
pub fn parse_line(line: usize, text: &str) -> Result<ScriptLine<'_>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(ScriptLine::Blank);
    }

    if trimmed.starts_with(FADE_TO) {
        let speed = argument(trimmed)
            .map(|raw| parse_speed(line, raw))
            .transpose()?;
        Ok(ScriptLine::Fade(speed))
    } else if trimmed.starts_with(SET_MARKER) {
        Ok(ScriptLine::SetMarker(argument(trimmed)))
    } else if trimmed.starts_with(REPEAT_FOREVER) {
        // Shares its prefix with `repeat`, so it is tested first.
        Ok(ScriptLine::RepeatForever(argument(trimmed)))
    } else if trimmed.starts_with(REPEAT) {
        Ok(ScriptLine::Repeat(argument(trimmed)))
    } else {
        Ok(ScriptLine::FrameData(text))
    }
}

fn argument(directive: &str) -> Option<&str> {
    directive
        .split(':')
        .nth(1)
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
}

fn parse_speed(line: usize, raw: &str) -> Result<u32> {
    match raw.parse::<u32>() {
        Ok(speed) if speed >= 1 => Ok(speed),
        _ => Err(PatternError::InvalidFadeSpeed {
            line,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_blank_and_data_lines() {
        assert_eq!(parse_line(1, "").unwrap(), ScriptLine::Blank);
        assert_eq!(parse_line(1, "   \t").unwrap(), ScriptLine::Blank);
        assert_eq!(
            parse_line(1, "  70 00").unwrap(),
            ScriptLine::FrameData("  70 00")
        );
    }

    #[test]
    fn parses_fades() {
        assert_eq!(parse_line(3, "fade_to").unwrap(), ScriptLine::Fade(None));
        assert_eq!(parse_line(3, " fade_to:4 ").unwrap(), ScriptLine::Fade(Some(4)));
        assert_eq!(parse_line(3, "fade_to: 2").unwrap(), ScriptLine::Fade(Some(2)));
    }

    #[test]
    fn rejects_bad_fade_speeds() {
        for bad in ["fade_to:0", "fade_to:fast", "fade_to:-1"] {
            match parse_line(9, bad) {
                Err(PatternError::InvalidFadeSpeed { line, .. }) => assert_eq!(line, 9),
                other => panic!("unexpected result for {bad}: {other:?}"),
            }
        }
    }

    #[test]
    fn parses_markers_and_repeats() {
        assert_eq!(parse_line(1, "set_marker").unwrap(), ScriptLine::SetMarker(None));
        assert_eq!(
            parse_line(1, "set_marker:intro").unwrap(),
            ScriptLine::SetMarker(Some("intro"))
        );
        assert_eq!(parse_line(1, "set_marker:").unwrap(), ScriptLine::SetMarker(None));
        assert_eq!(parse_line(1, "repeat").unwrap(), ScriptLine::Repeat(None));
        assert_eq!(
            parse_line(1, "repeat:intro").unwrap(),
            ScriptLine::Repeat(Some("intro"))
        );
    }

    #[test]
    fn repeat_forever_is_not_a_plain_repeat() {
        let parsed = parse_line(1, "repeat_forever").unwrap();
        assert_eq!(parsed, ScriptLine::RepeatForever(None));
        assert!(parsed.is_directive());
        assert_eq!(
            parse_line(1, "repeat_forever:loop").unwrap(),
            ScriptLine::RepeatForever(Some("loop"))
        );
    }
}
