//! Compiles animation scripts into a full pattern memory.
//!
//! A script is a sequence of frames, each written as 24 digits `0`-`7`
//! (red then green for every bulb, top of the tree to the bottom), mixed with
//! directive lines:
//!
//! - `fade_to[:speed]` synthesizes a linear fade from the previous frame to
//!   the next one.
//! - `set_marker[:name]` remembers the position of the last frame.
//! - `repeat[:name]` appends a copy of everything from the marker onward.
//! - `repeat_forever[:name]` appends as many whole copies as fit in memory;
//!   it must be the last entry of the script.
//!
//! Compilation stops at the first error and produces nothing in that case.

use std::{collections::HashMap, io::BufRead};

use crate::{
    accumulator::FrameAccumulator,
    board::MEMORY_RECORDS,
    codec::MemoryRecord,
    config::CompilerConfig,
    directive::{parse_line, ScriptLine},
    fade::interpolate,
    finalize::{fit_to_memory, Fit},
    serialize::frames_to_records,
    Frame, PatternError, Result,
};

/// Non-fatal events reported during compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Frames were synthesized between `from` and `to` (animation indices).
    Faded {
        from: usize,
        to: usize,
        inserted: usize,
    },
    /// A fade whose endpoints differ too little to interpolate.
    FlatFade { line: usize },
    /// `fade_to` was never followed by a frame.
    DanglingFade { line: usize },
    MarkerSet { name: String, index: usize },
    /// Frames `from..=to` were appended `copies` times.
    Repeated {
        name: String,
        from: usize,
        to: usize,
        copies: usize,
    },
    /// How the animation was fitted into pattern memory.
    Fitted(Fit),
}

/// A successfully compiled animation, exactly [`MEMORY_RECORDS`] frames long.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub frames: Vec<Frame>,
    pub notices: Vec<Notice>,
    /// Frame count before fitting to memory.
    pub authored_len: usize,
}

impl Compilation {
    /// Memory records in playback order.
    pub fn records(&self) -> Vec<MemoryRecord> {
        frames_to_records(&self.frames)
    }

    pub fn fit(&self) -> Option<Fit> {
        self.notices.iter().find_map(|notice| match notice {
            Notice::Fitted(fit) => Some(*fit),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingFade {
    line: usize,
    speed: u32,
}

/// Mutable state of a single compilation run.
#[derive(Debug, Default)]
struct CompilerState {
    accumulator: FrameAccumulator,
    frames: Vec<Frame>,
    markers: HashMap<String, usize>,
    pending_fade: Option<PendingFade>,
    repeat_forever_line: Option<usize>,
    /// Animation length including frames past memory that were never stored.
    authored: usize,
    notices: Vec<Notice>,
}

/// Turns animation scripts into finalized frame sequences.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Compiles a script held in memory.
    pub fn compile_str(&self, script: &str) -> Result<Compilation> {
        self.compile(script.lines())
    }

    /// Compiles a script read line by line, e.g. from a file.
    pub fn compile_reader<R: BufRead>(&self, reader: R) -> Result<Compilation> {
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        self.compile(lines)
    }

    /// Compiles a sequence of script lines.
    pub fn compile<I, S>(&self, lines: I) -> Result<Compilation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = CompilerState::default();
        let mut last_line = 0;

        for (index, text) in lines.into_iter().enumerate() {
            last_line = index + 1;
            self.process_line(&mut state, last_line, text.as_ref())?;
        }

        if state.frames.is_empty() {
            return Err(PatternError::EmptyAnimation);
        }
        state.accumulator.finish(last_line)?;

        if let Some(pending) = state.pending_fade.take() {
            tracing::warn!(line = pending.line, "fade_to is not followed by a frame, ignoring");
            state.notices.push(Notice::DanglingFade { line: pending.line });
        }

        let authored_len = state.authored;
        tracing::info!(frames = authored_len, "compiled animation frames");

        let mut frames = state.frames;
        let fit = fit_to_memory(&mut frames, authored_len)?;
        state.notices.push(Notice::Fitted(fit));

        Ok(Compilation {
            frames,
            notices: state.notices,
            authored_len,
        })
    }

    fn process_line(&self, state: &mut CompilerState, line: usize, text: &str) -> Result<()> {
        if state.repeat_forever_line.is_some() && !text.trim().is_empty() {
            return Err(PatternError::TrailingContentAfterRepeatForever { line });
        }

        let parsed = parse_line(line, text)?;
        if parsed.is_directive() && !state.accumulator.is_empty() {
            return Err(PatternError::DirectiveInsideFrame { line });
        }

        match parsed {
            ScriptLine::Blank => {
                if let Some(frame) = state.accumulator.boundary(line)? {
                    state.seal(frame);
                }
            }
            ScriptLine::FrameData(data) => {
                if let Some(frame) = state.accumulator.push_line(line, data)? {
                    state.seal(frame);
                }
            }
            ScriptLine::Fade(speed) => {
                if state.frames.is_empty() {
                    return Err(PatternError::FadeWithoutStartFrame { line });
                }
                state.pending_fade = Some(PendingFade {
                    line,
                    speed: speed.unwrap_or(self.config.default_fade_speed),
                });
            }
            ScriptLine::SetMarker(name) => {
                let name = self.marker_name(name);
                let index = state.authored.saturating_sub(1);
                tracing::info!(marker = %name, index, "setting marker");
                state.markers.insert(name.clone(), index);
                state.notices.push(Notice::MarkerSet { name, index });
            }
            ScriptLine::Repeat(name) => {
                let name = self.marker_name(name);
                let from = state.marker(line, &name)?;
                state.repeat(name, from, 1);
            }
            ScriptLine::RepeatForever(name) => {
                let name = self.marker_name(name);
                let from = state.marker(line, &name)?;
                let span = state.authored.saturating_sub(from);
                let room = MEMORY_RECORDS.saturating_sub(state.authored);
                let copies = if span == 0 { 0 } else { room / span };
                state.repeat(name, from, copies);
                state.repeat_forever_line = Some(line);
            }
        }

        Ok(())
    }

    fn marker_name(&self, name: Option<&str>) -> String {
        name.unwrap_or(&self.config.default_marker).to_string()
    }
}

impl CompilerState {
    fn seal(&mut self, frame: Frame) {
        self.frames.push(frame);
        self.authored = self.authored.saturating_add(1);

        let Some(fade) = self.pending_fade.take() else {
            return;
        };
        let end = self.frames.len() - 1;
        let Some(start) = end.checked_sub(1).map(|i| self.frames[i]) else {
            return;
        };

        let steps = interpolate(&start, &frame, fade.speed);
        if steps.is_empty() {
            tracing::info!(line = fade.line, "fade endpoints too similar, no frames added");
            self.notices.push(Notice::FlatFade { line: fade.line });
            return;
        }

        let inserted = steps.len();
        tracing::debug!(from = end - 1, to = end, inserted, speed = fade.speed, "fading frames");
        self.frames.splice(end..end, steps);
        self.authored = self.authored.saturating_add(inserted);
        self.notices.push(Notice::Faded {
            from: end - 1,
            to: end + inserted,
            inserted,
        });
    }

    fn marker(&self, line: usize, name: &str) -> Result<usize> {
        self.markers
            .get(name)
            .copied()
            .ok_or_else(|| PatternError::UnknownMarker {
                line,
                name: name.to_string(),
            })
    }

    /// Appends `copies` of `from..`, storing only what still fits in memory.
    fn repeat(&mut self, name: String, from: usize, copies: usize) {
        let to = self.authored.saturating_sub(1);
        let span: Vec<Frame> = self.frames.get(from..).unwrap_or_default().to_vec();
        let room = MEMORY_RECORDS.saturating_sub(self.frames.len());
        let stored = room.min(span.len().saturating_mul(copies));
        self.frames.extend(span.iter().cycle().take(stored));

        let authored_span = self.authored.saturating_sub(from);
        self.authored = self
            .authored
            .saturating_add(authored_span.saturating_mul(copies));
        tracing::info!(marker = %name, from, to, copies, "repeating frames");
        self.notices.push(Notice::Repeated {
            name,
            from,
            to,
            copies,
        });
    }
}
