//! Core library for the Christmas tree board tooling.
//!
//! The centre of the crate is the animation [`Compiler`], which turns a
//! hand-written animation script into the 256 memory records the board plays
//! back. Around it sit the record codec, the fixed board topology, procedural
//! pattern generators and the serial upload protocol.

pub mod accumulator;
pub mod board;
pub mod codec;
pub mod compiler;
pub mod config;
pub mod directive;
pub mod error;
pub mod fade;
pub mod finalize;
pub mod generator;
pub mod serialize;
pub mod upload;

pub use accumulator::FrameAccumulator;
pub use board::{LEDS_PER_BOARD, MEMORY_RECORDS};
pub use codec::{decode_frame, encode_frame, Frame, MemoryRecord};
pub use compiler::{Compilation, Compiler, Notice};
pub use config::{AppConfig, CompilerConfig, OutputConfig, UploadConfig};
pub use directive::{parse_line, ScriptLine};
pub use error::{PatternError, Result};
pub use finalize::Fit;
pub use generator::Pattern;
pub use serialize::{load_records, pretty_frame, save_records};
pub use upload::Programmer;
