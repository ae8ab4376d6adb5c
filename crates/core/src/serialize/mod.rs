//! Text forms of compiled patterns.
//!
//! The pattern file handed to the programmer holds one 18 character lowercase
//! hex record per line, in playback order. The tree view is for humans only.

use std::{
    fmt::Write as _,
    io::{BufRead, Write},
    path::Path,
};

use crate::{
    board::{LEDS_PER_BOARD, ROW_WIDTHS},
    codec::{encode_frame, MemoryRecord},
    Frame, PatternError, Result,
};

/// Width of the widest tree row, `rg  rg  rg  rg`.
const TREE_WIDTH: usize = 14;

/// Encodes frames into memory records.
pub fn frames_to_records(frames: &[Frame]) -> Vec<MemoryRecord> {
    frames.iter().map(encode_frame).collect()
}

/// Renders records as newline terminated lines.
pub fn render_records(records: &[MemoryRecord]) -> String {
    let mut out = String::with_capacity(records.len() * 19);
    for record in records {
        let _ = writeln!(out, "{record}");
    }
    out
}

pub fn write_records<W: Write>(mut writer: W, records: &[MemoryRecord]) -> Result<()> {
    writer.write_all(render_records(records).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Writes a pattern file in one go.
pub fn save_records(path: &Path, records: &[MemoryRecord]) -> Result<()> {
    std::fs::write(path, render_records(records))?;
    Ok(())
}

/// Reads a pattern file. Blank lines are skipped.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<MemoryRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = trimmed
            .parse::<MemoryRecord>()
            .map_err(|reason| PatternError::InvalidRecord {
                line: index + 1,
                reason,
            })?;
        records.push(record);
    }
    Ok(records)
}

pub fn load_records(path: &Path) -> Result<Vec<MemoryRecord>> {
    let file = std::fs::File::open(path)?;
    read_records(std::io::BufReader::new(file))
}

/// Renders a frame shaped like the board, one row of bulbs per line, each
/// bulb shown as its two channel digits.
pub fn pretty_frame(frame: &Frame) -> String {
    let mut levels = frame.levels().iter();
    let mut out = String::new();

    for width in ROW_WIDTHS {
        let bulbs: Vec<String> = (0..width)
            .map(|_| {
                levels
                    .by_ref()
                    .take(2)
                    .map(|level| char::from(b'0' + level))
                    .collect()
            })
            .collect();
        let row = bulbs.join("  ");
        let padding = TREE_WIDTH.saturating_sub(row.len()) / 2;
        let _ = writeln!(out, "{}{row}", " ".repeat(padding));
    }

    debug_assert_eq!(ROW_WIDTHS.iter().sum::<usize>() * 2, LEDS_PER_BOARD);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_frame;

    #[test]
    fn renders_one_record_per_line() {
        let frames = vec![Frame::uniform(0).unwrap(), Frame::uniform(7).unwrap()];
        let text = render_records(&frames_to_records(&frames));
        assert_eq!(text, format!("{}\n{}\n", "0".repeat(18), "f".repeat(18)));
    }

    #[test]
    fn reads_back_written_records() {
        let frames = vec![Frame::uniform(3).unwrap(), Frame::uniform(5).unwrap()];
        let records = frames_to_records(&frames);
        let mut buffer = Vec::new();
        write_records(&mut buffer, &records).unwrap();

        let parsed = read_records(buffer.as_slice()).unwrap();
        assert_eq!(parsed, records);
        let decoded: Vec<Frame> = parsed.into_iter().map(decode_frame).collect();
        assert_eq!(decoded, frames);
    }

    #[test]
    fn reports_bad_record_line() {
        let text = format!("{}\n\nnot-a-record\n", "0".repeat(18));
        match read_records(text.as_bytes()) {
            Err(PatternError::InvalidRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn saves_pattern_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pattern.txt");
        let records = frames_to_records(&[Frame::uniform(1).unwrap()]);
        save_records(&path, &records).unwrap();
        assert_eq!(load_records(&path).unwrap(), records);
    }

    #[test]
    fn pretty_view_matches_tree_shape() {
        let levels: [u8; LEDS_PER_BOARD] = [
            7, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 0, 7, 0, 7, 0, 7, 0, 0,
        ];
        let frame = Frame::new(levels, 1).unwrap();
        let expected = "      70\n      00\n    00  00\n  00  00  00\n07  07  07  07\n      00\n";
        assert_eq!(pretty_frame(&frame), expected);
    }
}
