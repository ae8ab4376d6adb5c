//! Byte protocol used to write pattern memory over a serial link.
//!
//! ```text
//! host:  'm' <mode>                      board: <mode>
//! host:  'w' <addr> <9 record bytes>     board: 'o' <addr> <9 record bytes> 'd'
//! ```
//!
//! The stream is expected to be an already configured serial device
//! (115200 baud, 8N1).

use std::io::{Read, Write};

use crate::{
    board::MEMORY_RECORDS,
    codec::{MemoryRecord, RECORD_BYTES},
    PatternError, Result,
};

const MODE_COMMAND: u8 = b'm';
const WRITE_COMMAND: u8 = b'w';
const ACK: u8 = b'o';
const DONE: u8 = b'd';

/// Drives the upload handshake over any byte stream.
#[derive(Debug)]
pub struct Programmer<T> {
    port: T,
}

impl<T: Read + Write> Programmer<T> {
    pub fn new(port: T) -> Self {
        Self { port }
    }

    pub fn into_inner(self) -> T {
        self.port
    }

    /// Switches the board's display mode.
    pub fn set_mode(&mut self, mode: u8) -> Result<()> {
        self.port.write_all(&[MODE_COMMAND, mode])?;
        self.port.flush()?;
        let echo = self.read_byte()?;
        if echo != mode {
            return Err(PatternError::Protocol(format!(
                "mode {mode} echoed back as {echo}"
            )));
        }
        Ok(())
    }

    /// Writes one record to the given memory slot.
    pub fn write_record(&mut self, address: u8, record: MemoryRecord) -> Result<()> {
        let bytes = record.to_bytes();
        let mut packet = Vec::with_capacity(2 + RECORD_BYTES);
        packet.push(WRITE_COMMAND);
        packet.push(address);
        packet.extend_from_slice(&bytes);
        self.port.write_all(&packet)?;
        self.port.flush()?;

        let ack = self.read_byte()?;
        if ack != ACK {
            return Err(PatternError::Protocol(format!(
                "slot {address}: expected ack, got {ack:#04x}"
            )));
        }

        let address_back = self.read_byte()?;
        if address_back != address {
            return Err(PatternError::Protocol(format!(
                "slot {address}: board confirmed slot {address_back}"
            )));
        }

        let mut echo = [0u8; RECORD_BYTES];
        self.port.read_exact(&mut echo)?;
        for (index, (sent, got)) in bytes.iter().zip(echo.iter()).enumerate() {
            if sent != got {
                tracing::warn!(slot = address, byte = index, sent, got, "record byte echoed differently");
            }
        }

        let done = self.read_byte()?;
        if done != DONE {
            return Err(PatternError::Protocol(format!(
                "slot {address}: expected done, got {done:#04x}"
            )));
        }
        Ok(())
    }

    /// Selects `mode` and writes every record, starting at slot 0.
    pub fn upload(&mut self, mode: u8, records: &[MemoryRecord]) -> Result<()> {
        if records.len() > MEMORY_RECORDS {
            return Err(PatternError::msg(format!(
                "{} records do not fit in {MEMORY_RECORDS} memory slots",
                records.len()
            )));
        }

        self.set_mode(mode)?;
        for (address, record) in (0..=u8::MAX).zip(records) {
            self.write_record(address, *record)?;
        }
        tracing::info!(records = records.len(), "pattern uploaded");
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.port.read_exact(&mut byte)?;
        Ok(byte[0])
    }
}
