//! Telemetry records emitted by the simulation harness.
//!
//! A recording is a stream of length-prefixed bincode records: one
//! [`Record::Header`] followed by one [`Record::Frame`] per control tick.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on a single encoded record.
pub const MAX_RECORD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThrusterRecord {
    pub force: f64,
    pub torque: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub tick: u64,
    pub time: f64,
    pub stabilization: bool,
    pub pose: PoseRecord,
    /// Front-right, front-left, rear-left, rear-right.
    pub vertical: [ThrusterRecord; 4],
    /// Right, left.
    pub horizontal: [ThrusterRecord; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Header { time_step: f64, manual: bool, gyro: bool },
    Frame(TelemetryFrame),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("encode failed: {0}")]
    Encode(#[source] bincode::Error),
    #[error("decode failed: {0}")]
    Decode(#[source] bincode::Error),
    #[error("record of {0} bytes exceeds the {max} byte limit", max = MAX_RECORD_BYTES)]
    TooLarge(usize),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

pub fn encode(record: &Record) -> Result<Vec<u8>, ProtocolError> {
    bincode::serialize(record).map_err(ProtocolError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<Record, ProtocolError> {
    bincode::deserialize(bytes).map_err(ProtocolError::Decode)
}

/// Write one record with a little-endian `u32` length prefix.
pub fn write_record<W: Write + ?Sized>(out: &mut W, record: &Record) -> Result<(), ProtocolError> {
    let bytes = encode(record)?;
    if bytes.len() > MAX_RECORD_BYTES {
        return Err(ProtocolError::TooLarge(bytes.len()));
    }
    out.write_all(&(bytes.len() as u32).to_le_bytes())?;
    out.write_all(&bytes)?;
    Ok(())
}

/// Read the next record. `Ok(None)` on a clean end of stream; a stream cut
/// inside a record is an error.
pub fn read_record<R: Read + ?Sized>(input: &mut R) -> Result<Option<Record>, ProtocolError> {
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        match input.read(&mut len_buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    let len = u32::from_le_bytes(len_buf) as usize;
    if len > MAX_RECORD_BYTES {
        return Err(ProtocolError::TooLarge(len));
    }
    let mut bytes = vec![0u8; len];
    input.read_exact(&mut bytes)?;
    decode(&bytes).map(Some)
}
