//! TRAP `lent` binary streams
//!
//! Little-endian layout:
//!
//! ```text
//! [4B marker][4B u32 N][4B skip][4*(N+1)B offset table]
//! [N x 60B cp866 name]
//! record*: [8B skip][4B f32 time][(N-1) x 4B f32 value]
//! ```
//!
//! There is no record count. The stream ends with a record whose time equals
//! the previous record's time bit for bit; that sentinel sample is dropped.
//! Reaching end of file without the sentinel is a malformed stream.
//!
//! The format has no magic number, so this decoder must be tried after the
//! text decoders.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::IBM866;
use log::debug;

use super::{Decoder, DecodeError, SourceFormat};
use crate::names::{ensure_unique, normalize_leading, TRAP_DEFAULT_PARAMETERS};
use crate::table::{Column, Table};

/// Width of one fixed-size parameter name field
pub const LENT_NAME_WIDTH: usize = 60;

const FORMAT: SourceFormat = SourceFormat::Lent;

/// Bytes skipped before the time value of every record
const RECORD_PREFIX: u64 = 8;

/// Decoder for TRAP `lent` binary output
#[derive(Debug, Clone, Copy, Default)]
pub struct LentDecoder;

impl LentDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode a LENT stream from any reader
    pub fn decode_reader<R: Read>(&self, mut reader: R) -> Result<Table, DecodeError> {
        let names = read_header(&mut reader)?;
        ensure_unique(&names).map_err(DecodeError::DuplicateColumns)?;

        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
        let mut previous_time: Option<u32> = None;

        loop {
            skip(&mut reader, RECORD_PREFIX).map_err(|e| truncated(&e, columns[0].len()))?;
            let time = reader
                .read_f32::<LittleEndian>()
                .map_err(|e| truncated(&e, columns[0].len()))?;

            if previous_time == Some(time.to_bits()) {
                break;
            }
            previous_time = Some(time.to_bits());

            columns[0].push(f64::from(time));
            for values in columns.iter_mut().skip(1) {
                let value = reader.read_f32::<LittleEndian>().map_err(|e| {
                    DecodeError::MalformedBinaryStream(format!(
                        "record {} is truncated: {e}",
                        values.len()
                    ))
                })?;
                values.push(f64::from(value));
            }
        }

        debug!(
            "LENT: {} parameters, {} records",
            names.len(),
            columns[0].len()
        );
        let columns = names
            .into_iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name, values))
            .collect();
        Table::new(columns).map_err(|e| DecodeError::from_table(FORMAT, e))
    }
}

impl Decoder for LentDecoder {
    fn format(&self) -> SourceFormat {
        FORMAT
    }

    fn try_decode(&self, path: &Path, _encoding: &str) -> Result<Table, DecodeError> {
        let file = File::open(path)?;
        self.decode_reader(BufReader::new(file))
    }
}

/// Read the header up to and including the name block
///
/// Any failure here means the input is not a LENT stream.
fn read_header<R: Read>(reader: &mut R) -> Result<Vec<String>, DecodeError> {
    let header_err = |e: io::Error| DecodeError::mismatch(FORMAT, format!("short header: {e}"));

    skip(reader, 4).map_err(header_err)?;
    let count = reader.read_u32::<LittleEndian>().map_err(header_err)?;
    if count == 0 {
        return Err(DecodeError::mismatch(FORMAT, "parameter count is zero"));
    }
    skip(reader, 4).map_err(header_err)?;
    skip(reader, 4 * (u64::from(count) + 1)).map_err(header_err)?;

    let count = count as usize;
    let mut raw = Vec::with_capacity(count.min(4096));
    let mut field = [0u8; LENT_NAME_WIDTH];
    for _ in 0..count {
        reader.read_exact(&mut field).map_err(header_err)?;
        let (name, _) = IBM866.decode_without_bom_handling(&field);
        raw.push(
            name.trim_matches(|c: char| c.is_whitespace() || c == '\0')
                .to_string(),
        );
    }

    Ok(normalize_leading(&raw, TRAP_DEFAULT_PARAMETERS))
}

fn skip<R: Read>(reader: &mut R, count: u64) -> io::Result<()> {
    let skipped = io::copy(&mut reader.by_ref().take(count), &mut io::sink())?;
    if skipped < count {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("needed {count} bytes, found {skipped}"),
        ));
    }
    Ok(())
}

fn truncated(error: &io::Error, records: usize) -> DecodeError {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        DecodeError::MalformedBinaryStream(format!(
            "stream ended after {records} records without a repeated time sentinel"
        ))
    } else {
        DecodeError::MalformedBinaryStream(error.to_string())
    }
}
