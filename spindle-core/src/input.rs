//! Request trace parsing.
//!
//! A trace holds one request per line as `arrival_time track`. Lines starting
//! with `#` are comments; blank lines are ignored. Arrival times must be
//! non-decreasing because the engine consumes requests in file order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::request::IoRequest;

/// Errors that can occur while reading a request trace.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: arrival time {arrival_time} is earlier than previous arrival {previous}")]
    UnsortedArrival {
        line: usize,
        arrival_time: u64,
        previous: u64,
    },

    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a request trace from any buffered reader.
///
/// # Errors
///
/// - `InputError::MissingField` - A data line has fewer than two fields
/// - `InputError::InvalidNumber` - A field is not a non-negative integer in range
/// - `InputError::UnsortedArrival` - Arrival times decrease
/// - `InputError::Io` - The reader failed
pub fn parse_requests(reader: impl BufRead) -> Result<Vec<IoRequest>, InputError> {
    let mut requests = Vec::new();
    let mut previous_arrival = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split_whitespace();
        let arrival_time: u64 = parse_field(fields.next(), line_number, "arrival time")?;
        let track: u32 = parse_field(fields.next(), line_number, "track")?;

        if arrival_time < previous_arrival {
            return Err(InputError::UnsortedArrival {
                line: line_number,
                arrival_time,
                previous: previous_arrival,
            });
        }
        previous_arrival = arrival_time;

        requests.push(IoRequest::new(arrival_time, track));
    }

    tracing::debug!("Parsed {} requests", requests.len());
    Ok(requests)
}

/// Loads a request trace from a file.
///
/// # Errors
///
/// - `SpindleError::Io` - The file could not be opened
/// - `SpindleError::Input` - The file contents are malformed
pub fn load_requests(path: &Path) -> crate::Result<Vec<IoRequest>> {
    let file = File::open(path)?;
    tracing::debug!("Loading requests from {}", path.display());
    Ok(parse_requests(BufReader::new(file))?)
}

fn parse_field<T: std::str::FromStr>(
    field: Option<&str>,
    line: usize,
    name: &'static str,
) -> Result<T, InputError> {
    let value = field.ok_or(InputError::MissingField { line, field: name })?;
    value.parse().map_err(|_| InputError::InvalidNumber {
        line,
        field: name,
        value: value.to_string(),
    })
}
