use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};
use tracing::{debug, warn};

use crate::errors::LedgerError;
use crate::ledger::{Category, Ledger, Movement, MovementKind};

/// Longest store line the reader accepts, in bytes (excluding the line
/// terminator). Anything longer is a malformed record.
pub const MAX_LINE_BYTES: usize = 256;

const FIELD_SEPARATOR: char = ';';
const EXCERPT_BYTES: usize = 64;

/// One store record the loader had to skip, with enough context to locate
/// it in the file.
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    pub line_number: usize,
    pub excerpt: String,
    pub reason: String,
}

/// Result of loading a flat store: the ledger that could be decoded plus
/// the records that could not.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub skipped: Vec<SkippedRecord>,
}

/// Line-oriented persistence for a ledger. Each append is an independent
/// open/write/close cycle; no locking, single-writer discipline assumed.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    path: PathBuf,
}

impl FlatFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends exactly one encoded record line, creating the store (and
    /// its parent directory) if absent. Failure to open the store for
    /// writing is fatal for the operation.
    pub fn append(&self, movement: &Movement) -> Result<(), LedgerError> {
        let line = encode_line(movement)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| {
                    LedgerError::StoreUnavailable {
                        path: self.path.clone(),
                        source,
                    }
                })?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LedgerError::StoreUnavailable {
                path: self.path.clone(),
                source,
            })?;
        writeln!(file, "{line}")?;
        file.flush()?;
        Ok(())
    }

    /// Reads the whole store into a fresh ledger, file order preserved.
    ///
    /// A missing store is not an error: the ledger simply has not been
    /// created yet, so an empty report is returned. Malformed lines —
    /// bad field grammar, invalid UTF-8, or lines over the reader bound —
    /// are skipped and recorded; only genuine IO failures abort the load.
    /// A movement is never built from partially decoded fields.
    pub fn load(&self) -> Result<LoadReport, LedgerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store not found, starting empty");
                return Ok(LoadReport::default());
            }
            Err(source) => {
                return Err(LedgerError::StoreUnavailable {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut reader = BufReader::new(file);
        let mut report = LoadReport::default();
        let mut buf = Vec::new();
        let mut line_number = 0usize;
        loop {
            line_number += 1;
            buf.clear();
            match read_bounded_line(&mut reader, &mut buf)? {
                LineRead::Eof => break,
                LineRead::Overlong => {
                    self.record_skip(
                        &mut report,
                        line_number,
                        &String::from_utf8_lossy(&buf),
                        format!("line exceeds {MAX_LINE_BYTES} bytes"),
                    );
                    continue;
                }
                LineRead::Line => {}
            }
            if buf.is_empty() {
                continue;
            }
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(_) => {
                    self.record_skip(
                        &mut report,
                        line_number,
                        &String::from_utf8_lossy(&buf),
                        "record is not valid UTF-8".to_string(),
                    );
                    continue;
                }
            };
            match decode_line(line) {
                Ok(movement) => report.ledger.append(movement),
                Err(err) => {
                    self.record_skip(&mut report, line_number, line, err.to_string());
                }
            }
        }
        Ok(report)
    }

    fn record_skip(
        &self,
        report: &mut LoadReport,
        line_number: usize,
        content: &str,
        reason: String,
    ) {
        warn!(
            path = %self.path.display(),
            line_number,
            %reason,
            "skipping malformed record"
        );
        report.skipped.push(SkippedRecord {
            line_number,
            excerpt: excerpt(content),
            reason,
        });
    }
}

enum LineRead {
    Eof,
    Line,
    Overlong,
}

/// Reads one line into `buf` with the terminator stripped, pulling at most
/// `MAX_LINE_BYTES + 1` bytes off the reader. A line that does not fit the
/// bound reports [`LineRead::Overlong`] and the remainder of that line is
/// discarded without buffering it.
fn read_bounded_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<LineRead> {
    let limit = MAX_LINE_BYTES as u64 + 1;
    let read = reader.by_ref().take(limit).read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(LineRead::Eof);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        return Ok(LineRead::Line);
    }
    if read == limit as usize {
        discard_rest_of_line(reader)?;
        return Ok(LineRead::Overlong);
    }
    // Final line without a terminator.
    Ok(LineRead::Line)
}

fn discard_rest_of_line<R: BufRead>(reader: &mut R) -> std::io::Result<()> {
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

/// Encodes one movement as a store line:
/// `<kind>;<category>;<amount 2dp>;<unix seconds>;<label>`.
pub fn encode_line(movement: &Movement) -> Result<String, LedgerError> {
    let line = format!(
        "{};{};{:.2};{};{}",
        movement.kind().code(),
        movement.category().code(),
        movement.amount(),
        movement.occurred_at().timestamp(),
        movement.label(),
    );
    if line.len() > MAX_LINE_BYTES {
        return Err(LedgerError::malformed_record(format!(
            "encoded record exceeds {MAX_LINE_BYTES} bytes"
        )));
    }
    Ok(line)
}

/// Decodes one store line into a movement, rejecting anything that does
/// not match the field grammar.
pub fn decode_line(line: &str) -> Result<Movement, LedgerError> {
    if line.len() > MAX_LINE_BYTES {
        return Err(LedgerError::malformed_record(format!(
            "line exceeds {MAX_LINE_BYTES} bytes"
        )));
    }

    let mut fields = line.splitn(5, FIELD_SEPARATOR);
    let kind_code = fields
        .next()
        .ok_or_else(|| LedgerError::malformed_record("missing kind field"))?;
    let category_code = fields
        .next()
        .ok_or_else(|| LedgerError::malformed_record("missing category field"))?;
    let amount_text = fields
        .next()
        .ok_or_else(|| LedgerError::malformed_record("missing amount field"))?;
    let timestamp_text = fields
        .next()
        .ok_or_else(|| LedgerError::malformed_record("missing timestamp field"))?;
    let label = fields
        .next()
        .ok_or_else(|| LedgerError::malformed_record("missing label field"))?;

    let kind = kind_code
        .parse::<u8>()
        .ok()
        .and_then(MovementKind::from_code)
        .ok_or_else(|| {
            LedgerError::malformed_record(format!("unknown movement kind code `{kind_code}`"))
        })?;
    let category = category_code
        .parse::<u8>()
        .ok()
        .and_then(Category::from_code)
        .ok_or_else(|| {
            LedgerError::malformed_record(format!("unknown category code `{category_code}`"))
        })?;
    let amount = amount_text.parse::<f64>().map_err(|_| {
        LedgerError::malformed_record(format!("unparsable amount `{amount_text}`"))
    })?;
    let seconds = timestamp_text.parse::<i64>().map_err(|_| {
        LedgerError::malformed_record(format!("unparsable timestamp `{timestamp_text}`"))
    })?;
    let occurred_at = Local
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| {
            LedgerError::malformed_record(format!("timestamp `{seconds}` out of range"))
        })?;

    Movement::new(kind, category, label, amount, occurred_at)
}

fn excerpt(line: &str) -> String {
    if line.len() <= EXCERPT_BYTES {
        return line.to_string();
    }
    let mut end = EXCERPT_BYTES;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &line[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;

    fn sample_movement() -> Movement {
        Movement::new(
            MovementKind::Loss,
            Category::Food,
            "Lunch at work",
            12.5,
            parse_timestamp("2024-01-05 13:00:00").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn encode_renders_two_decimal_digits_and_codes() {
        let line = encode_line(&sample_movement()).expect("encodable movement");
        let fields: Vec<&str> = line.splitn(5, ';').collect();
        assert_eq!(fields[0], "1");
        assert_eq!(fields[1], "1");
        assert_eq!(fields[2], "12.50");
        assert_eq!(fields[4], "Lunch at work");
    }

    #[test]
    fn decode_inverts_encode() {
        let movement = sample_movement();
        let line = encode_line(&movement).expect("encodable movement");
        let decoded = decode_line(&line).expect("decodable line");
        assert_eq!(decoded, movement);
    }

    #[test]
    fn label_keeps_embedded_separators() {
        let movement = Movement::new(
            MovementKind::Profit,
            Category::Other,
            "refund; partial",
            3.0,
            parse_timestamp("2024-01-05 13:00:00").unwrap(),
        )
        .unwrap();
        let line = encode_line(&movement).unwrap();
        let decoded = decode_line(&line).unwrap();
        assert_eq!(decoded.label(), "refund; partial");
    }

    #[test]
    fn decode_rejects_short_lines_and_bad_codes() {
        for line in [
            "0;1;10.00;1704459600",
            "9;1;10.00;1704459600;label",
            "0;9;10.00;1704459600;label",
            "0;1;ten;1704459600;label",
            "0;1;10.00;later;label",
            "0;1;-5.00;1704459600;label",
        ] {
            assert!(
                matches!(decode_line(line), Err(LedgerError::MalformedRecord { .. })),
                "`{line}` should be rejected"
            );
        }
    }

    #[test]
    fn decode_rejects_overlong_line() {
        let line = format!("0;1;10.00;1704459600;{}", "x".repeat(MAX_LINE_BYTES));
        assert!(matches!(
            decode_line(&line),
            Err(LedgerError::MalformedRecord { .. })
        ));
    }
}
