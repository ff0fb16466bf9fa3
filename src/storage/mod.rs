//! Persistence for the movement ledger: a flat, line-oriented text store.

mod flat_file;

pub use flat_file::{
    decode_line, encode_line, FlatFileStore, LoadReport, SkippedRecord, MAX_LINE_BYTES,
};
