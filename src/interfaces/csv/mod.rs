//! Delimited text files for accounts and payments.
//!
//! Records are headerless, fields are separated by `;` and every record is
//! terminated by `|`, e.g. `1;+992000000001;1000|2;+992000000002;0|`.

pub mod account_file;
pub mod payment_file;

use crate::error::{LedgerError, Result};
use serde::de::DeserializeOwned;
use std::io::{Read, Write};

pub(crate) const FIELD_DELIMITER: u8 = b';';
pub(crate) const RECORD_TERMINATOR: u8 = b'|';

pub(crate) fn reader<R: Read>(source: R) -> ::csv::Reader<R> {
    ::csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(FIELD_DELIMITER)
        .terminator(::csv::Terminator::Any(RECORD_TERMINATOR))
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(source)
}

pub(crate) fn writer<W: Write>(sink: W) -> ::csv::Writer<W> {
    ::csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(FIELD_DELIMITER)
        .terminator(::csv::Terminator::Any(RECORD_TERMINATOR))
        .from_writer(sink)
}

/// Deserializes every record lazily. Blank records, such as a trailing newline
/// after the last `|`, are skipped; a malformed record yields an error without
/// ending the iteration.
pub(crate) fn records<R, T>(reader: ::csv::Reader<R>) -> impl Iterator<Item = Result<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    reader
        .into_records()
        .filter(|record| !matches!(record, Ok(fields) if fields.iter().all(str::is_empty)))
        .map(|record| {
            record
                .and_then(|fields| fields.deserialize::<T>(None))
                .map_err(LedgerError::from)
        })
}
