use super::{reader, records, writer};
use crate::domain::account::Account;
use crate::error::Result;
use std::io::{Read, Write};

/// Reads `id;phone;balance|` account records.
pub struct AccountReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AccountReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: reader(source),
        }
    }

    pub fn accounts(self) -> impl Iterator<Item = Result<Account>> {
        records(self.reader)
    }
}

/// Writes accounts as `id;phone;balance|` records.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: writer(sink),
        }
    }

    pub fn write_accounts<I>(&mut self, accounts: I) -> Result<()>
    where
        I: IntoIterator<Item = Account>,
    {
        for account in accounts {
            self.writer.serialize(account)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
