use super::{reader, records, writer};
use crate::domain::payment::Payment;
use crate::error::Result;
use std::io::{Read, Write};

/// Reads `id;account_id;amount;category;status|` payment records.
///
/// Wraps `csv::Reader` configured for the wallet's delimited layout and yields
/// payments one at a time, so large exports are never loaded as raw text.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: reader(source),
        }
    }

    pub fn payments(self) -> impl Iterator<Item = Result<Payment>> {
        records(self.reader)
    }
}

/// Writes payments as `id;account_id;amount;category;status|` records.
pub struct PaymentWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: writer(sink),
        }
    }

    pub fn write_payments<'a, I>(&mut self, payments: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Payment>,
    {
        for payment in payments {
            self.writer.serialize(payment)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::Money;
    use crate::domain::payment::PaymentStatus;
    use crate::error::LedgerError;

    fn payment(id: &str, amount: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: id.to_string(),
            account_id: 7,
            amount: Money::new(amount),
            category: "auto".to_string(),
            status,
        }
    }

    #[test]
    fn test_write_payments_layout() {
        let mut buf = Vec::new();
        let payments = [
            payment("a", 100, PaymentStatus::InProgress),
            payment("b", 0, PaymentStatus::Fail),
        ];

        PaymentWriter::new(&mut buf).write_payments(&payments).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "a;7;100;auto;INPROGRESS|b;7;0;auto;FAIL|"
        );
    }

    #[test]
    fn test_read_payments_trims_fields() {
        let data = "a; 7; 100; auto; INPROGRESS|b;7;-3;cafe;FAIL|";
        let payments: Vec<Payment> = PaymentReader::new(data.as_bytes())
            .payments()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(payments[0], payment("a", 100, PaymentStatus::InProgress));
        assert_eq!(payments[1].amount, Money::new(-3));
        assert_eq!(payments[1].category, "cafe");
        assert_eq!(payments[1].status, PaymentStatus::Fail);
    }

    #[test]
    fn test_trailing_newline_after_last_record_is_ignored() {
        let data = "a;7;100;auto;INPROGRESS|b;7;0;auto;FAIL|\n";
        let payments: Vec<Payment> = PaymentReader::new(data.as_bytes())
            .payments()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(payments.len(), 2);
        assert_eq!(payments[1], payment("b", 0, PaymentStatus::Fail));
    }

    #[test]
    fn test_short_record_is_an_error() {
        let data = "a;7;100|b;7;0;auto;FAIL|";
        let results: Vec<Result<Payment>> =
            PaymentReader::new(data.as_bytes()).payments().collect();

        assert_eq!(results.len(), 2);
        assert!(matches!(results[0], Err(LedgerError::CsvError(_))));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_read_unknown_status() {
        let data = "a;7;100;auto;PENDING|";
        let results: Vec<Result<Payment>> =
            PaymentReader::new(data.as_bytes()).payments().collect();
        assert!(matches!(results[0], Err(LedgerError::CsvError(_))));
    }
}
