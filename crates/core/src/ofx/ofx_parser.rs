//! Line-oriented parser for the flat OFX statement format.
//!
//! OFX 1.x files are SGML-ish: one `<TAG>value` per line, transactions
//! wrapped in `<STMTTRN>`..`</STMTTRN>` blocks. Only the fields the import
//! consumes are extracted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::ofx_model::OfxRecord;

#[derive(Default)]
struct PartialRecord {
    external_id: String,
    amount: Option<Decimal>,
    date: Option<NaiveDate>,
    description: String,
    memo: String,
}

impl PartialRecord {
    fn finish(self) -> Option<OfxRecord> {
        let amount = self.amount.filter(|a| !a.is_zero())?;
        let date = self.date?;
        Some(OfxRecord {
            external_id: self.external_id,
            amount,
            date,
            description: self.description,
            memo: self.memo,
        })
    }
}

/// Parses every complete `<STMTTRN>` block out of `content`. Records
/// without a usable amount or date are dropped.
pub fn parse_ofx(content: &str) -> Vec<OfxRecord> {
    let mut records = Vec::new();
    let mut current: Option<PartialRecord> = None;

    for line in content.lines() {
        let line = line.trim();
        if line == "<STMTTRN>" {
            current = Some(PartialRecord::default());
        } else if line == "</STMTTRN>" {
            if let Some(partial) = current.take() {
                if let Some(record) = partial.finish() {
                    records.push(record);
                }
            }
        } else if let Some(partial) = current.as_mut() {
            if let Some(value) = line.strip_prefix("<TRNAMT>") {
                partial.amount = parse_amount(value);
            } else if let Some(value) = line.strip_prefix("<DTPOSTED>") {
                partial.date = parse_ofx_date(value);
            } else if let Some(value) = line.strip_prefix("<NAME>") {
                partial.description = value.to_string();
            } else if let Some(value) = line.strip_prefix("<MEMO>") {
                partial.memo = value.to_string();
            } else if let Some(value) = line.strip_prefix("<FITID>") {
                partial.external_id = value.trim().to_string();
            }
        }
    }

    records
}

fn parse_amount(value: &str) -> Option<Decimal> {
    // Some banks emit decimal commas.
    let normalized = value.trim().replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// OFX dates are `YYYYMMDD` optionally followed by time and timezone
/// noise; only the calendar date matters here.
fn parse_ofx_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() < 8 {
        return None;
    }
    NaiveDate::parse_from_str(&value[..8], "%Y%m%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = "\
OFXHEADER:100
DATA:OFXSGML
<OFX>
<BANKTRANLIST>
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>20240115120000
<TRNAMT>-42.50
<FITID>TX-001
<NAME>PADARIA CENTRAL
<MEMO>Compra no debito
</STMTTRN>
<STMTTRN>
<TRNTYPE>CREDIT
<DTPOSTED>20240116
<TRNAMT>1500.00
<FITID>TX-002
<NAME>TED RECEBIDA
</STMTTRN>
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>bogus
<TRNAMT>-1.00
<FITID>TX-003
</STMTTRN>
</BANKTRANLIST>
</OFX>
";

    #[test]
    fn parses_complete_blocks() {
        let records = parse_ofx(SAMPLE);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].external_id, "TX-001");
        assert_eq!(records[0].amount, dec!(-42.50));
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(records[0].description, "PADARIA CENTRAL");
        assert_eq!(records[0].memo, "Compra no debito");

        assert_eq!(records[1].external_id, "TX-002");
        assert_eq!(records[1].amount, dec!(1500.00));
    }

    #[test]
    fn drops_records_without_date_or_amount() {
        // TX-003 has an unparseable date and must be dropped.
        let records = parse_ofx(SAMPLE);
        assert!(records.iter().all(|r| r.external_id != "TX-003"));
    }

    #[test]
    fn accepts_decimal_comma_amounts() {
        let content = "<STMTTRN>\n<DTPOSTED>20240201\n<TRNAMT>-12,34\n<FITID>X\n</STMTTRN>\n";
        let records = parse_ofx(content);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, dec!(-12.34));
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_ofx("").is_empty());
    }
}
