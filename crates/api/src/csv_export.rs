// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of the general ledger.

use thiserror::Error;

use crate::request_response::{LedgerLineInfo, LedgerResponse};

/// Column headers of the exported ledger.
pub const LEDGER_CSV_HEADERS: [&str; 7] = [
    "date",
    "reference",
    "description",
    "debit",
    "credit",
    "signed_amount",
    "balance",
];

/// CSV export errors.
#[derive(Debug, Error)]
pub enum CsvExportError {
    /// A record could not be written.
    #[error("Failed to write CSV record: {0}")]
    Write(#[from] csv::Error),

    /// The writer could not be flushed into its buffer.
    #[error("Failed to flush CSV output: {0}")]
    Flush(#[from] std::io::Error),

    /// The output was not valid UTF-8.
    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Renders a ledger report as CSV.
///
/// The first data row carries the opening balance and the last one the
/// period totals and closing balance.
///
/// # Errors
///
/// Returns an error if a record cannot be written.
pub fn ledger_to_csv(ledger: &LedgerResponse) -> Result<String, CsvExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(LEDGER_CSV_HEADERS)?;

    writer.write_record([
        ledger.from.as_deref().unwrap_or(""),
        "",
        "Opening balance",
        "",
        "",
        "",
        ledger.opening_balance.as_str(),
    ])?;

    for line in &ledger.lines {
        let LedgerLineInfo {
            date,
            reference,
            description,
            debit,
            credit,
            signed_amount,
            balance,
            ..
        } = line;
        writer.write_record([
            date,
            reference,
            description,
            debit,
            credit,
            signed_amount,
            balance,
        ])?;
    }

    writer.write_record([
        ledger.to.as_deref().unwrap_or(""),
        "",
        "Closing balance",
        ledger.total_debit.as_str(),
        ledger.total_credit.as_str(),
        "",
        ledger.closing_balance.as_str(),
    ])?;

    let bytes: Vec<u8> = writer.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}
