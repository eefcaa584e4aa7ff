//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service and report layers.

pub mod account;
pub mod export;
pub mod report;
pub mod voucher;

pub use account::{handle_account_command, AccountCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};
pub use voucher::{handle_voucher_command, VoucherCommands};

use chrono::{Datelike, NaiveDate};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{BookError, BookResult};

/// Date format accepted on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` argument
pub fn parse_date(value: &str, what: &str) -> BookResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        BookError::Validation(format!(
            "Invalid {} date: '{}'. Use YYYY-MM-DD",
            what, value
        ))
    })
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Resolve an optional from/to pair; defaults to the current month so far
pub fn date_range(from: Option<&str>, to: Option<&str>) -> BookResult<(NaiveDate, NaiveDate)> {
    let today = today();

    let from = match from {
        Some(s) => parse_date(s, "from")?,
        None => NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today),
    };
    let to = match to {
        Some(s) => parse_date(s, "to")?,
        None => today,
    };

    Ok((from, to))
}

/// Open an output file for writing, wrapped in a buffer
pub fn create_output(path: &Path) -> BookResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BookError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
