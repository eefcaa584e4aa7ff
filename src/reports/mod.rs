//! Reports module for ledgerbook
//!
//! Ledgers and trial balances derived from the voucher book. Each report
//! can render itself for the terminal and flatten into a [`ReportTable`]
//! for export.

pub mod ledger;
pub mod table;
pub mod trial_balance;

pub use ledger::{AccountLedger, AccountSelector, LedgerReport, LedgerRow, OPENING_BALANCE};
pub use table::ReportTable;
pub use trial_balance::{TrialBalanceReport, TrialBalanceRow};

use crate::storage::RecentVoucherRow;

/// Recent voucher lines as a table
pub fn recent_vouchers_table(rows: &[RecentVoucherRow]) -> ReportTable {
    let mut table = ReportTable::new([
        "voucher_id",
        "date",
        "description",
        "account",
        "debit",
        "credit",
    ]);
    for row in rows {
        table.push_row(vec![
            row.voucher_id.to_string(),
            row.date.to_string(),
            row.description.clone(),
            row.account_name.clone(),
            row.debit.to_string(),
            row.credit.to_string(),
        ]);
    }
    table
}
