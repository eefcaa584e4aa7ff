//! Display formatting for terminal output
//!
//! Report tables are drawn with `tabled`; the chart of accounts also has an
//! indented tree view.

pub mod account;
pub mod report;

pub use account::{format_account_list, format_account_tree};
pub use report::{format_ledger, format_recent_vouchers, format_table, format_trial_balance, format_voucher_details};
