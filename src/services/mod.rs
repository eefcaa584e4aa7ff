//! Service layer for ledgerbook
//!
//! Services validate requests against the chart of accounts and the
//! voucher book before anything reaches storage.

pub mod account;
pub mod voucher;

pub use account::{AccountNode, AccountService};
pub use voucher::VoucherService;
