//! Core data models for ledgerbook
//!
//! The chart of accounts, vouchers with their debit/credit lines, and the
//! supporting id and amount types.

pub mod account;
pub mod ids;
pub mod money;
pub mod voucher;

pub use account::{Account, AccountLevel, AccountValidationError};
pub use ids::{AccountId, VoucherId};
pub use money::{Money, MoneyParseError};
pub use voucher::{Entry, Voucher};
