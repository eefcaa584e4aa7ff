//! ledgerbook - double-entry bookkeeping core
//!
//! Keeps a three-level chart of accounts, records balanced vouchers and
//! derives ledgers and trial balances from the recorded entries.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Diagnostic logging setup
//! - `models`: Accounts, vouchers, ids and money
//! - `storage`: JSON file storage layer
//! - `services`: Chart of accounts and voucher book
//! - `reports`: Ledger and trial balance
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use ledgerbook::config::paths::BookPaths;
//! use ledgerbook::reports::{AccountSelector, LedgerReport};
//! use ledgerbook::storage::Storage;
//!
//! let mut storage = Storage::new(BookPaths::new()?)?;
//! storage.load_all()?;
//! let report = LedgerReport::generate(&storage, AccountSelector::All, from, to)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BookError, BookResult};
