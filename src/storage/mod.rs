//! Storage layer for ledgerbook
//!
//! JSON file storage with atomic writes. The [`Storage`] handle is created
//! once by the entry point and lent to every service and report.

pub mod accounts;
pub mod file_io;
pub mod vouchers;

pub use accounts::AccountRepository;
pub use file_io::{read_json, write_json_atomic};
pub use vouchers::{EntryQuery, EntryRow, VoucherRepository};

use std::collections::HashMap;
use std::sync::PoisonError;

use chrono::NaiveDate;

use crate::config::paths::BookPaths;
use crate::error::BookError;
use crate::models::{AccountId, Money, VoucherId};

/// One voucher line joined with its voucher header and account name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentVoucherRow {
    pub voucher_id: VoucherId,
    pub date: NaiveDate,
    pub description: String,
    pub account_name: String,
    pub debit: Money,
    pub credit: Money,
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BookPaths,
    pub accounts: AccountRepository,
    pub vouchers: VoucherRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: BookPaths) -> Result<Self, BookError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            vouchers: VoucherRepository::new(paths.vouchers_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &BookPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BookError> {
        self.accounts.load()?;
        self.vouchers.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BookError> {
        self.accounts.save()?;
        self.vouchers.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (has a settings file)
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }

    /// The `limit` most recent vouchers, newest first, one row per line
    pub fn query_recent_vouchers(&self, limit: usize) -> Result<Vec<RecentVoucherRow>, BookError> {
        let names: HashMap<AccountId, String> = self
            .accounts
            .query(None)?
            .into_iter()
            .map(|a| (a.id, a.name))
            .collect();

        let rows = self
            .vouchers
            .recent(limit)?
            .into_iter()
            .flat_map(|voucher| {
                voucher
                    .entries
                    .iter()
                    .map(|entry| RecentVoucherRow {
                        voucher_id: voucher.id,
                        date: voucher.date,
                        description: voucher.description.clone(),
                        account_name: names
                            .get(&entry.account_id)
                            .cloned()
                            .unwrap_or_else(|| format!("#{}", entry.account_id)),
                        debit: entry.debit,
                        credit: entry.credit,
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(rows)
    }
}

pub(crate) fn lock_error<T>(e: PoisonError<T>) -> BookError {
    BookError::Storage(format!("Failed to acquire lock: {}", e))
}
