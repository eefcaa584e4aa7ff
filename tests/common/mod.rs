#![allow(dead_code)]

use chrono::NaiveDate;
use ledgerbook::config::paths::BookPaths;
use ledgerbook::models::{AccountId, Entry, Money, VoucherId};
use ledgerbook::services::{AccountService, VoucherService};
use ledgerbook::storage::Storage;
use tempfile::TempDir;

/// A book on disk that lives as long as the value
pub struct TestBook {
    pub dir: TempDir,
    pub storage: Storage,
}

impl TestBook {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = open_storage(&dir);
        Self { dir, storage }
    }

    /// Reload from disk into a fresh handle
    pub fn reopen(&self) -> Storage {
        open_storage(&self.dir)
    }

    pub fn accounts(&self) -> AccountService<'_> {
        AccountService::new(&self.storage)
    }

    pub fn vouchers(&self) -> VoucherService<'_> {
        VoucherService::new(&self.storage)
    }

    /// Assets > Current Assets > {Cash, Bank}; Equity > Owners Equity > Capital
    pub fn with_chart() -> (Self, Chart) {
        let book = Self::new();
        let accounts = book.accounts();

        let assets = accounts.add_account("Assets", 1, None).unwrap();
        let current = accounts
            .add_account("Current Assets", 2, Some(assets.id))
            .unwrap();
        let cash = accounts.add_account("Cash", 3, Some(current.id)).unwrap();
        let bank = accounts.add_account("Bank", 3, Some(current.id)).unwrap();
        let equity = accounts.add_account("Equity", 1, None).unwrap();
        let owners = accounts
            .add_account("Owners Equity", 2, Some(equity.id))
            .unwrap();
        let capital = accounts.add_account("Capital", 3, Some(owners.id)).unwrap();

        let chart = Chart {
            assets: assets.id,
            current: current.id,
            cash: cash.id,
            bank: bank.id,
            capital: capital.id,
        };
        (book, chart)
    }

    /// Save a two-line voucher moving `units` from `credit` to `debit`
    pub fn post(&self, on: NaiveDate, debit: AccountId, credit: AccountId, units: i64) -> VoucherId {
        self.vouchers()
            .save_voucher(
                on,
                "posting",
                vec![
                    Entry::debit(debit, Money::from_units(units)),
                    Entry::credit(credit, Money::from_units(units)),
                ],
            )
            .expect("Failed to save voucher")
    }
}

pub struct Chart {
    pub assets: AccountId,
    pub current: AccountId,
    pub cash: AccountId,
    pub bank: AccountId,
    pub capital: AccountId,
}

pub fn open_storage(dir: &TempDir) -> Storage {
    let paths = BookPaths::with_base_dir(dir.path().to_path_buf());
    let mut storage = Storage::new(paths).expect("Failed to create storage");
    storage.load_all().expect("Failed to load storage");
    storage
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
