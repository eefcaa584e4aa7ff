//! JSON Export functionality
//!
//! Exports the whole book to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::Write;

use crate::error::{BookError, BookResult};
use crate::models::{Account, AccountLevel, Voucher};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full book export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Chart of accounts, in registry order
    pub accounts: Vec<Account>,

    /// All vouchers with their entries, in id order
    pub vouchers: Vec<Voucher>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub account_count: usize,
    pub voucher_count: usize,
    pub entry_count: usize,

    /// Earliest voucher date
    pub earliest_voucher: Option<String>,

    /// Latest voucher date
    pub latest_voucher: Option<String>,
}

impl BookExport {
    /// Snapshot the book
    pub fn from_storage(storage: &Storage) -> BookResult<Self> {
        let accounts = storage.accounts.query(None)?;
        let vouchers = storage.vouchers.get_all()?;

        let metadata = ExportMetadata {
            account_count: accounts.len(),
            voucher_count: vouchers.len(),
            entry_count: vouchers.iter().map(|v| v.entries.len()).sum(),
            earliest_voucher: vouchers.iter().map(|v| v.date).min().map(|d| d.to_string()),
            latest_voucher: vouchers.iter().map(|v| v.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            accounts,
            vouchers,
            metadata,
        })
    }

    /// Check schema version, hierarchy and voucher integrity
    ///
    /// Applies the same rules a live book enforces on save: unique ids,
    /// correct parent levels, and balanced vouchers of non-negative lines
    /// posted to level 3 accounts.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let levels: HashMap<_, _> = self.accounts.iter().map(|a| (a.id, a.level)).collect();
        if levels.len() != self.accounts.len() {
            return Err("Duplicate account id".to_string());
        }

        for account in &self.accounts {
            account.validate().map_err(|e| format!("Account {}: {}", account.id, e))?;

            if let (Some(parent), Some(expected)) = (account.parent_id, account.level.parent_level()) {
                match levels.get(&parent) {
                    Some(level) if *level == expected => {}
                    Some(level) => {
                        return Err(format!(
                            "Account {} (level {}) has a level {} parent {}",
                            account.id, account.level, level, parent
                        ))
                    }
                    None => {
                        return Err(format!(
                            "Account {} references unknown parent {}",
                            account.id, parent
                        ))
                    }
                }
            }
        }

        let mut voucher_ids = HashSet::new();
        for voucher in &self.vouchers {
            if !voucher_ids.insert(voucher.id) {
                return Err(format!("Duplicate voucher id {}", voucher.id));
            }

            if let Some(entry) = voucher
                .entries
                .iter()
                .find(|e| e.debit.is_negative() || e.credit.is_negative())
            {
                return Err(format!(
                    "Voucher {} has a negative amount on account {}",
                    voucher.id, entry.account_id
                ));
            }

            if !voucher.is_balanced() {
                return Err(format!(
                    "Voucher {} is unbalanced: debit {} credit {}",
                    voucher.id,
                    voucher.total_debit(),
                    voucher.total_credit()
                ));
            }

            for entry in &voucher.entries {
                if levels.get(&entry.account_id) != Some(&AccountLevel::Leaf) {
                    return Err(format!(
                        "Voucher {} posts to {}, which is not a level 3 account",
                        voucher.id, entry.account_id
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Export the full book to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> BookResult<()> {
    let export = BookExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BookError::Export(e.to_string()))?;

    Ok(())
}

/// Parse a JSON export and check it against the book's rules
///
/// The storage is not touched; the caller decides what to do with the result.
pub fn parse_json_export(json_str: &str) -> BookResult<BookExport> {
    let export: BookExport =
        serde_json::from_str(json_str).map_err(|e| BookError::Export(e.to_string()))?;

    export.validate().map_err(BookError::Export)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BookPaths;
    use crate::models::{Entry, Money};
    use crate::services::{AccountService, VoucherService};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn populate(storage: &Storage) {
        let accounts = AccountService::new(storage);
        let assets = accounts.add_account("Assets", 1, None).unwrap();
        let current = accounts.add_account("Current Assets", 2, Some(assets.id)).unwrap();
        let cash = accounts.add_account("Cash", 3, Some(current.id)).unwrap();
        let bank = accounts.add_account("Bank", 3, Some(current.id)).unwrap();

        VoucherService::new(storage)
            .save_voucher(
                NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                "Withdrawal",
                vec![
                    Entry::debit(cash.id, Money::from_units(20)),
                    Entry::credit(bank.id, Money::from_units(20)),
                ],
            )
            .unwrap();
    }

    #[test]
    fn test_json_export() {
        let (_temp_dir, storage) = create_test_storage();
        populate(&storage);

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, true).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("\"schema_version\": \"1.0.0\""));
        assert!(text.contains("Current Assets"));
        assert!(text.contains("Withdrawal"));
    }

    #[test]
    fn test_json_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        populate(&storage);

        let mut output = Vec::new();
        export_full_json(&storage, &mut output, false).unwrap();

        let imported = parse_json_export(&String::from_utf8(output).unwrap()).unwrap();
        assert_eq!(imported.accounts.len(), 4);
        assert_eq!(imported.vouchers.len(), 1);
        assert_eq!(imported.metadata.entry_count, 2);
        assert_eq!(imported.metadata.earliest_voucher.as_deref(), Some("2024-01-10"));
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let mut export = BookExport::from_storage(&storage).unwrap();
        export.schema_version = "0.1.0".to_string();

        let text = serde_json::to_string(&export).unwrap();
        let result = parse_json_export(&text);
        assert!(matches!(result, Err(BookError::Export(_))));
    }

    #[test]
    fn test_unbalanced_voucher_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        populate(&storage);

        let mut export = BookExport::from_storage(&storage).unwrap();
        export.vouchers[0].entries[0].debit = Money::from_units(21);
        assert!(export.validate().unwrap_err().contains("unbalanced"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        populate(&storage);

        let mut export = BookExport::from_storage(&storage).unwrap();
        export.vouchers[0].entries[0].debit = Money::from_units(-20);
        export.vouchers[0].entries[1].credit = Money::from_units(-20);
        assert!(export.validate().unwrap_err().contains("negative amount"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        populate(&storage);

        let mut export = BookExport::from_storage(&storage).unwrap();
        let copy = export.vouchers[0].clone();
        export.vouchers.push(copy);
        assert!(export.validate().unwrap_err().contains("Duplicate voucher id 1"));

        let mut export = BookExport::from_storage(&storage).unwrap();
        let copy = export.accounts[0].clone();
        export.accounts.push(copy);
        assert_eq!(export.validate().unwrap_err(), "Duplicate account id");
    }

    #[test]
    fn test_entry_on_group_account_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        populate(&storage);

        let mut export = BookExport::from_storage(&storage).unwrap();
        let group = export.accounts[1].id;
        export.vouchers[0].entries[0].account_id = group;
        assert!(export.validate().is_err());
    }
}
