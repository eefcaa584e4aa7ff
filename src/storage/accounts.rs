//! Account repository for JSON storage
//!
//! Keeps the chart of accounts in insertion order and persists it to
//! accounts.json. Accounts are only ever appended.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BookError;
use crate::models::{Account, AccountId, AccountLevel};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// Serializable account data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<Vec<Account>>,
}

impl AccountRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), BookError> {
        let mut file_data: AccountData = read_json(&self.path)?;
        file_data.accounts.sort_by_key(|a| a.id);

        let mut data = self.data.write().map_err(lock_error)?;
        *data = file_data.accounts;

        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), BookError> {
        let data = self.data.read().map_err(lock_error)?;
        self.persist(&data)
    }

    fn persist(&self, accounts: &[Account]) -> Result<(), BookError> {
        let file_data = AccountData {
            accounts: accounts.to_vec(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Append a new account with the next free id and persist it
    ///
    /// The in-memory copy is rolled back if the file write fails, so memory
    /// and disk never disagree.
    pub fn create(
        &self,
        name: &str,
        level: AccountLevel,
        parent_id: Option<AccountId>,
    ) -> Result<Account, BookError> {
        let mut data = self.data.write().map_err(lock_error)?;

        let id = data
            .iter()
            .map(|a| a.id)
            .max()
            .map(|max| max.next())
            .unwrap_or_else(AccountId::first);

        let account = Account::new(id, name, level, parent_id);
        data.push(account.clone());

        if let Err(e) = self.persist(&data) {
            data.pop();
            return Err(e);
        }

        Ok(account)
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Result<Option<Account>, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.iter().find(|a| a.id == id).cloned())
    }

    /// Get an account by name (case-insensitive); the earliest match wins
    pub fn get_by_name(&self, name: &str) -> Result<Option<Account>, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        let name_lower = name.trim().to_lowercase();
        Ok(data
            .iter()
            .find(|a| a.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// All accounts, optionally restricted to one level, in insertion order
    pub fn query(&self, level: Option<AccountLevel>) -> Result<Vec<Account>, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .iter()
            .filter(|a| level.map_or(true, |l| a.level == l))
            .cloned()
            .collect())
    }

    pub fn count(&self) -> Result<usize, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
