//! Account service
//!
//! Maintains the chart of accounts: validates level and parent before
//! appending, and answers listing queries for the rest of the book.

use tracing::{info, warn};

use crate::error::{BookError, BookResult};
use crate::models::{Account, AccountId, AccountLevel};
use crate::storage::Storage;

/// Service for the chart of accounts
pub struct AccountService<'a> {
    storage: &'a Storage,
}

/// An account with its children, for tree display
#[derive(Debug, Clone)]
pub struct AccountNode {
    pub account: Account,
    pub children: Vec<AccountNode>,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add an account to the chart
    ///
    /// `level` must be 1, 2 or 3. Level 2 needs an existing level-1 parent
    /// and level 3 an existing level-2 parent. Any parent passed for a
    /// level-1 account is ignored.
    pub fn add_account(
        &self,
        name: &str,
        level: u8,
        parent_id: Option<AccountId>,
    ) -> BookResult<Account> {
        let result = self.validate_new_account(name, level, parent_id);
        let (name, level, parent_id) = match result {
            Ok(valid) => valid,
            Err(e) => {
                if e.is_rejection() {
                    warn!(name, level, error = %e, "account rejected");
                }
                return Err(e);
            }
        };

        let account = self.storage.accounts.create(&name, level, parent_id)?;
        info!(
            account_id = %account.id,
            name = %account.name,
            level = %account.level,
            "account added"
        );

        Ok(account)
    }

    fn validate_new_account(
        &self,
        name: &str,
        level: u8,
        parent_id: Option<AccountId>,
    ) -> BookResult<(String, AccountLevel, Option<AccountId>)> {
        let name = name.trim();
        let level = AccountLevel::from_number(level).ok_or_else(|| {
            BookError::Validation(format!("Account level must be 1, 2 or 3, got {}", level))
        })?;

        let parent_id = match level.parent_level() {
            None => None,
            Some(expected) => {
                let parent_id = parent_id.ok_or_else(|| {
                    BookError::Validation(format!(
                        "Level {} accounts require a level {} parent",
                        level, expected
                    ))
                })?;

                let parent = self.storage.accounts.get(parent_id)?.ok_or_else(|| {
                    BookError::Validation(format!("Parent account {} does not exist", parent_id))
                })?;

                if parent.level != expected {
                    return Err(BookError::Validation(format!(
                        "Parent '{}' is level {}, but level {} accounts need a level {} parent",
                        parent.name, parent.level, level, expected
                    )));
                }

                Some(parent_id)
            }
        };

        if self.storage.accounts.get_by_name(name)?.is_some() {
            return Err(BookError::Validation(format!(
                "An account named '{}' already exists",
                name
            )));
        }

        Account::new(AccountId::first(), name, level, parent_id)
            .validate()
            .map_err(|e| BookError::Validation(e.to_string()))?;

        Ok((name.to_string(), level, parent_id))
    }

    pub fn get(&self, id: AccountId) -> BookResult<Option<Account>> {
        self.storage.accounts.get(id)
    }

    /// Find an account by name (case-insensitive) or numeric id
    pub fn find(&self, identifier: &str) -> BookResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.get_by_name(identifier)? {
            return Ok(Some(account));
        }

        match identifier.parse::<AccountId>() {
            Ok(id) => self.storage.accounts.get(id),
            Err(_) => Ok(None),
        }
    }

    /// All accounts, optionally for one level, in insertion order
    pub fn list_accounts(&self, level: Option<AccountLevel>) -> BookResult<Vec<Account>> {
        self.storage.accounts.query(level)
    }

    /// Postable (level-3) accounts
    pub fn leaf_accounts(&self) -> BookResult<Vec<Account>> {
        self.list_accounts(Some(AccountLevel::Leaf))
    }

    /// The chart as a forest of groups, children in insertion order
    pub fn tree(&self) -> BookResult<Vec<AccountNode>> {
        let accounts = self.list_accounts(None)?;

        fn build(accounts: &[Account], parent: Option<AccountId>) -> Vec<AccountNode> {
            accounts
                .iter()
                .filter(|a| a.parent_id == parent)
                .map(|a| AccountNode {
                    account: a.clone(),
                    children: build(accounts, Some(a.id)),
                })
                .collect()
        }

        Ok(build(&accounts, None))
    }
}
