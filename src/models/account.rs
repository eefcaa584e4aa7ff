//! Account model
//!
//! Accounts form a three-level chart: groups (level 1) contain sub-groups
//! (level 2) which contain leaf accounts (level 3). Only leaf accounts can
//! be posted to. Accounts are append-only once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;

/// Position of an account in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AccountLevel {
    /// Level 1, top of the tree (e.g. "Assets")
    Group,
    /// Level 2, child of a group (e.g. "Current Assets")
    SubGroup,
    /// Level 3, postable account (e.g. "Cash")
    Leaf,
}

impl AccountLevel {
    /// All levels, top-down
    pub fn all() -> [Self; 3] {
        [Self::Group, Self::SubGroup, Self::Leaf]
    }

    /// Convert from the numeric level (1, 2 or 3)
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Group),
            2 => Some(Self::SubGroup),
            3 => Some(Self::Leaf),
            _ => None,
        }
    }

    /// The numeric level (1, 2 or 3)
    pub fn number(&self) -> u8 {
        match self {
            Self::Group => 1,
            Self::SubGroup => 2,
            Self::Leaf => 3,
        }
    }

    /// The level a parent must have, or None for top-level accounts
    pub fn parent_level(&self) -> Option<Self> {
        match self {
            Self::Group => None,
            Self::SubGroup => Some(Self::Group),
            Self::Leaf => Some(Self::SubGroup),
        }
    }

    /// Whether vouchers may post to accounts at this level
    pub fn is_postable(&self) -> bool {
        matches!(self, Self::Leaf)
    }
}

impl TryFrom<u8> for AccountLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::from_number(level)
            .ok_or_else(|| format!("account level must be 1, 2 or 3, got {}", level))
    }
}

impl From<AccountLevel> for u8 {
    fn from(level: AccountLevel) -> Self {
        level.number()
    }
}

impl fmt::Display for AccountLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// An account in the chart of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, assigned by storage
    pub id: AccountId,

    /// Display name (e.g. "Cash")
    pub name: String,

    /// Level in the chart
    pub level: AccountLevel,

    /// Parent account; always None for level-1 accounts
    #[serde(default)]
    pub parent_id: Option<AccountId>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account record
    ///
    /// A level-1 account never carries a parent, whatever the caller passed.
    pub fn new(
        id: AccountId,
        name: impl Into<String>,
        level: AccountLevel,
        parent_id: Option<AccountId>,
    ) -> Self {
        let parent_id = match level {
            AccountLevel::Group => None,
            _ => parent_id,
        };

        Self {
            id,
            name: name.into(),
            level,
            parent_id,
            created_at: Utc::now(),
        }
    }

    /// Whether vouchers may post to this account
    pub fn is_leaf(&self) -> bool {
        self.level.is_postable()
    }

    /// Validate fields that don't depend on other accounts
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        match (self.level.parent_level(), self.parent_id) {
            (None, Some(_)) => Err(AccountValidationError::UnexpectedParent),
            (Some(_), None) => Err(AccountValidationError::MissingParent(self.level)),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (level {})", self.name, self.level)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    MissingParent(AccountLevel),
    UnexpectedParent,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::MissingParent(level) => {
                write!(f, "Level {} accounts require a parent account", level)
            }
            Self::UnexpectedParent => write!(f, "Level 1 accounts cannot have a parent"),
        }
    }
}

impl std::error::Error for AccountValidationError {}
