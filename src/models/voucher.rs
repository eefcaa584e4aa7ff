//! Voucher model
//!
//! A voucher is one journal transaction: a date, a description and an
//! ordered list of debit/credit lines against leaf accounts. The voucher
//! and its lines are stored as a single record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, VoucherId};
use super::money::Money;

/// One debit/credit line of a voucher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Leaf account this line posts to
    pub account_id: AccountId,

    /// Debit amount (non-negative)
    pub debit: Money,

    /// Credit amount (non-negative)
    pub credit: Money,
}

impl Entry {
    pub fn new(account_id: AccountId, debit: Money, credit: Money) -> Self {
        Self {
            account_id,
            debit,
            credit,
        }
    }

    /// A debit-only line
    pub fn debit(account_id: AccountId, amount: Money) -> Self {
        Self::new(account_id, amount, Money::zero())
    }

    /// A credit-only line
    pub fn credit(account_id: AccountId, amount: Money) -> Self {
        Self::new(account_id, Money::zero(), amount)
    }

    /// Lines with neither a debit nor a credit are dropped before saving
    pub fn is_blank(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }

    /// Net effect on the account: debit minus credit
    pub fn net(&self) -> Money {
        self.debit - self.credit
    }
}

/// Sum the debit and credit columns of a set of lines
///
/// `None` if either column overflows.
pub fn totals(entries: &[Entry]) -> Option<(Money, Money)> {
    entries
        .iter()
        .try_fold((Money::zero(), Money::zero()), |(debit, credit), entry| {
            Some((
                debit.checked_add(entry.debit)?,
                credit.checked_add(entry.credit)?,
            ))
        })
}

/// A persisted journal voucher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    /// Serial number, gap-free from 1
    pub id: VoucherId,

    /// Posting date
    pub date: NaiveDate,

    /// Free-text narration
    #[serde(default)]
    pub description: String,

    /// Lines, in entry order
    pub entries: Vec<Entry>,

    /// When the voucher was recorded
    pub created_at: DateTime<Utc>,
}

impl Voucher {
    pub fn new(
        id: VoucherId,
        date: NaiveDate,
        description: impl Into<String>,
        entries: Vec<Entry>,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            entries,
            created_at: Utc::now(),
        }
    }

    /// Column totals; `None` only for a voucher that never passed validation
    pub fn totals(&self) -> Option<(Money, Money)> {
        totals(&self.entries)
    }

    pub fn total_debit(&self) -> Money {
        self.totals().map(|(debit, _)| debit).unwrap_or_default()
    }

    pub fn total_credit(&self) -> Money {
        self.totals().map(|(_, credit)| credit).unwrap_or_default()
    }

    /// Debits equal credits and the voucher moves a non-zero amount
    pub fn is_balanced(&self) -> bool {
        matches!(self.totals(), Some((debit, credit)) if debit == credit && debit.is_positive())
    }
}

impl fmt::Display for Voucher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}", self.id, self.date, self.description)
    }
}
