//! Voucher service
//!
//! Records balanced journal vouchers. A voucher is checked completely
//! before anything is written, and then stored as one record.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{BookError, BookResult};
use crate::models::{voucher::totals, Entry, Voucher, VoucherId};
use crate::storage::{RecentVoucherRow, Storage};

/// Service for voucher management
pub struct VoucherService<'a> {
    storage: &'a Storage,
}

impl<'a> VoucherService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The id the next saved voucher will receive
    pub fn next_id(&self) -> BookResult<VoucherId> {
        Ok(self
            .storage
            .vouchers
            .max_id()?
            .map(|id| id.next())
            .unwrap_or_else(VoucherId::first))
    }

    /// Validate and persist a voucher, returning its id
    ///
    /// Blank lines are dropped. Nothing is written unless the whole voucher
    /// is accepted.
    pub fn save_voucher(
        &self,
        date: NaiveDate,
        description: &str,
        entries: Vec<Entry>,
    ) -> BookResult<VoucherId> {
        let entries = match self.check_voucher(entries) {
            Ok(entries) => entries,
            Err(e) => {
                if e.is_rejection() {
                    warn!(%date, error = %e, "voucher rejected");
                }
                return Err(e);
            }
        };

        let voucher = self
            .storage
            .vouchers
            .create(date, description.trim(), entries)?;

        info!(
            voucher_id = %voucher.id,
            %date,
            lines = voucher.entries.len(),
            total = %voucher.total_debit(),
            "voucher saved"
        );

        Ok(voucher.id)
    }

    fn check_voucher(&self, entries: Vec<Entry>) -> BookResult<Vec<Entry>> {
        if let Some(entry) = entries
            .iter()
            .find(|e| e.debit.is_negative() || e.credit.is_negative())
        {
            return Err(BookError::Validation(format!(
                "Debit and credit must not be negative (account {}: {} / {})",
                entry.account_id, entry.debit, entry.credit
            )));
        }

        let (debit, credit) =
            totals(&entries).ok_or_else(|| BookError::amount_overflow("Voucher total"))?;
        if debit != credit || !debit.is_positive() {
            return Err(BookError::UnbalancedVoucher { debit, credit });
        }

        let entries: Vec<Entry> = entries.into_iter().filter(|e| !e.is_blank()).collect();

        for entry in &entries {
            match self.storage.accounts.get(entry.account_id)? {
                Some(account) if account.is_leaf() => {}
                Some(account) => {
                    return Err(BookError::InvalidAccount(format!(
                        "'{}' is a level {} account; only level 3 accounts can be posted to",
                        account.name, account.level
                    )))
                }
                None => {
                    return Err(BookError::InvalidAccount(format!(
                        "Account {} does not exist",
                        entry.account_id
                    )))
                }
            }
        }

        Ok(entries)
    }

    pub fn get(&self, id: VoucherId) -> BookResult<Voucher> {
        self.storage
            .vouchers
            .get(id)?
            .ok_or_else(|| BookError::voucher_not_found(id.to_string()))
    }

    /// Lines of the `limit` newest vouchers, newest first
    pub fn recent_vouchers(&self, limit: usize) -> BookResult<Vec<RecentVoucherRow>> {
        self.storage.query_recent_vouchers(limit)
    }

    pub fn count(&self) -> BookResult<usize> {
        self.storage.vouchers.count()
    }
}
