//! Ledger Report
//!
//! Chronological entry history per leaf account over a date window, led by
//! an opening-balance row and carrying a running balance.

use chrono::NaiveDate;
use std::io::Write;
use tracing::debug;

use crate::error::{BookError, BookResult};
use crate::export::csv::write_table_csv;
use crate::models::{Account, AccountId, Money, VoucherId};
use crate::services::AccountService;
use crate::storage::{EntryQuery, Storage};

use super::table::ReportTable;

/// Description used for the synthetic first row of every account ledger
pub const OPENING_BALANCE: &str = "Opening Balance";

/// Which accounts a ledger covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSelector {
    /// Every leaf account, in registry order
    All,
    /// One leaf account
    Account(AccountId),
}

/// A single row of a ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    pub account_name: String,
    /// `None` for the opening-balance row
    pub voucher_id: Option<VoucherId>,
    pub date: NaiveDate,
    pub description: String,
    pub debit: Money,
    pub credit: Money,
    /// Debit minus credit for this row; the opening balance on the first row
    pub balance: Money,
    /// Sum of `balance` over this and all earlier rows
    pub running_balance: Money,
}

impl LedgerRow {
    pub fn is_opening(&self) -> bool {
        self.voucher_id.is_none()
    }
}

/// Ledger for one account
#[derive(Debug, Clone)]
pub struct AccountLedger {
    pub account_id: AccountId,
    pub account_name: String,
    pub opening_balance: Money,
    pub closing_balance: Money,
    /// Debits posted within the window
    pub total_debit: Money,
    /// Credits posted within the window
    pub total_credit: Money,
    /// Opening row first, then entries by date, voucher id and line
    pub rows: Vec<LedgerRow>,
}

impl AccountLedger {
    fn compute(
        storage: &Storage,
        account: &Account,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookResult<Self> {
        let overflow = || BookError::amount_overflow(&format!("Balance of '{}'", account.name));

        let opening_balance = Money::checked_sum(
            storage
                .vouchers
                .query_entries(EntryQuery::for_account(account.id).before(from))?
                .iter()
                .map(|row| row.net()),
        )
        .ok_or_else(overflow)?;

        let window = storage
            .vouchers
            .query_entries(EntryQuery::for_account(account.id).between(from, to))?;

        let mut rows = Vec::with_capacity(window.len() + 1);
        rows.push(LedgerRow {
            account_name: account.name.clone(),
            voucher_id: None,
            date: from,
            description: OPENING_BALANCE.to_string(),
            debit: Money::zero(),
            credit: Money::zero(),
            balance: opening_balance,
            running_balance: opening_balance,
        });

        let mut running_balance = opening_balance;
        let mut total_debit = Money::zero();
        let mut total_credit = Money::zero();
        for entry in window {
            let balance = entry.net();
            running_balance = running_balance.checked_add(balance).ok_or_else(overflow)?;
            total_debit = total_debit.checked_add(entry.debit).ok_or_else(overflow)?;
            total_credit = total_credit.checked_add(entry.credit).ok_or_else(overflow)?;

            rows.push(LedgerRow {
                account_name: account.name.clone(),
                voucher_id: Some(entry.voucher_id),
                date: entry.date,
                description: entry.description,
                debit: entry.debit,
                credit: entry.credit,
                balance,
                running_balance,
            });
        }

        Ok(Self {
            account_id: account.id,
            account_name: account.name.clone(),
            opening_balance,
            closing_balance: running_balance,
            total_debit,
            total_credit,
            rows,
        })
    }
}

/// Ledger Report
#[derive(Debug, Clone)]
pub struct LedgerReport {
    pub selector: AccountSelector,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// One ledger per account, in registry order
    pub ledgers: Vec<AccountLedger>,
}

impl LedgerReport {
    /// Generate a ledger for one leaf account or for all of them
    ///
    /// Opening balances are computed per account. An account with no
    /// entries in the window still gets its opening-balance row.
    pub fn generate(
        storage: &Storage,
        selector: AccountSelector,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BookResult<Self> {
        if from > to {
            return Err(BookError::InvalidDateRange { from, to });
        }

        let account_service = AccountService::new(storage);
        let accounts = match selector {
            AccountSelector::All => account_service.leaf_accounts()?,
            AccountSelector::Account(id) => {
                let account = account_service
                    .get(id)?
                    .ok_or_else(|| BookError::account_not_found(id.to_string()))?;
                if !account.is_leaf() {
                    return Err(BookError::InvalidAccount(format!(
                        "'{}' is a level {} account; ledgers are kept for level 3 accounts",
                        account.name, account.level
                    )));
                }
                vec![account]
            }
        };

        let ledgers = accounts
            .iter()
            .map(|account| AccountLedger::compute(storage, account, from, to))
            .collect::<BookResult<Vec<_>>>()?;

        debug!(
            %from,
            %to,
            accounts = ledgers.len(),
            "ledger generated"
        );

        Ok(Self {
            selector,
            from,
            to,
            ledgers,
        })
    }

    /// All rows, account by account
    pub fn rows(&self) -> impl Iterator<Item = &LedgerRow> {
        self.ledgers.iter().flat_map(|l| l.rows.iter())
    }

    /// Flatten into named columns
    ///
    /// A single-account ledger lists the account after the description; the
    /// all-accounts ledger leads with it.
    pub fn to_table(&self) -> ReportTable {
        let all = self.selector == AccountSelector::All;
        let columns: &[&str] = if all {
            &[
                "account_name",
                "voucher_id",
                "date",
                "description",
                "debit",
                "credit",
                "balance",
                "running_balance",
            ]
        } else {
            &[
                "voucher_id",
                "date",
                "description",
                "account_name",
                "debit",
                "credit",
                "balance",
                "running_balance",
            ]
        };

        let mut table = ReportTable::new(columns.iter().copied());
        for row in self.rows() {
            let voucher_id = row.voucher_id.map(|id| id.to_string()).unwrap_or_default();
            let mut cells = vec![
                voucher_id,
                row.date.to_string(),
                row.description.clone(),
            ];
            if all {
                cells.insert(0, row.account_name.clone());
            } else {
                cells.push(row.account_name.clone());
            }
            cells.extend([
                row.debit.to_string(),
                row.credit.to_string(),
                row.balance.to_string(),
                row.running_balance.to_string(),
            ]);
            table.push_row(cells);
        }

        table
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        for ledger in &self.ledgers {
            output.push_str(&format!("Ledger: {}\n", ledger.account_name));
            output.push_str(&"=".repeat(96));
            output.push('\n');
            output.push_str(&format!("From: {} To: {}\n\n", self.from, self.to));

            output.push_str(&format!(
                "{:<8} {:<12} {:<24} {:>12} {:>12} {:>12} {:>12}\n",
                "Voucher", "Date", "Description", "Debit", "Credit", "Balance", "Running"
            ));
            output.push_str(&"-".repeat(96));
            output.push('\n');

            for row in &ledger.rows {
                let description = if row.description.chars().count() > 22 {
                    format!("{}...", row.description.chars().take(19).collect::<String>())
                } else {
                    row.description.clone()
                };

                output.push_str(&format!(
                    "{:<8} {:<12} {:<24} {:>12} {:>12} {:>12} {:>12}\n",
                    row.voucher_id.map(|id| id.to_string()).unwrap_or_default(),
                    row.date,
                    description,
                    row.debit,
                    row.credit,
                    row.balance,
                    row.running_balance
                ));
            }

            output.push_str(&"-".repeat(96));
            output.push('\n');
            output.push_str(&format!(
                "Opening: {}  |  Debits: {}  |  Credits: {}  |  Closing: {}\n\n",
                ledger.opening_balance,
                ledger.total_debit,
                ledger.total_credit,
                ledger.closing_balance
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> BookResult<()> {
        write_table_csv(&self.to_table(), writer)
    }
}
