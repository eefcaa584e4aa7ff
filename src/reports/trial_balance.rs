//! Trial Balance Report
//!
//! Debit and credit totals per account over a date window.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Write;
use tracing::debug;

use crate::error::{BookError, BookResult};
use crate::export::csv::write_table_csv;
use crate::models::{AccountId, Money};
use crate::services::AccountService;
use crate::storage::{EntryQuery, Storage};

use super::table::ReportTable;

/// Totals for one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialBalanceRow {
    pub account_id: AccountId,
    pub account_name: String,
    pub total_debit: Money,
    pub total_credit: Money,
    /// total_debit - total_credit
    pub balance: Money,
}

/// Trial Balance Report
#[derive(Debug, Clone)]
pub struct TrialBalanceReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Accounts with at least one entry in the window, in registry order
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: Money,
    pub total_credit: Money,
}

impl TrialBalanceReport {
    /// Generate a trial balance for entries dated within `[from, to]`
    pub fn generate(storage: &Storage, from: NaiveDate, to: NaiveDate) -> BookResult<Self> {
        if from > to {
            return Err(BookError::InvalidDateRange { from, to });
        }

        let mut sums: HashMap<AccountId, (Money, Money)> = HashMap::new();
        for entry in storage
            .vouchers
            .query_entries(EntryQuery::all().between(from, to))?
        {
            let (debit, credit) = sums
                .entry(entry.account_id)
                .or_insert((Money::zero(), Money::zero()));
            *debit = debit
                .checked_add(entry.debit)
                .ok_or_else(|| BookError::amount_overflow("Account debit total"))?;
            *credit = credit
                .checked_add(entry.credit)
                .ok_or_else(|| BookError::amount_overflow("Account credit total"))?;
        }

        let rows: Vec<TrialBalanceRow> = AccountService::new(storage)
            .list_accounts(None)?
            .into_iter()
            .filter_map(|account| {
                sums.get(&account.id).map(|&(debit, credit)| TrialBalanceRow {
                    account_id: account.id,
                    account_name: account.name,
                    total_debit: debit,
                    total_credit: credit,
                    balance: debit - credit,
                })
            })
            .collect();

        let total_debit = Money::checked_sum(rows.iter().map(|r| r.total_debit))
            .ok_or_else(|| BookError::amount_overflow("Total debit"))?;
        let total_credit = Money::checked_sum(rows.iter().map(|r| r.total_credit))
            .ok_or_else(|| BookError::amount_overflow("Total credit"))?;

        debug!(%from, %to, accounts = rows.len(), "trial balance generated");

        Ok(Self {
            from,
            to,
            rows,
            total_debit,
            total_credit,
        })
    }

    /// Grand totals agree
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }

    pub fn to_table(&self) -> ReportTable {
        let mut table =
            ReportTable::new(["account_name", "total_debit", "total_credit", "balance"]);
        for row in &self.rows {
            table.push_row(vec![
                row.account_name.clone(),
                row.total_debit.to_string(),
                row.total_credit.to_string(),
                row.balance.to_string(),
            ]);
        }
        table
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Trial Balance\n");
        output.push_str(&"=".repeat(70));
        output.push('\n');
        output.push_str(&format!("From: {} To: {}\n\n", self.from, self.to));

        output.push_str(&format!(
            "{:<28} {:>13} {:>13} {:>13}\n",
            "Account", "Debit", "Credit", "Balance"
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<28} {:>13} {:>13} {:>13}\n",
                row.account_name, row.total_debit, row.total_credit, row.balance
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>13} {:>13}\n",
            "Total", self.total_debit, self.total_credit
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> BookResult<()> {
        write_table_csv(&self.to_table(), writer)
    }
}
