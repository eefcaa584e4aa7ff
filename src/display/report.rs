//! Report display formatting

use std::collections::HashMap;

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::{AccountId, Voucher};
use crate::reports::{recent_vouchers_table, LedgerReport, ReportTable, TrialBalanceReport};
use crate::storage::RecentVoucherRow;

/// Render any report table
pub fn format_table(table: &ReportTable) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().cloned());
    for row in &table.rows {
        builder.push_record(row.iter().cloned());
    }

    let mut rendered = builder.build();
    rendered.with(Style::sharp());
    rendered.to_string()
}

pub fn format_ledger(report: &LedgerReport) -> String {
    if report.ledgers.is_empty() {
        return "No level 3 accounts found.".to_string();
    }

    let mut output = format!("Ledger {} to {}\n", report.from, report.to);
    output.push_str(&format_table(&report.to_table()));
    output.push('\n');
    for ledger in &report.ledgers {
        output.push_str(&format!(
            "{}: opening {} closing {}\n",
            ledger.account_name, ledger.opening_balance, ledger.closing_balance
        ));
    }
    output
}

/// Trial balance table followed by grand totals
pub fn format_trial_balance(report: &TrialBalanceReport) -> String {
    let mut output = format!("Trial Balance {} to {}\n", report.from, report.to);

    if report.rows.is_empty() {
        output.push_str("No entries in this period.\n");
        return output;
    }

    output.push_str(&format_table(&report.to_table()));
    output.push('\n');
    output.push_str(&format!("Total Debit:  {}\n", report.total_debit));
    output.push_str(&format!("Total Credit: {}\n", report.total_credit));
    if !report.is_balanced() {
        output.push_str("Warning: debits and credits do not agree\n");
    }

    output
}

pub fn format_recent_vouchers(rows: &[RecentVoucherRow]) -> String {
    if rows.is_empty() {
        return "No vouchers recorded yet.".to_string();
    }
    format_table(&recent_vouchers_table(rows))
}

/// One voucher with its lines; `names` maps account ids to names
pub fn format_voucher_details(voucher: &Voucher, names: &HashMap<AccountId, String>) -> String {
    let mut output = String::new();
    output.push_str(&format!("Voucher #{}\n", voucher.id));
    output.push_str(&format!("  Date:        {}\n", voucher.date));
    output.push_str(&format!("  Description: {}\n\n", voucher.description));

    let mut table = ReportTable::new(["account", "debit", "credit"]);
    for entry in &voucher.entries {
        table.push_row(vec![
            names
                .get(&entry.account_id)
                .cloned()
                .unwrap_or_else(|| format!("#{}", entry.account_id)),
            entry.debit.to_string(),
            entry.credit.to_string(),
        ]);
    }
    table.push_row(vec![
        "Total".to_string(),
        voucher.total_debit().to_string(),
        voucher.total_credit().to_string(),
    ]);

    output.push_str(&format_table(&table));
    output.push('\n');
    output
}
