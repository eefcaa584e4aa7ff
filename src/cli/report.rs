//! CLI commands for reports
//!
//! Ledger and trial balance, printed to the terminal or written to CSV.

use clap::Subcommand;
use std::path::PathBuf;

use crate::display::report::{format_ledger, format_trial_balance};
use crate::error::{BookError, BookResult};
use crate::reports::{AccountSelector, LedgerReport, TrialBalanceReport};
use crate::services::AccountService;
use crate::storage::Storage;

use super::{create_output, date_range};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Ledger with opening and running balances
    Ledger {
        /// Level 3 account name or ID; all level 3 accounts when omitted
        #[arg(short, long)]
        account: Option<String>,

        /// Start date (YYYY-MM-DD), defaults to the first of this month
        #[arg(short, long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        to: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Debit and credit totals per account
    #[command(alias = "tb")]
    TrialBalance {
        /// Start date (YYYY-MM-DD), defaults to the first of this month
        #[arg(short, long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        to: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> BookResult<()> {
    match cmd {
        ReportCommands::Ledger {
            account,
            from,
            to,
            output,
        } => handle_ledger_report(storage, account, from, to, output),
        ReportCommands::TrialBalance { from, to, output } => {
            handle_trial_balance_report(storage, from, to, output)
        }
    }
}

fn handle_ledger_report(
    storage: &Storage,
    account: Option<String>,
    from: Option<String>,
    to: Option<String>,
    output: Option<PathBuf>,
) -> BookResult<()> {
    let (from, to) = date_range(from.as_deref(), to.as_deref())?;

    let selector = match account {
        Some(account) => {
            let found = AccountService::new(storage)
                .find(&account)?
                .ok_or_else(|| BookError::account_not_found(&account))?;
            AccountSelector::Account(found.id)
        }
        None => AccountSelector::All,
    };

    let report = LedgerReport::generate(storage, selector, from, to)?;

    if let Some(path) = output {
        let writer = create_output(&path)?;
        report.export_csv(writer)?;
        println!("Ledger exported to: {}", path.display());
    } else {
        println!("{}", format_ledger(&report));
    }

    Ok(())
}

fn handle_trial_balance_report(
    storage: &Storage,
    from: Option<String>,
    to: Option<String>,
    output: Option<PathBuf>,
) -> BookResult<()> {
    let (from, to) = date_range(from.as_deref(), to.as_deref())?;
    let report = TrialBalanceReport::generate(storage, from, to)?;

    if let Some(path) = output {
        let writer = create_output(&path)?;
        report.export_csv(writer)?;
        println!("Trial balance exported to: {}", path.display());
    } else {
        println!("{}", format_trial_balance(&report));
    }

    Ok(())
}
