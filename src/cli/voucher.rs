//! Voucher CLI commands
//!
//! Entries are given as `ACCOUNT:DEBIT:CREDIT`, where ACCOUNT is a level 3
//! account name or ID and an empty amount means zero.

use std::collections::HashMap;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::report::{format_recent_vouchers, format_voucher_details};
use crate::error::{BookError, BookResult};
use crate::models::{Entry, Money, VoucherId};
use crate::services::{AccountService, VoucherService};
use crate::storage::Storage;

use super::{parse_date, today};

/// Voucher subcommands
#[derive(Subcommand, Debug)]
pub enum VoucherCommands {
    /// Show the number the next voucher will get
    Next,
    /// Record a balanced voucher
    Add {
        /// Entries as ACCOUNT:DEBIT:CREDIT (e.g. "Cash:100:" "Capital::100")
        #[arg(required = true, num_args = 1..)]
        entries: Vec<String>,
        /// Voucher date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long, default_value = "")]
        description: String,
    },
    /// Show the most recent vouchers
    Recent {
        /// Number of vouchers to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one voucher with its entries
    Show {
        /// Voucher number
        id: String,
    },
}

/// Handle a voucher command
pub fn handle_voucher_command(
    storage: &Storage,
    settings: &Settings,
    cmd: VoucherCommands,
) -> BookResult<()> {
    let service = VoucherService::new(storage);

    match cmd {
        VoucherCommands::Next => {
            println!("{}", service.next_id()?);
        }

        VoucherCommands::Add {
            entries,
            date,
            description,
        } => {
            let date = match date {
                Some(s) => parse_date(&s, "voucher")?,
                None => today(),
            };

            let accounts = AccountService::new(storage);
            let entries = entries
                .iter()
                .map(|arg| parse_entry(&accounts, arg, &settings.currency_symbol))
                .collect::<BookResult<Vec<_>>>()?;

            let id = service.save_voucher(date, &description, entries)?;
            let voucher = service.get(id)?;

            println!(
                "Saved voucher #{} dated {} for {}",
                voucher.id,
                settings.format_date(voucher.date),
                voucher.total_debit().format_with_symbol(&settings.currency_symbol)
            );
        }

        VoucherCommands::Recent { limit } => {
            let limit = limit.unwrap_or(settings.recent_voucher_limit);
            let rows = service.recent_vouchers(limit)?;
            println!("{}", format_recent_vouchers(&rows));
        }

        VoucherCommands::Show { id } => {
            let id: VoucherId = id
                .parse()
                .map_err(|_| BookError::Validation(format!("Invalid voucher number: {}", id)))?;
            let voucher = service.get(id)?;

            let names: HashMap<_, _> = AccountService::new(storage)
                .list_accounts(None)?
                .into_iter()
                .map(|a| (a.id, a.name))
                .collect();

            print!("{}", format_voucher_details(&voucher, &names));
        }
    }

    Ok(())
}

/// Parse one `ACCOUNT:DEBIT:CREDIT` argument
///
/// The amounts are split off from the right, so account names may contain
/// colons. Amounts may carry `symbol` (or `$`) in front.
pub fn parse_entry(
    accounts: &AccountService<'_>,
    arg: &str,
    symbol: &str,
) -> BookResult<Entry> {
    let mut parts = arg.rsplitn(3, ':');
    let (credit, debit, account) = match (parts.next(), parts.next(), parts.next()) {
        (Some(credit), Some(debit), Some(account)) => (credit, debit, account),
        _ => {
            return Err(BookError::Validation(format!(
                "Invalid entry '{}'. Use ACCOUNT:DEBIT:CREDIT",
                arg
            )))
        }
    };

    let account = accounts
        .find(account)?
        .ok_or_else(|| BookError::InvalidAccount(format!("Account not found: {}", account)))?;

    Ok(Entry::new(
        account.id,
        parse_amount(debit, symbol)?,
        parse_amount(credit, symbol)?,
    ))
}

fn parse_amount(value: &str, symbol: &str) -> BookResult<Money> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Money::zero());
    }
    Money::parse_with_symbol(value, symbol)
        .or_else(|_| Money::parse(value))
        .map_err(|e| BookError::Validation(e.to_string()))
}
