//! Account CLI commands
//!
//! Implements CLI commands for the chart of accounts.

use clap::Subcommand;

use crate::display::account::{format_account_list, format_account_tree};
use crate::error::{BookError, BookResult};
use crate::models::AccountLevel;
use crate::services::AccountService;
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Add an account to the chart
    Add {
        /// Account name
        name: String,
        /// Level: 1 (group), 2 (sub-group) or 3 (postable account)
        #[arg(short, long)]
        level: u8,
        /// Parent account name or ID (required for levels 2 and 3)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// List accounts in the order they were added
    List {
        /// Only show accounts of this level
        #[arg(short, long)]
        level: Option<u8>,
    },
    /// Show the chart of accounts as a tree
    Tree,
}

/// Handle an account command
pub fn handle_account_command(storage: &Storage, cmd: AccountCommands) -> BookResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::Add {
            name,
            level,
            parent,
        } => {
            let parent_id = match parent {
                Some(parent) => Some(
                    service
                        .find(&parent)?
                        .ok_or_else(|| {
                            BookError::Validation(format!("Parent account not found: {}", parent))
                        })?
                        .id,
                ),
                None => None,
            };

            let account = service.add_account(&name, level, parent_id)?;

            println!("Added account: {}", account.name);
            println!("  Level: {}", account.level);
            if let Some(parent_id) = account.parent_id {
                println!("  Parent: {}", parent_id);
            }
            println!("  ID: {}", account.id);
        }

        AccountCommands::List { level } => {
            let level = match level {
                Some(n) => Some(AccountLevel::from_number(n).ok_or_else(|| {
                    BookError::Validation(format!("Account level must be 1, 2 or 3, got {}", n))
                })?),
                None => None,
            };

            let accounts = service.list_accounts(level)?;
            println!("{}", format_account_list(&accounts));
        }

        AccountCommands::Tree => {
            let tree = service.tree()?;
            println!("{}", format_account_tree(&tree).trim_end());
        }
    }

    Ok(())
}
