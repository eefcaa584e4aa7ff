//! CLI commands for data export

use clap::Subcommand;
use std::path::PathBuf;

use crate::error::BookResult;
use crate::export::{export_accounts_csv, export_full_json, export_full_yaml};
use crate::storage::Storage;

use super::create_output;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the whole book as JSON
    Json {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export the whole book as YAML
    Yaml {
        /// Output file path
        output: PathBuf,
    },

    /// Export the chart of accounts to CSV
    CsvAccounts {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> BookResult<()> {
    match cmd {
        ExportCommands::Json { output, pretty } => {
            export_full_json(storage, create_output(&output)?, pretty)?;
            println!("Exported book to: {}", output.display());
        }
        ExportCommands::Yaml { output } => {
            export_full_yaml(storage, create_output(&output)?)?;
            println!("Exported book to: {}", output.display());
        }
        ExportCommands::CsvAccounts { output } => {
            export_accounts_csv(storage, create_output(&output)?)?;
            println!("Exported accounts to: {}", output.display());
        }
    }

    Ok(())
}
