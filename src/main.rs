use anyhow::Result;
use clap::{Parser, Subcommand};

use ledgerbook::cli::{
    handle_account_command, handle_export_command, handle_report_command, handle_voucher_command,
};
use ledgerbook::config::{paths::BookPaths, settings::Settings};
use ledgerbook::logging::{init_logging, LogFormat};
use ledgerbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "ledgerbook",
    version,
    about = "Double-entry bookkeeping from the terminal",
    long_about = "ledgerbook keeps a three-level chart of accounts, records balanced \
                  debit/credit vouchers, and derives ledgers and trial balances \
                  from them."
)]
struct Cli {
    /// Log filter (overrides the configured level; RUST_LOG wins over both)
    #[arg(long, global = true, env = "LEDGERBOOK_LOG")]
    log_level: Option<String>,

    /// Log format: compact or pretty
    #[arg(long, global = true, default_value = "compact")]
    log_format: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new book
    Init,

    /// Show current configuration and paths
    Config,

    /// Chart of accounts
    #[command(subcommand)]
    Account(ledgerbook::cli::AccountCommands),

    /// Journal vouchers
    #[command(subcommand, alias = "v")]
    Voucher(ledgerbook::cli::VoucherCommands),

    /// Ledger and trial balance
    #[command(subcommand)]
    Report(ledgerbook::cli::ReportCommands),

    /// Export the book
    #[command(subcommand)]
    Export(ledgerbook::cli::ExportCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let level = cli.log_level.as_deref().unwrap_or(&settings.log_level);
    init_logging(level, LogFormat::from(cli.log_format.as_str()));

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing ledgerbook at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  ledgerbook account add Assets --level 1");
            println!("  ledgerbook account add \"Current Assets\" --level 2 --parent Assets");
            println!("  ledgerbook account add Cash --level 3 --parent \"Current Assets\"");
        }
        Some(Commands::Config) => {
            println!("ledgerbook Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {:?}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!("  Recent voucher limit: {}", settings.recent_voucher_limit);
            println!("  Log level:            {}", settings.log_level);
            println!();
            println!("Initialized: {}", if storage.is_initialized() { "yes" } else { "no" });
        }
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, cmd)?;
        }
        Some(Commands::Voucher(cmd)) => {
            handle_voucher_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, cmd)?;
        }
        None => {
            println!("ledgerbook - double-entry bookkeeping");
            println!();
            println!("Run 'ledgerbook --help' for usage information.");
        }
    }

    Ok(())
}
