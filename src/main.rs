use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use homebudget::cli::{
    handle_category_command, handle_expense_command, handle_export_command, handle_report_command,
};
use homebudget::config::{paths::DATA_DIR_ENV, BudgetPaths, Settings};
use homebudget::storage::{initialize_storage, Storage, DEFAULT_CATEGORIES};

#[derive(Parser)]
#[command(
    name = "homebudget",
    version,
    about = "Household expense tracking with budget reports",
    long_about = "HomeBudget records expenses against categories and reports on them: \
                  a running-balance list, monthly buckets, category groups, and a \
                  category by month summary with totals."
)]
struct Cli {
    /// Directory holding settings and data files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new budget with the default categories
    Init,

    /// Show current configuration and paths
    Config,

    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(homebudget::cli::CategoryCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(homebudget::cli::ExpenseCommands),

    /// Budget reports
    #[command(subcommand)]
    Report(homebudget::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(homebudget::cli::ExportCommands),
}

/// Open the stores, seeding default categories on first use
fn open_storage(paths: BudgetPaths) -> Result<Storage> {
    initialize_storage(&paths)?;
    Ok(Storage::open(paths)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetPaths::resolve(cli.data_dir)?;
    let settings = Settings::load_or_create(&paths)?;
    homebudget::init_tracing(&settings.log_filter);

    let Some(command) = cli.command else {
        println!("HomeBudget - household expense tracking");
        println!();
        println!("Run 'homebudget --help' for usage information.");
        println!("Run 'homebudget init' to set up a new budget.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing HomeBudget at: {}", paths.base_dir().display());
            let created = initialize_storage(&paths)?;
            settings.save(&paths)?;
            if created {
                println!("Initialization complete!");
                println!();
                println!("{} default categories have been created:", DEFAULT_CATEGORIES.len());
                let names: Vec<_> = DEFAULT_CATEGORIES.iter().map(|(name, _)| *name).collect();
                println!("  {}", names.join(", "));
            } else {
                println!("Already initialized; existing categories were kept.");
            }
            println!();
            println!("Run 'homebudget category list' to see all categories.");
        }
        Commands::Config => {
            println!("HomeBudget Configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Log filter:      {}", settings.log_filter);
        }
        Commands::Category(cmd) => {
            let storage = open_storage(paths)?;
            handle_category_command(&storage, cmd)?;
            storage.close()?;
        }
        Commands::Expense(cmd) => {
            let storage = open_storage(paths)?;
            handle_expense_command(&storage, &settings, cmd)?;
            storage.close()?;
        }
        Commands::Report(cmd) => {
            let storage = open_storage(paths)?;
            handle_report_command(&storage, &settings, cmd)?;
            storage.close()?;
        }
        Commands::Export(cmd) => {
            let storage = open_storage(paths)?;
            handle_export_command(&storage, cmd)?;
            storage.close()?;
        }
    }

    Ok(())
}
