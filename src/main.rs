use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget_builder::cli::{handle_run_command, RunArgs};
use budget_builder::config::{paths::BudgetPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Monthly budget grid engine",
    long_about = "budget-builder keeps a monthly budget grid of income and expense \
                  categories, computes per-month totals and a running balance, and \
                  prints the result as a table, CSV, JSON or YAML."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a budget script and print the resulting grid
    Run(RunArgs),

    /// Write the default settings file
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;

    match cli.command {
        Some(Commands::Run(args)) => {
            let settings = Settings::load_or_create(&paths)?;
            handle_run_command(&settings, args)?;
        }
        Some(Commands::Init { force }) => {
            if paths.is_initialized() && !force {
                println!(
                    "Settings already exist at: {}",
                    paths.settings_file().display()
                );
                println!("Use --force to overwrite them with defaults.");
                return Ok(());
            }

            Settings::default().save(&paths)?;
            println!("Wrote settings to: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            println!("budget-builder Configuration");
            println!("============================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Initialized:      {}",
                if paths.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Start period:       {}", settings.start_period);
            println!("  End period:         {}", settings.end_period);
            println!("  Opening balance:    {:.2}", settings.opening_balance);
            println!(
                "  Default categories: {}",
                if settings.seed_default_categories { "yes" } else { "no" }
            );
        }
        None => {
            println!("budget-builder - Monthly budget grid engine");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget run <SCRIPT>' to build a budget from a script.");
        }
    }

    Ok(())
}
