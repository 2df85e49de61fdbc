use anyhow::{Context, Result};
use clap::Parser;

use ternimal_seed::api::ApiClient;
use ternimal_seed::logging;
use ternimal_seed::seeder::{SeedStats, Seeder};

/// Production deployment; overridable per run.
const DEFAULT_SERVER_URL: &str = "https://cyber-forum.onrender.com";

/// TERNIMAL Forum Seeding Utility
///
/// Wipes the threads and comments on a TERNIMAL forum server and repopulates
/// it with the fixed sample content (4 users, 5 threads, sample comments).
/// Every remote call is best-effort: failures are reported and the run
/// continues.
#[derive(Parser, Debug)]
#[command(name = "ternimal-seed")]
#[command(about = "Reset and repopulate a TERNIMAL forum server with sample content", long_about = None)]
#[command(version)]
struct Cli {
    /// Forum server URL to seed
    #[arg(long, short, env = "TERNIMAL_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Seed without clearing existing threads and comments first
    #[arg(long)]
    skip_clear: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

// Load environment variables from .env file
// This allows TERNIMAL_SERVER_URL to be set without command-line args
fn load_env() {
    let _ = dotenv::dotenv();
}

/// Display run statistics in a formatted way
fn display_stats(stats: &SeedStats, cleared: bool) {
    println!();
    println!("Seeding Summary");
    println!("===============");
    println!();
    if cleared {
        println!(
            "Deleted during clear: {} threads, {} comments",
            stats.threads_deleted, stats.comments_deleted
        );
    }
    println!(
        "Users created: {} ({} already existed)",
        stats.users_created, stats.users_existing
    );
    println!("Threads created: {}", stats.threads_created);
    println!("Comments created: {}", stats.comments_created);

    if !stats.errors.is_empty() {
        println!();
        println!("Errors encountered: {}", stats.errors.len());
        for (i, error) in stats.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error);
        }
    }

    println!();
    println!("Done! You can now browse the forum with the TERNIMAL client.");
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads the environment
    load_env();
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        logging::LogConfig::verbose()
    } else {
        logging::LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    println!("TERNIMAL Forum Seeding Utility");
    println!("==============================");
    println!();
    println!("Server: {}", cli.server);
    println!();

    // Show confirmation prompt unless --yes flag is provided
    if !cli.yes && !cli.skip_clear {
        println!(
            "This will delete all existing threads and comments on {}.",
            cli.server
        );
        println!("Do you want to continue? (y/N): ");

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read user input")?;

        let input = input.trim().to_lowercase();
        if input != "y" && input != "yes" {
            println!("Seeding cancelled.");
            return Ok(());
        }
    }

    let client = ApiClient::new(cli.server);
    let mut seeder = Seeder::new(client);

    if cli.skip_clear {
        seeder.seed().await;
    } else {
        seeder.run().await;
    }

    display_stats(seeder.stats(), !cli.skip_clear);

    Ok(())
}
