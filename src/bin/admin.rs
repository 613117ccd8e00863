//! CLI administration tool for domain-shortener.
//!
//! Works directly against PostgreSQL, without the HTTP server or the cache.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Create the schema
//! cargo run --bin admin -- db init
//!
//! # Shorten a URL
//! cargo run --bin admin -- link create --domain shortenurl.org --url https://www.google.com
//!
//! # Resolve a code
//! cargo run --bin admin -- link resolve --domain shortenurl.org --code aZ3k9Qp0x
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Print sample codes (no database needed)
//! cargo run --bin admin -- gen -n 5
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection (all commands except `gen`)
//! - `ENTROPY_POLICY`, `ALLOCATION_MAX_ATTEMPTS`: same meaning as for the server

use domain_shortener::application::services::LinkService;
use domain_shortener::config::{self, Config, mask_connection_string};
use domain_shortener::domain::errors::LinkError;
use domain_shortener::domain::repositories::LinkStore;
use domain_shortener::infrastructure::cache::NullCache;
use domain_shortener::infrastructure::persistence::PgLinkStore;
use domain_shortener::utils::code_generator::CodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing domain-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Create and resolve short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show mapping counts, total and per domain
    Stats,

    /// Print freshly generated codes
    Gen {
        /// Number of codes
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the schema if it does not exist
    Init,
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Allocate a short code for a URL
    Create {
        #[arg(short, long)]
        domain: String,

        #[arg(short, long)]
        url: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Look up the URL behind a code
    Resolve {
        #[arg(short, long)]
        domain: String,

        #[arg(short, long)]
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Gen { count } => handle_gen(&config, count)?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
        Commands::Link { action } => handle_link_action(action, &config).await?,
        Commands::Stats => handle_stats(&config).await?,
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<PgLinkStore> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL (or DB_USER and DB_NAME) must be set")?;

    PgLinkStore::connect(
        database_url,
        config.db_max_connections,
        config.connect_timeout(),
    )
    .await
    .with_context(|| {
        format!(
            "Failed to connect to {}",
            mask_connection_string(database_url)
        )
    })
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    let store = connect(config).await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            if !store.health_check().await {
                anyhow::bail!("Database did not answer the health probe");
            }

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(store.pool())
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Init => {
            println!("{}", "🛠  Creating schema...".bright_blue());

            store
                .ensure_schema()
                .await
                .context("Failed to create schema")?;

            println!("{}", "✅ Table shortened_urls is ready".green().bold());
        }
    }

    Ok(())
}

/// Dispatches link commands through [`LinkService`], with caching disabled.
async fn handle_link_action(action: LinkAction, config: &Config) -> Result<()> {
    let store = connect(config).await?;
    let service = LinkService::new(
        Arc::new(store),
        Arc::new(NullCache::new()),
        CodeGenerator::new(config.entropy_policy()),
    )
    .with_max_attempts(config.allocation_max_attempts);

    match action {
        LinkAction::Create { domain, url, yes } => {
            println!("{}", "🔗 Create Short Link".bright_blue().bold());
            println!();
            println!("  Domain: {}", domain.cyan());
            println!("  URL:    {}", url.cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Create this link?")
                    .default(true)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let link = service
                .allocate(&domain, &url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            println!("{}", "✅ Link created".green().bold());
            println!(
                "  {}",
                LinkService::short_url(&link.domain, &link.code)
                    .bright_yellow()
                    .bold()
            );
        }
        LinkAction::Resolve { domain, code } => match service.resolve(&domain, &code).await {
            Ok(url) => println!("{} {}", code.cyan(), url.bright_white()),
            Err(LinkError::NotFound) => {
                println!("{}", "⚠️  No link with this code on this domain".yellow());
            }
            Err(e) => anyhow::bail!("Lookup failed: {}", e),
        },
    }

    Ok(())
}

/// Displays mapping counts: total and the ten largest domains.
async fn handle_stats(config: &Config) -> Result<()> {
    let store = connect(config).await?;

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total = store
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let per_domain = store
        .count_by_domain(10)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links per domain: {}", e))?;

    println!("  Links: {}", total.to_string().bright_green().bold());
    println!();

    if per_domain.is_empty() {
        println!("{}", "  No links yet".yellow());
        return Ok(());
    }

    println!(
        "  {:<40} {:>10}",
        "Domain".bright_white().bold(),
        "Links".bright_white().bold()
    );
    println!("  {}", "─".repeat(51).bright_black());

    for (domain, count) in &per_domain {
        println!("  {:<40} {:>10}", domain.cyan(), count);
    }
    println!();

    Ok(())
}

/// Prints `count` codes from the configured generator.
fn handle_gen(config: &Config, count: usize) -> Result<()> {
    let generator = CodeGenerator::new(config.entropy_policy());

    for _ in 0..count {
        let code = generator
            .generate()
            .map_err(|e| anyhow::anyhow!("Failed to generate code: {}", e))?;
        println!("{}", code);
    }

    Ok(())
}
