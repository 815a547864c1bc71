//! CLI administration tool for hashlink.
//!
//! Inspects and fills the mapping store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Derive the code for a URL (no database needed)
//! cargo run --bin admin -- code "https://example.com/a/b"
//!
//! # Shorten a URL directly against the database
//! cargo run --bin admin -- shorten "https://example.com/a/b"
//!
//! # Look a mapping up by code or by URL
//! cargo run --bin admin -- lookup 7R1BN2R7
//! cargo run --bin admin -- find "https://example.com/a/b"
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `hashlink::config`); `DATABASE_URL` or the `DB_*`
//! components are required for every command except `code`.

use hashlink::application::services::ShortenerService;
use hashlink::config::{self, Config};
use hashlink::domain::entities::UrlMapping;
use hashlink::domain::repositories::MappingRepository;
use hashlink::infrastructure::persistence::PgMappingRepository;
use hashlink::server::{connect_pool, run_migrations};
use hashlink::utils::code_derivation::{CodeFormat, DEFAULT_CODE_LENGTH};
use hashlink::utils::url_validator::validate_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing hashlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Derive the short code for a URL without touching the database
    Code {
        /// Original URL
        url: String,

        /// Code length (1-43)
        #[arg(short, long, default_value_t = DEFAULT_CODE_LENGTH)]
        length: usize,
    },

    /// Shorten a URL, storing the mapping if it is new
    Shorten {
        /// Original URL
        url: String,
    },

    /// Show the mapping for a short code
    Lookup {
        /// Short code
        code: String,
    },

    /// Show the mapping for an original URL
    Find {
        /// Original URL
        url: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Code { url, length } => derive_code(&url, length)?,
        Commands::Shorten { url } => {
            let (config, pool) = connect().await?;
            shorten(&config, &pool, url).await?
        }
        Commands::Lookup { code } => {
            let (config, pool) = connect().await?;
            lookup(&config, &pool, &code).await?
        }
        Commands::Find { url } => {
            let (config, pool) = connect().await?;
            find(&config, &pool, &url).await?
        }
        Commands::Stats => {
            let (config, pool) = connect().await?;
            stats(&config, &pool).await?
        }
        Commands::Db { action } => {
            let (_, pool) = connect().await?;
            handle_db_action(action, &pool).await?
        }
    }

    Ok(())
}

/// Loads the server configuration, opens a pool to its database and brings
/// the schema up to date.
async fn connect() -> Result<(Config, PgPool)> {
    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("The admin tool requires STORAGE=postgres and a database configuration")?;

    let pool = connect_pool(&config, &database_url).await?;
    run_migrations(&pool).await?;

    Ok((config, pool))
}

fn repository(config: &Config, pool: &PgPool) -> Result<PgMappingRepository> {
    Ok(PgMappingRepository::new(
        Arc::new(pool.clone()),
        config.code_format()?,
    ))
}

/// Prints the code a URL would receive.
fn derive_code(url: &str, length: usize) -> Result<()> {
    let format = CodeFormat::new(length)?;

    if let Err(e) = validate_url(url) {
        println!("{} {}", "⚠️  Not accepted by the server:".yellow(), e);
    }

    println!("{}", format.derive(url).bright_yellow().bold());

    Ok(())
}

async fn shorten(config: &Config, pool: &PgPool, url: String) -> Result<()> {
    let repo: Arc<dyn MappingRepository> = Arc::new(repository(config, pool)?);
    let service = ShortenerService::new(repo, config.code_format()?, config.short_url_template());

    let shortened = service
        .shorten(Some(url))
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", e, e.to_error_info().details))?;

    println!("{}", "✅ Short URL ready".green().bold());
    println!("  Original: {}", shortened.original_url.cyan());
    println!("  Short:    {}", shortened.short_url.bright_yellow().bold());

    Ok(())
}

async fn lookup(config: &Config, pool: &PgPool, code: &str) -> Result<()> {
    let format = config.code_format()?;
    if !format.is_valid(code) {
        anyhow::bail!(
            "'{}' is not a valid code ({} characters of [A-Za-z0-9+/])",
            code,
            format.length()
        );
    }

    let mapping = repository(config, pool)?
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    print_mapping(config, mapping);
    Ok(())
}

async fn find(config: &Config, pool: &PgPool, url: &str) -> Result<()> {
    let mapping = repository(config, pool)?
        .find_by_original_url(url)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    print_mapping(config, mapping);
    Ok(())
}

fn print_mapping(config: &Config, mapping: Option<UrlMapping>) {
    let Some(mapping) = mapping else {
        println!("{}", "  No mapping found".yellow());
        return;
    };

    println!("  ID:       {}", mapping.id.to_string().bright_black());
    println!("  Code:     {}", mapping.url_code.bright_yellow().bold());
    println!("  Original: {}", mapping.original_url.cyan());
    println!(
        "  Short:    {}",
        config.short_url_template().compose(&mapping.url_code)
    );
    println!(
        "  Created:  {}",
        mapping
            .created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
}

/// Displays mapping statistics.
async fn stats(config: &Config, pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let total = repository(config, pool)?
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let last_created: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT MAX(created_at) FROM url_mappings")
            .fetch_one(pool)
            .await?;

    println!("  Mappings:     {}", total.to_string().bright_white().bold());
    println!(
        "  Last created: {}",
        last_created
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string())
            .bright_black()
    );
    println!();

    Ok(())
}

/// Dispatches database operation commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query("SELECT 1").execute(pool).await?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let size: String =
                sqlx::query_scalar("SELECT pg_size_pretty(pg_total_relation_size('url_mappings'))")
                    .fetch_one(pool)
                    .await?;

            println!("{}", "🗄️  Database Info".bright_blue().bold());
            println!();
            println!("  Version:        {}", version.bright_black());
            println!("  Mappings table: {}", size.cyan());
            println!();
        }
    }

    Ok(())
}
