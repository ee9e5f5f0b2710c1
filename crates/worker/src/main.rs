//! Operator CLI for collector runs and data-quality jobs.
//!
//! Every job prints its report as JSON on stdout; logs go to stderr.

use std::time::Duration;

use anyhow::Context;
use atreia_core::maintenance::{PurgePredicate, DEFAULT_SCAN_LIMIT};
use atreia_core::sampling::plan_collection;
use atreia_db::models::collector_log::TriggerType;
use atreia_db::DbPool;
use atreia_gameapi::{GameApiClient, GameApiConfig};
use atreia_pipeline::collector::run_collection_cycle;
use atreia_pipeline::maintenance;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "atreia-worker")]
#[command(version, about = "Collector and maintenance jobs for the character cache")]
struct Cli {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Output logs as JSON.
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run collector cycles against the upstream search.
    Collect {
        /// Run a single cycle and exit.
        #[arg(long)]
        once: bool,

        /// Seconds between cycles.
        #[arg(long, env = "COLLECTOR_INTERVAL_SECS", default_value_t = 300)]
        interval: u64,
    },

    /// Delete rows matching a predicate in batches.
    Purge {
        /// `level_zero` or `unknown_class`.
        #[arg(long)]
        predicate: PurgePredicate,

        #[arg(long)]
        batch_size: Option<i64>,
    },

    /// Collapse duplicate rows to one survivor each.
    Dedupe {
        /// Report duplicates without deleting them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Resolve `Unknown` classes from stored profiles.
    BackfillClasses {
        #[arg(long, default_value_t = DEFAULT_SCAN_LIMIT)]
        limit: i64,
    },

    /// Strip markup left in stored names.
    CleanNames {
        #[arg(long, default_value_t = DEFAULT_SCAN_LIMIT)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "atreia_worker=info,atreia_pipeline=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);
    if cli.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let pool = atreia_db::create_pool(&cli.database_url)
        .await
        .context("Failed to connect to database")?;
    atreia_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    match cli.command {
        Command::Collect { once, interval } => collect(&pool, once, interval).await?,
        Command::Purge {
            predicate,
            batch_size,
        } => print_report(&maintenance::purge(&pool, predicate, batch_size).await?)?,
        Command::Dedupe { dry_run } => print_report(&maintenance::dedupe(&pool, dry_run).await?)?,
        Command::BackfillClasses { limit } => {
            print_report(&maintenance::backfill_classes(&pool, limit).await?)?
        }
        Command::CleanNames { limit } => {
            print_report(&maintenance::clean_names(&pool, limit).await?)?
        }
    }

    Ok(())
}

async fn collect(pool: &DbPool, once: bool, interval_secs: u64) -> anyhow::Result<()> {
    let config = GameApiConfig::from_env();
    let image_host = config.image_host.clone();
    let client = GameApiClient::new(config).context("Failed to build game API client")?;

    if once {
        let plan = plan_collection(&mut rand::rng());
        let outcome =
            run_collection_cycle(pool, &client, &plan, TriggerType::Manual, &image_host).await;
        return print_report(&outcome);
    }

    anyhow::ensure!(interval_secs > 0, "--interval must be positive");
    tracing::info!(interval_secs, "Collector loop started");
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Collector loop stopping");
                return Ok(());
            }
            _ = ticker.tick() => {
                let plan = plan_collection(&mut rand::rng());
                let outcome =
                    run_collection_cycle(pool, &client, &plan, TriggerType::Auto, &image_host).await;
                print_report(&outcome)?;
            }
        }
    }
}

fn print_report<T: Serialize>(report: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
