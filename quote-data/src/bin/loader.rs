use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use quote_data::PlanCatalogLoader;
use quote_db_sqlite::SqliteRepository;
use tracing_subscriber::EnvFilter;

/// Validate a pricing plan catalog CSV and initialize the session database.
///
/// The CSV file should have the following columns:
/// - plan_id: Stable plan identifier (e.g., profesional)
/// - label: Display name shown on the quote form
/// - tier_rank: Ordering rank, lowest tier first
/// - suggested_multiplier: Suggested project-value multiplier (e.g., 1.15)
/// - features: Feature labels separated by ';'
#[derive(Parser, Debug)]
#[command(name = "quote-data-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing the pricing plan catalog
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL for the session store
    /// (e.g. sqlite:sessions.db?mode=rwc to create if missing)
    #[arg(short, long)]
    database: Option<String>,

    /// Run session-store migrations before anything else
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Some(database) = &args.database {
        let repo = SqliteRepository::new(database)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database))?;

        if args.migrate {
            tracing::info!("running migrations");
            repo.run_migrations()
                .await
                .context("Failed to run migrations")?;
        }

        if let Some(seeds_dir) = &args.seeds {
            tracing::info!(dir = %seeds_dir.display(), "running seeds");
            repo.run_seeds(seeds_dir)
                .await
                .with_context(|| format!("Failed to run seeds from: {}", seeds_dir.display()))?;
        }
    }

    tracing::info!(file = %args.file.display(), "loading plan catalog");

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let catalog = PlanCatalogLoader::load(file)
        .with_context(|| format!("Failed to load catalog: {}", args.file.display()))?;

    for plan in catalog.plans() {
        tracing::info!(
            id = %plan.id,
            label = %plan.label,
            tier = plan.tier_rank,
            multiplier = %plan.suggested_multiplier,
            features = plan.features.len(),
            "catalog plan"
        );
    }

    tracing::info!(plans = catalog.len(), "catalog is valid");

    Ok(())
}
