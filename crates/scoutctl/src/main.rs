use clap::{Parser, Subcommand};
use storage::{
    Database,
    repository::score::ScoreRepository,
    services::recompute,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "scoutctl")]
#[command(about = "Scouting platform maintenance commands", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Recompute and cache the score of every athlete
    Recompute,
    /// Recompute and cache the score of a single athlete
    Score { athlete_id: Uuid },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("scoutctl={},storage={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Connecting to database...");
    let db = Database::new(&cli.database_url).await?;

    match cli.command {
        Commands::Migrate => {
            db.run_migrations().await?;
            tracing::info!("Migrations applied");
        }
        Commands::Recompute => {
            let report = recompute::recompute_all(&ScoreRepository::new(db.pool())).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);

            if report.failed > 0 {
                tracing::warn!("{} athletes could not be rescored", report.failed);
            }
        }
        Commands::Score { athlete_id } => {
            let record =
                recompute::refresh_athlete(&ScoreRepository::new(db.pool()), athlete_id).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(())
}
