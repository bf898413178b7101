mod analyze;
mod cost;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sentimerge-cli")]
#[command(about = "Entity sentiment consensus from AWS Comprehend and Google Natural Language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze text with both providers and print the merged entities as JSON
    Analyze {
        /// Text to analyze
        text: String,

        /// Print single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Show provider usage and spend for a billing month
    Cost {
        /// Billing month as YYYY-MM (defaults to the current UTC month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze { text, compact }) => analyze::run_analyze(&text, compact).await?,
        Some(Commands::Cost { month }) => {
            let config = sentimerge_core::load_app_config()?;
            let pool = connect(&config).await?;
            cost::run_cost(&pool, &config, month.as_deref()).await?;
        }
        Some(Commands::Db { command }) => {
            let config = sentimerge_core::load_app_config()?;
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    sentimerge_db::health_check(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = sentimerge_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        None => println!("no command given; run `sentimerge-cli --help` for usage"),
    }

    Ok(())
}

async fn connect(config: &sentimerge_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = sentimerge_db::PoolConfig::from_app_config(config);
    let pool = sentimerge_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests;
