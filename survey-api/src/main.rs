use clap::{Parser, Subcommand};
use std::path::PathBuf;
use survey_api::config::{ApiConfig, StorageBackend};
use survey_api::legacy::import_legacy;
use survey_api::logging::init_tracing;
use survey_api::server;
use survey_api::storage::SqliteSurveyStorage;

#[derive(Parser)]
#[command(name = "survey-api")]
#[command(about = "Survey platform API server", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Copy surveys.json / responses.json from the old server into the database
    ImportLegacy {
        #[arg(long)]
        surveys: Option<PathBuf>,

        #[arg(long)]
        responses: Option<PathBuf>,
    },
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = ApiConfig::load(cli.config.as_deref())?;
    let _log_guard = init_tracing(&config.logging)?;
    tracing::info!("Loaded configuration from {}", config_path.display());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::run(config).await,
        Command::ImportLegacy { surveys, responses } => {
            if config.storage.backend != StorageBackend::Sqlite {
                anyhow::bail!("import-legacy needs the sqlite storage backend");
            }
            if surveys.is_none() && responses.is_none() {
                anyhow::bail!("pass --surveys and/or --responses");
            }

            let storage = SqliteSurveyStorage::open(&config.storage.path)?;
            let summary = import_legacy(&storage, surveys.as_deref(), responses.as_deref())?;
            println!(
                "Imported {} surveys and {} responses ({} skipped) into {}",
                summary.surveys,
                summary.responses,
                summary.skipped,
                config.storage.path.display()
            );
            Ok(())
        }
    }
}
