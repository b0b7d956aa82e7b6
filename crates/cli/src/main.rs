use crate::{error::CliError, shutdown::ExitCode};
use clap::Parser;
use connectors::adapter::SqlDestinationFactory;
use engine_config::secrets::{EnvSecretProvider, env::DEFAULT_PREFIX};
use engine_runtime::execution::{executor, outcome::LoadOutcome};
use std::{path::PathBuf, sync::Arc};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod error;
mod output;
mod shutdown;

#[derive(Parser, Debug)]
#[command(
    name = "tabload",
    version,
    about = "Replace the contents of a database table with the rows of a CSV file"
)]
struct Cli {
    /// CSV file with `ID` and `Name` columns
    file_path: PathBuf,

    #[arg(long, help = "Optional .env file with the connection secrets")]
    env_file: Option<PathBuf>,

    #[arg(
        long,
        default_value = DEFAULT_PREFIX,
        help = "Prefix of the secret environment variables (e.g. TABLOAD_SERVER_NAME)"
    )]
    secret_prefix: String,

    #[arg(long, help = "If specified, writes a JSON report of the run to this file")]
    report: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(CliError::ShutdownRequested) => ExitCode::ShutdownRequested,
        Err(err) => {
            error!("{err}");
            ExitCode::GeneralError
        }
    };
    code.into()
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let mut secrets = EnvSecretProvider::new().with_prefix(&cli.secret_prefix);
    if let Some(path) = &cli.env_file {
        secrets.load_from_file(path)?;
    }

    let token = CancellationToken::new();
    shutdown::register_handlers(token.clone());

    let outcome = tokio::select! {
        result = executor::run(&cli.file_path, &secrets, Arc::new(SqlDestinationFactory)) => result?,
        _ = token.cancelled() => return Err(CliError::ShutdownRequested),
    };

    if let Some(path) = &cli.report {
        output::write_report(&outcome, path).await?;
        info!("Report written to {}", path.display());
    }

    Ok(match outcome {
        LoadOutcome::Loaded(_) => ExitCode::Success,
        LoadOutcome::Failed(_) => ExitCode::LoadFailed,
    })
}
