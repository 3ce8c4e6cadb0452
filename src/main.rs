use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod dashboard;
mod error;
mod match_state;
mod predictor;
mod prompt;

use config::{Command, Config};
use dashboard::AppState;
use error::PredictError;
use match_state::{Catalog, MatchInput};
use predictor::{evaluate, OracleHandle};
use prompt::Prompter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Initialise tracing / logging; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let catalog = Catalog::default();
    let oracle = Arc::new(OracleHandle::from_artifact(&config.model_path));

    match config.command {
        Command::Options => {
            println!("Teams:");
            for team in catalog.teams() {
                println!("  {}", team);
            }
            println!("Cities:");
            for city in catalog.cities() {
                println!("  {}", city);
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Predict(args) => {
            let input = MatchInput::from(args);
            let result = input
                .into_state(&catalog)
                .map_err(PredictError::from)
                .and_then(|state| evaluate(&state, &oracle));
            match result {
                Ok(evaluation) => {
                    println!("{}", evaluation.rendered());
                    Ok(ExitCode::SUCCESS)
                }
                Err(e @ PredictError::InvalidInput(_)) => {
                    eprintln!("{}", e);
                    Ok(ExitCode::from(2))
                }
                Err(e) => {
                    eprintln!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Command::Interactive => {
            warm(&oracle);
            let stdin = std::io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
            prompter
                .run(&catalog, &oracle)
                .context("Interactive session failed")?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Serve { addr } => {
            warm(&oracle);
            let app = dashboard::router(AppState {
                oracle: oracle.clone(),
                catalog,
            });
            let addr: SocketAddr = addr.parse()?;
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!("Prediction form listening on http://{}", addr);
            axum::serve(listener, app).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the model up front so a bad artifact is reported before the first
/// request rather than in the middle of one.
fn warm(oracle: &OracleHandle) {
    if oracle.is_available() {
        return;
    }
    warn!("Continuing without a model: decided matches still work, predictions will be refused");
}
