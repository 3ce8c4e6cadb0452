use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::match_state::MatchInput;

/// IPL second-innings win predictor
#[derive(Parser, Debug, Clone)]
#[command(name = "ipl-win-predictor", version, about)]
pub struct Config {
    /// Path to the trained win-probability model (JSON artifact)
    #[arg(
        long,
        env = "MODEL_PATH",
        default_value = "models/ipl_win_model.json",
        global = true
    )]
    pub model_path: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Evaluate a single match state given on the command line
    Predict(MatchArgs),

    /// Fill in the match state at a terminal prompt
    Interactive,

    /// Serve the prediction form over HTTP
    Serve {
        /// Listen address for the form
        #[arg(long, env = "DASHBOARD_ADDR", default_value = "127.0.0.1:8080")]
        addr: String,
    },

    /// List the teams and venues the model knows
    Options,
}

#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Batting (chasing) team
    #[arg(long)]
    pub batting_team: String,

    /// Bowling (defending) team
    #[arg(long)]
    pub bowling_team: String,

    /// City where the match is being played
    #[arg(long)]
    pub city: String,

    /// Runs the batting team must exceed to win
    #[arg(long, allow_negative_numbers = true)]
    pub target: i32,

    /// Current score of the batting team
    #[arg(long, allow_negative_numbers = true)]
    pub score: i32,

    /// Overs completed
    #[arg(long, allow_negative_numbers = true)]
    pub overs: i32,

    /// Wickets fallen
    #[arg(long, allow_negative_numbers = true)]
    pub wickets: i32,
}

impl From<MatchArgs> for MatchInput {
    fn from(a: MatchArgs) -> Self {
        MatchInput {
            batting_team: a.batting_team,
            bowling_team: a.bowling_team,
            city: a.city,
            target: a.target,
            score: a.score,
            overs: a.overs,
            wickets: a.wickets,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.model_path.as_os_str().is_empty() {
            anyhow::bail!("MODEL_PATH must not be empty");
        }
        if let Command::Serve { addr } = &self.command {
            if addr.parse::<SocketAddr>().is_err() {
                anyhow::bail!("invalid listen address '{}'", addr);
            }
        }
        Ok(())
    }
}
