use crate::{pkg::server::listen, prelude::Result};
use clap::{Parser, Subcommand};

mod calc;
mod migrate;
mod seed;

#[derive(Parser)]
#[command(about = "job board, quiz and calculator web services")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Serve the HTTP API
    Listen,
    /// Apply pending schema migrations
    Migrate,
    /// Replace companies, jobs and quizzes with demo data
    Seed,
    /// Replay calculator keys, e.g. `calc 12+7=` or `calc 9 Backspace 4`
    Calc { keys: Vec<String> },
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply().await?;
        }
        Some(SubCommandType::Seed) => {
            seed::apply().await?;
        }
        Some(SubCommandType::Calc { keys }) => {
            calc::run(&keys);
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
