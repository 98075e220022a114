use crate::bundle::{run_report, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use food_audit::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Food Safety Audit Service",
    about = "Score food-safety audits and notify store managers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score an audit bundle and print the report with its recipients
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Audit bundle JSON files to preload (repeatable)
    #[arg(long = "bundle")]
    pub(crate) bundles: Vec<PathBuf>,
    /// Manager directory CSV export
    #[arg(long)]
    pub(crate) managers: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
    }
}
