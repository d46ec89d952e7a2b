use crate::demo::{run_demo, run_statement_import, DemoArgs, StatementArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use siteledger::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "siteledger",
    about = "Run and exercise the trades back-office reconciliation service",
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
    /// Reconcile a bundled sample client and print the result
    Demo(DemoArgs),
    /// Import a payment-statement CSV and print the normalized payments
    Statement(StatementArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Budget, in milliseconds, for the client aggregation endpoint before
    /// it falls back to a zeroed summary (default 2000)
    #[arg(long)]
    pub(crate) aggregation_timeout_ms: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Statement(args) => run_statement_import(args),
    }
}
