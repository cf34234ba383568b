use crate::demo::{
    run_analyze, run_demo, run_jurisdiction, run_reconcile, AnalyzeArgs, DemoArgs,
    JurisdictionArgs, ReconcileArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_forensics::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Report Forensics Engine",
    about = "Audit credit report tradelines for reporting violations from the command line or over HTTP",
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
    /// Run the full forensic pipeline over one tradeline
    Analyze(AnalyzeArgs),
    /// Compare tradelines across bureaus from a CSV export
    Reconcile(ReconcileArgs),
    /// Print the legal profile for a state
    Jurisdiction(JurisdictionArgs),
    /// Walk a built-in zombie-debt account through every analysis stage
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Reconcile(args) => run_reconcile(args),
        Command::Jurisdiction(args) => run_jurisdiction(args),
        Command::Demo(args) => run_demo(args),
    }
}
