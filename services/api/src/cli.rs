use crate::demo::{run_demo, run_qualification_report, DemoArgs, QualificationReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lender_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Borrower Qualification Orchestrator",
    about = "Demonstrate and run the borrower qualification service from the command line",
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
    /// Qualification reports for loan-officer demos
    Qualify {
        #[command(subcommand)]
        command: QualifyCommand,
    },
    /// Run an end-to-end CLI demo covering intake, qualification, and export
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum QualifyCommand {
    /// Compute a qualification report from a saved intake form
    Report(QualificationReportArgs),
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
        Command::Qualify {
            command: QualifyCommand::Report(args),
        } => run_qualification_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
