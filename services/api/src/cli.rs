use crate::demo::{run_dashboard_report, run_demo, run_reminder_sweep, DashboardArgs, DemoArgs, RemindersArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use envguard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "EnvGuard Compliance Engine",
    about = "Aggregate environmental compliance data and serve the scoring API",
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
    /// Print a dashboard aggregation report for a given evaluation date
    Dashboard(DashboardArgs),
    /// Run one deadline-reminder sweep and print the outcome
    Reminders(RemindersArgs),
    /// Run an end-to-end CLI demo over the seeded sample plant
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
        Command::Dashboard(args) => run_dashboard_report(args),
        Command::Reminders(args) => run_reminder_sweep(args),
        Command::Demo(args) => run_demo(args),
    }
}
