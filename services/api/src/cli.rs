use crate::evaluate::{run_evaluate, run_payload, EvaluateArgs, PayloadArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ship_indicator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Free Shipping Indicator",
    about = "Serve and inspect free-shipping eligibility for storefront carts",
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
    /// Evaluate a cart against a store configuration export
    Evaluate(EvaluateArgs),
    /// Print the checkout widget payload for a store
    Payload(PayloadArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Payload(args) => run_payload(args),
    }
}
