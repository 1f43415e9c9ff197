use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

/// MyInvois e-invoice readiness assessment.
///
/// Classifies a business into its e-invoicing rollout category and reports
/// the implementation deadline, urgency and recommended actions.
#[derive(Parser, Debug)]
#[command(name = "myinvois", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Classify a business and show its implementation deadline.
    Assess(myinvois_cli::assess::AssessArgs),
    /// Validate a single form field value.
    Validate(myinvois_cli::validate::ValidateArgs),
    /// Sign up for rollout updates.
    Subscribe(myinvois_cli::subscribe::SubscribeArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    myinvois_observability::init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Assess(args) => myinvois_cli::assess::run(args)?,
        Commands::Validate(args) => myinvois_cli::validate::run(args),
        Commands::Subscribe(args) => myinvois_cli::subscribe::run(args)?,
    };

    if outcome.success {
        std::io::stdout().write_all(outcome.output.as_bytes())?;
        Ok(ExitCode::SUCCESS)
    } else {
        std::io::stderr().write_all(outcome.output.as_bytes())?;
        Ok(ExitCode::FAILURE)
    }
}
