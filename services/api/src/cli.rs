use crate::demo::{run_demo, run_score, DemoArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use consult_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Consultation Intake",
    about = "Run the consultation booking service or score leads from the command line",
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
    /// Print the estimated value and priority for a lead profile
    Score(ScoreArgs),
    /// Book sample consultations against the in-memory stack and print the results
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
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["consult-intake-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_collects_repeated_interests() {
        let cli = Cli::try_parse_from([
            "consult-intake-api",
            "score",
            "--company-size",
            "51-100",
            "--urgency",
            "high",
            "--interest",
            "Cost Reduction",
            "--interest",
            "Team Training",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                assert_eq!(args.company_size, "51-100");
                assert_eq!(args.interest.len(), 2);
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }
}
