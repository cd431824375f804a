use crate::infra::{parse_date, parse_event, parse_gender, parse_tier};
use crate::render::{run_budget, run_classify, run_impact, run_report};
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use roster_desk::error::AppError;
use roster_desk::roster::{Event, Gender, Tier};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Roster Desk",
    about = "Classify athletes, score recruits, and track scholarship pools from the command line",
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
    /// Classify a single mark against the tier thresholds
    Classify(ClassifyArgs),
    /// Compute an impact score and the scholarship it suggests
    Impact(ImpactArgs),
    /// Summarize scholarship pools for a roster export
    Budget(RosterArgs),
    /// Print the full roster report for a roster export
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
    /// Roster CSV export to preload into the in-memory store
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Event name, e.g. "100m" or "Long Jump"
    #[arg(long, value_parser = parse_event)]
    pub(crate) event: Event,
    /// Roster gender (M or F)
    #[arg(long, value_parser = parse_gender)]
    pub(crate) gender: Gender,
    /// Performance mark, e.g. "10.25", "4:05.3", or "6.50m"
    pub(crate) result: String,
}

#[derive(Args, Debug)]
pub(crate) struct ImpactArgs {
    /// Current tier used when no potential tier is given
    #[arg(long, value_parser = parse_tier)]
    pub(crate) tier: Tier,
    #[arg(long, value_parser = parse_tier)]
    pub(crate) potential_tier: Option<Tier>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) technical_skill: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) athletic_ability: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) competitive_instinct: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) academic_potential: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) work_ethic: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) team_culture: Option<u8>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) coachability: Option<u8>,
    /// Override the configured maximum scholarship
    #[arg(long)]
    pub(crate) max_scholarship: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct RosterArgs {
    /// Roster CSV export (ID, Name, Event, Personal Best, Gender, Status, Scholarship)
    pub(crate) roster: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Roster CSV export (ID, Name, Event, Personal Best, Gender, Status, Scholarship)
    pub(crate) roster: PathBuf,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Emit JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Classify(args) => run_classify(args),
        Command::Impact(args) => run_impact(args),
        Command::Budget(args) => run_budget(args),
        Command::Report(args) => run_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn classify_arguments_parse() {
        let cli = Cli::try_parse_from([
            "roster-desk",
            "classify",
            "--event",
            "Long Jump",
            "--gender",
            "M",
            "6.50m",
        ])
        .expect("arguments parse");
        match cli.command {
            Some(Command::Classify(args)) => {
                assert_eq!(args.event, Event::LongJump);
                assert_eq!(args.gender, Gender::Men);
                assert_eq!(args.result, "6.50m");
            }
            other => panic!("expected classify command, got {other:?}"),
        }
    }

    #[test]
    fn impact_rejects_out_of_range_ratings() {
        let result = Cli::try_parse_from([
            "roster-desk",
            "impact",
            "--tier",
            "elite",
            "--work-ethic",
            "6",
        ]);
        assert!(result.is_err());
    }
}
