use crate::commands::{
    run_demo, run_export, run_questions, run_scale, run_score, ExportArgs, QuestionsArgs,
    ScoreArgs,
};
use crate::infra::bootstrap;
use clap::{Parser, Subcommand};
use readiness::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "readiness",
    about = "Score BCBS-239 readiness self-assessments from the command line",
    version
)]
pub(crate) struct Cli {
    /// Load the catalogue from a JSON definition instead of the built-in BCBS-239 set
    #[arg(long, global = true)]
    pub(crate) catalogue: Option<PathBuf>,
    /// Override the configured log level/filter
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Describe the five-level maturity scale and readiness tiers
    Scale,
    /// List catalogue sections, weights, and question ids
    Questions(QuestionsArgs),
    /// Score an assessment and print the results (default command)
    Score(ScoreArgs),
    /// Write the assessment as a CSV or JSON export
    Export(ExportArgs),
    /// Walk through starting, answering, scoring, and exporting an assessment
    Demo,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let context = bootstrap(cli.catalogue, cli.log_level)?;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Score(ScoreArgs::default()));

    match command {
        Command::Scale => {
            run_scale();
            Ok(())
        }
        Command::Questions(args) => {
            run_questions(&context, args);
            Ok(())
        }
        Command::Score(args) => run_score(&context, args),
        Command::Export(args) => run_export(&context, args),
        Command::Demo => run_demo(&context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::FormatArg;
    use readiness::assessment::MaturityLevel;

    #[test]
    fn parses_repeated_answer_overrides() {
        let cli = Cli::try_parse_from([
            "readiness",
            "score",
            "--set",
            "governance_data_ownership=Managed",
            "--set",
            "lineage_drill_down=optimized",
            "--json",
        ])
        .expect("arguments parse");

        let Some(Command::Score(args)) = cli.command else {
            panic!("expected score command");
        };
        assert!(args.json);
        assert_eq!(args.answers.set.len(), 2);
        assert_eq!(args.answers.set[1].question, "lineage_drill_down");
        assert_eq!(args.answers.set[1].level, MaturityLevel::Optimised);
    }

    #[test]
    fn export_defaults_to_csv() {
        let cli = Cli::try_parse_from(["readiness", "export", "--stdout"]).expect("arguments parse");
        let Some(Command::Export(args)) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.format, FormatArg::Csv);
        assert!(args.stdout);
        assert!(args.output.is_none());
    }

    #[test]
    fn rejects_malformed_overrides() {
        let err = Cli::try_parse_from(["readiness", "score", "--set", "governance_data_ownership"])
            .expect_err("missing level");
        assert!(err.to_string().contains("QUESTION=LEVEL"));

        Cli::try_parse_from(["readiness", "score", "--set", "governance_data_ownership=Expert"])
            .expect_err("unknown level");
    }

    #[test]
    fn global_catalogue_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["readiness", "questions", "--catalogue", "custom.json"])
            .expect("arguments parse");
        assert_eq!(cli.catalogue, Some(PathBuf::from("custom.json")));
    }
}
