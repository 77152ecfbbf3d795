use crate::infra::{parse_assignment, prepare_session, AppContext, Assignment};
use crate::render::{render_questions, render_report, render_scale};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use readiness::assessment::{AssessmentSession, ExportError, ExportFormat, MaturityLevel};
use readiness::error::AppError;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Where a command's answers come from.
#[derive(Args, Debug, Default)]
pub(crate) struct AnswerArgs {
    /// Structured JSON export whose answers seed the assessment
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Override one answer; repeatable
    #[arg(long = "set", value_name = "QUESTION=LEVEL", value_parser = parse_assignment)]
    pub(crate) set: Vec<Assignment>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsArgs {
    /// Include the advisory guidance for each question
    #[arg(long)]
    pub(crate) guidance: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    #[command(flatten)]
    pub(crate) answers: AnswerArgs,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum FormatArg {
    #[default]
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) answers: AnswerArgs,
    /// Export representation
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub(crate) format: FormatArg,
    /// Destination file (defaults to a timestamped name in the export directory)
    #[arg(long, conflicts_with = "stdout")]
    pub(crate) output: Option<PathBuf>,
    /// Write the export to stdout instead of a file
    #[arg(long)]
    pub(crate) stdout: bool,
}

pub(crate) fn run_scale() {
    render_scale();
}

pub(crate) fn run_questions(context: &AppContext, args: QuestionsArgs) {
    render_questions(&context.catalogue, args.guidance);
}

pub(crate) fn run_score(context: &AppContext, args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { answers, json } = args;
    let session = prepare_session(context, answers.answers.as_deref(), &answers.set)?;
    let report = session.report()?;

    if json {
        let json = serde_json::to_string_pretty(&report).map_err(ExportError::from)?;
        println!("{json}");
    } else {
        render_report(&report);
    }

    Ok(())
}

pub(crate) fn run_export(context: &AppContext, args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        answers,
        format,
        output,
        stdout,
    } = args;

    let session = prepare_session(context, answers.answers.as_deref(), &answers.set)?;
    let format = ExportFormat::from(format);
    let generated_at = Utc::now();
    let payload = export_payload(&session, format, generated_at)?;

    if stdout {
        print!("{payload}");
        return Ok(());
    }

    let path = output.unwrap_or_else(|| context.export_dir.join(format.file_name(generated_at)));
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, payload)?;
    info!(path = %path.display(), format = format.extension(), "assessment exported");
    println!("Export written to {}", path.display());

    Ok(())
}

fn export_payload(
    session: &AssessmentSession,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let snapshot = session.snapshot(generated_at)?;
    let payload = match format {
        ExportFormat::Csv => snapshot.tabular().to_csv()?,
        ExportFormat::Json => {
            let mut json = snapshot.structured().to_json_pretty()?;
            json.push('\n');
            json
        }
    };
    Ok(payload)
}

pub(crate) fn run_demo(context: &AppContext) -> Result<(), AppError> {
    println!("BCBS-239 readiness demo");

    let mut session = AssessmentSession::new(Arc::clone(&context.catalogue));
    session.start_assessment();
    let progress = session.progress();
    println!(
        "Started assessment: {}/{} questions pre-populated with {}",
        progress.answered,
        progress.total,
        MaturityLevel::DEFAULT
    );
    println!("Baseline overall score: {}%", session.overall_score()?);

    let selections = [
        ("governance_data_ownership", MaturityLevel::Managed),
        ("governance_steering_committee", MaturityLevel::Optimised),
        ("quality_automated_rules", MaturityLevel::Developing),
        ("quality_exception_management", MaturityLevel::Initial),
        ("lineage_end_to_end", MaturityLevel::Managed),
        ("controls_independent_validation", MaturityLevel::Developing),
    ];
    println!("\nRecording answers");
    for (question, level) in selections {
        session.set_answer(question, level)?;
        println!("- {question} -> {level}");
    }

    if let Err(err) = session.set_answer("quality_unknown", MaturityLevel::Managed) {
        println!("- quality_unknown rejected: {err}");
    }

    render_report(&session.report()?);

    let payload = export_payload(&session, ExportFormat::Csv, Utc::now())?;
    println!("\nCSV export preview");
    for line in payload.lines().take(4) {
        println!("  {line}");
    }

    Ok(())
}
