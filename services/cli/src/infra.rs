use readiness::assessment::{AssessmentSession, Catalogue, MaturityLevel, StructuredExport};
use readiness::config::AppConfig;
use readiness::error::AppError;
use readiness::telemetry;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Loaded configuration plus the validated catalogue shared by every command.
pub(crate) struct AppContext {
    pub(crate) catalogue: Arc<Catalogue>,
    pub(crate) export_dir: PathBuf,
}

pub(crate) fn bootstrap(
    catalogue_override: Option<PathBuf>,
    log_level_override: Option<String>,
) -> Result<AppContext, AppError> {
    let mut config = AppConfig::load()?;

    if let Some(path) = catalogue_override {
        config.assessment.catalogue_path = Some(path);
    }
    if let Some(level) = log_level_override {
        config.telemetry.log_level = level;
    }

    telemetry::init(&config.telemetry)?;

    let catalogue = config.assessment.catalogue()?;
    info!(
        environment = ?config.environment,
        sections = catalogue.sections().len(),
        questions = catalogue.question_count(),
        built_in = config.assessment.catalogue_path.is_none(),
        "readiness catalogue ready"
    );

    Ok(AppContext {
        catalogue: Arc::new(catalogue),
        export_dir: config.assessment.export_dir,
    })
}

/// A single `QUESTION=LEVEL` override from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub(crate) question: String,
    pub(crate) level: MaturityLevel,
}

pub(crate) fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (question, level) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected QUESTION=LEVEL, got '{raw}'"))?;

    let question = question.trim();
    if question.is_empty() {
        return Err(format!("expected QUESTION=LEVEL, got '{raw}'"));
    }

    let level = level.parse::<MaturityLevel>().map_err(|err| err.to_string())?;
    Ok(Assignment {
        question: question.to_string(),
        level,
    })
}

pub(crate) fn read_structured_export(path: &Path) -> Result<StructuredExport, AppError> {
    let file = File::open(path)?;
    Ok(StructuredExport::from_reader(BufReader::new(file))?)
}

/// Starts a session, then applies a previous export and command-line overrides in that order.
pub(crate) fn prepare_session(
    context: &AppContext,
    answers_path: Option<&Path>,
    assignments: &[Assignment],
) -> Result<AssessmentSession, AppError> {
    let mut session = AssessmentSession::new(Arc::clone(&context.catalogue));
    session.start_assessment();

    if let Some(path) = answers_path {
        let export = read_structured_export(path)?;
        session.load_structured(&export)?;
    }

    for assignment in assignments {
        session.set_answer(&assignment.question, assignment.level)?;
    }

    Ok(session)
}
