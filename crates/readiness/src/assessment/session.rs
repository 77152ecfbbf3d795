use super::answers::AnswerStore;
use super::catalogue::Catalogue;
use super::export::{ExportSnapshot, StructuredExport, TabularExport};
use super::maturity::MaturityLevel;
use super::readiness::{classify, Readiness};
use super::recommendations::{generate_recommendations, Recommendation};
use super::report::{AssessmentReport, Progress};
use super::scoring::{compute_overall, compute_section_scores, SectionScores};
use super::AssessmentError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// One respondent's assessment over a shared catalogue.
///
/// The session exclusively owns its answers; every score, recommendation, and
/// export is recomputed from them on request.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    catalogue: Arc<Catalogue>,
    answers: AnswerStore,
    started: bool,
}

impl AssessmentSession {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            answers: AnswerStore::empty(),
            started: false,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn start_assessment(&mut self) {
        self.answers = AnswerStore::with_defaults(&self.catalogue);
        self.started = true;
        info!(
            questions = self.catalogue.question_count(),
            "assessment started with default answers"
        );
    }

    pub fn reset_assessment(&mut self) {
        self.answers.reset(&self.catalogue);
        self.started = true;
        info!("assessment reset to default answers");
    }

    pub fn set_answer(
        &mut self,
        question_id: &str,
        level: MaturityLevel,
    ) -> Result<(), AssessmentError> {
        if !self.started {
            return Err(AssessmentError::NotStarted);
        }
        self.answers.set(&self.catalogue, question_id, level)
    }

    /// Replaces all answers with those of a previous structured export.
    ///
    /// Questions missing from the export take the default level. The import is
    /// validated in full before the current answers are touched.
    pub fn load_structured(&mut self, export: &StructuredExport) -> Result<(), AssessmentError> {
        let answers = AnswerStore::with_imported(
            &self.catalogue,
            export
                .answers
                .iter()
                .map(|(question, level)| (question.clone(), *level)),
        )?;
        self.answers = answers;
        self.started = true;
        info!(
            answered = self.answers.answered(&self.catalogue),
            "assessment answers loaded from export"
        );
        Ok(())
    }

    pub fn answer(&self, question_id: &str) -> Option<MaturityLevel> {
        self.answers.get(question_id)
    }

    pub fn progress(&self) -> Progress {
        Progress::measure(&self.catalogue, &self.answers)
    }

    pub fn section_scores(&self) -> Result<SectionScores, AssessmentError> {
        compute_section_scores(&self.catalogue, &self.answers)
    }

    pub fn overall_score(&self) -> Result<u8, AssessmentError> {
        let section_scores = self.section_scores()?;
        compute_overall(&self.catalogue, &section_scores)
    }

    pub fn readiness(&self) -> Result<Readiness, AssessmentError> {
        self.overall_score().map(classify)
    }

    pub fn recommendations(&self) -> Result<Vec<Recommendation>, AssessmentError> {
        let section_scores = self.section_scores()?;
        Ok(generate_recommendations(&self.catalogue, &section_scores))
    }

    pub fn report(&self) -> Result<AssessmentReport, AssessmentError> {
        AssessmentReport::build(&self.catalogue, &self.answers)
    }

    pub fn snapshot(&self, generated_at: DateTime<Utc>) -> Result<ExportSnapshot, AssessmentError> {
        ExportSnapshot::capture(&self.catalogue, &self.answers, generated_at)
    }

    pub fn export_tabular(&self) -> Result<TabularExport, AssessmentError> {
        Ok(self.snapshot(Utc::now())?.tabular())
    }

    pub fn export_structured(&self) -> Result<StructuredExport, AssessmentError> {
        Ok(self.snapshot(Utc::now())?.structured())
    }
}
