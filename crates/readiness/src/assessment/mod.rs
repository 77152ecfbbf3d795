//! Readiness assessment scoring, classification, recommendation, and export.
//!
//! A [`Catalogue`] is validated once and shared read-only; each
//! [`AssessmentSession`] owns its own [`AnswerStore`]. Every derived value is
//! recomputed from those two on request.

mod answers;
pub mod bcbs239;
mod catalogue;
pub mod export;
mod maturity;
pub mod readiness;
pub mod recommendations;
pub mod report;
pub mod scoring;
mod session;

pub use answers::AnswerStore;
pub use bcbs239::KnownSection;
pub use catalogue::{Catalogue, CatalogueError, Question, QuestionId, Section, WEIGHT_TOLERANCE};
pub use export::{
    ExportError, ExportFormat, ExportRow, ExportSnapshot, StructuredExport, TabularExport,
    SCHEMA_VERSION,
};
pub use maturity::{MaturityLevel, UnknownMaturityLevel};
pub use readiness::{classify, Readiness, TierMarker, READINESS_THRESHOLDS};
pub use recommendations::{generate_recommendations, Priority, Recommendation};
pub use report::{AssessmentReport, Progress};
pub use scoring::{compute_overall, compute_section_scores, SectionScore, SectionScores};
pub use session::AssessmentSession;

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("catalogue configuration error: {0}")]
    Configuration(#[from] CatalogueError),
    #[error("question '{question}' has no recorded answer")]
    MissingAnswer { question: QuestionId },
    #[error("'{level}' is not a permitted answer for question '{question}'")]
    InvalidAnswer {
        question: QuestionId,
        level: MaturityLevel,
    },
    #[error("question '{question}' is not part of the catalogue")]
    UnknownQuestion { question: QuestionId },
    #[error("no score was computed for section '{section}'")]
    MissingSectionScore { section: String },
    #[error("assessment has not been started")]
    NotStarted,
}
