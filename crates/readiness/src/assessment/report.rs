use super::answers::AnswerStore;
use super::catalogue::{Catalogue, QuestionId};
use super::maturity::MaturityLevel;
use super::readiness::{classify, Readiness};
use super::recommendations::{generate_recommendations, Recommendation, RECOMMENDATION_THRESHOLD};
use super::scoring::{compute_overall, compute_section_scores, SectionScore};
use super::AssessmentError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn measure(catalogue: &Catalogue, answers: &AnswerStore) -> Self {
        Self {
            answered: answers.answered(catalogue),
            total: catalogue.question_count(),
        }
    }

    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f32 / self.total as f32
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionBreakdown {
    pub section: String,
    pub icon: String,
    pub score: u8,
    pub weight_pct: f64,
    pub readiness: Readiness,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetail {
    pub section: String,
    pub question_id: QuestionId,
    pub question: String,
    pub answer: MaturityLevel,
    pub score: u8,
    pub section_score: u8,
}

/// Everything a front end needs to render a results page.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub overall: u8,
    pub readiness: Readiness,
    pub progress: Progress,
    pub strongest: Option<SectionScore>,
    pub priority_focus: Option<SectionScore>,
    /// Sections below the recommendation threshold.
    pub gaps: usize,
    pub sections: Vec<SectionBreakdown>,
    pub questions: Vec<QuestionDetail>,
    pub recommendations: Vec<Recommendation>,
}

impl AssessmentReport {
    pub fn build(catalogue: &Catalogue, answers: &AnswerStore) -> Result<Self, AssessmentError> {
        let section_scores = compute_section_scores(catalogue, answers)?;
        let overall = compute_overall(catalogue, &section_scores)?;

        // ties resolve to the earliest section in catalogue order
        let mut strongest: Option<&SectionScore> = None;
        let mut priority_focus: Option<&SectionScore> = None;
        for entry in section_scores.iter() {
            if strongest.map_or(true, |best| entry.score > best.score) {
                strongest = Some(entry);
            }
            if priority_focus.map_or(true, |worst| entry.score < worst.score) {
                priority_focus = Some(entry);
            }
        }

        let gaps = section_scores
            .iter()
            .filter(|entry| entry.score < RECOMMENDATION_THRESHOLD)
            .count();

        let mut sections = Vec::with_capacity(catalogue.sections().len());
        let mut questions = Vec::with_capacity(catalogue.question_count());
        for section in catalogue.sections() {
            let score = section_scores.get(&section.name).ok_or_else(|| {
                AssessmentError::MissingSectionScore {
                    section: section.name.clone(),
                }
            })?;

            sections.push(SectionBreakdown {
                section: section.name.clone(),
                icon: section.icon.clone(),
                score,
                weight_pct: section.weight * 100.0,
                readiness: classify(score),
            });

            for question in &section.questions {
                let answer = answers.level_for(question)?;
                questions.push(QuestionDetail {
                    section: section.name.clone(),
                    question_id: question.id.clone(),
                    question: question.text.clone(),
                    answer,
                    score: answer.score(),
                    section_score: score,
                });
            }
        }

        Ok(Self {
            overall,
            readiness: classify(overall),
            progress: Progress::measure(catalogue, answers),
            strongest: strongest.cloned(),
            priority_focus: priority_focus.cloned(),
            gaps,
            sections,
            questions,
            recommendations: generate_recommendations(catalogue, &section_scores),
        })
    }
}
