use super::catalogue::{Catalogue, Question, QuestionId};
use super::maturity::MaturityLevel;
use super::AssessmentError;
use std::collections::BTreeMap;
use tracing::warn;

/// Selected maturity level per question for a single assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerStore {
    answers: BTreeMap<QuestionId, MaturityLevel>,
}

impl AnswerStore {
    /// A store with no entries; scoring it fails until every question is answered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every catalogue question set to [`MaturityLevel::DEFAULT`].
    pub fn with_defaults(catalogue: &Catalogue) -> Self {
        let answers = catalogue
            .questions()
            .map(|(_, question)| (question.id.clone(), MaturityLevel::DEFAULT))
            .collect();
        Self { answers }
    }

    /// Rebuilds a store from imported pairs, validating each against the catalogue.
    pub fn from_answers<I>(catalogue: &Catalogue, answers: I) -> Result<Self, AssessmentError>
    where
        I: IntoIterator<Item = (QuestionId, MaturityLevel)>,
    {
        let mut store = Self::empty();
        for (question, level) in answers {
            store.set(catalogue, question.as_str(), level)?;
        }
        Ok(store)
    }

    /// Defaults overlaid with imported pairs; questions the import omits keep the default.
    pub fn with_imported<I>(catalogue: &Catalogue, answers: I) -> Result<Self, AssessmentError>
    where
        I: IntoIterator<Item = (QuestionId, MaturityLevel)>,
    {
        let mut store = Self::with_defaults(catalogue);
        for (question, level) in answers {
            store.set(catalogue, question.as_str(), level)?;
        }
        Ok(store)
    }

    pub fn reset(&mut self, catalogue: &Catalogue) {
        *self = Self::with_defaults(catalogue);
    }

    /// Records one selection. Rejected selections leave the store untouched.
    pub fn set(
        &mut self,
        catalogue: &Catalogue,
        question_id: &str,
        level: MaturityLevel,
    ) -> Result<(), AssessmentError> {
        let question = catalogue.question(question_id).ok_or_else(|| {
            warn!(question = question_id, "answer rejected for unknown question");
            AssessmentError::UnknownQuestion {
                question: QuestionId::from(question_id),
            }
        })?;

        if !question.permits(level) {
            warn!(question = question_id, %level, "answer rejected outside permitted options");
            return Err(AssessmentError::InvalidAnswer {
                question: question.id.clone(),
                level,
            });
        }

        self.answers.insert(question.id.clone(), level);
        Ok(())
    }

    pub fn get(&self, question_id: &str) -> Option<MaturityLevel> {
        self.answers.get(question_id).copied()
    }

    pub(crate) fn level_for(&self, question: &Question) -> Result<MaturityLevel, AssessmentError> {
        self.get(question.id.as_str())
            .ok_or_else(|| AssessmentError::MissingAnswer {
                question: question.id.clone(),
            })
    }

    /// Number of catalogue questions with a recorded answer.
    pub fn answered(&self, catalogue: &Catalogue) -> usize {
        catalogue
            .questions()
            .filter(|(_, question)| self.answers.contains_key(question.id.as_str()))
            .count()
    }

    pub fn is_complete(&self, catalogue: &Catalogue) -> bool {
        self.answered(catalogue) == catalogue.question_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, MaturityLevel)> {
        self.answers.iter().map(|(id, level)| (id, *level))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}
