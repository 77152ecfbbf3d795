//! Section and overall score aggregation.
//!
//! All rounding is half up (x.5 goes to x + 1). Section means are rounded with
//! integer arithmetic so ties are exact; the weighted overall sum is computed in
//! `f64` and nudged by [`ROUNDING_EPSILON`] before rounding so that weights such
//! as 0.1 or 0.3, which have no exact binary form, cannot turn a true x.5 into
//! x.4999… and round it down.

use super::answers::AnswerStore;
use super::catalogue::{Catalogue, CatalogueError};
use super::AssessmentError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAX_SCORE: u8 = 100;
pub const ROUNDING_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    pub section: String,
    pub score: u8,
}

/// Section scores in catalogue order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionScores(Vec<SectionScore>);

impl SectionScores {
    pub fn new(scores: Vec<SectionScore>) -> Self {
        Self(scores)
    }

    pub fn get(&self, section: &str) -> Option<u8> {
        self.0
            .iter()
            .find(|entry| entry.section == section)
            .map(|entry| entry.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionScore> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u8)> for SectionScores {
    fn from_iter<T: IntoIterator<Item = (S, u8)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(section, score)| SectionScore {
                    section: section.into(),
                    score,
                })
                .collect(),
        )
    }
}

pub fn compute_section_scores(
    catalogue: &Catalogue,
    answers: &AnswerStore,
) -> Result<SectionScores, AssessmentError> {
    let mut scores = Vec::with_capacity(catalogue.sections().len());

    for section in catalogue.sections() {
        if section.questions.is_empty() {
            return Err(AssessmentError::Configuration(
                CatalogueError::EmptySection {
                    section: section.name.clone(),
                },
            ));
        }

        let mut total: u32 = 0;
        for question in &section.questions {
            total += u32::from(answers.level_for(question)?.score());
        }

        let count = section.questions.len() as u32;
        let score = mean_half_up(total, count);
        debug!(section = %section.name, total, count, score, "section scored");

        scores.push(SectionScore {
            section: section.name.clone(),
            score,
        });
    }

    Ok(SectionScores(scores))
}

pub fn compute_overall(
    catalogue: &Catalogue,
    section_scores: &SectionScores,
) -> Result<u8, AssessmentError> {
    let mut weighted = 0.0_f64;

    for section in catalogue.sections() {
        let score = section_scores.get(&section.name).ok_or_else(|| {
            AssessmentError::MissingSectionScore {
                section: section.name.clone(),
            }
        })?;
        weighted += f64::from(score) * section.weight;
    }

    let overall = round_half_up(weighted);
    debug!(weighted, overall, "overall score computed");
    Ok(overall)
}

/// Rounds a non-negative score half up and clamps it to `0..=100`.
pub fn round_half_up(value: f64) -> u8 {
    let rounded = (value + ROUNDING_EPSILON).round();
    rounded.clamp(0.0, f64::from(MAX_SCORE)) as u8
}

fn mean_half_up(total: u32, count: u32) -> u8 {
    let rounded = (2 * total + count) / (2 * count);
    rounded.min(u32::from(MAX_SCORE)) as u8
}

#[cfg(test)]
mod tests {
    use super::super::catalogue::{Question, QuestionId, Section};
    use super::super::maturity::MaturityLevel;
    use super::*;

    fn section(name: &str, weight: f64, question_count: usize) -> Section {
        Section {
            name: name.to_string(),
            weight,
            icon: String::new(),
            description: String::new(),
            questions: (0..question_count)
                .map(|index| Question {
                    id: QuestionId(format!("{}-{index}", name.to_lowercase())),
                    text: format!("{name} question {index}"),
                    options: MaturityLevel::ordered().to_vec(),
                    guidance: String::new(),
                })
                .collect(),
        }
    }

    fn answer_all(catalogue: &Catalogue, levels: &[MaturityLevel]) -> AnswerStore {
        let pairs = catalogue
            .questions()
            .zip(levels.iter().copied())
            .map(|((_, question), level)| (question.id.clone(), level));
        AnswerStore::from_answers(catalogue, pairs).expect("answers validate")
    }

    #[test]
    fn section_mean_ties_round_half_up() {
        let catalogue = Catalogue::new(vec![section("Eight", 1.0, 8)]).expect("valid");
        // 6 x 60 + 20 + 40 = 420, mean 52.5
        let mut levels = vec![MaturityLevel::Defined; 6];
        levels.push(MaturityLevel::Initial);
        levels.push(MaturityLevel::Developing);
        let answers = answer_all(&catalogue, &levels);

        let scores = compute_section_scores(&catalogue, &answers).expect("scores");
        assert_eq!(scores.get("Eight"), Some(53));
    }

    #[test]
    fn overall_ties_round_half_up() {
        let catalogue =
            Catalogue::new(vec![section("A", 0.5, 1), section("B", 0.5, 1)]).expect("valid");
        let scores: SectionScores = vec![("A", 55), ("B", 50)].into_iter().collect();
        assert_eq!(compute_overall(&catalogue, &scores).expect("overall"), 53);
    }

    #[test]
    fn overall_tie_survives_inexact_weights() {
        let catalogue = Catalogue::new(vec![
            section("A", 0.1, 1),
            section("B", 0.3, 1),
            section("C", 0.6, 1),
        ])
        .expect("valid");
        // 0.3 * 1 + 0.6 * 12 is 7.5 exactly but sums to 7.4999999999999991 in f64
        let scores: SectionScores = vec![("A", 0), ("B", 1), ("C", 12)].into_iter().collect();
        assert_eq!(compute_overall(&catalogue, &scores).expect("overall"), 8);

        let scores: SectionScores = vec![("A", 5), ("B", 0), ("C", 0)].into_iter().collect();
        assert_eq!(compute_overall(&catalogue, &scores).expect("overall"), 1);
    }

    #[test]
    fn missing_answer_is_reported() {
        let catalogue = Catalogue::new(vec![section("A", 1.0, 2)]).expect("valid");
        let answers = answer_all(&catalogue, &[MaturityLevel::Managed]);

        let err = compute_section_scores(&catalogue, &answers).expect_err("one unanswered");
        assert!(matches!(
            err,
            AssessmentError::MissingAnswer { question } if question.as_str() == "a-1"
        ));
    }

    #[test]
    fn empty_section_is_a_configuration_error() {
        let catalogue = Catalogue::from_sections_unchecked(vec![section("Empty", 1.0, 0)]);
        let err = compute_section_scores(&catalogue, &AnswerStore::empty())
            .expect_err("empty section cannot be averaged");
        assert!(matches!(
            err,
            AssessmentError::Configuration(CatalogueError::EmptySection { .. })
        ));
    }

    #[test]
    fn overall_requires_every_section_score() {
        let catalogue =
            Catalogue::new(vec![section("A", 0.5, 1), section("B", 0.5, 1)]).expect("valid");
        let scores: SectionScores = vec![("A", 80)].into_iter().collect();
        let err = compute_overall(&catalogue, &scores).expect_err("B missing");
        assert!(matches!(
            err,
            AssessmentError::MissingSectionScore { section } if section == "B"
        ));
    }

    #[test]
    fn round_half_up_clamps_to_score_range() {
        assert_eq!(round_half_up(-3.0), 0);
        assert_eq!(round_half_up(100.4), 100);
        assert_eq!(round_half_up(140.0), 100);
        assert_eq!(round_half_up(71.5), 72);
        assert_eq!(round_half_up(72.5), 73);
    }
}
