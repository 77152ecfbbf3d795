use super::bcbs239::{self, KnownSection};
use super::maturity::MaturityLevel;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::info;

/// Allowed drift between the summed section weights and 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Stable identity of a question, used as the key of answers and exports.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    /// Levels a respondent may pick, in display order.
    #[serde(default = "full_scale")]
    pub options: Vec<MaturityLevel>,
    /// Advisory text shown next to the question; never scored.
    #[serde(default)]
    pub guidance: String,
}

impl Question {
    pub fn permits(&self, level: MaturityLevel) -> bool {
        self.options.contains(&level)
    }
}

fn full_scale() -> Vec<MaturityLevel> {
    MaturityLevel::ordered().to_vec()
}

/// Weighted grouping of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<Question>,
}

impl Section {
    /// Resolves the section against the curated BCBS-239 sections, if it is one of them.
    pub fn known(&self) -> Option<KnownSection> {
        KnownSection::from_name(&self.name)
    }
}

/// Validated, immutable set of sections that defines an assessment.
///
/// Construction always runs [`Catalogue::new`]'s checks, so a `Catalogue` value
/// has unique section names and question ids, non-empty sections, and weights
/// that sum to 1.0 within [`WEIGHT_TOLERANCE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalogue {
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct CatalogueDefinition {
    sections: Vec<Section>,
}

impl Catalogue {
    pub fn new(sections: Vec<Section>) -> Result<Self, CatalogueError> {
        validate(&sections)?;
        Ok(Self { sections })
    }

    /// The built-in BCBS-239 readiness catalogue.
    pub fn bcbs239() -> Result<Self, CatalogueError> {
        Self::new(bcbs239::standard_sections())
    }

    /// Loads a JSON definition of the form `{"sections": [...]}`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogueError> {
        let definition: CatalogueDefinition = serde_json::from_reader(reader)?;
        let catalogue = Self::new(definition.sections)?;
        info!(
            sections = catalogue.sections.len(),
            questions = catalogue.question_count(),
            "catalogue definition loaded"
        );
        Ok(catalogue)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogueError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    #[cfg(test)]
    pub(crate) fn from_sections_unchecked(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions()
            .map(|(_, question)| question)
            .find(|question| question.id.as_str() == id)
    }

    /// Every question paired with its section, in catalogue order.
    pub fn questions(&self) -> impl Iterator<Item = (&Section, &Question)> {
        self.sections.iter().flat_map(|section| {
            section
                .questions
                .iter()
                .map(move |question| (section, question))
        })
    }

    pub fn question_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.questions.len())
            .sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.sections.iter().map(|section| section.weight).sum()
    }
}

fn validate(sections: &[Section]) -> Result<(), CatalogueError> {
    if sections.is_empty() {
        return Err(CatalogueError::NoSections);
    }

    let mut section_names = HashSet::new();
    let mut question_ids = HashSet::new();

    for section in sections {
        if !section_names.insert(section.name.as_str()) {
            return Err(CatalogueError::DuplicateSection {
                section: section.name.clone(),
            });
        }

        if !(section.weight > 0.0 && section.weight <= 1.0) {
            return Err(CatalogueError::WeightOutOfRange {
                section: section.name.clone(),
                weight: section.weight,
            });
        }

        if section.questions.is_empty() {
            return Err(CatalogueError::EmptySection {
                section: section.name.clone(),
            });
        }

        for question in &section.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(CatalogueError::DuplicateQuestion {
                    question: question.id.clone(),
                });
            }
            if question.options.is_empty() {
                return Err(CatalogueError::NoOptions {
                    question: question.id.clone(),
                });
            }
        }
    }

    let total: f64 = sections.iter().map(|section| section.weight).sum();
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(CatalogueError::WeightSum { total });
    }

    Ok(())
}

/// Catalogue invariant violations. Fatal at load time.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("catalogue defines no sections")]
    NoSections,
    #[error("section '{section}' has no questions")]
    EmptySection { section: String },
    #[error("section '{section}' is defined more than once")]
    DuplicateSection { section: String },
    #[error("question '{question}' is defined more than once")]
    DuplicateQuestion { question: QuestionId },
    #[error("section '{section}' weight {weight} must be within (0, 1]")]
    WeightOutOfRange { section: String, weight: f64 },
    #[error("section weights sum to {total}, expected 1.0")]
    WeightSum { total: f64 },
    #[error("question '{question}' permits no maturity levels")]
    NoOptions { question: QuestionId },
    #[error("unable to parse catalogue definition: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unable to read catalogue definition {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str) -> Question {
        Question {
            id: QuestionId::from(id),
            text: format!("Question {id}?"),
            options: full_scale(),
            guidance: String::new(),
        }
    }

    fn section(name: &str, weight: f64, ids: &[&str]) -> Section {
        Section {
            name: name.to_string(),
            weight,
            icon: String::new(),
            description: String::new(),
            questions: ids.iter().map(|id| question(id)).collect(),
        }
    }

    #[test]
    fn standard_catalogue_is_valid() {
        let catalogue = Catalogue::bcbs239().expect("built-in catalogue validates");
        assert_eq!(catalogue.sections().len(), 5);
        assert_eq!(catalogue.question_count(), 17);
        assert!((catalogue.total_weight() - 1.0).abs() <= WEIGHT_TOLERANCE);
        assert!(catalogue
            .sections()
            .iter()
            .all(|section| section.known().is_some()));
    }

    #[test]
    fn rejects_weights_that_do_not_sum_to_one() {
        let err = Catalogue::new(vec![
            section("A", 0.5, &["a1"]),
            section("B", 0.4, &["b1"]),
        ])
        .expect_err("weights sum to 0.9");
        assert!(matches!(err, CatalogueError::WeightSum { .. }));
    }

    #[test]
    fn tolerates_floating_point_weight_drift() {
        Catalogue::new(vec![
            section("A", 0.1, &["a1"]),
            section("B", 0.2, &["b1"]),
            section("C", 0.7, &["c1"]),
        ])
        .expect("0.1 + 0.2 + 0.7 is within tolerance");
    }

    #[test]
    fn rejects_empty_sections_and_duplicates() {
        let err = Catalogue::new(vec![section("A", 0.5, &[]), section("B", 0.5, &["b1"])])
            .expect_err("empty section");
        assert!(matches!(err, CatalogueError::EmptySection { section } if section == "A"));

        let err = Catalogue::new(vec![
            section("A", 0.5, &["same"]),
            section("B", 0.5, &["same"]),
        ])
        .expect_err("duplicate question id");
        assert!(matches!(err, CatalogueError::DuplicateQuestion { .. }));

        let err = Catalogue::new(vec![section("A", 0.5, &["a1"]), section("A", 0.5, &["a2"])])
            .expect_err("duplicate section");
        assert!(matches!(err, CatalogueError::DuplicateSection { .. }));
    }

    #[test]
    fn rejects_out_of_range_weights() {
        let err = Catalogue::new(vec![section("A", 0.0, &["a1"]), section("B", 1.0, &["b1"])])
            .expect_err("zero weight");
        assert!(matches!(err, CatalogueError::WeightOutOfRange { .. }));
    }

    #[test]
    fn loads_json_definition_with_default_options() {
        let json = r#"{
            "sections": [
                {"name": "Alpha", "weight": 0.6, "questions": [{"id": "a1", "text": "First?"}]},
                {"name": "Beta", "weight": 0.4, "questions": [
                    {"id": "b1", "text": "Second?", "options": ["Initial", "Managed"], "guidance": "Be honest"}
                ]}
            ]
        }"#;

        let catalogue = Catalogue::from_reader(json.as_bytes()).expect("definition loads");
        let first = catalogue.question("a1").expect("a1 present");
        assert_eq!(first.options.len(), 5);
        let second = catalogue.question("b1").expect("b1 present");
        assert!(second.permits(MaturityLevel::Managed));
        assert!(!second.permits(MaturityLevel::Defined));
        assert!(catalogue.section("Alpha").and_then(Section::known).is_none());
    }

    #[test]
    fn surfaces_parse_errors() {
        let err = Catalogue::from_reader("{\"sections\": 3}".as_bytes()).expect_err("bad json");
        assert!(matches!(err, CatalogueError::Parse(_)));
    }
}
