use super::answers::AnswerStore;
use super::catalogue::{Catalogue, QuestionId};
use super::maturity::MaturityLevel;
use super::scoring::{compute_overall, compute_section_scores, SectionScores};
use super::AssessmentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{Read, Write};

/// Version stamped into every structured export.
pub const SCHEMA_VERSION: &str = "2.0";

pub const TABULAR_HEADER: [&str; 6] = [
    "Section",
    "Question",
    "Answer",
    "Score",
    "SectionScore",
    "SectionWeight",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Timestamped download name, e.g. `bcbs239_assessment_20251016_091500.csv`.
    pub fn file_name(self, generated_at: DateTime<Utc>) -> String {
        format!(
            "bcbs239_assessment_{}.{}",
            generated_at.format("%Y%m%d_%H%M%S"),
            self.extension()
        )
    }
}

/// One tabular row per question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExportRow {
    pub section: String,
    pub question: String,
    pub answer: MaturityLevel,
    pub score: u8,
    pub section_score: u8,
    pub section_weight: f64,
}

/// Point-in-time view of an assessment from which both export formats are built.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSnapshot {
    pub generated_at: DateTime<Utc>,
    pub schema_version: String,
    pub overall: u8,
    pub section_scores: SectionScores,
    pub weights: Vec<(String, f64)>,
    pub answers: Vec<(QuestionId, MaturityLevel)>,
    pub rows: Vec<ExportRow>,
}

impl ExportSnapshot {
    pub fn capture(
        catalogue: &Catalogue,
        answers: &AnswerStore,
        generated_at: DateTime<Utc>,
    ) -> Result<Self, AssessmentError> {
        let section_scores = compute_section_scores(catalogue, answers)?;
        let overall = compute_overall(catalogue, &section_scores)?;

        let mut rows = Vec::with_capacity(catalogue.question_count());
        let mut answer_pairs = Vec::with_capacity(catalogue.question_count());
        for (section, question) in catalogue.questions() {
            let answer = answers.level_for(question)?;
            let section_score = section_scores.get(&section.name).ok_or_else(|| {
                AssessmentError::MissingSectionScore {
                    section: section.name.clone(),
                }
            })?;

            answer_pairs.push((question.id.clone(), answer));
            rows.push(ExportRow {
                section: section.name.clone(),
                question: question.text.clone(),
                answer,
                score: answer.score(),
                section_score,
                section_weight: section.weight,
            });
        }

        let weights = catalogue
            .sections()
            .iter()
            .map(|section| (section.name.clone(), section.weight))
            .collect();

        Ok(Self {
            generated_at,
            schema_version: SCHEMA_VERSION.to_string(),
            overall,
            section_scores,
            weights,
            answers: answer_pairs,
            rows,
        })
    }

    pub fn tabular(&self) -> TabularExport {
        TabularExport {
            rows: self.rows.clone(),
        }
    }

    pub fn structured(&self) -> StructuredExport {
        StructuredExport {
            generated_at: self.generated_at,
            schema_version: self.schema_version.clone(),
            overall: self.overall,
            sections: self
                .section_scores
                .iter()
                .map(|entry| (entry.section.clone(), entry.score))
                .collect(),
            answers: self.answers.iter().cloned().collect(),
            weights: self.weights.iter().cloned().collect(),
        }
    }
}

/// Comma-separated export, one row per question in catalogue order.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularExport {
    pub rows: Vec<ExportRow>,
}

impl TabularExport {
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(TABULAR_HEADER)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv(&self) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExportError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let rows = reader
            .deserialize::<ExportRow>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }
}

/// Nested JSON export. Re-importing its `answers` reproduces `overall` and `sections`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredExport {
    pub generated_at: DateTime<Utc>,
    pub schema_version: String,
    pub overall: u8,
    pub sections: BTreeMap<String, u8>,
    pub answers: BTreeMap<QuestionId, MaturityLevel>,
    pub weights: BTreeMap<String, f64>,
}

impl StructuredExport {
    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Validates the exported answers against `catalogue` and loads them into a store.
    pub fn answer_store(&self, catalogue: &Catalogue) -> Result<AnswerStore, AssessmentError> {
        AnswerStore::from_answers(
            catalogue,
            self.answers
                .iter()
                .map(|(question, level)| (question.clone(), *level)),
        )
    }

    /// Scores the exported answers afresh.
    pub fn recompute(&self, catalogue: &Catalogue) -> Result<(SectionScores, u8), AssessmentError> {
        let answers = self.answer_store(catalogue)?;
        let section_scores = compute_section_scores(catalogue, &answers)?;
        let overall = compute_overall(catalogue, &section_scores)?;
        Ok((section_scores, overall))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("export produced invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 16, 9, 15, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn file_names_carry_timestamp_and_extension() {
        assert_eq!(
            ExportFormat::Csv.file_name(generated_at()),
            "bcbs239_assessment_20251016_091500.csv"
        );
        assert_eq!(
            ExportFormat::Json.file_name(generated_at()),
            "bcbs239_assessment_20251016_091500.json"
        );
    }

    #[test]
    fn csv_starts_with_header_and_has_one_row_per_question() {
        let catalogue = Catalogue::bcbs239().expect("catalogue validates");
        let answers = AnswerStore::with_defaults(&catalogue);
        let snapshot =
            ExportSnapshot::capture(&catalogue, &answers, generated_at()).expect("snapshot");

        let csv = snapshot.tabular().to_csv().expect("csv renders");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Section,Question,Answer,Score,SectionScore,SectionWeight")
        );
        assert_eq!(
            lines.next(),
            Some("Governance & Ownership,Is there clear data ownership defined for critical risk data elements?,Defined,60,60,0.2")
        );
        assert_eq!(lines.count(), catalogue.question_count() - 1);
    }

    #[test]
    fn structured_json_uses_exact_top_level_keys() {
        let catalogue = Catalogue::bcbs239().expect("catalogue validates");
        let answers = AnswerStore::with_defaults(&catalogue);
        let snapshot =
            ExportSnapshot::capture(&catalogue, &answers, generated_at()).expect("snapshot");

        let json = snapshot.structured().to_json_pretty().expect("json renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let object = value.as_object().expect("top level object");

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["answers", "generatedAt", "overall", "schemaVersion", "sections", "weights"]
        );
        assert_eq!(object["generatedAt"], "2025-10-16T09:15:00Z");
        assert_eq!(object["schemaVersion"], SCHEMA_VERSION);
        assert_eq!(object["overall"], 60);
        assert_eq!(object["answers"]["quality_reconciliation"], "Defined");
        assert_eq!(object["weights"]["Data Quality & Controls"], 0.3);
    }
}
