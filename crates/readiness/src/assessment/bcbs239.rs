use super::catalogue::{Question, QuestionId, Section};
use super::maturity::MaturityLevel;
use serde::{Deserialize, Serialize};

/// Sections of the curated BCBS-239 catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownSection {
    GovernanceAndOwnership,
    DataQualityAndControls,
    LineageAndTraceability,
    Bcbs239SpecificControls,
    OperationalResilience,
}

impl KnownSection {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::GovernanceAndOwnership,
            Self::DataQualityAndControls,
            Self::LineageAndTraceability,
            Self::Bcbs239SpecificControls,
            Self::OperationalResilience,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::GovernanceAndOwnership => "Governance & Ownership",
            Self::DataQualityAndControls => "Data Quality & Controls",
            Self::LineageAndTraceability => "Lineage & Traceability",
            Self::Bcbs239SpecificControls => "BCBS-239 Specific Controls",
            Self::OperationalResilience => "Operational Resilience & Auditability",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|section| section.name() == name)
    }
}

struct QuestionSpec {
    id: &'static str,
    text: &'static str,
    guidance: &'static str,
}

fn section(
    kind: KnownSection,
    weight: f64,
    icon: &str,
    description: &str,
    questions: &[QuestionSpec],
) -> Section {
    Section {
        name: kind.name().to_string(),
        weight,
        icon: icon.to_string(),
        description: description.to_string(),
        questions: questions
            .iter()
            .map(|spec| Question {
                id: QuestionId::from(spec.id),
                text: spec.text.to_string(),
                options: MaturityLevel::ordered().to_vec(),
                guidance: spec.guidance.to_string(),
            })
            .collect(),
    }
}

pub(crate) fn standard_sections() -> Vec<Section> {
    vec![
        section(
            KnownSection::GovernanceAndOwnership,
            0.20,
            "🏛️",
            "Strategic oversight and accountability for risk data management",
            &[
                QuestionSpec {
                    id: "governance_data_ownership",
                    text: "Is there clear data ownership defined for critical risk data elements?",
                    guidance: "CDEs should have named owners with defined responsibilities",
                },
                QuestionSpec {
                    id: "governance_policies_updated",
                    text: "Have policies and procedures been updated to reflect BCBS-239 requirements?",
                    guidance: "Documentation should explicitly reference BCBS-239 principles",
                },
                QuestionSpec {
                    id: "governance_steering_committee",
                    text: "Is there a steering committee or oversight body assigned responsibility for risk data aggregation?",
                    guidance: "Regular meetings and documented decision-making authority required",
                },
            ],
        ),
        section(
            KnownSection::DataQualityAndControls,
            0.30,
            "✓",
            "Automated validation and monitoring of data accuracy and completeness",
            &[
                QuestionSpec {
                    id: "quality_automated_rules",
                    text: "Are automated data quality rules implemented for Critical Data Elements (CDEs)?",
                    guidance: "Rules should run automatically and generate alerts on failures",
                },
                QuestionSpec {
                    id: "quality_sla_monitoring",
                    text: "Do you measure and monitor data quality SLAs (timeliness, accuracy, completeness)?",
                    guidance: "Metrics should be tracked and reviewed regularly",
                },
                QuestionSpec {
                    id: "quality_reconciliation",
                    text: "Are reconciliation processes defined and executed for risk figures (daily/monthly)?",
                    guidance: "Formal rec processes with documented break resolution",
                },
                QuestionSpec {
                    id: "quality_exception_management",
                    text: "Is there an exception management process that tracks remediation and closure?",
                    guidance: "Workflow system for logging, assigning, and closing exceptions",
                },
            ],
        ),
        section(
            KnownSection::LineageAndTraceability,
            0.20,
            "🔍",
            "End-to-end visibility of data flow from source to report",
            &[
                QuestionSpec {
                    id: "lineage_end_to_end",
                    text: "Can you demonstrate end-to-end lineage for each CDE from source to report?",
                    guidance: "Visual lineage or documentation showing complete data flow",
                },
                QuestionSpec {
                    id: "lineage_transformation_logic",
                    text: "Is transformation logic documented, versioned, and accessible to auditors?",
                    guidance: "Version control for ETL code and business rules",
                },
                QuestionSpec {
                    id: "lineage_drill_down",
                    text: "Can you trace aggregated risk numbers back to source systems and transformations?",
                    guidance: "Ability to drill down from reports to source records",
                },
            ],
        ),
        section(
            KnownSection::Bcbs239SpecificControls,
            0.20,
            "🎯",
            "Controls specifically addressing BCBS-239 principle requirements",
            &[
                QuestionSpec {
                    id: "controls_cde_catalogue",
                    text: "Is there a maintained catalogue of CDEs with owners and business definitions?",
                    guidance: "Centralized repository with metadata and stewardship info",
                },
                QuestionSpec {
                    id: "controls_aggregation_rules",
                    text: "Are aggregation rules across legal entities defined and validated?",
                    guidance: "Consolidation logic with appropriate eliminations and adjustments",
                },
                QuestionSpec {
                    id: "controls_stress_checks",
                    text: "Do you perform stress or scenario checks to validate risk-data aggregation logic?",
                    guidance: "Testing with boundary conditions and extreme scenarios",
                },
                QuestionSpec {
                    id: "controls_independent_validation",
                    text: "Is there an independent validation function or second-line checks for key controls?",
                    guidance: "Separate team performing periodic control testing",
                },
            ],
        ),
        section(
            KnownSection::OperationalResilience,
            0.10,
            "🛡️",
            "Incident response capability and audit trail completeness",
            &[
                QuestionSpec {
                    id: "resilience_incident_runbooks",
                    text: "Are runbooks and incident playbooks defined for data incidents affecting risk reporting?",
                    guidance: "Step-by-step procedures for common incident scenarios",
                },
                QuestionSpec {
                    id: "resilience_audit_trail",
                    text: "Is an audit trail available for changes to critical data and transformation logic?",
                    guidance: "Complete change logs with user, timestamp, and reason",
                },
                QuestionSpec {
                    id: "resilience_recovery_slas",
                    text: "Are recovery and reconciliation SLAs defined for critical data flows?",
                    guidance: "Time-bound commitments for data restoration and validation",
                },
            ],
        ),
    ]
}
