use super::bcbs239::KnownSection;
use super::catalogue::Catalogue;
use super::scoring::SectionScores;
use serde::{Deserialize, Serialize};

/// Sections scoring below this produce a recommendation.
pub const RECOMMENDATION_THRESHOLD: u8 = 70;
/// Sections scoring below this are high priority.
pub const HIGH_PRIORITY_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn for_score(score: u8) -> Self {
        if score < HIGH_PRIORITY_THRESHOLD {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub section: String,
    pub score: u8,
    pub priority: Priority,
    pub actions: Vec<String>,
}

/// Remediation steps for each curated section.
pub const fn remediation_actions(section: KnownSection) -> [&'static str; 3] {
    match section {
        KnownSection::GovernanceAndOwnership => [
            "Establish a BCBS-239 steering committee",
            "Assign data owners for all CDEs",
            "Update governance policies to reference BCBS-239",
        ],
        KnownSection::DataQualityAndControls => [
            "Implement automated DQ rules for CDEs",
            "Define and monitor DQ SLAs",
            "Establish exception management workflows",
        ],
        KnownSection::LineageAndTraceability => [
            "Document end-to-end lineage for all CDEs",
            "Version control all transformation logic",
            "Enable drill-down capability in reports",
        ],
        KnownSection::Bcbs239SpecificControls => [
            "Create comprehensive CDE catalogue",
            "Validate aggregation rules across entities",
            "Implement independent validation checks",
        ],
        KnownSection::OperationalResilience => [
            "Develop incident response runbooks",
            "Enable complete audit trails",
            "Define recovery SLAs for critical flows",
        ],
    }
}

/// Recommendations for every under-performing section, in catalogue order.
///
/// An empty result means no section fell below [`RECOMMENDATION_THRESHOLD`].
/// Sections outside the curated set still get a recommendation, with no actions.
/// Sections absent from `section_scores` are skipped.
pub fn generate_recommendations(
    catalogue: &Catalogue,
    section_scores: &SectionScores,
) -> Vec<Recommendation> {
    catalogue
        .sections()
        .iter()
        .filter_map(|section| {
            let score = section_scores.get(&section.name)?;
            if score >= RECOMMENDATION_THRESHOLD {
                return None;
            }

            let actions = match section.known() {
                Some(known) => remediation_actions(known)
                    .iter()
                    .map(|action| action.to_string())
                    .collect(),
                None => Vec::new(),
            };

            Some(Recommendation {
                section: section.name.clone(),
                score,
                priority: Priority::for_score(score),
                actions,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Catalogue {
        Catalogue::bcbs239().expect("catalogue validates")
    }

    fn scores(values: [u8; 5]) -> SectionScores {
        KnownSection::ordered()
            .into_iter()
            .map(KnownSection::name)
            .zip(values)
            .collect()
    }

    #[test]
    fn threshold_boundaries_pin_priority() {
        let catalogue = catalogue();
        let recommendations = generate_recommendations(&catalogue, &scores([70, 69, 50, 49, 100]));

        let summary: Vec<(&str, u8, Priority)> = recommendations
            .iter()
            .map(|rec| (rec.section.as_str(), rec.score, rec.priority))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Data Quality & Controls", 69, Priority::Medium),
                ("Lineage & Traceability", 50, Priority::Medium),
                ("BCBS-239 Specific Controls", 49, Priority::High),
            ]
        );
    }

    #[test]
    fn all_sections_at_or_above_threshold_yield_nothing() {
        let catalogue = catalogue();
        assert!(generate_recommendations(&catalogue, &scores([70, 80, 90, 100, 75])).is_empty());
    }

    #[test]
    fn curated_sections_carry_three_actions() {
        let catalogue = catalogue();
        let recommendations = generate_recommendations(&catalogue, &scores([20; 5]));
        assert_eq!(recommendations.len(), 5);
        assert!(recommendations.iter().all(|rec| rec.actions.len() == 3));
        assert_eq!(recommendations[0].actions[0], "Establish a BCBS-239 steering committee");
        assert!(recommendations
            .iter()
            .all(|rec| rec.priority == Priority::High));
    }

    #[test]
    fn unrecognised_sections_get_empty_actions() {
        let json = r#"{"sections": [
            {"name": "Governance & Ownership", "weight": 0.5, "questions": [{"id": "g1", "text": "Owners?"}]},
            {"name": "Climate Risk Data", "weight": 0.5, "questions": [{"id": "c1", "text": "Climate?"}]}
        ]}"#;
        let catalogue = Catalogue::from_reader(json.as_bytes()).expect("catalogue loads");
        let section_scores: SectionScores =
            vec![("Governance & Ownership", 40), ("Climate Risk Data", 60)]
                .into_iter()
                .collect();

        let recommendations = generate_recommendations(&catalogue, &section_scores);
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].priority, Priority::High);
        assert_eq!(recommendations[0].actions.len(), 3);
        assert_eq!(recommendations[1].section, "Climate Risk Data");
        assert_eq!(recommendations[1].priority, Priority::Medium);
        assert!(recommendations[1].actions.is_empty());
    }
}
