use readiness::assessment::{
    AssessmentReport, Catalogue, MaturityLevel, TierMarker, READINESS_THRESHOLDS,
};

pub(crate) fn render_scale() {
    println!("Maturity scale");
    for level in MaturityLevel::ordered() {
        println!(
            "- {} {} ({} points): {}. {}",
            level.ordinal(),
            level,
            level.score(),
            level.descriptor(),
            level.meaning()
        );
    }

    println!("\nReadiness tiers");
    for (threshold, level) in READINESS_THRESHOLDS {
        println!(
            "- {} {}: overall score >= {}",
            TierMarker::for_level(level).symbol(),
            level,
            threshold
        );
    }
}

pub(crate) fn render_questions(catalogue: &Catalogue, include_guidance: bool) {
    println!(
        "{} sections, {} questions",
        catalogue.sections().len(),
        catalogue.question_count()
    );

    for section in catalogue.sections() {
        println!(
            "\n{} {} (weight {:.0}%)",
            section.icon,
            section.name,
            section.weight * 100.0
        );
        if !section.description.is_empty() {
            println!("  {}", section.description);
        }
        for question in &section.questions {
            println!("- [{}] {}", question.id, question.text);
            if include_guidance && !question.guidance.is_empty() {
                println!("    Guidance: {}", question.guidance);
            }
        }
    }
}

pub(crate) fn render_report(report: &AssessmentReport) {
    println!(
        "\nOverall BCBS-239 readiness: {}% {} {}",
        report.overall,
        report.readiness.marker.symbol(),
        report.readiness.label()
    );
    println!(
        "Answered {}/{} questions ({:.0}%)",
        report.progress.answered,
        report.progress.total,
        report.progress.fraction() * 100.0
    );

    if let Some(strongest) = &report.strongest {
        println!("Strongest area: {} ({}%)", strongest.section, strongest.score);
    }
    if let Some(focus) = &report.priority_focus {
        println!("Priority focus: {} ({}%)", focus.section, focus.score);
    }
    println!("Sections below target: {}", report.gaps);

    println!("\nSection breakdown");
    for section in &report.sections {
        println!(
            "- {} {}: {}% (weight {:.0}%) {} {}",
            section.icon,
            section.section,
            section.score,
            section.weight_pct,
            section.readiness.marker.symbol(),
            section.readiness.label()
        );
    }

    if report.recommendations.is_empty() {
        println!("\nRecommendations: none. No critical gaps identified.");
    } else {
        println!("\nRecommendations");
        for recommendation in &report.recommendations {
            println!(
                "- [{}] {} ({}%)",
                recommendation.priority.label(),
                recommendation.section,
                recommendation.score
            );
            for action in &recommendation.actions {
                println!("    * {action}");
            }
        }
    }

    println!("\nAnswers");
    for detail in &report.questions {
        println!(
            "- [{}] {} -> {} ({} points)",
            detail.question_id, detail.question, detail.answer, detail.score
        );
    }
}
