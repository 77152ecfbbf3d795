use super::maturity::MaturityLevel;
use serde::{Deserialize, Serialize};

/// Lower bound of each readiness tier, highest first. The first match wins.
pub const READINESS_THRESHOLDS: [(u8, MaturityLevel); 5] = [
    (90, MaturityLevel::Optimised),
    (75, MaturityLevel::Managed),
    (60, MaturityLevel::Defined),
    (40, MaturityLevel::Developing),
    (0, MaturityLevel::Initial),
];

/// Traffic-light marker displayed next to a readiness label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierMarker {
    Red,
    Orange,
    Yellow,
    Blue,
    Green,
}

impl TierMarker {
    pub const fn for_level(level: MaturityLevel) -> Self {
        match level {
            MaturityLevel::Initial => Self::Red,
            MaturityLevel::Developing => Self::Orange,
            MaturityLevel::Defined => Self::Yellow,
            MaturityLevel::Managed => Self::Blue,
            MaturityLevel::Optimised => Self::Green,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Red => "🔴",
            Self::Orange => "🟠",
            Self::Yellow => "🟡",
            Self::Blue => "🔵",
            Self::Green => "🟢",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    pub level: MaturityLevel,
    pub marker: TierMarker,
    /// Inclusive lower bound of the matched tier.
    pub threshold: u8,
}

impl Readiness {
    pub fn label(&self) -> &'static str {
        self.level.label()
    }
}

/// Maps a score to its readiness tier. Scores above 100 classify as Optimised.
pub fn classify(score: u8) -> Readiness {
    let (threshold, level) = READINESS_THRESHOLDS
        .iter()
        .copied()
        .find(|(threshold, _)| score >= *threshold)
        .unwrap_or((0, MaturityLevel::Initial));

    Readiness {
        level,
        marker: TierMarker::for_level(level),
        threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive_on_the_lower_bound() {
        assert_eq!(classify(90).level, MaturityLevel::Optimised);
        assert_eq!(classify(89).level, MaturityLevel::Managed);
        assert_eq!(classify(75).level, MaturityLevel::Managed);
        assert_eq!(classify(74).level, MaturityLevel::Defined);
        assert_eq!(classify(60).level, MaturityLevel::Defined);
        assert_eq!(classify(59).level, MaturityLevel::Developing);
        assert_eq!(classify(40).level, MaturityLevel::Developing);
        assert_eq!(classify(39).level, MaturityLevel::Initial);
        assert_eq!(classify(0).level, MaturityLevel::Initial);
    }

    #[test]
    fn every_score_lands_in_exactly_one_tier() {
        for score in 0..=100u8 {
            let readiness = classify(score);
            assert!(readiness.threshold <= score);

            let matching = READINESS_THRESHOLDS
                .windows(2)
                .filter(|pair| score >= pair[1].0 && score < pair[0].0)
                .count()
                + usize::from(score >= READINESS_THRESHOLDS[0].0);
            assert_eq!(matching, 1, "score {score} matched {matching} tiers");
        }
    }

    #[test]
    fn classification_is_monotonic() {
        let mut previous = classify(0).level;
        for score in 1..=100u8 {
            let current = classify(score).level;
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn markers_follow_levels() {
        assert_eq!(classify(95).marker, TierMarker::Green);
        assert_eq!(classify(10).marker.symbol(), "🔴");
        assert_eq!(classify(72).label(), "Defined");
    }
}
