use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five ordered stages of process sophistication used for every answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaturityLevel {
    Initial,
    Developing,
    Defined,
    Managed,
    #[serde(alias = "Optimized")]
    Optimised,
}

impl MaturityLevel {
    /// Level assigned to every question when an assessment starts.
    pub const DEFAULT: Self = Self::Defined;

    pub const fn ordered() -> [Self; 5] {
        [
            Self::Initial,
            Self::Developing,
            Self::Defined,
            Self::Managed,
            Self::Optimised,
        ]
    }

    /// Points contributed to a section average.
    pub const fn score(self) -> u8 {
        match self {
            Self::Initial => 20,
            Self::Developing => 40,
            Self::Defined => 60,
            Self::Managed => 80,
            Self::Optimised => 100,
        }
    }

    /// One-based position on the scale.
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Initial => 1,
            Self::Developing => 2,
            Self::Defined => 3,
            Self::Managed => 4,
            Self::Optimised => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Developing => "Developing",
            Self::Defined => "Defined",
            Self::Managed => "Managed",
            Self::Optimised => "Optimised",
        }
    }

    pub const fn descriptor(self) -> &'static str {
        match self {
            Self::Initial => "Ad-hoc / Unstructured",
            Self::Developing => "Emerging Practices",
            Self::Defined => "Documented & Repeatable",
            Self::Managed => "Integrated & Measurable",
            Self::Optimised => "Predictive & Continuous Compliance",
        }
    }

    pub const fn meaning(self) -> &'static str {
        match self {
            Self::Initial => "Processes inconsistent, undocumented, reactive",
            Self::Developing => "Basic patterns forming, still inconsistent",
            Self::Defined => "Policies, procedures & controls documented",
            Self::Managed => "KPIs, SLAs, automation, monitoring in place",
            Self::Optimised => "Fully matured, continuously improved, predictive analytics",
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a maturity level (expected Initial, Developing, Defined, Managed, or Optimised)")]
pub struct UnknownMaturityLevel(pub String);

impl FromStr for MaturityLevel {
    type Err = UnknownMaturityLevel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "initial" | "1" => Ok(Self::Initial),
            "developing" | "2" => Ok(Self::Developing),
            "defined" | "3" => Ok(Self::Defined),
            "managed" | "4" => Ok(Self::Managed),
            "optimised" | "optimized" | "5" => Ok(Self::Optimised),
            _ => Err(UnknownMaturityLevel(raw.to_string())),
        }
    }
}
