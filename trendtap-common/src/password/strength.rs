use serde::{Deserialize, Serialize};

/// Advisory strength band. Validity is decided separately; a password can
/// land in a high band and still fail the policy gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthCategory {
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthCategory {
    /// Fixed score breakpoints. Any unmet requirement pins the result to the
    /// lowest band regardless of score.
    pub fn from_score(score: u8, all_requirements_met: bool) -> Self {
        if !all_requirements_met || score < 20 {
            Self::VeryWeak
        } else if score < 40 {
            Self::Weak
        } else if score < 60 {
            Self::Fair
        } else if score < 80 {
            Self::Good
        } else if score < 95 {
            Self::Strong
        } else {
            Self::VeryStrong
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryWeak => "very_weak",
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
            Self::VeryStrong => "very_strong",
        }
    }
}
