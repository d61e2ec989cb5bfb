//! Maturity level names and score-to-level mapping.

use serde::{Deserialize, Serialize};

/// The passing threshold used for both tier gating and recommendation
/// triggering: a criterion is considered established once it reaches
/// Defined (3.0).
pub const DEFINED_THRESHOLD: f64 = 3.0;

/// The five DEBMM maturity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaturityLevel {
    /// Level 1: ad-hoc, undocumented practices
    Initial,
    /// Level 2: repeatable but inconsistent
    Repeatable,
    /// Level 3: documented and consistently applied
    Defined,
    /// Level 4: measured and controlled
    Managed,
    /// Level 5: continuously improved
    Optimized,
}

impl MaturityLevel {
    /// Map a numeric score to the nearest maturity level.
    ///
    /// Uses round-half-to-even, matching the reference scoring convention,
    /// so 3.5 and 4.5 both round to Managed/4. Scores are clamped to [1, 5].
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        let rounded = score.round_ties_even().clamp(1.0, 5.0) as u8;
        Self::from_number(rounded).unwrap_or(Self::Initial)
    }

    /// Look up a level by its 1-5 number.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Initial),
            2 => Some(Self::Repeatable),
            3 => Some(Self::Defined),
            4 => Some(Self::Managed),
            5 => Some(Self::Optimized),
            _ => None,
        }
    }

    /// The level's 1-5 number
    #[must_use]
    pub const fn number(&self) -> u8 {
        match self {
            Self::Initial => 1,
            Self::Repeatable => 2,
            Self::Defined => 3,
            Self::Managed => 4,
            Self::Optimized => 5,
        }
    }

    /// The level's display name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Repeatable => "Repeatable",
            Self::Defined => "Defined",
            Self::Managed => "Managed",
            Self::Optimized => "Optimized",
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
