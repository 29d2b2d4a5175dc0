//! Issue priority and its severity classification.

use std::fmt;

use serde::Serialize;

/// Priority name used when the server sends none.
pub(crate) const DEFAULT_PRIORITY_NAME: &str = "None";

/// Issue priority as named by the JIRA instance.
///
/// Instances are free to rename priorities, so the name is kept verbatim and
/// classified into a [`PriorityLevel`] on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Priority {
    /// The priority name (e.g., "Highest", "Critical", "Minor").
    pub name: String,
}

impl Priority {
    /// Create a new priority.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Classify this priority into a severity level.
    pub fn level(&self) -> PriorityLevel {
        PriorityLevel::classify(&self.name)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::new(DEFAULT_PRIORITY_NAME)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered severity level, lowest first so `Ord` follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PriorityLevel {
    None,
    Lowest,
    Low,
    Medium,
    High,
    Highest,
}

impl PriorityLevel {
    /// Classify a priority name by case-insensitive substring matching.
    ///
    /// `highest`/`critical` are tested before `high`. `low` is tested before
    /// `lowest`, so "Lowest" classifies as `Low` and only names containing
    /// "trivial" reach `Lowest`.
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| name.contains(n));

        if has(&["highest", "critical"]) {
            PriorityLevel::Highest
        } else if has(&["high"]) {
            PriorityLevel::High
        } else if has(&["medium", "normal"]) {
            PriorityLevel::Medium
        } else if has(&["low"]) {
            PriorityLevel::Low
        } else if has(&["lowest", "trivial"]) {
            PriorityLevel::Lowest
        } else {
            PriorityLevel::None
        }
    }

    /// Numeric rank for sorting, 5 for highest down to 0 for none.
    pub fn rank(&self) -> u8 {
        match self {
            PriorityLevel::Highest => 5,
            PriorityLevel::High => 4,
            PriorityLevel::Medium => 3,
            PriorityLevel::Low => 2,
            PriorityLevel::Lowest => 1,
            PriorityLevel::None => 0,
        }
    }

    /// Hex color used to badge this level.
    pub fn color(&self) -> &'static str {
        match self {
            PriorityLevel::Highest => "#d04437",
            PriorityLevel::High => "#f79232",
            PriorityLevel::Medium => "#ffd351",
            PriorityLevel::Low => "#14892c",
            PriorityLevel::Lowest | PriorityLevel::None => "#707070",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PriorityLevel::Highest => "HIGHEST",
            PriorityLevel::High => "HIGH",
            PriorityLevel::Medium => "MEDIUM",
            PriorityLevel::Low => "LOW",
            PriorityLevel::Lowest => "LOWEST",
            PriorityLevel::None => "NONE",
        };
        write!(f, "{}", label)
    }
}
