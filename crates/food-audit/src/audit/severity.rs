use serde::{Deserialize, Serialize};

/// Lowest percentage that escapes the Critical bucket.
pub const MAJOR_THRESHOLD: f64 = 60.0;
/// Lowest percentage that escapes the Major bucket.
pub const MINOR_THRESHOLD: f64 = 75.0;
/// Lowest percentage with no findings severity.
pub const CLEAR_THRESHOLD: f64 = 90.0;

/// Compliance-risk bucket, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Critical,
    Major,
    Minor,
    None,
}

impl SeverityLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Critical, Self::Major, Self::Minor, Self::None]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Major => "Major",
            Self::Minor => "Minor",
            Self::None => "None",
        }
    }

    pub const fn requires_follow_up(self) -> bool {
        matches!(self, Self::Critical | Self::Major)
    }
}

/// Map a percentage onto its severity bucket. Boundary values land in the
/// less severe bucket; NaN is treated as Critical.
pub fn severity_from_score(percentage: f64) -> SeverityLevel {
    if percentage >= CLEAR_THRESHOLD {
        SeverityLevel::None
    } else if percentage >= MINOR_THRESHOLD {
        SeverityLevel::Minor
    } else if percentage >= MAJOR_THRESHOLD {
        SeverityLevel::Major
    } else {
        SeverityLevel::Critical
    }
}
