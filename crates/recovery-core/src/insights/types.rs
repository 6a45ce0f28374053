//! Core types for the insights engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much journal history exists, gating how much analysis is attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    /// Under 30 entries (also reported below the 5-entry gate)
    Limited,
    /// 30 to 99 entries
    Good,
    /// 100 entries or more
    Excellent,
}

impl DataQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataQuality::Limited => "limited",
            DataQuality::Good => "good",
            DataQuality::Excellent => "excellent",
        }
    }

    /// Tier for a given number of entries
    pub fn for_count(count: usize) -> Self {
        match count {
            0..=29 => DataQuality::Limited,
            30..=99 => DataQuality::Good,
            _ => DataQuality::Excellent,
        }
    }

    /// Output caps and factor eligibility for this tier
    pub fn profile(&self) -> &'static TierProfile {
        match self {
            DataQuality::Limited => &TIER_PROFILES[0],
            DataQuality::Good => &TIER_PROFILES[1],
            DataQuality::Excellent => &TIER_PROFILES[2],
        }
    }
}

impl fmt::Display for DataQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "limited" => Ok(DataQuality::Limited),
            "good" => Ok(DataQuality::Good),
            "excellent" => Ok(DataQuality::Excellent),
            _ => Err(format!("Unknown data quality: {}", s)),
        }
    }
}

/// Per-tier limits and gates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierProfile {
    pub max_positive_patterns: usize,
    pub max_challenging_patterns: usize,
    pub max_insights: usize,
    /// Evaluate the 7-9 hour sleep window factor
    pub sleep_window: bool,
    /// Evaluate the complete morning routine factor
    pub morning_routine: bool,
}

/// Limited, good, excellent
pub const TIER_PROFILES: [TierProfile; 3] = [
    TierProfile {
        max_positive_patterns: 3,
        max_challenging_patterns: 2,
        max_insights: 3,
        sleep_window: false,
        morning_routine: false,
    },
    TierProfile {
        max_positive_patterns: 4,
        max_challenging_patterns: 3,
        max_insights: 4,
        sleep_window: true,
        morning_routine: false,
    },
    TierProfile {
        max_positive_patterns: 5,
        max_challenging_patterns: 4,
        max_insights: 5,
        sleep_window: true,
        morning_routine: true,
    },
];

/// Whether a factor helps or hurts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternDirection {
    Positive,
    Challenging,
}

impl PatternDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternDirection::Positive => "positive",
            PatternDirection::Challenging => "challenging",
        }
    }
}

impl fmt::Display for PatternDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction the underlying behavior is moving in the recent window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternTrend {
    Improving,
    Declining,
    Stable,
}

impl PatternTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternTrend::Improving => "improving",
            PatternTrend::Declining => "declining",
            PatternTrend::Stable => "stable",
        }
    }
}

impl fmt::Display for PatternTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A behavioral factor associated with better or worse outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub direction: PatternDirection,
    /// Short label (e.g., "Good sleep quality")
    pub factor: String,
    /// Rounded percentage. Non-negative for positive, non-positive for challenging.
    pub impact: i32,
    pub description: String,
    /// 0-100, derived from sample size only
    pub confidence: u8,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trend: Option<PatternTrend>,
}

impl Pattern {
    /// Ranking score used to order patterns within a direction
    pub fn score(&self) -> i64 {
        i64::from(self.impact) * i64::from(self.confidence)
    }
}

/// Kind of insight, used by the UI for grouping and styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Correlation,
    Trend,
    Achievement,
    Warning,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Correlation => "correlation",
            InsightCategory::Trend => "trend",
            InsightCategory::Achievement => "achievement",
            InsightCategory::Warning => "warning",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "correlation" => Ok(InsightCategory::Correlation),
            "trend" => Ok(InsightCategory::Trend),
            "achievement" => Ok(InsightCategory::Achievement),
            "warning" => Ok(InsightCategory::Warning),
            _ => Err(format!("Unknown insight category: {}", s)),
        }
    }
}

/// A short, prioritized statement shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub icon: String,
    pub title: String,
    pub description: String,
    /// 1-10, higher surfaces first
    pub priority: u8,
    pub category: InsightCategory,
}

impl Insight {
    pub fn new(
        category: InsightCategory,
        priority: u8,
        icon: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            title: title.into(),
            description: description.into(),
            priority: priority.clamp(1, 10),
            category,
        }
    }
}

/// Everything the engine derives from one entry collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsData {
    pub entry_count: usize,
    /// Relative label such as "Today" or "3 days ago"
    pub last_updated: String,
    pub positive_patterns: Vec<Pattern>,
    pub challenging_patterns: Vec<Pattern>,
    pub insights: Vec<Insight>,
    pub data_quality: DataQuality,
}
