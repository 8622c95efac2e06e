use std::fmt;

pub const LOW_THRESHOLD: f64 = 0.3;
pub const HIGH_THRESHOLD: f64 = 0.7;

/// Three-tier risk label derived from a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Tiers are half-open: `[0, 0.3)`, `[0.3, 0.7)`, `[0.7, ..)`.
    ///
    /// Any f64 classifies. Values below zero are `Low`; NaN fails both comparisons and is `High`.
    pub fn from_score(score: f64) -> Self {
        if score < LOW_THRESHOLD {
            RiskLevel::Low
        } else if score < HIGH_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Text color class used by badges and summary text.
    pub fn color_class(self) -> &'static str {
        match self {
            RiskLevel::Low => "text-green-600",
            RiskLevel::Medium => "text-yellow-600",
            RiskLevel::High => "text-red-600",
        }
    }

    pub fn background_class(self) -> &'static str {
        match self {
            RiskLevel::Low => "bg-green-100",
            RiskLevel::Medium => "bg-yellow-100",
            RiskLevel::High => "bg-red-100",
        }
    }

    /// Fill color for chart slices.
    pub fn chart_color(self) -> &'static str {
        match self {
            RiskLevel::Low => "#10b981",
            RiskLevel::Medium => "#f59e0b",
            RiskLevel::High => "#ef4444",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskClass {
    pub level: RiskLevel,
    pub color_class: &'static str,
    pub background_class: &'static str,
}

pub fn classify(score: f64) -> RiskClass {
    let level = RiskLevel::from_score(score);
    RiskClass {
        level,
        color_class: level.color_class(),
        background_class: level.background_class(),
    }
}
