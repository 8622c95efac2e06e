use crate::domain::company::Company;
use crate::risk::RiskLevel;
use crate::table::to_fixed;
use serde::Serialize;

/// Named bar series in draw order, with their fill colors.
pub const BAR_SERIES: [(&str, &str); 4] = [
    ("Overall Risk", "#0ea5e9"),
    ("Environmental", "#10b981"),
    ("Social", "#3b82f6"),
    ("Governance", "#8b5cf6"),
];

/// One x-axis category of the per-company bar chart. Values are percentages in `[0, 100]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub name: String,
    pub overall: f64,
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
}

impl BarPoint {
    /// Values in [`BAR_SERIES`] order.
    pub fn values(&self) -> [f64; 4] {
        [self.overall, self.environmental, self.social, self.governance]
    }
}

pub fn bar_series(companies: &[Company]) -> Vec<BarPoint> {
    companies
        .iter()
        .map(|c| BarPoint {
            name: c.name.clone(),
            overall: c.overall_score * 100.0,
            environmental: c.environmental_score * 100.0,
            social: c.social_score * 100.0,
            governance: c.governance_score * 100.0,
        })
        .collect()
}

/// Company counts per risk tier of the overall score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TierSlice {
    pub level: RiskLevel,
    pub name: &'static str,
    pub count: usize,
    pub color: &'static str,
    /// Share of all companies in `[0, 1]`; zero when there are none.
    pub fraction: f64,
}

impl TierSlice {
    /// Pie label, e.g. `Low Risk: 2 (40%)`.
    pub fn label(&self) -> String {
        format!(
            "{}: {} ({}%)",
            self.name,
            self.count,
            to_fixed(self.fraction * 100.0, 0)
        )
    }

    /// Summary-card caption, e.g. `40.0% of companies`; `0% of companies` when there are none.
    pub fn share_caption(&self, total: usize) -> String {
        if total == 0 {
            return "0% of companies".to_string();
        }
        format!("{}% of companies", to_fixed(self.fraction * 100.0, 1))
    }
}

impl TierDistribution {
    pub fn from_companies(companies: &[Company]) -> Self {
        let mut out = Self::default();
        for c in companies {
            match RiskLevel::from_score(c.overall_score) {
                RiskLevel::Low => out.low += 1,
                RiskLevel::Medium => out.medium += 1,
                RiskLevel::High => out.high += 1,
            }
        }
        out
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }

    pub fn slices(&self) -> [TierSlice; 3] {
        let total = self.total();
        RiskLevel::ALL.map(|level| {
            let count = self.count(level);
            TierSlice {
                level,
                name: tier_name(level),
                count,
                color: level.chart_color(),
                fraction: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
            }
        })
    }
}

pub fn tier_name(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Low Risk",
        RiskLevel::Medium => "Medium Risk",
        RiskLevel::High => "High Risk",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::CompanyId;

    fn companies(scores: &[f64]) -> Vec<Company> {
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| Company {
                id: CompanyId(i as i64),
                name: format!("Co {i}"),
                overall_score: *s,
                environmental_score: 0.2,
                social_score: 0.4,
                governance_score: 0.6,
                last_analyzed: "2024-03-01T09:15:00".to_string(),
                total_articles: 5,
            })
            .collect()
    }

    #[test]
    fn bar_values_are_percentages_in_input_order() {
        let bars = bar_series(&companies(&[0.5, 0.25]));
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].name, "Co 0");
        assert_eq!(bars[0].values(), [50.0, 20.0, 40.0, 60.0]);
        assert_eq!(bars[1].overall, 25.0);
    }

    #[test]
    fn distribution_counts_tiers() {
        let dist = TierDistribution::from_companies(&companies(&[0.1, 0.35, 0.7, 0.95, 0.2]));
        assert_eq!(
            dist,
            TierDistribution {
                low: 2,
                medium: 1,
                high: 2
            }
        );

        let slices = dist.slices();
        assert_eq!(slices[0].label(), "Low Risk: 2 (40%)");
        assert_eq!(slices[1].label(), "Medium Risk: 1 (20%)");
        assert_eq!(slices[2].color, "#ef4444");
        assert_eq!(slices[2].share_caption(dist.total()), "40.0% of companies");
    }

    #[test]
    fn distribution_is_order_insensitive() {
        let a = TierDistribution::from_companies(&companies(&[0.1, 0.9, 0.5]));
        let b = TierDistribution::from_companies(&companies(&[0.5, 0.1, 0.9]));
        assert_eq!(a, b);
    }

    #[test]
    fn exact_halves_round_up() {
        let mut scores = vec![0.1];
        scores.extend([0.9; 7]);
        let slices = TierDistribution::from_companies(&companies(&scores)).slices();
        assert_eq!(slices[0].label(), "Low Risk: 1 (13%)");
        assert_eq!(slices[0].share_caption(8), "12.5% of companies");

        let mut scores = vec![0.1];
        scores.extend([0.9; 15]);
        let slices = TierDistribution::from_companies(&companies(&scores)).slices();
        assert_eq!(slices[0].label(), "Low Risk: 1 (6%)");
        assert_eq!(slices[0].share_caption(16), "6.3% of companies");
    }

    #[test]
    fn empty_distribution_has_zero_shares() {
        let dist = TierDistribution::from_companies(&[]);
        assert_eq!(dist.total(), 0);
        for slice in dist.slices() {
            assert_eq!(slice.count, 0);
            assert_eq!(slice.fraction, 0.0);
            assert_eq!(slice.share_caption(0), "0% of companies");
        }
    }
}
