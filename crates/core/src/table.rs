//! Company table model: row projection and per-row expansion state.
//!
//! The table never owns the company collection. Each render projects a borrowed snapshot into
//! [`TableView`], consulting only its own set of expanded ids.

use crate::domain::company::{Company, CompanyId};
use crate::risk::{classify, RiskClass, RiskLevel};
use crate::time::display::format_timestamp;
use std::collections::HashSet;

pub const EMPTY_TITLE: &str = "No companies analyzed yet";
pub const EMPTY_HINT: &str = "Use the search box above to analyze your first company";

pub const COLUMNS: [&str; 8] = [
    "Company",
    "Overall Risk",
    "Environmental",
    "Social",
    "Governance",
    "Articles",
    "Last Analyzed",
    "Actions",
];

#[derive(Debug, Clone, Default)]
pub struct CompanyTable {
    expanded: HashSet<CompanyId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Empty {
        title: &'static str,
        hint: &'static str,
    },
    Rows(Vec<TableRow>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: CompanyId,
    pub name: String,
    pub overall: RiskClass,
    pub overall_pct: String,
    pub environmental_pct: String,
    pub social_pct: String,
    pub governance_pct: String,
    pub total_articles: u64,
    pub last_analyzed: String,
    pub expanded: bool,
    pub breakdown: Option<Breakdown>,
}

/// Panel revealed under an expanded row.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub environmental_pct: String,
    pub social_pct: String,
    pub governance_pct: String,
    pub summary: String,
}

impl CompanyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the expansion of one row. Returns whether the row is now expanded.
    pub fn toggle(&mut self, id: CompanyId) -> bool {
        if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        }
    }

    pub fn is_expanded(&self, id: CompanyId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    pub fn view(&self, companies: &[Company]) -> TableView {
        if companies.is_empty() {
            return TableView::Empty {
                title: EMPTY_TITLE,
                hint: EMPTY_HINT,
            };
        }

        TableView::Rows(companies.iter().map(|c| self.row(c)).collect())
    }

    fn row(&self, company: &Company) -> TableRow {
        let expanded = self.is_expanded(company.id);
        let overall = classify(company.overall_score);
        let last_analyzed = format_timestamp(&company.last_analyzed);

        let breakdown = expanded.then(|| Breakdown {
            environmental_pct: percent(company.environmental_score),
            social_pct: percent(company.social_score),
            governance_pct: percent(company.governance_score),
            summary: summary_sentence(company.total_articles, &last_analyzed, overall.level),
        });

        TableRow {
            id: company.id,
            name: company.name.clone(),
            overall,
            overall_pct: percent(company.overall_score),
            environmental_pct: percent(company.environmental_score),
            social_pct: percent(company.social_score),
            governance_pct: percent(company.governance_score),
            total_articles: company.total_articles,
            last_analyzed,
            expanded,
            breakdown,
        }
    }
}

/// `0.4237` -> `42.4%`.
pub fn percent(score: f64) -> String {
    format!("{}%", to_fixed(score * 100.0, 1))
}

/// Fixed-point formatting with exact ties rounded away from zero (`12.5` -> `13`).
pub fn to_fixed(value: f64, digits: u32) -> String {
    let scale = 10f64.powi(digits as i32);
    let rounded = (value * scale).round() / scale;
    format!("{rounded:.prec$}", prec = digits as usize)
}

pub fn summary_sentence(total_articles: u64, last_analyzed: &str, level: RiskLevel) -> String {
    format!(
        "Analyzed {total_articles} articles. Last updated on {last_analyzed}. Overall risk level is {level}."
    )
}
