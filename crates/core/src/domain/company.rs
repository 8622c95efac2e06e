use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the scoring API. Opaque to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub i64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Summary record returned by `GET /api/companies`.
///
/// Scores are normalized risk values in `[0, 1]` (higher is riskier). They are taken as-is from
/// the API; nothing here validates the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub overall_score: f64,
    pub environmental_score: f64,
    pub social_score: f64,
    pub governance_score: f64,
    /// ISO-8601 timestamp, kept verbatim for display formatting.
    pub last_analyzed: String,
    pub total_articles: u64,
}
