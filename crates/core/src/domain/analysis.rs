use serde::{Deserialize, Serialize};

/// Detail record returned by `GET /api/analyze` and `GET /api/companies/{id}/details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAnalysis {
    pub company: String,
    pub score: f64,
    pub risk_breakdown: RiskBreakdown,
    #[serde(default)]
    pub events: Vec<EsgEvent>,
    #[serde(default)]
    pub articles: Vec<Article>,
    pub total_articles: u64,
    pub analyzed_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub overall_score: f64,
    pub environmental_score: f64,
    pub social_score: f64,
    pub governance_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgEvent {
    pub event_type: String,
    pub description: String,
    pub severity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub url: String,
    pub published_at: String,
    pub sentiment_score: f64,
    #[serde(default)]
    pub events: Vec<EsgEvent>,
}
