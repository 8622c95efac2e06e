//! Dashboard state: the live company collection plus the search/analyze flow.
//!
//! The collection is replaced wholesale on every successful fetch. Analysis always re-fetches
//! the full list afterwards instead of splicing in the analyzed company, since the API may
//! recalculate other companies' scores.

use crate::api::{ApiError, EsgApi};
use crate::domain::analysis::CompanyAnalysis;
use crate::domain::company::Company;
use crate::risk::{HIGH_THRESHOLD, LOW_THRESHOLD};
use serde::Serialize;

pub const EMPTY_TERM_ERROR: &str = "Please enter a company name";
pub const ANALYZE_FAILED_ERROR: &str = "Failed to analyze company. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    companies: Vec<Company>,
    loading: bool,
    error: String,
    search_term: String,
    // Set once an analysis has delivered a fresh collection; a slower mount fetch must not
    // overwrite it.
    refreshed_by_analysis: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeRejection {
    /// Search term was empty or whitespace; the error banner is set.
    EmptyTerm,
    /// Another analysis is in flight; nothing changes.
    InFlight,
}

/// Result of the network half of an analysis: the analyze call plus the follow-up list fetch.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub analysis: CompanyAnalysis,
    /// `None` when the follow-up fetch failed; the old collection is kept in that case.
    pub refreshed: Option<Vec<Company>>,
}

#[derive(Debug, Clone)]
pub enum AnalyzeOutcome {
    Rejected(AnalyzeRejection),
    Analyzed(CompanyAnalysis),
    Failed(ApiError),
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current error banner; empty when there is none.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Initial load. Failures are logged only; no error banner is shown.
    pub async fn mount(&mut self, api: &dyn EsgApi) {
        let fetched = fetch_companies(api).await;
        self.complete_mount(fetched);
    }

    /// Applies a mount-time fetch performed outside of `&mut self`.
    pub fn complete_mount(&mut self, fetched: Option<Vec<Company>>) {
        if self.refreshed_by_analysis {
            tracing::debug!("discarding mount fetch; collection already refreshed by analysis");
            return;
        }
        if let Some(companies) = fetched {
            self.companies = companies;
        }
    }

    /// Validates the search term and latches `loading`. Returns the term to analyze.
    pub fn begin_analyze(&mut self) -> Result<String, AnalyzeRejection> {
        if self.loading {
            return Err(AnalyzeRejection::InFlight);
        }
        if self.search_term.trim().is_empty() {
            self.error = EMPTY_TERM_ERROR.to_string();
            return Err(AnalyzeRejection::EmptyTerm);
        }

        self.loading = true;
        self.error.clear();
        Ok(self.search_term.clone())
    }

    /// Applies the outcome of [`run_analysis`] and releases the `loading` latch.
    pub fn complete_analyze(&mut self, result: Result<AnalysisRun, ApiError>) -> AnalyzeOutcome {
        let outcome = match result {
            Ok(run) => {
                if let Some(companies) = run.refreshed {
                    self.companies = companies;
                    self.refreshed_by_analysis = true;
                }
                self.search_term.clear();
                AnalyzeOutcome::Analyzed(run.analysis)
            }
            Err(err) => {
                tracing::error!(error = %err, "analysis failed");
                self.error = ANALYZE_FAILED_ERROR.to_string();
                AnalyzeOutcome::Failed(err)
            }
        };
        self.loading = false;
        outcome
    }

    /// Full analyze flow for a caller that owns the dashboard exclusively.
    pub async fn submit_analyze(&mut self, api: &dyn EsgApi) -> AnalyzeOutcome {
        let term = match self.begin_analyze() {
            Ok(term) => term,
            Err(rejection) => return AnalyzeOutcome::Rejected(rejection),
        };
        let result = run_analysis(api, &term).await;
        self.complete_analyze(result)
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_companies(&self.companies)
    }
}

/// Analyzes `term`, then re-fetches the whole collection.
pub async fn run_analysis(api: &dyn EsgApi, term: &str) -> Result<AnalysisRun, ApiError> {
    let analysis = api.analyze_company(term).await?;
    let refreshed = fetch_companies(api).await;
    Ok(AnalysisRun {
        analysis,
        refreshed,
    })
}

/// Fetches the collection, logging and swallowing failures.
pub async fn fetch_companies(api: &dyn EsgApi) -> Option<Vec<Company>> {
    match api.get_companies().await {
        Ok(companies) => Some(companies),
        Err(err) => {
            tracing::warn!(error = %err, "failed to fetch companies");
            None
        }
    }
}

/// Stat-card figures, derived from the collection on every render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub average_score: f64,
    pub high_risk: usize,
    pub low_risk: usize,
}

impl DashboardStats {
    pub fn from_companies(companies: &[Company]) -> Self {
        let total = companies.len();
        let average_score = if total > 0 {
            companies.iter().map(|c| c.overall_score).sum::<f64>() / total as f64
        } else {
            0.0
        };
        let high_risk = companies
            .iter()
            .filter(|c| c.overall_score >= HIGH_THRESHOLD)
            .count();
        let low_risk = companies
            .iter()
            .filter(|c| c.overall_score < LOW_THRESHOLD)
            .count();

        Self {
            total,
            average_score,
            high_risk,
            low_risk,
        }
    }
}
