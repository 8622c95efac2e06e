pub mod error;
pub mod http;

use crate::domain::analysis::CompanyAnalysis;
use crate::domain::company::{Company, CompanyId};

pub use error::{ApiError, ApiErrorKind};
pub use http::HttpEsgApi;

/// The three calls the dashboard makes against the scoring API.
///
/// Implementations issue exactly one outbound request per call and never retry; recovery policy
/// belongs to the caller.
#[async_trait::async_trait]
pub trait EsgApi: Send + Sync {
    async fn analyze_company(&self, name: &str) -> Result<CompanyAnalysis, ApiError>;

    async fn get_companies(&self) -> Result<Vec<Company>, ApiError>;

    async fn get_company_details(&self, id: CompanyId) -> Result<CompanyAnalysis, ApiError>;
}
