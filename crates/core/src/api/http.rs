use crate::api::{ApiError, EsgApi};
use crate::config::Settings;
use crate::domain::analysis::CompanyAnalysis;
use crate::domain::company::{Company, CompanyId};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;

const ANALYZE_ENDPOINT: &str = "/api/analyze";
const COMPANIES_ENDPOINT: &str = "/api/companies";
const DETAILS_ENDPOINT: &str = "/api/companies/{id}/details";

/// reqwest-backed client for the scoring API. The base URL is fixed at construction.
#[derive(Debug, Clone)]
pub struct HttpEsgApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpEsgApi {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let timeout = settings.api_timeout()?;
        Self::new(settings.api_base_url(), timeout)
    }

    pub fn new(base_url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build ESG API http client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let res = req
            .send()
            .await
            .map_err(|e| ApiError::network(endpoint, e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| ApiError::network(endpoint, format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(ApiError::http(endpoint, status.as_u16(), text));
        }

        serde_json::from_str::<T>(&text).map_err(|e| ApiError::decode(endpoint, e.to_string()))
    }
}

#[async_trait::async_trait]
impl EsgApi for HttpEsgApi {
    async fn analyze_company(&self, name: &str) -> Result<CompanyAnalysis, ApiError> {
        let req = self
            .http
            .get(self.url(ANALYZE_ENDPOINT))
            .query(&[("company", name)]);

        let res = self.get_json(ANALYZE_ENDPOINT, req).await;
        if let Err(err) = &res {
            tracing::error!(company = %name, error = %err, "error analyzing company");
        }
        res
    }

    async fn get_companies(&self) -> Result<Vec<Company>, ApiError> {
        let req = self.http.get(self.url(COMPANIES_ENDPOINT));

        let res = self.get_json(COMPANIES_ENDPOINT, req).await;
        if let Err(err) = &res {
            tracing::error!(error = %err, "error fetching companies");
        }
        res
    }

    async fn get_company_details(&self, id: CompanyId) -> Result<CompanyAnalysis, ApiError> {
        let req = self
            .http
            .get(self.url(&format!("{COMPANIES_ENDPOINT}/{id}/details")));

        let res = self.get_json(DETAILS_ENDPOINT, req).await;
        if let Err(err) = &res {
            tracing::error!(company_id = %id, error = %err, "error fetching company details");
        }
        res
    }
}
