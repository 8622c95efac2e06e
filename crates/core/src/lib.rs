pub mod api;
pub mod chart;
pub mod dashboard;
pub mod domain;
pub mod risk;
pub mod table;
pub mod time;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_API_URL: &str = "http://localhost:8001";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub esg_api_url: Option<String>,
        pub esg_api_timeout_secs: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                esg_api_url: std::env::var("ESG_API_URL").ok(),
                esg_api_timeout_secs: std::env::var("ESG_API_TIMEOUT_SECS").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        /// Scoring API base URL; falls back to the local development backend when unset or blank.
        pub fn api_base_url(&self) -> &str {
            self.esg_api_url
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_API_URL)
        }

        /// Request timeout for the scoring API. `None` means requests never time out.
        pub fn api_timeout(&self) -> anyhow::Result<Option<std::time::Duration>> {
            let Some(raw) = self.esg_api_timeout_secs.as_deref().map(str::trim) else {
                return Ok(None);
            };
            if raw.is_empty() {
                return Ok(None);
            }
            let secs = raw
                .parse::<u64>()
                .with_context(|| format!("ESG_API_TIMEOUT_SECS must be an integer (got {raw})"))?;
            Ok(Some(std::time::Duration::from_secs(secs)))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn settings(url: Option<&str>, timeout: Option<&str>) -> Settings {
            Settings {
                esg_api_url: url.map(ToString::to_string),
                esg_api_timeout_secs: timeout.map(ToString::to_string),
                sentry_dsn: None,
            }
        }

        #[test]
        fn base_url_defaults_to_local_backend() {
            assert_eq!(settings(None, None).api_base_url(), DEFAULT_API_URL);
            assert_eq!(settings(Some("  "), None).api_base_url(), DEFAULT_API_URL);
            assert_eq!(
                settings(Some("https://esg.example.com"), None).api_base_url(),
                "https://esg.example.com"
            );
        }

        #[test]
        fn timeout_is_optional_and_validated() {
            assert_eq!(settings(None, None).api_timeout().unwrap(), None);
            assert_eq!(
                settings(None, Some("15")).api_timeout().unwrap(),
                Some(std::time::Duration::from_secs(15))
            );
            assert!(settings(None, Some("soon")).api_timeout().is_err());
        }
    }
}
