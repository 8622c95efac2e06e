use crate::render::dashboard::render_dashboard;
use crate::render::detail::{render_detail, render_detail_error};
use crate::render::landing::render_landing;
use crate::session::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use esg_core::api::ApiError;
use esg_core::dashboard::{run_analysis, AnalyzeOutcome, AnalyzeRejection};
use esg_core::domain::company::CompanyId;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

const DASHBOARD_PATH: &str = "/dashboard";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(landing))
        .route(DASHBOARD_PATH, get(dashboard_page))
        .route("/dashboard/analyze", post(analyze))
        .route("/dashboard/companies/:id", get(company_details))
        .route("/dashboard/companies/:id/toggle", post(toggle_row))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn landing() -> Html<String> {
    Html(render_landing())
}

async fn dashboard_page(State(state): State<AppState>) -> Html<String> {
    let session = state.session.lock().await;
    Html(render_dashboard(&session.dashboard, &session.table))
}

#[derive(Debug, Deserialize)]
struct AnalyzeForm {
    #[serde(default)]
    company: String,
}

async fn analyze(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> Redirect {
    let term = {
        let mut session = state.session.lock().await;
        // A rejected overlap must not clobber the term of the running analysis.
        if session.dashboard.is_loading() {
            tracing::info!(rejection = ?AnalyzeRejection::InFlight, "analyze request rejected");
            return Redirect::to(DASHBOARD_PATH);
        }
        session.dashboard.set_search_term(form.company);
        match session.dashboard.begin_analyze() {
            Ok(term) => term,
            Err(rejection) => {
                tracing::info!(?rejection, "analyze request rejected");
                return Redirect::to(DASHBOARD_PATH);
            }
        }
    };

    // Runs detached: the loading latch must be released even if the client disconnects.
    let api = state.api.clone();
    let session = state.session.clone();
    let task = tokio::spawn(async move {
        let result = run_analysis(api.as_ref(), &term).await;
        let mut guard = session.lock().await;
        guard.dashboard.complete_analyze(result)
    });

    match task.await {
        Ok(AnalyzeOutcome::Analyzed(analysis)) => {
            tracing::info!(
                company = %analysis.company,
                score = analysis.score,
                total_articles = analysis.total_articles,
                "analysis completed"
            );
        }
        Ok(AnalyzeOutcome::Failed(err)) => {
            sentry_anyhow::capture_anyhow(&anyhow::Error::new(err));
        }
        Ok(AnalyzeOutcome::Rejected(_)) => {}
        Err(join_err) => {
            tracing::error!(error = %join_err, "analysis task aborted");
            let mut session = state.session.lock().await;
            session
                .dashboard
                .complete_analyze(Err(ApiError::network("/api/analyze", join_err.to_string())));
        }
    }

    Redirect::to(DASHBOARD_PATH)
}

async fn toggle_row(State(state): State<AppState>, Path(id): Path<i64>) -> Redirect {
    let id = CompanyId(id);
    let expanded = state.session.lock().await.table.toggle(id);
    tracing::debug!(%id, expanded, "toggled company row");
    Redirect::to(&format!("{DASHBOARD_PATH}#company-{id}"))
}

async fn company_details(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let id = CompanyId(id);
    match state.api.get_company_details(id).await {
        Ok(analysis) => Ok(Html(render_detail(id, &analysis))),
        Err(err) => {
            sentry_anyhow::capture_anyhow(&anyhow::Error::new(err));
            Err((StatusCode::BAD_GATEWAY, Html(render_detail_error(id))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use esg_core::api::EsgApi;
    use esg_core::dashboard::ANALYZE_FAILED_ERROR;
    use esg_core::domain::analysis::{CompanyAnalysis, RiskBreakdown};
    use esg_core::domain::company::Company;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn company(id: i64, name: &str, overall: f64) -> Company {
        Company {
            id: CompanyId(id),
            name: name.to_string(),
            overall_score: overall,
            environmental_score: 0.3,
            social_score: 0.4,
            governance_score: 0.5,
            last_analyzed: "2024-03-01T09:15:00".to_string(),
            total_articles: 8,
        }
    }

    fn analysis(name: &str) -> CompanyAnalysis {
        CompanyAnalysis {
            company: name.to_string(),
            score: 0.4,
            risk_breakdown: RiskBreakdown {
                overall_score: 0.4,
                environmental_score: 0.3,
                social_score: 0.4,
                governance_score: 0.5,
            },
            events: vec![],
            articles: vec![],
            total_articles: 8,
            analyzed_at: "2024-03-01T09:15:00".to_string(),
        }
    }

    /// Scoring API double. Every list call returns `list_calls` companies, so each refetch is
    /// observably different from the previous one.
    #[derive(Default)]
    struct StubApi {
        gate: Option<Arc<Notify>>,
        fail_analyze: bool,
        analyze_calls: AtomicUsize,
        list_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl EsgApi for StubApi {
        async fn analyze_company(&self, name: &str) -> Result<CompanyAnalysis, ApiError> {
            self.analyze_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail_analyze {
                return Err(ApiError::http("/api/analyze", 500, "boom"));
            }
            Ok(analysis(name))
        }

        async fn get_companies(&self) -> Result<Vec<Company>, ApiError> {
            let n = self.list_calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok((1..=n as i64)
                .map(|i| company(i, &format!("Co {i}"), 0.1 * i as f64))
                .collect())
        }

        async fn get_company_details(&self, id: CompanyId) -> Result<CompanyAnalysis, ApiError> {
            if id == CompanyId(404) {
                return Err(ApiError::http("/api/companies/{id}/details", 404, "missing"));
            }
            Ok(analysis(&format!("Co {id}")))
        }
    }

    fn location(redirect: Redirect) -> String {
        let res = redirect.into_response();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        res.headers()["location"].to_str().unwrap().to_string()
    }

    fn form(company: &str) -> Form<AnalyzeForm> {
        Form(AnalyzeForm {
            company: company.to_string(),
        })
    }

    #[tokio::test]
    async fn mount_loads_collection_once() {
        let api = Arc::new(StubApi::default());
        let state = AppState::new(api.clone());
        state.mount().await;

        let session = state.session.lock().await;
        assert_eq!(session.dashboard.companies().len(), 1);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn analyze_refetches_and_redirects() {
        let api = Arc::new(StubApi::default());
        let state = AppState::new(api.clone());
        state.mount().await;

        let loc = location(analyze(State(state.clone()), form("Tesla")).await);
        assert_eq!(loc, DASHBOARD_PATH);

        let session = state.session.lock().await;
        assert_eq!(session.dashboard.companies().len(), 2);
        assert_eq!(session.dashboard.search_term(), "");
        assert!(!session.dashboard.is_loading());
        assert_eq!(api.analyze_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_submission_never_reaches_api() {
        let api = Arc::new(StubApi::default());
        let state = AppState::new(api.clone());

        analyze(State(state.clone()), form("   ")).await;

        let session = state.session.lock().await;
        assert_eq!(session.dashboard.error(), "Please enter a company name");
        assert_eq!(api.analyze_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_analysis_sets_banner() {
        let api = Arc::new(StubApi {
            fail_analyze: true,
            ..StubApi::default()
        });
        let state = AppState::new(api.clone());
        state.mount().await;

        analyze(State(state.clone()), form("Boom Corp")).await;

        let session = state.session.lock().await;
        assert_eq!(session.dashboard.error(), ANALYZE_FAILED_ERROR);
        assert_eq!(session.dashboard.companies().len(), 1);
        assert!(!session.dashboard.is_loading());
    }

    #[tokio::test]
    async fn overlapping_submission_is_rejected_while_loading() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(StubApi {
            gate: Some(gate.clone()),
            ..StubApi::default()
        });
        let state = AppState::new(api.clone());

        let first = tokio::spawn(analyze(State(state.clone()), form("Tesla")));
        loop {
            if state.session.lock().await.dashboard.is_loading() {
                break;
            }
            tokio::task::yield_now().await;
        }

        analyze(State(state.clone()), form("Google")).await;
        assert_eq!(api.analyze_calls.load(Ordering::SeqCst), 1);

        let page = dashboard_page(State(state.clone())).await;
        assert!(page.0.contains("Analyzing..."));

        gate.notify_one();
        first.await.unwrap();

        let session = state.session.lock().await;
        assert!(!session.dashboard.is_loading());
        assert_eq!(api.analyze_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn rejected_overlap_keeps_running_term() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(StubApi {
            gate: Some(gate.clone()),
            fail_analyze: true,
            ..StubApi::default()
        });
        let state = AppState::new(api.clone());

        let first = tokio::spawn(analyze(State(state.clone()), form("Tesla")));
        loop {
            if state.session.lock().await.dashboard.is_loading() {
                break;
            }
            tokio::task::yield_now().await;
        }

        analyze(State(state.clone()), form("Google")).await;
        assert_eq!(state.session.lock().await.dashboard.search_term(), "Tesla");

        gate.notify_one();
        first.await.unwrap();

        let session = state.session.lock().await;
        assert_eq!(session.dashboard.error(), ANALYZE_FAILED_ERROR);
        assert_eq!(session.dashboard.search_term(), "Tesla");
        assert_eq!(api.analyze_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn toggle_flips_only_the_addressed_row() {
        let state = AppState::new(Arc::new(StubApi::default()));

        let loc = location(toggle_row(State(state.clone()), Path(7)).await);
        assert_eq!(loc, "/dashboard#company-7");
        toggle_row(State(state.clone()), Path(8)).await;
        toggle_row(State(state.clone()), Path(7)).await;

        let session = state.session.lock().await;
        assert!(!session.table.is_expanded(CompanyId(7)));
        assert!(session.table.is_expanded(CompanyId(8)));
    }

    #[tokio::test]
    async fn details_render_or_fail_with_bad_gateway() {
        let state = AppState::new(Arc::new(StubApi::default()));

        let ok = company_details(State(state.clone()), Path(3)).await.unwrap();
        assert!(ok.0.contains("Co 3"));

        let (status, _) = company_details(State(state.clone()), Path(404))
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
