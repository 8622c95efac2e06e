use esg_core::api::EsgApi;
use esg_core::dashboard::Dashboard;
use esg_core::table::CompanyTable;
use std::sync::Arc;
use tokio::sync::Mutex;

/// One open dashboard: the company collection with its search/analyze state, plus the table's
/// row expansion.
#[derive(Debug, Default)]
pub struct DashboardSession {
    pub dashboard: Dashboard,
    pub table: CompanyTable,
}

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn EsgApi>,
    pub session: Arc<Mutex<DashboardSession>>,
}

impl AppState {
    pub fn new(api: Arc<dyn EsgApi>) -> Self {
        Self {
            api,
            session: Arc::new(Mutex::new(DashboardSession::default())),
        }
    }

    /// Fetches the initial collection without holding the session lock across the request.
    pub async fn mount(&self) {
        let fetched = esg_core::dashboard::fetch_companies(self.api.as_ref()).await;
        let mut session = self.session.lock().await;
        session.dashboard.complete_mount(fetched);
        tracing::info!(
            companies = session.dashboard.companies().len(),
            "dashboard mounted"
        );
    }
}
