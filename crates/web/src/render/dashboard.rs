use super::chart::render_risk_chart;
use super::{html_escape, page};
use esg_core::dashboard::{Dashboard, DashboardStats};
use esg_core::table::{to_fixed, CompanyTable, TableRow, TableView, COLUMNS};

const LOADING_REFRESH_SECS: u32 = 2;

pub fn render_dashboard(dashboard: &Dashboard, table: &CompanyTable) -> String {
    let companies = dashboard.companies();

    // Chart only appears once there is something to chart.
    let chart = if companies.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="card">
    <h2>Risk Score Distribution</h2>
    {chart}
</div>"#,
            chart = render_risk_chart(companies)
        )
    };

    let body = format!(
        r#"<div>
    <h1>ESG Risk Dashboard</h1>
    <p class="muted">Monitor and analyze ESG risks across your portfolio companies</p>
</div>
{search}
{stats}
{chart}
<div class="card flush">
    <div class="card-header">
        <h2>Company Analysis</h2>
        <p class="muted">Detailed ESG risk analysis for all analyzed companies</p>
    </div>
    {table}
</div>"#,
        search = render_search(dashboard),
        stats = render_stats(&dashboard.stats()),
        table = render_table(&table.view(companies)),
    );

    let refresh = dashboard.is_loading().then_some(LOADING_REFRESH_SECS);
    page("ESG Risk Dashboard", &body, refresh)
}

fn render_search(dashboard: &Dashboard) -> String {
    let (disabled, label) = if dashboard.is_loading() {
        (" disabled", "Analyzing...")
    } else {
        ("", "Analyze")
    };

    let error = if dashboard.error().is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="error">{}</div>"#,
            html_escape(dashboard.error())
        )
    };

    format!(
        r#"<div class="card">
    <form class="search" method="post" action="/dashboard/analyze">
        <input type="text" name="company" placeholder="Enter company name (e.g., Tesla, Google, Amazon)" value="{term}">
        <button class="btn" type="submit"{disabled}>{label}</button>
    </form>
    {error}
</div>"#,
        term = html_escape(dashboard.search_term()),
    )
}

fn render_stats(stats: &DashboardStats) -> String {
    format!(
        r#"<div class="stats">
    <div class="card stat"><div class="label">Total Companies</div><div class="value">{total}</div></div>
    <div class="card stat"><div class="label">Average Risk Score</div><div class="value">{avg}%</div></div>
    <div class="card stat"><div class="label">High Risk</div><div class="value text-red-600">{high}</div></div>
    <div class="card stat"><div class="label">Low Risk</div><div class="value text-green-600">{low}</div></div>
</div>"#,
        total = stats.total,
        avg = to_fixed(stats.average_score * 100.0, 1),
        high = stats.high_risk,
        low = stats.low_risk,
    )
}

fn render_table(view: &TableView) -> String {
    let rows = match view {
        TableView::Empty { title, hint } => {
            return format!(
                r#"<div class="empty">
    <p class="title">{title}</p>
    <p>{hint}</p>
</div>"#
            );
        }
        TableView::Rows(rows) => rows,
    };

    let header: String = COLUMNS.iter().map(|c| format!("<th>{c}</th>")).collect();
    let body: String = rows.iter().map(render_row).collect();

    format!(
        r#"<table>
    <thead><tr>{header}</tr></thead>
    <tbody>
        {body}
    </tbody>
</table>"#
    )
}

fn render_row(row: &TableRow) -> String {
    let chevron = if row.expanded { "&#9662;" } else { "&#9656;" };
    let name = html_escape(&row.name);
    let id = row.id;

    let mut html = format!(
        r#"<tr id="company-{id}">
    <td>
        <form method="post" action="/dashboard/companies/{id}/toggle" style="display:inline">
            <button class="toggle" type="submit" aria-expanded="{expanded}">{chevron}</button>
        </form>
        <strong>{name}</strong>
    </td>
    <td><span class="badge {bg} {fg}">{level}</span>{overall}</td>
    <td>{env}</td>
    <td>{social}</td>
    <td>{gov}</td>
    <td>{articles}</td>
    <td>{last}</td>
    <td><a class="link-btn" href="/dashboard/companies/{id}">View Details</a></td>
</tr>"#,
        expanded = row.expanded,
        bg = row.overall.background_class,
        fg = row.overall.color_class,
        level = row.overall.level,
        overall = row.overall_pct,
        env = row.environmental_pct,
        social = row.social_pct,
        gov = row.governance_pct,
        articles = row.total_articles,
        last = html_escape(&row.last_analyzed),
    );

    if let Some(breakdown) = &row.breakdown {
        html.push_str(&format!(
            r#"
<tr class="breakdown">
    <td colspan="{cols}">
        <h4>Risk Breakdown</h4>
        <div class="grid-3">
            <div class="panel"><div class="label">Environmental</div><div class="value text-green-600">{env}</div></div>
            <div class="panel"><div class="label">Social</div><div class="value text-blue-600">{social}</div></div>
            <div class="panel"><div class="label">Governance</div><div class="value text-purple-600">{gov}</div></div>
        </div>
        <h4>Analysis Summary</h4>
        <p class="muted">{summary}</p>
    </td>
</tr>"#,
            cols = COLUMNS.len(),
            env = breakdown.environmental_pct,
            social = breakdown.social_pct,
            gov = breakdown.governance_pct,
            summary = html_escape(&breakdown.summary),
        ));
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_core::dashboard::AnalysisRun;
    use esg_core::domain::analysis::{CompanyAnalysis, RiskBreakdown};
    use esg_core::domain::company::{Company, CompanyId};

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

    fn loaded(companies: Vec<Company>) -> Dashboard {
        let mut dash = Dashboard::new();
        dash.complete_mount(Some(companies));
        dash
    }

    #[test]
    fn empty_dashboard_shows_placeholder_and_no_chart() {
        let html = render_dashboard(&Dashboard::new(), &CompanyTable::new());
        assert!(html.contains("No companies analyzed yet"));
        assert!(!html.contains("Risk Score Distribution"));
        assert!(html.contains("0.0%"));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn populated_dashboard_renders_rows_chart_and_stats() {
        let dash = loaded(vec![company(1, "Tesla", 0.75), company(2, "Google", 0.15)]);
        let html = render_dashboard(&dash, &CompanyTable::new());
        assert!(html.contains("Risk Score Distribution"));
        assert!(html.contains(r#"<tr id="company-1">"#));
        assert!(html.contains(r#"<tr id="company-2">"#));
        assert!(html.contains("45.0%"));
        assert!(!html.contains("Analysis Summary"));
    }

    #[test]
    fn expanded_row_shows_summary() {
        let dash = loaded(vec![company(1, "Tesla", 0.75)]);
        let mut table = CompanyTable::new();
        table.toggle(CompanyId(1));

        let html = render_dashboard(&dash, &table);
        assert!(html.contains("Analysis Summary"));
        assert!(html.contains(
            "Analyzed 8 articles. Last updated on Mar 1, 2024, 09:15 AM. Overall risk level is High."
        ));
    }

    #[test]
    fn loading_disables_submit_and_refreshes() {
        let mut dash = Dashboard::new();
        dash.set_search_term("Tesla");
        dash.begin_analyze().unwrap();

        let html = render_dashboard(&dash, &CompanyTable::new());
        assert!(html.contains(r#"type="submit" disabled>Analyzing..."#));
        assert!(html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn error_banner_and_term_are_escaped() {
        let mut dash = Dashboard::new();
        dash.set_search_term("<script>");
        dash.begin_analyze().unwrap();
        dash.complete_analyze(Err(esg_core::api::ApiError::network("/api/analyze", "down")));

        let html = render_dashboard(&dash, &CompanyTable::new());
        assert!(html.contains("Failed to analyze company. Please try again."));
        assert!(html.contains(r#"value="&lt;script&gt;""#));
        assert!(html.contains(r#"type="submit">Analyze"#));
    }

    #[test]
    fn successful_analysis_clears_search_box() {
        let mut dash = Dashboard::new();
        dash.set_search_term("Tesla");
        dash.begin_analyze().unwrap();
        dash.complete_analyze(Ok(AnalysisRun {
            analysis: CompanyAnalysis {
                company: "Tesla".to_string(),
                score: 0.75,
                risk_breakdown: RiskBreakdown {
                    overall_score: 0.75,
                    environmental_score: 0.3,
                    social_score: 0.4,
                    governance_score: 0.5,
                },
                events: vec![],
                articles: vec![],
                total_articles: 8,
                analyzed_at: "2024-03-01T09:15:00".to_string(),
            },
            refreshed: Some(vec![company(1, "Tesla", 0.75)]),
        }));

        let html = render_dashboard(&dash, &CompanyTable::new());
        assert!(html.contains(r#"value="""#));
        assert!(html.contains("Tesla"));
    }
}
