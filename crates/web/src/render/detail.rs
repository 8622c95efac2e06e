use super::{html_escape, page};
use esg_core::domain::analysis::{Article, CompanyAnalysis, EsgEvent};
use esg_core::domain::company::CompanyId;
use esg_core::risk::classify;
use esg_core::table::percent;
use esg_core::time::display::format_timestamp;

pub fn render_detail(id: CompanyId, analysis: &CompanyAnalysis) -> String {
    let overall = classify(analysis.risk_breakdown.overall_score);
    let b = &analysis.risk_breakdown;

    let events = if analysis.events.is_empty() {
        r#"<p class="muted">No ESG events detected.</p>"#.to_string()
    } else {
        let items: String = analysis.events.iter().map(render_event).collect();
        format!("<ul>{items}</ul>")
    };

    let articles = if analysis.articles.is_empty() {
        r#"<p class="muted">No articles on record.</p>"#.to_string()
    } else {
        let rows: String = analysis.articles.iter().map(render_article).collect();
        format!(
            r#"<table>
    <thead><tr><th>Title</th><th>Published</th><th>Sentiment</th><th>Events</th></tr></thead>
    <tbody>{rows}</tbody>
</table>"#
        )
    };

    let body = format!(
        r#"<p><a class="link-btn" href="/dashboard#company-{id}">&larr; Back to dashboard</a></p>
<div class="card">
    <h1>{name}</h1>
    <p class="muted">Analyzed {articles_total} articles on {analyzed_at}.</p>
    <p><span class="badge {bg} {fg}">{level}</span>{overall_pct}</p>
    <div class="grid-3">
        <div class="panel"><div class="label">Environmental</div><div class="value text-green-600">{env}</div></div>
        <div class="panel"><div class="label">Social</div><div class="value text-blue-600">{social}</div></div>
        <div class="panel"><div class="label">Governance</div><div class="value text-purple-600">{gov}</div></div>
    </div>
</div>
<div class="card">
    <h2>ESG Events</h2>
    {events}
</div>
<div class="card flush">
    <div class="card-header"><h2>Articles</h2></div>
    {articles}
</div>"#,
        name = html_escape(&analysis.company),
        articles_total = analysis.total_articles,
        analyzed_at = html_escape(&format_timestamp(&analysis.analyzed_at)),
        bg = overall.background_class,
        fg = overall.color_class,
        level = overall.level,
        overall_pct = percent(b.overall_score),
        env = percent(b.environmental_score),
        social = percent(b.social_score),
        gov = percent(b.governance_score),
    );

    page(&analysis.company, &body, None)
}

fn render_event(event: &EsgEvent) -> String {
    format!(
        r#"<li><strong>{kind}</strong>: {description} <span class="muted">(severity {severity:.2})</span></li>"#,
        kind = html_escape(&event.event_type),
        description = html_escape(&event.description),
        severity = event.severity,
    )
}

fn render_article(article: &Article) -> String {
    let title = html_escape(&article.title);
    // Scraped URLs only become links for web schemes.
    let link = if is_web_url(&article.url) {
        format!(
            r#"<a href="{url}" rel="noopener noreferrer">{title}</a>"#,
            url = html_escape(article.url.trim()),
        )
    } else {
        title
    };

    format!(
        r#"<tr>
    <td>{link}</td>
    <td>{published}</td>
    <td>{sentiment:+.2}</td>
    <td>{events}</td>
</tr>"#,
        published = html_escape(&format_timestamp(&article.published_at)),
        sentiment = article.sentiment_score,
        events = article.events.len(),
    )
}

fn is_web_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    url.starts_with("http://") || url.starts_with("https://")
}

/// Shown when the detail fetch fails.
pub fn render_detail_error(id: CompanyId) -> String {
    let body = format!(
        r#"<p><a class="link-btn" href="/dashboard">&larr; Back to dashboard</a></p>
<div class="card">
    <h2>Company details unavailable</h2>
    <div class="error">Failed to load details for company {id}. Please try again.</div>
</div>"#
    );
    page("Company details unavailable", &body, None)
}
