use super::page;

const FEATURES: [(&str, &str); 3] = [
    (
        "Risk Analysis",
        "Comprehensive ESG risk scoring based on environmental, social, and governance factors extracted from recent news articles.",
    ),
    (
        "AI-Powered",
        "Advanced NLP pipeline with sentiment analysis and named entity recognition to identify ESG-related events and risks.",
    ),
    (
        "Real-time Updates",
        "Continuously updated risk scores based on the latest news and events affecting your portfolio companies.",
    ),
];

pub fn render_landing() -> String {
    let features: String = FEATURES
        .iter()
        .map(|(title, text)| {
            format!(
                r#"<div class="card">
    <h3>{title}</h3>
    <p class="muted">{text}</p>
</div>"#
            )
        })
        .collect();

    let body = format!(
        r#"<div class="hero">
    <h1>ESG Risk Analyzer</h1>
    <p class="muted">AI-powered ESG risk analysis that scrapes company news, analyzes risk mentions, and ranks companies by ESG risk score on an intuitive dashboard.</p>
    <a class="btn" href="/dashboard">Go to Dashboard &rarr;</a>
</div>
<div class="features">
    {features}
</div>"#
    );

    page("ESG Risk Analyzer", &body, None)
}
