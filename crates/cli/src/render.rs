//! Plain-text rendering of the dashboard views for the terminal.

use esg_core::chart::{BarPoint, TierDistribution, BAR_SERIES};
use esg_core::dashboard::DashboardStats;
use esg_core::domain::analysis::CompanyAnalysis;
use esg_core::risk::classify;
use esg_core::table::{percent, to_fixed, TableView, COLUMNS};
use esg_core::domain::company::Company;
use esg_core::time::display::format_timestamp;
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub fn render_stats(stats: &DashboardStats) -> String {
    format!(
        "Total Companies: {}  |  Average Risk Score: {}%  |  High Risk: {}  |  Low Risk: {}\n",
        stats.total,
        to_fixed(stats.average_score * 100.0, 1),
        stats.high_risk,
        stats.low_risk,
    )
}

/// Machine-readable `list` output: the stat cards and tier counts alongside the raw companies.
#[derive(Debug, Serialize)]
struct ListSnapshot<'a> {
    stats: DashboardStats,
    distribution: TierDistribution,
    companies: &'a [Company],
}

pub fn render_list_json(companies: &[Company]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ListSnapshot {
        stats: DashboardStats::from_companies(companies),
        distribution: TierDistribution::from_companies(companies),
        companies,
    })
}

pub fn render_distribution(distribution: &TierDistribution) -> String {
    let total = distribution.total();
    let mut out = String::from("Risk Distribution\n");
    for slice in distribution.slices() {
        let _ = writeln!(
            out,
            "  {:<12} {:>4}  {:<20} {}",
            slice.name,
            slice.count,
            bar(slice.fraction),
            slice.share_caption(total),
        );
    }
    out
}

pub fn render_bars(points: &[BarPoint]) -> String {
    let mut out = String::from("Risk Scores by Company\n");
    for point in points {
        let _ = writeln!(out, "  {}", point.name);
        for ((series, _), value) in BAR_SERIES.iter().zip(point.values()) {
            let _ = writeln!(
                out,
                "    {:<14} {:<20} {:>6.1}%",
                series,
                bar(value / 100.0),
                value
            );
        }
    }
    out
}

fn bar(fraction: f64) -> String {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    "#".repeat(filled)
}

pub fn render_table(view: &TableView) -> String {
    let rows = match view {
        TableView::Empty { title, hint } => return format!("{title}\n{hint}\n"),
        TableView::Rows(rows) => rows,
    };

    let cells: Vec<[String; 7]> = rows
        .iter()
        .map(|r| {
            [
                format!("{} {}", if r.expanded { "v" } else { ">" }, r.name),
                format!("{} {}", r.overall.level, r.overall_pct),
                r.environmental_pct.clone(),
                r.social_pct.clone(),
                r.governance_pct.clone(),
                r.total_articles.to_string(),
                r.last_analyzed.clone(),
            ]
        })
        .collect();

    // Actions column has no terminal counterpart.
    let headers = &COLUMNS[..7];
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().map(|h| h.to_uppercase()), &widths);
    for (row, cell_row) in rows.iter().zip(&cells) {
        push_line(&mut out, cell_row.iter().cloned(), &widths);
        if let Some(b) = &row.breakdown {
            let _ = writeln!(
                out,
                "    Environmental {}  Social {}  Governance {}",
                b.environmental_pct, b.social_pct, b.governance_pct
            );
            let _ = writeln!(out, "    {}", b.summary);
        }
    }
    out
}

fn push_line(out: &mut String, cells: impl Iterator<Item = String>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, w)| format!("{cell:<w$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

pub fn render_analysis(analysis: &CompanyAnalysis) -> String {
    let b = &analysis.risk_breakdown;
    let overall = classify(b.overall_score);

    let mut out = String::new();
    let _ = writeln!(out, "{}", analysis.company);
    let _ = writeln!(
        out,
        "Overall risk: {} ({})",
        overall.level,
        percent(b.overall_score)
    );
    let _ = writeln!(
        out,
        "Environmental {}  Social {}  Governance {}",
        percent(b.environmental_score),
        percent(b.social_score),
        percent(b.governance_score)
    );
    let _ = writeln!(
        out,
        "Analyzed {} articles on {}",
        analysis.total_articles,
        format_timestamp(&analysis.analyzed_at)
    );

    if !analysis.events.is_empty() {
        let _ = writeln!(out, "\nESG Events");
        for e in &analysis.events {
            let _ = writeln!(
                out,
                "  - [{}] {} (severity {:.2})",
                e.event_type, e.description, e.severity
            );
        }
    }

    if !analysis.articles.is_empty() {
        let _ = writeln!(out, "\nArticles");
        for a in &analysis.articles {
            let _ = writeln!(
                out,
                "  - {} ({}, sentiment {:+.2}, {} events)\n    {}",
                a.title,
                format_timestamp(&a.published_at),
                a.sentiment_score,
                a.events.len(),
                a.url
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use esg_core::chart::bar_series;
    use esg_core::domain::analysis::RiskBreakdown;
    use esg_core::domain::company::CompanyId;
    use esg_core::table::CompanyTable;
    use serde_json::Value;

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

    #[test]
    fn empty_table_prints_placeholder() {
        let text = render_table(&CompanyTable::new().view(&[]));
        assert_eq!(
            text,
            "No companies analyzed yet\nUse the search box above to analyze your first company\n"
        );
    }

    #[test]
    fn table_rows_follow_input_and_expansion() {
        let companies = vec![company(1, "Tesla", 0.75), company(2, "Google", 0.15)];
        let mut table = CompanyTable::new();
        table.toggle(CompanyId(2));

        let text = render_table(&table.view(&companies));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("COMPANY"));
        assert!(lines[1].starts_with("> Tesla"));
        assert!(lines[1].contains("High 75.0%"));
        assert!(lines[2].starts_with("v Google"));
        assert_eq!(
            lines[4].trim(),
            "Analyzed 8 articles. Last updated on Mar 1, 2024, 09:15 AM. Overall risk level is Low."
        );
    }

    #[test]
    fn distribution_shows_counts_and_shares() {
        let companies: Vec<_> = [0.1, 0.35, 0.7, 0.95, 0.2]
            .iter()
            .enumerate()
            .map(|(i, s)| company(i as i64, "x", *s))
            .collect();
        let text = render_distribution(&TierDistribution::from_companies(&companies));
        assert!(text.contains("40.0% of companies"));
        assert!(text.contains("20.0% of companies"));
    }

    #[test]
    fn bars_scale_to_width() {
        assert_eq!(bar(1.0).len(), BAR_WIDTH);
        assert_eq!(bar(0.5).len(), BAR_WIDTH / 2);
        assert_eq!(bar(f64::NAN), "");
        assert_eq!(bar(3.0).len(), BAR_WIDTH);

        let text = render_bars(&bar_series(&[company(1, "Tesla", 0.75)]));
        assert!(text.contains("Overall Risk"));
        assert!(text.contains("75.0%"));
    }

    #[test]
    fn analysis_summary_lists_breakdown() {
        let analysis = CompanyAnalysis {
            company: "Tesla".to_string(),
            score: 0.25,
            risk_breakdown: RiskBreakdown {
                overall_score: 0.25,
                environmental_score: 0.5,
                social_score: 0.125,
                governance_score: 0.0,
            },
            events: vec![],
            articles: vec![],
            total_articles: 0,
            analyzed_at: "bogus".to_string(),
        };
        let text = render_analysis(&analysis);
        assert!(text.contains("Overall risk: Low (25.0%)"));
        assert!(text.contains("Governance 0.0%"));
        assert!(text.contains("on Invalid Date"));
        assert!(!text.contains("ESG Events"));
    }

    #[test]
    fn list_json_carries_stats_and_distribution() {
        let companies: Vec<_> = [0.1, 0.35, 0.7, 0.95, 0.2]
            .iter()
            .enumerate()
            .map(|(i, s)| company(i as i64, "x", *s))
            .collect();
        let v: Value = serde_json::from_str(&render_list_json(&companies).unwrap()).unwrap();
        assert_eq!(v["stats"]["total"], 5);
        assert_eq!(v["stats"]["high_risk"], 2);
        assert_eq!(v["stats"]["low_risk"], 2);
        assert_eq!(v["distribution"]["medium"], 1);
        assert_eq!(v["companies"].as_array().unwrap().len(), 5);
        assert_eq!(v["companies"][3]["overall_score"], 0.95);
    }

    #[test]
    fn list_json_for_empty_collection() {
        let v: Value = serde_json::from_str(&render_list_json(&[]).unwrap()).unwrap();
        assert_eq!(v["stats"]["average_score"], 0.0);
        assert_eq!(v["distribution"]["low"], 0);
        assert_eq!(v["companies"], Value::Array(vec![]));
    }
}
