use super::html_escape;
use esg_core::chart::{bar_series, BarPoint, TierDistribution, TierSlice, BAR_SERIES};
use esg_core::domain::company::Company;
use std::f64::consts::PI;

const BAR_HEIGHT: f64 = 300.0;
const BAR_MARGIN_LEFT: f64 = 50.0;
const BAR_MARGIN_TOP: f64 = 20.0;
const BAR_MARGIN_BOTTOM: f64 = 80.0;
const BAR_GROUP_WIDTH: f64 = 120.0;
const BAR_MIN_WIDTH: f64 = 600.0;

const PIE_WIDTH: f64 = 320.0;
const PIE_HEIGHT: f64 = 250.0;
const PIE_RADIUS: f64 = 80.0;

/// Chart section of the dashboard: bar chart, pie chart and tier summary cards.
pub fn render_risk_chart(companies: &[Company]) -> String {
    let distribution = TierDistribution::from_companies(companies);

    format!(
        r#"<div>
    <h3>Risk Scores by Company</h3>
    {bars}
</div>
<div>
    <h3>Risk Distribution</h3>
    {pie}
</div>
{cards}"#,
        bars = render_bar_chart(&bar_series(companies)),
        pie = render_pie_chart(&distribution),
        cards = render_tier_cards(&distribution),
    )
}

pub fn render_bar_chart(points: &[BarPoint]) -> String {
    let plot_w = (points.len() as f64 * BAR_GROUP_WIDTH).max(BAR_MIN_WIDTH);
    let width = plot_w + BAR_MARGIN_LEFT + 30.0;
    let plot_h = BAR_HEIGHT - BAR_MARGIN_TOP - BAR_MARGIN_BOTTOM;
    let baseline = BAR_MARGIN_TOP + plot_h;

    let mut svg = String::new();

    for tick in [0, 25, 50, 75, 100] {
        let y = baseline - plot_h * tick as f64 / 100.0;
        svg.push_str(&format!(
            r##"<line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="#e5e7eb" stroke-dasharray="3 3"/><text x="{tx}" y="{ty:.1}" font-size="11" text-anchor="end" fill="#6b7280">{tick}%</text>"##,
            x1 = BAR_MARGIN_LEFT,
            x2 = BAR_MARGIN_LEFT + plot_w,
            tx = BAR_MARGIN_LEFT - 6.0,
            ty = y + 4.0,
        ));
    }

    let group_w = if points.is_empty() {
        plot_w
    } else {
        plot_w / points.len() as f64
    };
    let bar_w = group_w * 0.8 / BAR_SERIES.len() as f64;

    for (i, point) in points.iter().enumerate() {
        let group_x = BAR_MARGIN_LEFT + group_w * i as f64 + group_w * 0.1;
        let name = html_escape(&point.name);

        for (j, ((series, color), value)) in BAR_SERIES.iter().zip(point.values()).enumerate() {
            let h = plot_h * bar_fraction(value);
            svg.push_str(&format!(
                r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{color}"><title>{name} - {series}: {value:.1}%</title></rect>"#,
                x = group_x + bar_w * j as f64,
                y = baseline - h,
                w = bar_w,
            ));
        }

        let label_x = BAR_MARGIN_LEFT + group_w * (i as f64 + 0.5);
        let label_y = baseline + 14.0;
        svg.push_str(&format!(
            r##"<text x="{label_x:.1}" y="{label_y:.1}" font-size="12" text-anchor="end" fill="#374151" transform="rotate(-45 {label_x:.1} {label_y:.1})">{name}</text>"##
        ));
    }

    let legend: String = BAR_SERIES
        .iter()
        .map(|(series, color)| {
            format!(r#"<span><span class="swatch" style="background:{color}"></span>{series}</span>"#)
        })
        .collect();

    format!(
        r#"<svg class="bar-chart" viewBox="0 0 {width:.0} {BAR_HEIGHT:.0}" width="100%" height="{BAR_HEIGHT:.0}" role="img">{svg}</svg>
<div class="legend">{legend}</div>"#
    )
}

// Axis domain is [0, 100]; anything outside draws clipped, NaN draws nothing.
fn bar_fraction(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0) / 100.0
}

pub fn render_pie_chart(distribution: &TierDistribution) -> String {
    let cx = PIE_WIDTH / 2.0;
    let cy = PIE_HEIGHT / 2.0;
    let slices = distribution.slices();

    let mut shapes = String::new();
    if distribution.total() == 0 {
        shapes.push_str(&format!(
            r##"<circle cx="{cx}" cy="{cy}" r="{PIE_RADIUS}" fill="#e5e7eb"/>"##
        ));
    }

    let mut start = -PI / 2.0;
    for slice in slices.iter().filter(|s| s.count > 0) {
        let sweep = slice.fraction * 2.0 * PI;
        let label = html_escape(&slice.label());
        if slice.fraction >= 1.0 {
            shapes.push_str(&format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{PIE_RADIUS}" fill="{color}"><title>{label}</title></circle>"#,
                color = slice.color,
            ));
        } else {
            shapes.push_str(&format!(
                r#"<path d="{d}" fill="{color}"><title>{label}</title></path>"#,
                d = arc_path(cx, cy, PIE_RADIUS, start, start + sweep),
                color = slice.color,
            ));
        }
        start += sweep;
    }

    let legend: String = slices.iter().map(legend_entry).collect();

    format!(
        r#"<svg class="pie-chart" viewBox="0 0 {PIE_WIDTH:.0} {PIE_HEIGHT:.0}" width="{PIE_WIDTH:.0}" height="{PIE_HEIGHT:.0}" role="img">{shapes}</svg>
<div class="legend">{legend}</div>"#
    )
}

fn legend_entry(slice: &TierSlice) -> String {
    format!(
        r#"<span><span class="swatch" style="background:{color}"></span>{label}</span>"#,
        color = slice.color,
        label = html_escape(&slice.label()),
    )
}

fn arc_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    let (x1, y1) = (cx + r * start.cos(), cy + r * start.sin());
    let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
    let large_arc = if end - start > PI { 1 } else { 0 };
    format!("M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z")
}

pub fn render_tier_cards(distribution: &TierDistribution) -> String {
    let total = distribution.total();
    let cards: String = distribution
        .slices()
        .iter()
        .map(|slice| {
            format!(
                r#"<div class="tier-card {bg}">
    <div><span class="swatch" style="background:{color}"></span><span class="{text}">{name}</span></div>
    <div class="count {text}">{count}</div>
    <div class="share {text}">{share}</div>
</div>"#,
                bg = slice.level.background_class(),
                text = slice.level.color_class(),
                color = slice.color,
                name = slice.name,
                count = slice.count,
                share = slice.share_caption(total),
            )
        })
        .collect();

    format!(r#"<div class="grid-3">{cards}</div>"#)
}
