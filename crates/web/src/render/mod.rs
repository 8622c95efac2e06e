//! Server-side HTML rendering. Every page is a self-contained document with inline CSS.

pub mod chart;
pub mod dashboard;
pub mod detail;
pub mod landing;

/// Wraps `body` in the shared document shell. `auto_refresh_secs` adds a meta refresh, used while
/// an analysis is running.
pub fn page(title: &str, body: &str, auto_refresh_secs: Option<u32>) -> String {
    let refresh = auto_refresh_secs
        .map(|s| format!(r#"<meta http-equiv="refresh" content="{s}">"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    {refresh}
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        {body}
    </div>
</body>
</html>"#,
        title = html_escape(title),
        css = inline_css(),
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; background: #f9fafb; color: #111827; }
.container { max-width: 1200px; margin: 0 auto; padding: 32px 16px; }
h1 { font-size: 30px; margin: 0 0 8px; }
h2 { font-size: 20px; margin: 0 0 16px; }
h3 { font-size: 18px; margin: 0 0 12px; }
h4 { font-size: 14px; margin: 0 0 8px; }
.muted { color: #4b5563; }
.card { background: #fff; border-radius: 8px; box-shadow: 0 1px 2px rgba(0,0,0,0.06); padding: 24px; margin-bottom: 32px; }
.card.flush { padding: 0; }
.card-header { padding: 24px; border-bottom: 1px solid #e5e7eb; }
.search { display: flex; gap: 16px; }
.search input { flex: 1; padding: 12px 16px; border: 1px solid #d1d5db; border-radius: 8px; font-size: 15px; }
.btn { background: #0284c7; color: #fff; border: 0; border-radius: 8px; padding: 12px 24px; font-weight: 600; cursor: pointer; text-decoration: none; display: inline-block; }
.btn:disabled { background: #9ca3af; cursor: not-allowed; }
.link-btn { background: none; border: 0; color: #0284c7; cursor: pointer; padding: 0; font: inherit; text-decoration: none; }
.toggle { background: none; border: 0; cursor: pointer; padding: 2px 6px; border-radius: 4px; }
.toggle:hover { background: #e5e7eb; }
.error { margin-top: 16px; padding: 12px; background: #fee2e2; border: 1px solid #f87171; color: #b91c1c; border-radius: 8px; }
.stats { display: grid; grid-template-columns: repeat(4, 1fr); gap: 24px; margin-bottom: 32px; }
.stat .label { font-size: 14px; color: #4b5563; }
.stat .value { font-size: 24px; font-weight: 700; }
.features { display: grid; grid-template-columns: repeat(3, 1fr); gap: 32px; }
.hero { text-align: center; padding: 48px 0; }
.hero p { font-size: 20px; max-width: 640px; margin: 0 auto 32px; }
table { width: 100%; border-collapse: collapse; }
thead { background: #f9fafb; }
th { padding: 12px 24px; text-align: left; font-size: 12px; font-weight: 500; color: #6b7280; text-transform: uppercase; letter-spacing: 0.05em; }
td { padding: 16px 24px; border-top: 1px solid #e5e7eb; font-size: 14px; white-space: nowrap; }
tr.breakdown td { background: #f9fafb; white-space: normal; }
.badge { display: inline-block; padding: 4px 8px; font-size: 12px; font-weight: 600; border-radius: 9999px; margin-right: 8px; }
.grid-3 { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; margin-bottom: 16px; }
.panel { background: #fff; border: 1px solid #e5e7eb; border-radius: 6px; padding: 12px; }
.panel .label { font-size: 12px; color: #6b7280; }
.panel .value { font-size: 18px; font-weight: 600; }
.empty { padding: 32px; text-align: center; color: #6b7280; }
.empty .title { font-size: 18px; }
.legend { display: flex; gap: 16px; flex-wrap: wrap; font-size: 13px; }
.swatch { display: inline-block; width: 12px; height: 12px; border-radius: 9999px; margin-right: 6px; vertical-align: middle; }
.tier-card { padding: 16px; border-radius: 8px; border: 1px solid #e5e7eb; }
.tier-card .count { font-size: 24px; font-weight: 700; margin-top: 4px; }
.tier-card .share { font-size: 12px; }
.text-green-600 { color: #16a34a; }
.text-yellow-600 { color: #ca8a04; }
.text-red-600 { color: #dc2626; }
.text-blue-600 { color: #2563eb; }
.text-purple-600 { color: #9333ea; }
.bg-green-100 { background: #dcfce7; }
.bg-yellow-100 { background: #fef9c3; }
.bg-red-100 { background: #fee2e2; }
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            html_escape(r#"<b>"AT&T's"</b>"#),
            "&lt;b&gt;&quot;AT&amp;T&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn refresh_meta_only_when_requested() {
        assert!(page("x", "", Some(2)).contains(r#"content="2""#));
        assert!(!page("x", "", None).contains("http-equiv"));
    }
}
