// Standalone HTML page around a chart spec, drawn client-side by plotly.js
use crate::chart::ChartSpec;
use crate::config::PageStyle;
use crate::error::Result;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const NARROW_MAX_WIDTH: &str = "730px";

pub fn render_page(spec: &ChartSpec, style: &PageStyle) -> Result<String> {
    // "</" inside a script block would end it early
    let figure = spec.to_json()?.replace("</", "<\\/");
    let max_width = if style.wide_layout {
        "none"
    } else {
        NARROW_MAX_WIDTH
    };
    let title = escape_html(&style.title);

    tracing::debug!(
        title = %style.title,
        wide_layout = style.wide_layout,
        bytes = figure.len(),
        "Rendering dashboard page"
    );

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{icon}</text></svg>">
<script src="{cdn}"></script>
<style>
main {{ max-width: {max_width}; margin: 0 auto; padding: 1rem; }}
{css}
</style>
</head>
<body>
<main>
<h1>{icon} {title}</h1>
<div id="chart"></div>
</main>
<script>
const figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#,
        title = title,
        icon = escape_html(&style.icon),
        cdn = PLOTLY_CDN,
        max_width = max_width,
        css = style.custom_css.replace("</", "<\\/"),
        figure = figure,
    ))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
