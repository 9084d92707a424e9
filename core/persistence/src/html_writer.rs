//! FILENAME: core/persistence/src/html_writer.rs
//! Writes the treemap figure as a standalone HTML document.
//!
//! The charting library is loaded from its CDN; only the figure data is
//! embedded in the page.

use std::fs;
use std::path::Path;

use treemap_engine::{TreemapFigure, PLOTLY_CDN_URL};
use uuid::Uuid;

use crate::PersistenceError;

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Serializes `value` for embedding in a `<script>` element.
fn script_json<T: serde::Serialize>(value: &T) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Renders the full HTML document for `figure`.
pub fn render_html(figure: &TreemapFigure) -> Result<String, PersistenceError> {
    let div_id = Uuid::new_v4().to_string();

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body>
    <div>
        <script charset="utf-8" src="{cdn}"></script>
        <div id="{id}" class="plotly-graph-div" style="height:100%; width:100%;"></div>
        <script type="text/javascript">
            if (document.getElementById("{id}")) {{
                Plotly.newPlot("{id}", {data}, {layout}, {{"responsive": true}});
            }}
        </script>
    </div>
</body>
</html>
"#,
        title = html_escape(figure.title()),
        cdn = PLOTLY_CDN_URL,
        id = div_id,
        data = script_json(&figure.data)?,
        layout = script_json(&figure.layout)?,
    ))
}

/// Renders and writes the document. The page is rendered completely before
/// the file is created.
pub fn write_html(figure: &TreemapFigure, path: &Path) -> Result<(), PersistenceError> {
    let html = render_html(figure)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, html)?;
    Ok(())
}
