//! Server-rendered HTML for the single-page checker.

use crate::html::escape;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageView {
    pub prediction_text: Option<String>,
    pub original_text: Option<String>,
    pub source_link: Option<String>,
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
h1 { font-size: 1.6rem; }
textarea, input[type=url] { width: 100%; box-sizing: border-box; padding: .5rem; font: inherit; }
textarea { min-height: 8rem; }
button { margin-top: .75rem; padding: .5rem 1.25rem; font: inherit; cursor: pointer; }
.or { margin: .75rem 0; color: #777; }
.result { margin-top: 1.5rem; padding: 1rem; border-radius: 6px; background: #f4f4f4; }
.result.real { background: #e6f6ea; }
.result.fake { background: #fbe9e9; }
.source { margin-top: .5rem; font-size: .9rem; }
"#;

fn result_class(prediction: &str) -> &'static str {
    if prediction.starts_with("REAL") {
        "result real"
    } else if prediction.starts_with("FAKE") {
        "result fake"
    } else {
        "result"
    }
}

fn is_http_link(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn result_block(view: &PageView) -> String {
    let Some(prediction) = view.prediction_text.as_deref() else {
        return String::new();
    };
    let source = match view.source_link.as_deref() {
        Some(link) if is_http_link(link) => format!(
            r#"<div class="source">Source: <a href="{href}" target="_blank" rel="noopener noreferrer">{text}</a></div>"#,
            href = escape(link),
            text = escape(link),
        ),
        _ => String::new(),
    };
    format!(
        r#"<section class="{class}"><strong>{prediction}</strong>{source}</section>"#,
        class = result_class(prediction),
        prediction = escape(prediction),
        source = source,
    )
}

pub fn index_page(view: &PageView) -> String {
    let original = view.original_text.as_deref().unwrap_or("");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Fake News Detector</title>
    <style>{css}</style>
</head>
<body>
    <h1>Fake News Detector</h1>
    <form action="/predict" method="post">
        <label for="news_text">Paste the news text</label>
        <textarea id="news_text" name="news_text" placeholder="Enter a headline or article...">{original}</textarea>
        <div class="or">or</div>
        <label for="news_url">Article link</label>
        <input type="url" id="news_url" name="news_url" placeholder="https://...">
        <button type="submit">Check</button>
    </form>
    {result}
</body>
</html>"#,
        css = CSS,
        original = escape(original),
        result = result_block(view),
    )
}
