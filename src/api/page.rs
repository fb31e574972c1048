//! Server-rendered single page: the form plus the result of the last run.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::api::models::{DOWNLOAD_FILE_NAME, DOWNLOAD_MIME_TYPE};
use crate::error::AppError;
use crate::extract::Language;
use crate::pipeline::RunOutcome;

const TITLE: &str = "Chat-Mate...Summarize Text From YT or Website";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; color: #262730; }
label { display: block; margin: 1rem 0 .3rem; }
input[type=text], select { width: 100%; padding: .5rem; box-sizing: border-box; }
button, .download { margin-top: 1rem; padding: .5rem 1rem; border: 1px solid #ccc; border-radius: .4rem; background: #fff; color: inherit; text-decoration: none; display: inline-block; cursor: pointer; }
.error { background: #ffebee; color: #b71c1c; padding: .8rem; border-radius: .4rem; margin-top: 1rem; }
.success { background: #e8f5e9; color: #1b5e20; padding: .8rem; border-radius: .4rem; margin-top: 1rem; }
.summary, details pre { white-space: pre-wrap; }
details { margin-top: 1rem; border: 1px solid #ddd; border-radius: .4rem; padding: .5rem; }
"#;

/// What the page shows below the form.
pub enum PageResult<'a> {
    Empty,
    Failed(&'a AppError),
    Summarized(&'a RunOutcome),
}

pub fn render(url: &str, language: Language, result: PageResult<'_>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n", TITLE, STYLE));
    html.push_str(&format!("<h1>{} &#128221;</h1>\n<h3>Summarize any URL with ease</h3>\n", TITLE));

    html.push_str("<form method=\"post\" action=\"/\">\n");
    html.push_str("<label for=\"url\">Enter the URL (YouTube video or website)</label>\n");
    html.push_str(&format!(
        "<input type=\"text\" id=\"url\" name=\"url\" value=\"{}\">\n",
        escape_html(url)
    ));
    html.push_str("<label for=\"language\">Choose Transcript Language</label>\n<select id=\"language\" name=\"language\">\n");
    for option in Language::ALL {
        let selected = if option == language { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{label}\"{selected}>{label}</option>\n",
            label = option.label(),
        ));
    }
    html.push_str("</select>\n<button type=\"submit\">Summarize Now</button>\n</form>\n");

    match result {
        PageResult::Empty => {}
        PageResult::Failed(err) => {
            html.push_str(&format!(
                "<div class=\"error\">{}</div>\n",
                escape_html(&err.user_message())
            ));
        }
        PageResult::Summarized(outcome) => render_outcome(&mut html, outcome),
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_outcome(html: &mut String, outcome: &RunOutcome) {
    html.push_str("<details>\n<summary>View Extracted Content</summary>\n");
    html.push_str(&format!("<pre>{}</pre>\n</details>\n", escape_html(&outcome.document.text)));

    let summary = &outcome.summary.text;
    html.push_str("<div class=\"success\">Summary:</div>\n");
    html.push_str(&format!("<div class=\"summary\">{}</div>\n", escape_html(summary)));

    if !summary.is_empty() {
        html.push_str(&format!(
            "<a class=\"download\" download=\"{}\" href=\"{}\">Download Summary</a>\n",
            DOWNLOAD_FILE_NAME,
            download_href(summary)
        ));
    }
}

/// `data:` URI carrying the summary bytes as base64, so the saved file is
/// exactly what is displayed.
pub fn download_href(summary: &str) -> String {
    format!("data:{};base64,{}", DOWNLOAD_MIME_TYPE, STANDARD.encode(summary.as_bytes()))
}

pub fn escape_html(text: &str) -> String {
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
