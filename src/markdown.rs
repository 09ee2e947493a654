//! Best-effort markdown-to-markup converter for assistant replies.
//!
//! This is a fixed pipeline of line-oriented passes, not a markdown grammar:
//! no escaping, no nested or multi-line list items. Each stage is a pure
//! string transform and later stages depend on the output shape of earlier
//! ones, so the order is load-bearing.

use std::sync::LazyLock;

use regex::Regex;

static H3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());
static H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());
static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static HEADING_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p>(<h[1-3]>.*?</h[1-3]>)</p>").unwrap());

/// Render markdown-flavored text to display markup. Total: unknown syntax
/// passes through unchanged.
pub fn render(markdown: &str) -> String {
    let out = headings(markdown);
    let out = bold(&out);
    let out = links(&out);
    let out = lists(&out);
    let out = breaks(&out);
    paragraphs(&out)
}

/// `#`/`##`/`###` line prefixes to heading markup. Longest prefix first so
/// `#` does not swallow the others.
fn headings(text: &str) -> String {
    let out = H3.replace_all(text, "<h3>$1</h3>");
    let out = H2.replace_all(&out, "<h2>$1</h2>");
    H1.replace_all(&out, "<h1>$1</h1>").into_owned()
}

fn bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>$1</strong>").into_owned()
}

fn links(text: &str) -> String {
    LINK.replace_all(text, r#"<a href="$2" target="_blank">$1</a>"#)
        .into_owned()
}

/// Lines of the form `- item` become list items; a run of consecutive item
/// lines collapses into a single enclosing list.
fn lists(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    let flush = |out: &mut Vec<String>, items: &mut Vec<String>| {
        if !items.is_empty() {
            out.push(format!("<ul>{}</ul>", items.concat()));
            items.clear();
        }
    };

    for line in text.split('\n') {
        if let Some(item) = line.strip_prefix("- ") {
            items.push(format!("<li>{item}</li>"));
        } else {
            flush(&mut out, &mut items);
            out.push(line.to_string());
        }
    }
    flush(&mut out, &mut items);

    out.join("\n")
}

/// Double newlines become paragraph boundaries, the rest line breaks.
fn breaks(text: &str) -> String {
    text.replace("\n\n", "</p><p>").replace('\n', "<br>")
}

/// Wrap everything in a paragraph, then drop empty paragraphs and unwrap
/// paragraphs that contain only a heading.
fn paragraphs(text: &str) -> String {
    let wrapped = format!("<p>{text}</p>").replace("<p></p>", "");
    HEADING_PARAGRAPH.replace_all(&wrapped, "$1").into_owned()
}
