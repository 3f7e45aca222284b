//! Plain-text rendering of provider HTML.
//!
//! Recipe summaries and instructions arrive as HTML from a third party. They
//! are never rendered as markup: tags are dropped, block-level closers become
//! line breaks and entities are decoded after the tags are gone, so an
//! encoded `&lt;script&gt;` comes out as inert text.

const LINE_BREAK_TAGS: &[&str] = &["br", "/p", "/li", "/div", "/h1", "/h2", "/h3", "/ol", "/ul"];

/// Tags whose content is dropped along with the tag
const SKIPPED_CONTENT_TAGS: &[&str] = &["script", "style"];

pub fn html_to_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let after_open = &rest[start + 1..];

        // "5 < 10" is prose, not markup
        if !starts_tag(after_open) {
            text.push('<');
            rest = after_open;
            continue;
        }

        let Some(end) = after_open.find('>') else {
            // Unterminated tag: drop the remainder
            rest = "";
            break;
        };

        let inner = &after_open[..end];
        let tag = tag_name(inner);
        let self_closing = inner.trim_end().ends_with('/');
        rest = &after_open[end + 1..];

        if LINE_BREAK_TAGS.contains(&tag.as_str()) {
            text.push('\n');
        } else if SKIPPED_CONTENT_TAGS.contains(&tag.as_str()) && !self_closing {
            let closing = format!("</{tag}");
            rest = match find_ignore_case(rest, &closing) {
                Some(index) => rest[index..].find('>').map_or("", |gt| &rest[index + gt + 1..]),
                None => "",
            };
        }
    }
    text.push_str(rest);

    let decoded = html_escape::decode_html_entities(&text);
    collapse_whitespace(&decoded)
}

fn starts_tag(after_open: &str) -> bool {
    after_open
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

/// "br/" -> "br", "/P class=x" -> "/p", "li" -> "li"
fn tag_name(inner: &str) -> String {
    let inner = inner.trim();
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => ("/", body.trim_start()),
        None => ("", inner),
    };
    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    format!("{closing}{name}")
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

/// Trim each line, squeeze inner runs of spaces, keep at most one blank line
fn collapse_whitespace(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in text.lines() {
        let squeezed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        let previous_blank = lines.last().is_some_and(|l| l.is_empty());
        if squeezed.is_empty() && (lines.is_empty() || previous_blank) {
            continue;
        }
        lines.push(squeezed);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<b>Bold</b> and <a href=\"x\">linked</a>", "Bold and linked")]
    #[case("Fish &amp; chips", "Fish & chips")]
    #[case("<ol><li>Boil water</li><li>Add pasta</li></ol>", "Boil water\nAdd pasta")]
    #[case("Line one<br/>Line two<BR>Line three", "Line one\nLine two\nLine three")]
    #[case("plain text", "plain text")]
    #[case("", "")]
    #[case("Bake 5 < 10 minutes, then serve", "Bake 5 < 10 minutes, then serve")]
    #[case("Intro<script/>Important steps here", "IntroImportant steps here")]
    #[case("a<script/>b", "ab")]
    #[case("x <= y and y<2", "x <= y and y<2")]
    fn test_html_to_text(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(html_to_text(html), expected);
    }

    #[test]
    fn test_script_content_is_dropped() {
        let html = "Before<script>alert('x')</script>After";
        assert_eq!(html_to_text(html), "BeforeAfter");
    }

    #[test]
    fn test_encoded_markup_stays_text() {
        let html = "&lt;script&gt;alert(1)&lt;/script&gt;";
        assert_eq!(html_to_text(html), "<script>alert(1)</script>");
    }

    #[test]
    fn test_unterminated_tag_is_dropped() {
        assert_eq!(html_to_text("Safe text <img src=x onerror=alert(1)"), "Safe text");
    }

    #[test]
    fn test_blank_runs_collapse() {
        let html = "<p>First</p>\n\n\n<p>   Second   paragraph </p>";
        assert_eq!(html_to_text(html), "First\n\nSecond paragraph");
    }
}
