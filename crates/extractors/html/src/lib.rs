use std::path::Path;

use scour_common::api::LocationMatch;
use scour_common::expr::Expression;
use scraper::Html;

/// Matching lines at or above this trimmed length are dropped from the
/// result. Deliberate truncation policy carried over from the original
/// service, not a bug.
const MAX_FRAGMENT_LEN: usize = 100;

const HIDDEN_TAGS: &[&str] = &["script", "style"];

/// Accept .html files.
pub fn accepts(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("html"))
        .unwrap_or(false)
}

/// Scan the visible text of an HTML document line by line.
///
/// Matching lines are trimmed and returned as fragments; lines whose trimmed
/// length reaches [`MAX_FRAGMENT_LEN`] are silently dropped even when they
/// match.
pub fn search(path: &Path, expr: &Expression) -> anyhow::Result<Vec<LocationMatch>> {
    let src = std::fs::read_to_string(path)?;
    Ok(search_str(&src, expr))
}

/// Same as [`search`], over an in-memory document.
pub fn search_str(src: &str, expr: &Expression) -> Vec<LocationMatch> {
    let text = visible_text(&Html::parse_document(src));

    text.lines()
        .filter(|line| expr.matches(line))
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.chars().count() < MAX_FRAGMENT_LEN {
                Some(LocationMatch::Fragment {
                    text: trimmed.to_string(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Concatenate the document's text nodes, skipping script/style subtrees.
fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node in document.root_element().descendants() {
        if let scraper::Node::Text(text) = node.value() {
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|el| HIDDEN_TAGS.contains(&el.name()))
                    .unwrap_or(false)
            });
            if !hidden {
                out.push_str(&text.text);
            }
        }
    }
    out
}
