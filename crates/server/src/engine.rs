use std::path::{Path, PathBuf};

use scour_common::api::{FormatTag, LocationMatch, MatchDescriptor, NO_MATCHES_SENTINEL};
use scour_common::config::CorpusConfig;
use scour_common::expr::Expression;
use scour_common::query;

type SearchFn = fn(&Path, &Expression) -> anyhow::Result<Vec<LocationMatch>>;

/// Where and how one format is searched. Resolved once at startup; the
/// per-query path never dispatches on format strings.
struct FormatRoute {
    tag: FormatTag,
    directory: PathBuf,
    extension: &'static str,
    search: SearchFn,
}

/// The query-and-scan engine: maps a raw query string to a serialized
/// response body. Holds only the read-only route table, so one instance is
/// shared by every session without synchronisation.
pub struct SearchEngine {
    routes: Vec<FormatRoute>,
}

impl SearchEngine {
    pub fn new(corpus: &CorpusConfig) -> SearchEngine {
        let routes = FormatTag::ALL
            .iter()
            .map(|&tag| FormatRoute {
                tag,
                directory: corpus.dir(tag).to_path_buf(),
                extension: extension_for(tag),
                search: search_fn(tag),
            })
            .collect();
        SearchEngine { routes }
    }

    /// Run one query end to end: parse, compile the expression, scan every
    /// requested format in canonical order, serialize.
    ///
    /// An error here (in practice: an invalid regex fragment) is a per-query
    /// failure; the session reports it inline and stays open.
    pub fn process(&self, raw_query: &str) -> anyhow::Result<String> {
        let query = query::parse(raw_query);
        let expr = Expression::compile(&query.expression)?;

        let mut lines = Vec::new();
        for route in self.routes.iter().filter(|r| query.formats.contains(&r.tag)) {
            lines.extend(scan_directory(
                &route.directory,
                route.extension,
                route.search,
                &expr,
            ));
        }

        if lines.is_empty() {
            Ok(NO_MATCHES_SENTINEL.to_string())
        } else {
            Ok(lines.join("\n"))
        }
    }
}

fn extension_for(tag: FormatTag) -> &'static str {
    match tag {
        FormatTag::Text => ".txt",
        FormatTag::Pdf => ".pdf",
        FormatTag::Spreadsheet => ".xlsx",
        FormatTag::Html => ".html",
    }
}

fn search_fn(tag: FormatTag) -> SearchFn {
    match tag {
        FormatTag::Text => scour_extract_text::search,
        FormatTag::Pdf => scour_extract_pdf::search,
        FormatTag::Spreadsheet => scour_extract_sheet::search,
        FormatTag::Html => scour_extract_html::search,
    }
}

/// Scan the immediate children of `directory` whose names end
/// (case-insensitively) with `extension`, in file-name order.
///
/// A missing directory contributes nothing. A file that fails to extract
/// becomes a single error line; its siblings are still scanned.
fn scan_directory(
    directory: &Path,
    extension: &str,
    search: SearchFn,
    expr: &Expression,
) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(directory) else {
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        // Path::is_file follows symlinks, so a linked corpus file is scanned
        // like a regular one.
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.to_lowercase().ends_with(extension))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let mut lines = Vec::new();
    for path in paths {
        match search(&path, expr) {
            Ok(locations) if locations.is_empty() => {}
            Ok(locations) => {
                let file_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default()
                    .to_string();
                lines.push(MatchDescriptor {
                    file_name,
                    locations,
                }
                .summary_line());
            }
            Err(e) => {
                tracing::warn!("extraction failed for {}: {e:#}", path.display());
                lines.push(format!("Error reading {}: {e:#}", path.display()));
            }
        }
    }
    lines
}
