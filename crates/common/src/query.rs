use std::collections::BTreeSet;

use crate::api::FormatTag;

/// A parsed client query: which formats to scan and the residual keyword
/// expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub formats: BTreeSet<FormatTag>,
    pub expression: String,
}

const DIRECTIVE_PREFIX: &str = "filetype:";

/// Parse a raw query string.
///
/// `filetype:<tag>[,<tag>...][ <expression>]` scopes the search to the listed
/// formats; the prefix is case-insensitive, tags are trimmed and lowercased,
/// and the literal tag `all` expands to every format, discarding the rest of
/// the list. Without the directive the whole string is the expression and all
/// four formats are searched.
///
/// This never fails: unknown tags are dropped silently, and a directive with
/// no recognisable tag degrades to an empty format set (search nothing).
pub fn parse(raw: &str) -> Query {
    let raw = raw.trim();

    // `get` also rejects a non-char-boundary split, so multibyte input
    // cannot panic here.
    let after_directive = match raw.get(..DIRECTIVE_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(DIRECTIVE_PREFIX) => {
            raw[DIRECTIVE_PREFIX.len()..].trim()
        }
        _ => {
            return Query {
                formats: FormatTag::ALL.into_iter().collect(),
                expression: raw.to_string(),
            };
        }
    };
    let (formats_part, expression) = match after_directive.split_once(' ') {
        Some((formats_part, rest)) => (formats_part, rest.trim()),
        None => (after_directive, ""),
    };

    let tags: Vec<String> = formats_part
        .split(',')
        .map(|tag| tag.trim().to_lowercase())
        .collect();

    let formats = if tags.iter().any(|tag| tag == "all") {
        FormatTag::ALL.into_iter().collect()
    } else {
        tags.iter().filter_map(|tag| FormatTag::parse(tag)).collect()
    };

    Query {
        formats,
        expression: expression.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(query: &Query) -> Vec<FormatTag> {
        query.formats.iter().copied().collect()
    }

    #[test]
    fn test_no_directive_searches_everything() {
        let query = parse("apple AND banana");
        assert_eq!(tags(&query), FormatTag::ALL);
        assert_eq!(query.expression, "apple AND banana");
    }

    #[test]
    fn test_scoped_directive() {
        let query = parse("filetype:txt,pdf keyword");
        assert_eq!(tags(&query), vec![FormatTag::Text, FormatTag::Pdf]);
        assert_eq!(query.expression, "keyword");
    }

    #[test]
    fn test_directive_prefix_is_case_insensitive() {
        let query = parse("FileType:HTML keyword");
        assert_eq!(tags(&query), vec![FormatTag::Html]);
        assert_eq!(query.expression, "keyword");
    }

    #[test]
    fn test_all_expands_and_discards_the_rest() {
        let query = parse("filetype:pdf,all,bogus keyword");
        assert_eq!(tags(&query), FormatTag::ALL);
    }

    #[test]
    fn test_all_equals_no_directive() {
        let scoped = parse("filetype:all keyword");
        let unscoped = parse("keyword");
        assert_eq!(scoped.formats, unscoped.formats);
        assert_eq!(scoped.expression, unscoped.expression);
    }

    #[test]
    fn test_unknown_tags_are_dropped() {
        let query = parse("filetype:docx,txt keyword");
        assert_eq!(tags(&query), vec![FormatTag::Text]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let query = parse("filetype:txt,txt,text keyword");
        assert_eq!(tags(&query), vec![FormatTag::Text]);
    }

    #[test]
    fn test_directive_without_expression() {
        let query = parse("filetype:txt");
        assert_eq!(tags(&query), vec![FormatTag::Text]);
        assert_eq!(query.expression, "");
    }

    #[test]
    fn test_malformed_directive_searches_nothing() {
        let query = parse("filetype:");
        assert!(query.formats.is_empty());
        assert_eq!(query.expression, "");
    }

    #[test]
    fn test_first_space_ends_format_list() {
        let query = parse("filetype:txt, pdf keyword");
        // The first space ends the format list, so " pdf keyword" is split
        // there: "txt," + expression "pdf keyword".
        assert_eq!(tags(&query), vec![FormatTag::Text]);
        assert_eq!(query.expression, "pdf keyword");
    }
}
