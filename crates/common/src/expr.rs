use anyhow::Context;
use regex::{Regex, RegexBuilder};

/// A compiled two-level search expression: AND-groups of OR-terms.
///
/// The raw string is split on the literal `" AND "`, then each segment on
/// `" OR "`. A candidate matches when every AND group contains at least one
/// term found anywhere in the candidate (case-insensitive regex search, not a
/// full match). A plain keyword therefore degenerates to a single
/// substring-style search, and the empty expression matches everything.
///
/// Terms are regex fragments, not escaped literals: `a.b` also matches `axb`.
#[derive(Debug, Clone)]
pub struct Expression {
    groups: Vec<Vec<Regex>>,
}

impl Expression {
    /// Compile every term once. An invalid fragment fails the whole query.
    pub fn compile(raw: &str) -> anyhow::Result<Expression> {
        let mut groups = Vec::new();
        for and_part in raw.split(" AND ") {
            let mut terms = Vec::new();
            for or_part in and_part.split(" OR ") {
                let term = RegexBuilder::new(or_part)
                    .case_insensitive(true)
                    .build()
                    .with_context(|| format!("invalid search term '{or_part}'"))?;
                terms.push(term);
            }
            groups.push(terms);
        }
        Ok(Expression { groups })
    }

    /// True when every AND group has at least one term found in `candidate`.
    pub fn matches(&self, candidate: &str) -> bool {
        self.groups
            .iter()
            .all(|terms| terms.iter().any(|term| term.is_match(candidate)))
    }
}
