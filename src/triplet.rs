//! Triplet store: parse a text file into (head, relation, tail) records.
//!
//! The input format is one triplet per line, shaped `('head', 'relation', 'tail')`.
//! Surrounding parentheses and quotes are tolerated but optional. Blank lines are
//! ignored, and lines that do not yield exactly three fields are skipped — the
//! skip-on-malformed policy is an explicit rule, not an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A (head, relation, tail) fact record. Immutable once parsed.
///
/// Uniqueness is not enforced; duplicate triplets may coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triplet {
    /// Head entity name.
    pub head: String,
    /// Relation (predicate) phrase.
    pub relation: String,
    /// Tail entity name.
    pub tail: String,
}

impl Triplet {
    /// Create a new triplet.
    pub fn new(
        head: impl Into<String>,
        relation: impl Into<String>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            head: head.into(),
            relation: relation.into(),
            tail: tail.into(),
        }
    }

    /// The relation phrase: head, relation, and tail joined by single spaces.
    ///
    /// This is the unit that gets embedded, not the raw relation label alone.
    pub fn phrase(&self) -> String {
        format!("{} {} {}", self.head, self.relation, self.tail)
    }
}

impl std::fmt::Display for Triplet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "('{}', '{}', '{}')", self.head, self.relation, self.tail)
    }
}

/// Parse a single line into a triplet.
///
/// Steps: trim whitespace, strip surrounding parentheses, split on `", "`
/// exactly, then strip quote characters from each field. Returns `None` when
/// the split does not yield exactly three fields.
fn parse_line(line: &str) -> Option<Triplet> {
    let stripped = line
        .trim()
        .trim_matches(|c| c == '(' || c == ')');

    let parts: Vec<&str> = stripped.split(", ").collect();
    if parts.len() != 3 {
        return None;
    }

    let field = |s: &str| s.trim().trim_matches(|c| c == '\'' || c == '"').to_string();
    Some(Triplet {
        head: field(parts[0]),
        relation: field(parts[1]),
        tail: field(parts[2]),
    })
}

/// Load triplets from a text file, one per line.
///
/// An unreadable file is fatal; malformed individual lines are skipped
/// and logged at debug level.
pub fn load_triplets(path: impl AsRef<Path>) -> Result<Vec<Triplet>, StoreError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut triplets = Vec::new();
    for (number, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Some(triplet) => triplets.push(triplet),
            None => {
                tracing::debug!(line = number + 1, "skipping malformed triplet line");
            }
        }
    }

    tracing::info!(count = triplets.len(), path = %path.display(), "loaded triplets");
    Ok(triplets)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_quoted_line() {
        let t = parse_line("('p53', 'positively correlated with', 'MDM2')").unwrap();
        assert_eq!(t.head, "p53");
        assert_eq!(t.relation, "positively correlated with");
        assert_eq!(t.tail, "MDM2");
    }

    #[test]
    fn parse_tolerates_missing_parens_and_quotes() {
        let t = parse_line("p53, activates, MDM2").unwrap();
        assert_eq!(t, Triplet::new("p53", "activates", "MDM2"));

        let t = parse_line("(\"p53\", \"activates\", \"MDM2\")").unwrap();
        assert_eq!(t, Triplet::new("p53", "activates", "MDM2"));
    }

    #[test]
    fn parse_round_trips_display_form() {
        let original = Triplet::new("GATA-1", "associated with", "hematopoietic factor");
        let reparsed = parse_line(&original.to_string()).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn malformed_lines_yield_none() {
        assert!(parse_line("('only', 'two fields')").is_none());
        assert!(parse_line("('a', 'b', 'c', 'd')").is_none());
        assert!(parse_line("not a triplet at all").is_none());
    }

    #[test]
    fn phrase_joins_with_single_spaces() {
        let t = Triplet::new("p53", "positively correlated with", "MDM2");
        assert_eq!(t.phrase(), "p53 positively correlated with MDM2");
    }

    #[test]
    fn load_skips_blank_and_malformed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "('p53', 'positively correlated with', 'MDM2')").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "garbage line").unwrap();
        writeln!(file, "('spinal cord', 'connected to', 'cerebellum')").unwrap();

        let triplets = load_triplets(file.path()).unwrap();
        assert_eq!(triplets.len(), 2);
        assert_eq!(triplets[0].head, "p53");
        assert_eq!(triplets[1].tail, "cerebellum");
    }

    #[test]
    fn load_empty_file_is_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let triplets = load_triplets(file.path()).unwrap();
        assert!(triplets.is_empty());
    }

    #[test]
    fn load_missing_file_errors() {
        let result = load_triplets("/nonexistent/triplets.txt");
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
