//! Match catalog loaded from the match results log

use std::io::BufRead;
use tracing::info;

use crate::types::*;
use crate::utils::validation::*;

/// Finished matches in file order
///
/// Duplicates are kept and result labels are not checked against any known
/// set of sides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchCatalog {
    matches: Vec<Match>,
}

impl MatchCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `matchId,rateA,rateB,result` line
    pub fn parse_line(line: &str, ctx: &RecordContext<'_>) -> SettlementResult<Match> {
        let fields = split_fields(line);
        let id = parse_identifier(require_field(&fields, 0, "match id", ctx)?, "match id", ctx)?;
        let rate_a = parse_rate(require_field(&fields, 1, "rate A", ctx)?, "rate A", ctx)?;
        let rate_b = parse_rate(require_field(&fields, 2, "rate B", ctx)?, "rate B", ctx)?;
        let result = require_field(&fields, 3, "result", ctx)?.to_string();
        Ok(Match::new(id, rate_a, rate_b, result))
    }

    /// Load every line from a reader
    pub fn load<R: BufRead>(reader: R, origin: &str) -> SettlementResult<Self> {
        let mut catalog = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| SettlementError::Io {
                path: origin.into(),
                source,
            })?;
            let ctx = RecordContext::new(origin, index + 1);
            catalog.push(Self::parse_line(&line, &ctx)?);
        }
        info!(origin, matches = catalog.len(), "match catalog loaded");
        Ok(catalog)
    }

    pub fn push(&mut self, entry: Match) {
        self.matches.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl FromIterator<Match> for MatchCatalog {
    fn from_iter<I: IntoIterator<Item = Match>>(iter: I) -> Self {
        Self {
            matches: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M1: &str = "abae7f73-e5fd-4e37-be36-0a2d6ba3fe2b";
    const M2: &str = "d6c8b5a5-4a2a-4b4f-8c3a-1f0e5b7a9c11";

    #[test]
    fn test_load_keeps_file_order_and_duplicates() {
        let input = format!("{M1},1.45,0.75,A\n{M2},0.2,4.8,B\n{M1},1.45,0.75,DRAW\n");
        let catalog = MatchCatalog::load(input.as_bytes(), "match_data.txt").unwrap();

        assert_eq!(catalog.len(), 3);
        let results: Vec<&str> = catalog.iter().map(|m| m.result.as_str()).collect();
        assert_eq!(results, vec!["A", "B", "DRAW"]);

        let first = catalog.iter().next().unwrap();
        assert_eq!(first.id.to_string(), M1);
        assert_eq!(first.rate_a, 1.45);
        assert_eq!(first.rate_b, 0.75);
    }

    #[test]
    fn test_empty_input_gives_empty_catalog() {
        let catalog = MatchCatalog::load("".as_bytes(), "match_data.txt").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_bad_rate_is_fatal() {
        let input = format!("{M1},1.45,0.75,A\n{M2},high,4.8,B\n");
        match MatchCatalog::load(input.as_bytes(), "match_data.txt").unwrap_err() {
            SettlementError::MalformedRecord { origin, line, reason } => {
                assert_eq!(origin, "match_data.txt");
                assert_eq!(line, 2);
                assert!(reason.contains("rate A"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_result_is_fatal() {
        let ctx = RecordContext::new("match_data.txt", 1);
        assert!(MatchCatalog::parse_line(&format!("{M1},1.45,0.75"), &ctx).is_err());
        assert!(MatchCatalog::parse_line("x,1.45,0.75,A", &ctx).is_err());
    }
}
