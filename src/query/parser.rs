/// Boolean combination mode for a multi-term query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanMode {
    /// All terms must match (intersection).
    And,
    /// Any term may match (union).
    Or,
}

/// Parsed query: lower-cased terms and the mode combining them.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub mode: BooleanMode,
    pub terms: Vec<String>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Parse query text into terms and a boolean mode.
///
/// The presence of `||` anywhere selects OR mode and splits the text at the
/// delimiter; otherwise the mode is AND over whitespace-delimited tokens.
/// Terms are lower-cased here so every later stage can compare them against
/// the lexicon directly. A single token degenerates to a one-term query in
/// either mode.
pub fn parse_query(text: &str) -> ParsedQuery {
    if text.contains("||") {
        let terms = text
            .split("||")
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        ParsedQuery {
            mode: BooleanMode::Or,
            terms,
        }
    } else {
        let terms = text
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();
        ParsedQuery {
            mode: BooleanMode::And,
            terms,
        }
    }
}
