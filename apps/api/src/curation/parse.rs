//! Strict parsing of classifier free text into list and boolean answers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A yes/no classifier answer. Only the literal tokens `True` and `False` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected \"True\" or \"False\", got {0:?}")]
pub struct VerdictParseError(pub String);

impl Verdict {
    /// Trims whitespace and one matching pair of quotes; anything else must be exact.
    pub fn parse(text: &str) -> Result<Self, VerdictParseError> {
        let trimmed = text.trim();
        let unquoted = strip_matching_quotes(trimmed);
        match unquoted {
            "True" => Ok(Verdict::True),
            "False" => Ok(Verdict::False),
            _ => Err(VerdictParseError(text.to_string())),
        }
    }

    pub fn is_true(self) -> bool {
        self == Verdict::True
    }
}

fn strip_matching_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    s
}

/// Parses a literal list-of-strings answer such as `['Data Analyst', 'Data Engineer']`.
///
/// Brackets, quotes and newlines are removed, the rest is split on `", "` and every token
/// is trimmed. Empty tokens are dropped, so an empty answer yields an empty list.
pub fn parse_string_list(text: &str) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '\'' | '"' | '\n' | '\r'))
        .collect();

    cleaned
        .split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
