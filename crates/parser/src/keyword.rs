//! Row keywords.

use std::fmt;

/// The first cell of a row, classified.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Empty first cell: a parameter row or a continuation step.
    Blank,
    Function,
    Steps,
    Call,
    TestSuite,
    TestCase,
    /// Anything else.
    Unknown(String),
}

impl Keyword {
    /// Classify a keyword cell.
    pub fn classify(cell: &str) -> Self {
        match cell {
            "" => Keyword::Blank,
            "function" => Keyword::Function,
            "steps" => Keyword::Steps,
            "call" => Keyword::Call,
            "test suite" => Keyword::TestSuite,
            "test case" => Keyword::TestCase,
            other => Keyword::Unknown(other.to_string()),
        }
    }

    /// The cell text this keyword is written as.
    pub fn as_str(&self) -> &str {
        match self {
            Keyword::Blank => "",
            Keyword::Function => "function",
            Keyword::Steps => "steps",
            Keyword::Call => "call",
            Keyword::TestSuite => "test suite",
            Keyword::TestCase => "test case",
            Keyword::Unknown(text) => text,
        }
    }

    /// Whether the keyword may open or continue a steps block.
    pub fn continues_steps(&self) -> bool {
        matches!(self, Keyword::Blank | Keyword::Steps | Keyword::Call)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyword::Blank => write!(f, "<blank>"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_round_trips_known_keywords() {
        for cell in ["", "function", "steps", "call", "test suite", "test case"] {
            assert_eq!(Keyword::classify(cell).as_str(), cell);
        }
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(Keyword::classify("Function"), Keyword::Unknown("Function".into()));
        assert_eq!(Keyword::classify(" steps"), Keyword::Unknown(" steps".into()));
    }
}
