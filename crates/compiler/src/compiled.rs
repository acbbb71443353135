//! Compiled output: flat rows per test case.

use serde::{Deserialize, Serialize};

/// One rendered step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledRow {
    pub step: String,
    pub expected: String,
}

impl CompiledRow {
    pub fn new(step: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            expected: expected.into(),
        }
    }
}

/// A test case with all calls expanded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledTestCase {
    pub name: String,
    pub extra_values: Vec<String>,
    pub rows: Vec<CompiledRow>,
}

/// A compiled test suite. Owns all of its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledSuite {
    pub suite_name: String,
    pub extra_columns: Vec<String>,
    pub test_cases: Vec<CompiledTestCase>,
}

impl CompiledSuite {
    /// Total number of rendered steps across all test cases.
    pub fn row_count(&self) -> usize {
        self.test_cases.iter().map(|case| case.rows.len()).sum()
    }

    /// Look up a test case by name.
    pub fn test_case(&self, name: &str) -> Option<&CompiledTestCase> {
        self.test_cases.iter().find(|case| case.name == name)
    }
}

/// Every suite compiled from one syntax tree, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compilation {
    pub suites: Vec<CompiledSuite>,
}

impl Compilation {
    /// The most recently declared suite.
    ///
    /// Stepsheet tooling has traditionally exported only this one.
    pub fn current_suite(&self) -> Option<&CompiledSuite> {
        self.suites.last()
    }

    /// The first suite with the given name.
    pub fn suite_named(&self, name: &str) -> Option<&CompiledSuite> {
        self.suites.iter().find(|suite| suite.suite_name == name)
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    pub fn into_suites(self) -> Vec<CompiledSuite> {
        self.suites
    }
}
