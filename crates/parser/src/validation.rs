//! Semantic checks on a parsed tree.
//!
//! These are lint-level findings: a tree with warnings still compiles, and
//! the compiler reports the same error conditions itself when it reaches them.

use crate::ast::{Declaration, Function, Params, Spanned, StepItem, Steps, SyntaxTree, TestSuite};
use crate::template::Template;
use serde::Serialize;
use std::ops::Range;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SemanticError {
    pub message: String,
    pub span: Option<Range<usize>>,
    pub line: usize,
    pub severity: Severity,
    pub hint: Option<String>,
}

impl SemanticError {
    fn error(message: String, at: (&Range<usize>, usize)) -> Self {
        Self {
            message,
            span: Some(at.0.clone()),
            line: at.1,
            severity: Severity::Error,
            hint: None,
        }
    }

    fn warning(message: String, at: (&Range<usize>, usize)) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(message, at)
        }
    }

    fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

pub fn validate_tree(tree: &SyntaxTree) -> Vec<SemanticError> {
    let mut errors = Vec::new();

    for decl in &tree.declarations {
        // Rule 1: Declarations need a name
        if decl.node.name().is_empty() {
            errors.push(SemanticError::error(
                format!("{} without a name", decl.node.keyword()),
                (&decl.span, decl.line),
            ));
        }

        match &decl.node {
            Declaration::Function(function) => validate_function(function, decl, &mut errors),
            Declaration::TestSuite(suite) => validate_suite(suite, &mut errors),
        }
    }

    errors
}

fn validate_function(
    function: &Function,
    decl: &Spanned<Declaration>,
    errors: &mut Vec<SemanticError>,
) {
    // Rule 2: Parameter names
    if function.parameters.contains_key("") {
        errors.push(SemanticError::warning(
            format!("function '{}' declares a parameter with no name", function.name),
            (&decl.span, decl.line),
        ));
    }

    // Rules 3 & 5: Templates parse, placeholders are declared
    validate_steps(&function.steps, Some(&function.parameters), &function.name, errors);
}

fn validate_suite(suite: &TestSuite, errors: &mut Vec<SemanticError>) {
    for case in &suite.test_cases {
        if case.node.name.is_empty() {
            errors.push(SemanticError::error(
                format!("test case without a name in suite '{}'", suite.name),
                (&case.span, case.line),
            ));
        }

        // Rule 6: Empty test cases
        if case.node.steps.is_empty() {
            errors.push(SemanticError::warning(
                format!("test case '{}' has no steps", case.node.name),
                (&case.span, case.line),
            ));
        }

        // Rule 7: Extra values beyond the declared columns
        if case.node.extra_values.len() > suite.extra_columns.len() {
            errors.push(
                SemanticError::warning(
                    format!(
                        "test case '{}' has {} extra values but suite '{}' declares {} extra columns",
                        case.node.name,
                        case.node.extra_values.len(),
                        suite.name,
                        suite.extra_columns.len()
                    ),
                    (&case.span, case.line),
                )
                .with_hint("values past the last column are not exported"),
            );
        }

        // Rules 3 & 4: Templates parse, and need no bindings at test case level
        validate_steps(&case.node.steps, None, &case.node.name, errors);
    }
}

/// `declared` is `None` for a test case's own steps, which render without bindings.
fn validate_steps(
    steps: &Steps,
    declared: Option<&Params>,
    owner: &str,
    errors: &mut Vec<SemanticError>,
) {
    for item in &steps.items {
        let StepItem::Step(step) = &item.node else {
            continue;
        };
        let at = (&item.span, item.line);

        for template in [&step.text, &step.expected] {
            let parsed = match Template::parse(template) {
                Ok(parsed) => parsed,
                Err(e) => {
                    errors.push(
                        SemanticError::error(e.to_string(), at)
                            .with_hint("write '{{' and '}}' for literal braces"),
                    );
                    continue;
                }
            };

            for name in parsed.placeholders() {
                match declared {
                    None => errors.push(
                        SemanticError::error(
                            format!(
                                "placeholder '{{{}}}' in test case '{}' has no value to bind",
                                name, owner
                            ),
                            at,
                        )
                        .with_hint("placeholders are only bound inside functions"),
                    ),
                    Some(params) if !params.contains_key(name) => errors.push(
                        SemanticError::warning(
                            format!(
                                "placeholder '{{{}}}' is not a declared parameter of function '{}'",
                                name, owner
                            ),
                            at,
                        )
                        .with_hint("declare it with a parameter row before the steps"),
                    ),
                    Some(_) => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, RowSource};

    fn check(rows: &[&[&str]]) -> Vec<SemanticError> {
        let source = RowSource::from_rows(rows.iter().map(|r| r.iter().copied()));
        validate_tree(&parse(&source).unwrap())
    }

    #[test]
    fn test_clean_tree_has_no_findings() {
        let findings = check(&[
            &["function", "setup"],
            &["", "user", "guest"],
            &["steps", "login as {user}", "dashboard shown"],
            &["test suite", "Login", "Priority"],
            &["test case", "basic", "high"],
            &["call", "setup"],
            &["", "user", "alice"],
        ]);
        assert!(findings.is_empty(), "{:?}", findings);
    }

    #[test]
    fn test_undeclared_placeholder_in_function_warns() {
        let findings = check(&[&["function", "f"], &["steps", "go to {page}", "ok"]]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("{page}"));
        assert_eq!(findings[0].line, 2);
    }

    #[test]
    fn test_placeholder_in_test_case_is_error() {
        let findings = check(&[
            &["test suite", "S"],
            &["test case", "c"],
            &["steps", "type {text}", "typed"],
        ]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_error());
    }

    #[test]
    fn test_bad_template_is_error() {
        let findings = check(&[&["function", "f"], &["steps", "broken {", "ok"]]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_error());
        assert!(findings[0].hint.is_some());
    }

    #[test]
    fn test_empty_case_and_missing_names() {
        let findings = check(&[
            &["function", ""],
            &["steps", "a", "ok"],
            &["test suite", "S"],
            &["test case", ""],
        ]);
        let messages: Vec<_> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "function without a name",
                "test case without a name in suite 'S'",
                "test case '' has no steps",
            ]
        );
    }

    #[test]
    fn test_extra_values_beyond_columns_warn() {
        let findings = check(&[
            &["test suite", "S", "Priority"],
            &["test case", "c", "high", "surplus"],
            &["steps", "a", "b"],
        ]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }
}
