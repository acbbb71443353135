use super::*;
use crate::ast::{Call, Function, Params, Step, StepItem, TestSuite};
use pretty_assertions::assert_eq;

fn rows(rows: &[&[&str]]) -> RowSource {
    RowSource::from_rows(rows.iter().map(|r| r.iter().copied()))
}

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn items(steps: &crate::ast::Steps) -> Vec<StepItem> {
    steps.items.iter().map(|item| item.node.clone()).collect()
}

fn only_function(tree: &SyntaxTree) -> &Function {
    tree.functions().next().expect("a function")
}

fn only_suite(tree: &SyntaxTree) -> &TestSuite {
    tree.suites().next().expect("a suite")
}

#[test]
fn test_parse_function_with_parameters_and_steps() {
    let source = rows(&[
        &["function", "setup"],
        &["", "user", "guest"],
        &["", "role", "admin"],
        &["steps", "login as {user}", "dashboard shown"],
        &["", "open {role} panel", "panel open"],
    ]);
    let tree = parse(&source).unwrap();

    let function = only_function(&tree);
    assert_eq!(function.name, "setup");
    assert_eq!(function.parameters, params(&[("user", "guest"), ("role", "admin")]));
    assert_eq!(
        items(&function.steps),
        vec![
            StepItem::Step(Step {
                text: "login as {user}".into(),
                expected: "dashboard shown".into(),
            }),
            StepItem::Step(Step {
                text: "open {role} panel".into(),
                expected: "panel open".into(),
            }),
        ]
    );
}

#[test]
fn test_steps_block_mixes_steps_and_calls_in_order() {
    let source = rows(&[
        &["function", "outer"],
        &["steps", "first", "ok"],
        &["call", "inner"],
        &["", "x", "1"],
        &["steps", "second", "ok"],
        &["", "third", "ok"],
    ]);
    let tree = parse(&source).unwrap();

    let function = only_function(&tree);
    assert_eq!(
        items(&function.steps),
        vec![
            StepItem::Step(Step {
                text: "first".into(),
                expected: "ok".into(),
            }),
            StepItem::Call(Call {
                target: "inner".into(),
                parameters: params(&[("x", "1")]),
            }),
            StepItem::Step(Step {
                text: "second".into(),
                expected: "ok".into(),
            }),
            StepItem::Step(Step {
                text: "third".into(),
                expected: "ok".into(),
            }),
        ]
    );
}

#[test]
fn test_blank_rows_after_call_are_call_parameters() {
    let source = rows(&[
        &["test suite", "S"],
        &["test case", "c"],
        &["call", "f"],
        &["", "a", "1"],
        &["", "b", "2"],
    ]);
    let tree = parse(&source).unwrap();

    let case = &only_suite(&tree).test_cases[0].node;
    assert_eq!(case.steps.len(), 1);
    assert_eq!(
        items(&case.steps)[0],
        StepItem::Call(Call {
            target: "f".into(),
            parameters: params(&[("a", "1"), ("b", "2")]),
        })
    );
}

#[test]
fn test_test_case_steps_may_open_without_steps_row() {
    for opener in ["", "steps"] {
        let source = rows(&[
            &["test suite", "S"],
            &["test case", "c"],
            &[opener, "click", "clicked"],
        ]);
        let tree = parse(&source).unwrap();
        let case = &only_suite(&tree).test_cases[0].node;
        assert_eq!(
            items(&case.steps),
            vec![StepItem::Step(Step {
                text: "click".into(),
                expected: "clicked".into(),
            })]
        );
    }
}

#[test]
fn test_suite_extras_and_case_extras() {
    let source = rows(&[
        &["test suite", "Login", "Priority", "Owner"],
        &["test case", "basic", "high", "qa"],
        &["steps", "a", "b"],
        &["test case", "second", "low"],
        &["steps", "c", "d"],
    ]);
    let tree = parse(&source).unwrap();

    let suite = only_suite(&tree);
    assert_eq!(suite.name, "Login");
    assert_eq!(suite.extra_columns, vec!["Priority", "Owner"]);
    assert_eq!(suite.test_cases.len(), 2);
    assert_eq!(suite.test_cases[0].node.extra_values, vec!["high", "qa"]);
    assert_eq!(suite.test_cases[1].node.extra_values, vec!["low"]);
    assert_eq!(suite.test_cases[1].line, 4);
}

#[test]
fn test_declarations_keep_source_order() {
    let source = rows(&[
        &["test suite", "A"],
        &["test case", "a1"],
        &["function", "f"],
        &["steps", "x", "y"],
        &["test suite", "B"],
        &["test case", "b1"],
    ]);
    let tree = parse(&source).unwrap();

    let kinds: Vec<_> = tree
        .declarations
        .iter()
        .map(|d| (d.node.keyword(), d.node.name().to_string(), d.line))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("test suite", "A".to_string(), 1),
            ("function", "f".to_string(), 3),
            ("test suite", "B".to_string(), 5),
        ]
    );
}

#[test]
fn test_unknown_top_level_keyword_is_syntax_error() {
    let source = rows(&[&["function", "f"], &["steps", "a", "b"], &["banana", "x"]]);
    let err = parse(&source).unwrap_err();
    assert_eq!(
        err,
        ParseError::Syntax {
            keyword: "banana".into(),
            cells: vec!["banana".into(), "x".into()],
            line: 3,
            span: source.rows()[2].span.clone(),
        }
    );
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_stray_rows_at_top_level_are_syntax_errors() {
    for keyword in ["call", "test case"] {
        let source = rows(&[&["function", "f"], &["", "x", "1"], &[keyword, "x", "y"]]);
        let err = parse(&source).unwrap_err();
        assert!(
            matches!(err, ParseError::Syntax { line: 3, .. }),
            "keyword {:?} gave {:?}",
            keyword,
            err
        );
    }
}

#[test]
fn test_parameter_rows_after_suite_row_are_rejected() {
    let source = rows(&[&["test suite", "S"], &["", "x", "y"]]);
    assert!(matches!(parse(&source), Err(ParseError::Internal { line: 1, .. })));
}

#[test]
fn test_test_case_without_body() {
    let source = rows(&[&["test suite", "S"], &["test case", "c"]]);
    let tree = parse(&source).unwrap();

    assert!(only_suite(&tree).test_cases[0].node.steps.is_empty());
}

#[test]
fn test_top_level_declaration_without_body_is_internal_error() {
    let source = rows(&[&["function", "empty"], &["test suite", "S"], &["test case", "c"]]);
    match parse(&source) {
        Err(ParseError::Internal { cells, line, .. }) => {
            assert_eq!(cells, vec!["function".to_string(), "empty".to_string()]);
            assert_eq!(line, 1);
        }
        other => panic!("expected internal error, got {:?}", other),
    }

    let trailing = rows(&[&["test suite", "S"], &["test case", "c"], &["test suite", "T"]]);
    assert!(matches!(
        parse(&trailing),
        Err(ParseError::Internal { line: 3, .. })
    ));
}

#[test]
fn test_parameters_last_write_wins_by_default() {
    let source = rows(&[
        &["test suite", "S"],
        &["test case", "c"],
        &["call", "setup"],
        &["", "user", "alice"],
        &["", "user", "bob"],
    ]);
    let tree = parse(&source).unwrap();

    let case = &only_suite(&tree).test_cases[0].node;
    match &case.steps.items[0].node {
        StepItem::Call(call) => assert_eq!(call.parameters, params(&[("user", "bob")])),
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_parameters_first_wins_policy() {
    let source = rows(&[&["function", "f"], &["", "user", "alice"], &["", "user", "bob"]]);
    let options = ParseOptions {
        duplicate_keys: DuplicateKeyPolicy::FirstWins,
    };
    let tree = parse_with_options(&source, &options).unwrap();
    assert_eq!(only_function(&tree).parameters, params(&[("user", "alice")]));
}

#[test]
fn test_parameters_reject_policy() {
    let source = rows(&[&["function", "f"], &["", "user", "alice"], &["", "user", "bob"]]);
    let err = parse_with_options(&source, &ParseOptions::strict()).unwrap_err();
    assert!(matches!(
        err,
        ParseError::DuplicateParameter { ref name, line: 3, .. } if name == "user"
    ));
}

#[test]
fn test_short_rows_read_missing_cells_as_empty() {
    let source = rows(&[&["function", "f"], &["steps", "only text"], &[""]]);
    // the last row is blank and dropped; "only text" has no expected cell
    let tree = parse(&source).unwrap();
    assert_eq!(
        items(&only_function(&tree).steps),
        vec![StepItem::Step(Step {
            text: "only text".into(),
            expected: String::new(),
        })]
    );
}

#[test]
fn test_parsing_is_deterministic() {
    let source = rows(&[
        &["function", "f"],
        &["", "p", "v"],
        &["steps", "a {p}", "b"],
        &["test suite", "S", "Col"],
        &["test case", "c", "val"],
        &["call", "f"],
        &["", "p", "w"],
    ]);
    assert_eq!(parse(&source).unwrap(), parse(&source).unwrap());
}

#[test]
fn test_empty_source_parses_to_empty_tree() {
    let tree = parse(&RowSource::default()).unwrap();
    assert!(tree.is_empty());
}

#[test]
fn test_drive_guards_against_non_advancing_handler() {
    let source = rows(&[&["function", "f"], &["function", "g"]]);
    let mut cursor = Cursor::new(source.rows());

    let result = drive(&mut cursor, |cursor, _row| {
        cursor.back();
        Ok(Declaration::Function(Function::default()))
    });

    assert_eq!(
        result,
        Err(ParseError::Internal {
            cells: vec!["function".into(), "f".into()],
            line: 1,
            span: source.rows()[0].span.clone(),
        })
    );
}

#[test]
fn test_drive_guards_against_handler_that_never_advances() {
    let source = rows(&[&["function", "f"], &["function", "g"]]);
    let mut cursor = Cursor::new(source.rows());

    let result = drive(&mut cursor, |_cursor, _row| {
        Ok(Declaration::Function(Function::default()))
    });

    assert!(matches!(result, Err(ParseError::Internal { line: 1, .. })));
    assert_eq!(cursor.position(), 1);
}

#[test]
fn test_drive_accepts_handler_that_consumes_a_body_row() {
    let source = rows(&[&["function", "f"], &["", "x", "1"], &["function", "g"], &["", "y", "2"]]);
    let mut cursor = Cursor::new(source.rows());

    let tree = drive(&mut cursor, |cursor, row| {
        cursor.next();
        Ok(Declaration::Function(Function {
            name: row.cell(1).to_string(),
            ..Function::default()
        }))
    })
    .unwrap();

    assert_eq!(tree.len(), 2);
}
