use lending_core::{ErrorCode, LendingLibrary};
use lending_shell::{render, run_line, Outcome};
use serde_json::{json, Value};

/// True when every error in the outcome has the given code.
fn failed_with(outcome: &Outcome, code: ErrorCode) -> bool {
    matches!(outcome, Outcome::Failed(errors) if !errors.is_empty() && errors.iter().all(|e| e.code == code))
}

fn add_go(library: &mut LendingLibrary, isbn: &str) {
    let line = format!(r#"addBook isbn={isbn} title="Go Programming" authors=[A] pages=100 year=2020 publisher=X"#);
    let outcome = run_line(library, &line);
    assert!(matches!(outcome, Outcome::Value(_)), "{outcome:?}");
}

#[test]
fn isbn_of_digits_is_a_number_and_rejected() {
    // unquoted digits become numbers, so an all-digit isbn must be quoted
    let mut library = LendingLibrary::new();
    let outcome = run_line(&mut library, "addBook isbn=12 title=Go authors=[A] pages=1 year=1 publisher=X");
    assert!(failed_with(&outcome, ErrorCode::BadType));
    assert!(library.is_empty());
}

#[test]
fn scenario_through_the_shell() {
    let mut library = LendingLibrary::new();
    let outcome = run_line(
        &mut library,
        r#"addBook isbn='1' title="Go Programming" authors=[A] pages=100 year=2020 publisher=X"#,
    );
    match outcome {
        Outcome::Value(book) => assert_eq!(book["nCopies"], json!(1)),
        other => panic!("unexpected {other:?}"),
    }

    match run_line(&mut library, "findBooks search=go") {
        Outcome::Value(Value::Array(books)) => assert_eq!(books.len(), 1),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(run_line(&mut library, "checkoutBook patronId=p1 isbn='1'"), Outcome::Value(Value::Null));
    assert!(failed_with(&run_line(&mut library, "checkoutBook patronId=p2 isbn='1'"), ErrorCode::BadReq));
    assert_eq!(run_line(&mut library, "returnBook patronId=p1 isbn='1'"), Outcome::Value(Value::Null));
    assert_eq!(run_line(&mut library, "checkoutBook patronId=p2 isbn='1'"), Outcome::Value(Value::Null));
}

#[test]
fn unknown_command_and_blank_line() {
    let mut library = LendingLibrary::new();
    assert_eq!(run_line(&mut library, "   "), Outcome::Empty);
    match run_line(&mut library, "deleteBook isbn=1") {
        Outcome::Failed(errors) => assert_eq!(errors[0].message, "bad command deleteBook"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_arguments_report_one_error() {
    let mut library = LendingLibrary::new();
    match run_line(&mut library, "addBook") {
        Outcome::Failed(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].code, ErrorCode::Missing);
            assert_eq!(errors[0].widget.as_deref(), Some("title"));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn renders_values_and_errors_to_separate_streams() {
    let mut library = LendingLibrary::new();
    add_go(&mut library, "'1'");
    let (mut out, mut err) = (Vec::new(), Vec::new());

    render(&run_line(&mut library, "findBooks search=programming"), &mut out, &mut err).unwrap();
    let printed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(printed[0]["title"], json!("Go Programming"));
    assert!(err.is_empty());

    out.clear();
    render(&run_line(&mut library, "returnBook patronId=p1 isbn='1'"), &mut out, &mut err).unwrap();
    assert!(out.is_empty());
    let text = String::from_utf8(err).unwrap();
    assert!(text.starts_with("BAD_REQ: "), "{text}");
    assert!(text.trim_end().ends_with("; widget=isbn"), "{text}");
}

#[test]
fn help_lists_commands() {
    let mut library = LendingLibrary::new();
    match run_line(&mut library, "help") {
        Outcome::Help(text) => assert!(text.contains("addBook PARAM=VALUE...")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn repeated_add_through_the_shell_accumulates() {
    let mut library = LendingLibrary::new();
    add_go(&mut library, "isbn-1");
    add_go(&mut library, "isbn-1");
    assert_eq!(library.book("isbn-1").unwrap().n_copies, 2);
    let outcome = run_line(
        &mut library,
        "addBook isbn=isbn-1 title='Go Programming' authors=[A] pages=101 year=2020 publisher=X",
    );
    assert!(failed_with(&outcome, ErrorCode::BadReq));
}
