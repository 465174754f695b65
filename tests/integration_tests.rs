use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

use toylang::lexer::{tokenize, TokenKind};
use toylang::parser::{NodeKind, ParseOutcome, Parser};

fn program_path(name: &str) -> String {
    format!("{}/tests/programs/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Helper function to read and parse one of the fixture programs
fn parse_program(name: &str) -> Result<ParseOutcome, String> {
    let path = program_path(name);
    let source = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read source file: {e}"))?;

    let tokens = tokenize(&source);
    if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
        return Err("token stream does not end with EOF".to_string());
    }

    Ok(Parser::new(tokens).parse_program())
}

fn toylang() -> Command {
    Command::cargo_bin("toylang").unwrap()
}

#[test]
fn test_example_program() {
    let outcome = parse_program("example.toy").expect("Failed to parse example.toy");
    assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
    assert_eq!(outcome.statements.len(), 7);

    let NodeKind::If { then_body, else_body, .. } = &outcome.statements[4].kind else {
        panic!("expected if statement, got {:?}", outcome.statements[4].kind);
    };
    assert_eq!(then_body.len(), 2);
    assert_eq!(else_body.len(), 1);

    assert!(matches!(
        &outcome.statements[6].kind,
        NodeKind::Assignment { name, .. } if name == "result"
    ));
}

#[test]
fn test_error_program_recovers() {
    let outcome = parse_program("errors.toy").expect("Failed to parse errors.toy");
    assert_eq!(outcome.errors.len(), 2, "errors: {:?}", outcome.errors);
    assert_eq!(outcome.statements.len(), 2);
}

#[test]
fn test_lexical_program_recovers() {
    let outcome = parse_program("lexical.toy").expect("Failed to parse lexical.toy");
    assert_eq!(outcome.errors.len(), 2, "errors: {:?}", outcome.errors);
    assert!(outcome.statements.is_empty());
}

#[test]
fn test_cli_lex() {
    toylang()
        .arg("lex")
        .arg(program_path("example.toy"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Keyword(Int)"))
        .stdout(predicate::str::contains("Real \"3.14e-2\""))
        .stdout(predicate::str::contains("(0 invalid)"));
}

#[test]
fn test_cli_lex_reports_invalid_tokens() {
    toylang()
        .arg("lex")
        .arg(program_path("lexical.toy"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 invalid)"))
        .stderr(predicate::str::contains("Unexpected character '@' at 2:7"))
        .stderr(predicate::str::contains("Unterminated string literal at 3:8"));
}

#[test]
fn test_cli_parse_source_format() {
    toylang()
        .args(["parse", "--format", "source"])
        .arg(program_path("example.toy"))
        .assert()
        .success()
        .stdout(predicate::str::contains("int x = 42;"))
        .stdout(predicate::str::contains("result = ((x + 1) ^ 2);"));
}

#[test]
fn test_cli_parse_debug_format() {
    toylang()
        .arg("parse")
        .arg(program_path("example.toy"))
        .assert()
        .success()
        .stdout(predicate::str::contains("VarDeclaration"))
        .stdout(predicate::str::contains("7 statement(s)"));
}

#[test]
fn test_cli_parse_errors_fail() {
    let path = program_path("errors.toy");
    toylang()
        .args(["parse", "--format", "source"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("c = (a + 2);"))
        .stderr(predicate::str::contains("2:5: error: Expected expression but found ';'"))
        .stderr(predicate::str::contains("2 syntax error(s)"));
}

#[test]
fn test_cli_strict_parse_stops() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "y = 1;\nx = (1 + ;\nz = 2;").expect("Failed to write temp file");

    toylang()
        .args(["parse", "--strict"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"))
        .stderr(predicate::str::contains("at 2:10"));
}

#[test]
fn test_cli_reads_stdin() {
    toylang()
        .args(["parse", "--format", "source", "-"])
        .write_stdin("x := 10 + 3.14e-2 * (y ^ 2)")
        .assert()
        .success()
        .stdout("x = (10 + (0.0314 * (y ^ 2)));\n");
}

#[test]
fn test_cli_missing_file() {
    toylang()
        .args(["lex", "does/not/exist.toy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read file"));
}
