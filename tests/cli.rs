//! Command line tests
//!
//! These run the built `rust-rec` binary on temporary source files and
//! check the token listing, the diagnostics and the exit codes.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary, with logging left at its default.
fn rust_rec() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rust-rec"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Writes `source` into a fresh temporary directory.
fn source_file(source: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("program.rec");
    fs::write(&path, source).expect("Failed to write source file");
    (dir, path)
}

const PROGRAM: &str = "\
$ a point in the plane
Point rec { x int; y float; }
final Point origin = Point(0, .5);
writeln(origin.x);
";

const LISTING: &str = "\
token: REC value: Point
token: KEYWORD value: rec
token: SYMBOL value: {
token: IDENTIFIER value: x
token: TYPE value: int
token: SYMBOL value: ;
token: IDENTIFIER value: y
token: TYPE value: float
token: SYMBOL value: ;
token: SYMBOL value: }
token: KEYWORD value: final
token: REC value: Point
token: IDENTIFIER value: origin
token: SYMBOL value: =
token: REC value: Point
token: SYMBOL value: (
token: INTEGER value: 0
token: SYMBOL value: ,
token: FLOAT value: 0.5
token: SYMBOL value: )
token: SYMBOL value: ;
token: IDENTIFIER value: writeln
token: SYMBOL value: (
token: IDENTIFIER value: origin
token: FIELD_OPERATOR value: .
token: IDENTIFIER value: x
token: SYMBOL value: )
token: SYMBOL value: ;
";

#[test]
fn prints_token_listing() {
    let (_dir, path) = source_file(PROGRAM);
    rust_rec()
        .arg(&path)
        .assert()
        .success()
        .stdout(LISTING)
        .stderr("");
}

#[test]
fn accepts_single_dash_lexer_flag() {
    let (_dir, path) = source_file(PROGRAM);
    rust_rec()
        .arg("-lexer")
        .arg(&path)
        .assert()
        .success()
        .stdout(LISTING);
}

#[test]
fn reads_standard_input() {
    rust_rec()
        .arg("-")
        .write_stdin("x = 3.;\n")
        .assert()
        .success()
        .stdout(
            "token: IDENTIFIER value: x\n\
             token: SYMBOL value: =\n\
             token: FLOAT value: 3.0\n\
             token: SYMBOL value: ;\n",
        );
}

#[test]
fn diagnostics_go_to_stderr_and_scanning_continues() {
    let (_dir, path) = source_file("a@b\n  \"open");
    rust_rec()
        .arg(&path)
        .assert()
        .code(65)
        .stdout(
            "token: IDENTIFIER value: a\n\
             token: IDENTIFIER value: b\n\
             token: STRING value: open\n",
        )
        .stderr(
            predicate::str::contains("Error for Lexer at line 1, column 2, unexpected char: @")
                .and(predicate::str::contains(
                    "Error for Lexer at line 2, column 3, unexpected char: \"",
                )),
        );
}

#[test]
fn builtins_as_keywords_flag() {
    let (_dir, path) = source_file("readInt()");
    rust_rec()
        .arg("--builtins-as-keywords")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("token: KEYWORD value: readInt\n"));
}

#[test]
fn usage_without_arguments() {
    rust_rec()
        .assert()
        .code(64)
        .stdout("")
        .stderr("Usage: rust-rec [-lexer] <source_file>\n");
}

#[test]
fn usage_with_two_sources() {
    let (_dir, path) = source_file(PROGRAM);
    rust_rec()
        .arg(&path)
        .arg(&path)
        .assert()
        .code(64)
        .stdout("")
        .stderr(predicate::str::starts_with("Usage: rust-rec"));
}

#[test]
fn missing_file_fails_before_scanning() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    rust_rec()
        .arg(dir.path().join("missing.rec"))
        .assert()
        .code(66)
        .stdout("")
        .stderr(predicate::str::contains("Error reading source file"));
}

#[test]
fn help_succeeds() {
    rust_rec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
