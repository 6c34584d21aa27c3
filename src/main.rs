//! # Rust-Rec - A lexical scanner for the Rec teaching language
//!
//! Rec is a small imperative language with records, built-in I/O functions and
//! `$` line comments. This crate implements its first phase: turning source text
//! into a stream of classified tokens that a parser can pull from one at a time.
//!
//! ## Design
//!
//! - The [scanner](rec::token::lexer::Scanner) is pull-based. Each call hands out
//!   exactly one token; after the end of input it keeps handing out the
//!   end-of-stream token.
//! - Lexing never stops at an error. Unknown characters and unterminated strings
//!   are reported through a [sink](rec::token::diagnostics::DiagnosticSink) and
//!   skipped, so the rest of the file still produces tokens.
//! - Ambiguities (`.5` versus `p.x`) are resolved with one character of
//!   lookahead, never by backtracking.
//!
//! ## Command line
//!
//! `rust-rec [-lexer] <source_file>` prints one `token: KIND value: LEXEME` line
//! per token. Diagnostics and logs go to standard error. `RUST_LOG` or
//! `--verbose` control the log output.
//!
//! Aside from the functionality itself, the following are taken as a guideline:
//!
//! - Most optional lints, and also a lot from clippy, are denied.
//!   Circumventing these via `#[expect(...)]` should be taken as a last precaution,
//!   where the alternative would complicate or make the code less readable.
//! - Comprehensive documentation.
//! - Tests next to the code they cover.
#![deny(
    future_incompatible,
    keyword_idents,
    let_underscore,
    nonstandard_style,
    refining_impl_trait,
)]
#![deny(
    rust_2018_compatibility,
    rust_2021_compatibility,
    rust_2024_compatibility,
)]
#![deny(
    clippy::all,
    clippy::pedantic,
)]
#![deny(
    clippy::absolute_paths,
    clippy::alloc_instead_of_core,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::arithmetic_side_effects,
    clippy::as_conversions,
    clippy::as_underscore,
    clippy::assertions_on_result_states,
    clippy::big_endian_bytes,
    clippy::cfg_not_test,
    clippy::clone_on_ref_ptr,
    clippy::create_dir,
    clippy::dbg_macro,
    clippy::decimal_literal_representation,
    clippy::default_numeric_fallback,
    clippy::default_union_representation,
    clippy::deref_by_slicing,
    clippy::disallowed_script_idents,
    clippy::else_if_without_else,
    clippy::empty_drop,
    clippy::empty_enum_variants_with_brackets,
    clippy::empty_structs_with_brackets,
    clippy::error_impl_error,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::exit,
    clippy::field_scoped_visibility_modifiers,
    clippy::filetype_is_file,
    clippy::float_arithmetic,
    clippy::float_cmp_const,
    clippy::fn_to_numeric_cast_any,
    clippy::get_unwrap,
    clippy::host_endian_bytes,
    clippy::if_then_some_else_none,
    clippy::impl_trait_in_params,
    clippy::indexing_slicing,
    clippy::infinite_loop,
    clippy::inline_asm_x86_att_syntax,
    clippy::inline_asm_x86_intel_syntax,
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    clippy::iter_over_hash_type,
    clippy::large_include_file,
    clippy::let_underscore_must_use,
    clippy::let_underscore_untyped,
    clippy::little_endian_bytes,
    clippy::lossy_float_literal,
    clippy::map_err_ignore,
    clippy::mem_forget,
    clippy::min_ident_chars,
    clippy::missing_assert_message,
    clippy::missing_asserts_for_indexing,
    clippy::missing_docs_in_private_items,
    clippy::missing_inline_in_public_items,
    clippy::missing_trait_methods,
    clippy::mixed_read_write_in_expression,
    clippy::module_name_repetitions,
    clippy::modulo_arithmetic,
    clippy::multiple_inherent_impl,
    clippy::multiple_unsafe_ops_per_block,
    clippy::mutex_atomic,
    clippy::mutex_integer,
    clippy::needless_raw_strings,
    clippy::non_ascii_literal,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::partial_pub_fields,
    clippy::pathbuf_init_then_push,
    clippy::pattern_type_mismatch,
    clippy::pub_with_shorthand,
    clippy::pub_without_shorthand,
    clippy::rc_buffer,
    clippy::rc_mutex,
    clippy::redundant_type_annotations,
    clippy::renamed_function_params,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_name_method,
    clippy::self_named_module_files,
    clippy::semicolon_inside_block,
    clippy::semicolon_outside_block,
    clippy::separated_literal_suffix,
    clippy::single_char_lifetime_names,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::str_to_string,
    clippy::string_add,
    clippy::string_lit_chars_any,
    clippy::string_slice,
    clippy::string_to_string,
    clippy::suspicious_xor_used_as_pow,
    clippy::tests_outside_test_module,
    clippy::todo,
    clippy::try_err,
    clippy::undocumented_unsafe_blocks,
    clippy::unimplemented,
    clippy::unnecessary_safety_comment,
    clippy::unnecessary_safety_doc,
    clippy::unnecessary_self_imports,
    clippy::unneeded_field_pattern,
    clippy::unreachable,
    clippy::unused_result_ok,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::verbose_file_reads,
    clippy::wildcard_enum_match_arm
)]
#![warn(unused)]
#![allow(
    edition_2024_expr_fragment_specifier,
    reason = "the macros expect the 2024 edition behaviour."
)]
pub mod rec;

use clap::error::ErrorKind;
use clap::{ArgGroup, Parser};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use rec::errors::EngineError;
use rec::listing::ListingDisplay;
use rec::token::diagnostics::StderrSink;
use rec::token::lexer::{Scanner, ScannerConfig};

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::process::{ExitCode, Termination};

/// Path standing for standard input.
const STDIN_PATH: &str = "-";

/// Prints every token the scanner produces, one listing line each.
fn print_tokens<I: Iterator<Item = char>>(
    mut scanner: Scanner<I, StderrSink>,
) -> Result<(), EngineError> {
    for token in scanner.by_ref() {
        println!("{}", token.listing_line());
    }
    match scanner.sink().reported() {
        0 => Ok(()),
        count => Err(EngineError::LexingErrors(count)),
    }
}

/// Load a file and print its tokens.
///
/// The file is read in full before lexing starts, so an unreadable file
/// fails before any token is printed.
fn run_file(source_file: &str, config: ScannerConfig) -> Result<(), EngineError> {
    if source_file == STDIN_PATH {
        debug!("lexing standard input");
        let stdin = io::stdin().lock();
        return print_tokens(Scanner::from_reader(stdin, StderrSink::stderr()).with_config(config));
    }

    let source = fs::read_to_string(source_file)?;
    debug!(source_file, bytes = source.len(), "loaded source file");
    print_tokens(Scanner::new(source.chars(), StderrSink::stderr()).with_config(config))
}

/// Sets up logging to standard error.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown,
/// or everything down to debug level when `verbose` is set.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {err}");
    }
}

/// Isomorphic to `Result<T, EngineError>`,
/// this allows for overriding the [Termination]
/// trait impl and report custom exit codes instead.
///
/// As this is only supposed to be used on the very
/// outer shell, T defaults to `()`.
#[derive(Debug)]
enum EngineResult<T = ()> {
    /// Ok variant.
    Ok(T),
    /// Error variant
    Err(EngineError),
}

impl Termination for EngineResult {
    fn report(self) -> ExitCode {
        if let EngineResult::Err(err) = self {
            eprintln!("{err}");
            err.into()
        } else {
            ExitCode::SUCCESS
        }
    }
}

impl<T, E> From<Result<T, E>> for EngineResult<T>
where
    EngineError: From<E>,
{
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => EngineResult::Ok(value),
            Err(err) => EngineResult::Err(err.into()),
        }
    }
}

/// rust-rec tokenizes a Rec source file and prints one line per token.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["source_file", "lexer"])))]
struct RecArgs {
    /// Source file to tokenize, `-` for standard input.
    source_file: Option<String>,

    /// Source file to tokenize; also accepted as `-lexer`.
    #[arg(long, value_name = "SOURCE_FILE")]
    lexer: Option<String>,

    /// Log what the scanner is doing.
    #[arg(short, long)]
    verbose: bool,

    /// Lex built-in function names as keywords instead of identifiers.
    #[arg(long)]
    builtins_as_keywords: bool,
}

/// Rewrites the single-dash `-lexer` flag into the `--lexer` form clap knows.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| if arg == "-lexer" { OsString::from("--lexer") } else { arg })
        .collect()
}

fn main() -> EngineResult {
    let args = match RecArgs::try_parse_from(normalize_args(env::args_os())) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return err.print().into();
        }
        Err(_) => {
            return EngineResult::Err(EngineError::UsageError(env!("CARGO_BIN_NAME").to_owned()));
        }
    };

    let RecArgs {
        source_file,
        lexer,
        verbose,
        builtins_as_keywords,
    } = args;
    init_logging(verbose);

    let config = ScannerConfig::default().builtins_as_keywords(builtins_as_keywords);
    match source_file.or(lexer) {
        Some(source_file) => run_file(&source_file, config).into(),
        None => unreachable!("clap verifies this cannot happen."),
    }
}

#[cfg(test)]
mod test {
    use std::ffi::OsString;

    use clap::Parser;

    use super::{RecArgs, normalize_args};

    fn parse(args: &[&str]) -> Result<RecArgs, clap::Error> {
        RecArgs::try_parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn single_dash_lexer_flag() {
        let args = parse(&["rust-rec", "-lexer", "prog.rec"]).expect("valid arguments");
        assert_eq!(args.lexer.as_deref(), Some("prog.rec"));
        assert_eq!(args.source_file, None);
    }

    #[test]
    fn exactly_one_source() {
        assert!(parse(&["rust-rec"]).is_err());
        assert!(parse(&["rust-rec", "a.rec", "b.rec"]).is_err());
        assert!(parse(&["rust-rec", "a.rec", "--lexer", "b.rec"]).is_err());
        assert!(parse(&["rust-rec", "-v", "a.rec"]).is_ok());
    }
}
