//! Unit tests for CLI argument parsing and validation.
//!
//! This module exercises the command-line interface defined in [`ninjacc::cli`]
//! using `rstest` for parameterised coverage of success and error scenarios.
use clap::error::ErrorKind;
use ninjacc::cli::{Cli, Commands};
use rstest::rstest;
use std::path::PathBuf;

#[rstest]
#[case(vec!["ninjacc"], PathBuf::from("ninjacc.yml"), None, false, Commands::Generate { output: PathBuf::from("build.ninja") })]
#[case(
    vec!["ninjacc", "--file", "alt.yml", "-C", "work", "generate", "out.ninja"],
    PathBuf::from("alt.yml"),
    Some(PathBuf::from("work")),
    false,
    Commands::Generate { output: PathBuf::from("out.ninja") },
)]
#[case(vec!["ninjacc", "--verbose", "generate", "-"], PathBuf::from("ninjacc.yml"), None, true, Commands::Generate { output: PathBuf::from("-") })]
#[case(vec!["ninjacc", "-v", "check"], PathBuf::from("ninjacc.yml"), None, true, Commands::Check)]
fn parse_cli(
    #[case] argv: Vec<&str>,
    #[case] file: PathBuf,
    #[case] directory: Option<PathBuf>,
    #[case] verbose: bool,
    #[case] expected_cmd: Commands,
) {
    let cli = Cli::try_parse_from_with_default(argv).expect("parse");
    assert_eq!(cli.file, file);
    assert_eq!(cli.directory, directory);
    assert_eq!(cli.verbose, verbose);
    assert_eq!(cli.command, Some(expected_cmd));
}

#[rstest]
#[case(vec!["ninjacc", "unknowncmd"], ErrorKind::InvalidSubcommand)]
#[case(vec!["ninjacc", "--file"], ErrorKind::InvalidValue)]
#[case(vec!["ninjacc", "check", "extra"], ErrorKind::UnknownArgument)]
fn parse_cli_errors(#[case] argv: Vec<&str>, #[case] expected_error: ErrorKind) {
    let err = Cli::try_parse_from_with_default(argv).expect_err("invalid arguments");
    assert_eq!(err.kind(), expected_error);
}
