//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and its subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::manifest::DEFAULT_MANIFEST;

/// Default path of the generated Ninja file.
pub const DEFAULT_OUTPUT: &str = "build.ninja";

/// Generate Ninja build files for C and C++ objects, libraries and programs.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the ninjacc manifest file to use.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_MANIFEST)]
    pub file: PathBuf,

    /// Change to this directory before doing anything.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Enable verbose logging output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Optional subcommand to execute; defaults to `generate` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse command-line arguments, providing `generate` as the default command.
    #[must_use]
    pub fn parse_with_default() -> Self {
        Self::parse().with_default_command()
    }

    /// Parse the provided arguments, applying the default command when needed.
    ///
    /// # Errors
    ///
    /// Returns the [`clap::Error`] raised for invalid arguments.
    pub fn try_parse_from_with_default<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map(Self::with_default_command)
    }

    /// Apply the default command if none was specified.
    #[must_use]
    pub fn with_default_command(mut self) -> Self {
        if self.command.is_none() {
            self.command = Some(Commands::default());
        }
        self
    }
}

/// Available top-level commands.
#[derive(Debug, Subcommand, PartialEq, Eq, Clone)]
pub enum Commands {
    /// Write the Ninja build file.
    Generate {
        /// Output path for the generated Ninja file; `-` writes to stdout.
        #[arg(value_name = "FILE", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
    },

    /// Validate the manifest and summarise the edges it would produce.
    Check,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Generate {
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}
