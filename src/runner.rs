//! CLI execution and command dispatch logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! handles command execution. [`emit`] is the one emission pass: it writes the
//! preamble once, then every target's edges in manifest order, and closes the
//! writer. The output handle lives only for the duration of that pass.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::ast::{Backend, Manifest};
use crate::cli::{Cli, Commands};
use crate::ninja_gen::{NinjaWriter, Preamble, WriterError};
use crate::target::Target;
use crate::{ir, manifest, rules, variables};

/// Execute the parsed [`Cli`] commands.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or the Ninja file
/// cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let command = cli.command.clone().unwrap_or_default();
    match command {
        Commands::Generate { output } => generate(cli, &output),
        Commands::Check => check(cli),
    }
}

/// Resolve `path` against the `-C` directory, if one was given.
fn resolve(cli: &Cli, path: &Path) -> PathBuf {
    cli.directory
        .as_ref()
        .map_or_else(|| path.to_path_buf(), |dir| dir.join(path))
}

fn load(cli: &Cli) -> Result<(Manifest, Vec<Target>)> {
    let manifest_path = resolve(cli, &cli.file);
    let loaded = manifest::from_path(&manifest_path)
        .with_context(|| format!("loading manifest at {}", manifest_path.display()))?;
    let targets = manifest::targets(&loaded)
        .with_context(|| format!("resolving targets in {}", manifest_path.display()))?;
    Ok((loaded, targets))
}

fn generate(cli: &Cli, output: &Path) -> Result<()> {
    let (loaded, targets) = load(cli)?;
    if loaded.backend == Backend::Direct {
        info!("Ninja backend inactive; leaving the build to direct invocation");
        return Ok(());
    }
    if output == Path::new("-") {
        let writer = NinjaWriter::new(io::stdout().lock());
        emit(writer, &loaded, &targets).context("writing Ninja file to stdout")?;
        return Ok(());
    }
    let path = resolve(cli, output);
    let writer = NinjaWriter::create(&path)
        .with_context(|| format!("opening Ninja output {}", path.display()))?;
    emit(writer, &loaded, &targets)
        .with_context(|| format!("writing Ninja file {}", path.display()))?;
    info!("Generated Ninja file at {}", path.display());
    Ok(())
}

fn check(cli: &Cli) -> Result<()> {
    let (loaded, targets) = load(cli)?;
    let edges: usize = targets.iter().map(|target| ir::plan(target).len()).sum();
    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "{} targets, {edges} edges, backend {:?}",
        targets.len(),
        loaded.backend
    )
    .context("writing summary")?;
    Ok(())
}

/// Write the complete Ninja file for `manifest` and close the writer.
///
/// `targets` must be the classified targets of `manifest`, in order. The
/// returned handle has been flushed.
///
/// # Errors
///
/// Returns [`WriterError`] if any write fails. The output is then partial and
/// must be regenerated from scratch.
pub fn emit<W: Write>(
    writer: NinjaWriter<W, Preamble>,
    manifest: &Manifest,
    targets: &[Target],
) -> Result<W, WriterError> {
    let registry = rules::register_rules(&manifest.env);
    let vars = variables::emit_variables(&manifest.env);
    let mut edges_writer = writer.write_preamble(&registry, &vars)?;
    for target in targets {
        for edge in ir::plan(target) {
            edges_writer.write_edge(&edge)?;
        }
    }
    edges_writer.write_defaults(&manifest.defaults)?;
    debug!(
        targets = targets.len(),
        edges = edges_writer.edge_count(),
        "emitted build graph"
    );
    edges_writer.close()
}

/// Render the Ninja file for `loaded` into a string.
///
/// # Errors
///
/// Returns an error if a target is invalid.
pub fn render(loaded: &Manifest) -> Result<String> {
    let targets = manifest::targets(loaded).context("resolving targets")?;
    let bytes = emit(NinjaWriter::new(Vec::new()), loaded, &targets)
        .context("rendering Ninja file")?;
    String::from_utf8(bytes).context("Ninja output is not UTF-8")
}
