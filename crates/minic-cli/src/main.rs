// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Minic command-line driver.
//!
//! This is the main entry point for the `minic` command. The driver is a
//! thin collaborator around `minic-core`: it reads a source file from
//! disk, runs the front end, and either confirms the program or renders
//! the error. The core itself performs no I/O.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::debug;

mod render;

/// Minic: a minimal imperative language front end
#[derive(Debug, Parser)]
#[command(name = "minic")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a source file for lexical, syntax, and type errors
    Check {
        /// Source file to check
        path: Utf8PathBuf,
    },

    /// Check a source file and print its typed syntax tree
    Ast {
        /// Source file to print
        path: Utf8PathBuf,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .build(),
        )
    }))?;

    init_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Check { path } => check(&path),
        Command::Ast { path } => ast(&path),
    }
}

/// Initialize logging from the `RUST_LOG` environment.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
}

fn check(path: &Utf8PathBuf) -> Result<()> {
    let _program = compile_file(path)?;
    debug!(%path, "front end finished");
    println!("{path}: ok");
    Ok(())
}

fn ast(path: &Utf8PathBuf) -> Result<()> {
    let program = compile_file(path)?;
    print!("{}", render::render_tree(&program));
    Ok(())
}

/// Reads a source file and runs the full front end over it.
fn compile_file(path: &Utf8PathBuf) -> Result<minic_core::Node> {
    let source = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {path}"))?;
    debug!(%path, bytes = source.len(), "read source file");

    minic_core::compile(&source)
        .into_diagnostic()
        .wrap_err_with(|| format!("{path} did not compile"))
}
