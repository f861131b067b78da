//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod convert;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::loader::CliOverrides;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// lvsprite - Convert images into LVGL ARGB8565 C arrays
#[derive(Parser)]
#[command(name = "lvsprite")]
#[command(about = "lvsprite - Convert PNG sprites into LVGL true-color-alpha C arrays")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every sprite listed in lvsprite.toml and write the declaration header
    Build {
        /// Config file (default: lvsprite.toml found by walking up from the current directory)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Input directory (overrides project.src)
        #[arg(long)]
        src: Option<PathBuf>,

        /// Output directory (overrides project.out)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Header file name (overrides header.file)
        #[arg(long)]
        header: Option<String>,

        /// Header included by generated files (overrides output.include)
        #[arg(long)]
        include: Option<String>,

        /// Convert remaining sprites after a decode failure
        #[arg(long)]
        keep_going: bool,

        /// Show what would be generated without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Report progress as JSON lines
        #[arg(long, conflicts_with = "quiet")]
        json: bool,

        /// Suppress progress output
        #[arg(long, short = 'q')]
        quiet: bool,

        /// Show per-sprite start lines
        #[arg(long, short = 'v')]
        verbose: bool,
    },

    /// Convert a single image to an LVGL C source file
    Convert {
        /// Input image
        input: PathBuf,

        /// C identifier of the descriptor (default: derived from the file name)
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Output file or directory; `-` writes to stdout.
        /// If omitted: {input_dir}/{name}.c
        /// If directory (ends with /): dir/{name}.c
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Header included by the generated file
        #[arg(long, default_value = crate::export::DEFAULT_INCLUDE)]
        include: String,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            src,
            out,
            header,
            include,
            keep_going,
            dry_run,
            json,
            quiet,
            verbose,
        } => {
            let overrides = CliOverrides {
                src,
                out,
                header,
                include,
                keep_going: keep_going.then_some(true),
            };
            build::run_build(config.as_deref(), &overrides, dry_run, json, quiet, verbose)
        }
        Commands::Convert { input, name, output, include } => {
            convert::run_convert(&input, name.as_deref(), output.as_deref(), &include)
        }
    }
}
