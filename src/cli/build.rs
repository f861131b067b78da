//! Build command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::build::{
    BuildContext, BuildPipeline, ConsoleProgress, JsonProgress, NullProgress, ProgressReporter,
};
use crate::config::loader::{
    default_config, find_config, load_config, merge_cli_overrides, project_root, CliOverrides,
};

/// Run the build command
pub fn run_build(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    dry_run: bool,
    json: bool,
    quiet: bool,
    verbose: bool,
) -> ExitCode {
    let config_path = config_path.map(Path::to_path_buf).or_else(find_config);

    let (config, root) = match config_path {
        Some(path) => {
            if verbose {
                eprintln!("Using config: {}", path.display());
            }
            let cfg = match load_config(Some(&path)) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Error loading config: {}", e);
                    return ExitCode::from(EXIT_INVALID_ARGS);
                }
            };
            let root = project_root(&path)
                .map(Path::to_path_buf)
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
            (cfg, root)
        }
        None => {
            if verbose {
                eprintln!("No lvsprite.toml found, using defaults");
            }
            (default_config(), std::env::current_dir().unwrap_or_default())
        }
    };

    let mut config = config;
    if let Err(e) = merge_cli_overrides(&mut config, overrides) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let context = BuildContext::new(config, root).with_verbose(verbose);
    let pipeline = BuildPipeline::new(context);

    if dry_run {
        print_plan(&pipeline);
        return ExitCode::from(EXIT_SUCCESS);
    }

    let reporter: Box<dyn ProgressReporter> = if json {
        Box::new(JsonProgress::new())
    } else if quiet {
        Box::new(NullProgress::new())
    } else {
        Box::new(ConsoleProgress::new().with_verbose(verbose))
    };

    match pipeline.run(reporter.as_ref()) {
        Ok(result) if result.is_success() => ExitCode::from(EXIT_SUCCESS),
        Ok(result) => {
            if !json {
                eprintln!("{}", result.summary());
            }
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            if !json {
                eprintln!("Build error: {}", e);
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn print_plan(pipeline: &BuildPipeline) {
    let ctx = pipeline.context();
    let plan = pipeline.plan();

    println!("Dry run - would generate:");
    println!("  Source: {}", ctx.src_dir().display());
    println!("  Output: {}", ctx.out_dir().display());
    println!("  Sprites: {}", plan.len());
    for target in plan.targets() {
        let missing = if target.source.exists() { "" } else { " (missing)" };
        println!(
            "    - {}: {} -> {}{}",
            target.id,
            target.source.display(),
            target.output.display(),
            missing
        );
    }
    println!("  Header: {}", plan.header.display());
}
