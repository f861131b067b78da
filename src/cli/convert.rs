//! Convert command implementation

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::is_c_identifier;
use crate::export::{render_source, SourceOptions};
use crate::output::{convert_output_path, identifier_from_path, write_text};
use crate::transcode::transcode_file;

/// Run the convert command
pub fn run_convert(
    input: &Path,
    name: Option<&str>,
    output: Option<&Path>,
    include: &str,
) -> ExitCode {
    let name = match name {
        Some(name) => name.to_string(),
        None => identifier_from_path(input),
    };
    if !is_c_identifier(&name) {
        eprintln!("Error: '{}' is not a valid C identifier", name);
        eprintln!("Pass a different name with --name");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let sprite = match transcode_file(input, &name) {
        Ok(sprite) => sprite,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let source = render_source(&sprite, &SourceOptions::default().with_include(include));

    if output == Some(Path::new("-")) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(source.as_bytes()) {
            eprintln!("Error writing to stdout: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    let path = convert_output_path(input, &name, output);
    match write_text(&path, &source) {
        Ok(()) => {
            println!(
                "Generated {} ({}x{}, {} bytes)",
                path.display(),
                sprite.width(),
                sprite.height(),
                sprite.descriptor.data_size
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
