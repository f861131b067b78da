//! Writing generated files and output path generation

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// The output directory could not be created
    #[error("cannot create directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing the file failed
    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OutputError {
    /// Path of the file or directory that failed.
    pub fn path(&self) -> &Path {
        match self {
            OutputError::CreateDir { path, .. } | OutputError::Write { path, .. } => path,
        }
    }
}

/// Write `contents` to `path` in one piece, replacing any previous file.
///
/// Missing parent directories are created first.
pub fn write_text(path: &Path, contents: &str) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|source| OutputError::CreateDir { path: parent.to_path_buf(), source })?;
        }
    }

    std::fs::write(path, contents)
        .map_err(|source| OutputError::Write { path: path.to_path_buf(), source })
}

/// Path of the generated source for a sprite: `{out_dir}/{name}.{extension}`.
pub fn source_path(out_dir: &Path, name: &str, extension: &str) -> PathBuf {
    out_dir.join(format!("{}.{}", name, extension))
}

/// Output path for a single converted image.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_dir}/{name}.c` |
/// | `-o dir/` or existing directory | `dir/{name}.c` |
/// | `-o file.c` | `file.c` |
pub fn convert_output_path(input: &Path, name: &str, output_arg: Option<&Path>) -> PathBuf {
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                source_path(output, name, "c")
            } else {
                output.to_path_buf()
            }
        }
        None => {
            let parent = input.parent().unwrap_or(Path::new(""));
            source_path(parent, name, "c")
        }
    }
}

/// Derive a C identifier from an image file name.
///
/// `assets/idle/pet-frame 1.png` becomes `pet_frame_1`; names starting with a
/// digit get a `img_` prefix.
pub fn identifier_from_path(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
    let mut ident: String =
        stem.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert_str(0, "img_");
    }
    ident
}
