//! Build context containing configuration and resolved paths for a run.

use crate::config::{LvConfig, SpriteEntry};
use crate::export::{HeaderOptions, SourceOptions};
use crate::output::source_path;
use std::path::{Path, PathBuf};

/// Build context containing configuration and paths for a conversion run.
///
/// All relative paths in the configuration are resolved against the project
/// root, the directory holding `lvsprite.toml`.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// The loaded configuration
    config: LvConfig,
    /// Project root directory (where lvsprite.toml is located)
    project_root: PathBuf,
    /// Whether to run in verbose mode
    verbose: bool,
}

impl BuildContext {
    /// Create a new build context.
    pub fn new(config: LvConfig, project_root: PathBuf) -> Self {
        Self { config, project_root, verbose: false }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LvConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Directory the sprite images are read from.
    pub fn src_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.project.src)
    }

    /// Directory generated files are written to.
    pub fn out_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.project.out)
    }

    /// Whether remaining sprites are attempted after a decode failure.
    pub fn keep_going(&self) -> bool {
        self.config.build.keep_going
    }

    /// Whether verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Resolve a path relative to the project root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        crate::config::loader::resolve_path(&self.project_root, path)
    }

    /// Image file for a sprite entry.
    pub fn sprite_source(&self, entry: &SpriteEntry) -> PathBuf {
        if entry.source.is_absolute() {
            entry.source.clone()
        } else {
            self.src_dir().join(&entry.source)
        }
    }

    /// Generated source file for a sprite identifier.
    pub fn source_output(&self, name: &str) -> PathBuf {
        source_path(&self.out_dir(), name, &self.config.output.extension)
    }

    /// Path of the declaration header.
    pub fn header_path(&self) -> PathBuf {
        self.out_dir().join(&self.config.header.file)
    }

    /// Options for rendering sprite sources.
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions::default().with_include(self.config.output.include.clone())
    }

    /// Options for rendering the declaration header.
    pub fn header_options(&self) -> HeaderOptions {
        HeaderOptions {
            guard: self.config.header_guard(),
            include: self.config.output.include.clone(),
            extern_c: self.config.header.extern_c,
        }
    }
}
