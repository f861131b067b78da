//! Configuration schema types for `lvsprite.toml`
//!
//! Defines the structure and validation rules for a sprite conversion project.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use crate::export::guard_from_file_name;
use crate::output::identifier_from_path;

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Directory containing the source images
    #[serde(default = "default_src")]
    pub src: PathBuf,
    /// Directory receiving the generated `.c` and `.h` files
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

fn default_src() -> PathBuf {
    PathBuf::from("assets")
}

fn default_out() -> PathBuf {
    PathBuf::from("generated")
}

/// Generated source file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File extension for generated sprite sources
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Header included by every generated file
    #[serde(default = "default_include")]
    pub include: String,
}

fn default_extension() -> String {
    "c".to_string()
}

fn default_include() -> String {
    crate::export::DEFAULT_INCLUDE.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { extension: default_extension(), include: default_include() }
    }
}

/// Declaration header settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Header file name, written to the output directory
    #[serde(default = "default_header_file")]
    pub file: String,
    /// Include guard; derived from `file` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
    /// Wrap declarations in `extern "C"`
    #[serde(default = "default_true")]
    pub extern_c: bool,
}

fn default_header_file() -> String {
    "sprites.h".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self { file: default_header_file(), guard: None, extern_c: true }
    }
}

/// Batch behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Continue with the remaining sprites after a decode failure
    #[serde(default)]
    pub keep_going: bool,
}

/// One image to convert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteEntry {
    /// Image path, relative to `project.src`
    pub source: PathBuf,
    /// C identifier of the generated descriptor; derived from `source` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SpriteEntry {
    pub fn new(source: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { source: source.into(), name: Some(name.into()) }
    }

    /// The identifier this sprite is generated under.
    pub fn identifier(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => identifier_from_path(&self.source),
        }
    }
}

/// Animation frame table emitted into the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Group name, upper-cased for the generated array and macro
    pub name: String,
    /// Sprite identifiers in playback order
    pub frames: Vec<String>,
}

/// Complete lvsprite.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LvConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub header: HeaderConfig,
    #[serde(default)]
    pub build: BuildConfig,
    /// Images to convert, in output order
    #[serde(default)]
    pub sprites: Vec<SpriteEntry>,
    /// Animation groups
    #[serde(default)]
    pub animations: Vec<AnimationConfig>,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "sprites[2].name")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lvsprite.toml: '{}' {}", self.field, self.message)
    }
}

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
];

/// Check whether `name` can be used as a C identifier.
pub fn is_c_identifier(name: &str) -> bool {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    let re = IDENT.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
    re.is_match(name) && !C_KEYWORDS.contains(&name)
}

impl LvConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: String, message: &str| {
            errors.push(ConfigValidationError { field, message: message.to_string() });
        };

        if self.project.name.is_empty() {
            push("project.name".to_string(), "must be a non-empty string");
        }

        let ext = &self.output.extension;
        if ext.is_empty() || ext.contains(|c: char| matches!(c, '/' | '\\' | '.')) {
            push("output.extension".to_string(), "must be a bare extension such as \"c\"");
        }

        if self.header.file.trim().is_empty() {
            push("header.file".to_string(), "must be a non-empty file name");
        }
        if let Some(guard) = &self.header.guard {
            if !is_c_identifier(guard) {
                push("header.guard".to_string(), "must be a valid C identifier");
            }
        }

        // (field, symbol) for every name emitted into the generated C.
        let mut generated: Vec<(String, String)> = Vec::new();
        let header_file: PathBuf = Path::new(&self.header.file)
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();

        let mut seen = HashSet::new();
        for (i, sprite) in self.sprites.iter().enumerate() {
            if sprite.source.as_os_str().is_empty() {
                push(format!("sprites[{}].source", i), "must be a non-empty path");
            }
            let ident = sprite.identifier();
            let field = format!("sprites[{}].name", i);
            if !is_c_identifier(&ident) {
                push(field, "must be a valid C identifier");
            } else if !seen.insert(ident.clone()) {
                push(field, "duplicates an earlier sprite");
            } else {
                if header_file == Path::new(&format!("{}.{}", ident, ext)) {
                    push("header.file".to_string(), "overwrites a generated sprite source");
                }
                generated.push((field.clone(), format!("{}_data", ident)));
                generated.push((field, ident));
            }
        }

        let mut groups = HashSet::new();
        for (i, anim) in self.animations.iter().enumerate() {
            let field = format!("animations[{}].name", i);
            let upper = anim.name.to_ascii_uppercase();
            if !is_c_identifier(&anim.name) {
                push(field, "must be a valid C identifier");
            } else if !groups.insert(upper.clone()) {
                push(field, "duplicates an earlier animation");
            } else {
                generated.push((field.clone(), format!("{}_FRAMES", upper)));
                generated.push((field, format!("{}_FRAME_COUNT", upper)));
            }
            if anim.frames.is_empty() {
                push(format!("animations[{}].frames", i), "must list at least one sprite");
            }
            for (j, frame) in anim.frames.iter().enumerate() {
                if !seen.contains(frame) {
                    push(format!("animations[{}].frames[{}]", i, j), "does not name a sprite");
                }
            }
        }

        let guard_field = if self.header.guard.is_some() { "header.guard" } else { "header.file" };
        generated.push((guard_field.to_string(), self.header_guard()));

        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (field, symbol) in &generated {
            match owners.get(symbol.as_str()) {
                Some(owner) => {
                    let message =
                        format!("generates '{}', which is already generated by {}", symbol, owner);
                    push(field.clone(), &message);
                }
                None => {
                    owners.insert(symbol, field);
                }
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The include guard for the declaration header.
    pub fn header_guard(&self) -> String {
        self.header.guard.clone().unwrap_or_else(|| guard_from_file_name(&self.header.file))
    }

    /// Sprite identifiers in configured order.
    pub fn sprite_names(&self) -> Vec<String> {
        self.sprites.iter().map(SpriteEntry::identifier).collect()
    }
}
