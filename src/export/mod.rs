//! C code generation for LVGL image assets.
//!
//! Two artifacts are produced per build:
//!
//! - **Sprite source** (`source`): one `.c` file per sprite with the packed
//!   `<name>_data[]` byte array and its `lv_img_dsc_t <name>` descriptor.
//! - **Declaration header** (`header`): one `.h` file with an include guard
//!   declaring every generated descriptor, plus optional animation frame
//!   tables.
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use lvsprite::export::{render_source, SourceOptions};
//! use lvsprite::transcode::transcode;
//!
//! let mut image = RgbaImage::new(1, 1);
//! image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
//! let sprite = transcode(&image, "dot");
//!
//! let c = render_source(&sprite, &SourceOptions::default());
//! assert!(c.contains("uint8_t dot_data[] = {"));
//! assert!(c.contains("0xFF,0xF8,0x00,"));
//! ```

pub mod header;
pub mod source;

pub use header::*;
pub use source::*;

/// Default header included by generated files.
pub const DEFAULT_INCLUDE: &str = "lvgl.h";

/// `#include` line for `include`.
///
/// A name already wrapped in `<...>` or `"..."` is kept as written; a bare
/// name is quoted.
pub fn include_directive(include: &str) -> String {
    let wrapped = (include.starts_with('<') && include.ends_with('>'))
        || (include.len() > 1 && include.starts_with('"') && include.ends_with('"'));
    if wrapped {
        format!("#include {}", include)
    } else {
        format!("#include \"{}\"", include)
    }
}

/// Text safe to place after `//`: control characters become spaces.
pub fn comment_text(text: &str) -> String {
    text.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

/// Line-oriented text builder.
///
/// Generated files are collected as a list of lines and joined once in
/// [`CodeBuilder::finish`].
#[derive(Debug, Default)]
pub struct CodeBuilder {
    lines: Vec<String>,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line (without its terminator).
    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(text.into());
        self
    }

    /// Append an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Append several lines at once.
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Join into the final text, newline-terminated.
    pub fn finish(self) -> String {
        let len = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = String::with_capacity(len);
        for line in self.lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
