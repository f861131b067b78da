//! Declaration header (`.h`) generation.
//!
//! The header declares every generated `lv_img_dsc_t` exactly once, in the
//! order the sprites were converted, so application code can reference the
//! sprites without including the large `.c` files.
//!
//! # Output Format
//!
//! ```text
//! #ifndef PET_SPRITES_H
//! #define PET_SPRITES_H
//!
//! #include "lvgl.h"
//!
//! #ifdef __cplusplus
//! extern "C" {
//! #endif
//!
//! extern const lv_img_dsc_t pet_idle_frame1;  // 2.png
//! extern const lv_img_dsc_t pet_idle_frame2;  // 3.png
//!
//! #ifdef __cplusplus
//! }
//! #endif
//!
//! // Animation frame arrays
//! static const lv_img_dsc_t* PET_IDLE_FRAMES[] = {
//!     &pet_idle_frame1,
//!     &pet_idle_frame2
//! };
//!
//! #define PET_IDLE_FRAME_COUNT 2
//!
//! #endif // PET_SPRITES_H
//! ```

use super::{comment_text, include_directive, CodeBuilder, DEFAULT_INCLUDE};

/// One `extern` declaration in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Descriptor identifier
    pub name: String,
    /// Source file name, written as a trailing comment
    pub source: Option<String>,
}

impl Declaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), source: None }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A named, ordered list of sprites forming an animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameGroup {
    pub name: String,
    pub frames: Vec<String>,
}

impl FrameGroup {
    /// Name of the frame pointer array, e.g. `PET_IDLE_FRAMES`.
    pub fn array_name(&self) -> String {
        format!("{}_FRAMES", self.name.to_ascii_uppercase())
    }

    /// Name of the frame count macro, e.g. `PET_IDLE_FRAME_COUNT`.
    pub fn count_macro(&self) -> String {
        format!("{}_FRAME_COUNT", self.name.to_ascii_uppercase())
    }
}

/// Options for header generation.
#[derive(Debug, Clone)]
pub struct HeaderOptions {
    /// Include guard macro
    pub guard: String,
    /// Header providing `lv_img_dsc_t`
    pub include: String,
    /// Wrap declarations in `extern "C"` for C++ consumers
    pub extern_c: bool,
}

impl HeaderOptions {
    /// Options with a guard derived from the header file name.
    pub fn for_file(file_name: &str) -> Self {
        Self {
            guard: guard_from_file_name(file_name),
            include: DEFAULT_INCLUDE.to_string(),
            extern_c: true,
        }
    }
}

/// Derive an include guard from a header file name.
///
/// `pet_sprites.h` becomes `PET_SPRITES_H`. Characters that cannot appear in
/// a macro name become underscores, and a leading digit is prefixed with one.
pub fn guard_from_file_name(file_name: &str) -> String {
    let mut guard: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect();
    if guard.is_empty() || guard.starts_with(|c: char| c.is_ascii_digit()) {
        guard.insert(0, '_');
    }
    guard
}

/// Render the declaration header.
pub fn render_header(
    declarations: &[Declaration],
    groups: &[FrameGroup],
    options: &HeaderOptions,
) -> String {
    let mut out = CodeBuilder::new();

    out.line(format!("#ifndef {}", options.guard))
        .line(format!("#define {}", options.guard))
        .blank()
        .line(include_directive(&options.include))
        .blank();

    if !declarations.is_empty() {
        if options.extern_c {
            out.lines(["#ifdef __cplusplus", "extern \"C\" {", "#endif"]).blank();
        }

        for decl in declarations {
            match &decl.source {
                Some(source) => out.line(format!(
                    "extern const lv_img_dsc_t {};  // {}",
                    decl.name,
                    comment_text(source)
                )),
                None => out.line(format!("extern const lv_img_dsc_t {};", decl.name)),
            };
        }
        out.blank();

        if options.extern_c {
            out.lines(["#ifdef __cplusplus", "}", "#endif"]).blank();
        }
    }

    if !groups.is_empty() {
        out.line("// Animation frame arrays");
        for group in groups {
            out.line(format!("static const lv_img_dsc_t* {}[] = {{", group.array_name()));
            let last = group.frames.len().saturating_sub(1);
            for (i, frame) in group.frames.iter().enumerate() {
                let sep = if i == last { "" } else { "," };
                out.line(format!("    &{}{}", frame, sep));
            }
            out.line("};").blank();
        }
        for group in groups {
            out.line(format!("#define {} {}", group.count_macro(), group.frames.len()));
        }
        out.blank();
    }

    out.line(format!("#endif // {}", options.guard));
    out.finish()
}
