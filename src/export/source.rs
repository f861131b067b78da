//! LVGL sprite source (`.c`) generation.
//!
//! # Output Format
//!
//! ```text
//! // Generated from 2.png
//! // Size: 2x1
//!
//! #include "lvgl.h"
//!
//! #ifndef LV_ATTRIBUTE_MEM_ALIGN
//! #define LV_ATTRIBUTE_MEM_ALIGN
//! #endif
//!
//! // ARGB8565 format: Alpha + RGB565
//! const LV_ATTRIBUTE_MEM_ALIGN uint8_t pet_idle_frame1_data[] = {
//!     0xFF,0xF8,0x00,0x80,0x07,0xE0,
//! };
//!
//! const lv_img_dsc_t pet_idle_frame1 = {
//!     .header = {
//!         .cf = LV_IMG_CF_TRUE_COLOR_ALPHA,
//!         .always_zero = 0,
//!         .reserved = 0,
//!         .w = 2,
//!         .h = 1
//!     },
//!     .data_size = 6,
//!     .data = pet_idle_frame1_data,
//! };
//! ```
//!
//! Bytes are wrapped after every 12th byte (four pixels) and at the end of
//! every image row. When both happen on the same byte only one line break is
//! written.

use super::{comment_text, include_directive, CodeBuilder, DEFAULT_INCLUDE};
use crate::color::BYTES_PER_PIXEL;
use crate::transcode::TranscodedSprite;

/// Bytes per line of the data array.
pub const BYTES_PER_LINE: usize = 12;

const INDENT: &str = "    ";

/// Options for sprite source generation.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Header providing `lv_img_dsc_t`, e.g. `lvgl.h`
    pub include: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { include: DEFAULT_INCLUDE.to_string() }
    }
}

impl SourceOptions {
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }
}

/// Split packed bytes into the lines of the array literal.
///
/// `row_bytes` is the number of bytes in one image row; a value of 0
/// disables row breaks.
pub fn layout_bytes(data: &[u8], row_bytes: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(data.len() / BYTES_PER_LINE + 1);
    let mut line = String::with_capacity(INDENT.len() + BYTES_PER_LINE * 5);

    for (i, byte) in data.iter().enumerate() {
        if line.is_empty() {
            line.push_str(INDENT);
        }
        line.push_str(&format!("0x{:02X},", byte));

        let emitted = i + 1;
        let line_full = emitted % BYTES_PER_LINE == 0;
        let row_done = row_bytes > 0 && emitted % row_bytes == 0;
        if line_full || row_done {
            lines.push(std::mem::take(&mut line));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Render a transcoded sprite as a compilable LVGL C source file.
pub fn render_source(sprite: &TranscodedSprite, options: &SourceOptions) -> String {
    let desc = &sprite.descriptor;
    let mut out = CodeBuilder::new();

    match &sprite.source_name {
        Some(name) => out.line(format!("// Generated from {}", comment_text(name))),
        None => out.line("// Generated by lvsprite"),
    };
    out.line(format!("// Size: {}x{}", desc.width, desc.height))
        .blank()
        .line(include_directive(&options.include))
        .blank()
        .line("#ifndef LV_ATTRIBUTE_MEM_ALIGN")
        .line("#define LV_ATTRIBUTE_MEM_ALIGN")
        .line("#endif")
        .blank()
        .line("// ARGB8565 format: Alpha + RGB565")
        .line(format!("const LV_ATTRIBUTE_MEM_ALIGN uint8_t {}[] = {{", desc.data_symbol()));

    let row_bytes = desc.width as usize * BYTES_PER_PIXEL;
    out.lines(layout_bytes(&sprite.data, row_bytes));

    out.line("};")
        .blank()
        .line(format!("const lv_img_dsc_t {} = {{", desc.name))
        .line("    .header = {")
        .line(format!("        .cf = {},", desc.color_format()))
        .line("        .always_zero = 0,")
        .line("        .reserved = 0,")
        .line(format!("        .w = {},", desc.width))
        .line(format!("        .h = {}", desc.height))
        .line("    },")
        .line(format!("    .data_size = {},", desc.data_size))
        .line(format!("    .data = {},", desc.data_symbol()))
        .line("};");

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::transcode;
    use image::{Rgba, RgbaImage};

    fn hex_tokens(text: &str) -> Vec<u8> {
        text.split(',')
            .map(str::trim)
            .filter_map(|t| t.strip_prefix("0x"))
            .map(|t| u8::from_str_radix(t, 16).unwrap())
            .collect()
    }

    #[test]
    fn test_layout_wraps_every_twelve_bytes() {
        let data: Vec<u8> = (0..30).collect();
        let lines = layout_bytes(&data, 0);
        assert_eq!(lines.len(), 3);
        assert_eq!(hex_tokens(&lines[0]).len(), 12);
        assert_eq!(hex_tokens(&lines[1]).len(), 12);
        assert_eq!(hex_tokens(&lines[2]).len(), 6);
        assert!(lines.iter().all(|l| l.starts_with("    0x")));
    }

    #[test]
    fn test_layout_breaks_at_row_end() {
        // 2-pixel rows: 6 bytes per row, never reaching 12 within a row.
        let data: Vec<u8> = (0..18).collect();
        let lines = layout_bytes(&data, 6);
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(hex_tokens(line).len(), 6);
        }
    }

    #[test]
    fn test_layout_wrap_and_row_end_coincide() {
        // 4-pixel rows: both rules fire on byte 12, no empty lines.
        let data = vec![0u8; 24];
        let lines = layout_bytes(&data, 12);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| !l.trim().is_empty()));
    }

    #[test]
    fn test_layout_wrap_uses_global_count() {
        // 5-pixel rows (15 bytes): breaks at 12, 15, 24, 30.
        let data = vec![0u8; 30];
        let lines = layout_bytes(&data, 15);
        let counts: Vec<usize> = lines.iter().map(|l| hex_tokens(l).len()).collect();
        assert_eq!(counts, vec![12, 3, 9, 6]);
    }

    #[test]
    fn test_layout_uppercase_hex() {
        let lines = layout_bytes(&[0xab, 0x0f], 0);
        assert_eq!(lines, vec!["    0xAB,0x0F,".to_string()]);
    }

    #[test]
    fn test_layout_empty() {
        assert!(layout_bytes(&[], 3).is_empty());
    }

    #[test]
    fn test_render_source_two_pixel_sprite() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 255, 0, 128]));
        let sprite = transcode(&image, "pet_idle_frame1").with_source_name("2.png");

        let c = render_source(&sprite, &SourceOptions::default());

        assert!(c.starts_with("// Generated from 2.png\n// Size: 2x1\n"));
        assert!(c.contains("#include \"lvgl.h\""));
        assert!(c.contains("#define LV_ATTRIBUTE_MEM_ALIGN"));
        assert!(c.contains(
            "const LV_ATTRIBUTE_MEM_ALIGN uint8_t pet_idle_frame1_data[] = {\n    0xFF,0xF8,0x00,0x80,0x07,0xE0,\n};"
        ));
        assert!(c.contains("const lv_img_dsc_t pet_idle_frame1 = {"));
        assert!(c.contains(".cf = LV_IMG_CF_TRUE_COLOR_ALPHA,"));
        assert!(c.contains(".w = 2,"));
        assert!(c.contains(".h = 1\n"));
        assert!(c.contains(".data_size = 6,"));
        assert!(c.contains(".data = pet_idle_frame1_data,"));
        assert!(c.ends_with("};\n"));
    }

    #[test]
    fn test_render_source_byte_count_and_order() {
        let mut image = RgbaImage::new(5, 3);
        for (x, y, px) in image.enumerate_pixels_mut() {
            *px = Rgba([(x * 50) as u8, (y * 80) as u8, 7, (x + y) as u8]);
        }
        let sprite = transcode(&image, "gradient");
        let c = render_source(&sprite, &SourceOptions::default());

        let start = c.find("[] = {").unwrap() + "[] = {".len();
        let end = c[start..].find("};").unwrap() + start;
        let bytes = hex_tokens(&c[start..end]);

        assert_eq!(bytes.len(), 5 * 3 * 3);
        assert_eq!(bytes, sprite.data);
        assert!(c.contains(".data_size = 45,"));
    }

    #[test]
    fn test_render_source_custom_include() {
        let sprite = transcode(&RgbaImage::new(1, 1), "tiny");
        let c = render_source(&sprite, &SourceOptions::default().with_include("lvgl/lvgl.h"));
        assert!(c.contains("#include \"lvgl/lvgl.h\""));
        assert!(c.starts_with("// Generated by lvsprite\n"));
    }

    #[test]
    fn test_render_source_angle_include() {
        let sprite = transcode(&RgbaImage::new(1, 1), "tiny");
        let c = render_source(&sprite, &SourceOptions::default().with_include("<lvgl.h>"));
        assert!(c.contains("\n#include <lvgl.h>\n"));
        assert!(!c.contains("\"<lvgl.h>\""));
    }

    #[test]
    fn test_render_source_newline_in_file_name_stays_in_comment() {
        let sprite = transcode(&RgbaImage::new(1, 1), "tiny").with_source_name("idle\nframe.png");
        let c = render_source(&sprite, &SourceOptions::default());
        assert!(c.starts_with("// Generated from idle frame.png\n// Size: 1x1\n"));
        assert!(c.lines().all(|l| l != "frame.png"));
    }
}
