//! Decoding source images and packing them into ARGB8565 sprite data

use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::color::{PackedPixel, BYTES_PER_PIXEL};

/// LVGL color format tag written into every descriptor.
pub const COLOR_FORMAT: &str = "LV_IMG_CF_TRUE_COLOR_ALPHA";

/// The source image could not be opened or decoded.
#[derive(Debug, Error)]
#[error("cannot decode '{}': {source}", .path.display())]
pub struct DecodeError {
    /// Path that was being decoded
    pub path: PathBuf,
    /// Underlying decoder error
    #[source]
    pub source: image::ImageError,
}

/// Metadata describing one generated sprite to LVGL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteDescriptor {
    /// C identifier of the `lv_img_dsc_t` symbol
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Size of the packed data in bytes, always `width * height * 3`
    pub data_size: usize,
}

impl SpriteDescriptor {
    /// Build a descriptor for a sprite of the given dimensions.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            data_size: width as usize * height as usize * BYTES_PER_PIXEL,
        }
    }

    /// Name of the byte array backing this descriptor.
    pub fn data_symbol(&self) -> String {
        format!("{}_data", self.name)
    }

    pub fn color_format(&self) -> &'static str {
        COLOR_FORMAT
    }
}

/// A sprite after requantization, ready to be rendered as C source.
#[derive(Debug, Clone)]
pub struct TranscodedSprite {
    pub descriptor: SpriteDescriptor,
    /// Packed pixels, row-major from the top-left corner
    pub data: Vec<u8>,
    /// File name of the image this sprite came from, if any
    pub source_name: Option<String>,
}

impl TranscodedSprite {
    pub fn width(&self) -> u32 {
        self.descriptor.width
    }

    pub fn height(&self) -> u32 {
        self.descriptor.height
    }

    /// Attach the originating file name, shown in the generated preamble.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

/// Open an image file and normalize it to RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage, DecodeError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| DecodeError { path: path.to_path_buf(), source })
}

/// Requantize every pixel of `image` into ARGB8565.
///
/// Pixels are enumerated row by row (y outer, x inner), so the output holds
/// exactly `width * height * 3` bytes.
pub fn transcode(image: &RgbaImage, name: &str) -> TranscodedSprite {
    let (width, height) = image.dimensions();
    let descriptor = SpriteDescriptor::new(name, width, height);

    let mut data = Vec::with_capacity(descriptor.data_size);
    for pixel in image.pixels() {
        data.extend_from_slice(&PackedPixel::from_rgba(*pixel).bytes());
    }

    TranscodedSprite { descriptor, data, source_name: None }
}

/// Decode `path` and transcode it under the identifier `name`.
pub fn transcode_file(path: &Path, name: &str) -> Result<TranscodedSprite, DecodeError> {
    let image = load_image(path)?;
    let sprite = transcode(&image, name);
    Ok(match path.file_name() {
        Some(file) => sprite.with_source_name(file.to_string_lossy()),
        None => sprite,
    })
}
