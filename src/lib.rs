//! lvsprite - Library for converting images into LVGL C sources
//!
//! This library provides functionality to:
//! - Requantize RGBA8888 pixels into the ARGB8565 "true color alpha" layout
//! - Render sprites as compilable C byte arrays with `lv_img_dsc_t` descriptors
//! - Convert a configured list of sprites and declare them in one header

pub mod build;
pub mod cli;
pub mod color;
pub mod config;
pub mod export;
pub mod output;
pub mod transcode;
