//! Batch conversion for lvsprite projects
//!
//! Converts the sprites listed in `lvsprite.toml` into LVGL C sources and
//! writes one declaration header for all of them.
//!
//! # Overview
//!
//! The build pipeline consists of:
//! - **Planning**: Resolve each configured sprite to an input image and an output file
//! - **Execution**: Decode, requantize and write each sprite in order
//! - **Header**: Declare every produced sprite once, in conversion order
//!
//! # Example
//!
//! ```ignore
//! use lvsprite::build::{BuildContext, BuildPipeline, ConsoleProgress};
//! use lvsprite::config::load_config;
//!
//! let config = load_config(None)?;
//! let context = BuildContext::new(config, project_root);
//! let pipeline = BuildPipeline::new(context);
//!
//! let result = pipeline.run(&ConsoleProgress::new())?;
//! println!("{}", result.summary());
//! ```

pub mod context;
pub mod pipeline;
pub mod progress;
pub mod result;
pub mod target;

pub use context::*;
pub use pipeline::*;
pub use progress::*;
pub use result::*;
pub use target::*;
