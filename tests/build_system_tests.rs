//! Build system test suite
//!
//! End-to-end tests for the lvsprite library: configuration parsing,
//! the conversion pipeline, generated C text and progress reporting.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use lvsprite::build::{
    BuildContext, BuildPipeline, BuildStatus, JsonProgress, NullProgress, ProgressEvent,
    ProgressReporter,
};
use lvsprite::color::PackedPixel;
use lvsprite::config::loader::parse_config;
use lvsprite::transcode::transcode;

// ============================================================================
// Test Utilities
// ============================================================================

/// Write an RGBA PNG from row-major pixels.
fn write_png(path: &Path, width: u32, pixels: &[[u8; 4]]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let height = pixels.len() as u32 / width;
    let image = RgbaImage::from_fn(width, height, |x, y| Rgba(pixels[(y * width + x) as usize]));
    image.save(path).unwrap();
}

/// Create a project from config text and return a pipeline rooted in it.
fn project(config: &str) -> (TempDir, BuildPipeline) {
    let temp = TempDir::new().unwrap();
    let config = parse_config(config).unwrap();
    let ctx = BuildContext::new(config, temp.path().to_path_buf());
    (temp, BuildPipeline::new(ctx))
}

fn read(temp: &TempDir, rel: &str) -> String {
    fs::read_to_string(temp.path().join(rel)).unwrap()
}

/// Reporter that records every event.
#[derive(Default)]
struct Recorder(Mutex<Vec<ProgressEvent>>);

impl ProgressReporter for Recorder {
    fn report(&self, event: ProgressEvent) {
        self.0.lock().unwrap().push(event);
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

const PET_CONFIG: &str = r#"
[project]
name = "sui_watch"
src = "assets/idle"
out = "src"

[header]
file = "pet_sprites.h"

[[sprites]]
source = "2.png"
name = "pet_idle_frame1"

[[sprites]]
source = "3.png"
name = "pet_idle_frame2"

[[sprites]]
source = "1.png"
name = "pet_idle_frame3"

[[animations]]
name = "pet_idle"
frames = ["pet_idle_frame1", "pet_idle_frame2", "pet_idle_frame3"]
"#;

fn write_pet_assets(temp: &TempDir) {
    let dir = temp.path().join("assets/idle");
    write_png(&dir.join("2.png"), 2, &[[255, 0, 0, 255], [0, 255, 0, 128]]);
    write_png(&dir.join("3.png"), 1, &[[0, 0, 255, 255], [255, 255, 255, 0]]);
    write_png(&dir.join("1.png"), 1, &[[10, 20, 30, 40]]);
}

// ============================================================================
// Pixel requantization
// ============================================================================

#[test]
fn test_two_pixel_image_bytes() {
    let mut image = RgbaImage::new(2, 1);
    image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    image.put_pixel(1, 0, Rgba([0, 255, 0, 128]));

    let sprite = transcode(&image, "pair");
    assert_eq!(sprite.data, vec![0xFF, 0xF8, 0x00, 0x80, 0x07, 0xE0]);
    assert_eq!(sprite.descriptor.data_size, 6);
}

#[test]
fn test_requantize_matches_formula_for_sampled_pixels() {
    for r in (0..=255u8).step_by(17) {
        for g in (0..=255u8).step_by(15) {
            for b in (0..=255u8).step_by(51) {
                let packed = PackedPixel::from_rgba(Rgba([r, g, b, r ^ g]));
                let bytes = packed.bytes();
                let expected =
                    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3);
                assert_eq!(u16::from_be_bytes([bytes[1], bytes[2]]), expected);
                assert_eq!(bytes[0], r ^ g);
            }
        }
    }
}

#[test]
fn test_requantize_twice_is_not_idempotent() {
    let once = PackedPixel::from_rgba(Rgba([255, 255, 255, 255])).bytes();
    let twice = PackedPixel::from_rgba(Rgba([once[0], once[1], once[2], 255])).bytes();
    assert_ne!(once, twice);
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_pipeline_generates_every_sprite_and_header() {
    let (temp, pipeline) = project(PET_CONFIG);
    write_pet_assets(&temp);

    let result = pipeline.run(&NullProgress).unwrap();

    assert!(result.is_success(), "{}", result.summary());
    assert_eq!(
        result.generated_ids(),
        vec!["pet_idle_frame1", "pet_idle_frame2", "pet_idle_frame3"]
    );
    for id in result.generated_ids() {
        assert!(temp.path().join(format!("src/{}.c", id)).exists());
    }

    let frame1 = read(&temp, "src/pet_idle_frame1.c");
    assert!(frame1.starts_with("// Generated from 2.png\n// Size: 2x1\n"));
    assert!(frame1.contains("#include \"lvgl.h\""));
    assert!(frame1.contains("const LV_ATTRIBUTE_MEM_ALIGN uint8_t pet_idle_frame1_data[] = {"));
    assert!(frame1.contains("    0xFF,0xF8,0x00,0x80,0x07,0xE0,\n};"));
    assert!(frame1.contains(".cf = LV_IMG_CF_TRUE_COLOR_ALPHA,"));
    assert!(frame1.contains(".w = 2,"));
    assert!(frame1.contains(".h = 1"));
    assert!(frame1.contains(".data = pet_idle_frame1_data,"));

    let frame2 = read(&temp, "src/pet_idle_frame2.c");
    assert!(frame2.contains("    0xFF,0x00,0x1F,\n    0x00,0xFF,0xFF,\n};"));
}

#[test]
fn test_header_declares_each_sprite_once_in_order() {
    let (temp, pipeline) = project(PET_CONFIG);
    write_pet_assets(&temp);

    pipeline.run(&NullProgress).unwrap();
    let header = read(&temp, "src/pet_sprites.h");

    let declared: Vec<&str> = header
        .lines()
        .filter_map(|l| l.strip_prefix("extern const lv_img_dsc_t "))
        .map(|l| l.split(';').next().unwrap())
        .collect();
    assert_eq!(declared, ["pet_idle_frame1", "pet_idle_frame2", "pet_idle_frame3"]);

    assert!(header.starts_with("#ifndef PET_SPRITES_H\n#define PET_SPRITES_H\n"));
    assert!(header.contains("static const lv_img_dsc_t* PET_IDLE_FRAMES[] = {"));
    assert!(header.contains("#define PET_IDLE_FRAME_COUNT 3"));
    assert!(header.trim_end().ends_with("#endif // PET_SPRITES_H"));
}

#[test]
fn test_empty_sprite_list_produces_valid_header() {
    let (temp, pipeline) = project("[project]\nname = \"empty\"\n");

    let result = pipeline.run(&NullProgress).unwrap();

    assert!(result.is_success());
    assert_eq!(result.header, Some(temp.path().join("generated/sprites.h")));
    let header = read(&temp, "generated/sprites.h");
    assert!(header.starts_with("#ifndef SPRITES_H\n#define SPRITES_H\n"));
    assert!(!header.contains("extern const"));
}

#[test]
fn test_fail_fast_stops_at_first_decode_error() {
    let (temp, pipeline) = project(PET_CONFIG);
    write_pet_assets(&temp);
    fs::write(temp.path().join("assets/idle/3.png"), b"garbage").unwrap();

    let result = pipeline.run(&NullProgress).unwrap();

    let statuses: Vec<_> = result.targets.iter().map(|t| t.status.clone()).collect();
    assert_eq!(statuses[0], BuildStatus::Success);
    assert!(statuses[1].is_failure());
    assert_eq!(statuses[2], BuildStatus::Skipped);
    assert!(temp.path().join("src/pet_idle_frame1.c").exists());
    assert!(!temp.path().join("src/pet_idle_frame3.c").exists());
    assert!(!temp.path().join("src/pet_sprites.h").exists());
}

#[test]
fn test_keep_going_header_lists_produced_ids_only() {
    let config = PET_CONFIG.replace("[header]", "[build]\nkeep_going = true\n\n[header]");
    let (temp, pipeline) = project(&config);
    write_pet_assets(&temp);
    fs::remove_file(temp.path().join("assets/idle/3.png")).unwrap();

    let result = pipeline.run(&NullProgress).unwrap();

    assert!(!result.is_success());
    assert_eq!(result.generated_ids(), vec!["pet_idle_frame1", "pet_idle_frame3"]);
    let header = read(&temp, "src/pet_sprites.h");
    assert!(header.contains("extern const lv_img_dsc_t pet_idle_frame1;"));
    assert!(!header.contains("pet_idle_frame2"));
    assert!(header.contains("extern const lv_img_dsc_t pet_idle_frame3;"));
    assert!(!header.contains("PET_IDLE_FRAMES"));
    assert!(result.warnings.iter().any(|w| w.contains("pet_idle")));
}

#[test]
fn test_rerun_overwrites_outputs() {
    let (temp, pipeline) = project(PET_CONFIG);
    write_pet_assets(&temp);
    pipeline.run(&NullProgress).unwrap();
    let first = read(&temp, "src/pet_idle_frame3.c");

    write_png(&temp.path().join("assets/idle/1.png"), 1, &[[255, 255, 255, 255]]);
    pipeline.run(&NullProgress).unwrap();
    let second = read(&temp, "src/pet_idle_frame3.c");

    assert_ne!(first, second);
    assert!(second.contains("0xFF,0xFF,0xFF,"));
}

// ============================================================================
// Progress reporting
// ============================================================================

#[test]
fn test_pipeline_event_sequence() {
    let (temp, pipeline) = project(PET_CONFIG);
    write_pet_assets(&temp);
    let recorder = Recorder::default();

    pipeline.run(&recorder).unwrap();

    let events = recorder.0.lock().unwrap();
    assert!(matches!(events[0], ProgressEvent::BuildStarted { total_targets: 3 }));
    let completed: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::TargetCompleted { target_id, .. } => Some(target_id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(completed, ["pet_idle_frame1", "pet_idle_frame2", "pet_idle_frame3"]);
    assert!(events
        .iter()
        .any(|e| matches!(e, ProgressEvent::HeaderWritten { declarations: 3, .. })));
    assert!(matches!(
        events.last(),
        Some(ProgressEvent::BuildCompleted { success: true, succeeded: 3, .. })
    ));
}

#[test]
fn test_json_progress_output_is_parseable() {
    let (temp, pipeline) = project(PET_CONFIG);
    write_pet_assets(&temp);
    let buffer = SharedBuffer::default();

    pipeline.run(&JsonProgress::with_output(buffer.clone())).unwrap();

    let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let events: Vec<serde_json::Value> =
        text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(events.first().unwrap()["event"], "build_started");
    assert_eq!(events.last().unwrap()["event"], "build_completed");
    assert_eq!(events.last().unwrap()["succeeded"], 3);
    let outputs: Vec<PathBuf> = events
        .iter()
        .filter(|e| e["event"] == "target_completed")
        .map(|e| PathBuf::from(e["output"].as_str().unwrap()))
        .collect();
    assert_eq!(outputs.len(), 3);
    assert!(outputs[0].ends_with("src/pet_idle_frame1.c"));
}
