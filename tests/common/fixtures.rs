//! Test fixtures: synthetic screenshots and manifests on disk.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RGBA colors used by the fixture screens
pub mod colors {
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];
    pub const NAVY: [u8; 4] = [0, 0, 128, 255];
    pub const YELLOW: [u8; 4] = [255, 255, 0, 255];
    pub const SILVER: [u8; 4] = [192, 192, 192, 255];
    pub const GAINSBORO: [u8; 4] = [220, 220, 220, 255];
}

/// An RGBA screen painted with rectangles, written as PNG on demand.
pub struct TestScreen {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl TestScreen {
    pub fn new(width: u32, height: u32, fill: [u8; 4]) -> Self {
        let pixels = fill
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Paint a rectangle, clipped to the screen.
    pub fn rect(mut self, x: u32, y: u32, width: u32, height: u32, color: [u8; 4]) -> Self {
        for py in y..(y + height).min(self.height) {
            for px in x..(x + width).min(self.width) {
                let i = (py as usize * self.width as usize + px as usize) * 4;
                self.pixels[i..i + 4].copy_from_slice(&color);
            }
        }
        self
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn to_png(&self) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().expect("PNG header");
            writer.write_image_data(&self.pixels).expect("PNG data");
        }
        out
    }

    pub fn write(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.to_png()).expect("write PNG fixture");
        path
    }
}

/// Standard fixture: a 120x80 white screen with
///
/// - a navy button (10,10 100x30) with a yellow title bar inside
/// - a black-on-white label (10,50 100x20)
/// - a gainsboro-on-silver faint label (60,0 40x8)
pub fn sample_screen() -> TestScreen {
    TestScreen::new(120, 80, colors::WHITE)
        .rect(10, 10, 100, 30, colors::NAVY)
        .rect(30, 20, 60, 8, colors::YELLOW)
        .rect(10, 58, 100, 4, colors::BLACK)
        .rect(60, 0, 40, 8, colors::SILVER)
        .rect(60, 3, 40, 2, colors::GAINSBORO)
}

pub const SAMPLE_MANIFEST_YAML: &str = r#"
elements:
  - kind: button
    text: Buy now
    frame: { x: 10, y: 10, width: 100, height: 30 }
  - kind: label
    text: Total
    frame: { x: 10, y: 50, width: 100, height: 20 }
    truncated: true
  - kind: label
    text: Terms apply
    frame: { x: 60, y: 0, width: 40, height: 8 }
    font_size: 9
"#;

pub const SAMPLE_MANIFEST_JSON: &str = r#"{
  "elements": [
    {
      "kind": "button_label",
      "text": "OK",
      "frame": { "x": 10, "y": 50, "width": 100, "height": 20 },
      "clipped": true
    }
  ]
}"#;

/// Temp dir holding the sample screenshot and a manifest.
pub fn sample_run_dir(manifest_name: &str, manifest: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let screenshot = sample_screen().write(dir.path(), "screen.png");
    let manifest_path = dir.path().join(manifest_name);
    std::fs::write(&manifest_path, manifest).expect("write manifest");
    (dir, screenshot, manifest_path)
}
