//! PNG decoding into pixel buffers, and measurements on decoded files.

mod common;

use color_probe::{extract_palette, nearest_name, ComponentLayout, PixelBuffer, Region};
use common::fixtures::{sample_screen, TestScreen};
use huecheck::imaging::{crop, Screenshot};
use pretty_assertions::assert_eq;

fn encode(
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    palette: Option<Vec<u8>>,
    data: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if let Some(palette) = palette {
            encoder.set_palette(palette);
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

#[test]
fn test_open_written_screenshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_screen().write(dir.path(), "screen.png");

    let shot = Screenshot::open(&path).unwrap();
    assert_eq!((shot.width(), shot.height()), (120, 80));
    assert_eq!(shot.layout(), ComponentLayout::Rgba);

    let raster = shot.raster().unwrap();
    assert_eq!(nearest_name(raster.pixel_at(0, 0)), "white");
    assert_eq!(nearest_name(raster.pixel_at(12, 12)), "navy");
    assert_eq!(nearest_name(raster.pixel_at(40, 22)), "yellow");
}

#[test]
fn test_palette_of_cropped_button() {
    let dir = tempfile::tempdir().unwrap();
    let path = sample_screen().write(dir.path(), "screen.png");
    let shot = Screenshot::open(&path).unwrap();
    let raster = shot.raster().unwrap();

    let button = crop(&raster, Region::new(10, 10, 100, 30)).unwrap();
    let palette = extract_palette(&button);

    assert_eq!(nearest_name(palette.background), "navy");
    assert_eq!(nearest_name(palette.primary), "yellow");
    assert_eq!(palette.found, [true, false, false]);
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Screenshot::open(&dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, huecheck::error::ImageError::Io(_)), "{err}");
}

#[test]
fn test_sixteen_bit_rgb_is_stripped() {
    // One pixel: r=0x12AB, g=0x3400, b=0xFFFF
    let data = [0x12, 0xAB, 0x34, 0x00, 0xFF, 0xFF];
    let png = encode(1, 1, png::ColorType::Rgb, png::BitDepth::Sixteen, None, &data);

    let shot = Screenshot::decode(png.as_slice()).unwrap();
    assert_eq!(shot.layout(), ComponentLayout::Rgb);
    let pixel = shot.raster().unwrap().pixel_at(0, 0);
    assert_eq!(pixel.to_rgba8(), [0x12, 0x34, 0xFF, 255]);
}

#[test]
fn test_indexed_is_expanded() {
    // Two-entry palette, 8-bit indices
    let palette = vec![255, 0, 0, 0, 0, 255];
    let png = encode(
        2,
        1,
        png::ColorType::Indexed,
        png::BitDepth::Eight,
        Some(palette),
        &[1, 0],
    );

    let shot = Screenshot::decode(png.as_slice()).unwrap();
    assert_eq!(shot.layout(), ComponentLayout::Rgb);
    let raster = shot.raster().unwrap();
    assert_eq!(nearest_name(raster.pixel_at(0, 0)), "blue");
    assert_eq!(nearest_name(raster.pixel_at(1, 0)), "red");
}

#[test]
fn test_low_bit_gray_is_expanded() {
    // 1-bit gray: 0b1010_0000 -> white, black, white, black
    let png = encode(
        4,
        1,
        png::ColorType::Grayscale,
        png::BitDepth::One,
        None,
        &[0b1010_0000],
    );

    let shot = Screenshot::decode(png.as_slice()).unwrap();
    assert_eq!(shot.layout(), ComponentLayout::Gray);
    let raster = shot.raster().unwrap();
    let names: Vec<String> = (0..4).map(|x| nearest_name(raster.pixel_at(x, 0))).collect();
    assert_eq!(names, vec!["white", "black", "white", "black"]);
}

#[test]
fn test_translucent_pixels_get_alpha_names() {
    let screen = TestScreen::new(3, 3, [0, 0, 128, 128]);
    let shot = Screenshot::decode(screen.to_png().as_slice()).unwrap();
    let pixel = shot.raster().unwrap().pixel_at(1, 1);
    assert_eq!(nearest_name(pixel), "navyAlpha128");
}
