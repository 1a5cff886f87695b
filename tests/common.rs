#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Deterministic, non-flat content so encoders have something to compress.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Writes a gradient image in the format named by `name`'s extension.
pub fn create_test_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap()
        .to_ascii_lowercase();
    let format = ImageFormat::from_extension(ext).unwrap();
    gradient(width, height)
        .save_with_format(&path, format)
        .unwrap();
    path
}

pub fn create_empty_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap();
    path
}

pub fn dimensions_of(path: &Path) -> (u32, u32) {
    image::image_dimensions(path).unwrap()
}
