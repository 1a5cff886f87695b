pub const DEFAULT_QUALITY: u8 = 70;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Extensions (lower-case) that make a directory entry a candidate for compression.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Inputs larger than this are rejected before decoding (100MB).
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;
pub const MAX_IMAGE_DIMENSION: u32 = 20_000;

pub const ZOPFLI_QUALITY_THRESHOLD: u8 = 90;
pub const HIGH_COMPRESSION_QUALITY_THRESHOLD: u8 = 70;
pub const OXIPNG_PRESET: u8 = 4;
pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;

pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

pub const QUALITY_ENV: &str = "IMG_SHRINK_QUALITY";
pub const MAX_WIDTH_ENV: &str = "IMG_SHRINK_MAX_WIDTH";
pub const MAX_HEIGHT_ENV: &str = "IMG_SHRINK_MAX_HEIGHT";
