//! Image compression applied to uploads before they are forwarded to the backend.
//!
//! Every compression derives its output from the original upload, so changing the
//! quality of an image never compounds the loss of an earlier pass.

use std::io::Cursor;

use axum::body::Bytes;
use futures::future::join_all;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::errors::AppError;

/// Encoding quality percentage, always within `[1, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Clamp any integer into the valid range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    /// Parse a form value, clamping numbers and rejecting anything else.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        raw.trim()
            .parse::<i64>()
            .map(Self::clamped)
            .map_err(|_| AppError::Validation(format!("Invalid image quality: {}", raw)))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Maximum-dimension policy applied before re-encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizePolicy {
    /// Longest edge allowed in pixels, `None` keeps the source size
    pub max_dimension: Option<u32>,
}

impl ResizePolicy {
    /// Compute output dimensions, preserving aspect ratio.
    pub fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let Some(cap) = self.max_dimension.filter(|cap| *cap > 0) else {
            return (width, height);
        };
        let longest = width.max(height);
        if longest <= cap {
            return (width, height);
        }

        let scale = cap as f64 / longest as f64;
        let scaled = |side: u32| ((side as f64 * scale).round() as u32).max(1);
        if width >= height {
            (cap, scaled(height))
        } else {
            (scaled(width), cap)
        }
    }
}

/// A file as received from or sent to a form.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File name with its extension replaced.
    fn renamed(&self, extension: &str) -> String {
        let name = self.file_name.rsplit(['/', '\\']).next().unwrap_or_default();
        let stem = match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ if !name.is_empty() => name,
            _ => "image",
        };
        format!("{}.{}", stem, extension)
    }
}

/// Decode, resize and re-encode an image as JPEG.
pub fn compress(original: &Upload, quality: Quality, policy: &ResizePolicy) -> Result<Upload, AppError> {
    let decoded = image::load_from_memory(&original.bytes)?;

    let (width, height) = policy.target_dimensions(decoded.width(), decoded.height());
    let surface = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle)
    };

    // JPEG has no alpha channel
    let rgb = surface.to_rgb8();

    let mut encoded = Cursor::new(Vec::with_capacity(original.len() / 2));
    JpegEncoder::new_with_quality(&mut encoded, quality.get()).encode_image(&rgb)?;

    Ok(Upload {
        file_name: original.renamed("jpg"),
        content_type: "image/jpeg".to_string(),
        bytes: Bytes::from(encoded.into_inner()),
    })
}

/// Best-effort compression: falls back to the original upload on any failure.
///
/// The original is also kept when re-encoding did not make the file any smaller.
pub fn compress_or_original(original: &Upload, quality: Quality, policy: &ResizePolicy) -> Upload {
    match compress(original, quality, policy) {
        Ok(compressed) if compressed.len() < original.len() => {
            tracing::debug!(
                file = %original.file_name,
                quality = quality.get(),
                before = original.len(),
                after = compressed.len(),
                "Compressed image"
            );
            compressed
        }
        Ok(_) => {
            tracing::debug!(file = %original.file_name, "Re-encoding did not shrink image, keeping original");
            original.clone()
        }
        Err(e) => {
            tracing::warn!(file = %original.file_name, "Keeping original upload: {}", e);
            original.clone()
        }
    }
}

/// Run [`compress_or_original`] on the blocking pool.
pub async fn compress_in_background(original: Upload, quality: Quality, policy: ResizePolicy) -> Upload {
    let fallback = original.clone();
    match tokio::task::spawn_blocking(move || compress_or_original(&original, quality, &policy)).await {
        Ok(upload) => upload,
        Err(e) => {
            tracing::error!("Compression task failed: {}", e);
            fallback
        }
    }
}

/// An image chosen in a form together with its own quality setting.
#[derive(Debug, Clone)]
pub struct ImageSlot {
    original: Upload,
    quality: Quality,
    output: Upload,
}

impl ImageSlot {
    /// Compress `original` at `quality` and keep both.
    pub async fn compressed(original: Upload, quality: Quality, policy: ResizePolicy) -> Self {
        let output = compress_in_background(original.clone(), quality, policy).await;
        Self {
            original,
            quality,
            output,
        }
    }

    /// Re-derive the output from the original at a new quality.
    pub async fn requality(&mut self, quality: Quality, policy: ResizePolicy) {
        self.quality = quality;
        self.output = compress_in_background(self.original.clone(), quality, policy).await;
    }

    pub fn original(&self) -> &Upload {
        &self.original
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// The file to attach to the outgoing form.
    pub fn upload(&self) -> &Upload {
        &self.output
    }
}

/// Compress several files at once, one pipeline per file.
pub async fn compress_batch(originals: Vec<Upload>, quality: Quality, policy: ResizePolicy) -> Vec<ImageSlot> {
    join_all(
        originals
            .into_iter()
            .map(|original| ImageSlot::compressed(original, quality, policy)),
    )
    .await
}

/// Human readable size, e.g. `1.5 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exponent])
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    /// A noisy gradient that compresses like a photograph.
    pub(crate) fn photo_png(width: u32, height: u32) -> Upload {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let noise = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)).wrapping_mul(2_654_435_761) >> 24;
            Rgb([
                ((x * 255 / width) as u8).wrapping_add((noise & 0x1f) as u8),
                ((y * 255 / height) as u8).wrapping_add(((noise >> 3) & 0x1f) as u8),
                (noise & 0xff) as u8,
            ])
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        Upload::new("field-visit.png", "image/png", Bytes::from(buf.into_inner()))
    }

    fn dimensions(upload: &Upload) -> (u32, u32) {
        let img = image::load_from_memory(&upload.bytes).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn test_quality_clamps() {
        assert_eq!(Quality::clamped(0).get(), 1);
        assert_eq!(Quality::clamped(55).get(), 55);
        assert_eq!(Quality::clamped(1000).get(), 100);
        assert_eq!(Quality::parse(" 65 ").unwrap().get(), 65);
        assert!(Quality::parse("high").is_err());
    }

    #[test]
    fn test_target_dimensions() {
        let none = ResizePolicy::default();
        assert_eq!(none.target_dimensions(4000, 3000), (4000, 3000));

        let capped = ResizePolicy {
            max_dimension: Some(1000),
        };
        assert_eq!(capped.target_dimensions(4000, 3000), (1000, 750));
        assert_eq!(capped.target_dimensions(3000, 4000), (750, 1000));
        assert_eq!(capped.target_dimensions(800, 600), (800, 600));
        assert_eq!(capped.target_dimensions(5000, 2), (1000, 1));
    }

    #[test]
    fn test_compress_shrinks_photo_and_keeps_size() {
        let original = photo_png(400, 300);
        let compressed = compress(&original, Quality::clamped(50), &ResizePolicy::default()).unwrap();

        assert!(compressed.len() < original.len());
        assert_eq!(dimensions(&compressed), (400, 300));
        assert_eq!(compressed.file_name, "field-visit.jpg");
        assert_eq!(compressed.content_type, "image/jpeg");
    }

    #[test]
    fn test_lower_quality_is_not_larger() {
        let original = photo_png(320, 240);
        let policy = ResizePolicy::default();
        let low = compress(&original, Quality::clamped(30), &policy).unwrap();
        let high = compress(&original, Quality::clamped(95), &policy).unwrap();
        assert!(low.len() <= high.len());
    }

    #[test]
    fn test_compress_applies_cap() {
        let original = photo_png(400, 200);
        let policy = ResizePolicy {
            max_dimension: Some(100),
        };
        let compressed = compress(&original, Quality::clamped(80), &policy).unwrap();
        assert_eq!(dimensions(&compressed), (100, 50));
    }

    #[test]
    fn test_compress_flattens_alpha() {
        let img = RgbaImage::from_pixel(64, 64, Rgba([10, 200, 30, 128]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        let upload = Upload::new("logo.png", "image/png", Bytes::from(buf.into_inner()));

        let compressed = compress(&upload, Quality::clamped(80), &ResizePolicy::default()).unwrap();
        assert_eq!(dimensions(&compressed), (64, 64));
    }

    #[test]
    fn test_undecodable_falls_back_to_original() {
        let upload = Upload::new("notes.png", "image/png", Bytes::from_static(b"not an image"));
        assert!(compress(&upload, Quality::default(), &ResizePolicy::default()).is_err());

        let kept = compress_or_original(&upload, Quality::default(), &ResizePolicy::default());
        assert_eq!(kept, upload);
    }

    #[test]
    fn test_renamed() {
        let upload = |name: &str| Upload::new(name, "image/png", Bytes::new());
        assert_eq!(upload("a.b.png").renamed("jpg"), "a.b.jpg");
        assert_eq!(upload("photo").renamed("jpg"), "photo.jpg");
        assert_eq!(upload("").renamed("jpg"), "image.jpg");
        assert_eq!(upload("C:\\pics\\dam.PNG").renamed("jpg"), "dam.jpg");
    }

    #[tokio::test]
    async fn test_requality_derives_from_original() {
        let original = photo_png(200, 150);
        let policy = ResizePolicy::default();

        let mut slot = ImageSlot::compressed(original.clone(), Quality::clamped(20), policy).await;
        slot.requality(Quality::clamped(90), policy).await;

        let direct = compress_or_original(&original, Quality::clamped(90), &policy);
        assert_eq!(slot.upload().bytes, direct.bytes);
        assert_eq!(slot.original(), &original);
        assert_eq!(slot.quality().get(), 90);
    }

    #[tokio::test]
    async fn test_compress_batch_keeps_order() {
        let mut first = photo_png(120, 90);
        first.file_name = "first.png".into();
        let mut second = photo_png(90, 120);
        second.file_name = "second.png".into();

        let slots = compress_batch(vec![first, second], Quality::clamped(60), ResizePolicy::default()).await;
        let names: Vec<_> = slots.iter().map(|s| s.upload().file_name.as_str()).collect();
        assert_eq!(names, ["first.jpg", "second.jpg"]);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
