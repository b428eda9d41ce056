use std::io::Cursor;

use image::{codecs::jpeg::JpegEncoder, ImageReader};

use super::UploadError;

pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
pub const MAX_DIMENSION: u32 = 800;
pub const JPEG_QUALITY: u8 = 85;

/// How much of the file is sniffed for a magic-byte check. Catches files
/// whose extension lies about their content.
const SNIFF_LEN: usize = 2048;

/// Pre-acceptance checks on an uploaded file. Returns the full list of
/// violations; an empty vec means the file may be processed.
pub fn validate_upload(filename: Option<&str>, data: &[u8]) -> Vec<String> {
    let mut errors = Vec::new();

    if data.is_empty() {
        errors.push("No file provided".to_string());
        return errors;
    }

    if data.len() > MAX_FILE_SIZE {
        errors.push(format!(
            "File size exceeds maximum limit of {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        ));
    }

    if !has_allowed_extension(filename) {
        errors.push(format!(
            "File type not allowed. Allowed types: {}",
            ALLOWED_EXTENSIONS.join(", ")
        ));
    }

    let head = &data[..data.len().min(SNIFF_LEN)];
    if image::guess_format(head).is_err() {
        errors.push("File must be an image".to_string());
    }

    errors
}

fn has_allowed_extension(filename: Option<&str>) -> bool {
    let Some(name) = filename else {
        return false;
    };
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

/// Normalize an accepted image for storage: decode, force RGB, downscale to
/// fit within 800x800 preserving aspect ratio (never upscale), and re-encode
/// as quality-85 JPEG.
pub fn optimize_image(data: &[u8]) -> Result<Vec<u8>, UploadError> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| UploadError::Image(format!("Failed to read image: {e}")))?
        .decode()
        .map_err(|e| UploadError::Image(format!("Failed to decode image: {e}")))?;

    let img = if img.width() > MAX_DIMENSION || img.height() > MAX_DIMENSION {
        img.thumbnail(MAX_DIMENSION, MAX_DIMENSION)
    } else {
        img
    };

    let rgb = img.to_rgb8();

    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|e| UploadError::Image(format!("Failed to encode image: {e}")))?;

    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn accepts_valid_png() {
        assert!(validate_upload(Some("photo.png"), &png_bytes(10, 10)).is_empty());
        assert!(validate_upload(Some("PHOTO.JPG"), &png_bytes(10, 10)).is_empty());
    }

    #[test]
    fn rejects_empty_file() {
        assert_eq!(validate_upload(Some("photo.png"), &[]), vec!["No file provided"]);
    }

    #[test]
    fn rejects_oversized_file() {
        let data = vec![0u8; MAX_FILE_SIZE + 1];
        let errors = validate_upload(Some("photo.png"), &data);
        assert!(errors
            .iter()
            .any(|e| e == "File size exceeds maximum limit of 5MB"));
    }

    #[test]
    fn rejects_disallowed_extension() {
        let data = png_bytes(10, 10);
        for name in ["photo.bmp", "photo", "photo.png.exe"] {
            let errors = validate_upload(Some(name), &data);
            assert!(
                errors.iter().any(|e| e.starts_with("File type not allowed")),
                "expected extension rejection for {name:?}"
            );
        }
        assert!(validate_upload(None, &data)
            .iter()
            .any(|e| e.starts_with("File type not allowed")));
    }

    #[test]
    fn rejects_mislabeled_content() {
        let errors = validate_upload(Some("photo.png"), b"this is not an image at all");
        assert_eq!(errors, vec!["File must be an image"]);
    }

    #[test]
    fn downscales_to_fit() {
        let out = optimize_image(&png_bytes(1000, 500)).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 400));
    }

    #[test]
    fn never_upscales() {
        let out = optimize_image(&png_bytes(100, 50)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    #[test]
    fn converts_rgba_to_rgb_jpeg() {
        let img = RgbaImage::from_pixel(20, 20, Rgba([0, 120, 200, 128]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();

        let out = optimize_image(&buf.into_inner()).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn garbage_bytes_fail_optimization() {
        assert!(optimize_image(b"definitely not an image").is_err());
    }
}
