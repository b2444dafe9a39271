use std::path::Path;

use image::{ImageBuffer, ImageFormat, Luma, Rgb, RgbImage};
use ndarray::Array2;

use crate::consts::{LABEL_HUE_STEP, LABEL_SATURATION, LABEL_VALUE, MAX_LABEL_16BIT};
use crate::error::{BasinError, Result};

/// Load a grayscale image as intensities in [0.0, 1.0], shape = (height, width).
pub fn load_intensity(path: &Path) -> Result<Array2<f32>> {
    let gray = image::open(path)?.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = gray.get_pixel(col as u32, row as u32);
            data[[row, col]] = pixel.0[0] as f32 / 65535.0;
        }
    }

    Ok(data)
}

/// Load a marker or label image: each pixel's 16-bit gray value is its label.
///
/// 8-bit images are widened without rescaling, so an 8-bit marker value of 3
/// stays label 3.
pub fn load_labels(path: &Path) -> Result<Array2<u32>> {
    let img = image::open(path)?;
    let (w, h) = (img.width() as usize, img.height() as usize);
    let mut data = Array2::<u32>::zeros((h, w));

    if img.color().bytes_per_pixel() / img.color().channel_count() == 1 {
        let gray = img.to_luma8();
        for ((row, col), label) in data.indexed_iter_mut() {
            *label = gray.get_pixel(col as u32, row as u32).0[0] as u32;
        }
    } else {
        let gray = img.to_luma16();
        for ((row, col), label) in data.indexed_iter_mut() {
            *label = gray.get_pixel(col as u32, row as u32).0[0] as u32;
        }
    }

    Ok(data)
}

/// Load a mask image: nonzero pixels are inside the mask.
pub fn load_mask(path: &Path) -> Result<Array2<bool>> {
    Ok(load_labels(path)?.mapv(|v| v > 0))
}

/// Save a label grid as a 16-bit grayscale image (TIFF or PNG by extension).
pub fn save_labels(labels: &Array2<u32>, path: &Path) -> Result<()> {
    let (h, w) = labels.dim();
    let mut pixels: Vec<u16> = Vec::with_capacity(h * w);
    for &label in labels.iter() {
        if label > MAX_LABEL_16BIT {
            return Err(BasinError::InvalidParameter(format!(
                "label {label} does not fit in a 16-bit image"
            )));
        }
        pixels.push(label as u16);
    }

    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| BasinError::InvalidParameter("label buffer size mismatch".into()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => img.save_with_format(path, ImageFormat::Png)?,
        _ => img.save_with_format(path, ImageFormat::Tiff)?,
    }
    Ok(())
}

/// Render a label grid as RGB with a stable color per label; 0 stays black.
pub fn render_labels(labels: &Array2<u32>) -> RgbImage {
    let (h, w) = labels.dim();
    let mut img = RgbImage::new(w as u32, h as u32);
    for ((row, col), &label) in labels.indexed_iter() {
        img.put_pixel(col as u32, row as u32, label_color(label));
    }
    img
}

/// Save the color rendering of a label grid as PNG.
pub fn save_label_colors(labels: &Array2<u32>, path: &Path) -> Result<()> {
    render_labels(labels).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Stable color for a label: golden-ratio hue steps at fixed saturation/value.
pub fn label_color(label: u32) -> Rgb<u8> {
    if label == 0 {
        return Rgb([0, 0, 0]);
    }
    let hue = (label as f32 * LABEL_HUE_STEP).fract() * 6.0;
    let chroma = LABEL_VALUE * LABEL_SATURATION;
    let x = chroma * (1.0 - ((hue % 2.0) - 1.0).abs());
    let (r, g, b) = match hue as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = LABEL_VALUE - chroma;
    let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}
