use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use log::debug;

use crate::error::Result;
use crate::layout::Rotation;

/// Decode a symbol image, shrink it to fit a `size_mm` square and rotate it.
///
/// Images already smaller than the target are left at their native size. The
/// returned buffer is owned by the caller and released once it has been drawn.
pub fn transform_symbol(
    path: &Path,
    size_mm: f32,
    rotation: Rotation,
    px_per_mm: f32,
) -> Result<RgbaImage> {
    let source = image::open(path)?;
    let target = target_px(size_mm, px_per_mm);
    let fitted = fit(source, target);
    let rotated = rotate(fitted, rotation);
    debug!(
        "rasterised {} to {}x{} px, rotated {}°",
        path.display(),
        rotated.width(),
        rotated.height(),
        rotation.degrees()
    );
    Ok(rotated.into_rgba8())
}

fn target_px(size_mm: f32, px_per_mm: f32) -> u32 {
    (size_mm * px_per_mm).round().max(1.0) as u32
}

fn fit(image: DynamicImage, target: u32) -> DynamicImage {
    if image.width() <= target && image.height() <= target {
        return image;
    }
    // resize keeps the aspect ratio and bounds both edges by `target`
    image.resize(target, target, FilterType::Lanczos3)
}

fn rotate(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::None => image,
        Rotation::Quarter => image.rotate90(),
        Rotation::Half => image.rotate180(),
        Rotation::ThreeQuarter => image.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use pretty_assertions::assert_eq;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn large_images_are_fitted_and_rotated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 400, 200);
        // 10mm at 10px/mm -> 100px box
        let out = transform_symbol(&path, 10.0, Rotation::None, 10.0).unwrap();
        assert_eq!(out.dimensions(), (100, 50));
        let out = transform_symbol(&path, 10.0, Rotation::Quarter, 10.0).unwrap();
        assert_eq!(out.dimensions(), (50, 100));
        let out = transform_symbol(&path, 10.0, Rotation::Half, 10.0).unwrap();
        assert_eq!(out.dimensions(), (100, 50));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "tiny.png", 20, 30);
        let out = transform_symbol(&path, 10.0, Rotation::ThreeQuarter, 10.0).unwrap();
        assert_eq!(out.dimensions(), (30, 20));
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(transform_symbol(&path, 10.0, Rotation::None, 4.0).is_err());
    }

    #[test]
    fn target_never_collapses_to_zero() {
        assert_eq!(target_px(0.01, 1.0), 1);
        assert_eq!(target_px(10.0, 96.0 / 25.4), 38);
    }
}
