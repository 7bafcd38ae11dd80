use std::path::Path;

use anyhow::{bail, Context, Result};
use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::{imgcodecs, imgproc};

/// Decode an image as BGR. Unreadable or empty files are errors.
pub fn read_image(path: &Path) -> Result<Mat> {
    let name = path
        .to_str()
        .with_context(|| format!("non-UTF-8 image path {}", path.display()))?;
    let img = imgcodecs::imread(name, imgcodecs::IMREAD_COLOR)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if img.empty() {
        bail!("could not decode {}", path.display());
    }
    Ok(img)
}

/// Downscale so that height + width does not exceed `max_perimeter` px.
/// Images already small enough are returned unchanged.
pub fn shrink_to_perimeter(img: &Mat, max_perimeter: i32) -> Result<Mat> {
    let size = img.size()?;
    let perimeter = size.width + size.height;
    if perimeter <= max_perimeter {
        return Ok(img.clone());
    }
    scale_by(img, f64::from(max_perimeter) / f64::from(perimeter))
}

/// Downscale so that the larger side does not exceed `max_dim` px.
pub fn shrink_to_max_dim(img: &Mat, max_dim: f64) -> Result<Mat> {
    let size = img.size()?;
    let largest = f64::from(size.width.max(size.height));
    if largest <= max_dim {
        return Ok(img.clone());
    }
    scale_by(img, max_dim / largest)
}

fn scale_by(img: &Mat, factor: f64) -> Result<Mat> {
    let mut resized = Mat::default();
    imgproc::resize(
        img,
        &mut resized,
        Size::default(),
        factor,
        factor,
        imgproc::INTER_LINEAR,
    )?;
    Ok(resized)
}
