use anyhow::{bail, Result};
use opencv::core::{Mat, Point, Vector};
use opencv::imgproc;

use trapscan_common::ContourProperties;

/// All contours of a binary mask, with the given retrieval mode and
/// approximation method.
pub fn all_contours(mask: &Mat, mode: i32, method: i32) -> Result<Vector<Vector<Point>>> {
    let mut contours = Vector::<Vector<Point>>::new();
    imgproc::find_contours(mask, &mut contours, mode, method, Point::new(0, 0))?;
    Ok(contours)
}

/// The largest contour of a binary mask by enclosed area, or `None` when the
/// mask contains nothing.
pub fn largest_contour(mask: &Mat, mode: i32, method: i32) -> Result<Option<Vector<Point>>> {
    let contours = all_contours(mask, mode, method)?;
    let mut best: Option<Vector<Point>> = None;
    let mut best_area = -1.0;
    for contour in contours.iter() {
        let area = imgproc::contour_area(&contour, false)?;
        if area > best_area {
            best_area = area;
            best = Some(contour);
        }
    }
    Ok(best)
}

/// Area and major-axis length for every contour, in pixel units.
pub fn contour_properties(contours: &Vector<Vector<Point>>) -> Result<Vec<ContourProperties>> {
    let mut properties = Vec::with_capacity(contours.len());
    for contour in contours.iter() {
        let area = imgproc::contour_area(&contour, false)?;
        let major = major_axis_length(&contour)?;
        properties.push(ContourProperties::new(area, major));
    }
    Ok(properties)
}

/// Longer axis of the contour's fitted ellipse. Contours too small for an
/// ellipse fit (fewer than five points) fall back to the longer side of the
/// minimum-area rectangle.
fn major_axis_length(contour: &Vector<Point>) -> Result<f64> {
    if contour.len() >= 5 {
        let ellipse = imgproc::fit_ellipse(contour)?;
        Ok(f64::from(ellipse.size.width.max(ellipse.size.height)))
    } else {
        let rect = imgproc::min_area_rect(contour)?;
        Ok(f64::from(rect.size.width.max(rect.size.height)))
    }
}

/// Orientation of the contour's fitted ellipse, in whole degrees.
pub fn ellipse_angle(contour: &Vector<Point>) -> Result<i32> {
    if contour.len() < 5 {
        bail!(
            "ellipse fit needs at least five contour points, got {}",
            contour.len()
        );
    }
    let ellipse = imgproc::fit_ellipse(contour)?;
    Ok(ellipse.angle as i32)
}
