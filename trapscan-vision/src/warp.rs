use anyhow::{Context, Result};
use opencv::core::{self, Mat, Point, Point2f, Scalar, Size, Vector};
use opencv::{calib3d, imgproc};

use crate::contour::largest_contour;

/// Approximate the outline of a binary mask to a quadrilateral.
///
/// The largest external contour is reduced with approxPolyDP at 10% of its
/// perimeter; anything that does not reduce to exactly four vertices yields
/// `None` (no usable trap outline in this image).
pub fn find_corners(mask: &Mat) -> Result<Option<[Point2f; 4]>> {
    let contour = match largest_contour(mask, imgproc::RETR_EXTERNAL, imgproc::CHAIN_APPROX_SIMPLE)?
    {
        Some(contour) => contour,
        None => return Ok(None),
    };

    let perimeter = imgproc::arc_length(&contour, true)?;
    let mut approx = Vector::<Point>::new();
    imgproc::approx_poly_dp(&contour, &mut approx, 0.1 * perimeter, true)?;
    if approx.len() != 4 {
        return Ok(None);
    }

    let mut corners = [Point2f::default(); 4];
    for (i, p) in approx.iter().enumerate() {
        corners[i] = Point2f::new(p.x as f32, p.y as f32);
    }
    Ok(Some(corners))
}

/// Order four corner points geometrically: [top-left, top-right,
/// bottom-left, bottom-right]. In image coordinates the top-left corner
/// minimises x+y, the bottom-right maximises it, and x-y separates the
/// remaining two.
pub fn order_corners(corners: &[Point2f; 4]) -> [Point2f; 4] {
    let sum = |p: &Point2f| p.x + p.y;
    let diff = |p: &Point2f| p.x - p.y;

    let tl = *corners.iter().min_by(|a, b| sum(a).total_cmp(&sum(b))).unwrap();
    let br = *corners.iter().max_by(|a, b| sum(a).total_cmp(&sum(b))).unwrap();
    let tr = *corners.iter().max_by(|a, b| diff(a).total_cmp(&diff(b))).unwrap();
    let bl = *corners.iter().min_by(|a, b| diff(a).total_cmp(&diff(b))).unwrap();

    [tl, tr, bl, br]
}

/// Warp the quadrilateral spanned by `corners` (ordered [tl, tr, bl, br])
/// onto a `dst_size` canvas.
pub fn perspective_transform(img: &Mat, corners: &[Point2f; 4], dst_size: Size) -> Result<Mat> {
    let src: Vector<Point2f> = corners.iter().copied().collect();
    let dst: Vector<Point2f> = [
        Point2f::new(0.0, 0.0),
        Point2f::new(dst_size.width as f32, 0.0),
        Point2f::new(0.0, dst_size.height as f32),
        Point2f::new(dst_size.width as f32, dst_size.height as f32),
    ]
    .into_iter()
    .collect();

    let homography = calib3d::find_homography(&src, &dst, &mut Mat::default(), 0, 3.0)
        .context("failed to compute homography from trap corners")?;

    let mut warped = Mat::default();
    imgproc::warp_perspective(
        img,
        &mut warped,
        &homography,
        dst_size,
        imgproc::INTER_LINEAR,
        core::BORDER_CONSTANT,
        Scalar::default(),
    )?;
    Ok(warped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_shuffled_rectangle_corners() {
        let shuffled = [
            Point2f::new(100.0, 0.0),
            Point2f::new(0.0, 50.0),
            Point2f::new(100.0, 50.0),
            Point2f::new(0.0, 0.0),
        ];
        let ordered = order_corners(&shuffled);
        assert_eq!(ordered[0], Point2f::new(0.0, 0.0));
        assert_eq!(ordered[1], Point2f::new(100.0, 0.0));
        assert_eq!(ordered[2], Point2f::new(0.0, 50.0));
        assert_eq!(ordered[3], Point2f::new(100.0, 50.0));
    }

    #[test]
    fn ordering_handles_skewed_quadrilaterals() {
        // A perspective-distorted trap photo: corners off-axis.
        let skewed = [
            Point2f::new(95.0, 12.0),
            Point2f::new(8.0, 55.0),
            Point2f::new(5.0, 10.0),
            Point2f::new(99.0, 60.0),
        ];
        let ordered = order_corners(&skewed);
        assert_eq!(ordered[0], Point2f::new(5.0, 10.0));
        assert_eq!(ordered[1], Point2f::new(95.0, 12.0));
        assert_eq!(ordered[2], Point2f::new(8.0, 55.0));
        assert_eq!(ordered[3], Point2f::new(99.0, 60.0));
    }
}
