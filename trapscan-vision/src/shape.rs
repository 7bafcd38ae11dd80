use anyhow::{bail, Result};
use opencv::core::{Point, Vector};
use opencv::imgproc;

/// Radial shape descriptor: for each of 360 degrees, the contour points hit
/// by a ray from the centroid at that degree. Returns the per-degree sets
/// and the centroid.
///
/// `rotation` shifts the angular origin, so that bin 0 lines up with the
/// object's own orientation (typically the fitted-ellipse angle). A point's
/// bin is the rounded angle of the centroid-to-point ray; with a dense
/// contour (CHAIN_APPROX_NONE) this gives every degree its intersection set.
pub fn shape_360(contour: &Vector<Point>, rotation: i32) -> Result<(Vec<Vec<Point>>, Point)> {
    let moments = imgproc::moments(contour, false)?;
    if moments.m00 == 0.0 {
        bail!("contour encloses no area, centroid undefined");
    }
    let cx = moments.m10 / moments.m00;
    let cy = moments.m01 / moments.m00;
    let center = Point::new(cx.round() as i32, cy.round() as i32);

    let mut bins: Vec<Vec<Point>> = vec![Vec::new(); 360];
    for point in contour.iter() {
        let dx = f64::from(point.x) - cx;
        let dy = f64::from(point.y) - cy;
        if dx == 0.0 && dy == 0.0 {
            continue;
        }
        let degrees = dy.atan2(dx).to_degrees() - f64::from(rotation);
        let bin = (degrees.rem_euclid(360.0).round() as usize) % 360;
        bins[bin].push(point);
    }

    Ok((bins, center))
}

/// The two most distant points of a set, or `None` when fewer than two
/// points are available.
pub fn extreme_points(points: &[Point]) -> Option<(Point, Point)> {
    if points.len() < 2 {
        return None;
    }
    let mut best = (points[0], points[1]);
    let mut best_dist = -1.0;
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i + 1..] {
            let dx = f64::from(a.x - b.x);
            let dy = f64::from(a.y - b.y);
            let dist = dx * dx + dy * dy;
            if dist > best_dist {
                best_dist = dist;
                best = (a, b);
            }
        }
    }
    Some(best)
}

/// Synthetic segment through `center` at `angle_deg`, extending `radius`
/// pixels to either side. Stand-in line for angles where the contour has no
/// intersection points.
pub fn angled_line(center: Point, angle_deg: i32, radius: i32) -> (Point, Point) {
    let theta = f64::from(angle_deg).to_radians();
    let dx = (theta.cos() * f64::from(radius)).round() as i32;
    let dy = (theta.sin() * f64::from(radius)).round() as i32;
    (
        Point::new(center.x - dx, center.y - dy),
        Point::new(center.x + dx, center.y + dy),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vector<Point> {
        Vector::from_iter([
            Point::new(10, 10),
            Point::new(-10, 10),
            Point::new(-10, -10),
            Point::new(10, -10),
        ])
    }

    #[test]
    fn square_corners_bin_at_diagonals() {
        let (bins, center) = shape_360(&square(), 0).unwrap();
        assert_eq!(center, Point::new(0, 0));
        for angle in [45, 135, 225, 315] {
            assert_eq!(bins[angle].len(), 1, "expected one point at {angle}°");
        }
        let filled: usize = bins.iter().map(Vec::len).sum();
        assert_eq!(filled, 4);
        assert!(bins[0].is_empty());
    }

    #[test]
    fn rotation_shifts_the_angular_origin() {
        let (bins, _) = shape_360(&square(), 45).unwrap();
        for angle in [0, 90, 180, 270] {
            assert_eq!(bins[angle].len(), 1, "expected one point at {angle}°");
        }
    }

    #[test]
    fn degenerate_contour_has_no_centroid() {
        let line = Vector::from_iter([Point::new(0, 0), Point::new(5, 0), Point::new(9, 0)]);
        assert!(shape_360(&line, 0).is_err());
    }

    #[test]
    fn extreme_points_picks_the_most_distant_pair() {
        let points = [Point::new(0, 0), Point::new(3, 4), Point::new(10, 0)];
        let (a, b) = extreme_points(&points).unwrap();
        assert_eq!((a, b), (Point::new(0, 0), Point::new(10, 0)));
    }

    #[test]
    fn extreme_points_needs_two_points() {
        assert!(extreme_points(&[]).is_none());
        assert!(extreme_points(&[Point::new(1, 1)]).is_none());
    }

    #[test]
    fn angled_line_at_zero_is_horizontal() {
        let (a, b) = angled_line(Point::new(50, 50), 0, 100);
        assert_eq!(a, Point::new(-50, 50));
        assert_eq!(b, Point::new(150, 50));
    }

    #[test]
    fn angled_line_at_ninety_is_vertical() {
        let (a, b) = angled_line(Point::new(0, 0), 90, 10);
        assert_eq!(a, Point::new(0, -10));
        assert_eq!(b, Point::new(0, 10));
    }
}
