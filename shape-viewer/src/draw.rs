// Overlay drawing for the viewer window.

use anyhow::Result;
use opencv::core::{Mat, Point, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

use trapscan_vision as vision;

use crate::ShapeView;

// Colours in BGR order.
fn black() -> Scalar {
    Scalar::new(0.0, 0.0, 0.0, 0.0)
}
fn green() -> Scalar {
    Scalar::new(0.0, 255.0, 0.0, 0.0)
}
fn red() -> Scalar {
    Scalar::new(0.0, 0.0, 255.0, 0.0)
}
fn blue() -> Scalar {
    Scalar::new(255.0, 0.0, 0.0, 0.0)
}

/// Mark the centroid and draw the horizontal and vertical axes through it.
pub fn draw_axes(canvas: &mut Mat, center: Point) -> Result<()> {
    let size = canvas.size()?;
    imgproc::circle(canvas, center, 5, green(), imgproc::FILLED, imgproc::LINE_8, 0)?;
    imgproc::line(
        canvas,
        Point::new(0, center.y),
        Point::new(size.width, center.y),
        black(),
        1,
        imgproc::LINE_8,
        0,
    )?;
    imgproc::line(
        canvas,
        Point::new(center.x, 0),
        Point::new(center.x, size.height),
        black(),
        1,
        imgproc::LINE_8,
        0,
    )?;
    Ok(())
}

/// Draw the intersections of `angle` and its 180° opposite, joined by the
/// segment between their two most distant points. When the contour has no
/// intersection at this angle, a synthetic line through the center at
/// `angle + rotation` stands in.
pub fn draw_angle(canvas: &mut Mat, view: &ShapeView, angle: i32) -> Result<()> {
    let main = &view.intersections[angle as usize];
    let opposite = &view.intersections[(angle as usize + 180) % 360];

    let mut joined: Vec<Point> = Vec::with_capacity(main.len() + opposite.len());
    joined.extend_from_slice(main);
    joined.extend_from_slice(opposite);

    let (from, to) = vision::extreme_points(&joined)
        .unwrap_or_else(|| vision::angled_line(view.center, angle + view.rotation, 100));
    imgproc::line(canvas, from, to, green(), 1, imgproc::LINE_8, 0)?;

    for &point in main {
        imgproc::circle(canvas, point, 5, red(), 1, imgproc::LINE_8, 0)?;
    }
    for &point in opposite {
        imgproc::circle(canvas, point, 5, blue(), 1, imgproc::LINE_8, 0)?;
    }
    Ok(())
}
