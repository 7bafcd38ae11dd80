// Per-image analysis pipeline: locate the trap by colour, rectify it to the
// working scale of 4 px/mm, and extract the insect contours.

use anyhow::{bail, Context, Result};
use opencv::core::{self, Mat, Point, Rect, Scalar, Size, Vector};
use opencv::imgproc;
use opencv::prelude::*;

use trapscan_common::PIXELS_PER_MM;
use trapscan_vision as vision;

use crate::config::{Config, CroppingWidth};

/// Find the insect contours on one trap photograph. A filled overlay of the
/// detections is pushed onto `annotated` for later inspection.
///
/// Any error means this image has no usable result; the caller reports it
/// and moves on to the next image.
pub fn find_insects(
    img: &Mat,
    config: &Config,
    annotated: &mut Vec<Mat>,
) -> Result<Vector<Vector<Point>>> {
    let lower = channel_scalar(&config.trap_colours.trap_lower);
    let upper = channel_scalar(&config.trap_colours.trap_upper);
    let mask = vision::hsv_threshold(img, lower, upper)?;

    let corners = vision::find_corners(&mask)?
        .context("trap outline does not reduce to four corners")?;
    let ordered = vision::order_corners(&corners);

    let width = (config.trap_dimensions.width_mm * PIXELS_PER_MM).round() as i32;
    let height = (config.trap_dimensions.height_mm * PIXELS_PER_MM).round() as i32;
    let trap = vision::perspective_transform(img, &ordered, Size::new(width, height))?;

    let trap = if config.edges_to_crop {
        crop_edges(&trap, &config.cropping_width)?
    } else {
        trap
    };

    // Channel 2 (red) carries the strongest insect/background contrast on
    // coloured traps.
    let mut red = Mat::default();
    core::extract_channel(&trap, &mut red, 2)?;

    let contours = insect_contours(&red)?;

    let mut overlay = trap.clone();
    imgproc::draw_contours(
        &mut overlay,
        &contours,
        -1,
        Scalar::new(0.0, 0.0, 255.0, 0.0),
        imgproc::FILLED,
        imgproc::LINE_8,
        &Mat::default(),
        0,
        Point::new(0, 0),
    )?;
    annotated.push(overlay);

    Ok(contours)
}

/// Adaptive Gaussian threshold (inverted) followed by tree-mode contour
/// retrieval. The block size and offset are tuned for insects of a few
/// millimetres on an evenly lit trap.
fn insect_contours(channel: &Mat) -> Result<Vector<Vector<Point>>> {
    let mut thresholded = Mat::default();
    imgproc::adaptive_threshold(
        channel,
        &mut thresholded,
        255.0,
        imgproc::ADAPTIVE_THRESH_GAUSSIAN_C,
        imgproc::THRESH_BINARY_INV,
        41,
        22.0,
    )?;
    vision::all_contours(
        &thresholded,
        imgproc::RETR_TREE,
        imgproc::CHAIN_APPROX_SIMPLE,
    )
}

/// Cut the configured border widths off the rectified trap. The margins
/// along the short edges trim vertically, those along the long edges trim
/// horizontally.
fn crop_edges(trap: &Mat, widths: &CroppingWidth) -> Result<Mat> {
    let vertical = (widths.along_short_edges * PIXELS_PER_MM).round() as i32;
    let horizontal = (widths.along_long_edges * PIXELS_PER_MM).round() as i32;
    let size = trap.size()?;
    let width = size.width - 2 * horizontal;
    let height = size.height - 2 * vertical;
    if width <= 0 || height <= 0 {
        bail!(
            "cropping widths {}x{} px leave nothing of a {}x{} px trap",
            horizontal,
            vertical,
            size.width,
            size.height
        );
    }
    Ok(trap
        .roi(Rect::new(horizontal, vertical, width, height))?
        .clone_pointee())
}

fn channel_scalar(triple: &[f64; 3]) -> Scalar {
    Scalar::new(triple[0], triple[1], triple[2], 0.0)
}
