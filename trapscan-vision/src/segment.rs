use anyhow::{bail, Result};
use opencv::core::{self, Mat, Rect, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

/// GrabCut foreground/background labelling, seeded with a rectangle `margin`
/// pixels inside the image borders. Returns the raw 4-way label mask
/// (GC_BGD, GC_FGD, GC_PR_BGD, GC_PR_FGD).
pub fn segment(img: &Mat, iterations: i32, margin: i32) -> Result<Mat> {
    let size = img.size()?;
    if margin < 0 || 2 * margin >= size.width || 2 * margin >= size.height {
        bail!(
            "margin {} leaves no foreground rectangle in a {}x{} image",
            margin,
            size.width,
            size.height
        );
    }

    let rect = Rect::new(
        margin,
        margin,
        size.width - 2 * margin,
        size.height - 2 * margin,
    );
    let mut labels = Mat::zeros(size.height, size.width, core::CV_8UC1)?.to_mat()?;
    let mut bgd_model = Mat::default();
    let mut fgd_model = Mat::default();
    imgproc::grab_cut(
        img,
        &mut labels,
        rect,
        &mut bgd_model,
        &mut fgd_model,
        iterations,
        imgproc::GC_INIT_WITH_RECT,
    )?;
    Ok(labels)
}

/// Collapse a GrabCut label mask to a binary mask: certain and probable
/// foreground become 255, everything else 0.
pub fn foreground_mask(labels: &Mat) -> Result<Mat> {
    let mut sure = Mat::default();
    core::compare(
        labels,
        &Scalar::all(f64::from(imgproc::GC_FGD)),
        &mut sure,
        core::CMP_EQ,
    )?;
    let mut probable = Mat::default();
    core::compare(
        labels,
        &Scalar::all(f64::from(imgproc::GC_PR_FGD)),
        &mut probable,
        core::CMP_EQ,
    )?;
    let mut mask = Mat::default();
    core::bitwise_or(&sure, &probable, &mut mask, &core::no_array())?;
    Ok(mask)
}

/// Binary mask of the pixels whose HSV value lies in `[lower, upper]`.
pub fn hsv_threshold(img_bgr: &Mat, lower: Scalar, upper: Scalar) -> Result<Mat> {
    let mut hsv = Mat::default();
    imgproc::cvt_color(img_bgr, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;
    let mut mask = Mat::default();
    core::in_range(&hsv, &lower, &upper, &mut mask)?;
    Ok(mask)
}
