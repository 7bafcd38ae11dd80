// Sticky-trap analysis on the command line: reads sticky-traps.yml, scans
// the images directory, and prints one tab-separated result row per photo.

mod config;
mod pipeline;
mod report;

use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, error, info, warn};
use opencv::core::Mat;

use trapscan_common::{classify, find_images, SizeClasses, SizeSummary};
use trapscan_vision as vision;

use crate::config::Config;

const CONFIG_PATH: &str = "sticky-traps.yml";
const IMAGE_DIR: &str = "images";

/// Ingest limit: photographs are shrunk until height + width fits.
const MAX_PERIMETER: i32 = 1000;

fn main() -> Result<()> {
    env_logger::init();

    let config = config::load_config(Path::new(CONFIG_PATH))?;
    let classes = SizeClasses::from_detailed_flag(config.detailed_size_classes);

    let images =
        find_images(Path::new(IMAGE_DIR)).with_context(|| format!("cannot open {IMAGE_DIR}"))?;
    if images.is_empty() {
        bail!("no images found in {IMAGE_DIR}");
    }
    info!("analysing {} image(s) from {IMAGE_DIR}", images.len());

    println!("{}", report::header(classes));

    let mut annotated: Vec<Mat> = Vec::new();
    for path in &images {
        let name = path
            .strip_prefix(IMAGE_DIR)
            .unwrap_or(path)
            .display()
            .to_string();

        let img = match vision::read_image(path)
            .and_then(|img| vision::shrink_to_perimeter(&img, MAX_PERIMETER))
        {
            Ok(img) => img,
            Err(err) => {
                error!("skipping {name}: {err:#}");
                continue;
            }
        };

        match analyse(&img, &config, classes, &mut annotated) {
            Ok(summary) => println!("{}", report::format_row(&name, &summary)),
            Err(err) => {
                warn!("{name}: {err:#}");
                println!("{}", report::failure_row(&name));
            }
        }
    }

    debug!(
        "holding {} annotated overlay(s) for inspection",
        annotated.len()
    );
    Ok(())
}

/// Measure one decoded photograph. Errors cover every per-image failure:
/// no trap outline, warp failure, and traps without measurable contours.
fn analyse(
    img: &Mat,
    config: &Config,
    classes: SizeClasses,
    annotated: &mut Vec<Mat>,
) -> Result<SizeSummary> {
    let contours = pipeline::find_insects(img, config, annotated)?;
    let properties = vision::contour_properties(&contours)?;
    if properties.is_empty() {
        bail!("no measurable contours on the trap");
    }
    Ok(classify(&properties, classes))
}
