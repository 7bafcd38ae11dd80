// Interactive demonstration of the radial shape-360 descriptor.
//
// Key bindings: N loads the next image, P the previous one (both wrap),
// Q quits. The Angle trackbar picks the ray whose contour intersections
// are displayed.

mod draw;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};
use opencv::core::{Mat, Point};
use opencv::{highgui, imgproc};

use trapscan_common::find_images;
use trapscan_vision as vision;

const WINDOW: &str = "image";
const KEY_NEXT: i32 = 'n' as i32;
const KEY_PREV: i32 = 'p' as i32;
const KEY_QUIT: i32 = 'q' as i32;

/// Show the rough shape of the main object in each image.
#[derive(Parser, Debug)]
#[command(name = "shape-viewer")]
#[command(about = "Visualize the shape-360 descriptor of the main object", long_about = None)]
struct Args {
    /// Path to the image folder
    path: PathBuf,

    /// Downscale input images whose width or height exceeds N pixels
    #[arg(long, value_name = "N")]
    maxdim: Option<f64>,

    /// Number of segmentation iterations
    #[arg(long, value_name = "N", default_value_t = 5)]
    iters: i32,

    /// Margin of the foreground rectangle from the image edges
    #[arg(long, value_name = "N", default_value_t = 1)]
    margin: i32,
}

/// Everything needed to redraw one processed image.
pub struct ShapeView {
    pub src: Mat,
    /// Contour points per degree of the descriptor.
    pub intersections: Vec<Vec<Point>>,
    pub center: Point,
    /// Fitted-ellipse orientation, degrees.
    pub rotation: i32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let images = find_images(&args.path)
        .with_context(|| format!("cannot open {}", args.path.display()))?;
    if images.is_empty() {
        bail!("no images found in {}", args.path.display());
    }

    highgui::named_window(WINDOW, highgui::WINDOW_AUTOSIZE)?;
    highgui::create_trackbar("Angle", WINDOW, None, 179, None)?;

    let mut index = 0;
    let mut view = load_view(&args, &images[index]);
    let mut angle = highgui::get_trackbar_pos("Angle", WINDOW)?;
    render(&view, angle)?;

    loop {
        match highgui::wait_key(50)? {
            KEY_QUIT => break,
            KEY_NEXT => {
                index = (index + 1) % images.len();
                view = load_view(&args, &images[index]);
                render(&view, angle)?;
            }
            KEY_PREV => {
                index = (index + images.len() - 1) % images.len();
                view = load_view(&args, &images[index]);
                render(&view, angle)?;
            }
            _ => {}
        }

        // The trackbar is polled rather than hooked: redraw when it moved.
        let position = highgui::get_trackbar_pos("Angle", WINDOW)?;
        if position != angle {
            angle = position;
            render(&view, angle)?;
        }
    }

    highgui::destroy_all_windows()?;
    Ok(())
}

/// Process one image, logging and swallowing failures so the viewer keeps
/// running; a `None` view leaves the window contents unchanged.
fn load_view(args: &Args, path: &Path) -> Option<ShapeView> {
    match process_image(args, path) {
        Ok(view) => Some(view),
        Err(err) => {
            error!("skipping {}: {err:#}", path.display());
            None
        }
    }
}

fn process_image(args: &Args, path: &Path) -> Result<ShapeView> {
    info!("processing {}", path.display());

    let mut img = vision::read_image(path)?;
    if let Some(maxdim) = args.maxdim {
        img = vision::shrink_to_max_dim(&img, maxdim)?;
    }

    let labels = vision::segment(&img, args.iters, args.margin)?;
    let mask = vision::foreground_mask(&labels)?;
    let contour =
        vision::largest_contour(&mask, imgproc::RETR_EXTERNAL, imgproc::CHAIN_APPROX_NONE)?
            .context("segmentation produced an empty mask")?;

    let rotation = vision::ellipse_angle(&contour)?;
    let (intersections, center) = vision::shape_360(&contour, rotation)?;

    Ok(ShapeView {
        src: img,
        intersections,
        center,
        rotation,
    })
}

fn render(view: &Option<ShapeView>, angle: i32) -> Result<()> {
    let Some(view) = view else {
        return Ok(());
    };
    let mut canvas = view.src.clone();
    draw::draw_axes(&mut canvas, view.center)?;
    draw::draw_angle(&mut canvas, view, angle)?;
    highgui::imshow(WINDOW, &canvas)?;
    Ok(())
}
