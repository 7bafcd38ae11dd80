// Vision delegate for the trapscan tools.
// Thin wrappers over OpenCV: the tools consume these operations as black
// boxes and treat any error as "no usable result for this image".

mod contour;
mod io;
mod segment;
mod shape;
mod warp;

pub use contour::{all_contours, contour_properties, ellipse_angle, largest_contour};
pub use io::{read_image, shrink_to_max_dim, shrink_to_perimeter};
pub use segment::{foreground_mask, hsv_threshold, segment};
pub use shape::{angled_line, extreme_points, shape_360};
pub use warp::{find_corners, order_corners, perspective_transform};
