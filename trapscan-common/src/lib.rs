// Shared building blocks for the trapscan tools: contour property records,
// size-class schemes, and image directory discovery.

mod scan;
mod size_classes;
mod types;

pub use scan::find_images;
pub use size_classes::{classify, SizeClasses, SizeSummary, PIXELS_PER_MM};
pub use types::ContourProperties;
