use serde::{Deserialize, Serialize};

/// Measured properties of one detected contour.
///
/// Both values are in pixel units at the working scale of 4 pixels/mm
/// established by the perspective-correction step: `area` in px²,
/// `major_axis_length` (the longer axis of the fitted ellipse) in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourProperties {
    pub area: f64,
    pub major_axis_length: f64,
}

impl ContourProperties {
    pub fn new(area: f64, major_axis_length: f64) -> Self {
        Self {
            area,
            major_axis_length,
        }
    }
}
