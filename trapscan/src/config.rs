// Typed run configuration, loaded once from sticky-traps.yml and passed by
// parameter to every component that needs it.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Settings for one analysis run.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Report five detailed size classes instead of the normal three.
    pub detailed_size_classes: bool,
    pub trap_dimensions: TrapDimensions,
    pub trap_colours: TrapColours,
    /// Crop the trap borders away before measuring.
    pub edges_to_crop: bool,
    pub cropping_width: CroppingWidth,
}

/// Physical trap size in millimetres.
#[derive(Debug, Clone, Deserialize)]
pub struct TrapDimensions {
    #[serde(rename = "Trap_width")]
    pub width_mm: f64,
    #[serde(rename = "Trap_height")]
    pub height_mm: f64,
}

/// HSV bounds of the trap colour, used to find the trap in the photograph.
/// Hue is on the OpenCV 0-179 scale, saturation and value 0-255.
#[derive(Debug, Clone, Deserialize)]
pub struct TrapColours {
    pub trap_lower: [f64; 3],
    pub trap_upper: [f64; 3],
}

/// Border widths to crop, in millimetres per edge.
#[derive(Debug, Clone, Deserialize)]
pub struct CroppingWidth {
    pub along_short_edges: f64,
    pub along_long_edges: f64,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&contents)
        .with_context(|| format!("cannot parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.trap_dimensions.width_mm <= 0.0 || self.trap_dimensions.height_mm <= 0.0 {
            bail!("trap dimensions must be positive");
        }
        let lower = &self.trap_colours.trap_lower;
        let upper = &self.trap_colours.trap_upper;
        for channel in 0..3 {
            let max = if channel == 0 { 179.0 } else { 255.0 };
            if lower[channel] < 0.0 || upper[channel] > max {
                bail!("HSV channel {} must lie within 0..={}", channel, max);
            }
            if lower[channel] > upper[channel] {
                bail!("lower HSV bound exceeds upper bound in channel {}", channel);
            }
        }
        if self.cropping_width.along_short_edges < 0.0
            || self.cropping_width.along_long_edges < 0.0
        {
            bail!("cropping widths must not be negative");
        }
        Ok(())
    }
}
