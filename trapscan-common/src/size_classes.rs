use crate::types::ContourProperties;

/// Physical scale of a rectified trap image. The perspective transform maps
/// the trap onto a canvas of 4·width_mm × 4·height_mm pixels, so all length
/// thresholds below are millimetres multiplied by this factor.
pub const PIXELS_PER_MM: f64 = 4.0;

/// Bucket ranges of the normal scheme, half-open `[lower, upper)`, in px.
/// Lengths below 4 px or at 45 px and above fall in no bucket and are left
/// out of the reported total.
const NORMAL_RANGES: [(f64, f64); 3] = [(4.0, 15.0), (15.0, 38.0), (38.0, 45.0)];

/// Bucket ranges of the detailed scheme; together they cover every length.
const DETAILED_RANGES: [(f64, f64); 5] = [
    (0.0, 4.0),
    (4.0, 15.0),
    (15.0, 26.0),
    (26.0, 45.0),
    (45.0, f64::INFINITY),
];

/// Size-classification scheme for measured insects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClasses {
    /// Three buckets.
    Normal,
    /// Five buckets covering the full length range.
    Detailed,
}

impl SizeClasses {
    pub fn from_detailed_flag(detailed: bool) -> Self {
        if detailed {
            SizeClasses::Detailed
        } else {
            SizeClasses::Normal
        }
    }

    /// Bucket boundaries in ascending size order, half-open `[lower, upper)`,
    /// in pixel units.
    pub fn ranges(&self) -> &'static [(f64, f64)] {
        match self {
            SizeClasses::Normal => &NORMAL_RANGES,
            SizeClasses::Detailed => &DETAILED_RANGES,
        }
    }

    /// Column labels for the per-bucket counts, ascending size order.
    pub fn bucket_labels(&self) -> &'static [&'static str] {
        match self {
            SizeClasses::Normal => &["Smaller than 4mm", "Between 4 and 10mm", "Larger than 10mm"],
            SizeClasses::Detailed => &[
                "Between 0 and 1mm",
                "Between 1 and 4mm",
                "Between 4 and 7mm",
                "Between 7 and 12mm",
                "Larger than 12mm",
            ],
        }
    }
}

/// Per-image classification outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSummary {
    /// Sum of the bucket counts. Lengths outside every configured range do
    /// not contribute.
    pub total: usize,
    /// Mean contour area converted to mm².
    pub average_area_mm2: f64,
    /// One count per bucket, ascending size order.
    pub bucket_counts: Vec<usize>,
}

/// Partition the measured major-axis lengths into the scheme's buckets and
/// average the contour areas.
pub fn classify(properties: &[ContourProperties], classes: SizeClasses) -> SizeSummary {
    let ranges = classes.ranges();

    let bucket_counts: Vec<usize> = ranges
        .iter()
        .map(|&(lower, upper)| {
            properties
                .iter()
                .filter(|p| p.major_axis_length >= lower && p.major_axis_length < upper)
                .count()
        })
        .collect();

    let total = bucket_counts.iter().sum();

    let average_area_mm2 = if properties.is_empty() {
        0.0
    } else {
        let mean_px: f64 =
            properties.iter().map(|p| p.area).sum::<f64>() / properties.len() as f64;
        mean_px / (PIXELS_PER_MM * PIXELS_PER_MM)
    };

    SizeSummary {
        total,
        average_area_mm2,
        bucket_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<ContourProperties> {
        [2.0, 5.0, 20.0, 30.0, 50.0]
            .iter()
            .map(|&len| ContourProperties::new(16.0, len))
            .collect()
    }

    #[test]
    fn detailed_scheme_covers_every_length() {
        let summary = classify(&fixture(), SizeClasses::Detailed);
        assert_eq!(summary.bucket_counts, vec![1, 1, 1, 1, 1]);
        assert_eq!(summary.total, 5);
    }

    #[test]
    fn normal_scheme_drops_out_of_range_lengths() {
        let summary = classify(&fixture(), SizeClasses::Normal);
        // 2.0 is below the first bound and 50.0 beyond the last, so only
        // three of the five measurements are counted.
        assert_eq!(summary.bucket_counts, vec![1, 2, 0]);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn average_area_is_mean_over_sixteen() {
        let props = vec![
            ContourProperties::new(16.0, 10.0),
            ContourProperties::new(48.0, 10.0),
        ];
        let summary = classify(&props, SizeClasses::Detailed);
        assert_eq!(summary.average_area_mm2, 2.0);
    }

    #[test]
    fn classification_is_idempotent() {
        let props = fixture();
        let first = classify(&props, SizeClasses::Normal);
        let second = classify(&props, SizeClasses::Normal);
        assert_eq!(first, second);
    }

    #[test]
    fn bucket_boundaries_are_half_open() {
        let props = vec![
            ContourProperties::new(1.0, 4.0),
            ContourProperties::new(1.0, 15.0),
            ContourProperties::new(1.0, 45.0),
        ];
        let summary = classify(&props, SizeClasses::Detailed);
        // Each length lands exactly on a lower bound of its bucket.
        assert_eq!(summary.bucket_counts, vec![0, 1, 1, 0, 1]);
    }

    #[test]
    fn labels_match_bucket_count() {
        for classes in [SizeClasses::Normal, SizeClasses::Detailed] {
            assert_eq!(classes.bucket_labels().len(), classes.ranges().len());
        }
    }
}
