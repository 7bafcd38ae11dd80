// Tab-separated result rows, one per analysed image.

use trapscan_common::{SizeClasses, SizeSummary};

/// Header row matching the configured size scheme.
pub fn header(classes: SizeClasses) -> String {
    let mut columns = vec!["File", "Total number of insects", "Average area"];
    columns.extend_from_slice(classes.bucket_labels());
    columns.join("\t")
}

/// Measurement row: filename, total count, average area in mm², then one
/// count per bucket in ascending size order.
pub fn format_row(file: &str, summary: &SizeSummary) -> String {
    let mut row = format!(
        "{}\t{}\t{:.2}",
        file, summary.total, summary.average_area_mm2
    );
    for count in &summary.bucket_counts {
        row.push('\t');
        row.push_str(&count.to_string());
    }
    row
}

/// Row emitted in place of measurements when an image could not be analysed.
pub fn failure_row(file: &str) -> String {
    format!("Analysis not possible of file {file}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use trapscan_common::{classify, ContourProperties};

    fn fixture() -> Vec<ContourProperties> {
        [2.0, 5.0, 20.0, 30.0, 50.0]
            .iter()
            .map(|&len| ContourProperties::new(16.0, len))
            .collect()
    }

    #[test]
    fn detailed_row_lists_all_five_buckets() {
        let summary = classify(&fixture(), SizeClasses::Detailed);
        let row = format_row("trap_a.jpg", &summary);
        assert_eq!(row, "trap_a.jpg\t5\t1.00\t1\t1\t1\t1\t1");
    }

    #[test]
    fn normal_row_reports_only_in_range_insects() {
        let summary = classify(&fixture(), SizeClasses::Normal);
        let row = format_row("trap_a.jpg", &summary);
        assert_eq!(row, "trap_a.jpg\t3\t1.00\t1\t2\t0");
    }

    #[test]
    fn header_matches_scheme_width() {
        let normal = header(SizeClasses::Normal);
        assert_eq!(normal.split('\t').count(), 6);
        assert!(normal.starts_with("File\tTotal number of insects\tAverage area\t"));

        let detailed = header(SizeClasses::Detailed);
        assert_eq!(detailed.split('\t').count(), 8);
    }

    #[test]
    fn failure_row_names_the_file() {
        assert_eq!(
            failure_row("blurry.jpg"),
            "Analysis not possible of file blurry.jpg"
        );
    }
}
