const KB: u64 = 1000;
const MB: u64 = KB * 1000;
const GB: u64 = MB * 1000;

/// Format a byte count with decimal (1000-based) units
///
/// Precision shrinks as the magnitude grows: two decimals up to 10 MB, one decimal
/// below 1 GB, then two decimals again for GB and TB.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "display precision is far coarser than f64")]
pub fn format_size(bytes: u64) -> String {
    let value = bytes as f64;
    match bytes {
        0 => "0 B".to_string(),
        b if b < KB => format!("{b} B"),
        b if b < MB => format!("{:.2} KB", value / KB as f64),
        b if b < 10 * MB => format!("{:.2} MB", value / MB as f64),
        b if b < GB => format!("{:.1} MB", value / MB as f64),
        b if b < GB * 1000 => format!("{:.2} GB", value / GB as f64),
        _ => format!("{:.2} TB", value / (GB * 1000) as f64),
    }
}
