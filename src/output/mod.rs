// Output formatting — terminal display and report generation.

pub mod markdown;
pub mod terminal;

/// Render `count` as a bar of `#` scaled so that `peak` fills `width` columns.
///
/// Non-zero counts always get at least one column so small buckets stay visible.
pub fn bar(count: usize, peak: usize, width: usize) -> String {
    if count == 0 || peak == 0 {
        return String::new();
    }
    let len = (count * width).div_ceil(peak).clamp(1, width);
    "#".repeat(len)
}
