//! Gap finding within the master range.
//!
//! Gaps are the complement of the merged covered intervals inside the
//! master bounds, and the only places an allocation candidate can come from.

use crate::models::IpRange;

/// Find all gaps (unused ranges) in the master range.
///
/// `covered` must already be merged and sorted (see
/// [`merge_ranges`](super::merge_ranges)); every covered interval must
/// overlap the master range. An empty result means the master is fully
/// covered.
///
/// # Arguments
/// * `master` - The bounding range
/// * `covered` - Merged, sorted covered intervals
///
/// # Returns
/// Gaps in ascending address order
pub fn find_gaps(master: &IpRange, covered: &[IpRange]) -> Vec<IpRange> {
    let mut gaps = Vec::new();

    if covered.is_empty() {
        gaps.push(*master);
        return gaps;
    }

    // Gap before the first covered interval
    if covered[0].start > master.start {
        gaps.push(IpRange::new(master.start, covered[0].start - 1));
    }

    // Gaps between consecutive covered intervals
    for pair in covered.windows(2) {
        let gap_start = pair[0].end + 1;
        let gap_end = pair[1].start - 1;
        if gap_start <= gap_end {
            gaps.push(IpRange::new(gap_start, gap_end));
        }
    }

    // Gap after the last covered interval
    let last = covered[covered.len() - 1];
    if last.end < master.end {
        gaps.push(IpRange::new(last.end + 1, master.end));
    }

    gaps
}

/// Find the first properly-aligned block of `block_size` addresses in a gap.
///
/// The block must start on a multiple of its own size and end within the
/// gap. Returns `None` when the gap is too small, or when alignment pushes
/// the block past the gap end even though the raw size would fit.
pub fn aligned_block(gap: &IpRange, block_size: u64) -> Option<IpRange> {
    let aligned_start = if gap.start % block_size == 0 {
        gap.start
    } else {
        (gap.start / block_size + 1) * block_size
    };

    let aligned_end = aligned_start + block_size - 1;

    if aligned_end <= gap.end {
        Some(IpRange::new(aligned_start, aligned_end))
    } else {
        None
    }
}
