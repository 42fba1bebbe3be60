//! Used-range normalization.
//!
//! Collapses an arbitrary collection of address ranges into the minimal
//! sorted list of disjoint, non-adjacent covered intervals.

use crate::models::IpRange;

/// Merge overlapping or adjacent ranges into contiguous covered intervals.
///
/// Two ranges merge when the next range starts at or before one address
/// past the previous end. Input need not be sorted or disjoint; the
/// result always is, so merging an already-merged list is a no-op.
///
/// # Arguments
/// * `ranges` - The ranges to normalize, in any order
///
/// # Returns
/// Disjoint, non-adjacent intervals sorted by start address
pub fn merge_ranges(ranges: &[IpRange]) -> Vec<IpRange> {
    if ranges.is_empty() {
        return Vec::new();
    }

    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|range| range.start);

    let mut merged = Vec::new();
    let mut current = sorted[0];

    for range in &sorted[1..] {
        if range.start <= current.end + 1 {
            // Overlapping or immediately adjacent
            current.end = current.end.max(range.end);
        } else {
            merged.push(current);
            current = *range;
        }
    }

    merged.push(current);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;

    fn range(cidr: &str) -> IpRange {
        IpRange::from(Ipv4::new(cidr).unwrap())
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_ranges(&[]).is_empty());
    }

    #[test]
    fn test_merge_single() {
        let merged = merge_ranges(&[range("10.0.0.0/24")]);
        assert_eq!(merged, vec![range("10.0.0.0/24")]);
    }

    #[test]
    fn test_merge_overlapping() {
        // 10.0.0.0/23 swallows 10.0.1.0/24
        let merged = merge_ranges(&[range("10.0.0.0/23"), range("10.0.1.0/24")]);
        assert_eq!(merged, vec![range("10.0.0.0/23")]);
    }

    #[test]
    fn test_merge_adjacent() {
        // 172.16.0.0/16 + 172.17.0.0/16 = 172.16.0.0/15 span
        let merged = merge_ranges(&[range("172.16.0.0/16"), range("172.17.0.0/16")]);
        assert_eq!(merged, vec![range("172.16.0.0/15")]);
    }

    #[test]
    fn test_merge_disjoint_stay_split() {
        let merged = merge_ranges(&[range("10.0.0.0/24"), range("10.0.2.0/24")]);
        assert_eq!(merged, vec![range("10.0.0.0/24"), range("10.0.2.0/24")]);
    }

    #[test]
    fn test_merge_unsorted_input() {
        let merged = merge_ranges(&[
            range("10.0.4.0/24"),
            range("10.0.0.0/24"),
            range("10.0.1.0/24"),
        ]);
        assert_eq!(
            merged,
            vec![range("10.0.0.0/23"), range("10.0.4.0/24")],
            "Expected sorted merge of out-of-order input"
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let input = vec![
            range("10.0.0.0/25"),
            range("10.0.0.128/25"),
            range("10.0.3.0/24"),
            range("10.0.3.64/26"),
        ];
        let once = merge_ranges(&input);
        let twice = merge_ranges(&once);
        assert_eq!(once, twice, "Merging a merged list must be a no-op");
        assert_eq!(once, vec![range("10.0.0.0/24"), range("10.0.3.0/24")]);
    }

    #[test]
    fn test_merge_single_address_gap_stays_open() {
        // One free address between the two ranges, so no merge
        let a = IpRange::new(0, 9);
        let b = IpRange::new(11, 20);
        assert_eq!(merge_ranges(&[a, b]), vec![a, b]);

        // Directly adjacent merges
        let c = IpRange::new(10, 20);
        assert_eq!(merge_ranges(&[a, c]), vec![IpRange::new(0, 20)]);
    }
}
