//! Allocation error types.

use crate::models::{IpRange, Ipv4};
use itertools::Itertools;
use thiserror::Error;

/// Failure modes of a CIDR allocation call.
///
/// Every failure is deterministic for a given input set, so none of these
/// warrant a retry with unchanged inputs.
#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("Invalid CIDR range '{input}': {reason}")]
    InvalidRange { input: String, reason: String },

    #[error("Invalid prefix length /{requested}: {reason}")]
    InvalidPrefix { requested: u8, reason: String },

    #[error("count must be at least 1, got {count}")]
    InvalidCount { count: i64 },

    #[error("No available address space in master CIDR {master}. All addresses are allocated.")]
    NoCapacity { master: Ipv4 },

    #[error(
        "Cannot allocate /{prefix_length} network in {master}. No suitable gaps found. \
         Need {needed} contiguous addresses. Available gaps: [{}]",
        format_gaps(.gaps)
    )]
    NoFit {
        master: Ipv4,
        prefix_length: u8,
        needed: u64,
        gaps: Vec<IpRange>,
    },

    #[error("Could only allocate {allocated} of {requested} requested CIDR blocks. Error: {source}")]
    PartialAllocation {
        allocated: usize,
        requested: usize,
        #[source]
        source: Box<AllocationError>,
    },
}

fn format_gaps(gaps: &[IpRange]) -> String {
    gaps.iter().map(|gap| gap.to_string()).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_message() {
        let error = AllocationError::InvalidRange {
            input: "10.0.0/24".to_string(),
            reason: "Invalid address 10.0.0".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid CIDR range '10.0.0/24': Invalid address 10.0.0"
        );
    }

    #[test]
    fn test_invalid_prefix_message() {
        let error = AllocationError::InvalidPrefix {
            requested: 8,
            reason: "smaller than master CIDR prefix length /12".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid prefix length /8: smaller than master CIDR prefix length /12"
        );
    }

    #[test]
    fn test_invalid_count_message() {
        let error = AllocationError::InvalidCount { count: -3 };
        assert_eq!(error.to_string(), "count must be at least 1, got -3");
    }

    #[test]
    fn test_no_capacity_message() {
        let error = AllocationError::NoCapacity {
            master: Ipv4::new("172.16.0.0/24").unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "No available address space in master CIDR 172.16.0.0/24. All addresses are allocated."
        );
    }

    #[test]
    fn test_no_fit_lists_every_gap() {
        let error = AllocationError::NoFit {
            master: Ipv4::new("172.16.0.0/24").unwrap(),
            prefix_length: 25,
            needed: 128,
            gaps: vec![
                IpRange::from(Ipv4::new("172.16.0.64/26").unwrap()),
                IpRange::from(Ipv4::new("172.16.0.240/28").unwrap()),
            ],
        };
        assert_eq!(
            error.to_string(),
            "Cannot allocate /25 network in 172.16.0.0/24. No suitable gaps found. \
             Need 128 contiguous addresses. Available gaps: \
             [172.16.0.64-172.16.0.127 (64 addresses), 172.16.0.240-172.16.0.255 (16 addresses)]"
        );
    }

    #[test]
    fn test_partial_allocation_wraps_cause() {
        let error = AllocationError::PartialAllocation {
            allocated: 2,
            requested: 5,
            source: Box::new(AllocationError::NoCapacity {
                master: Ipv4::new("10.0.0.0/28").unwrap(),
            }),
        };
        let message = error.to_string();
        assert!(message.starts_with("Could only allocate 2 of 5 requested CIDR blocks."));
        assert!(message.contains("No available address space in master CIDR 10.0.0.0/28"));

        let source = std::error::Error::source(&error).expect("source should be set");
        assert!(source.to_string().contains("10.0.0.0/28"));
    }
}
