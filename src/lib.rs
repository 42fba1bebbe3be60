// cargo watch -x 'fmt' -x 'test'

//! Best-fit CIDR block allocation from a master range.
//!
//! The caller supplies the master range, the full set of already-used
//! ranges and a desired prefix length; the allocator returns aligned,
//! non-overlapping blocks carved from the smallest gaps that fit. No
//! allocation state is retained between calls.

pub mod allocator;
pub mod error;
pub mod models;
pub mod output;
pub mod request;

pub use allocator::Allocator;
pub use error::AllocationError;

use models::Ipv4;

/// Allocate `count` CIDR blocks of `prefix_length` from `master_cidr`,
/// avoiding `used_cidrs`.
///
/// Blocks are returned in allocation order: each iteration re-runs
/// best-fit over the updated used set, so the order is
/// smallest-remaining-gap-first, not address order.
pub fn allocate(
    master_cidr: &str,
    used_cidrs: &[String],
    prefix_length: u8,
    count: usize,
) -> Result<Vec<String>, AllocationError> {
    if count < 1 {
        return Err(AllocationError::InvalidCount {
            count: count as i64,
        });
    }

    let allocator = Allocator::new(master_cidr, used_cidrs, prefix_length)?;
    let allocated = allocator.allocate_multiple(count)?;

    Ok(allocated.iter().map(Ipv4::to_string).collect())
}

/// Allocate a single CIDR block of `prefix_length` from `master_cidr`,
/// avoiding `used_cidrs`.
pub fn allocate_one(
    master_cidr: &str,
    used_cidrs: &[String],
    prefix_length: u8,
) -> Result<String, AllocationError> {
    let allocator = Allocator::new(master_cidr, used_cidrs, prefix_length)?;
    let block = allocator.allocate_single()?;

    Ok(block.to_string())
}
