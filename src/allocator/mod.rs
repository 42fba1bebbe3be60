//! Best-fit CIDR block allocation.
//!
//! This module contains the allocation core:
//! - [`merge`] - used-range normalization into covered intervals
//! - [`gaps`] - gap computation and per-gap aligned candidates
//! - [`Allocator`] - input validation, best-fit selection and batch allocation

mod gaps;
mod merge;

// Re-export public functions
pub use gaps::{aligned_block, find_gaps};
pub use merge::merge_ranges;

use crate::error::AllocationError;
use crate::models::{block_size, IpRange, Ipv4, MAX_LENGTH};
use std::net::Ipv4Addr;

/// Finds available CIDR blocks inside a master range, preferring the
/// smallest gap that fits to limit address-space fragmentation.
///
/// All inputs are validated once at construction; afterwards every
/// allocation is a pure function of the held state. Batch allocation works
/// on an internal copy of the used set, so a failed batch leaves nothing
/// behind.
#[derive(Debug)]
pub struct Allocator {
    master: Ipv4,
    prefix_length: u8,
    used: Vec<Ipv4>,
}

impl Allocator {
    /// Validate inputs and build an allocator.
    ///
    /// Used ranges that do not overlap the master range are irrelevant
    /// noise and get dropped with a debug log, not an error.
    ///
    /// # Arguments
    /// * `master_cidr` - The master CIDR range, e.g. "172.16.0.0/12"
    /// * `used_cidrs` - CIDR blocks already in use, any prefix lengths
    /// * `prefix_length` - Desired prefix length of the new block(s)
    pub fn new(
        master_cidr: &str,
        used_cidrs: &[String],
        prefix_length: u8,
    ) -> Result<Allocator, AllocationError> {
        let master = Ipv4::new(master_cidr).map_err(|e| AllocationError::InvalidRange {
            input: master_cidr.to_string(),
            reason: e.to_string(),
        })?;

        if prefix_length < master.mask {
            return Err(AllocationError::InvalidPrefix {
                requested: prefix_length,
                reason: format!("smaller than master CIDR prefix length /{}", master.mask),
            });
        }
        if prefix_length > MAX_LENGTH {
            return Err(AllocationError::InvalidPrefix {
                requested: prefix_length,
                reason: format!("must be <= {MAX_LENGTH}"),
            });
        }

        let mut used = Vec::new();
        for cidr in used_cidrs {
            let network = Ipv4::new(cidr).map_err(|e| AllocationError::InvalidRange {
                input: cidr.to_string(),
                reason: e.to_string(),
            })?;
            // Only networks overlapping the master range constrain allocation
            if network.overlaps(&master) {
                used.push(network);
            } else {
                log::debug!("Dropping used range {network}: outside master range {master}");
            }
        }
        used.sort_by_key(|net| net.lo());

        Ok(Allocator {
            master,
            prefix_length,
            used,
        })
    }

    /// The validated master range.
    pub fn master(&self) -> Ipv4 {
        self.master
    }

    /// The used ranges that survived the overlap filter, sorted by start.
    pub fn used_ranges(&self) -> &[Ipv4] {
        &self.used
    }

    /// Find a single available block using best-fit over the used set.
    pub fn allocate_single(&self) -> Result<Ipv4, AllocationError> {
        self.best_fit(&self.used)
    }

    /// Allocate `count` non-overlapping blocks.
    ///
    /// Each successful allocation is inserted into a working copy of the
    /// used set before the next iteration, and gaps are recomputed from
    /// scratch each round. All-or-nothing: a failure after at least one
    /// success aborts the whole call with
    /// [`AllocationError::PartialAllocation`] naming the achieved count.
    pub fn allocate_multiple(&self, count: usize) -> Result<Vec<Ipv4>, AllocationError> {
        if count < 1 {
            return Err(AllocationError::InvalidCount {
                count: count as i64,
            });
        }

        let mut working = self.used.clone();
        let mut allocated: Vec<Ipv4> = Vec::with_capacity(count);

        for _ in 0..count {
            match self.best_fit(&working) {
                Ok(block) => {
                    working.push(block);
                    working.sort_by_key(|net| net.lo());
                    allocated.push(block);
                }
                // First iteration failing is the plain underlying error;
                // a later failure reports how far the batch got.
                Err(e) if allocated.is_empty() => return Err(e),
                Err(e) => {
                    return Err(AllocationError::PartialAllocation {
                        allocated: allocated.len(),
                        requested: count,
                        source: Box::new(e),
                    })
                }
            }
        }

        log::info!(
            "Allocated {} /{} block(s) from {}",
            allocated.len(),
            self.prefix_length,
            self.master
        );
        Ok(allocated)
    }

    /// One allocation round: merge the used set, compute gaps, align a
    /// candidate per gap, pick the candidate from the smallest gap.
    fn best_fit(&self, used: &[Ipv4]) -> Result<Ipv4, AllocationError> {
        let master_range = IpRange::from(self.master);
        let used_ranges: Vec<IpRange> = used.iter().map(|net| IpRange::from(*net)).collect();

        let covered = merge_ranges(&used_ranges);
        let gaps = find_gaps(&master_range, &covered);

        if gaps.is_empty() {
            return Err(AllocationError::NoCapacity {
                master: self.master,
            });
        }

        let needed = block_size(self.prefix_length).unwrap();

        // Candidate per gap, tagged with the gap size for best-fit selection
        let mut candidates: Vec<(u64, IpRange)> = Vec::new();
        for gap in &gaps {
            if let Some(block) = aligned_block(gap, needed) {
                candidates.push((gap.size(), block));
            }
        }

        if candidates.is_empty() {
            return Err(AllocationError::NoFit {
                master: self.master,
                prefix_length: self.prefix_length,
                needed,
                gaps,
            });
        }

        // Stable sort: ties keep the lowest-address gap, since gaps arrive
        // in ascending order
        candidates.sort_by_key(|(gap_size, _)| *gap_size);

        let (_, block) = candidates[0];
        Ok(Ipv4 {
            addr: Ipv4Addr::from(block.start as u32),
            mask: self.prefix_length,
        })
    }
}
