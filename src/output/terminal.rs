//! Terminal output for allocation results.
//!
//! Prints allocated blocks as quoted CSV rows, then the machine-readable
//! JSON result envelope as the final stdout line.

use crate::models::{block_size, Ipv4};
use crate::request::{AllocationRequest, AllocationResult};
use colored::Colorize;
use std::error::Error;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Print the allocation result for a request.
pub fn print_allocations(
    request: &AllocationRequest,
    allocated: &[Ipv4],
) -> Result<(), Box<dyn Error>> {
    log::info!("#Start print_allocations() count = {}", allocated.len());

    // Print CSV header
    println!(r#" "cnt",  "allocated_cidr",         "broadcast", "addresses""#);

    for (i, block) in allocated.iter().enumerate() {
        println!(
            "{cnt},{allocated_cidr},{broadcast},{addresses}",
            cnt = format_field(i + 1, 6),
            allocated_cidr = format_field(block, 18),
            broadcast = format_field(format!("{}_br", block.hi()), 19),
            addresses = format_field(block_size(block.mask)?, 11),
        );
    }

    let result = AllocationResult {
        allocated_cidrs: allocated.to_vec(),
        count: allocated.len(),
    };
    println!("{}", serde_json::to_string(&result)?);

    println!(
        "#{}# Allocated {count} /{prefix} block(s) from {master}",
        "DONE".on_green(),
        count = allocated.len(),
        prefix = request.prefix_length,
        master = request.master_cidr,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_print_allocations_runs() {
        let request = AllocationRequest {
            master_cidr: "172.16.0.0/12".to_string(),
            used_cidrs: vec![],
            prefix_length: 24,
            count: 1,
        };
        let allocated = vec![Ipv4::new("172.16.0.0/24").unwrap()];
        print_allocations(&request, &allocated).expect("print should not fail");
    }
}
