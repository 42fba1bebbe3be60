//! Allocation request loading.
//!
//! Requests arrive as plain JSON files supplied by the orchestration layer
//! (CI job, wrapper script). Parsing goes through `serde_path_to_error` so
//! a malformed request reports the exact failing field path.

use crate::models::Ipv4;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

fn default_count() -> i64 {
    1
}

/// One allocation request, as supplied by the caller.
#[derive(Serialize, Deserialize, Debug)]
pub struct AllocationRequest {
    /// The master CIDR range to allocate from, e.g. "172.16.0.0/12".
    pub master_cidr: String,
    /// CIDR blocks already in use. May be unsorted, overlapping or outside
    /// the master range.
    #[serde(default)]
    pub used_cidrs: Vec<String>,
    /// Desired prefix length for the new block(s).
    pub prefix_length: u8,
    /// Number of blocks to allocate.
    #[serde(default = "default_count")]
    pub count: i64,
}

/// Result envelope mirrored back to the caller.
#[derive(Serialize, Debug)]
pub struct AllocationResult {
    /// Allocated blocks, in allocation order.
    pub allocated_cidrs: Vec<Ipv4>,
    /// Number of blocks allocated.
    pub count: usize,
}

/// Read an allocation request from a JSON file.
///
/// # Arguments
/// * `request_file` - Path to the request JSON
///
/// # Returns
/// * `Ok(AllocationRequest)` - The parsed request
/// * `Err` - If the file is missing, unreadable or not a valid request
pub fn read_request_file(request_file: &str) -> Result<AllocationRequest, Box<dyn Error>> {
    if !Path::new(request_file).exists() {
        return Err(format!("Request file does not exist: {request_file}").into());
    }
    log::info!("Reading allocation request from: {request_file}");

    let json = std::fs::read_to_string(request_file)
        .map_err(|e| format!("Error reading request file {request_file}: {e}"))?;

    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let request: AllocationRequest = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing request JSON: path={} error={}", e.path(), e))?;

    log::info!(
        "Request: master={master} prefix=/{prefix} count={count} used_cidrs={used}",
        master = request.master_cidr,
        prefix = request.prefix_length,
        count = request.count,
        used = request.used_cidrs.len()
    );

    Ok(request)
}
