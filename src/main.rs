use cidr_allocator::output::print_allocations;
use cidr_allocator::request::read_request_file;
use cidr_allocator::{AllocationError, Allocator};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let request_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "allocation_request.json".to_string());
    let request = read_request_file(&request_file)?;

    if request.count < 1 {
        return Err(AllocationError::InvalidCount {
            count: request.count,
        }
        .into());
    }

    let allocator = Allocator::new(
        &request.master_cidr,
        &request.used_cidrs,
        request.prefix_length,
    )?;
    let allocated = allocator.allocate_multiple(request.count as usize)?;

    print_allocations(&request, &allocated)?;

    Ok(())
}
