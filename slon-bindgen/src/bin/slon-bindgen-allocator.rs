//! Generate Python bindings for `slon/Utility/Memory/block_allocator.hpp`.

use slon_bindgen::config::Variant;

fn main() -> anyhow::Result<()> {
    slon_bindgen::cli::main_with(Variant::BlockAllocator)
}
