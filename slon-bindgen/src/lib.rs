//! slon-bindgen — C++ header → Python binding module driver.
//!
//! Resolves the command line into a [`GenerationRequest`], runs an external
//! gccxml-compatible introspector and binding generator over one Slon
//! header, and writes the generated wrapper to a fixed location under the
//! source root.
//!
//! # Quick start
//!
//! ```no_run
//! use slon_bindgen::config::{Config, Variant};
//! use slon_bindgen::pipeline::CommandPipeline;
//!
//! let config = Config::builtin().unwrap();
//! let pipeline = CommandPipeline::new(config.generator.clone());
//! let written = slon_bindgen::cli::drive(
//!     Variant::BlockAllocator,
//!     &config,
//!     ["slon-bindgen-allocator", "-I", "/usr/include", "-C", "gcc", "/proj", "/usr/bin/gccxml"],
//!     &pipeline,
//! )
//! .unwrap();
//! assert!(written.ends_with("src/scene/Python/PyNode.cpp"));
//! ```

use std::path::PathBuf;

use tracing::info;

pub mod cli;
pub mod config;
pub mod error;
pub mod flags;
pub mod pipeline;
pub mod request;

pub use error::{Error, Result};
pub use request::GenerationRequest;

use pipeline::{BindingPipeline, PipelineConfig};

/// Run the pipeline for `request` and have it write the module to
/// `request.output_path`, overwriting whatever is there.
///
/// Errors from the external tools are returned as-is; nothing is retried and
/// nothing is written unless generation succeeded.
///
/// Returns the path the module was written to.
pub fn run<P: BindingPipeline>(request: &GenerationRequest, pipeline: &P) -> Result<PathBuf> {
    let config = PipelineConfig::from(request);
    let module = pipeline.generate(&config)?;
    pipeline.write_module(&module, &request.output_path)?;

    info!(path = %request.output_path.display(), "binding generation complete");
    Ok(request.output_path.clone())
}
