//! The resolved parameters for one binding-generation run.

use std::path::PathBuf;

use crate::config::VariantConfig;

/// Everything needed to introspect one header and write its wrapper.
///
/// Built once per process by [`crate::cli::resolve`] and consumed by
/// [`crate::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source_root: PathBuf,
    pub introspector_path: PathBuf,
    /// `source_root` joined with the variant's header.
    pub target_header: PathBuf,
    /// Compiler the introspector emulates. Empty means its default.
    pub compiler_id: String,
    /// Search paths in command-line order; duplicates are kept.
    pub include_paths: Vec<PathBuf>,
    /// Adapted `--gccxml-cxxflags` string, see [`crate::flags`].
    pub compiler_flags: Option<String>,
    /// `source_root` joined with the variant's output.
    pub output_path: PathBuf,
}

impl GenerationRequest {
    /// Derive the target header and output path for `variant` under
    /// `source_root`. Options start out empty.
    pub fn new(
        variant: &VariantConfig,
        source_root: impl Into<PathBuf>,
        introspector_path: impl Into<PathBuf>,
    ) -> Self {
        let source_root = source_root.into();
        GenerationRequest {
            target_header: source_root.join(&variant.header),
            output_path: source_root.join(&variant.output),
            introspector_path: introspector_path.into(),
            compiler_id: String::new(),
            include_paths: Vec::new(),
            compiler_flags: None,
            source_root,
        }
    }

    /// Line echoed to stdout before the pipeline runs: the adapted flags if
    /// any were given, otherwise the compiler id.
    pub fn diagnostic_line(&self) -> &str {
        self.compiler_flags.as_deref().unwrap_or(&self.compiler_id)
    }
}
