//! Configuration types for `slon-bindgen.toml`.
//!
//! The table maps each binding variant to the header it introspects and the
//! wrapper source it produces, both relative to the source root given on the
//! command line.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Table compiled into the binaries.
const BUILTIN: &str = include_str!("../slon-bindgen.toml");

/// Points at a replacement for the built-in table.
pub const CONFIG_ENV: &str = "SLON_BINDGEN_CONFIG";
/// Overrides `generator.program`.
pub const GENERATOR_ENV: &str = "SLON_BINDGEN_GENERATOR";

/// Binding target selected by the invoked entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// `slon::block_allocator`.
    BlockAllocator,
    /// `slon::scene::Node`; accepts `--compiler-flags`.
    SceneNode,
}

impl Variant {
    /// Key of this variant under `[variant]` in the config table.
    pub fn key(self) -> &'static str {
        match self {
            Variant::BlockAllocator => "block-allocator",
            Variant::SceneNode => "scene-node",
        }
    }

    /// Name of the binary that drives this variant.
    pub fn program_name(self) -> &'static str {
        match self {
            Variant::BlockAllocator => "slon-bindgen-allocator",
            Variant::SceneNode => "slon-bindgen-node",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub variant: BTreeMap<Variant, VariantConfig>,
}

/// External binding generator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Executable, looked up on `PATH` when not a path.
    pub program: PathBuf,
    /// Arguments placed before the declaration files.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Paths for one binding target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantConfig {
    /// Header to introspect, relative to the source root.
    pub header: PathBuf,
    /// Generated wrapper source, relative to the source root.
    pub output: PathBuf,
    /// Whether `-F/--compiler-flags` is accepted.
    #[serde(default)]
    pub compiler_flags: bool,
}

impl Config {
    /// The table compiled into the binaries.
    pub fn builtin() -> Result<Config> {
        parse_config(BUILTIN, "<builtin>")
    }

    /// Built-in table, or the file named by `SLON_BINDGEN_CONFIG`, with
    /// `SLON_BINDGEN_GENERATOR` applied on top.
    pub fn discover() -> Result<Config> {
        Config::discover_with(|name| std::env::var_os(name))
    }

    /// [`Config::discover`] with `var` standing in for the environment.
    pub fn discover_with(var: impl Fn(&str) -> Option<OsString>) -> Result<Config> {
        let mut cfg = match var(CONFIG_ENV) {
            Some(path) => load_config(Path::new(&path))?,
            None => Config::builtin()?,
        };
        if let Some(program) = var(GENERATOR_ENV) {
            cfg.generator.program = PathBuf::from(program);
        }
        debug!(generator = %cfg.generator.program.display(), "resolved configuration");
        Ok(cfg)
    }

    pub fn variant(&self, variant: Variant) -> Result<&VariantConfig> {
        self.variant
            .get(&variant)
            .ok_or(Error::UnknownVariant(variant))
    }
}

/// Load and parse a `slon-bindgen.toml` configuration file.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, &path.display().to_string())
}

fn parse_config(content: &str, origin: &str) -> Result<Config> {
    toml::from_str(content).map_err(|source| Error::ConfigParse {
        origin: origin.to_string(),
        source,
    })
}
