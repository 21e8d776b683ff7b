//! Error types for the binding generation driver.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level driver error. Every variant is fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or insufficient command-line input.
    #[error(transparent)]
    Argument(#[from] clap::Error),

    #[error("failed to read config file {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {origin}")]
    ConfigParse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("no `{0}` variant in the binding configuration")]
    UnknownVariant(crate::config::Variant),

    /// Failure reported by the introspector or the binding generator.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to write generated module to {}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The external tool a [`PipelineError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Introspector,
    Generator,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Introspector => f.write_str("introspector"),
            Tool::Generator => f.write_str("binding generator"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to create scratch directory")]
    Scratch(#[source] std::io::Error),

    #[error("failed to launch {tool} `{}`", program.display())]
    Launch {
        tool: Tool,
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {}", stderr.trim())]
    Failed {
        tool: Tool,
        status: ExitStatus,
        stderr: String,
    },

    #[error("introspector produced no declarations at {}", path.display())]
    MissingDeclarations { path: PathBuf },

    #[error("binding generator output is not valid UTF-8")]
    InvalidOutput(#[source] std::string::FromUtf8Error),
}
