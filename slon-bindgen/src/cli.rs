//! Command-line surface shared by the per-variant binaries.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches, Parser};
use tracing::info;

use crate::config::{Config, Variant, VariantConfig};
use crate::error::{Error, Result};
use crate::flags::adapt_compiler_flags;
use crate::pipeline::{BindingPipeline, CommandPipeline};
use crate::request::GenerationRequest;

/// Generate Python bindings for a Slon engine header.
#[derive(Parser, Debug)]
#[command(version, about, args_override_self = true)]
pub struct Cli {
    /// Add a directory to the introspector's include search path.
    #[arg(short = 'I', long = "include", value_name = "PATH")]
    pub include: Vec<PathBuf>,

    /// Compiler the introspector should emulate.
    #[arg(short = 'C', long = "compiler", value_name = "ID")]
    pub compiler: Option<String>,

    /// Raw compiler flag string, forwarded as `--gccxml-cxxflags`.
    #[arg(
        short = 'F',
        long = "compiler-flags",
        value_name = "FLAGS",
        allow_hyphen_values = true
    )]
    pub compiler_flags: Option<String>,

    /// Root of the Slon source tree.
    pub source_root: PathBuf,

    /// Path to the introspector executable.
    pub introspector: PathBuf,
}

/// Resolve command-line arguments (program name first) into a request for
/// `variant`. Touches no files.
pub fn resolve<I, T>(variant: Variant, target: &VariantConfig, args: I) -> Result<GenerationRequest>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut cmd = Cli::command().name(variant.program_name());
    if !target.compiler_flags {
        cmd = cmd.mut_arg("compiler_flags", |a| a.hide(true));
    }
    let matches = cmd.try_get_matches_from_mut(args)?;
    let cli = Cli::from_arg_matches(&matches)?;

    if cli.compiler_flags.is_some() && !target.compiler_flags {
        return Err(cmd
            .error(
                ErrorKind::UnknownArgument,
                format!(
                    "unexpected argument '-F/--compiler-flags' found; the {variant} target takes no compiler flags"
                ),
            )
            .into());
    }

    let mut request = GenerationRequest::new(target, cli.source_root, cli.introspector);
    request.include_paths = cli.include;
    request.compiler_id = cli.compiler.unwrap_or_default();
    request.compiler_flags = cli.compiler_flags.as_deref().map(adapt_compiler_flags);
    Ok(request)
}

/// Resolve `args`, echo the diagnostic line and run `pipeline`. Returns the
/// written output path.
pub fn drive<I, T, P>(variant: Variant, config: &Config, args: I, pipeline: &P) -> Result<PathBuf>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    P: BindingPipeline,
{
    let request = resolve(variant, config.variant(variant)?, args)?;
    info!(
        %variant,
        header = %request.target_header.display(),
        output = %request.output_path.display(),
        includes = request.include_paths.len(),
        "resolved generation request"
    );
    println!("{}", request.diagnostic_line());
    crate::run(&request, pipeline)
}

/// Entry point for the `slon-bindgen-*` binaries.
pub fn main_with(variant: Variant) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("slon_bindgen=info")),
        )
        .init();

    let config = Config::discover()?;
    let pipeline = CommandPipeline::new(config.generator.clone());
    match drive(variant, &config, std::env::args_os(), &pipeline) {
        Ok(_) => Ok(()),
        Err(Error::Argument(e)) => e.exit(),
        Err(e) => Err(e.into()),
    }
}

