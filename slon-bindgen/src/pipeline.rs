//! External introspection / generation pipeline.
//!
//! The driver never parses C++ itself. [`CommandPipeline`] runs a
//! gccxml-compatible introspector over the target header, feeds the
//! resulting declaration XML to the binding generator and writes the
//! generator's output where the driver tells it to.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::{Error, PipelineError, Result, Tool};
use crate::flags::split_flags;
use crate::request::GenerationRequest;

/// Introspector option naming the compiler to emulate.
pub const COMPILER_OPTION: &str = "--gccxml-compiler";

/// Configuration handed to the pipeline's generation entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Headers to introspect.
    pub files: Vec<PathBuf>,
    pub introspector_path: PathBuf,
    pub include_paths: Vec<PathBuf>,
    /// Compiler id; empty leaves the introspector's default.
    pub compiler: String,
    /// Extra introspector flags in `--gccxml-cxxflags "..."` form, or empty.
    pub cflags: String,
}

impl From<&GenerationRequest> for PipelineConfig {
    fn from(req: &GenerationRequest) -> Self {
        PipelineConfig {
            files: vec![req.target_header.clone()],
            introspector_path: req.introspector_path.clone(),
            include_paths: req.include_paths.clone(),
            compiler: req.compiler_id.clone(),
            cflags: req.compiler_flags.clone().unwrap_or_default(),
        }
    }
}

/// Seam between the driver and the external tools.
pub trait BindingPipeline {
    /// Generated module, ready to be written.
    type Module;

    /// Introspect `config.files` and generate the wrapper module. Blocks
    /// until the external tools finish.
    fn generate(&self, config: &PipelineConfig) -> Result<Self::Module>;

    /// Persist `module` at `path`, replacing any existing file.
    fn write_module(&self, module: &Self::Module, path: &Path) -> Result<()>;
}

/// Wrapper source text produced by the binding generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    pub text: String,
}

/// Runs the introspector and binding generator as child processes.
#[derive(Debug, Clone)]
pub struct CommandPipeline {
    generator: GeneratorConfig,
}

impl CommandPipeline {
    pub fn new(generator: GeneratorConfig) -> Self {
        CommandPipeline { generator }
    }
}

impl BindingPipeline for CommandPipeline {
    type Module = GeneratedModule;

    fn generate(&self, config: &PipelineConfig) -> Result<GeneratedModule> {
        let scratch = tempfile::Builder::new()
            .prefix("slon-bindgen")
            .tempdir()
            .map_err(PipelineError::Scratch)?;

        let mut declarations = Vec::with_capacity(config.files.len());
        for (n, header) in config.files.iter().enumerate() {
            let xml = scratch.path().join(format!("declarations-{n}.xml"));
            let args = introspector_args(config, header, &xml);
            run_tool(Tool::Introspector, &config.introspector_path, &args)?;
            if !xml.is_file() {
                return Err(PipelineError::MissingDeclarations { path: xml }.into());
            }
            debug!(header = %header.display(), xml = %xml.display(), "introspected header");
            declarations.push(xml);
        }

        let mut args: Vec<OsString> = self.generator.args.iter().map(OsString::from).collect();
        args.extend(declarations.iter().map(OsString::from));
        let output = run_tool(Tool::Generator, &self.generator.program, &args)?;
        let text = String::from_utf8(output.stdout).map_err(PipelineError::InvalidOutput)?;

        info!(size = text.len(), "generated binding module");
        Ok(GeneratedModule { text })
    }

    fn write_module(&self, module: &GeneratedModule, path: &Path) -> Result<()> {
        std::fs::write(path, &module.text).map_err(|source| Error::Filesystem {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), size = module.text.len(), "wrote binding module");
        Ok(())
    }
}

/// Introspector arguments for one header:
/// `<header> -I<dir>... [--gccxml-compiler <id>] [cflags...] -fxml=<xml>`.
pub fn introspector_args(config: &PipelineConfig, header: &Path, xml: &Path) -> Vec<OsString> {
    let mut args = vec![OsString::from(header)];
    for dir in &config.include_paths {
        let mut arg = OsString::from("-I");
        arg.push(dir);
        args.push(arg);
    }
    if !config.compiler.is_empty() {
        args.push(COMPILER_OPTION.into());
        args.push(config.compiler.as_str().into());
    }
    args.extend(split_flags(&config.cflags).into_iter().map(OsString::from));
    let mut out = OsString::from("-fxml=");
    out.push(xml);
    args.push(out);
    args
}

fn run_tool(tool: Tool, program: &Path, args: &[OsString]) -> Result<Output> {
    debug!(%tool, program = %program.display(), ?args, "spawning");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|source| PipelineError::Launch {
            tool,
            program: program.to_path_buf(),
            source,
        })?;
    if !output.status.success() {
        return Err(PipelineError::Failed {
            tool,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into());
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig {
            files: vec!["/proj/slon/Scene/Node.h".into()],
            introspector_path: "/usr/bin/gccxml".into(),
            include_paths: vec!["/usr/include".into(), "/opt/boost".into()],
            compiler: "gcc".into(),
            cflags: r#"--gccxml-cxxflags "-DA=1 -O2""#.into(),
        }
    }

    #[test]
    fn from_request_maps_every_field() {
        let mut req = GenerationRequest::new(
            &crate::config::VariantConfig {
                header: "slon/Scene/Node.h".into(),
                output: "out.cpp".into(),
                compiler_flags: true,
            },
            "/proj",
            "/usr/bin/gccxml",
        );
        req.include_paths = vec!["/usr/include".into(), "/opt/boost".into()];
        req.compiler_id = "gcc".into();
        req.compiler_flags = Some(r#"--gccxml-cxxflags "-DA=1 -O2""#.into());

        assert_eq!(PipelineConfig::from(&req), config());
    }

    #[test]
    fn absent_flags_map_to_empty_cflags() {
        let req = GenerationRequest::new(
            &crate::config::VariantConfig {
                header: "a.h".into(),
                output: "a.cpp".into(),
                compiler_flags: false,
            },
            "/proj",
            "gccxml",
        );
        assert_eq!(PipelineConfig::from(&req).cflags, "");
    }

    #[test]
    fn introspector_args_layout() {
        let cfg = config();
        let args = introspector_args(&cfg, &cfg.files[0], Path::new("/tmp/d.xml"));
        let args: Vec<_> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(
            args,
            vec![
                "/proj/slon/Scene/Node.h",
                "-I/usr/include",
                "-I/opt/boost",
                "--gccxml-compiler",
                "gcc",
                "--gccxml-cxxflags",
                "-DA=1 -O2",
                "-fxml=/tmp/d.xml",
            ]
        );
    }

    #[test]
    fn empty_compiler_and_flags_are_omitted() {
        let mut cfg = config();
        cfg.compiler.clear();
        cfg.cflags.clear();
        cfg.include_paths.clear();
        let args = introspector_args(&cfg, &cfg.files[0], Path::new("d.xml"));
        assert_eq!(
            args,
            vec![
                OsString::from("/proj/slon/Scene/Node.h"),
                OsString::from("-fxml=d.xml")
            ]
        );
    }

    #[test]
    fn missing_introspector_fails_to_launch() {
        let pipeline = CommandPipeline::new(GeneratorConfig {
            program: "true".into(),
            args: vec![],
        });
        let mut cfg = config();
        cfg.introspector_path = "/nonexistent/slon-bindgen-introspector".into();

        let err = pipeline.generate(&cfg).unwrap_err();
        assert!(
            matches!(
                err,
                Error::Pipeline(PipelineError::Launch {
                    tool: Tool::Introspector,
                    ..
                })
            ),
            "{err:?}"
        );
    }

    #[test]
    fn write_into_missing_directory_is_a_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/PyNode.cpp");
        let pipeline = CommandPipeline::new(GeneratorConfig {
            program: "true".into(),
            args: vec![],
        });

        let err = pipeline
            .write_module(&GeneratedModule { text: "x".into() }, &path)
            .unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }), "{err:?}");
        assert!(!path.exists());
    }
}
