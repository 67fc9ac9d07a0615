//! Command line argument parsing and validation.
//!
//! clap handles the option syntax; [`Args::into_request`] then checks that
//! the options form exactly one of the supported invocation shapes.

use crate::{
    bundler::{Dpkg, GenerateRequest, platform::linux::debian::DEFAULT_PACKAGER},
    error::CliError,
};
use clap::Parser;
use std::path::PathBuf;

const USAGE: &str = "\
spal {-g | --generate-buildcfg} --pkgmgr <pkg-mgr> --dist <dist> --comp <comp> \\
         --shellscript <shell-script> --control <control-file> \\
         [--srcroot <src-rootdir> [--exclude <file-1> ... <file-n>]] \\
         [--man <man-filename>] [--copyright <copyright-filename>] \\
         [--outfile <output-filename>]
       spal [{-k | --keep-buildtree}] [{-s | --use-debstdname}] <buildcfg> <outdir>
       spal [{-h | --help}]
       spal {-v | --version}";

const AFTER_HELP: &str = "\
On successful generation of a build config file, spal prints its path to stdout.
On build success, spal prints the path of the .deb package to stdout.
If an error occurs, the errorcode is displayed along with an error message.

Set SPAL_DPKG to use a packaging program other than dpkg, and RUST_LOG=debug
to trace the staging steps.";

/// Scripts Package Assembler for Linux
#[derive(Parser, Debug, Default)]
#[command(
    name = "spal",
    about = "Scripts Package Assembler for Linux",
    long_about = "spal: Scripts Package Assembler for Linux. Helps assemble executable scripts
into distributable packages. Currently supports building .deb packages only.",
    override_usage = USAGE,
    after_help = AFTER_HELP,
    disable_version_flag = true
)]
pub struct Args {
    /// Generate a build config file from the given inputs
    #[arg(short = 'g', long = "generate-buildcfg")]
    pub generate: bool,

    /// Package manager to build for (apt, pkg)
    #[arg(long, value_name = "PKG-MGR")]
    pub pkgmgr: Option<String>,

    /// Package distribution name (e.g. "stable")
    #[arg(long, value_name = "DIST")]
    pub dist: Option<String>,

    /// Package component name (e.g. "main")
    #[arg(long, value_name = "COMP")]
    pub comp: Option<String>,

    /// Main executable script, installed to <prefix>/bin/<package>
    #[arg(long, value_name = "SHELL-SCRIPT")]
    pub shellscript: Option<PathBuf>,

    /// Control file for the .deb package
    #[arg(long, value_name = "CONTROL-FILE")]
    pub control: Option<PathBuf>,

    /// Root directory of the source tree, installed to <prefix>/lib/<package>
    #[arg(long, value_name = "SRC-ROOTDIR")]
    pub srcroot: Option<PathBuf>,

    /// Files directly inside the source root to leave out
    #[arg(long, value_name = "FILE", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Man page, shown by "man <package>"
    #[arg(long, value_name = "MAN-FILENAME")]
    pub man: Option<PathBuf>,

    /// Copyright notice
    #[arg(long, value_name = "COPYRIGHT-FILENAME")]
    pub copyright: Option<PathBuf>,

    /// Output build config name; defaults to <shellscript>.<pkgmgr>.<dist>.<comp>.spalcfg
    #[arg(long, value_name = "OUTPUT-FILENAME")]
    pub outfile: Option<String>,

    /// Keep the build tree in the output directory after building
    #[arg(short = 'k', long = "keep-buildtree")]
    pub keep_buildtree: bool,

    /// Name the package <pkg-name>_<ver>_all.deb inside <outdir>/<pkgmgr>.<dist>.<comp>/
    #[arg(short = 's', long = "use-debstdname")]
    pub use_debstdname: bool,

    /// Show the version and copyright notice, then exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Packaging program invoked as "<dpkg> --build <dir>"
    #[arg(long, env = "SPAL_DPKG", default_value = DEFAULT_PACKAGER, hide = true)]
    pub dpkg: PathBuf,

    /// Build config file
    #[arg(value_name = "BUILDCFG")]
    pub buildcfg: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTDIR")]
    pub outdir: Option<PathBuf>,
}

/// Inputs for build mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub buildcfg: PathBuf,
    pub out_dir: PathBuf,
    pub keep_build_tree: bool,
    pub use_deb_std_name: bool,
}

/// What one invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Version,
    Generate(GenerateRequest),
    Build(BuildRequest),
}

impl Args {
    /// Checks the invocation shape and converts it into a [`Request`].
    pub fn into_request(self) -> Result<Request, CliError> {
        if self.version {
            return Ok(Request::Version);
        }
        if self.generate {
            self.into_generate().map(Request::Generate)
        } else {
            self.into_build().map(Request::Build)
        }
    }

    fn into_generate(self) -> Result<GenerateRequest, CliError> {
        let mut stray = Vec::new();
        if self.keep_buildtree {
            stray.push("--keep-buildtree".to_string());
        }
        if self.use_debstdname {
            stray.push("--use-debstdname".to_string());
        }
        if let Some(buildcfg) = &self.buildcfg {
            stray.push(buildcfg.display().to_string());
        }
        if !stray.is_empty() {
            stray.insert(0, "--generate-buildcfg".to_string());
            return Err(CliError::ConflictingArguments { arguments: stray });
        }

        Ok(GenerateRequest {
            package_manager: required(self.pkgmgr, "--pkgmgr")?,
            distribution: required(self.dist, "--dist")?,
            component: required(self.comp, "--comp")?,
            shell_script: required(self.shellscript, "--shellscript")?,
            control: required(self.control, "--control")?,
            source_root: self.srcroot,
            exclude: self.exclude,
            man: self.man,
            copyright: self.copyright,
            outfile: self.outfile,
        })
    }

    fn into_build(self) -> Result<BuildRequest, CliError> {
        let generate_only = [
            ("--pkgmgr", self.pkgmgr.is_some()),
            ("--dist", self.dist.is_some()),
            ("--comp", self.comp.is_some()),
            ("--shellscript", self.shellscript.is_some()),
            ("--control", self.control.is_some()),
            ("--srcroot", self.srcroot.is_some()),
            ("--exclude", !self.exclude.is_empty()),
            ("--man", self.man.is_some()),
            ("--copyright", self.copyright.is_some()),
            ("--outfile", self.outfile.is_some()),
        ];
        if let Some((name, _)) = generate_only.iter().find(|(_, given)| *given) {
            return Err(CliError::InvalidArguments {
                reason: format!("{name} requires --generate-buildcfg"),
            });
        }

        Ok(BuildRequest {
            buildcfg: required(self.buildcfg, "<buildcfg>")?,
            out_dir: required(self.outdir, "<outdir>")?,
            keep_build_tree: self.keep_buildtree,
            use_deb_std_name: self.use_debstdname,
        })
    }
}

fn required<T>(value: Option<T>, argument: &str) -> Result<T, CliError> {
    value.ok_or_else(|| CliError::MissingArgument {
        argument: argument.to_string(),
    })
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    packager: Dpkg,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            packager: Dpkg::new(args.dpkg.clone()),
        }
    }
}

impl RuntimeConfig {
    /// Packaging program for build mode
    pub fn packager(&self) -> &Dpkg {
        &self.packager
    }
}
