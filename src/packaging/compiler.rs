//! External font toolchain
//!
//! Binary font encoding is not done in-process: UFO sources are compiled
//! with `fontc` and collections are assembled with `otf2otc`.

use crate::core::errors::{Result, TofuError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Builds binary fonts and collections from generated sources
pub trait FontToolchain {
    /// Compile a UFO source into a single binary font
    fn compile(&self, source: &Path, output: &Path) -> Result<()>;

    /// Merge binary fonts into one collection, preserving their order
    fn merge_collection(&self, fonts: &[PathBuf], output: &Path) -> Result<()>;
}

impl<T: FontToolchain + ?Sized> FontToolchain for &T {
    fn compile(&self, source: &Path, output: &Path) -> Result<()> {
        (**self).compile(source, output)
    }

    fn merge_collection(&self, fonts: &[PathBuf], output: &Path) -> Result<()> {
        (**self).merge_collection(fonts, output)
    }
}

/// Runs the toolchain as subprocesses
#[derive(Debug, Clone)]
pub struct ExternalToolchain {
    fontc: String,
    collection: String,
}

impl Default for ExternalToolchain {
    fn default() -> Self {
        Self::new("fontc", "otf2otc")
    }
}

impl ExternalToolchain {
    pub fn new(fontc: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            fontc: fontc.into(),
            collection: collection.into(),
        }
    }

    fn run(tool: &str, command: &mut Command, output: &Path) -> Result<()> {
        debug!("Running {:?}", command);

        let result = command.output().map_err(|e| {
            let message = if e.kind() == ErrorKind::NotFound {
                "command not found; install it or pass --ufo-only".to_string()
            } else {
                e.to_string()
            };
            TofuError::Toolchain {
                tool: tool.to_string(),
                message,
            }
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(TofuError::Toolchain {
                tool: tool.to_string(),
                message: format!("{} ({})", stderr.trim(), result.status),
            });
        }

        if !output.exists() {
            return Err(TofuError::Toolchain {
                tool: tool.to_string(),
                message: format!("no output was written to {}", output.display()),
            });
        }

        Ok(())
    }
}

impl FontToolchain for ExternalToolchain {
    fn compile(&self, source: &Path, output: &Path) -> Result<()> {
        let mut command = Command::new(&self.fontc);
        command
            .arg("--build-dir")
            .arg(output.with_extension("build"))
            .arg("--output-file")
            .arg(output)
            .arg(source);

        Self::run(&self.fontc, &mut command, output)
    }

    fn merge_collection(&self, fonts: &[PathBuf], output: &Path) -> Result<()> {
        let mut command = Command::new(&self.collection);
        command.arg("-o").arg(output).args(fonts);

        Self::run(&self.collection, &mut command, output)
    }
}
