//! Application runner logic
//!
//! Resolves settings, then generates and packages one output per job.

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::core::errors::{Result, TofuError};
use crate::core::settings::GeneratorSettings;
use crate::font_source::{FontBuilder, GlyphComposer};
use crate::geometry::DigitLayout;
use crate::logging;
use crate::packaging::{FontToolchain, PackageOutput, Packager};
use crate::ranges::RangeSet;
use anyhow::Context;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Create and run the generator with the given CLI arguments.
/// Handles special CLI flags before any generation starts.
pub fn run_app(cli_args: CliArgs) -> anyhow::Result<()> {
    if cli_args.new_config {
        return ConfigFile::initialize_config_directory()
            .context("Failed to initialize config directory");
    }

    let (config, config_error) = match ConfigFile::load() {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (ConfigFile::default(), Some(e)),
    };

    let logs_dir = config.log_to_file.then(ConfigFile::logs_dir);
    let log_file = logging::init(cli_args.log_level(), logs_dir.as_deref())
        .context("Failed to set up logging")?;
    if let Some(error) = config_error {
        warn!("Ignoring user settings: {error:#}");
    }
    if let Some(path) = log_file {
        debug!("Logging to {}", path.display());
    }

    cli_args.validate()?;
    let settings = GeneratorSettings::resolve(&cli_args, &config)?;
    let jobs = cli_args.jobs()?;

    let toolchain = settings.toolchain();
    let packages = generate(&jobs, &settings, &toolchain).context("Font generation failed")?;
    for package in packages {
        for output in &package.outputs {
            info!("Wrote {}", output.display());
        }
        debug!("Manifest: {}", package.manifest.display());
    }
    Ok(())
}

/// Generate and package every job in order
///
/// Every job must hold at least one code point and fit the document
/// capacity; both are checked before any output is written.
pub fn generate<T: FontToolchain>(
    jobs: &[RangeSet],
    settings: &GeneratorSettings,
    toolchain: &T,
) -> Result<Vec<PackageOutput>> {
    if jobs.is_empty() || jobs.iter().any(RangeSet::is_empty) {
        return Err(TofuError::NoInput);
    }
    for job in jobs {
        settings.split.check_capacity(job.len())?;
    }

    fs::create_dir_all(&settings.output_dir)?;
    let (build_root, _temp_dir) = match &settings.build_dir {
        Some(dir) => (dir.clone(), None),
        None => {
            let temp = tempfile::Builder::new().prefix("tofu-").tempdir()?;
            (temp.path().to_path_buf(), Some(temp))
        }
    };

    jobs.iter()
        .enumerate()
        .map(|(index, job)| {
            let build_dir: PathBuf = if jobs.len() > 1 {
                build_root.join(format!("job-{index}"))
            } else {
                build_root.clone()
            };
            info!(
                "Generating {} glyphs of {} in {} document(s)",
                job.len(),
                settings.info.display_name(),
                settings.split.document_count(job.len())
            );

            let packager = Packager::new(
                toolchain,
                settings.metrics,
                build_dir,
                settings.output_dir.clone(),
                settings.format,
            );
            let composer = GlyphComposer::new(DigitLayout::default(), settings.metrics);
            let mut builder =
                FontBuilder::new(composer, settings.info.clone(), settings.split, packager);
            builder.add_range_set(job)?;

            builder
                .finish()?
                .package(&job.name_stem(), &settings.info.family_name)
        })
        .collect()
}
