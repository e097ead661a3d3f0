//! Resolved generator settings
//!
//! Combines CLI arguments, the user config file and built-in defaults.
//! Priority order: CLI argument, then settings.json, then the default.

use crate::core::cli::CliArgs;
use crate::core::config_file::ConfigFile;
use crate::core::errors::Result;
use crate::font_source::{DocumentInfo, SplitPolicy, TofuMetrics, DEFAULT_SPLIT_SIZE};
use crate::packaging::{ExternalToolchain, OutputFormat};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub info: DocumentInfo,
    pub metrics: TofuMetrics,
    pub split: SplitPolicy,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
    /// Intermediate files go to a temporary directory when unset
    pub build_dir: Option<PathBuf>,
    pub fontc_command: String,
    pub collection_command: String,
}

impl GeneratorSettings {
    pub fn resolve(args: &CliArgs, config: &ConfigFile) -> Result<Self> {
        let split =
            SplitPolicy::from_requested(args.requested_split(config.split_size, DEFAULT_SPLIT_SIZE))?;

        let defaults = DocumentInfo::default();
        let info = DocumentInfo {
            family_name: args
                .family
                .clone()
                .or_else(|| config.family_name.clone())
                .unwrap_or(defaults.family_name),
            style_name: config.style_name.clone().unwrap_or(defaults.style_name),
            version_major: config.version_major.unwrap_or(defaults.version_major),
            version_minor: config.version_minor.unwrap_or(defaults.version_minor),
            license: config.license.clone(),
            license_url: config.license_url.clone(),
            created: defaults.created,
        };

        let format = if args.ufo_only {
            OutputFormat::UfoSources
        } else {
            OutputFormat::Binary
        };

        Ok(Self {
            info,
            metrics: TofuMetrics::default(),
            split,
            format,
            output_dir: args.output_dir.clone(),
            build_dir: args.build_dir.clone(),
            fontc_command: config
                .fontc_command
                .clone()
                .unwrap_or_else(|| "fontc".to_string()),
            collection_command: config
                .collection_command
                .clone()
                .unwrap_or_else(|| "otf2otc".to_string()),
        })
    }

    pub fn toolchain(&self) -> ExternalToolchain {
        ExternalToolchain::new(&self.fontc_command, &self.collection_command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_config() {
        let args = CliArgs::parse_from(["tofu", "0041", "--family", "Cli Tofu", "--split"]);
        let config = ConfigFile {
            family_name: Some("Config Tofu".to_string()),
            license: Some("OFL-1.1".to_string()),
            split_size: Some(2048),
            ..ConfigFile::default()
        };

        let settings = GeneratorSettings::resolve(&args, &config).unwrap();
        assert_eq!(settings.info.family_name, "Cli Tofu");
        assert_eq!(settings.info.license.as_deref(), Some("OFL-1.1"));
        assert_eq!(settings.split, SplitPolicy::Every(2048));
        assert_eq!(settings.format, OutputFormat::Binary);
        assert_eq!(settings.fontc_command, "fontc");
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["tofu", "0041", "--ufo-only"]);
        let settings = GeneratorSettings::resolve(&args, &ConfigFile::default()).unwrap();
        assert_eq!(settings.info.family_name, "Tofu");
        assert_eq!(settings.split, SplitPolicy::Single);
        assert_eq!(settings.format, OutputFormat::UfoSources);
        assert_eq!(settings.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_small_split_falls_back() {
        let args = CliArgs::parse_from(["tofu", "0041", "-s=10"]);
        let settings = GeneratorSettings::resolve(&args, &ConfigFile::default()).unwrap();
        assert_eq!(settings.split, SplitPolicy::Every(DEFAULT_SPLIT_SIZE));
    }
}
