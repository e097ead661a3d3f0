//! Command line interface for the tofu generator
//!
//! Handles parsing command line arguments and validates the combination
//! of inputs before any glyph is generated.

use crate::core::errors::TofuError;
use crate::ranges::input::{read_codepoint_file, release_planes};
use crate::ranges::RangeSet;
use clap::Parser;
use std::path::PathBuf;

/// Tofu CLI arguments
///
/// Examples:
///   tofu 0041-005A                     # One font for A-Z
///   tofu 0000-FFFF --split             # Basic Multilingual Plane, split into a collection
///   tofu 4E00-9FFF --split=4096        # CJK ideographs, 4096 glyphs per font
///   tofu --file ranges.txt             # Ranges listed in a file
///   tofu --release                     # Planes 0 and 1, one collection each
///   tofu 0041-0044 --ufo-only          # UFO sources without compiling
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "tofu",
    version,
    about = "Generates placeholder fonts that show each character's code point",
    long_about = "Tofu generates fonts in which every glyph is a rectangular frame containing the hexadecimal code point of the character it stands for. Large ranges can be split over several fonts which are merged into a font collection."
)]
pub struct CliArgs {
    /// Code point ranges such as `0041-005A` or `20AC`
    #[clap(
        value_name = "RANGE",
        help = "Code point ranges to generate",
        long_help = "Code point ranges written as hexadecimal START-END pairs or single values, for example 0041-005A or 20AC. Values may carry a U+ or 0x prefix. Overlapping and adjacent ranges are merged."
    )]
    pub ranges: Vec<String>,

    /// File listing one range per line
    #[clap(
        long = "file",
        short = 'f',
        value_name = "PATH",
        help = "Read ranges from a file",
        long_help = "Read ranges from a file, one per line. Blank lines and lines starting with # are ignored. Cannot be combined with positional ranges."
    )]
    pub file: Option<PathBuf>,

    /// Glyphs per font before starting a new one
    #[clap(
        long = "split",
        short = 's',
        value_name = "SIZE",
        num_args = 0..=1,
        require_equals = true,
        help = "Split output into fonts of SIZE glyphs",
        long_help = "Split the output into several fonts of at most SIZE glyphs each and merge them into a font collection. The size is attached with '=', as in --split=4096, so a following range is never taken as a size. Without a value the configured or default size (8192) is used. Sizes of 64 or less fall back to the default."
    )]
    pub split: Option<Option<usize>>,

    /// Generate the release set: planes 0 and 1
    #[clap(
        long = "release",
        short = 'r',
        help = "Generate collections for planes 0 and 1",
        long_help = "Generate the release set: one split collection covering the Basic Multilingual Plane and one covering the Supplementary Multilingual Plane. Cannot be combined with explicit ranges or --file."
    )]
    pub release: bool,

    /// Directory for the generated fonts
    #[clap(
        long = "output-dir",
        short = 'o',
        value_name = "DIR",
        default_value = ".",
        help = "Directory for generated fonts"
    )]
    pub output_dir: PathBuf,

    /// Keep intermediate sources in this directory
    #[clap(
        long = "build-dir",
        value_name = "DIR",
        help = "Directory for intermediate UFO sources",
        long_help = "Directory for intermediate UFO sources and per-document fonts. When omitted a temporary directory is used and removed afterwards."
    )]
    pub build_dir: Option<PathBuf>,

    /// Write UFO sources instead of compiled fonts
    #[clap(
        long = "ufo-only",
        help = "Write UFO sources without compiling them",
        long_help = "Write one UFO source per document to the output directory and skip compiling and merging. No external font toolchain is needed in this mode."
    )]
    pub ufo_only: bool,

    /// Family name written into the fonts
    #[clap(long = "family", value_name = "NAME", help = "Font family name")]
    pub family: Option<String>,

    /// Log debug output
    #[clap(long = "verbose", short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[clap(long = "quiet", short = 'q')]
    pub quiet: bool,

    /// Initialize user configuration directory with settings
    ///
    /// This creates the tofu config directory with:
    /// - settings.json: naming, licensing and toolchain preferences
    /// - logs/: destination for log files when file logging is enabled
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with settings",
        long_help = "Initialize the tofu config directory with a settings.json file and a logs directory. Settings provide defaults for family name, license, split size and the external toolchain commands."
    )]
    pub new_config: bool,
}

impl CliArgs {
    /// Validate the combination of inputs
    ///
    /// Explicit ranges and `--file` are mutually exclusive, and `--release`
    /// excludes both. At least one source of ranges is required.
    pub fn validate(&self) -> Result<(), TofuError> {
        let has_ranges = !self.ranges.is_empty();
        let has_file = self.file.is_some();

        if has_ranges && has_file {
            return Err(TofuError::ConflictingInputs(
                "explicit ranges cannot be combined with --file".to_string(),
            ));
        }
        if self.release && (has_ranges || has_file) {
            return Err(TofuError::ConflictingInputs(
                "--release cannot be combined with explicit ranges or --file".to_string(),
            ));
        }
        if !self.release && !has_ranges && !has_file {
            return Err(TofuError::NoInput);
        }
        Ok(())
    }

    /// The range sets to generate, one per output run
    pub fn jobs(&self) -> Result<Vec<RangeSet>, TofuError> {
        if self.release {
            return Ok(release_planes()
                .into_iter()
                .map(|plane| RangeSet::from_ranges(vec![plane]))
                .collect());
        }
        let set = match &self.file {
            Some(path) => RangeSet::from_ranges(read_codepoint_file(path)?),
            None => RangeSet::parse_tokens(&self.ranges)?,
        };
        if set.is_empty() {
            return Err(TofuError::NoInput);
        }
        Ok(vec![set])
    }

    /// The split size to request, if splitting at all
    ///
    /// `--split` without a value and `--release` use `configured`, falling
    /// back to `default`.
    pub fn requested_split(&self, configured: Option<usize>, default: usize) -> Option<usize> {
        match self.split {
            Some(Some(size)) => Some(size),
            Some(None) => Some(configured.unwrap_or(default)),
            None if self.release => Some(configured.unwrap_or(default)),
            None => None,
        }
    }

    /// Log level derived from `--verbose` and `--quiet`
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}
