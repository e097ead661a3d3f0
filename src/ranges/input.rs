//! Range sources other than command line tokens

use super::CodepointRange;
use crate::core::errors::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Unicode planes 0 and 1, generated as separate outputs in release mode
pub const RELEASE_PLANES: [(u32, u32); 2] = [(0x0000, 0xFFFF), (0x1_0000, 0x1_FFFF)];

pub fn release_planes() -> Vec<CodepointRange> {
    RELEASE_PLANES
        .iter()
        .map(|&(start, end)| CodepointRange { start, end })
        .collect()
}

/// Parse newline separated code points or ranges
///
/// Blank lines and `#` comments are skipped.
pub fn parse_lines(contents: &str) -> Result<Vec<CodepointRange>> {
    contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(CodepointRange::parse)
        .collect()
}

/// Read a code point file from disk
pub fn read_codepoint_file(path: &Path) -> Result<Vec<CodepointRange>> {
    let contents = fs::read_to_string(path)?;
    let ranges = parse_lines(&contents)?;
    debug!("Read {} entries from {}", ranges.len(), path.display());
    Ok(ranges)
}
