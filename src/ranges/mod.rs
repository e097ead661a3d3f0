//! Code point ranges
//!
//! Parses `START-END` tokens into inclusive ranges and merges them into a
//! disjoint, ordered [`RangeSet`].

pub mod input;

use crate::core::errors::{RangeSide, Result, TofuError};
use crate::font_source::label::Label;
use std::fmt;
use std::ops::RangeInclusive;
use tracing::{info, warn};

/// Largest code point a tofu label can express (six hex digits)
pub const MAX_CODEPOINT: u32 = 0xFF_FFFF;

/// An inclusive range of code points with `start <= end <= MAX_CODEPOINT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodepointRange {
    start: u32,
    end: u32,
}

impl CodepointRange {
    /// Build a range, swapping reversed bounds
    pub fn new(start: u32, end: u32) -> Result<Self> {
        for value in [start, end] {
            if value > MAX_CODEPOINT {
                return Err(TofuError::CodepointOutOfBounds {
                    value: format!("{value:X}"),
                    token: format!("{start:X}-{end:X}"),
                    max: MAX_CODEPOINT,
                });
            }
        }
        if start > end {
            Ok(Self {
                start: end,
                end: start,
            })
        } else {
            Ok(Self { start, end })
        }
    }

    /// A range covering exactly one code point
    pub fn single(codepoint: u32) -> Result<Self> {
        Self::new(codepoint, codepoint)
    }

    /// Parse a `START-END` or `START` token of hexadecimal values
    ///
    /// Each side may carry a `U+` or `0x` prefix. A reversed token is
    /// accepted after swapping its bounds, and an explicit `X-X` token is
    /// accepted as a single code point; both only log a notice.
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        let parts: Vec<&str> = token.split('-').collect();

        match parts.as_slice() {
            [single] => {
                let value = parse_hex_side(single, RangeSide::Start, token)?;
                Ok(Self {
                    start: value,
                    end: value,
                })
            }
            [start, end] => {
                let start = parse_hex_side(start, RangeSide::Start, token)?;
                let end = parse_hex_side(end, RangeSide::End, token)?;

                if start == end {
                    info!("Range '{}' covers a single code point", token);
                } else if start > end {
                    warn!(
                        "Range '{}' is reversed; using U+{:04X}-U+{:04X}",
                        token, end, start
                    );
                }
                Self::new(start, end)
            }
            _ => Err(TofuError::TooManyHyphens {
                token: token.to_string(),
            }),
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of code points in the range
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Ranges always hold at least one code point
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.start <= codepoint && codepoint <= self.end
    }

    /// Two ranges are mergeable when they overlap or touch
    pub fn is_mergeable(&self, other: &CodepointRange) -> bool {
        self.start <= other.end + 1 && other.start <= self.end + 1
    }

    /// Smallest range covering both inputs
    pub fn union(&self, other: &CodepointRange) -> CodepointRange {
        CodepointRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn codepoints(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Grow the range by one when `codepoint` directly follows it
    pub(crate) fn try_extend(&mut self, codepoint: u32) -> bool {
        if codepoint == self.end + 1 {
            self.end = codepoint;
            true
        } else {
            false
        }
    }

    /// Token used in output file names, e.g. `U+0041_U+007E`
    pub fn name_token(&self) -> String {
        format!(
            "U+{}_U+{}",
            Label::format(self.start),
            Label::format(self.end)
        )
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "U+{}-U+{}",
            Label::format(self.start),
            Label::format(self.end)
        )
    }
}

fn parse_hex_side(text: &str, side: RangeSide, token: &str) -> Result<u32> {
    let text = text.trim();
    let digits = ["U+", "u+", "0x", "0X"]
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .unwrap_or(text);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TofuError::InvalidHex {
            side,
            value: text.to_string(),
            token: token.to_string(),
        });
    }

    // Only overflow can fail once every character is a hex digit
    let out_of_bounds = || TofuError::CodepointOutOfBounds {
        value: digits.to_string(),
        token: token.to_string(),
        max: MAX_CODEPOINT,
    };
    let value = u32::from_str_radix(digits, 16).map_err(|_| out_of_bounds())?;
    if value > MAX_CODEPOINT {
        return Err(out_of_bounds());
    }
    Ok(value)
}

/// An ordered set of pairwise non-mergeable ranges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<CodepointRange>,
}

impl RangeSet {
    /// Merge arbitrary ranges into a normalized set
    pub fn from_ranges(ranges: Vec<CodepointRange>) -> Self {
        Self {
            ranges: Self::merge(ranges),
        }
    }

    /// Parse every token, then merge
    pub fn parse_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ranges = tokens
            .into_iter()
            .map(|token| CodepointRange::parse(token.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_ranges(ranges))
    }

    /// Merge overlapping or adjacent ranges until no pair is mergeable
    ///
    /// The result covers exactly the same code points as the input and is
    /// sorted by start, so input order never changes the outcome.
    pub fn merge(mut ranges: Vec<CodepointRange>) -> Vec<CodepointRange> {
        'scan: loop {
            for i in 0..ranges.len() {
                for j in (i + 1)..ranges.len() {
                    let (a, b) = (ranges[i], ranges[j]);
                    if a.is_mergeable(&b) {
                        let merged = a.union(&b);
                        info!("Merged {} and {} into {}", a, b, merged);
                        ranges[i] = merged;
                        ranges.swap_remove(j);
                        continue 'scan;
                    }
                }
            }
            break;
        }

        ranges.sort();
        ranges
    }

    pub fn ranges(&self) -> &[CodepointRange] {
        &self.ranges
    }

    /// Total number of code points covered
    pub fn len(&self) -> usize {
        self.ranges.iter().map(CodepointRange::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, codepoint: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(codepoint))
    }

    /// Every covered code point in ascending order
    pub fn codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(CodepointRange::codepoints)
    }

    /// File name stem built from every covered range
    pub fn name_stem(&self) -> String {
        let tokens: Vec<String> = self.ranges.iter().map(CodepointRange::name_token).collect();
        format!("tofu_{}", tokens.join("_"))
    }
}
