//! # Common Types
//!
//! This module contains the common types used throughout the crate for
//! representing chart series, partitions, and render payloads.

use core::fmt;
use core::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compact, stable identifier for a series held by the store.
///
/// Backed by `NonZeroU32` so `Option<SeriesId>` stays pointer-sized.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(NonZeroU32);

impl SeriesId {
    /// Create an id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeriesId({})", self.index())
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Compact, stable identifier for a group partition.
///
/// Group ids are handed out by the store and never reused, so a stale id
/// held across a group removal can only miss, not alias another group.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(NonZeroU32);

impl GroupId {
    /// Create an id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupId({})", self.index())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Identifies a partition: the default individual list or a named group.
///
/// A series belongs to exactly one partition at any time; drag-and-drop
/// moves it between partitions, never copies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionId {
    /// The default partition holding loose, independently toggled series.
    Individual,
    /// A user-created group whose active members are merged for display.
    Group(GroupId),
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionId::Individual => write!(f, "individual"),
            PartitionId::Group(id) => write!(f, "group {id}"),
        }
    }
}

/// Display colors series are assigned from when none is given explicitly.
pub const PALETTE: [Rgb; 9] = [
    Rgb::new(0x4d, 0xc9, 0xf6),
    Rgb::new(0xf6, 0x70, 0x19),
    Rgb::new(0xf5, 0x37, 0x94),
    Rgb::new(0x53, 0x7b, 0xc4),
    Rgb::new(0xac, 0xc2, 0x36),
    Rgb::new(0x16, 0x6a, 0x8f),
    Rgb::new(0x00, 0xa9, 0x50),
    Rgb::new(0x58, 0x59, 0x5b),
    Rgb::new(0x85, 0x49, 0xba),
];

/// A display color, serialized as a `#rrggbb` hex string in seed files.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Palette color for a 0-based slot, cycling past the palette length.
    pub fn palette(slot: usize) -> Self {
        PALETTE[slot % PALETTE.len()]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({self})")
    }
}

/// Error returned when a color string is not of the form `#rrggbb`.
#[derive(Debug, Error)]
#[error("invalid color string {0:?}, expected \"#rrggbb\"")]
pub struct ParseColorError(pub String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let parse = |range| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// A named, ordered sequence of numeric samples.
///
/// Series are created when demo data is seeded or when a group produces a
/// merged result; afterwards only the active flag and partition membership
/// change. The color is a rendering property carried along with the data,
/// assigned once at creation and stable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Label shown on cards and in the chart legend; unique within a store.
    pub label: String,
    /// Sample values, indexed by position.
    pub samples: Vec<f64>,
    /// Whether the series participates in the display set.
    pub active: bool,
    /// Display color.
    pub color: Rgb,
}

impl Series {
    /// Create an active series.
    pub fn new(label: impl Into<String>, samples: Vec<f64>, color: Rgb) -> Self {
        Self {
            label: label.into(),
            samples,
            active: true,
            color,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// The payload handed to a render sink after every recompute.
///
/// `labels` are the shared x-axis sample indices (`0..longest`), `datasets`
/// the display set in label order. This is the whole boundary between the
/// core and any chart backend; the core keeps no rendering state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartFrame {
    pub labels: Vec<usize>,
    pub datasets: Vec<Series>,
}

impl ChartFrame {
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
