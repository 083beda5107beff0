// Data structures exchanged with the analysis backend and the chart view

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::core::constants::{LEFT_FORCE_CHANNEL, OCCLUSION_CHANNEL, RIGHT_FORCE_CHANNEL};
use crate::core::error::{Result, StoreError};

/// Body of `GET /get-signals/{key}`.
///
/// Channels are keyed by their stringified slot index (`"0"`, `"1"`, `"2"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalsPayload {
    pub signals: HashMap<String, Vec<f64>>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl SignalsPayload {
    pub fn channel(&self, index: usize) -> Result<&[f64]> {
        self.signals
            .get(&index.to_string())
            .map(Vec::as_slice)
            .ok_or(StoreError::MissingChannel(index))
    }

    /// Splits the payload into left force, right force and occlusion.
    pub fn into_channels(mut self) -> Result<[Vec<f64>; 3]> {
        let mut take = |index: usize| {
            self.signals
                .remove(&index.to_string())
                .ok_or(StoreError::MissingChannel(index))
        };

        Ok([
            take(LEFT_FORCE_CHANNEL)?,
            take(RIGHT_FORCE_CHANNEL)?,
            take(OCCLUSION_CHANNEL)?,
        ])
    }
}

/// Positions are seconds. Integer positions from the server are read as
/// floats and written back as `123.0`: same value, different text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRange {
    pub start: f64,
    pub end: f64,
}

impl AnnotationRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Ranges are expected to run forward but nothing upstream enforces it.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

/// The annotation kinds the detector emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationCategory {
    /// Spike-wave discharge
    Swd,
    Ds,
    Is,
}

impl AnnotationCategory {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "swd" => Some(AnnotationCategory::Swd),
            "ds" => Some(AnnotationCategory::Ds),
            "is" => Some(AnnotationCategory::Is),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationCategory::Swd => "swd",
            AnnotationCategory::Ds => "ds",
            AnnotationCategory::Is => "is",
        }
    }

    /// Start and end marker colors.
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            AnnotationCategory::Swd => ("#f87171", "#fca5a5"),
            AnnotationCategory::Is => ("#facc15", "#fde047"),
            AnnotationCategory::Ds => ("#a78bfa", "#c4b5fd"),
        }
    }
}

impl fmt::Display for AnnotationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotation ranges grouped by category name, in the order the server
/// sent them.
///
/// Names are kept verbatim, unknown ones included, so the resource can be
/// posted back unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationResource {
    entries: Vec<(String, Vec<AnnotationRange>)>,
}

impl AnnotationResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the ranges of an existing category in place, otherwise
    /// appends a new one.
    pub fn insert(&mut self, name: impl Into<String>, ranges: Vec<AnnotationRange>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = ranges,
            None => self.entries.push((name, ranges)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[AnnotationRange]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ranges)| ranges.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AnnotationRange])> {
        self.entries
            .iter()
            .map(|(name, ranges)| (name.as_str(), ranges.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn range_count(&self) -> usize {
        self.entries.iter().map(|(_, ranges)| ranges.len()).sum()
    }
}

impl Serialize for AnnotationResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, ranges) in &self.entries {
            map.serialize_entry(name, ranges)?;
        }
        map.end()
    }
}

struct AnnotationResourceVisitor;

impl<'de> Visitor<'de> for AnnotationResourceVisitor {
    type Value = AnnotationResource;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of category name to annotation ranges")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut resource = AnnotationResource::new();
        while let Some((name, ranges)) = access.next_entry::<String, Vec<AnnotationRange>>()? {
            resource.insert(name, ranges);
        }
        Ok(resource)
    }
}

impl<'de> Deserialize<'de> for AnnotationResource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(AnnotationResourceVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLabel {
    pub display: bool,
    pub content: String,
    pub position: String,
}

/// One vertical marker line in the chart annotation plugin's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationOverlay {
    #[serde(rename = "type")]
    pub kind: String,
    pub x_min: f64,
    pub x_max: f64,
    pub border_dash: Vec<u32>,
    pub border_dash_offset: u32,
    pub label: OverlayLabel,
    pub border_color: String,
    pub border_width: u32,
}

/// Overlays keyed `line0`, `line1`, ... by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationOverlays {
    lines: Vec<AnnotationOverlay>,
}

impl AnnotationOverlays {
    pub fn key(index: usize) -> String {
        format!("line{}", index)
    }

    pub fn get(&self, key: &str) -> Option<&AnnotationOverlay> {
        let index: usize = key.strip_prefix("line")?.parse().ok()?;
        if key != Self::key(index) {
            return None;
        }
        self.lines.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, &AnnotationOverlay)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (Self::key(i), line))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<AnnotationOverlay>> for AnnotationOverlays {
    fn from(lines: Vec<AnnotationOverlay>) -> Self {
        Self { lines }
    }
}

impl Serialize for AnnotationOverlays {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lines.len()))?;
        for (key, line) in self.iter() {
            map.serialize_entry(&key, line)?;
        }
        map.end()
    }
}

/// Body of `POST /update-annotations/{key}` replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub message: String,
}
