//! Floor-plan document: the base image reference and its zones.
//!
//! # Versioning
//!
//! The document uses semantic versioning (MAJOR.MINOR.PATCH):
//!
//! - **Version 0.x.x**: Unstable development versions. Files are readable
//!   across 0.x releases, with a warning when the minor version differs.
//!
//! - **Version 1.x.x** (future): Breaking changes only in major version bumps.
//!
//! Zones are written with derived `right` and `bottom` fields for downstream
//! consumers. They are ignored on import; `left + width` and `top + height`
//! are authoritative.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::format::error::FormatError;
use crate::model::{Rect, Zone, ZoneId, ZoneType};
use crate::viewport::NaturalSize;

/// Slack allowed on the far image edges for accumulated rounding.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Reference to the floor-plan image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    /// URL or file path of the image, relative paths resolve against the document.
    #[serde(rename = "image")]
    pub location: String,

    /// Unscaled width in pixels, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural_width: Option<u32>,

    /// Unscaled height in pixels, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural_height: Option<u32>,
}

impl ImageSource {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            natural_width: None,
            natural_height: None,
        }
    }

    pub fn with_natural_size(mut self, size: NaturalSize) -> Self {
        self.natural_width = Some(size.width);
        self.natural_height = Some(size.height);
        self
    }

    /// Natural size when both dimensions are recorded.
    pub fn natural_size(&self) -> Option<NaturalSize> {
        Some(NaturalSize::new(self.natural_width?, self.natural_height?))
    }

    /// Whether the image lives behind a URL rather than on disk.
    pub fn is_remote(&self) -> bool {
        self.location.starts_with("http://") || self.location.starts_with("https://")
    }

    /// Read the natural size from the image file header and record it.
    ///
    /// `base_dir` is the directory relative paths are resolved against.
    pub fn probe(&mut self, base_dir: &Path) -> Result<NaturalSize, FormatError> {
        if self.is_remote() {
            return Err(FormatError::MissingDimensions {
                image: self.location.clone(),
            });
        }
        let path = base_dir.join(&self.location);
        if !path.exists() {
            return Err(FormatError::ImageNotFound { path });
        }

        let (width, height) = image::image_dimensions(&path)?;
        log::debug!("Probed {:?}: {}x{}", path, width, height);
        let size = NaturalSize::new(width, height);
        self.natural_width = Some(width);
        self.natural_height = Some(height);
        Ok(size)
    }
}

/// A zone as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneEntry {
    pub id: ZoneId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,

    /// Derived, written for consumers only.
    #[serde(default)]
    pub right: f64,

    /// Derived, written for consumers only.
    #[serde(default)]
    pub bottom: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_type: Option<ZoneType>,
}

impl ZoneEntry {
    /// Create from an in-memory zone.
    pub fn from_zone(zone: &Zone) -> Self {
        Self {
            id: zone.id,
            left: zone.bounds.left,
            top: zone.bounds.top,
            width: zone.bounds.width,
            height: zone.bounds.height,
            right: zone.right(),
            bottom: zone.bottom(),
            name: zone.name.clone(),
            zone_type: zone.zone_type,
        }
    }

    /// Convert to an in-memory zone.
    pub fn to_zone(&self) -> Zone {
        Zone {
            id: self.id,
            bounds: Rect::new(self.left, self.top, self.width, self.height),
            name: self.name.clone(),
            zone_type: self.zone_type,
        }
    }

    fn validate(&self) -> Result<(), FormatError> {
        let rect = Rect::new(self.left, self.top, self.width, self.height);
        if !rect.is_finite() {
            return Err(FormatError::invalid_coordinates(format!(
                "zone {} has non-finite geometry",
                self.id
            )));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(FormatError::invalid_coordinates(format!(
                "zone {} has negative size {}x{}",
                self.id, self.width, self.height
            )));
        }
        let inside = (0.0..=1.0).contains(&rect.left)
            && (0.0..=1.0).contains(&rect.top)
            && rect.right() <= 1.0 + EDGE_TOLERANCE
            && rect.bottom() <= 1.0 + EDGE_TOLERANCE;
        if !inside {
            return Err(FormatError::invalid_coordinates(format!(
                "zone {} lies outside the image: ({}, {}) to ({}, {})",
                self.id,
                rect.left,
                rect.top,
                rect.right(),
                rect.bottom()
            )));
        }
        Ok(())
    }
}

/// Complete floor-plan document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanDocument {
    /// Format version for compatibility checking.
    pub version: String,

    /// Base image reference.
    #[serde(flatten)]
    pub image: ImageSource,

    /// Persisted zones.
    #[serde(default)]
    pub zones: Vec<ZoneEntry>,
}

impl FloorPlanDocument {
    /// Current version of the document format.
    pub const CURRENT_VERSION: &'static str = "0.1.0";

    /// Major version number for compatibility checking.
    pub const VERSION_MAJOR: u32 = 0;

    /// Minor version number.
    pub const VERSION_MINOR: u32 = 1;

    /// Create an empty document for an image.
    pub fn new(image: ImageSource) -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
            image,
            zones: Vec::new(),
        }
    }

    /// Parse a version string into (major, minor, patch) components.
    pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return None;
        }
        let major = parts[0].parse().ok()?;
        let minor = parts[1].parse().ok()?;
        let patch = parts[2].parse().ok()?;
        Some((major, minor, patch))
    }

    /// Check if a version is fully compatible with the current version.
    ///
    /// For version 0.x.x only exact minor version matches are compatible.
    pub fn is_version_compatible(file_version: &str) -> bool {
        let Some((file_major, file_minor, _)) = Self::parse_version(file_version) else {
            return false;
        };

        if Self::VERSION_MAJOR == 0 {
            file_major == 0 && file_minor == Self::VERSION_MINOR
        } else {
            file_major == Self::VERSION_MAJOR
        }
    }

    /// Check if a version can be read at all, possibly with warnings.
    pub fn is_version_readable(file_version: &str) -> bool {
        let Some((file_major, _, _)) = Self::parse_version(file_version) else {
            return false;
        };
        file_major == 0 || file_major == Self::VERSION_MAJOR
    }

    /// In-memory zones, in document order.
    pub fn zones(&self) -> Vec<Zone> {
        self.zones.iter().map(ZoneEntry::to_zone).collect()
    }

    /// Replace the stored zones.
    pub fn set_zones(&mut self, zones: &[Zone]) {
        self.zones = zones.iter().map(ZoneEntry::from_zone).collect();
    }

    /// Check ids and geometry of every zone.
    pub fn validate(&self) -> Result<(), FormatError> {
        let mut seen = HashSet::new();
        for entry in &self.zones {
            if !seen.insert(entry.id) {
                return Err(FormatError::DuplicateZoneId { id: entry.id });
            }
            entry.validate()?;
        }
        Ok(())
    }

    /// Parse and validate a document.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let doc: Self = serde_json::from_str(json)?;

        if !Self::is_version_readable(&doc.version) {
            return Err(FormatError::VersionMismatch {
                expected: Self::CURRENT_VERSION.to_string(),
                found: doc.version.clone(),
            });
        }
        if !Self::is_version_compatible(&doc.version) {
            log::warn!(
                "Floor plan version {} may not be fully compatible with current version {}",
                doc.version,
                Self::CURRENT_VERSION
            );
        }

        doc.validate()?;
        Ok(doc)
    }

    /// Serialize with pretty printing, refreshing derived fields.
    pub fn to_json(&self) -> Result<String, FormatError> {
        let mut doc = self.clone();
        for entry in &mut doc.zones {
            entry.right = entry.left + entry.width;
            entry.bottom = entry.top + entry.height;
        }
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Load a document from disk.
    pub fn load(path: &Path) -> Result<Self, FormatError> {
        log::info!("Loading floor plan from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        let doc = Self::from_json(&json)?;
        log::info!(
            "Loaded {} zones for image '{}' (format version {})",
            doc.zones.len(),
            doc.image.location,
            doc.version
        );
        Ok(doc)
    }

    /// Write the document to disk.
    pub fn save(&self, path: &Path) -> Result<(), FormatError> {
        self.validate()?;
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved {} zones to {:?}", self.zones.len(), path);
        Ok(())
    }
}
