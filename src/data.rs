//! Payloads the panel can be opened for
//!
//! Payloads belong to the feature data source. The panel holds them through
//! `Rc` for as long as it shows them and never copies their content.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Identity of a payload, stable across process restarts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadId(pub String);

impl PayloadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PayloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How much of the panel is revealed when a feature is first shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningMode {
    /// Collapsed to the preview block
    #[default]
    Preview,
    /// Collapsed, but at least `preview_plus_ratio` of the parent tall
    PreviewPlus,
    /// Fully expanded
    Details,
}

/// Road hazard attached to a route warning mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadWarning {
    Toll,
    Ferry,
    Unpaved,
}

/// A selected map feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub id: PayloadId,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub opening_mode: OpeningMode,
    #[serde(default)]
    pub is_my_position: bool,
    #[serde(default)]
    pub is_bookmark: bool,
    #[serde(default)]
    pub is_track: bool,
    #[serde(default)]
    pub is_route_point: bool,
    #[serde(default)]
    pub road_warning: Option<RoadWarning>,
}

impl FeatureInfo {
    /// Plain feature at the given coordinates with default flags
    pub fn new(id: impl Into<String>, title: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: PayloadId::new(id),
            title: title.into(),
            subtitle: String::new(),
            lat,
            lon,
            opening_mode: OpeningMode::Preview,
            is_my_position: false,
            is_bookmark: false,
            is_track: false,
            is_route_point: false,
            road_warning: None,
        }
    }

    pub fn with_opening_mode(mut self, mode: OpeningMode) -> Self {
        self.opening_mode = mode;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
}

/// A horizontally scrolling gallery of guides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryData {
    pub id: PayloadId,
    pub title: String,
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationPoint {
    pub distance_m: f64,
    pub altitude_m: f64,
}

/// Elevation chart of a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevationProfileData {
    pub id: PayloadId,
    pub track_name: String,
    #[serde(default)]
    pub points: Vec<ElevationPoint>,
}

/// Summary numbers shown in the elevation panel header
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElevationSummary {
    pub ascent_m: f64,
    pub descent_m: f64,
    pub min_altitude_m: f64,
    pub max_altitude_m: f64,
    pub length_m: f64,
}

impl ElevationProfileData {
    pub fn summary(&self) -> ElevationSummary {
        let Some(first) = self.points.first() else {
            return ElevationSummary::default();
        };

        let mut summary = ElevationSummary {
            min_altitude_m: first.altitude_m,
            max_altitude_m: first.altitude_m,
            ..ElevationSummary::default()
        };
        for pair in self.points.windows(2) {
            let delta = pair[1].altitude_m - pair[0].altitude_m;
            if delta > 0.0 {
                summary.ascent_m += delta;
            } else {
                summary.descent_m -= delta;
            }
            summary.min_altitude_m = summary.min_altitude_m.min(pair[1].altitude_m);
            summary.max_altitude_m = summary.max_altitude_m.max(pair[1].altitude_m);
        }
        if let Some(last) = self.points.last() {
            summary.length_m = last.distance_m - first.distance_m;
        }
        summary
    }
}

/// Tagged payload the panel composite dispatches on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacePageData {
    Feature(FeatureInfo),
    GuidesGallery(GalleryData),
    ElevationProfile(ElevationProfileData),
}

impl PlacePageData {
    pub fn id(&self) -> &PayloadId {
        match self {
            PlacePageData::Feature(info) => &info.id,
            PlacePageData::GuidesGallery(gallery) => &gallery.id,
            PlacePageData::ElevationProfile(profile) => &profile.id,
        }
    }

    /// Opening mode for features; other payloads always open collapsed
    pub fn opening_mode(&self) -> OpeningMode {
        match self {
            PlacePageData::Feature(info) => info.opening_mode,
            _ => OpeningMode::Preview,
        }
    }

    pub fn as_feature(&self) -> Option<&FeatureInfo> {
        match self {
            PlacePageData::Feature(info) => Some(info),
            _ => None,
        }
    }

    /// Short description for logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            PlacePageData::Feature(_) => "feature",
            PlacePageData::GuidesGallery(_) => "guides_gallery",
            PlacePageData::ElevationProfile(_) => "elevation_profile",
        }
    }
}

/// Shared handle to a payload owned by the data source
pub type DataRef = Rc<PlacePageData>;
