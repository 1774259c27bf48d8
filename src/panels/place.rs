//! Place-page variant: details of a selected map feature

use tracing::debug;

use super::buttons::{buttons_for, layout_buttons, ButtonBar};
use super::{Closable, HostContext, Initializable, PanelController, VariantCore, VariantId};
use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::data::{DataRef, PlacePageData};
use crate::messages::Location;

const EARTH_RADIUS_M: f64 = 6_378_000.0;

/// Content derived from the bound feature and the sensors
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceDetails {
    pub is_bookmark: bool,
    pub buttons: ButtonBar,
    /// Distance from the device to the feature
    pub distance_m: Option<f64>,
    /// Direction from the device to the feature, degrees clockwise from north
    pub bearing_deg: Option<f64>,
    /// Direction arrow relative to where the device is heading
    pub azimuth_deg: Option<f64>,
    /// Last fix, shown as coordinates when the feature is the device itself
    pub my_position: Option<Location>,
}

pub struct PlacePagePanel {
    core: VariantCore,
    max_buttons: usize,
    details: PlaceDetails,
    last_location: Option<Location>,
}

impl PlacePagePanel {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            core: VariantCore::new(VariantId::PlacePage, config),
            max_buttons: config.max_buttons,
            details: PlaceDetails::default(),
            last_location: None,
        }
    }

    pub fn details(&self) -> &PlaceDetails {
        &self.details
    }

    fn refresh_buttons(&mut self) {
        let Some(feature) = self.core.data().and_then(|data| data.as_feature()) else {
            self.details.buttons = ButtonBar::default();
            return;
        };
        self.details.buttons = layout_buttons(
            buttons_for(feature, self.details.is_bookmark),
            self.max_buttons,
        );
    }

    fn refresh_distance(&mut self) {
        let Some(location) = self.last_location else {
            return;
        };
        let Some(feature) = self.core.data().and_then(|data| data.as_feature()) else {
            return;
        };
        if feature.is_my_position {
            self.details.my_position = Some(location);
            self.details.distance_m = None;
            self.details.bearing_deg = None;
            return;
        }
        self.details.distance_m = Some(distance_m(
            location.lat,
            location.lon,
            feature.lat,
            feature.lon,
        ));
        self.details.bearing_deg = Some(bearing_deg(
            location.lat,
            location.lon,
            feature.lat,
            feature.lon,
        ));
    }
}

impl Initializable for PlacePagePanel {
    fn initialize(&mut self, ctx: &HostContext, out: &mut Vec<Cmd>) {
        self.core.initialize(ctx, out);
    }

    fn destroy(&mut self) {
        self.core.destroy();
        self.details = PlaceDetails::default();
        self.last_location = None;
    }
}

impl Closable for PlacePagePanel {
    fn close(&mut self, deactivate_selection: bool, out: &mut Vec<Cmd>) {
        self.core.close(deactivate_selection, out);
    }

    fn is_closed(&self) -> bool {
        self.core.sheet().is_hidden()
    }
}

impl PanelController for PlacePagePanel {
    fn id(&self) -> VariantId {
        VariantId::PlacePage
    }

    fn support(&self, data: &PlacePageData) -> bool {
        matches!(data, PlacePageData::Feature(_))
    }

    fn core(&self) -> &VariantCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VariantCore {
        &mut self.core
    }

    fn on_bind(&mut self, data: &DataRef) {
        self.details = PlaceDetails {
            is_bookmark: data.as_feature().is_some_and(|f| f.is_bookmark),
            ..PlaceDetails::default()
        };
        self.refresh_buttons();
        self.refresh_distance();
    }

    fn on_unbind(&mut self) {
        self.details = PlaceDetails::default();
    }

    fn on_location(&mut self, location: Location) {
        self.last_location = Some(location);
        self.refresh_distance();
    }

    fn on_compass(&mut self, magnetic_north: f64, true_north: f64) {
        let north = if true_north >= 0.0 {
            true_north
        } else {
            magnetic_north
        };
        self.details.azimuth_deg = self
            .details
            .bearing_deg
            .map(|bearing| normalize_degrees(bearing - north));
    }

    fn on_bookmark_changed(&mut self, is_bookmark: bool, out: &mut Vec<Cmd>) {
        if self.core.data().and_then(|data| data.as_feature()).is_none() {
            return;
        }
        self.details.is_bookmark = is_bookmark;
        self.refresh_buttons();
        if is_bookmark {
            debug!(target: "panel", "bookmark set, promoting collapsed panel");
            self.core.sheet_mut().promote(out);
        }
    }
}

/// Great-circle distance in metres
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();
    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Initial bearing from the first point to the second, in `[0, 360)`
pub fn bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_lambda = (lon2 - lon1).to_radians();
    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

fn normalize_degrees(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}
