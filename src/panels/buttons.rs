//! Button bar of the place-page variant

use crate::data::{FeatureInfo, RoadWarning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonType {
    RouteFrom,
    RouteTo,
    RouteRemove,
    RouteAvoidToll,
    RouteAvoidFerry,
    RouteAvoidUnpaved,
    BookmarkSave,
    BookmarkDelete,
    TrackDelete,
    /// Opens the overflow menu
    More,
}

impl ButtonType {
    pub fn label(self) -> &'static str {
        match self {
            ButtonType::RouteFrom => "From",
            ButtonType::RouteTo => "To",
            ButtonType::RouteRemove => "Remove",
            ButtonType::RouteAvoidToll => "Avoid tolls",
            ButtonType::RouteAvoidFerry => "Avoid ferry",
            ButtonType::RouteAvoidUnpaved => "Avoid unpaved",
            ButtonType::BookmarkSave => "Save",
            ButtonType::BookmarkDelete => "Delete",
            ButtonType::TrackDelete => "Delete track",
            ButtonType::More => "More",
        }
    }
}

/// Buttons laid out in the bar plus those moved to the overflow menu
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ButtonBar {
    pub visible: Vec<ButtonType>,
    pub overflow: Vec<ButtonType>,
}

/// Buttons offered for a feature, in bar order
pub fn buttons_for(feature: &FeatureInfo, is_bookmark: bool) -> Vec<ButtonType> {
    if let Some(warning) = feature.road_warning {
        return vec![match warning {
            RoadWarning::Toll => ButtonType::RouteAvoidToll,
            RoadWarning::Ferry => ButtonType::RouteAvoidFerry,
            RoadWarning::Unpaved => ButtonType::RouteAvoidUnpaved,
        }];
    }
    if feature.is_route_point {
        return vec![ButtonType::RouteRemove];
    }

    let routing = !feature.is_my_position;
    let mut buttons = Vec::with_capacity(4);
    if routing {
        buttons.push(ButtonType::RouteFrom);
    }
    buttons.push(if is_bookmark {
        ButtonType::BookmarkDelete
    } else {
        ButtonType::BookmarkSave
    });
    if feature.is_track {
        buttons.push(ButtonType::TrackDelete);
    }
    if routing {
        buttons.push(ButtonType::RouteTo);
    }
    buttons
}

/// Split buttons between the bar and the overflow menu
///
/// With more than `max_buttons` buttons the first `max_buttons - 1` stay in
/// the bar followed by `More`; the rest keep their relative order.
pub fn layout_buttons(buttons: Vec<ButtonType>, max_buttons: usize) -> ButtonBar {
    let max_buttons = max_buttons.max(1);
    if buttons.len() <= max_buttons {
        return ButtonBar {
            visible: buttons,
            overflow: Vec::new(),
        };
    }
    let mut visible = buttons;
    let overflow = visible.split_off(max_buttons - 1);
    visible.push(ButtonType::More);
    ButtonBar { visible, overflow }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature() -> FeatureInfo {
        FeatureInfo::new("node/1", "Cafe", 52.5, 13.4)
    }

    #[test]
    fn test_plain_feature_buttons() {
        assert_eq!(
            buttons_for(&feature(), false),
            vec![
                ButtonType::RouteFrom,
                ButtonType::BookmarkSave,
                ButtonType::RouteTo
            ]
        );
        assert_eq!(
            buttons_for(&feature(), true)[1],
            ButtonType::BookmarkDelete
        );
    }

    #[test]
    fn test_my_position_has_no_routing() {
        let info = FeatureInfo {
            is_my_position: true,
            ..feature()
        };
        assert_eq!(buttons_for(&info, false), vec![ButtonType::BookmarkSave]);
    }

    #[test]
    fn test_road_warning_and_route_point_are_exclusive() {
        let warning = FeatureInfo {
            road_warning: Some(RoadWarning::Ferry),
            is_route_point: true,
            ..feature()
        };
        assert_eq!(
            buttons_for(&warning, false),
            vec![ButtonType::RouteAvoidFerry]
        );

        let point = FeatureInfo {
            is_route_point: true,
            ..feature()
        };
        assert_eq!(buttons_for(&point, false), vec![ButtonType::RouteRemove]);
    }

    #[test]
    fn test_overflow_keeps_order() {
        let track = FeatureInfo {
            is_track: true,
            ..feature()
        };
        let bar = layout_buttons(buttons_for(&track, false), 3);
        assert_eq!(
            bar.visible,
            vec![
                ButtonType::RouteFrom,
                ButtonType::BookmarkSave,
                ButtonType::More
            ]
        );
        assert_eq!(
            bar.overflow,
            vec![ButtonType::TrackDelete, ButtonType::RouteTo]
        );
    }

    #[test]
    fn test_no_overflow_when_everything_fits() {
        let bar = layout_buttons(buttons_for(&feature(), false), 4);
        assert_eq!(bar.visible.len(), 3);
        assert!(bar.overflow.is_empty());
    }
}
