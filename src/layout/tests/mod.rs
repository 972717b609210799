//! Unit tests for widget placement

#![allow(clippy::unwrap_used)]

use crate::{
    layout::{
        Anchor, AnchorSpec, Point, Size, apply_anchor, compute_position, compute_target,
        resolve_anchor,
    },
    profiles::{PositionMode, Profile, WidgetEntry},
};

const SCREEN: Size = Size::new(1200.0, 800.0);

fn grid_widget(col: f64, row: f64) -> WidgetEntry {
    WidgetEntry {
        grid_col: Some(col),
        grid_row: Some(row),
        ..WidgetEntry::new("customtext")
    }
}

fn coordinate_profile() -> Profile {
    let mut profile = Profile::new("Free");
    profile.position_mode = Some(PositionMode::Coordinate);
    profile
}

mod anchors {
    use super::*;

    #[test]
    fn named_anchors_map_to_three_by_three_grid() {
        assert_eq!(Anchor::named("top-left"), Some(Anchor { x: 0.0, y: 0.0 }));
        assert_eq!(Anchor::named("center-center"), Some(Anchor { x: 0.5, y: 0.5 }));
        assert_eq!(Anchor::named("bottom-right"), Some(Anchor { x: 1.0, y: 1.0 }));
        assert_eq!(Anchor::named("Center-Right"), Some(Anchor::CENTER_RIGHT));
    }

    #[test]
    fn unknown_or_missing_names_fall_back_to_center() {
        assert_eq!(Anchor::parse(Some("middle")), Anchor::CENTER_CENTER);
        assert_eq!(Anchor::parse(None), Anchor::CENTER_CENTER);
        assert_eq!(AnchorSpec::from("nowhere").resolve(), Anchor::CENTER_CENTER);
    }

    #[test]
    fn point_spec_is_used_verbatim() {
        let spec = AnchorSpec::Point { x: 0.25, y: 0.75 };
        assert_eq!(spec.resolve(), Anchor { x: 0.25, y: 0.75 });
        assert_eq!(spec.to_string(), "(0.25, 0.75)");
    }

    #[test]
    fn apply_anchor_subtracts_scaled_size() {
        let anchored = apply_anchor(600.0, 400.0, 100.0, 40.0, &Anchor::CENTER_CENTER);
        assert_eq!(anchored, Point::new(550.0, 380.0));

        let anchored = apply_anchor(600.0, 400.0, 100.0, 40.0, &Anchor::BOTTOM_RIGHT);
        assert_eq!(anchored, Point::new(500.0, 360.0));
    }

    #[test]
    fn top_left_ignores_element_size() {
        for size in [Size::new(1.0, 1.0), Size::new(300.0, 90.0)] {
            assert_eq!(
                Anchor::TOP_LEFT.apply(Point::new(600.0, 400.0), size),
                Point::new(600.0, 400.0)
            );
        }
    }
}

mod targets {
    use super::*;

    #[test]
    fn grid_cell_maps_to_screen_point() {
        let profile = Profile::new("Grid");

        let target = compute_target(&grid_widget(3.0, 2.0), &profile, SCREEN);

        assert_eq!(target, Point::new(600.0, 400.0));
    }

    #[test]
    fn fractional_grid_cells() {
        let profile = Profile::new("Grid");

        let target = compute_target(&grid_widget(1.5, 0.5), &profile, SCREEN);

        assert_eq!(target, Point::new(300.0, 100.0));
    }

    #[test]
    fn zero_grid_columns_use_default_grid() {
        let mut profile = Profile::new("Grid");
        profile.grid_columns = Some(0);

        let target = compute_target(&grid_widget(0.0, 2.0), &profile, SCREEN);

        assert!(target.x.is_finite() && target.y.is_finite());
        assert_eq!(target, Point::new(0.0, 400.0));

        profile.grid_columns = Some(6);
        profile.grid_rows = Some(0);
        let target = compute_target(&grid_widget(3.0, 2.0), &profile, SCREEN);
        assert_eq!(target, Point::new(600.0, 400.0));
    }

    #[test]
    fn unset_grid_position_is_center() {
        let profile = Profile::new("Grid");

        let target = compute_target(&WidgetEntry::new("customtext"), &profile, SCREEN);

        assert_eq!(target, Point::new(600.0, 400.0));
    }

    #[test]
    fn coordinate_mode_uses_pixels() {
        let entry = WidgetEntry {
            x: Some(42.0),
            y: Some(17.0),
            ..grid_widget(5.0, 1.0)
        };

        let target = compute_target(&entry, &coordinate_profile(), SCREEN);

        assert_eq!(target, Point::new(42.0, 17.0));
    }

    #[test]
    fn coordinate_mode_defaults_to_hundred() {
        let target = compute_target(&WidgetEntry::new("t"), &coordinate_profile(), SCREEN);

        assert_eq!(target, Point::new(100.0, 100.0));
    }
}

mod positions {
    use super::*;

    #[test]
    fn grid_example_with_top_left_anchor() {
        let entry = WidgetEntry {
            anchor: Some(AnchorSpec::from("top-left")),
            ..grid_widget(3.0, 2.0)
        };

        let position = compute_position(&entry, &Profile::new("G"), SCREEN, Size::new(100.0, 40.0), None);

        assert_eq!(position, Point::new(600.0, 400.0));
    }

    #[test]
    fn grid_example_with_center_anchor() {
        let entry = WidgetEntry {
            anchor: Some(AnchorSpec::from("center-center")),
            ..grid_widget(3.0, 2.0)
        };

        let position = compute_position(&entry, &Profile::new("G"), SCREEN, Size::new(100.0, 40.0), None);

        assert_eq!(position, Point::new(550.0, 380.0));
    }

    #[test]
    fn anchor_resolution_order() {
        let plugin = AnchorSpec::from("bottom-left");
        let mut entry = grid_widget(3.0, 2.0);

        assert_eq!(resolve_anchor(&entry, None), Anchor::CENTER_CENTER);
        assert_eq!(resolve_anchor(&entry, Some(&plugin)), Anchor::BOTTOM_LEFT);

        entry.anchor = Some(AnchorSpec::from(""));
        assert_eq!(resolve_anchor(&entry, Some(&plugin)), Anchor::BOTTOM_LEFT);

        entry.anchor = Some(AnchorSpec::from("top-right"));
        assert_eq!(resolve_anchor(&entry, Some(&plugin)), Anchor::TOP_RIGHT);
    }

    #[test]
    fn plugin_default_applies_to_position() {
        let plugin = AnchorSpec::from("bottom-right");

        let position = compute_position(
            &grid_widget(3.0, 2.0),
            &Profile::new("G"),
            SCREEN,
            Size::new(200.0, 50.0),
            Some(&plugin),
        );

        assert_eq!(position, Point::new(400.0, 350.0));
    }

    #[test]
    fn unmeasured_size_is_detected() {
        assert!(Size::default().is_unmeasured());
        assert!(!Size::new(0.0, 10.0).is_unmeasured());
    }
}
