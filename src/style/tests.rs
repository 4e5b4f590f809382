// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::hover::tooltip_text;
use super::{
    build_scales, hover_effect, style_clustered_path, style_individual_path, zoom_marker_size,
    zoom_stroke_width, Paint, PathKind, PathSet, PointerEvent, PointerPhase, Rgb,
    CLUSTER_HOVER_COLOR, CLUSTER_STROKE_WIDTH, DESTINATION_COLOR, ORIGIN_COLOR,
};
use crate::geometry::Percent;
use crate::model::fixtures::{cluster, fid, record, record_between, CENTER};
use crate::model::{FlowRecord, GeoPoint};
use crate::view::headless::HeadlessView;
use crate::view::ViewState;

#[fixture]
fn view() -> HeadlessView {
    HeadlessView::new(ViewState::new(CENTER, 12.0), 400.0, 400.0)
}

#[rstest]
fn individual_path_strokes_with_its_own_gradient(view: HeadlessView) {
    let scales = build_scales();
    let flow = record("17", 1, 3.0).with_norm_total(0.001);

    let (path, gradient) = style_individual_path(&flow, &view, &scales);

    assert_eq!(gradient.id, "gradient17");
    assert_eq!(path.style.stroke, Paint::Url("gradient17".to_owned()));
    assert_eq!(path.style.stroke.to_string(), "url(#gradient17)");
    assert!((path.style.stroke_opacity - 0.55).abs() < 1e-9);
    assert!(path.style.pointer_events);
    assert_eq!(path.style.marker_end, None);

    assert_eq!(gradient.stops[0].offset, Percent::new(0));
    assert_eq!(gradient.stops[0].color, DESTINATION_COLOR);
    assert_eq!(gradient.stops[1].offset, Percent::new(100));
    assert_eq!(gradient.stops[1].color, ORIGIN_COLOR);
    assert_eq!(ORIGIN_COLOR.to_string(), "#FFA500");
    assert_eq!(DESTINATION_COLOR.to_string(), "#008080");
}

#[rstest]
fn individual_gradient_axis_follows_flow_direction(view: HeadlessView) {
    let scales = build_scales();
    // Due east on screen: angle 0.
    let east = record_between(
        "east",
        1,
        GeoPoint::new(-33.45, -70.70),
        GeoPoint::new(-33.45, -70.60),
    );

    let (_, gradient) = style_individual_path(&east, &view, &scales);

    assert_eq!(gradient.axis.x1.to_string(), "50%");
    assert_eq!(gradient.axis.y1.to_string(), "100%");
    assert_eq!(gradient.axis.x2.to_string(), "50%");
    assert_eq!(gradient.axis.y2.to_string(), "0%");
}

#[rstest]
fn clustered_path_uses_palette_color_marker_and_fixed_width(view: HeadlessView) {
    let scales = build_scales();
    let flow = cluster("c1", 1, 0.002);

    let (path, marker) = style_clustered_path(&flow, &view, &scales);

    let expected_color = Rgb::new(175, 240, 91);
    assert_eq!(path.style.stroke, Paint::Color(expected_color));
    assert_eq!(path.style.stroke_width, Some(CLUSTER_STROKE_WIDTH));
    assert_eq!(path.style.marker_end, Some(Paint::Url("markerc1".to_owned())));
    assert!((path.style.stroke_opacity - 1.0).abs() < 1e-9);

    assert_eq!(marker.id, "markerc1");
    assert_eq!(marker.fill, expected_color);
    assert_eq!(marker.view_box, "0 0 12 12");
    assert_eq!((marker.ref_x, marker.ref_y), (9.0, 6.0));
    assert_eq!((marker.width, marker.height), (7.0, 7.0));
    assert_eq!(marker.path, "M2,2 L10,6 L2,10 L6,6 L2,2");
    assert!((marker.opacity - path.style.stroke_opacity).abs() < 1e-12);
    assert!((marker.orient - crate::geometry::flow_angle(&flow, &view)).abs() < 1e-12);
}

#[rstest]
fn path_sets_pair_paths_with_definitions(view: HeadlessView) {
    let scales = build_scales();
    let records = [record("a", 1, 1.0), record("b", 1, 2.0)];
    let individual = PathSet::individual(records.iter(), &view, &scales);
    assert_eq!(individual.paths.len(), 2);
    assert_eq!(individual.gradients.len(), 2);
    assert!(individual.markers.is_empty());

    let clustered = PathSet::clustered(&[cluster("k", 0, 0.0)], &view, &scales);
    assert_eq!(clustered.paths.len(), 1);
    assert_eq!(clustered.markers.len(), 1);
    assert!(clustered.gradients.is_empty());

    assert!(PathSet::individual(std::iter::empty::<&FlowRecord>(), &view, &scales).is_empty());
}

#[rstest]
#[case(3.0)]
#[case(6.0)]
#[case(10.0)]
#[case(13.0)]
#[case(18.0)]
fn zoom_restyle_is_a_fixed_offset(#[case] zoom: f64) {
    assert_eq!(zoom_stroke_width(zoom), zoom - 6.0);
    assert_eq!(zoom_marker_size(zoom), zoom - 5.0);
}

#[test]
fn tooltip_text_formats_distance_norm_and_index() {
    let individual = PathKind::Individual { distance: 1.23456, norm_total: 0.0012345 };
    assert_eq!(tooltip_text(&individual), "distance: 1.23 \n norm: 0.001");

    let clustered = PathKind::Clustered { index: 3, norm_total: 0.5, simpson_index: None };
    assert_eq!(tooltip_text(&clustered), "index: 3.00");
}

#[rstest]
fn hover_enter_and_leave_on_individual_path(view: HeadlessView) {
    let scales = build_scales();
    let (path, _) = style_individual_path(&record("a", 1, 1.0), &view, &scales);

    let enter = PointerEvent {
        phase: PointerPhase::Enter,
        flow_id: fid("a"),
        page_x: 100.0,
        page_y: 40.0,
    };
    let effect = hover_effect(&enter, &path);
    assert_eq!(effect.tooltip.left, Some(110.0));
    assert_eq!(effect.tooltip.top, Some(35.0));
    assert_eq!(effect.tooltip.transition.duration_ms, 150);
    assert_eq!(effect.tooltip.transition.opacity, 0.9);
    assert_eq!(effect.tooltip.text.as_deref(), Some("distance: 0.00 \n norm: 0.000"));
    assert_eq!(effect.stroke, None);

    let leave = PointerEvent { phase: PointerPhase::Leave, ..enter };
    let effect = hover_effect(&leave, &path);
    assert_eq!(effect.tooltip.transition.opacity, 0.0);
    assert_eq!(effect.tooltip.text, None);
    assert_eq!(effect.stroke, None);
}

#[rstest]
fn hover_on_clustered_path_highlights_then_restores_stroke(view: HeadlessView) {
    let scales = build_scales();
    let (path, _) = style_clustered_path(&cluster("k", 0, 0.001), &view, &scales);

    let enter = PointerEvent {
        phase: PointerPhase::Enter,
        flow_id: fid("k"),
        page_x: 0.0,
        page_y: 0.0,
    };
    let effect = hover_effect(&enter, &path);
    assert_eq!(effect.stroke, Some(Paint::Color(CLUSTER_HOVER_COLOR)));
    assert_eq!(effect.tooltip.text.as_deref(), Some("index: 0.00"));

    let leave = PointerEvent { phase: PointerPhase::Leave, ..enter };
    let effect = hover_effect(&leave, &path);
    assert_eq!(effect.stroke, Some(path.base_stroke.clone()));
}
