// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use super::MapView;
use crate::geometry::{path_data, project_flow, PathShape};
use crate::model::FlowId;
use crate::style::{
    zoom_marker_size, zoom_stroke_width, GradientDef, HoverEffect, MarkerDef, PathSet, StyledPath,
};

/// A styled path as last committed to a view, with its current path data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommittedPath {
    #[serde(flatten)]
    pub styled: StyledPath,
    /// SVG path data; `None` until the first geometry pass.
    pub d: Option<String>,
}

/// The vector layer of one view cell.
///
/// Every commit replaces the whole layer (paths and definitions), so re-running a render pass
/// is idempotent. `rev` increments on every mutation so hosts can skip unchanged surfaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathSurface {
    paths: Vec<CommittedPath>,
    gradients: Vec<GradientDef>,
    markers: Vec<MarkerDef>,
    rev: u64,
}

impl PathSurface {
    pub fn paths(&self) -> &[CommittedPath] {
        &self.paths
    }

    pub fn gradients(&self) -> &[GradientDef] {
        &self.gradients
    }

    pub fn markers(&self) -> &[MarkerDef] {
        &self.markers
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn path(&self, flow_id: &FlowId) -> Option<&CommittedPath> {
        self.paths.iter().find(|path| &path.styled.flow_id == flow_id)
    }

    pub fn replace(&mut self, set: PathSet) {
        let PathSet { paths, gradients, markers } = set;
        self.paths = paths.into_iter().map(|styled| CommittedPath { styled, d: None }).collect();
        self.gradients = gradients;
        self.markers = markers;
        self.bump_rev();
    }

    pub fn clear(&mut self) {
        self.replace(PathSet::default());
    }

    /// Recomputes path data against the view's current projection and applies the
    /// zoom-dependent stroke width and marker size.
    pub fn refresh_geometry<V>(&mut self, view: &V, shape: PathShape)
    where
        V: MapView + ?Sized,
    {
        let zoom = view.zoom();
        let stroke_width = zoom_stroke_width(zoom);
        for path in &mut self.paths {
            let projected = project_flow(&path.styled, view);
            path.d = Some(path_data(&projected, shape));
            path.styled.style.stroke_width = Some(stroke_width);
        }

        self.set_marker_size(zoom_marker_size(zoom));
        self.bump_rev();
    }

    /// Sizes every marker for `zoom` without touching path data. Surfaces without markers keep
    /// their revision.
    pub fn resize_markers(&mut self, zoom: f64) {
        if self.markers.is_empty() {
            return;
        }
        self.set_marker_size(zoom_marker_size(zoom));
        self.bump_rev();
    }

    fn set_marker_size(&mut self, size: f64) {
        for marker in &mut self.markers {
            marker.width = size;
            marker.height = size;
        }
    }

    /// Applies a hover style delta to one path. Returns `false` if the path is not on this
    /// surface.
    pub fn apply_hover(&mut self, flow_id: &FlowId, effect: &HoverEffect) -> bool {
        let Some(path) = self.paths.iter_mut().find(|path| &path.styled.flow_id == flow_id)
        else {
            return false;
        };
        if let Some(stroke) = &effect.stroke {
            path.styled.style.stroke = stroke.clone();
            self.bump_rev();
        }
        true
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::PathSurface;
    use crate::geometry::PathShape;
    use crate::model::fixtures::{cluster, record, CENTER};
    use crate::style::{build_scales, PathSet};
    use crate::view::headless::HeadlessView;
    use crate::view::{MapView, ViewState};

    #[test]
    fn replace_overwrites_instead_of_appending() {
        let view = HeadlessView::new(ViewState::new(CENTER, 12.0), 256.0, 256.0);
        let scales = build_scales();
        let records = [record("a", 1, 1.0), record("b", 1, 1.0)];

        let mut surface = PathSurface::default();
        surface.replace(PathSet::individual(records.iter(), &view, &scales));
        surface.replace(PathSet::individual(records.iter(), &view, &scales));

        assert_eq!(surface.paths().len(), 2);
        assert_eq!(surface.gradients().len(), 2);
        assert_eq!(surface.rev(), 2);

        surface.clear();
        assert!(surface.is_empty());
        assert!(surface.gradients().is_empty());
    }

    #[test]
    fn refresh_geometry_tracks_current_zoom() {
        let mut view = HeadlessView::new(ViewState::new(CENTER, 12.0), 256.0, 256.0);
        let scales = build_scales();

        let mut surface = PathSurface::default();
        surface.replace(PathSet::clustered(&[cluster("k", 0, 0.001)], &view, &scales));
        assert_eq!(surface.paths()[0].d, None);

        surface.refresh_geometry(&view, PathShape::Line);
        let first = surface.paths()[0].d.clone().expect("path data");
        assert_eq!(surface.paths()[0].styled.style.stroke_width, Some(6.0));
        assert_eq!(surface.markers()[0].width, 7.0);
        assert_eq!(surface.markers()[0].height, 7.0);

        view.set_view(CENTER, 14.0);
        surface.refresh_geometry(&view, PathShape::Line);
        let second = surface.paths()[0].d.clone().expect("path data");
        assert_ne!(first, second);
        assert_eq!(surface.paths()[0].styled.style.stroke_width, Some(8.0));
        assert_eq!(surface.markers()[0].width, 9.0);
        assert_eq!(surface.markers()[0].height, 9.0);
    }

    #[test]
    fn resize_markers_leaves_path_data_alone() {
        let view = HeadlessView::new(ViewState::new(CENTER, 10.0), 256.0, 256.0);
        let scales = build_scales();

        let mut surface = PathSurface::default();
        surface.replace(PathSet::clustered(&[cluster("k", 0, 0.001)], &view, &scales));
        surface.refresh_geometry(&view, PathShape::Line);
        let d = surface.paths()[0].d.clone();
        let rev = surface.rev();

        surface.resize_markers(15.0);

        assert_eq!(surface.markers()[0].width, 10.0);
        assert_eq!(surface.markers()[0].height, 10.0);
        assert_eq!(surface.paths()[0].d, d);
        assert_eq!(surface.rev(), rev + 1);
    }

    #[test]
    fn resize_markers_without_markers_keeps_the_revision() {
        let view = HeadlessView::new(ViewState::new(CENTER, 10.0), 256.0, 256.0);
        let scales = build_scales();

        let mut surface = PathSurface::default();
        surface.replace(PathSet::individual([record("a", 1, 1.0)].iter(), &view, &scales));
        let rev = surface.rev();

        surface.resize_markers(15.0);
        assert_eq!(surface.rev(), rev);
    }
}
