// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::f64::consts::PI;

use super::{CellSlot, MapView, ViewHost, ViewKey, ViewOptions, ViewState};
use crate::geometry::PixelPoint;
use crate::model::GeoPoint;

pub const TILE_SIZE: f64 = 256.0;
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_8;

/// Web-Mercator world pixel coordinates at `zoom`.
fn world_pixel(point: GeoPoint, zoom: f64) -> PixelPoint {
    let scale = TILE_SIZE * zoom.exp2();
    let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (point.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    PixelPoint::new(x, y)
}

/// A map view without tiles or DOM: a fixed viewport centered on the view state.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessView {
    state: ViewState,
    width: f64,
    height: f64,
    max_zoom: Option<f64>,
    removed: bool,
}

impl HeadlessView {
    pub fn new(state: ViewState, width: f64, height: f64) -> Self {
        Self { state, width, height, max_zoom: None, removed: false }
    }

    pub fn with_max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = Some(max_zoom);
        self
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl MapView for HeadlessView {
    fn set_view(&mut self, center: GeoPoint, zoom: f64) {
        let zoom = match self.max_zoom {
            Some(max_zoom) => zoom.min(max_zoom),
            None => zoom,
        };
        self.state = ViewState::new(center, zoom);
    }

    fn center(&self) -> GeoPoint {
        self.state.center
    }

    fn zoom(&self) -> f64 {
        self.state.zoom
    }

    fn project(&self, point: GeoPoint) -> PixelPoint {
        let origin = world_pixel(self.state.center, self.state.zoom);
        let world = world_pixel(point, self.state.zoom);
        PixelPoint::new(
            world.x - origin.x + self.width / 2.0,
            world.y - origin.y + self.height / 2.0,
        )
    }

    fn remove(&mut self) {
        self.removed = true;
    }
}

/// Host for headless views that records row attach/detach traffic.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessHost {
    width: f64,
    height: f64,
    attached_rows: usize,
    created: Vec<ViewKey>,
    released: Vec<ViewKey>,
}

impl HeadlessHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            attached_rows: 0,
            created: Vec::new(),
            released: Vec::new(),
        }
    }

    pub fn attached_rows(&self) -> usize {
        self.attached_rows
    }

    pub fn created(&self) -> &[ViewKey] {
        &self.created
    }

    pub fn released(&self) -> &[ViewKey] {
        &self.released
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(256.0, 256.0)
    }
}

impl ViewHost for HeadlessHost {
    type View = HeadlessView;

    fn attach_row(&mut self, _index: usize) {
        self.attached_rows += 1;
    }

    fn create_view(&mut self, slot: &CellSlot, options: &ViewOptions) -> HeadlessView {
        self.created.push(slot.key);
        HeadlessView::new(options.initial, self.width, self.height)
            .with_max_zoom(f64::from(options.tile_source.max_zoom))
    }

    fn detach_row(&mut self, _index: usize, released: &[ViewKey]) {
        self.attached_rows = self.attached_rows.saturating_sub(1);
        self.released.extend_from_slice(released);
    }
}

#[cfg(test)]
mod tests {
    use super::{HeadlessView, TILE_SIZE};
    use crate::model::GeoPoint;
    use crate::view::{MapView, ViewState};

    #[test]
    fn center_projects_to_viewport_middle() {
        let center = GeoPoint::new(-33.45, -70.66);
        let view = HeadlessView::new(ViewState::new(center, 11.0), 300.0, 200.0);
        let p = view.project(center);
        assert!((p.x - 150.0).abs() < 1e-9);
        assert!((p.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn one_world_width_spans_tile_size_at_zoom_zero() {
        let view = HeadlessView::new(ViewState::new(GeoPoint::new(0.0, 0.0), 0.0), 0.0, 0.0);
        let west = view.project(GeoPoint::new(0.0, -180.0));
        let east = view.project(GeoPoint::new(0.0, 180.0));
        assert!((east.x - west.x - TILE_SIZE).abs() < 1e-9);
    }

    #[test]
    fn set_view_respects_max_zoom_and_remove_marks_view() {
        let mut view =
            HeadlessView::new(ViewState::new(GeoPoint::new(0.0, 0.0), 3.0), 10.0, 10.0)
                .with_max_zoom(18.0);
        view.set_view(GeoPoint::new(1.0, 2.0), 22.0);
        assert_eq!(view.zoom(), 18.0);
        assert_eq!(view.center(), GeoPoint::new(1.0, 2.0));

        assert!(!view.is_removed());
        view.remove();
        assert!(view.is_removed());
    }
}
