// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Map-view seam.
//!
//! The map widget itself (tiles, pan/zoom gestures, projection) lives in the host. This module
//! defines what the engine needs from it (`MapView`, `ViewHost`) plus a headless Web-Mercator
//! implementation used by tests, benches and the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TileSource;
use crate::geometry::PixelPoint;
use crate::model::{GeoPoint, GroupId};

pub mod headless;
pub mod surface;

pub use headless::{HeadlessHost, HeadlessView};
pub use surface::{CommittedPath, PathSurface};

/// Center and zoom shared by every synchronized view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub center: GeoPoint,
    pub zoom: f64,
}

impl ViewState {
    pub const fn new(center: GeoPoint, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

/// One interactive map surface owned by the host.
pub trait MapView {
    fn set_view(&mut self, center: GeoPoint, zoom: f64);

    fn center(&self) -> GeoPoint;

    fn zoom(&self) -> f64;

    /// Geographic → layer pixel coordinates under the current pan/zoom state.
    fn project(&self, point: GeoPoint) -> PixelPoint;

    /// Releases tiles, listeners and DOM the view holds. The view is dropped right after.
    fn remove(&mut self);

    fn state(&self) -> ViewState {
        ViewState::new(self.center(), self.zoom())
    }
}

/// Registration handle of a view inside the synchronization group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ViewKey(u64);

impl ViewKey {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// What a view cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "role", content = "group", rename_all = "snake_case")]
pub enum CellRole {
    Group(GroupId),
    Clustered,
}

/// Where a new view goes, handed to the host when the view is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSlot {
    pub row: usize,
    pub cell: usize,
    pub role: CellRole,
    pub key: ViewKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub initial: ViewState,
    pub tile_source: TileSource,
}

/// The host environment's view factory and row container.
pub trait ViewHost {
    type View: MapView;

    /// A row container is about to be filled at `index`.
    fn attach_row(&mut self, _index: usize) {}

    fn create_view(&mut self, slot: &CellSlot, options: &ViewOptions) -> Self::View;

    /// The row at `index` has been torn down; its views were removed and deregistered.
    fn detach_row(&mut self, _index: usize, _released: &[ViewKey]) {}
}

/// Gestures the grid reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    ZoomEnd,
    /// Pointer release, i.e. the end of a pan.
    PointerUp,
}
