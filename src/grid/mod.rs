// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The matrix of synchronized map views.
//!
//! Each row is a label cell followed by `MAPS_PER_ROW` view cells: groups 1..=4 and, last, the
//! clustered summary. All views of all rows share one center/zoom through a
//! `SynchronizationGroup`; any pan or zoom on one view is broadcast to every other.
//!
//! Rows are only added or removed at the tail, one at a time, and every structural change is
//! mirrored to the host (`ViewHost::attach_row` / `detach_row`) before the next one starts.

use std::fmt;

use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::config::{GridConfig, TileSource};
use crate::geometry::PathShape;
use crate::model::GroupId;
use crate::style::{hover_effect, PointerEvent, TooltipUpdate};
use crate::view::{
    CellRole, CellSlot, MapView, PathSurface, ViewEvent, ViewHost, ViewKey, ViewOptions,
    ViewState,
};

pub mod sync;

pub use sync::SynchronizationGroup;

pub const MAPS_PER_ROW: usize = 5;

/// Index of the clustered summary view inside a row.
pub const CLUSTERED_CELL: usize = MAPS_PER_ROW - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddr {
    pub row: usize,
    pub cell: usize,
}

impl CellAddr {
    pub const fn new(row: usize, cell: usize) -> Self {
        Self { row, cell }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    UnknownCell { row: usize, cell: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCell { row, cell } => write!(f, "no view cell at row {row}, cell {cell}"),
        }
    }
}

impl std::error::Error for GridError {}

/// One map view and the vector layer drawn on top of it.
#[derive(Debug)]
pub struct ViewCell<V> {
    key: ViewKey,
    role: CellRole,
    view: V,
    surface: PathSurface,
}

impl<V: MapView> ViewCell<V> {
    pub fn key(&self) -> ViewKey {
        self.key
    }

    pub fn role(&self) -> CellRole {
        self.role
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn surface(&self) -> &PathSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PathSurface {
        &mut self.surface
    }

    /// Re-projects the committed paths against the view's current state.
    pub fn refresh_geometry(&mut self, shape: PathShape) {
        self.surface.refresh_geometry(&self.view, shape);
    }
}

#[derive(Debug)]
pub struct MapRow<V> {
    label: String,
    cells: SmallVec<[ViewCell<V>; MAPS_PER_ROW]>,
}

impl<V: MapView> MapRow<V> {
    /// Range text shown in the row's label cell.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn cells(&self) -> &[ViewCell<V>] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [ViewCell<V>] {
        &mut self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&ViewCell<V>> {
        self.cells.get(index)
    }
}

/// Net structural change made by one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowDelta {
    pub added: usize,
    pub removed: usize,
}

pub struct ViewGrid<H: ViewHost> {
    host: H,
    rows: Vec<MapRow<H::View>>,
    sync: SynchronizationGroup,
    tile_source: TileSource,
    shape: PathShape,
    next_key: u64,
}

impl<H> fmt::Debug for ViewGrid<H>
where
    H: ViewHost + fmt::Debug,
    H::View: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewGrid")
            .field("host", &self.host)
            .field("rows", &self.rows)
            .field("sync", &self.sync)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

impl<H: ViewHost> ViewGrid<H> {
    pub fn new(host: H, config: &GridConfig) -> Self {
        Self {
            host,
            rows: Vec::new(),
            sync: SynchronizationGroup::new(config.initial_state()),
            tile_source: config.tile_source.clone(),
            shape: PathShape::default(),
            next_key: 0,
        }
    }

    pub fn with_shape(mut self, shape: PathShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn shape(&self) -> PathShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[MapRow<H::View>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&MapRow<H::View>> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut MapRow<H::View>> {
        self.rows.get_mut(index)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn sync_group(&self) -> &SynchronizationGroup {
        &self.sync
    }

    pub fn view_state(&self) -> ViewState {
        self.sync.current()
    }

    pub fn cell(&self, addr: CellAddr) -> Result<&ViewCell<H::View>, GridError> {
        self.rows
            .get(addr.row)
            .and_then(|row| row.cells.get(addr.cell))
            .ok_or(GridError::UnknownCell { row: addr.row, cell: addr.cell })
    }

    pub fn cell_mut(&mut self, addr: CellAddr) -> Result<&mut ViewCell<H::View>, GridError> {
        self.rows
            .get_mut(addr.row)
            .and_then(|row| row.cells.get_mut(addr.cell))
            .ok_or(GridError::UnknownCell { row: addr.row, cell: addr.cell })
    }

    /// Grows or shrinks the grid at its tail until it holds exactly `desired` rows.
    pub fn reconcile_rows(&mut self, desired: usize) -> RowDelta {
        let mut delta = RowDelta::default();
        while self.rows.len() < desired {
            self.insert_row(self.rows.len());
            delta.added += 1;
        }
        while self.rows.len() > desired {
            self.remove_row(self.rows.len() - 1);
            delta.removed += 1;
        }
        if delta != RowDelta::default() {
            info!(
                rows = self.rows.len(),
                added = delta.added,
                removed = delta.removed,
                "grid resized"
            );
        }
        delta
    }

    fn insert_row(&mut self, index: usize) {
        self.host.attach_row(index);

        let options = ViewOptions {
            initial: self.sync.current(),
            tile_source: self.tile_source.clone(),
        };

        let mut cells = SmallVec::<[ViewCell<H::View>; MAPS_PER_ROW]>::new();
        for cell in 0..MAPS_PER_ROW {
            let role = if cell == CLUSTERED_CELL {
                CellRole::Clustered
            } else {
                CellRole::Group(GroupId::for_cell(cell))
            };
            let key = ViewKey::new(self.next_key);
            self.next_key += 1;

            let slot = CellSlot { row: index, cell, role, key };
            let view = self.host.create_view(&slot, &options);
            self.sync.register(key);
            cells.push(ViewCell { key, role, view, surface: PathSurface::default() });
        }

        self.rows.insert(index, MapRow { label: String::new(), cells });
        debug!(row = index, "row inserted");
    }

    fn remove_row(&mut self, index: usize) {
        let row = &mut self.rows[index];
        let mut released = SmallVec::<[ViewKey; MAPS_PER_ROW]>::new();
        for cell in row.cells.iter_mut() {
            cell.view.remove();
            self.sync.deregister(cell.key);
            released.push(cell.key);
        }

        self.host.detach_row(index, &released);
        self.rows.remove(index);
        debug!(row = index, "row removed");
    }

    /// Sets `state` on every view of every row.
    pub fn broadcast(&mut self, state: ViewState) -> usize {
        let views = self
            .rows
            .iter_mut()
            .flat_map(|row| row.cells.iter_mut())
            .map(|cell| (cell.key, &mut cell.view));
        self.sync.broadcast(state, views)
    }

    /// Reacts to a gesture that finished on the view at `addr`.
    ///
    /// Both events propagate the view's resulting center/zoom to every view. A zoom end resizes
    /// the markers of every cell, but re-projects paths only on the originating view; the other
    /// views keep their path geometry until their own next zoom or render.
    pub fn handle_view_event(
        &mut self,
        addr: CellAddr,
        event: ViewEvent,
    ) -> Result<ViewState, GridError> {
        let state = self.cell(addr)?.view.state();
        let applied = self.broadcast(state);
        debug!(
            row = addr.row,
            cell = addr.cell,
            ?event,
            zoom = state.zoom,
            applied,
            "view state broadcast"
        );

        if event == ViewEvent::ZoomEnd {
            for cell in self.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
                cell.surface.resize_markers(state.zoom);
            }
            let shape = self.shape;
            self.cell_mut(addr)?.refresh_geometry(shape);
        }
        Ok(state)
    }

    /// Applies a hover to the path under the pointer and returns the tooltip change, if the
    /// path is drawn on that cell.
    pub fn handle_pointer(
        &mut self,
        addr: CellAddr,
        event: &PointerEvent,
    ) -> Result<Option<TooltipUpdate>, GridError> {
        let surface = &mut self.cell_mut(addr)?.surface;
        let Some(path) = surface.path(&event.flow_id) else {
            debug!(
                row = addr.row,
                cell = addr.cell,
                flow_id = %event.flow_id,
                "pointer over unknown path"
            );
            return Ok(None);
        };

        let effect = hover_effect(event, &path.styled);
        surface.apply_hover(&event.flow_id, &effect);
        Ok(Some(effect.tooltip))
    }

    pub fn snapshot(&self) -> GridSnapshot<'_> {
        GridSnapshot {
            state: self.sync.current(),
            rows: self
                .rows
                .iter()
                .map(|row| RowSnapshot {
                    label: &row.label,
                    cells: row
                        .cells
                        .iter()
                        .map(|cell| CellSnapshot {
                            key: cell.key,
                            role: cell.role,
                            zoom: cell.view.zoom(),
                            surface: &cell.surface,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Serializable view of the grid for hosts and the CLI.
#[derive(Debug, Serialize)]
pub struct GridSnapshot<'g> {
    pub state: ViewState,
    pub rows: Vec<RowSnapshot<'g>>,
}

#[derive(Debug, Serialize)]
pub struct RowSnapshot<'g> {
    pub label: &'g str,
    pub cells: Vec<CellSnapshot<'g>>,
}

#[derive(Debug, Serialize)]
pub struct CellSnapshot<'g> {
    pub key: ViewKey,
    #[serde(flatten)]
    pub role: CellRole,
    pub zoom: f64,
    pub surface: &'g PathSurface,
}
