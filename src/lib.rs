// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flowgrid: synchronized map-view grid with flow-path geometry.
//!
//! A grid of rows (one per time slice), each holding four per-group views and one clustered
//! view. All views share a single center/zoom; flow paths are styled per render and re-projected
//! whenever a view's zoom changes.

pub mod collab;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod model;
pub mod partition;
pub mod render;
pub mod startup;
pub mod style;
pub mod view;
