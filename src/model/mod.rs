// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Flow records arrive per time slice; clustered flows are produced per row by the clustering
//! collaborator. Both are transient and live for one render pass.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod flow;
pub mod ids;

pub use flow::{ClusteredFlow, Endpoints, FlowRecord, GeoPoint, InvalidCoordinate};
pub use ids::{FlowId, GroupId, Id, IdError};
