// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Black-box collaborators consumed by the row renderer.
//!
//! Closures implement each trait directly, so callers can pass a function where a full type
//! would be overkill.

use crate::model::{ClusteredFlow, FlowRecord};

pub trait FlowClusterer {
    fn cluster_flows(&self, records: &[FlowRecord]) -> Vec<ClusteredFlow>;
}

impl<F> FlowClusterer for F
where
    F: Fn(&[FlowRecord]) -> Vec<ClusteredFlow>,
{
    fn cluster_flows(&self, records: &[FlowRecord]) -> Vec<ClusteredFlow> {
        self(records)
    }
}

/// Attaches a segregation (Simpson) index to a cluster, in place.
pub trait SegregationIndex {
    fn attach_segregation_index(&self, flow: &mut ClusteredFlow);
}

impl<F> SegregationIndex for F
where
    F: Fn(&mut ClusteredFlow),
{
    fn attach_segregation_index(&self, flow: &mut ClusteredFlow) {
        self(flow)
    }
}

/// Human-readable row labels; one string per row, in row order.
pub trait RangeLabeler {
    fn range_strings(&self, boundaries: &[f64]) -> Vec<String>;
}

impl<F> RangeLabeler for F
where
    F: Fn(&[f64]) -> Vec<String>,
{
    fn range_strings(&self, boundaries: &[f64]) -> Vec<String> {
        self(boundaries)
    }
}

/// Collaborators a render pass needs, borrowed for its duration.
#[derive(Clone, Copy)]
pub struct Collaborators<'c> {
    pub clusterer: &'c dyn FlowClusterer,
    pub segregation: &'c dyn SegregationIndex,
    pub labeler: &'c dyn RangeLabeler,
}

impl<'c> Collaborators<'c> {
    pub fn new(
        clusterer: &'c dyn FlowClusterer,
        segregation: &'c dyn SegregationIndex,
        labeler: &'c dyn RangeLabeler,
    ) -> Self {
        Self { clusterer, segregation, labeler }
    }
}

impl std::fmt::Debug for Collaborators<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
