// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-row render orchestration.
//!
//! A render runs in two phases. Planning partitions each row, clusters it and checks the
//! clusters; it only touches the caller's records. Committing then resizes the grid and
//! replaces every cell's path set. A failure during planning therefore leaves the grid exactly
//! as it was.

use std::fmt;

use tracing::{debug, info};

use crate::collab::Collaborators;
use crate::geometry::PathShape;
use crate::grid::{MapRow, RowDelta, ViewGrid, CLUSTERED_CELL};
use crate::model::{ClusteredFlow, Endpoints, FlowId, FlowRecord};
use crate::partition::{
    check_endpoints, partition, InvalidRecordReason, PartitionError, RowPartition,
};
use crate::style::{build_scales, PathSet, Scales};
use crate::view::{CellRole, MapView, ViewHost};

/// Row labels and row slices disagree in count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationError {
    pub expected_rows: usize,
    pub labels: usize,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "range labels do not match rows: {} row slices, {} labels",
            self.expected_rows, self.labels
        )
    }
}

impl std::error::Error for ConfigurationError {}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    Partition { row: usize, source: PartitionError },
    InvalidCluster { row: usize, cell: usize, flow_id: FlowId, reason: InvalidRecordReason },
    Configuration(ConfigurationError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Partition { row, source } => write!(f, "row {row}: {source}"),
            Self::InvalidCluster { row, cell, flow_id, reason } => {
                write!(f, "row {row}, cell {cell}: invalid cluster {flow_id}: {reason}")
            }
            Self::Configuration(err) => write!(f, "configuration error: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Partition { source, .. } => Some(source),
            Self::InvalidCluster { .. } => None,
            Self::Configuration(err) => Some(err),
        }
    }
}

impl From<ConfigurationError> for RenderError {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}

/// What one row's commit drew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowSummary {
    pub individual_paths: usize,
    pub clustered_paths: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub rows: usize,
    pub delta: RowDelta,
    pub individual_paths: usize,
    pub clustered_paths: usize,
}

/// A validated row, ready to be committed to view cells.
#[derive(Debug)]
pub struct RowPlan<'a> {
    partition: RowPartition<'a>,
    clusters: Vec<ClusteredFlow>,
}

impl<'a> RowPlan<'a> {
    pub fn partition(&self) -> &RowPartition<'a> {
        &self.partition
    }

    pub fn clusters(&self) -> &[ClusteredFlow] {
        &self.clusters
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RowRenderer<'c> {
    collaborators: Collaborators<'c>,
    shape: PathShape,
}

impl<'c> RowRenderer<'c> {
    pub fn new(collaborators: Collaborators<'c>) -> Self {
        Self { collaborators, shape: PathShape::default() }
    }

    pub fn with_shape(mut self, shape: PathShape) -> Self {
        self.shape = shape;
        self
    }

    /// Partitions and clusters one row without touching any view.
    pub fn plan_row<'a>(
        &self,
        row: usize,
        records: &'a mut [FlowRecord],
    ) -> Result<RowPlan<'a>, RenderError> {
        let partition =
            partition(records).map_err(|source| RenderError::Partition { row, source })?;

        let mut clusters = self.collaborators.clusterer.cluster_flows(partition.records());
        for cluster in &mut clusters {
            check_endpoints(cluster.origin(), cluster.destination()).map_err(|reason| {
                RenderError::InvalidCluster {
                    row,
                    cell: CLUSTERED_CELL,
                    flow_id: cluster.id().clone(),
                    reason,
                }
            })?;
            self.collaborators.segregation.attach_segregation_index(cluster);
        }

        Ok(RowPlan { partition, clusters })
    }

    /// Replaces every cell's path set with the planned paths and positions them at the cell's
    /// current zoom.
    pub fn commit_row<V: MapView>(
        &self,
        plan: &RowPlan<'_>,
        row: &mut MapRow<V>,
        scales: &Scales,
    ) -> RowSummary {
        let mut summary = RowSummary::default();
        for cell in row.cells_mut() {
            let set = match cell.role() {
                CellRole::Group(group) => {
                    let records = plan.partition.group(group);
                    summary.individual_paths += records.len();
                    PathSet::individual(records.iter().copied(), cell.view(), scales)
                }
                CellRole::Clustered => {
                    summary.clustered_paths += plan.clusters.len();
                    PathSet::clustered(&plan.clusters, cell.view(), scales)
                }
            };
            cell.surface_mut().replace(set);
            cell.refresh_geometry(self.shape);
        }
        summary
    }

    /// Plans and commits one row of an existing grid.
    pub fn render_row<V: MapView>(
        &self,
        index: usize,
        records: &mut [FlowRecord],
        row: &mut MapRow<V>,
    ) -> Result<RowSummary, RenderError> {
        let plan = self.plan_row(index, records)?;
        let summary = self.commit_row(&plan, row, &build_scales());
        debug!(
            row = index,
            individual = summary.individual_paths,
            clustered = summary.clustered_paths,
            "row rendered"
        );
        Ok(summary)
    }

    /// Renders one row per slice, resizing the grid to match and labeling each row.
    pub fn render_all_rows<H: ViewHost>(
        &self,
        grid: &mut ViewGrid<H>,
        row_slices: &mut [Vec<FlowRecord>],
        boundaries: &[f64],
    ) -> Result<RenderSummary, RenderError> {
        let labels = self.collaborators.labeler.range_strings(boundaries);
        if labels.len() != row_slices.len() {
            return Err(ConfigurationError {
                expected_rows: row_slices.len(),
                labels: labels.len(),
            }
            .into());
        }

        let plans = row_slices
            .iter_mut()
            .enumerate()
            .map(|(row, records)| self.plan_row(row, records))
            .collect::<Result<Vec<_>, _>>()?;

        let delta = grid.reconcile_rows(plans.len());
        let scales = build_scales();

        let mut summary = RenderSummary { rows: plans.len(), delta, ..RenderSummary::default() };
        for (index, (plan, label)) in plans.iter().zip(labels).enumerate() {
            let Some(row) = grid.row_mut(index) else {
                continue;
            };
            let row_summary = self.commit_row(plan, row, &scales);
            row.set_label(label);
            summary.individual_paths += row_summary.individual_paths;
            summary.clustered_paths += row_summary.clustered_paths;
            debug!(
                row = index,
                individual = row_summary.individual_paths,
                clustered = row_summary.clustered_paths,
                "row rendered"
            );
        }

        info!(
            rows = summary.rows,
            individual = summary.individual_paths,
            clustered = summary.clustered_paths,
            "grid rendered"
        );
        Ok(summary)
    }
}
