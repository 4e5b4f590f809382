// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON render input and collaborator adapters over precomputed data.

use std::cell::Cell;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::collab::{FlowClusterer, RangeLabeler, SegregationIndex};
use crate::model::{ClusteredFlow, FlowRecord};

#[derive(Debug)]
pub enum InputError {
    Io { path: PathBuf, source: std::io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RowInput {
    pub records: Vec<FlowRecord>,
    #[serde(default)]
    pub clusters: Vec<ClusteredFlow>,
}

/// One render's worth of data: row slices, their boundaries and optional ready-made labels.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GridInput {
    #[serde(default)]
    pub boundaries: Vec<f64>,
    #[serde(default)]
    pub range_labels: Option<Vec<String>>,
    pub rows: Vec<RowInput>,
}

impl GridInput {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| InputError::Io { path: path.to_owned(), source })?;
        let input: Self = serde_json::from_str(&raw)
            .map_err(|source| InputError::Json { path: path.to_owned(), source })?;
        debug!(path = %path.display(), rows = input.rows.len(), "loaded grid input");
        Ok(input)
    }

    /// Splits the input into row slices and the adapters that replay its precomputed parts.
    pub fn into_parts(self) -> (Vec<Vec<FlowRecord>>, Vec<f64>, PrecomputedClusters, RangeLabels) {
        let mut slices = Vec::with_capacity(self.rows.len());
        let mut clusters = Vec::with_capacity(self.rows.len());
        for row in self.rows {
            slices.push(row.records);
            clusters.push(row.clusters);
        }
        (
            slices,
            self.boundaries,
            PrecomputedClusters::new(clusters),
            RangeLabels::new(self.range_labels),
        )
    }
}

/// Hands out one precomputed cluster list per call, in row order.
#[derive(Debug, Default)]
pub struct PrecomputedClusters {
    rows: Vec<Vec<ClusteredFlow>>,
    next: Cell<usize>,
}

impl PrecomputedClusters {
    pub fn new(rows: Vec<Vec<ClusteredFlow>>) -> Self {
        Self { rows, next: Cell::new(0) }
    }

    /// Starts handing out rows from the first one again.
    pub fn rewind(&self) {
        self.next.set(0);
    }
}

impl FlowClusterer for PrecomputedClusters {
    fn cluster_flows(&self, _records: &[FlowRecord]) -> Vec<ClusteredFlow> {
        let index = self.next.get();
        self.next.set(index + 1);
        self.rows.get(index).cloned().unwrap_or_default()
    }
}

/// Keeps whatever segregation index the input already carried.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepSegregationIndex;

impl SegregationIndex for KeepSegregationIndex {
    fn attach_segregation_index(&self, _flow: &mut ClusteredFlow) {}
}

/// Labels from the input, or `"lo - hi"` for each consecutive pair of boundaries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeLabels {
    provided: Option<Vec<String>>,
}

impl RangeLabels {
    pub fn new(provided: Option<Vec<String>>) -> Self {
        Self { provided }
    }
}

impl RangeLabeler for RangeLabels {
    fn range_strings(&self, boundaries: &[f64]) -> Vec<String> {
        match &self.provided {
            Some(labels) => labels.clone(),
            None => boundaries
                .windows(2)
                .map(|pair| format!("{} - {}", pair[0], pair[1]))
                .collect(),
        }
    }
}
