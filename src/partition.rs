// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Splits one row's flow records by group and normalizes counts within each group.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{FlowId, FlowRecord, GroupId, InvalidCoordinate};

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidRecordReason {
    Origin(InvalidCoordinate),
    Destination(InvalidCoordinate),
    Count(f64),
}

impl fmt::Display for InvalidRecordReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin(source) => write!(f, "origin: {source}"),
            Self::Destination(source) => write!(f, "destination: {source}"),
            Self::Count(count) => write!(f, "count {count} must be finite and non-negative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartitionError {
    InvalidRecord { index: usize, flow_id: FlowId, reason: InvalidRecordReason },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRecord { index, flow_id, reason } => {
                write!(f, "invalid flow record #{index} (id {flow_id}): {reason}")
            }
        }
    }
}

impl std::error::Error for PartitionError {}

/// Geometry and magnitude checks shared by every record kind that ends up on a map.
pub(crate) fn check_endpoints(
    origin: crate::model::GeoPoint,
    destination: crate::model::GeoPoint,
) -> Result<(), InvalidRecordReason> {
    origin.check().map_err(InvalidRecordReason::Origin)?;
    destination.check().map_err(InvalidRecordReason::Destination)?;
    Ok(())
}

fn check_record(record: &FlowRecord) -> Result<(), InvalidRecordReason> {
    use crate::model::Endpoints;

    check_endpoints(record.origin(), record.destination())?;
    let count = record.count();
    if !count.is_finite() || count < 0.0 {
        return Err(InvalidRecordReason::Count(count));
    }
    Ok(())
}

/// Records of one row grouped by category, after normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowPartition<'a> {
    records: &'a [FlowRecord],
    by_group: BTreeMap<GroupId, Vec<&'a FlowRecord>>,
    total_by_group: BTreeMap<GroupId, f64>,
}

impl<'a> RowPartition<'a> {
    /// The whole row, normalized.
    pub fn records(&self) -> &'a [FlowRecord] {
        self.records
    }

    pub fn by_group(&self) -> &BTreeMap<GroupId, Vec<&'a FlowRecord>> {
        &self.by_group
    }

    pub fn total_by_group(&self) -> &BTreeMap<GroupId, f64> {
        &self.total_by_group
    }

    /// Records of `group`; empty when the row has none.
    pub fn group(&self, group: GroupId) -> &[&'a FlowRecord] {
        self.by_group.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self, group: GroupId) -> Option<f64> {
        self.total_by_group.get(&group).copied()
    }
}

/// Validates every record, sums counts per group, then sets each record's
/// `normalized_count = count / total_by_group[group]` in place.
///
/// A group whose counts sum to zero normalizes to `0.0` for all of its records. Nothing is
/// written when any record is invalid.
pub fn partition(records: &mut [FlowRecord]) -> Result<RowPartition<'_>, PartitionError> {
    let mut total_by_group = BTreeMap::<GroupId, f64>::new();
    for (index, record) in records.iter().enumerate() {
        check_record(record).map_err(|reason| PartitionError::InvalidRecord {
            index,
            flow_id: record.id().clone(),
            reason,
        })?;
        *total_by_group.entry(record.group()).or_insert(0.0) += record.count();
    }

    for record in records.iter_mut() {
        let total = total_by_group.get(&record.group()).copied().unwrap_or(0.0);
        let normalized = if total > 0.0 { record.count() / total } else { 0.0 };
        record.set_normalized_count(normalized);
    }

    let records: &[FlowRecord] = records;
    let mut by_group = BTreeMap::<GroupId, Vec<&FlowRecord>>::new();
    for record in records {
        by_group.entry(record.group()).or_default().push(record);
    }

    Ok(RowPartition { records, by_group, total_by_group })
}
