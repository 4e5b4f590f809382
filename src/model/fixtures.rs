// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::flow::{ClusteredFlow, FlowRecord, GeoPoint};
use super::ids::{FlowId, GroupId};

pub(crate) const CENTER: GeoPoint = GeoPoint::new(-33.45, -70.66);

pub(crate) fn fid(value: &str) -> FlowId {
    FlowId::new(value).expect("flow id")
}

pub(crate) fn record(id: &str, group: u32, count: f64) -> FlowRecord {
    FlowRecord::new(
        fid(id),
        GeoPoint::new(-33.45, -70.66),
        GeoPoint::new(-33.40, -70.60),
        GroupId::new(group),
        count,
    )
}

pub(crate) fn record_between(
    id: &str,
    group: u32,
    origin: GeoPoint,
    destination: GeoPoint,
) -> FlowRecord {
    FlowRecord::new(fid(id), origin, destination, GroupId::new(group), 1.0)
}

pub(crate) fn cluster(id: &str, index: u32, norm_total: f64) -> ClusteredFlow {
    ClusteredFlow::new(
        fid(id),
        GeoPoint::new(-33.50, -70.70),
        GeoPoint::new(-33.42, -70.58),
        index,
        norm_total,
    )
}

/// One row slice spread over groups 1..=4 plus a group-0 record that no view displays.
pub(crate) fn row_slice() -> Vec<FlowRecord> {
    vec![
        record("a1", 1, 10.0).with_norm_total(0.001),
        record("a2", 1, 30.0).with_norm_total(0.002),
        record("b1", 2, 5.0),
        record("c1", 3, 8.0).with_distance(1.234),
        record("d1", 4, 2.0),
        record("z1", 0, 7.0),
    ]
}
