// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use flowgrid::model::{ClusteredFlow, FlowId, FlowRecord, GeoPoint, GroupId};

const BASE: GeoPoint = GeoPoint::new(-33.45, -70.66);

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn rows(self) -> usize {
        match self {
            Self::Small => 2,
            Self::Medium => 6,
            Self::Large => 12,
        }
    }

    pub fn records_per_row(self) -> usize {
        match self {
            Self::Small => 50,
            Self::Medium => 400,
            Self::Large => 2_000,
        }
    }
}

/// SplitMix64 step; good enough to spread fixture coordinates without an RNG dependency.
fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

fn unit(x: u64) -> f64 {
    (x >> 11) as f64 / (1u64 << 53) as f64
}

fn point_near(seed: u64) -> GeoPoint {
    let lat = BASE.lat + (unit(mix(seed)) - 0.5) * 0.4;
    let lng = BASE.lng + (unit(mix(seed ^ 0xA5A5)) - 0.5) * 0.4;
    GeoPoint::new(lat, lng)
}

pub fn row_records(row: usize, count: usize) -> Vec<FlowRecord> {
    (0..count)
        .map(|i| {
            let seed = ((row as u64) << 32) | i as u64;
            let group = GroupId::new((mix(seed) % 5) as u32);
            let flow_count = 1.0 + (mix(seed ^ 0xFF) % 200) as f64;
            FlowRecord::new(
                FlowId::from(seed),
                point_near(seed.wrapping_mul(3)),
                point_near(seed.wrapping_mul(7)),
                group,
                flow_count,
            )
            .with_distance(unit(mix(seed ^ 0x0D)) * 20.0)
            .with_norm_total(unit(mix(seed ^ 0x0E)) * 0.003)
        })
        .collect()
}

pub fn row_slices(case: Case) -> Vec<Vec<FlowRecord>> {
    (0..case.rows()).map(|row| row_records(row, case.records_per_row())).collect()
}

pub fn boundaries(case: Case) -> Vec<f64> {
    (0..=case.rows()).map(|i| i as f64 * 2.0).collect()
}

/// A fixed-size cluster list derived from the row's first records.
pub fn clusters_for(records: &[FlowRecord]) -> Vec<ClusteredFlow> {
    use flowgrid::model::Endpoints;

    records
        .iter()
        .take(12)
        .enumerate()
        .map(|(index, record)| {
            ClusteredFlow::new(
                record.id().clone(),
                record.origin(),
                record.destination(),
                (index % 4) as u32,
                record.normalized_count().unwrap_or(0.0) * 0.002,
            )
        })
        .collect()
}

pub fn range_labels(boundaries: &[f64]) -> Vec<String> {
    boundaries.windows(2).map(|pair| format!("{} - {}", pair[0], pair[1])).collect()
}

pub fn simpson(flow: &mut ClusteredFlow) {
    flow.set_simpson_index(0.5);
}
