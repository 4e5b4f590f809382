// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{FlowId, GroupId};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn check(&self) -> Result<(), InvalidCoordinate> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(InvalidCoordinate::NotFinite);
        }
        if self.lat.abs() > 90.0 {
            return Err(InvalidCoordinate::LatitudeOutOfRange(self.lat));
        }
        if self.lng.abs() > 180.0 {
            return Err(InvalidCoordinate::LongitudeOutOfRange(self.lng));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvalidCoordinate {
    NotFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl fmt::Display for InvalidCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFinite => f.write_str("coordinate is not finite"),
            Self::LatitudeOutOfRange(lat) => write!(f, "latitude {lat} outside [-90, 90]"),
            Self::LongitudeOutOfRange(lng) => write!(f, "longitude {lng} outside [-180, 180]"),
        }
    }
}

impl std::error::Error for InvalidCoordinate {}

/// Anything drawn as a directed link between two geographic points.
pub trait Endpoints {
    fn flow_id(&self) -> &FlowId;
    fn origin(&self) -> GeoPoint;
    fn destination(&self) -> GeoPoint;
}

/// One origin→destination movement record of a time slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    id: FlowId,
    origin: GeoPoint,
    destination: GeoPoint,
    group: GroupId,
    count: f64,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    norm_total: f64,
    #[serde(default, skip_deserializing)]
    normalized_count: Option<f64>,
}

impl FlowRecord {
    pub fn new(
        id: FlowId,
        origin: GeoPoint,
        destination: GeoPoint,
        group: GroupId,
        count: f64,
    ) -> Self {
        Self {
            id,
            origin,
            destination,
            group,
            count,
            distance: 0.0,
            norm_total: 0.0,
            normalized_count: None,
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_norm_total(mut self, norm_total: f64) -> Self {
        self.norm_total = norm_total;
        self
    }

    pub fn id(&self) -> &FlowId {
        &self.id
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn count(&self) -> f64 {
        self.count
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn norm_total(&self) -> f64 {
        self.norm_total
    }

    /// `count / total count of the record's group`, once the row has been partitioned.
    pub fn normalized_count(&self) -> Option<f64> {
        self.normalized_count
    }

    pub(crate) fn set_normalized_count(&mut self, normalized_count: f64) {
        self.normalized_count = Some(normalized_count);
    }
}

impl Endpoints for FlowRecord {
    fn flow_id(&self) -> &FlowId {
        &self.id
    }

    fn origin(&self) -> GeoPoint {
        self.origin
    }

    fn destination(&self) -> GeoPoint {
        self.destination
    }
}

/// Aggregate of several flows produced by the clustering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteredFlow {
    id: FlowId,
    origin: GeoPoint,
    destination: GeoPoint,
    index: u32,
    #[serde(rename = "normTotal", alias = "norm_total")]
    norm_total: f64,
    #[serde(default, rename = "simpsonIndex", alias = "simpson_index")]
    simpson_index: Option<f64>,
}

impl ClusteredFlow {
    pub fn new(
        id: FlowId,
        origin: GeoPoint,
        destination: GeoPoint,
        index: u32,
        norm_total: f64,
    ) -> Self {
        Self {
            id,
            origin,
            destination,
            index,
            norm_total,
            simpson_index: None,
        }
    }

    pub fn id(&self) -> &FlowId {
        &self.id
    }

    /// Cluster ordinal; keys the color scale.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn norm_total(&self) -> f64 {
        self.norm_total
    }

    pub fn simpson_index(&self) -> Option<f64> {
        self.simpson_index
    }

    pub fn set_simpson_index(&mut self, simpson_index: f64) {
        self.simpson_index = Some(simpson_index);
    }
}

impl Endpoints for ClusteredFlow {
    fn flow_id(&self) -> &FlowId {
        &self.id
    }

    fn origin(&self) -> GeoPoint {
        self.origin
    }

    fn destination(&self) -> GeoPoint {
        self.destination
    }
}
