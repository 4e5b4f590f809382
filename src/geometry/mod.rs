// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Flow geometry in view pixel space.
//!
//! Everything here is a pure function of a flow and the view's *current* pan/zoom state, so
//! results are never cached: a zoom change invalidates all of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Endpoints;
use crate::view::MapView;

/// A point in a view's layer pixel space (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedFlow {
    pub start: PixelPoint,
    pub end: PixelPoint,
}

impl ProjectedFlow {
    /// Direction of travel in degrees, `atan2(dy, dx)`.
    pub fn angle(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        dy.atan2(dx).to_degrees()
    }
}

pub fn project_flow<F, V>(flow: &F, view: &V) -> ProjectedFlow
where
    F: Endpoints + ?Sized,
    V: MapView + ?Sized,
{
    ProjectedFlow {
        start: view.project(flow.origin()),
        end: view.project(flow.destination()),
    }
}

pub fn flow_angle<F, V>(flow: &F, view: &V) -> f64
where
    F: Endpoints + ?Sized,
    V: MapView + ?Sized,
{
    project_flow(flow, view).angle()
}

/// An integer percentage, rendered as `"<n>%"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Percent(i32);

impl Percent {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<Percent> for String {
    fn from(value: Percent) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentError {
    MissingSuffix(String),
    InvalidNumber { value: String, source: std::num::ParseIntError },
}

impl fmt::Display for PercentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSuffix(value) => write!(f, "percentage {value:?} must end with '%'"),
            Self::InvalidNumber { value, source } => {
                write!(f, "invalid percentage {value:?}: {source}")
            }
        }
    }
}

impl std::error::Error for PercentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingSuffix(_) => None,
            Self::InvalidNumber { source, .. } => Some(source),
        }
    }
}

impl TryFrom<String> for Percent {
    type Error = PercentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let Some(number) = value.strip_suffix('%') else {
            return Err(PercentError::MissingSuffix(value));
        };
        match number.parse() {
            Ok(number) => Ok(Self(number)),
            Err(source) => Err(PercentError::InvalidNumber { value, source }),
        }
    }
}

/// Endpoints of a linear gradient's axis in object bounding-box percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientAxis {
    pub x1: Percent,
    pub y1: Percent,
    pub x2: Percent,
    pub y2: Percent,
}

/// Maps a flow angle onto a gradient axis through a unit circle centered at (50%, 50%).
///
/// `x = 50 + sin(θ)·50`, `y = 50 + cos(θ)·50`; the second endpoint sits at `θ + 180°`.
/// Rounding follows `Math.round` (ties toward +∞) so the rendered gradient direction matches
/// browser-computed reference values exactly.
pub fn angle_coords(angle_degrees: f64) -> GradientAxis {
    let theta = angle_degrees.to_radians();
    let opposite = theta + std::f64::consts::PI;
    GradientAxis {
        x1: Percent(round_half_up(50.0 + theta.sin() * 50.0)),
        y1: Percent(round_half_up(50.0 + theta.cos() * 50.0)),
        x2: Percent(round_half_up(50.0 + opposite.sin() * 50.0)),
        y2: Percent(round_half_up(50.0 + opposite.cos() * 50.0)),
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// How a projected flow is turned into SVG path data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathShape {
    /// Straight segment from origin to destination.
    #[default]
    Line,
    /// Quadratic curve bowing to the left of the direction of travel.
    Arc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePathShapeError(String);

impl fmt::Display for ParsePathShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown path shape {:?} (expected `line` or `arc`)", self.0)
    }
}

impl std::error::Error for ParsePathShapeError {}

impl FromStr for PathShape {
    type Err = ParsePathShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(Self::Line),
            "arc" => Ok(Self::Arc),
            other => Err(ParsePathShapeError(other.to_owned())),
        }
    }
}

const ARC_BOW: f64 = 0.2;

pub fn path_data(projected: &ProjectedFlow, shape: PathShape) -> String {
    let ProjectedFlow { start, end } = *projected;
    match shape {
        PathShape::Line => format!("M{:.1},{:.1}L{:.1},{:.1}", start.x, start.y, end.x, end.y),
        PathShape::Arc => {
            let dx = end.x - start.x;
            let dy = end.y - start.y;
            // Perpendicular offset scaled by the chord, so the bow is `ARC_BOW * length`.
            let cx = (start.x + end.x) / 2.0 + dy * ARC_BOW;
            let cy = (start.y + end.y) / 2.0 - dx * ARC_BOW;
            format!(
                "M{:.1},{:.1}Q{:.1},{:.1} {:.1},{:.1}",
                start.x, start.y, cx, cy, end.x, end.y
            )
        }
    }
}
