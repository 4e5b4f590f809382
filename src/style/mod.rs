// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visual encoding of flow paths.
//!
//! Styling is split in two passes, mirroring how the views redraw:
//! - a data pass (`style_individual_path`, `style_clustered_path`) that fixes colors, opacities
//!   and the gradient/marker definitions each path references;
//! - a zoom pass (`zoom_stroke_width`, `zoom_marker_size`) that only depends on the view's
//!   current zoom level and runs after every zoom change.

use std::fmt;

use serde::Serialize;

use crate::geometry::{angle_coords, flow_angle, GradientAxis, Percent};
use crate::model::{ClusteredFlow, Endpoints, FlowId, FlowRecord, GeoPoint};
use crate::view::MapView;

pub mod hover;
pub mod scale;

pub use hover::{hover_effect, HoverEffect, PointerEvent, PointerPhase, TooltipUpdate, Transition};
pub use scale::{build_scales, interpolate_warm, LinearScale, Rgb, Scales, SequentialScale};

pub const DESTINATION_COLOR: Rgb = Rgb::new(0x00, 0x80, 0x80);
pub const ORIGIN_COLOR: Rgb = Rgb::new(0xFF, 0xA5, 0x00);
pub const CLUSTER_HOVER_COLOR: Rgb = Rgb::new(0x00, 0x68, 0x8B);
pub const CLUSTER_STROKE_WIDTH: f64 = 3.0;

pub const MARKER_VIEW_BOX: &str = "0 0 12 12";
pub const MARKER_REF: (f64, f64) = (9.0, 6.0);
pub const MARKER_INITIAL_SIZE: f64 = 7.0;
pub const MARKER_ARROW_PATH: &str = "M2,2 L10,6 L2,10 L6,6 L2,2";

/// Stroke width committed for every path at `zoom`.
pub fn zoom_stroke_width(zoom: f64) -> f64 {
    zoom - 6.0
}

/// Marker width and height committed at `zoom`.
pub fn zoom_marker_size(zoom: f64) -> f64 {
    zoom - 5.0
}

pub fn gradient_id(flow_id: &FlowId) -> String {
    format!("gradient{flow_id}")
}

pub fn marker_id(flow_id: &FlowId) -> String {
    format!("marker{flow_id}")
}

/// What a stroke is painted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Paint {
    Color(Rgb),
    /// Reference to a definition on the same surface, by id.
    Url(String),
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(rgb) => write!(f, "{rgb}"),
            Self::Url(id) => write!(f, "url(#{id})"),
        }
    }
}

impl From<Paint> for String {
    fn from(value: Paint) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStyle {
    pub stroke: Paint,
    pub stroke_opacity: f64,
    pub stroke_width: Option<f64>,
    pub marker_end: Option<Paint>,
    pub pointer_events: bool,
}

/// Data a path shows when hovered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathKind {
    Individual { distance: f64, norm_total: f64 },
    Clustered { index: u32, norm_total: f64, simpson_index: Option<f64> },
}

/// A styled, not yet positioned, flow path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledPath {
    pub flow_id: FlowId,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub kind: PathKind,
    pub style: PathStyle,
    /// Stroke to restore once a hover ends.
    #[serde(skip)]
    pub base_stroke: Paint,
}

impl Endpoints for StyledPath {
    fn flow_id(&self) -> &FlowId {
        &self.flow_id
    }

    fn origin(&self) -> GeoPoint {
        self.origin
    }

    fn destination(&self) -> GeoPoint {
        self.destination
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: Percent,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientDef {
    pub id: String,
    pub axis: GradientAxis,
    pub stops: [GradientStop; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDef {
    pub id: String,
    pub view_box: &'static str,
    pub ref_x: f64,
    pub ref_y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    /// Fixed orientation in degrees; the flow's own angle rather than `auto`.
    pub orient: f64,
    pub path: &'static str,
    pub opacity: f64,
}

/// Individual flow: gradient stroke from origin (orange) to destination (teal), oriented along
/// the flow's on-screen direction.
pub fn style_individual_path<V>(
    flow: &FlowRecord,
    view: &V,
    scales: &Scales,
) -> (StyledPath, GradientDef)
where
    V: MapView + ?Sized,
{
    let id = gradient_id(flow.id());
    let gradient = GradientDef {
        id: id.clone(),
        axis: angle_coords(flow_angle(flow, view)),
        stops: [
            GradientStop { offset: Percent::new(0), color: DESTINATION_COLOR },
            GradientStop { offset: Percent::new(100), color: ORIGIN_COLOR },
        ],
    };

    let stroke = Paint::Url(id);
    let path = StyledPath {
        flow_id: flow.id().clone(),
        origin: flow.origin(),
        destination: flow.destination(),
        kind: PathKind::Individual {
            distance: flow.distance(),
            norm_total: flow.norm_total(),
        },
        style: PathStyle {
            stroke: stroke.clone(),
            stroke_opacity: scales.opacity.apply(flow.norm_total()),
            stroke_width: None,
            marker_end: None,
            pointer_events: true,
        },
        base_stroke: stroke,
    };

    (path, gradient)
}

/// Clustered flow: solid palette color keyed by cluster index, with an arrowhead marker.
pub fn style_clustered_path<V>(
    flow: &ClusteredFlow,
    view: &V,
    scales: &Scales,
) -> (StyledPath, MarkerDef)
where
    V: MapView + ?Sized,
{
    let color = scales.color.apply(f64::from(flow.index()));
    let opacity = scales.opacity.apply(flow.norm_total());
    let id = marker_id(flow.id());

    let marker = MarkerDef {
        id: id.clone(),
        view_box: MARKER_VIEW_BOX,
        ref_x: MARKER_REF.0,
        ref_y: MARKER_REF.1,
        width: MARKER_INITIAL_SIZE,
        height: MARKER_INITIAL_SIZE,
        fill: color,
        orient: flow_angle(flow, view),
        path: MARKER_ARROW_PATH,
        opacity,
    };

    let stroke = Paint::Color(color);
    let path = StyledPath {
        flow_id: flow.id().clone(),
        origin: flow.origin(),
        destination: flow.destination(),
        kind: PathKind::Clustered {
            index: flow.index(),
            norm_total: flow.norm_total(),
            simpson_index: flow.simpson_index(),
        },
        style: PathStyle {
            stroke: stroke.clone(),
            stroke_opacity: opacity,
            stroke_width: Some(CLUSTER_STROKE_WIDTH),
            marker_end: Some(Paint::Url(id)),
            pointer_events: true,
        },
        base_stroke: stroke,
    };

    (path, marker)
}

/// Everything one view cell draws: paths plus the definitions they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathSet {
    pub paths: Vec<StyledPath>,
    pub gradients: Vec<GradientDef>,
    pub markers: Vec<MarkerDef>,
}

impl PathSet {
    pub fn individual<'a, V>(
        flows: impl IntoIterator<Item = &'a FlowRecord>,
        view: &V,
        scales: &Scales,
    ) -> Self
    where
        V: MapView + ?Sized,
    {
        let mut set = Self::default();
        for flow in flows {
            let (path, gradient) = style_individual_path(flow, view, scales);
            set.paths.push(path);
            set.gradients.push(gradient);
        }
        set
    }

    pub fn clustered<V>(flows: &[ClusteredFlow], view: &V, scales: &Scales) -> Self
    where
        V: MapView + ?Sized,
    {
        let mut set = Self::default();
        for flow in flows {
            let (path, marker) = style_clustered_path(flow, view, scales);
            set.paths.push(path);
            set.markers.push(marker);
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests;
