// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use super::{Paint, PathKind, StyledPath, CLUSTER_HOVER_COLOR};
use crate::model::FlowId;

pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -5.0);
pub const TOOLTIP_FADE_MS: u32 = 150;
pub const TOOLTIP_VISIBLE_OPACITY: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Enter,
    Leave,
}

/// A pointer entering or leaving one path of a view cell, in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub flow_id: FlowId,
    pub page_x: f64,
    pub page_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub duration_ms: u32,
    pub opacity: f64,
}

/// Instructions for the host's tooltip widget. `None` fields are left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipUpdate {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub text: Option<String>,
    pub transition: Transition,
}

/// Style delta for the hovered path plus the tooltip update that goes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverEffect {
    pub tooltip: TooltipUpdate,
    pub stroke: Option<Paint>,
}

pub fn tooltip_text(kind: &PathKind) -> String {
    match kind {
        PathKind::Individual { distance, norm_total } => {
            format!("distance: {distance:.2} \n norm: {norm_total:.3}")
        }
        PathKind::Clustered { index, .. } => format!("index: {:.2}", f64::from(*index)),
    }
}

pub fn hover_effect(event: &PointerEvent, path: &StyledPath) -> HoverEffect {
    let clustered = matches!(path.kind, PathKind::Clustered { .. });
    match event.phase {
        PointerPhase::Enter => HoverEffect {
            tooltip: TooltipUpdate {
                left: Some(event.page_x + TOOLTIP_OFFSET.0),
                top: Some(event.page_y + TOOLTIP_OFFSET.1),
                text: Some(tooltip_text(&path.kind)),
                transition: Transition {
                    duration_ms: TOOLTIP_FADE_MS,
                    opacity: TOOLTIP_VISIBLE_OPACITY,
                },
            },
            stroke: clustered.then_some(Paint::Color(CLUSTER_HOVER_COLOR)),
        },
        PointerPhase::Leave => HoverEffect {
            tooltip: TooltipUpdate {
                left: None,
                top: None,
                text: None,
                transition: Transition { duration_ms: TOOLTIP_FADE_MS, opacity: 0.0 },
            },
            stroke: clustered.then(|| path.base_stroke.clone()),
        },
    }
}
