// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Flowgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Flowgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::Serialize;

/// An sRGB color, rendered as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from unbounded channel values, clamping to `0..=255` before rounding.
    fn from_channels(r: f64, g: f64, b: f64) -> Self {
        fn channel(value: f64) -> u8 {
            if value.is_nan() {
                return 0;
            }
            (value.clamp(0.0, 255.0) + 0.5).floor() as u8
        }
        Self::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Linear domain→range mapping. Unclamped: inputs outside the domain extrapolate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 * (1.0 - t) + r1 * t
    }
}

/// Maps a domain onto `[0, 1]` and feeds it to a color interpolator. Unclamped.
#[derive(Debug, Clone, Copy)]
pub struct SequentialScale {
    domain: (f64, f64),
    interpolator: fn(f64) -> Rgb,
}

impl SequentialScale {
    pub fn new(interpolator: fn(f64) -> Rgb) -> Self {
        Self { domain: (0.0, 1.0), interpolator }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn apply(&self, value: f64) -> Rgb {
        let (d0, d1) = self.domain;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        (self.interpolator)(t)
    }
}

// Cubehelix basis (Green 2011).
const A: f64 = -0.14861;
const B: f64 = 1.78277;
const C: f64 = -0.29227;
const D: f64 = -0.90649;
const E: f64 = 1.97294;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cubehelix {
    h: f64,
    s: f64,
    l: f64,
}

impl Cubehelix {
    fn to_rgb(self) -> Rgb {
        let h = (self.h + 120.0).to_radians();
        let l = self.l;
        let a = self.s * l * (1.0 - l);
        let (sin_h, cos_h) = h.sin_cos();
        Rgb::from_channels(
            255.0 * (l + a * (A * cos_h + B * sin_h)),
            255.0 * (l + a * (C * cos_h + D * sin_h)),
            255.0 * (l + a * (E * cos_h)),
        )
    }
}

const WARM_START: Cubehelix = Cubehelix { h: -100.0, s: 0.75, l: 0.35 };
const WARM_END: Cubehelix = Cubehelix { h: 80.0, s: 1.50, l: 0.8 };

/// Warm sequential palette: long-path cubehelix interpolation from purple through red/orange
/// to yellow-green.
pub fn interpolate_warm(t: f64) -> Rgb {
    Cubehelix {
        h: WARM_START.h + t * (WARM_END.h - WARM_START.h),
        s: WARM_START.s + t * (WARM_END.s - WARM_START.s),
        l: WARM_START.l + t * (WARM_END.l - WARM_START.l),
    }
    .to_rgb()
}

pub const OPACITY_DOMAIN: (f64, f64) = (0.0, 0.002);
pub const OPACITY_RANGE: (f64, f64) = (0.1, 1.0);
pub const WIDTH_DOMAIN: (f64, f64) = (0.0, 1.0);
pub const WIDTH_RANGE: (f64, f64) = (1.3, 7.0);

/// The styling scales of one render pass. Built fresh per pass; never memoized.
#[derive(Debug, Clone, Copy)]
pub struct Scales {
    pub opacity: LinearScale,
    pub width: LinearScale,
    pub color: SequentialScale,
}

pub fn build_scales() -> Scales {
    Scales {
        opacity: LinearScale::new(OPACITY_DOMAIN, OPACITY_RANGE),
        width: LinearScale::new(WIDTH_DOMAIN, WIDTH_RANGE),
        color: SequentialScale::new(interpolate_warm),
    }
}
