// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Magnitude styling.
//!
//! Two pure functions drive every marker and the legend: [`marker_size`]
//! scales the circle radius linearly with magnitude, and
//! [`band_for_magnitude`] buckets a magnitude into one of six severity bands
//! whose colors come from [`ColorBands`].

use serde::{Deserialize, Serialize};

/// Number of severity bands.
pub const BAND_COUNT: usize = 6;

/// Lower bounds (exclusive) of bands 2 through 6.
pub const BAND_THRESHOLDS: [f64; BAND_COUNT - 1] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Radius multiplier used when none is configured.
pub const DEFAULT_SIZE_SCALE: f64 = 2.5;

/// One of the six magnitude bands, 0 = weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MagnitudeBand(usize);

impl MagnitudeBand {
    /// All bands, weakest first.
    pub const ALL: [MagnitudeBand; BAND_COUNT] = [
        MagnitudeBand(0),
        MagnitudeBand(1),
        MagnitudeBand(2),
        MagnitudeBand(3),
        MagnitudeBand(4),
        MagnitudeBand(5),
    ];

    pub fn index(self) -> usize {
        self.0
    }

    /// Magnitude at which the band starts, as shown in the legend (0 for the first band).
    pub fn lower_bound(self) -> f64 {
        match self.0 {
            0 => 0.0,
            i => BAND_THRESHOLDS[i - 1],
        }
    }

    /// Upper bound, `None` for the open-ended top band.
    pub fn upper_bound(self) -> Option<f64> {
        BAND_THRESHOLDS.get(self.0).copied()
    }
}

/// Bucket a magnitude. Thresholds are strict: exactly 5.0 is in band 5, not 6.
///
/// A missing or NaN magnitude lands in the lowest band.
pub fn band_for_magnitude(magnitude: Option<f64>) -> MagnitudeBand {
    let Some(m) = magnitude else {
        return MagnitudeBand(0);
    };

    BAND_THRESHOLDS
        .iter()
        .rposition(|&threshold| m > threshold)
        .map_or(MagnitudeBand(0), |i| MagnitudeBand(i + 1))
}

/// Circle radius for a magnitude: `(m + 1) * scale`. Not clamped, so very
/// negative magnitudes give a non-positive radius. Missing magnitude gives 0.
pub fn marker_size(magnitude: Option<f64>, scale: f64) -> f64 {
    magnitude.map_or(0.0, |m| (m + 1.0) * scale)
}

/// Color per band, weakest first. Values are CSS color names or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorBands(pub [String; BAND_COUNT]);

impl ColorBands {
    pub fn new(colors: [&str; BAND_COUNT]) -> Self {
        Self(colors.map(str::to_string))
    }

    pub fn color(&self, band: MagnitudeBand) -> &str {
        &self.0[band.index()]
    }
}

impl Default for ColorBands {
    fn default() -> Self {
        Self::new([
            "LightGreen",
            "Yellow",
            "Salmon",
            "OrangeRed",
            "FireBrick",
            "Purple",
        ])
    }
}

/// Color for a magnitude under the given palette.
pub fn color_for_magnitude(magnitude: Option<f64>, bands: &ColorBands) -> &str {
    bands.color(band_for_magnitude(magnitude))
}

/// A base layer style: the label shown in the layer picker and the provider's style id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileStyle {
    pub label: String,
    pub style_id: String,
}

impl TileStyle {
    pub fn new(label: &str, style_id: &str) -> Self {
        Self {
            label: label.to_string(),
            style_id: style_id.to_string(),
        }
    }
}

/// Everything that differed between deployments of the map: marker scale,
/// band palette, and base layer styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_size_scale")]
    pub size_scale: f64,

    #[serde(default)]
    pub color_bands: ColorBands,

    #[serde(default = "default_tile_styles")]
    pub tile_styles: Vec<TileStyle>,
}

fn default_size_scale() -> f64 {
    DEFAULT_SIZE_SCALE
}

fn default_tile_styles() -> Vec<TileStyle> {
    vec![
        TileStyle::new("Satellite", "mapbox.satellite"),
        TileStyle::new("Outdoors", "mapbox.outdoors"),
        TileStyle::new("Grayscale", "mapbox.light"),
    ]
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            size_scale: default_size_scale(),
            color_bands: ColorBands::default(),
            tile_styles: default_tile_styles(),
        }
    }
}

/// Drawing parameters for one circle marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: String,
    pub stroke_color: String,
    pub opacity: f32,
    pub fill_opacity: f32,
    pub stroke_weight: f32,
}

impl MarkerStyle {
    pub const STROKE_COLOR: &'static str = "#000000";
    pub const OPACITY: f32 = 0.75;
    pub const FILL_OPACITY: f32 = 0.75;
    pub const STROKE_WEIGHT: f32 = 0.75;

    /// Style for a magnitude: radius from [`marker_size`], fill from the band palette.
    pub fn for_magnitude(magnitude: Option<f64>, visual: &VisualConfig) -> Self {
        Self {
            radius: marker_size(magnitude, visual.size_scale),
            fill_color: color_for_magnitude(magnitude, &visual.color_bands).to_string(),
            stroke_color: Self::STROKE_COLOR.to_string(),
            opacity: Self::OPACITY,
            fill_opacity: Self::FILL_OPACITY,
            stroke_weight: Self::STROKE_WEIGHT,
        }
    }
}
