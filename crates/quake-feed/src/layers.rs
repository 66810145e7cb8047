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

//! Map layer composition.
//!
//! A [`LayerSet`] holds the named base tile layers, all sharing one URL
//! template, attribution and access token. [`MapView`] carries the initial
//! camera and which layers start visible.

use crate::style::TileStyle;

/// Mapbox raster tile endpoint. Placeholders: `{id}`, `{z}`, `{x}`, `{y}`, `{accessToken}`.
pub const MAPBOX_URL_TEMPLATE: &str =
    "https://api.tiles.mapbox.com/v4/{id}/{z}/{x}/{y}.png?access_token={accessToken}";

pub const MAPBOX_ATTRIBUTION: &str =
    "Map data © OpenStreetMap contributors, CC-BY-SA, Imagery © Mapbox";

pub const MAPBOX_MAX_ZOOM: u8 = 18;

/// Label of the earthquake overlay in the layer picker.
pub const EARTHQUAKE_OVERLAY: &str = "Earthquakes";

/// One base tile layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub label: String,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
    pub style_id: String,
    pub access_token: String,
}

impl TileLayer {
    /// Fill in the template for one tile.
    pub fn tile_url(&self, zoom: u8, x: u32, y: u32) -> String {
        self.url_template
            .replace("{id}", &self.style_id)
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{accessToken}", &self.access_token)
    }
}

/// Ordered, named base layers. Exactly one is shown at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerSet {
    layers: Vec<TileLayer>,
}

impl LayerSet {
    /// Build one Mapbox layer per style, all with the same token.
    pub fn mapbox(styles: &[TileStyle], access_token: &str) -> Self {
        Self::with_template(
            styles,
            MAPBOX_URL_TEMPLATE,
            MAPBOX_ATTRIBUTION,
            MAPBOX_MAX_ZOOM,
            access_token,
        )
    }

    pub fn with_template(
        styles: &[TileStyle],
        url_template: &str,
        attribution: &str,
        max_zoom: u8,
        access_token: &str,
    ) -> Self {
        let layers = styles
            .iter()
            .map(|style| TileLayer {
                label: style.label.clone(),
                url_template: url_template.to_string(),
                attribution: attribution.to_string(),
                max_zoom,
                style_id: style.style_id.clone(),
                access_token: access_token.to_string(),
            })
            .collect();
        Self { layers }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TileLayer> {
        self.layers.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers.iter()
    }

    /// Position of a layer by its picker label (case-insensitive).
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| layer.label.eq_ignore_ascii_case(label))
    }
}

/// Initial camera and default visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
    /// Index into the [`LayerSet`] of the base layer shown on load.
    pub base_layer: usize,
    pub show_overlay: bool,
}

impl MapView {
    pub const DEFAULT_CENTER: (f64, f64) = (37.09, -95.71);
    pub const DEFAULT_ZOOM: f64 = 4.0;

    /// Start on the named base layer, falling back to the last layer when the
    /// name is unknown.
    pub fn new(layers: &LayerSet, base_layer: &str) -> Self {
        let base_layer = layers
            .index_of(base_layer)
            .unwrap_or_else(|| layers.len().saturating_sub(1));
        Self {
            center_lat: Self::DEFAULT_CENTER.0,
            center_lon: Self::DEFAULT_CENTER.1,
            zoom: Self::DEFAULT_ZOOM,
            base_layer,
            show_overlay: true,
        }
    }
}
