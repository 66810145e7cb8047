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

//! Feature conversion: earthquake records to styled, clickable markers.

use crate::feed::EarthquakeFeature;
use crate::style::{MarkerStyle, VisualConfig};
use chrono::DateTime;

/// Date format for popups, e.g. "Thu Jan 01 1970 00:00:00 UTC".
pub const EVENT_TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S UTC";

/// Render an epoch-millisecond timestamp as a UTC date string.
pub fn format_event_time(epoch_ms: i64) -> String {
    match DateTime::from_timestamp_millis(epoch_ms) {
        Some(time) => time.format(EVENT_TIME_FORMAT).to_string(),
        None => format!("Invalid time ({epoch_ms} ms)"),
    }
}

/// Popup content bound to a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub place: String,
    pub time: String,
    pub magnitude: Option<f64>,
    pub depth_km: Option<f64>,
    pub url: Option<String>,
}

impl Popup {
    pub fn for_feature(feature: &EarthquakeFeature) -> Self {
        Self {
            place: feature.place.clone(),
            time: format_event_time(feature.time),
            magnitude: feature.magnitude,
            depth_km: feature.depth_km,
            url: feature.url.clone(),
        }
    }

    /// HTML fragment: place heading, rule, time paragraph.
    pub fn html(&self) -> String {
        format!(
            "<h3>{}</h3><hr><p>{}</p>",
            escape_html(&self.place),
            escape_html(&self.time)
        )
    }

    pub fn magnitude_text(&self) -> String {
        match self.magnitude {
            Some(m) => format!("M {m:.1}"),
            None => "M ?".to_string(),
        }
    }

    pub fn depth_text(&self) -> Option<String> {
        self.depth_km.map(|d| format!("Depth {d:.1} km"))
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A circle marker ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub style: MarkerStyle,
    pub popup: Popup,
}

impl Marker {
    pub fn from_feature(feature: &EarthquakeFeature, visual: &VisualConfig) -> Self {
        Self {
            id: feature.id.clone(),
            latitude: feature.latitude,
            longitude: feature.longitude,
            style: MarkerStyle::for_magnitude(feature.magnitude, visual),
            popup: Popup::for_feature(feature),
        }
    }
}

/// Convert every feature, preserving order. Nothing is filtered or merged.
pub fn convert_features(features: &[EarthquakeFeature], visual: &VisualConfig) -> Vec<Marker> {
    features
        .iter()
        .map(|feature| Marker::from_feature(feature, visual))
        .collect()
}
