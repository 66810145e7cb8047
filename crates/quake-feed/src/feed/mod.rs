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

//! Earthquake feed layer.
//!
//! Parses USGS GeoJSON summary feeds into [`EarthquakeFeature`] records and
//! fetches them over HTTP. Malformed records are logged and skipped; a
//! payload that is not a FeatureCollection at all is a [`FeedError`].

mod client;
mod source;

pub use client::FeedClient;
pub use source::{FeedMagnitude, FeedSource, FeedWindow, USGS_SUMMARY_BASE};

use geojson::{Feature, JsonObject};
use log::{debug, warn};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Placeholder shown for events the feed publishes without a place name.
pub const UNKNOWN_PLACE: &str = "Unknown location";

/// Errors that abort a whole feed load.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("feed request failed with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed feed: {0}")]
    MalformedFeed(String),
}

/// Errors for a single feed record. The record is skipped, the feed is not.
#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for field '{field}': {value}")]
    InvalidValue { field: &'static str, value: String },
}

/// One earthquake event from the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeFeature {
    /// USGS event id (e.g. "us7000abcd").
    pub id: Option<String>,
    /// Magnitude; `None` when the feed publishes `null`.
    pub magnitude: Option<f64>,
    /// Human-readable location (e.g. "10km SSW of Idyllwild, CA").
    pub place: String,
    /// Event origin time in milliseconds since the Unix epoch.
    pub time: i64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Hypocentre depth in kilometres, when the feed carries a third coordinate.
    pub depth_km: Option<f64>,
    /// USGS event page.
    pub url: Option<String>,
}

/// A parsed feed: the usable events plus some bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSummary {
    /// Feed title from the `metadata` block (e.g. "USGS All Earthquakes, Past Day").
    pub title: Option<String>,
    /// When the feed was generated, epoch milliseconds.
    pub generated: Option<i64>,
    /// Events in feed order.
    pub features: Vec<EarthquakeFeature>,
    /// Number of records dropped because they were malformed.
    pub skipped: usize,
}

impl FeedSummary {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Parse a GeoJSON FeatureCollection body.
///
/// Only the envelope is checked strictly. Each record is decoded on its own,
/// so one structurally broken feature costs that feature and nothing else.
pub fn parse_feed(body: &str) -> Result<FeedSummary, FeedError> {
    let root: JsonValue =
        serde_json::from_str(body).map_err(|e| FeedError::MalformedFeed(e.to_string()))?;

    let JsonValue::Object(mut root) = root else {
        return Err(FeedError::MalformedFeed(
            "expected a JSON object".to_string(),
        ));
    };

    if root.get("type").and_then(JsonValue::as_str) != Some("FeatureCollection") {
        return Err(FeedError::MalformedFeed(
            "expected a FeatureCollection".to_string(),
        ));
    }

    let records = match root.remove("features") {
        Some(JsonValue::Array(records)) => records,
        _ => {
            return Err(FeedError::MalformedFeed(
                "FeatureCollection has no features array".to_string(),
            ))
        }
    };

    let metadata = root.get("metadata").and_then(JsonValue::as_object);
    let title = metadata
        .and_then(|m| m.get("title"))
        .and_then(JsonValue::as_str)
        .map(str::to_string);
    let generated = metadata
        .and_then(|m| m.get("generated"))
        .and_then(JsonValue::as_i64);

    let mut features = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (index, record) in records.into_iter().enumerate() {
        match parse_record(record) {
            Ok(quake) => features.push(quake),
            Err(e) => {
                warn!("Skipping feed record {index}: {e}");
                skipped += 1;
            }
        }
    }

    debug!(
        "Parsed feed {:?}: {} events, {} skipped",
        title,
        features.len(),
        skipped
    );

    Ok(FeedSummary {
        title,
        generated,
        features,
        skipped,
    })
}

/// Decode one element of the `features` array.
fn parse_record(record: JsonValue) -> Result<EarthquakeFeature, FeatureError> {
    match record.get("type") {
        Some(JsonValue::String(kind)) if kind == "Feature" => {}
        None => return Err(FeatureError::MissingField("type")),
        Some(other) => {
            return Err(FeatureError::InvalidValue {
                field: "type",
                value: other.to_string(),
            })
        }
    }

    let feature = Feature::from_json_value(record).map_err(|e| FeatureError::InvalidValue {
        field: "feature",
        value: e.to_string(),
    })?;

    EarthquakeFeature::try_from(&feature)
}

impl TryFrom<&Feature> for EarthquakeFeature {
    type Error = FeatureError;

    fn try_from(feature: &Feature) -> Result<Self, Self::Error> {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or(FeatureError::MissingField("geometry"))?;

        let geojson::Value::Point(coordinates) = &geometry.value else {
            return Err(FeatureError::InvalidValue {
                field: "geometry",
                value: serde_json::to_string(&geometry.value).unwrap_or_default(),
            });
        };

        let (longitude, latitude) = match coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => {
                return Err(FeatureError::InvalidValue {
                    field: "coordinates",
                    value: format!("{coordinates:?}"),
                })
            }
        };
        let depth_km = coordinates.get(2).copied();

        let properties = feature
            .properties
            .as_ref()
            .ok_or(FeatureError::MissingField("properties"))?;

        let magnitude = optional_number(properties, "mag")?;
        let time = required_time(properties)?;

        let place = match properties.get("place") {
            Some(JsonValue::String(place)) => place.clone(),
            None | Some(JsonValue::Null) => UNKNOWN_PLACE.to_string(),
            Some(other) => {
                return Err(FeatureError::InvalidValue {
                    field: "place",
                    value: other.to_string(),
                })
            }
        };

        let url = properties
            .get("url")
            .and_then(JsonValue::as_str)
            .map(str::to_string);

        let id = feature.id.as_ref().map(|id| match id {
            geojson::feature::Id::String(s) => s.clone(),
            geojson::feature::Id::Number(n) => n.to_string(),
        });

        Ok(Self {
            id,
            magnitude,
            place,
            time,
            latitude,
            longitude,
            depth_km,
            url,
        })
    }
}

fn optional_number(
    properties: &JsonObject,
    field: &'static str,
) -> Result<Option<f64>, FeatureError> {
    match properties.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(other) => Err(FeatureError::InvalidValue {
            field,
            value: other.to_string(),
        }),
    }
}

fn required_time(properties: &JsonObject) -> Result<i64, FeatureError> {
    match properties.get("time") {
        None | Some(JsonValue::Null) => Err(FeatureError::MissingField("time")),
        Some(JsonValue::Number(n)) => n.as_i64().ok_or_else(|| FeatureError::InvalidValue {
            field: "time",
            value: n.to_string(),
        }),
        Some(other) => Err(FeatureError::InvalidValue {
            field: "time",
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::GeoJson;

    fn collection(features: &str) -> String {
        format!(
            r#"{{
                "type": "FeatureCollection",
                "metadata": {{"generated": 1700000000000, "title": "USGS All Earthquakes, Past Day", "count": 2}},
                "features": [{features}]
            }}"#
        )
    }

    const QUAKE: &str = r#"{
        "type": "Feature",
        "id": "ci40567432",
        "properties": {"mag": 2.31, "place": "8km NW of Anza, CA", "time": 1700000000000, "url": "https://earthquake.usgs.gov/earthquakes/eventpage/ci40567432"},
        "geometry": {"type": "Point", "coordinates": [-116.7245, 33.6128, 11.32]}
    }"#;

    #[test]
    fn test_parse_feature() {
        let summary = parse_feed(&collection(QUAKE)).unwrap();

        assert_eq!(summary.len(), 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.title.as_deref(), Some("USGS All Earthquakes, Past Day"));
        assert_eq!(summary.generated, Some(1_700_000_000_000));

        let quake = &summary.features[0];
        assert_eq!(quake.id.as_deref(), Some("ci40567432"));
        assert_eq!(quake.magnitude, Some(2.31));
        assert_eq!(quake.place, "8km NW of Anza, CA");
        assert_eq!(quake.time, 1_700_000_000_000);
        assert!((quake.latitude - 33.6128).abs() < 1e-9);
        assert!((quake.longitude - -116.7245).abs() < 1e-9);
        assert_eq!(quake.depth_km, Some(11.32));
    }

    #[test]
    fn test_null_magnitude_is_kept() {
        let record = r#"{
            "type": "Feature",
            "properties": {"mag": null, "place": null, "time": 0},
            "geometry": {"type": "Point", "coordinates": [10.0, 20.0]}
        }"#;
        let summary = parse_feed(&collection(record)).unwrap();

        assert_eq!(summary.len(), 1);
        assert_eq!(summary.features[0].magnitude, None);
        assert_eq!(summary.features[0].place, UNKNOWN_PLACE);
        assert_eq!(summary.features[0].depth_km, None);
    }

    #[test]
    fn test_malformed_record_skipped() {
        let no_time = r#"{
            "type": "Feature",
            "properties": {"mag": 1.0, "place": "Nowhere"},
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0, 5.0]}
        }"#;
        let no_geometry = r#"{
            "type": "Feature",
            "properties": {"mag": 1.0, "place": "Nowhere", "time": 5},
            "geometry": null
        }"#;
        let records = format!("{no_time}, {QUAKE}, {no_geometry}");
        let summary = parse_feed(&collection(&records)).unwrap();

        assert_eq!(summary.len(), 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.features[0].place, "8km NW of Anza, CA");
    }

    #[test]
    fn test_structurally_broken_records_skipped() {
        let point_without_coordinates = r#"{
            "type": "Feature",
            "properties": {"mag": 1.0, "place": "Nowhere", "time": 5},
            "geometry": {"type": "Point"}
        }"#;
        let no_type = r#"{
            "properties": {"mag": 1.0, "place": "Nowhere", "time": 5},
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
        }"#;
        let no_geometry_key = r#"{
            "type": "Feature",
            "properties": {"mag": 1.0, "place": "Nowhere", "time": 5}
        }"#;
        let records =
            format!("{point_without_coordinates}, {QUAKE}, {no_type}, {no_geometry_key}");
        let summary = parse_feed(&collection(&records)).unwrap();

        assert_eq!(summary.len(), 1);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.features[0].id.as_deref(), Some("ci40567432"));
        assert_eq!(summary.title.as_deref(), Some("USGS All Earthquakes, Past Day"));
    }

    #[test]
    fn test_record_type_checked() {
        let record: JsonValue = serde_json::json!({"properties": {"time": 5}});
        assert_eq!(parse_record(record), Err(FeatureError::MissingField("type")));

        let record: JsonValue = serde_json::json!({"type": "Point", "coordinates": [0.0, 0.0]});
        assert!(matches!(
            parse_record(record),
            Err(FeatureError::InvalidValue { field: "type", .. })
        ));
    }

    #[test]
    fn test_string_magnitude_rejected() {
        let feature: Feature = r#"{
            "type": "Feature",
            "properties": {"mag": "big", "place": "Here", "time": 5},
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}
        }"#
        .parse::<GeoJson>()
        .map(|g| match g {
            GeoJson::Feature(f) => f,
            _ => unreachable!(),
        })
        .unwrap();

        assert_eq!(
            EarthquakeFeature::try_from(&feature),
            Err(FeatureError::InvalidValue {
                field: "mag",
                value: "\"big\"".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_feed() {
        let summary = parse_feed(&collection("")).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_not_a_collection() {
        let single = parse_feed(QUAKE);
        assert!(matches!(single, Err(FeedError::MalformedFeed(_))));

        let garbage = parse_feed("<html>503 Service Unavailable</html>");
        assert!(matches!(garbage, Err(FeedError::MalformedFeed(_))));

        let no_features = parse_feed(r#"{"type": "FeatureCollection"}"#);
        assert!(matches!(no_features, Err(FeedError::MalformedFeed(_))));
    }
}
