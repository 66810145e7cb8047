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

//! Earthquake feed library for map viewers.
//!
//! Everything here is UI-free:
//!
//! - **Feed layer**: fetch and parse USGS GeoJSON summary feeds
//! - **Style layer**: magnitude to marker radius and band color
//! - **Marker layer**: earthquake records to styled markers with popups
//! - **Legend**: one row per magnitude band, colored by the same function as markers
//! - **Layers**: named base tile layers and the initial map view
//!
//! # Quick Start
//!
//! ```no_run
//! use quake_feed::{convert_features, legend_rows, FeedClient, FeedSource, VisualConfig};
//!
//! let visual = VisualConfig::default();
//! let summary = FeedClient::new(FeedSource::all_day())?.fetch()?;
//! for marker in convert_features(&summary.features, &visual) {
//!     println!("{} r={:.1} {}", marker.popup.place, marker.style.radius, marker.style.fill_color);
//! }
//! for row in legend_rows(&visual.color_bands) {
//!     println!("{}: {}", row.label, row.color);
//! }
//! # Ok::<(), quake_feed::FeedError>(())
//! ```
//!
//! Parsing a body you already have:
//!
//! ```
//! use quake_feed::parse_feed;
//!
//! let summary = parse_feed(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
//! assert!(summary.is_empty());
//! ```

pub mod feed;
pub mod layers;
pub mod legend;
pub mod marker;
pub mod style;

pub use feed::{
    parse_feed, EarthquakeFeature, FeatureError, FeedClient, FeedError, FeedSource, FeedSummary,
};
pub use layers::{LayerSet, MapView, TileLayer, EARTHQUAKE_OVERLAY};
pub use legend::{legend_rows, LegendRow, LEGEND_TITLE};
pub use marker::{convert_features, format_event_time, Marker, Popup};
pub use style::{
    band_for_magnitude, color_for_magnitude, marker_size, ColorBands, MagnitudeBand, MarkerStyle,
    TileStyle, VisualConfig,
};
