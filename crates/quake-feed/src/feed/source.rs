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

//! USGS summary feed addressing.

use std::fmt;
use std::str::FromStr;

/// Base URL of the USGS real-time GeoJSON summary feeds.
pub const USGS_SUMMARY_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Minimum magnitude class of a summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMagnitude {
    Significant,
    M4_5,
    M2_5,
    M1_0,
    All,
}

impl FeedMagnitude {
    /// Path component used in the feed file name
    pub fn as_str(self) -> &'static str {
        match self {
            FeedMagnitude::Significant => "significant",
            FeedMagnitude::M4_5 => "4.5",
            FeedMagnitude::M2_5 => "2.5",
            FeedMagnitude::M1_0 => "1.0",
            FeedMagnitude::All => "all",
        }
    }
}

/// Time window covered by a summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedWindow {
    Hour,
    Day,
    Week,
    Month,
}

impl FeedWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedWindow::Hour => "hour",
            FeedWindow::Day => "day",
            FeedWindow::Week => "week",
            FeedWindow::Month => "month",
        }
    }
}

/// Where the earthquake feed comes from: a named USGS summary feed or any URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Usgs {
        magnitude: FeedMagnitude,
        window: FeedWindow,
    },
    Url(String),
}

impl FeedSource {
    /// The feed the map loads when nothing else is configured: all events, past day.
    pub fn all_day() -> Self {
        FeedSource::Usgs {
            magnitude: FeedMagnitude::All,
            window: FeedWindow::Day,
        }
    }

    pub fn url(&self) -> String {
        match self {
            FeedSource::Usgs { magnitude, window } => format!(
                "{}/{}_{}.geojson",
                USGS_SUMMARY_BASE,
                magnitude.as_str(),
                window.as_str()
            ),
            FeedSource::Url(url) => url.clone(),
        }
    }
}

impl Default for FeedSource {
    fn default() -> Self {
        Self::all_day()
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Usgs { magnitude, window } => {
                write!(f, "{}_{}", magnitude.as_str(), window.as_str())
            }
            FeedSource::Url(url) => f.write_str(url),
        }
    }
}

impl FromStr for FeedSource {
    type Err = String;

    /// Accepts a feed name such as `all_day` or `2.5_week`, or an http(s) URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(FeedSource::Url(s.to_string()));
        }

        let (magnitude, window) = s
            .split_once('_')
            .ok_or_else(|| format!("unknown feed '{s}', expected e.g. all_day or a URL"))?;

        let magnitude = match magnitude {
            "significant" => FeedMagnitude::Significant,
            "4.5" => FeedMagnitude::M4_5,
            "2.5" => FeedMagnitude::M2_5,
            "1.0" => FeedMagnitude::M1_0,
            "all" => FeedMagnitude::All,
            other => return Err(format!("unknown magnitude class '{other}'")),
        };
        let window = match window {
            "hour" => FeedWindow::Hour,
            "day" => FeedWindow::Day,
            "week" => FeedWindow::Week,
            "month" => FeedWindow::Month,
            other => return Err(format!("unknown feed window '{other}'")),
        };

        Ok(FeedSource::Usgs { magnitude, window })
    }
}
