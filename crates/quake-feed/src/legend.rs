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

//! Magnitude legend rows.

use crate::style::{color_for_magnitude, ColorBands, MagnitudeBand};

pub const LEGEND_TITLE: &str = "Magnitude";

/// One legend line: a range label and its swatch color.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub band: MagnitudeBand,
    pub label: String,
    pub color: String,
}

/// Build the legend by asking the marker color function for `lower + 1` of
/// each band, so the legend and the markers cannot disagree.
pub fn legend_rows(bands: &ColorBands) -> Vec<LegendRow> {
    MagnitudeBand::ALL
        .iter()
        .map(|&band| {
            let lower = band.lower_bound();
            let label = match band.upper_bound() {
                Some(upper) => format!("{lower}\u{2013}{upper}"),
                None => format!("{lower}+"),
            };
            LegendRow {
                band,
                label,
                color: color_for_magnitude(Some(lower + 1.0), bands).to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::band_for_magnitude;

    #[test]
    fn test_legend_labels() {
        let labels: Vec<String> = legend_rows(&ColorBands::default())
            .into_iter()
            .map(|row| row.label)
            .collect();
        assert_eq!(labels, ["0–1", "1–2", "2–3", "3–4", "4–5", "5+"]);
    }

    #[test]
    fn test_legend_matches_marker_colors() {
        let bands = ColorBands::new(["a", "b", "c", "d", "e", "f"]);
        for row in legend_rows(&bands) {
            let shown_for = row.band.lower_bound() + 1.0;
            assert_eq!(row.color, color_for_magnitude(Some(shown_for), &bands));
        }
    }

    #[test]
    fn test_legend_row_per_band() {
        let rows = legend_rows(&ColorBands::default());
        assert_eq!(rows.len(), MagnitudeBand::ALL.len());
        assert_eq!(rows[0].color, "LightGreen");
        assert_eq!(rows[5].color, "Purple");
        assert_eq!(band_for_magnitude(Some(6.0)), rows[5].band);
    }
}
