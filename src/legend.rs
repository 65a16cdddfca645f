//! Legend synthesis: a fixed editorial set of sample values per scale,
//! laid out by hand. Content never depends on how many records are on
//! screen — only on the two scale domains, through the same scale
//! objects the markers use.

use crate::context::MapContext;
use crate::fmt::format_grouped;
use crate::scale::Rgb;

/// Century-ish year milestones; the domain's recent edge is appended at
/// build time so the ramp's far end is always represented.
pub const YEAR_SAMPLES: [i64; 6] = [1500, 1600, 1700, 1800, 1900, 2000];

/// Representative masses in grams, spanning several orders of magnitude.
pub const MASS_SAMPLES: [f64; 4] = [5_000.0, 500_000.0, 5_000_000.0, 50_000_000.0];

const SWATCH_W: f64 = 10.0;
const SWATCH_H: f64 = 20.0;
const ROW_STEP: f64 = 20.0;

/// Mass column offset inside the legend group.
const SIZE_COLUMN_X: f64 = 110.0;
/// Breathing room between size swatches on top of the cumulative radii.
const SIZE_GAP: f64 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    pub label: String,
    pub color: Rgb,
    /// Swatch rect top-left, relative to the legend origin.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeEntry {
    pub label: String,
    pub radius: f64,
    /// Swatch circle center, relative to the legend origin.
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Top-left of the legend group on the canvas.
    pub origin: (f64, f64),
    pub color_entries: Vec<ColorEntry>,
    pub size_entries: Vec<SizeEntry>,
}

impl Legend {
    pub fn build(ctx: &MapContext) -> Self {
        let origin = (30.0, ctx.viewport.height / 1.5);

        let mut years: Vec<i64> = YEAR_SAMPLES.to_vec();
        let recent_edge = ctx.color.domain().1.round() as i64;
        if recent_edge > YEAR_SAMPLES[YEAR_SAMPLES.len() - 1] {
            years.push(recent_edge);
        }

        let color_entries = years
            .iter()
            .enumerate()
            .map(|(i, &year)| ColorEntry {
                label: year.to_string(),
                color: ctx.color.color(year as f64),
                x: 5.0,
                y: 15.0 + i as f64 * ROW_STEP,
            })
            .collect();

        // Advance by the full diameter plus a gap before placing each
        // circle: positions grow cumulatively with the radii, so a big
        // swatch can never overlap the entry after it.
        let mut size_entries = Vec::with_capacity(MASS_SAMPLES.len());
        let mut cy = 10.0;
        for &mass in &MASS_SAMPLES {
            let radius = ctx.radius.radius(mass);
            cy += 2.0 * radius + SIZE_GAP;
            size_entries.push(SizeEntry {
                label: format_grouped(mass),
                radius,
                cx: SIZE_COLUMN_X,
                cy,
            });
        }

        Self {
            origin,
            color_entries,
            size_entries,
        }
    }

    pub const fn swatch_size() -> (f64, f64) {
        (SWATCH_W, SWATCH_H)
    }
}
