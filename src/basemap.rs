//! Static basemap: one SVG path per country ring, plus a graticule.
//! Rebuilding replaces the previous path set wholesale, so redrawing can
//! never accumulate duplicate shapes.

use crate::context::MapContext;
use crate::geojson::{geometry_rings, FeatureCollection};
use crate::scale::Rgb;

/// Land fill, a near-black green-grey the markers read well against.
pub const LAND_FILL: Rgb = Rgb::new(20, 22, 22);
pub const LAND_STROKE: Rgb = Rgb::new(42, 46, 46);
pub const OCEAN_FILL: Rgb = Rgb::new(12, 26, 46);
pub const GRATICULE_STROKE: Rgb = Rgb::new(22, 32, 50);

/// Degrees between graticule lines, and the sampling step along each —
/// Equal Earth meridians are curves, so straight segments won't do.
const GRATICULE_STEP: i32 = 30;
const GRATICULE_SAMPLE: i32 = 5;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BasemapLayer {
    paths: Vec<String>,
}

impl BasemapLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project every ring of every feature into SVG path data.
    /// Unprojectable vertices are dropped, not drawn somewhere wrong;
    /// a ring left with fewer than two points is skipped entirely.
    pub fn rebuild(&mut self, ctx: &MapContext, world: &FeatureCollection) {
        self.paths.clear();
        for feature in &world.features {
            for ring in geometry_rings(&feature.geometry) {
                if let Some(d) = ring_path(ctx, &ring) {
                    self.paths.push(d);
                }
            }
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn ring_path(ctx: &MapContext, ring: &[(f64, f64)]) -> Option<String> {
    let mut d = String::new();
    let mut drawn = 0usize;
    for &(lon, lat) in ring {
        let Some(p) = ctx.project(lon, lat) else {
            continue;
        };
        if drawn == 0 {
            d.push_str(&format!("M{:.2},{:.2}", p.x, p.y));
        } else {
            d.push_str(&format!("L{:.2},{:.2}", p.x, p.y));
        }
        drawn += 1;
    }
    if drawn < 2 {
        return None;
    }
    d.push('Z');
    Some(d)
}

/// Graticule polylines at 30° intervals, sampled every 5° so curved
/// meridians render smoothly.
pub fn graticule_paths(ctx: &MapContext) -> Vec<String> {
    let mut paths = Vec::new();

    // Meridians
    let mut lon = -180;
    while lon <= 180 {
        let line: Vec<(f64, f64)> = (-90..=90)
            .step_by(GRATICULE_SAMPLE as usize)
            .map(|lat| (lon as f64, lat as f64))
            .collect();
        if let Some(d) = polyline_path(ctx, &line) {
            paths.push(d);
        }
        lon += GRATICULE_STEP;
    }

    // Parallels
    let mut lat = -90;
    while lat <= 90 {
        let line: Vec<(f64, f64)> = (-180..=180)
            .step_by(GRATICULE_SAMPLE as usize)
            .map(|lon| (lon as f64, lat as f64))
            .collect();
        if let Some(d) = polyline_path(ctx, &line) {
            paths.push(d);
        }
        lat += GRATICULE_STEP;
    }

    paths
}

fn polyline_path(ctx: &MapContext, line: &[(f64, f64)]) -> Option<String> {
    let mut d = String::new();
    let mut drawn = 0usize;
    for &(lon, lat) in line {
        let Some(p) = ctx.project(lon, lat) else {
            continue;
        };
        if drawn == 0 {
            d.push_str(&format!("M{:.1},{:.1}", p.x, p.y));
        } else {
            d.push_str(&format!("L{:.1},{:.1}", p.x, p.y));
        }
        drawn += 1;
    }
    if drawn < 2 {
        return None;
    }
    Some(d)
}
