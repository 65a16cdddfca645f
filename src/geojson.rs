//! Minimal GeoJSON reading for the basemap: a typed feature collection
//! whose geometries stay as raw JSON, with ring extraction for Polygon
//! and MultiPolygon. Anything malformed inside a geometry is skipped,
//! never an error — one bad vertex must not take the basemap down.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Value,
}

pub fn parse_basemap(json: &str) -> anyhow::Result<FeatureCollection> {
    Ok(serde_json::from_str(json)?)
}

/// Every linear ring of a Polygon or MultiPolygon geometry as
/// `(lon, lat)` vertex lists. Other geometry types yield nothing.
pub fn geometry_rings(geom: &Value) -> Vec<Vec<(f64, f64)>> {
    let mut rings = Vec::new();
    match geom["type"].as_str().unwrap_or("") {
        "Polygon" => {
            if let Some(poly) = geom["coordinates"].as_array() {
                collect_polygon(poly, &mut rings);
            }
        }
        "MultiPolygon" => {
            if let Some(polys) = geom["coordinates"].as_array() {
                for poly in polys {
                    if let Some(poly) = poly.as_array() {
                        collect_polygon(poly, &mut rings);
                    }
                }
            }
        }
        _ => {}
    }
    rings
}

fn collect_polygon(rings_json: &[Value], out: &mut Vec<Vec<(f64, f64)>>) {
    for ring in rings_json {
        if let Some(pts) = ring.as_array() {
            let ring = ring_coords(pts);
            if !ring.is_empty() {
                out.push(ring);
            }
        }
    }
}

fn ring_coords(pts: &[Value]) -> Vec<(f64, f64)> {
    pts.iter()
        .filter_map(|pt| {
            let arr = pt.as_array()?;
            let lon = arr.first().and_then(Value::as_f64)?;
            let lat = arr.get(1).and_then(Value::as_f64)?;
            Some((lon, lat))
        })
        .collect()
}
