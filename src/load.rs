//! Input loading for the two collections the pipeline needs.
//!
//! Local copies under `assets/` (pre-downloaded by build.rs) are
//! preferred; otherwise each input is fetched at runtime. Rendering is
//! gated on a join over both loads — either failure means no map at all,
//! never a partial one.

use std::{fs, path::Path};

use anyhow::Context;

use crate::geojson::{self, FeatureCollection};
use crate::landing::{self, Landing};

const GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";
const LANDINGS_URL: &str = "https://data.nasa.gov/resource/gh4g-9sfh.json?$limit=50000";

const GEOJSON_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/world.geojson");
const LANDINGS_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/landings.json");

pub fn load_world() -> anyhow::Result<FeatureCollection> {
    let body = read_or_fetch(GEOJSON_PATH, "WORLD_GEOJSON_URL", GEOJSON_URL, "world.geojson")?;
    geojson::parse_basemap(&body).context("world.geojson did not parse as a feature collection")
}

pub fn load_landings() -> anyhow::Result<Vec<Landing>> {
    let body = read_or_fetch(
        LANDINGS_PATH,
        "LANDINGS_URL",
        LANDINGS_URL,
        "landings dataset",
    )?;
    landing::parse_dataset(&body).context("landings dataset did not parse")
}

/// Load both inputs; both must succeed before any rendering begins.
pub fn load_inputs() -> anyhow::Result<(FeatureCollection, Vec<Landing>)> {
    let world = load_world()?;
    let landings = load_landings()?;
    Ok((world, landings))
}

fn read_or_fetch(
    path: &str,
    url_env: &str,
    default_url: &str,
    label: &str,
) -> anyhow::Result<String> {
    if Path::new(path).exists() {
        eprintln!("[*] Reading {label} from {path}");
        return fs::read_to_string(path).with_context(|| format!("failed to read {path}"));
    }

    let url = std::env::var(url_env).unwrap_or_else(|_| default_url.to_string());
    eprintln!("[*] Fetching {label} from {url}");
    let body = ureq::get(&url)
        .call()
        .with_context(|| format!("GET {url} failed"))?
        .into_string()
        .with_context(|| format!("failed to read {label} response body"))?;
    Ok(body)
}
