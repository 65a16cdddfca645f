//! build.rs — download build-time assets once.
//!
//! Assets downloaded:
//!   1. Natural Earth 110m country GeoJSON → assets/world.geojson
//!   2. NASA meteorite landings dataset    → assets/landings.json
//!
//! Both downloads are best-effort: if the network is unavailable the
//! build still succeeds and the binaries fall back to fetching at
//! runtime (or fail there with a proper error).

use std::{env, fs, io::Read, path::Path};

const GEOJSON_URL: &str =
    "https://raw.githubusercontent.com/holtzy/D3-graph-gallery/master/DATA/world.geojson";
const GEOJSON_PATH: &str = "assets/world.geojson";

const LANDINGS_URL: &str = "https://data.nasa.gov/resource/gh4g-9sfh.json?$limit=50000";
const LANDINGS_PATH: &str = "assets/landings.json";

fn main() {
    // Re-run whenever either asset file changes/appears.
    println!("cargo:rerun-if-changed={GEOJSON_PATH}");
    println!("cargo:rerun-if-changed={LANDINGS_PATH}");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let assets = Path::new(&manifest_dir).join("assets");
    if fs::create_dir_all(&assets).is_err() {
        eprintln!("[build] could not create assets/ directory, skipping downloads.");
        return;
    }

    download_if_absent(&assets.join("world.geojson"), GEOJSON_URL, GEOJSON_PATH);
    download_if_absent(&assets.join("landings.json"), LANDINGS_URL, LANDINGS_PATH);
}

fn download_if_absent(dest: &Path, url: &str, label: &str) {
    if dest.exists() {
        eprintln!("[build] {label} already present, skipping.");
        return;
    }
    eprintln!("[build] Downloading {label} ...");
    let body = match fetch(url) {
        Some(b) => b,
        None => {
            eprintln!("[build] ⚠  {label} unavailable — will fetch at runtime instead.");
            return;
        }
    };
    match fs::write(dest, &body) {
        Ok(()) => eprintln!("[build] Saved {} bytes → {label}", body.len()),
        Err(e) => eprintln!("[build] ✗ Failed to write {label}: {e}"),
    }
}

fn fetch(url: &str) -> Option<Vec<u8>> {
    let resp = match ureq::get(url).set("Accept-Encoding", "identity").call() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[build] ✗ GET {url} failed: {e}");
            return None;
        }
    };
    let mut buf = Vec::new();
    if let Err(e) = resp.into_reader().read_to_end(&mut buf) {
        eprintln!("[build] ✗ Failed to read response body: {e}");
        return None;
    }
    Some(buf)
}
