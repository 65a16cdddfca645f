//! meteor-map — render recorded meteorite landings onto a world map and
//! write a self-contained interactive SVG.
//!
//! Output: `map.svg` (Equal Earth projection)
//!
//! Marker color follows the year of the landing through a cyclic
//! rainbow ramp; marker area follows its mass in grams. Hovering a
//! marker in any SVG viewer shows mass, fall status and year.

use std::fs;

use meteorite_map::view::{error_svg, MapView};
use meteorite_map::{load, MapContext, Viewport};

const OUT_SVG: &str = "map.svg";

fn main() -> anyhow::Result<()> {
    // Canvas size is read once at startup; MAP_WIDTH/MAP_HEIGHT override.
    let viewport = Viewport::from_env();

    let (world, landings) = match load::load_inputs() {
        Ok(inputs) => inputs,
        Err(e) => {
            // Either input missing means no map at all — surface the
            // failure in the artifact itself, not just on stderr.
            eprintln!("[!] Load failed: {e:#}");
            fs::write(OUT_SVG, error_svg(viewport, &format!("{e:#}")))?;
            return Err(e);
        }
    };
    eprintln!(
        "[*] Got {} landings across {} basemap features.",
        landings.len(),
        world.features.len()
    );

    let ctx = MapContext::new(viewport, &landings);
    let mut view = MapView::new(ctx, world);
    let stats = view.render(&landings);
    eprintln!(
        "[*] Plotted {} markers ({} records skipped).",
        view.markers().len(),
        stats.skipped
    );

    let svg = view.to_svg();
    fs::write(OUT_SVG, &svg)?;
    eprintln!("[*] Written {OUT_SVG} ({} bytes)", svg.len());
    Ok(())
}
