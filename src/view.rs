//! The assembled map view: basemap, markers, legend and hover state over
//! one render context, serialized to a self-contained SVG.
//!
//! The written SVG stays interactive on its own — every marker carries a
//! `<title>` tooltip and a `:hover` stroke rule — while the in-memory
//! hover controller drives the same contract for an embedding UI.

use crate::basemap::{
    graticule_paths, BasemapLayer, GRATICULE_STROKE, LAND_FILL, LAND_STROKE, OCEAN_FILL,
};
use crate::context::{MapContext, Viewport};
use crate::fmt::escape_text;
use crate::geojson::FeatureCollection;
use crate::interaction::{tooltip_lines, HoverController, STROKE_HOVER};
use crate::landing::Landing;
use crate::legend::Legend;
use crate::markers::{MarkerLayer, ReconcileStats};
use crate::projection::ViewTransform;

const MARKER_OPACITY: f64 = 0.9;
const TEXT_FILL: &str = "#e2e8f0";
const MUTED_FILL: &str = "#64748b";
const SWATCH_FILL: &str = "#f0ffff";

/// Counts for the stats footer, taken over the full input dataset.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct DatasetStats {
    pub total: usize,
    pub fell: usize,
    pub found: usize,
}

pub struct MapView {
    ctx: MapContext,
    world: FeatureCollection,
    basemap: BasemapLayer,
    markers: MarkerLayer,
    legend: Legend,
    hover: HoverController,
    stats: DatasetStats,
}

impl MapView {
    /// Build the view and draw the static basemap once. The feature
    /// collection is owned here for the lifetime of the view and never
    /// mutated.
    pub fn new(ctx: MapContext, world: FeatureCollection) -> Self {
        let mut basemap = BasemapLayer::new();
        basemap.rebuild(&ctx, &world);
        let legend = Legend::build(&ctx);
        Self {
            ctx,
            world,
            basemap,
            markers: MarkerLayer::new(),
            legend,
            hover: HoverController::new(),
            stats: DatasetStats::default(),
        }
    }

    pub fn ctx(&self) -> &MapContext {
        &self.ctx
    }

    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    pub fn hover(&self) -> &HoverController {
        &self.hover
    }

    /// Bind the dataset to markers. Safe to call repeatedly: the marker
    /// set afterwards depends only on `records`.
    pub fn render(&mut self, records: &[Landing]) -> ReconcileStats {
        self.stats = DatasetStats {
            total: records.len(),
            fell: records.iter().filter(|l| l.is_fell()).count(),
            found: records.iter().filter(|l| l.is_found()).count(),
        };
        self.markers.reconcile(&self.ctx, records)
    }

    /// Update zoom/pan. The basemap is re-projected immediately; markers
    /// pick the transform up on the next `render` call.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.ctx.set_transform(transform);
        self.basemap.rebuild(&self.ctx, &self.world);
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.hover.pointer_moved(x, y, &self.markers);
    }

    pub fn pointer_left(&mut self) {
        self.hover.pointer_left();
    }

    // -----------------------------------------------------------------------
    // SVG serialization
    // -----------------------------------------------------------------------

    pub fn to_svg(&self) -> String {
        let w = self.ctx.viewport.width;
        let h = self.ctx.viewport.height;
        let mut s = String::with_capacity(4 << 20);

        // header
        s.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="xMinYMin meet">
  <title>Meteorite Landings World Map</title>
  <desc>Recorded meteorite landings, colored by year and sized by mass.</desc>
  <style>circle.marker:hover {{ stroke: {STROKE_HOVER}; stroke-width: 1; }}</style>
"#
        ));

        // background (ocean)
        s.push_str(&format!("  <rect width='{w}' height='{h}' fill='{OCEAN_FILL}'/>\n"));

        // graticule
        s.push_str(&format!(
            "  <g fill='none' stroke='{GRATICULE_STROKE}' stroke-width='0.5'>\n"
        ));
        for d in graticule_paths(&self.ctx) {
            s.push_str(&format!("    <path d='{d}'/>\n"));
        }
        s.push_str("  </g>\n");

        // country polygons
        s.push_str(&format!(
            "  <g fill='{LAND_FILL}' stroke='{LAND_STROKE}' stroke-width='0.5'>\n"
        ));
        for d in self.basemap.paths() {
            s.push_str(&format!("    <path d='{d}'/>\n"));
        }
        s.push_str("  </g>\n");

        // markers, in input order so later records draw on top
        s.push_str(&format!("  <g fill-opacity='{MARKER_OPACITY}'>\n"));
        for m in self.markers.iter() {
            let stroke = self.hover.stroke_for(m.id);
            let stroke_w = if self.hover.hovered() == Some(m.id) { 1 } else { 0 };
            let title = escape_text(&tooltip_lines(m).join("\n"));
            s.push_str(&format!(
                "    <circle class='marker' cx='{:.1}' cy='{:.1}' r='{:.2}' fill='{}' stroke='{stroke}' stroke-width='{stroke_w}'><title>{title}</title></circle>\n",
                m.x, m.y, m.radius, m.color
            ));
        }
        s.push_str("  </g>\n");

        self.push_legend(&mut s);
        self.push_tooltip(&mut s);

        // stats footer
        s.push_str(&format!(
            "  <g font-family='monospace' font-size='10' fill='{MUTED_FILL}'>\n    <text x='16.0' y='{:.1}'>total: {}  fell: {}  found: {}  plotted: {}</text>\n  </g>\n",
            h - 8.0,
            self.stats.total,
            self.stats.fell,
            self.stats.found,
            self.markers.len()
        ));

        s.push_str("</svg>\n");
        s
    }

    fn push_legend(&self, s: &mut String) {
        let (ox, oy) = self.legend.origin;
        let (sw, sh) = Legend::swatch_size();
        s.push_str(&format!(
            "  <g transform='translate({ox:.1},{oy:.1})' font-family='monospace' font-size='13' fill='{TEXT_FILL}'>\n"
        ));
        s.push_str("    <text x='0' y='0'>year</text>\n");
        s.push_str("    <text x='110' y='0'>mass in g</text>\n");

        for e in &self.legend.color_entries {
            s.push_str(&format!(
                "    <rect x='{:.1}' y='{:.1}' width='{sw}' height='{sh}' fill='{}' fill-opacity='{MARKER_OPACITY}'/>\n",
                e.x, e.y, e.color
            ));
            s.push_str(&format!(
                "    <text x='{:.1}' y='{:.1}'>{}</text>\n",
                e.x + 15.0,
                e.y + 15.0,
                e.label
            ));
        }

        for e in &self.legend.size_entries {
            s.push_str(&format!(
                "    <circle cx='{:.1}' cy='{:.1}' r='{:.2}' fill='{SWATCH_FILL}'/>\n",
                e.cx, e.cy, e.radius
            ));
            s.push_str(&format!(
                "    <text x='{:.1}' y='{:.1}'>{}</text>\n",
                e.cx + e.radius + 6.0,
                e.cy + 5.0,
                e.label
            ));
        }
        s.push_str("  </g>\n");
    }

    /// Snapshot of the live tooltip, drawn only while a marker is hovered.
    fn push_tooltip(&self, s: &mut String) {
        let tip = self.hover.tooltip();
        if !tip.visible || tip.lines.is_empty() {
            return;
        }
        let line_h = 14.0;
        let width = 8.0 * tip.lines.iter().map(|l| l.len()).max().unwrap_or(0) as f64 + 12.0;
        let height = line_h * tip.lines.len() as f64 + 10.0;
        s.push_str(&format!(
            "  <g font-family='monospace' font-size='11' fill='{TEXT_FILL}'>\n    <rect x='{:.1}' y='{:.1}' width='{width:.1}' height='{height:.1}' fill='{OCEAN_FILL}' stroke='{LAND_STROKE}' stroke-width='0.8'/>\n",
            tip.x,
            tip.y - line_h
        ));
        for (i, line) in tip.lines.iter().enumerate() {
            s.push_str(&format!(
                "    <text x='{:.1}' y='{:.1}'>{}</text>\n",
                tip.x + 6.0,
                tip.y + i as f64 * line_h,
                escape_text(line)
            ));
        }
        s.push_str("  </g>\n");
    }
}

/// Visible error card written instead of the map when either input fails
/// to load — no partial map is ever drawn.
pub fn error_svg(viewport: Viewport, message: &str) -> String {
    let w = viewport.width;
    let h = viewport.height;
    let msg = escape_text(message);
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <title>Meteorite Landings World Map</title>
  <rect width='{w}' height='{h}' fill='{OCEAN_FILL}'/>
  <g font-family='monospace' fill='#f87171' text-anchor='middle'>
    <text x='{cx:.1}' y='{cy:.1}' font-size='20'>Failed to load map inputs</text>
    <text x='{cx:.1}' y='{my:.1}' font-size='12' fill='{TEXT_FILL}'>{msg}</text>
  </g>
</svg>
"#,
        cx = w / 2.0,
        cy = h / 2.0 - 10.0,
        my = h / 2.0 + 16.0,
    )
}

#[cfg(test)]
mod tests {
    use super::{error_svg, MapView};
    use crate::context::{MapContext, Viewport};
    use crate::geojson::parse_basemap;
    use crate::landing::{Landing, RawLanding};
    use crate::markers::MarkerId;
    use crate::projection::ViewTransform;

    fn landing(mass: &str, year: &str, lat: &str, lon: &str) -> Landing {
        RawLanding {
            name: Some("t".into()),
            mass: Some(mass.into()),
            year: Some(year.into()),
            fall: Some("Fell".into()),
            reclat: Some(lat.into()),
            reclong: Some(lon.into()),
        }
        .coerce()
    }

    fn world() -> crate::geojson::FeatureCollection {
        parse_basemap(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Polygon",
                 "coordinates":[[[0,0],[30,0],[30,30],[0,0]]]}}
            ]}"#,
        )
        .unwrap()
    }

    fn dataset() -> Vec<Landing> {
        vec![
            landing("100", "1900", "10.0", "20.0"),
            landing("5000000", "1950", "-30.0", "40.0"),
            landing("50000000", "2000", "45.0", "-100.0"),
            landing("10", "1990", "10.0", "200.0"), // excluded
        ]
    }

    fn view() -> (MapView, Vec<Landing>) {
        let records = dataset();
        let ctx = MapContext::new(Viewport::default(), &records);
        (MapView::new(ctx, world()), records)
    }

    #[test]
    fn full_render_produces_markers_legend_and_footer() {
        let (mut view, records) = view();
        let stats = view.render(&records);
        assert_eq!(stats.added, 3);
        assert_eq!(stats.skipped, 1);

        let svg = view.to_svg();
        assert_eq!(svg.matches("class='marker'").count(), 3);
        assert!(svg.contains(">year</text>"));
        assert!(svg.contains(">mass in g</text>"));
        assert!(svg.contains("total: 4  fell: 4  found: 0  plotted: 3"));
        assert!(svg.contains("<path d='M"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn re_render_leaves_the_svg_unchanged() {
        let (mut view, records) = view();
        view.render(&records);
        let first = view.to_svg();
        view.render(&records);
        assert_eq!(view.to_svg(), first);
    }

    #[test]
    fn hovering_a_marker_shows_the_tooltip_snapshot() {
        let (mut view, records) = view();
        view.render(&records);
        let m = view.markers().get(MarkerId(2)).unwrap().clone();

        view.pointer_moved(m.x, m.y);
        let svg = view.to_svg();
        // The tooltip group is the only run of 11px text in the document.
        assert!(svg.contains("font-size='11'"));
        assert!(svg.contains("50,000,000 g"));
        assert!(svg.contains("stroke-width='1'"));

        view.pointer_left();
        let svg = view.to_svg();
        assert!(!svg.contains("font-size='11'"));
        assert!(!svg.contains("stroke-width='1'"));
    }

    #[test]
    fn set_transform_moves_both_basemap_and_markers() {
        let (mut view, records) = view();
        view.render(&records);
        let before = view.markers().get(MarkerId(0)).unwrap().clone();
        let paths_before = view.to_svg();

        view.set_transform(ViewTransform {
            scale: 2.0,
            translate_x: 15.0,
            translate_y: -40.0,
        });
        view.render(&records);
        let after = view.markers().get(MarkerId(0)).unwrap().clone();
        assert!((after.x - (before.x * 2.0 + 15.0)).abs() < 1e-9);
        assert!((after.y - (before.y * 2.0 - 40.0)).abs() < 1e-9);
        // Radius stays in screen pixels under zoom.
        assert_eq!(after.radius, before.radius);
        assert_ne!(view.to_svg(), paths_before);
    }

    #[test]
    fn error_card_carries_the_message() {
        let svg = error_svg(Viewport::default(), "dataset fetch failed: 503 <server>");
        assert!(svg.contains("Failed to load map inputs"));
        assert!(svg.contains("dataset fetch failed: 503 &lt;server&gt;"));
        assert!(!svg.contains("class='marker'"));
    }
}
