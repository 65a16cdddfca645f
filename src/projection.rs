//! Equal Earth forward projection plus the view transform used for
//! zoom/pan. Geographic input is degrees; output is canvas pixels with
//! north up and the (0°, 0°) origin mapped to the canvas center.

// ---------------------------------------------------------------------------
// Planar point
// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Equal Earth
// ---------------------------------------------------------------------------

// Polynomial coefficients from Šavrič, Patterson & Jenny (2018).
const A1: f64 = 1.340264;
const A2: f64 = -0.081106;
const A3: f64 = 0.000893;
const A4: f64 = 0.003796;

/// Base scale factor: one projected unit spans this many pixels, sized so
/// the full ±180° longitude range fills a 1200px-wide canvas.
pub const BASE_SCALE: f64 = 222.0;

/// Forward-only Equal Earth projection at a fixed scale and translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EqualEarth {
    scale: f64,
    translate_x: f64,
    translate_y: f64,
}

impl EqualEarth {
    pub fn new(scale: f64, translate: (f64, f64)) -> Self {
        Self {
            scale,
            translate_x: translate.0,
            translate_y: translate.1,
        }
    }

    /// Project geographic degrees to canvas pixels.
    ///
    /// Returns `None` for non-finite input or coordinates outside
    /// `lon ∈ [-180, 180]`, `lat ∈ [-90, 90]` — callers must drop such
    /// points rather than draw them somewhere arbitrary.
    #[inline]
    pub fn project(&self, lon: f64, lat: f64) -> Option<PlanarPoint> {
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return None;
        }

        let m = 3.0_f64.sqrt() / 2.0;
        let lambda = lon.to_radians();
        let phi = lat.to_radians();

        let l = (m * phi.sin()).asin();
        let l2 = l * l;
        let l6 = l2 * l2 * l2;

        let x = lambda * l.cos() / (m * (A1 + 3.0 * A2 * l2 + l6 * (7.0 * A3 + 9.0 * A4 * l2)));
        let y = l * (A1 + A2 * l2 + l6 * (A3 + A4 * l2));

        // y grows northward in projected space, downward on the canvas.
        Some(PlanarPoint {
            x: self.translate_x + self.scale * x,
            y: self.translate_y - self.scale * y,
        })
    }
}

// ---------------------------------------------------------------------------
// View transform (zoom / pan)
// ---------------------------------------------------------------------------

/// Uniform zoom/pan applied after projection. Both the basemap and the
/// markers go through the same composed pipeline; nothing special-cases it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    #[inline]
    pub fn apply(&self, p: PlanarPoint) -> PlanarPoint {
        PlanarPoint {
            x: p.x * self.scale + self.translate_x,
            y: p.y * self.scale + self.translate_y,
        }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
