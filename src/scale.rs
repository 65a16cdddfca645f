//! Continuous scales: a square-root radius scale for mass and a cyclic
//! rainbow color scale for year. Both are built once from the dataset's
//! valid-value extent and shared by the markers and the legend, which is
//! what keeps the two visually consistent.

use std::fmt;

// ---------------------------------------------------------------------------
// Domain extent
// ---------------------------------------------------------------------------

/// `[min, max]` over exactly the finite values in the iterator.
///
/// NaN and infinities never reach the comparison, so a malformed record
/// cannot pollute the domain. Returns `None` when no finite value exists.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut bounds: Option<(f64, f64)> = None;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        bounds = Some(match bounds {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    bounds
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// Square-root radius scale
// ---------------------------------------------------------------------------

/// Maps a magnitude domain to a pixel radius range, interpolating in
/// square-root space so displayed *area* grows linearly with the value.
/// A marker twice the area means a fixed value ratio, not double radius.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SqrtScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl SqrtScale {
    /// Domain values must be non-negative; the domain min maps exactly to
    /// `range.0` and the domain max exactly to `range.1`.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            d0: domain.0,
            d1: domain.1,
            r0: range.0,
            r1: range.1,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.d0, self.d1)
    }

    /// Radius for `v`, clamped to the domain.
    pub fn radius(&self, v: f64) -> f64 {
        let s0 = self.d0.sqrt();
        let s1 = self.d1.sqrt();
        if s1 == s0 {
            // Degenerate single-value domain: midpoint of the range.
            return (self.r0 + self.r1) / 2.0;
        }
        let v = v.clamp(self.d0, self.d1);
        let t = (v.sqrt() - s0) / (s1 - s0);
        self.r0 + t * (self.r1 - self.r0)
    }
}

// ---------------------------------------------------------------------------
// Cyclic rainbow color scale
// ---------------------------------------------------------------------------

/// Continuous cyclic rainbow over a numeric domain.
///
/// The ramp is the cubehelix-based rainbow: hue runs the full circle
/// across the domain while saturation and lightness peak mid-domain.
/// Input outside the domain is clamped to the nearest edge color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RainbowScale {
    d0: f64,
    d1: f64,
}

impl RainbowScale {
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            d0: domain.0,
            d1: domain.1,
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.d0, self.d1)
    }

    pub fn color(&self, v: f64) -> Rgb {
        let t = if self.d1 == self.d0 {
            0.5
        } else {
            ((v - self.d0) / (self.d1 - self.d0)).clamp(0.0, 1.0)
        };
        rainbow(t)
    }
}

/// Cyclic rainbow ramp on `t ∈ [0, 1]`, in cubehelix space.
fn rainbow(t: f64) -> Rgb {
    let ts = (t - 0.5).abs();
    let h = 360.0 * t - 100.0;
    let s = 1.5 - 1.5 * ts;
    let l = 0.8 - 0.9 * ts;
    cubehelix(h, s, l)
}

/// Cubehelix (hue degrees, saturation, lightness) to sRGB.
fn cubehelix(h: f64, s: f64, l: f64) -> Rgb {
    let h = (h + 120.0).to_radians();
    let a = s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();

    let r = l + a * (-0.14861 * cos_h + 1.78277 * sin_h);
    let g = l + a * (-0.29227 * cos_h - 0.90649 * sin_h);
    let b = l + a * (1.97294 * cos_h);

    let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb::new(channel(r), channel(g), channel(b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{extent, RainbowScale, Rgb, SqrtScale};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn extent_ignores_non_finite_values() {
        let values = [100.0, f64::NAN, 50.0, f64::INFINITY, f64::NEG_INFINITY];
        assert_eq!(extent(values), Some((50.0, 100.0)));
    }

    #[test]
    fn extent_of_nothing_valid_is_none() {
        assert_eq!(extent([f64::NAN, f64::NAN]), None);
        assert_eq!(extent(std::iter::empty::<f64>()), None);
    }

    #[test]
    fn radius_hits_range_endpoints_exactly() {
        let s = SqrtScale::new((10.0, 50_000_000.0), (0.7, 15.0));
        assert_close(s.radius(10.0), 0.7, 1e-12);
        assert_close(s.radius(50_000_000.0), 15.0, 1e-12);
    }

    #[test]
    fn radius_is_strictly_monotonic_inside_the_domain() {
        let s = SqrtScale::new((10.0, 50_000_000.0), (0.7, 15.0));
        let mut last = f64::NEG_INFINITY;
        for exp in 1..=7 {
            let r = s.radius(10.0_f64.powi(exp));
            assert!(r > last, "radius must grow with mass");
            last = r;
        }
    }

    #[test]
    fn radius_clamps_outside_the_domain() {
        let s = SqrtScale::new((10.0, 1_000.0), (0.7, 15.0));
        assert_close(s.radius(1.0), 0.7, 1e-12);
        assert_close(s.radius(1.0e9), 15.0, 1e-12);
    }

    #[test]
    fn area_grows_linearly_with_value() {
        // With the domain and range anchored at zero the square-root law
        // makes r² / v constant across the whole domain.
        let s = SqrtScale::new((0.0, 1_000_000.0), (0.0, 15.0));
        let expected = 15.0 * 15.0 / 1_000_000.0;
        for v in [1.0, 10.0, 1_000.0, 250_000.0, 1_000_000.0] {
            let r = s.radius(v);
            assert_close(r * r / v, expected, 1e-9);
        }
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let s = SqrtScale::new((42.0, 42.0), (0.7, 15.0));
        assert_close(s.radius(42.0), (0.7 + 15.0) / 2.0, 1e-12);
    }

    #[test]
    fn rainbow_clamps_to_domain_edges() {
        let c = RainbowScale::new((1500.0, 2010.0));
        assert_eq!(c.color(900.0), c.color(1500.0));
        assert_eq!(c.color(2500.0), c.color(2010.0));
    }

    #[test]
    fn rainbow_is_deterministic_and_varies_across_the_domain() {
        let c = RainbowScale::new((1500.0, 2010.0));
        assert_eq!(c.color(1800.0), c.color(1800.0));
        // Quarter points of a cyclic rainbow are distinct hues.
        let q1 = c.color(1627.5);
        let q2 = c.color(1755.0);
        let q3 = c.color(1882.5);
        assert_ne!(q1, q2);
        assert_ne!(q2, q3);
        assert_ne!(q1, q3);
    }

    #[test]
    fn rgb_formats_as_hex() {
        assert_eq!(Rgb::new(255, 0, 10).to_string(), "#ff000a");
        assert_eq!(Rgb::new(0x1d, 0x34, 0x61).to_string(), "#1d3461");
    }
}
