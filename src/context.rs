//! The render context: viewport, projection, view transform and both
//! scales, built once per dataset load and passed into every component.
//! Nothing in the pipeline reaches for shared module state.

use crate::landing::Landing;
use crate::projection::{EqualEarth, PlanarPoint, ViewTransform, BASE_SCALE};
use crate::scale::{extent, RainbowScale, SqrtScale};

pub const DEFAULT_WIDTH: f64 = 1200.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// Marker radius range in pixels, chosen so the smallest recorded mass
/// stays visible and the largest does not swallow a continent.
pub const RADIUS_RANGE: (f64, f64) = (0.7, 15.0);

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Read the canvas size once at startup. `MAP_WIDTH` / `MAP_HEIGHT`
    /// override the defaults; nonsense values fall back silently.
    pub fn from_env() -> Self {
        Self {
            width: env_dim("MAP_WIDTH", DEFAULT_WIDTH),
            height: env_dim("MAP_HEIGHT", DEFAULT_HEIGHT),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

fn env_dim(var: &str, default: f64) -> f64 {
    match std::env::var(var) {
        Ok(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => default,
        },
        Err(_) => default,
    }
}

// ---------------------------------------------------------------------------
// Map context
// ---------------------------------------------------------------------------

/// Everything a component needs to turn a record into pixels.
///
/// Scale domains are the true `[min, max]` over the *valid* records only;
/// rebuilding from an unchanged dataset yields identical bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct MapContext {
    pub viewport: Viewport,
    projection: EqualEarth,
    transform: ViewTransform,
    pub color: RainbowScale,
    pub radius: SqrtScale,
}

impl MapContext {
    pub fn new(viewport: Viewport, landings: &[Landing]) -> Self {
        let valid = || landings.iter().filter(|l| l.is_valid());
        let mass_domain = extent(valid().map(|l| l.mass)).unwrap_or((0.0, 1.0));
        let year_domain = extent(valid().map(|l| l.year)).unwrap_or((0.0, 1.0));

        Self {
            viewport,
            projection: EqualEarth::new(BASE_SCALE, viewport.center()),
            transform: ViewTransform::IDENTITY,
            color: RainbowScale::new(year_domain),
            radius: SqrtScale::new(mass_domain, RADIUS_RANGE),
        }
    }

    /// The one composed pipeline: Equal Earth, then the view transform.
    /// Both the basemap and the markers go through here.
    #[inline]
    pub fn project(&self, lon: f64, lat: f64) -> Option<PlanarPoint> {
        self.projection
            .project(lon, lat)
            .map(|p| self.transform.apply(p))
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.transform = transform;
    }
}

#[cfg(test)]
mod tests {
    use super::{MapContext, Viewport};
    use crate::landing::{Landing, RawLanding};
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

    #[test]
    fn domains_come_from_valid_records_only() {
        let landings = vec![
            landing("100", "1900", "10.0", "20.0"),
            landing("abc", "1800", "10.0", "20.0"), // malformed mass
            landing("50", "1950", "10.0", "200.0"), // unprojectable longitude
            landing("75", "2000", "-30.0", "40.0"),
        ];
        let ctx = MapContext::new(Viewport::default(), &landings);
        assert_eq!(ctx.radius.domain(), (75.0, 100.0));
        assert_eq!(ctx.color.domain(), (1900.0, 2000.0));
    }

    #[test]
    fn domain_recomputation_is_deterministic() {
        let landings = vec![
            landing("10", "1850", "0.0", "0.0"),
            landing("9000", "1999", "45.0", "-120.0"),
        ];
        let a = MapContext::new(Viewport::default(), &landings);
        let b = MapContext::new(Viewport::default(), &landings);
        assert_eq!(a.radius.domain(), b.radius.domain());
        assert_eq!(a.color.domain(), b.color.domain());
    }

    #[test]
    fn project_composes_the_view_transform() {
        let landings = vec![landing("10", "1900", "0.0", "0.0")];
        let mut ctx = MapContext::new(Viewport::new(1200.0, 600.0), &landings);
        let before = ctx.project(0.0, 0.0).unwrap();
        assert_eq!((before.x, before.y), (600.0, 300.0));

        ctx.set_transform(ViewTransform {
            scale: 2.0,
            translate_x: -600.0,
            translate_y: -300.0,
        });
        let after = ctx.project(0.0, 0.0).unwrap();
        assert_eq!((after.x, after.y), (600.0, 300.0));

        // Out-of-range input stays unprojectable under any transform.
        assert!(ctx.project(300.0, 0.0).is_none());
    }
}
