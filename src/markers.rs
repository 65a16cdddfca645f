//! Data-to-marker binding.
//!
//! Each render pass fully reconciles the marker set against the input:
//! markers are keyed by the record's position in the input sequence, so
//! re-rendering an unchanged dataset is a no-op and a shrunk dataset
//! drops its stale markers. Draw order follows input order — later
//! records occlude earlier ones at the same location, deliberately.

use std::collections::BTreeMap;

use crate::context::MapContext;
use crate::landing::Landing;
use crate::scale::Rgb;

/// Stable per-record identity: the index in the input sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MarkerId(pub usize);

/// One rendered marker, recreated (never mutated) each render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgb,
    pub mass: f64,
    pub year: i64,
    pub fall: String,
    pub name: String,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ReconcileStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    /// Records excluded for invalid attributes or unprojectable position.
    pub skipped: usize,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MarkerLayer {
    markers: BTreeMap<MarkerId, Marker>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the rendered set against `records`. The resulting set
    /// depends only on the input, not on how many times this ran.
    pub fn reconcile(&mut self, ctx: &MapContext, records: &[Landing]) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        let mut next: BTreeMap<MarkerId, Marker> = BTreeMap::new();

        for (index, record) in records.iter().enumerate() {
            if !record.is_valid() {
                stats.skipped += 1;
                continue;
            }
            let Some(p) = ctx.project(record.lon, record.lat) else {
                stats.skipped += 1;
                continue;
            };

            let id = MarkerId(index);
            let marker = Marker {
                id,
                x: p.x,
                y: p.y,
                radius: ctx.radius.radius(record.mass),
                color: ctx.color.color(record.year),
                mass: record.mass,
                year: record.year as i64,
                fall: record.fall_label().to_string(),
                name: record.name.clone(),
            };

            match self.markers.get(&id) {
                None => stats.added += 1,
                Some(old) if *old != marker => stats.updated += 1,
                Some(_) => {}
            }
            next.insert(id, marker);
        }

        stats.removed = self
            .markers
            .keys()
            .filter(|id| !next.contains_key(id))
            .count();
        self.markers = next;
        stats
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    /// Markers in draw order (ascending record index).
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// Topmost marker under the pointer: the last one in draw order
    /// whose circle contains the point, mirroring visual occlusion.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<MarkerId> {
        self.markers.values().rev().find_map(|m| {
            let dx = x - m.x;
            let dy = y - m.y;
            (dx * dx + dy * dy <= m.radius * m.radius).then_some(m.id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{MarkerId, MarkerLayer};
    use crate::context::{MapContext, Viewport};
    use crate::landing::{Landing, RawLanding};
    use pretty_assertions::assert_eq;

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

    fn dataset() -> Vec<Landing> {
        vec![
            landing("100", "1900", "10.0", "20.0"),
            landing("5000", "1950", "-30.0", "40.0"),
            landing("900000", "2000", "45.0", "-100.0"),
        ]
    }

    #[test]
    fn re_render_with_unchanged_input_is_idempotent() {
        let records = dataset();
        let ctx = MapContext::new(Viewport::default(), &records);
        let mut layer = MarkerLayer::new();

        let first = layer.reconcile(&ctx, &records);
        assert_eq!(first.added, 3);
        let snapshot: Vec<_> = layer.iter().cloned().collect();

        let second = layer.reconcile(&ctx, &records);
        assert_eq!(second.added, 0);
        assert_eq!(second.updated, 0);
        assert_eq!(second.removed, 0);
        assert_eq!(layer.iter().cloned().collect::<Vec<_>>(), snapshot);
    }

    #[test]
    fn invalid_records_are_excluded_from_the_marker_set() {
        let mut records = dataset();
        records.push(landing("10", "1990", "10.0", "200.0")); // bad longitude
        records.push(landing("NaN", "1990", "10.0", "20.0")); // bad mass
        let ctx = MapContext::new(Viewport::default(), &records);

        let mut layer = MarkerLayer::new();
        let stats = layer.reconcile(&ctx, &records);
        assert_eq!(layer.len(), 3);
        assert_eq!(stats.skipped, 2);
    }

    #[test]
    fn shrinking_the_dataset_removes_stale_markers() {
        let records = dataset();
        let ctx = MapContext::new(Viewport::default(), &records);
        let mut layer = MarkerLayer::new();
        layer.reconcile(&ctx, &records);

        let stats = layer.reconcile(&ctx, &records[..2]);
        assert_eq!(stats.removed, 1);
        assert_eq!(layer.len(), 2);
        assert!(layer.get(MarkerId(2)).is_none());
    }

    #[test]
    fn draw_order_follows_input_sequence() {
        let records = dataset();
        let ctx = MapContext::new(Viewport::default(), &records);
        let mut layer = MarkerLayer::new();
        layer.reconcile(&ctx, &records);

        let ids: Vec<_> = layer.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MarkerId(0), MarkerId(1), MarkerId(2)]);
    }

    #[test]
    fn markers_carry_scaled_attributes() {
        let records = dataset();
        let ctx = MapContext::new(Viewport::default(), &records);
        let mut layer = MarkerLayer::new();
        layer.reconcile(&ctx, &records);

        let smallest = layer.get(MarkerId(0)).unwrap();
        let largest = layer.get(MarkerId(2)).unwrap();
        assert!((smallest.radius - 0.7).abs() < 1e-9);
        assert!((largest.radius - 15.0).abs() < 1e-9);
        assert!(smallest.radius < largest.radius);
        assert_ne!(smallest.color, largest.color);
        assert_eq!(largest.year, 2000);
    }

    #[test]
    fn hit_test_prefers_the_later_overlapping_marker() {
        // Two records at the same location: the later one draws on top.
        let records = vec![
            landing("900000", "1900", "10.0", "20.0"),
            landing("900000", "1990", "10.0", "20.0"),
        ];
        let ctx = MapContext::new(Viewport::default(), &records);
        let mut layer = MarkerLayer::new();
        layer.reconcile(&ctx, &records);

        let m = layer.get(MarkerId(0)).unwrap();
        assert_eq!(layer.hit_test(m.x, m.y), Some(MarkerId(1)));
        assert_eq!(layer.hit_test(m.x + 1000.0, m.y), None);
    }
}
