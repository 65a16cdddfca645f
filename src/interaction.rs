//! Pointer-driven hover model: idle → hovered → idle per marker.
//!
//! The controller is stateless with respect to the render pipeline — it
//! reads marker data and writes only tooltip visibility, content and
//! position plus the hovered marker's stroke. One pointer, so at most
//! one marker is hovered at a time.

use crate::fmt::format_grouped;
use crate::markers::{Marker, MarkerId, MarkerLayer};
use crate::scale::Rgb;

/// Fixed tooltip offset from the pointer, so it doesn't sit on top of
/// the marker it describes.
pub const TOOLTIP_OFFSET: (f64, f64) = (30.0, 0.0);

pub const STROKE_DEFAULT: Rgb = Rgb::new(128, 128, 128);
pub const STROKE_HOVER: Rgb = Rgb::new(0, 0, 0);

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HoverController {
    hovered: Option<MarkerId>,
    tooltip: Tooltip,
}

impl HoverController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Stroke for a marker under the current hover state.
    pub fn stroke_for(&self, id: MarkerId) -> Rgb {
        if self.hovered == Some(id) {
            STROKE_HOVER
        } else {
            STROKE_DEFAULT
        }
    }

    /// Drive the state machine from a pointer position. Entering a
    /// marker shows the tooltip with that marker's data; moving inside
    /// it tracks the pointer; leaving hides the tooltip and resets the
    /// stroke. Leaving marker A for marker B is a leave then an enter.
    pub fn pointer_moved(&mut self, x: f64, y: f64, markers: &MarkerLayer) {
        match markers.hit_test(x, y) {
            Some(id) => {
                self.hovered = Some(id);
                self.tooltip.visible = true;
                self.tooltip.x = x + TOOLTIP_OFFSET.0;
                self.tooltip.y = y + TOOLTIP_OFFSET.1;
                // Content is rebuilt on every move; the record cannot
                // change mid-hover, so the text stays the same.
                if let Some(marker) = markers.get(id) {
                    self.tooltip.lines = tooltip_lines(marker);
                }
            }
            None => self.clear(),
        }
    }

    /// Pointer left the surface entirely.
    pub fn pointer_left(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.hovered = None;
        self.tooltip = Tooltip::default();
    }
}

/// Tooltip text: grouped mass in grams, then fall status and year.
pub fn tooltip_lines(marker: &Marker) -> Vec<String> {
    vec![
        format!("{} g", format_grouped(marker.mass)),
        format!("{} year {}", marker.fall, marker.year),
    ]
}
