//! Meteorite landing records.
//!
//! The upstream feed is string-typed throughout — mass, year and both
//! coordinates arrive as text — so every record is coerced once into a
//! numeric [`Landing`] with NaN standing in for missing or malformed
//! fields. Validity is whole-record: a landing either participates in
//! both domain computation and marker rendering, or in neither.

use serde::Deserialize;

/// One record as delivered by the NASA landings feed.
///
/// Everything is optional; the feed omits fields rather than sending
/// nulls, and several records lack coordinates or mass entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLanding {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mass: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub fall: Option<String>,
    #[serde(default)]
    pub reclat: Option<String>,
    #[serde(default)]
    pub reclong: Option<String>,
}

/// A coerced landing. Numeric fields are NaN when the source value was
/// missing or malformed.
#[derive(Debug, Clone, PartialEq)]
pub struct Landing {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    /// Mass in grams.
    pub mass: f64,
    pub year: f64,
    pub fall: String,
}

impl RawLanding {
    pub fn coerce(&self) -> Landing {
        Landing {
            name: self.name.clone().unwrap_or_default(),
            lon: coerce_number(self.reclong.as_deref()),
            lat: coerce_number(self.reclat.as_deref()),
            mass: coerce_number(self.mass.as_deref()),
            year: coerce_year(self.year.as_deref()),
            fall: self.fall.clone().unwrap_or_default(),
        }
    }
}

impl Landing {
    /// Whole-record validity: projectable coordinates, a non-negative
    /// finite mass and a finite year. Anything less and the record is
    /// excluded from rendering *and* from domain computation.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
            && self.mass.is_finite()
            && self.mass >= 0.0
            && self.year.is_finite()
    }

    pub fn is_fell(&self) -> bool {
        self.fall.eq_ignore_ascii_case("fell")
    }

    pub fn is_found(&self) -> bool {
        self.fall.eq_ignore_ascii_case("found")
    }

    /// Fall status for display; empty source text reads as "Unknown".
    pub fn fall_label(&self) -> &str {
        if self.fall.is_empty() {
            "Unknown"
        } else {
            &self.fall
        }
    }

    /// CSV row `<name>, <year>, <mass_g>, <fall>`. Only meaningful for
    /// valid records.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.name.replace(',', " "),
            self.year as i64,
            self.mass,
            self.fall_label()
        )
    }
}

/// Parse the landings feed (a JSON array of records) and coerce every
/// record. Invalid records are kept — exclusion happens downstream so
/// counts of skipped data stay observable.
pub fn parse_dataset(json: &str) -> anyhow::Result<Vec<Landing>> {
    let raw: Vec<RawLanding> = serde_json::from_str(json)?;
    Ok(raw.iter().map(RawLanding::coerce).collect())
}

fn coerce_number(s: Option<&str>) -> f64 {
    match s {
        Some(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        None => f64::NAN,
    }
}

/// Years arrive either as plain integers ("1880") or as ISO-ish
/// timestamps ("1880-01-01T00:00:00.000"); take the leading year digits.
fn coerce_year(s: Option<&str>) -> f64 {
    let Some(s) = s else { return f64::NAN };
    let s = s.trim();
    if let Ok(y) = s.parse::<f64>() {
        return y;
    }
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.parse::<f64>().unwrap_or(f64::NAN)
}
