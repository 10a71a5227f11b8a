#![deny(warnings)]

//! Core domain models and seed data for Heavenly Estates.
//!
//! This crate defines the serializable parcel record produced by the
//! generator, the fixed city layout it works from, and the charity
//! reference tables read by the leaderboard. Validation helpers guard the
//! basic invariants of hand-edited layouts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::warn;

pub mod charity;
pub mod city;

pub use charity::*;
pub use city::heavenly_city;

/// A point on the virtual city canvas, in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a lot, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn area(&self) -> u32 {
        self.width * self.height
    }
}

/// A named zone of the city. Districts are disjoint squares on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct District {
    /// Slug, e.g. "golden-gates".
    pub id: String,
    /// Display name, e.g. "Golden Gates District".
    pub name: String,
    /// Display color as a CSS hex string.
    pub color: String,
    /// Top-left corner on the canvas.
    pub origin: Point,
    /// Premium districts apply the premium price factor.
    pub premium: bool,
}

impl District {
    /// First two characters of the id, uppercased ("GO" for "golden-gates").
    pub fn abbreviation(&self) -> String {
        self.id.chars().take(2).collect::<String>().to_uppercase()
    }

    /// First word of the display name ("Golden" for "Golden Gates District").
    pub fn short_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or(&self.name)
    }
}

/// A point of interest. Blocks containing a landmark's point get no parcels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    pub position: Point,
    pub icon: String,
    /// Display radius.
    pub size: u32,
}

impl Landmark {
    /// Euclidean distance from `(x, y)` to the landmark's point.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - f64::from(self.position.x);
        let dy = y - f64::from(self.position.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Street name pools used for parcel addresses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StreetNames {
    /// Indexed by block column.
    pub north_south: Vec<String>,
    /// Indexed by block row.
    pub east_west: Vec<String>,
}

impl StreetNames {
    pub fn north_south_for(&self, block_col: u32) -> &str {
        pick(&self.north_south, block_col)
    }

    pub fn east_west_for(&self, block_row: u32) -> &str {
        pick(&self.east_west, block_row)
    }
}

fn pick(names: &[String], index: u32) -> &str {
    if names.is_empty() {
        return "";
    }
    &names[index as usize % names.len()]
}

/// The fixed inputs of the parcel generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityLayout {
    pub districts: Vec<District>,
    pub landmarks: Vec<Landmark>,
    pub streets: StreetNames,
}

impl CityLayout {
    pub fn district(&self, id: &str) -> Option<&District> {
        self.districts.iter().find(|d| d.id == id)
    }

    /// Nearest landmark to `(x, y)` with its distance. Ties keep table order.
    pub fn nearest_landmark(&self, x: f64, y: f64) -> Option<(&Landmark, f64)> {
        let mut best: Option<(&Landmark, f64)> = None;
        for landmark in &self.landmarks {
            let dist = landmark.distance_to(x, y);
            match best {
                Some((_, min)) if dist >= min => {}
                _ => best = Some((landmark, dist)),
            }
        }
        best
    }
}

/// Size tier of a lot; determines dimensions and base price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotTier {
    Studio,
    Standard,
    Premium,
    Estate,
    Mansion,
}

impl LotTier {
    pub const ALL: [LotTier; 5] = [
        LotTier::Studio,
        LotTier::Standard,
        LotTier::Premium,
        LotTier::Estate,
        LotTier::Mansion,
    ];

    pub fn dimensions(self) -> Dimensions {
        let (width, height) = match self {
            LotTier::Studio => (30, 30),
            LotTier::Standard => (40, 40),
            LotTier::Premium => (50, 50),
            LotTier::Estate => (60, 60),
            LotTier::Mansion => (80, 60),
        };
        Dimensions { width, height }
    }

    /// Base price in whole dollars.
    pub fn base_price(self) -> Decimal {
        let dollars = match self {
            LotTier::Studio => 200,
            LotTier::Standard => 400,
            LotTier::Premium => 700,
            LotTier::Estate => 1000,
            LotTier::Mansion => 1500,
        };
        Decimal::new(dollars, 0)
    }

    pub fn label(self) -> &'static str {
        match self {
            LotTier::Studio => "Studio",
            LotTier::Standard => "Standard",
            LotTier::Premium => "Premium",
            LotTier::Estate => "Estate",
            LotTier::Mansion => "Mansion",
        }
    }
}

/// Position-derived pricing tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationType {
    Corner,
    MainStreet,
    ParkAdjacent,
    Waterfront,
    Standard,
}

impl LocationType {
    /// Price multiplier.
    pub fn modifier(self) -> Decimal {
        match self {
            LocationType::Corner => Decimal::new(13, 1),
            LocationType::MainStreet => Decimal::new(125, 2),
            LocationType::ParkAdjacent => Decimal::new(14, 1),
            LocationType::Waterfront => Decimal::new(15, 1),
            LocationType::Standard => Decimal::ONE,
        }
    }

    /// Feature label: the camel-case name with a capitalised first letter.
    pub fn label(self) -> &'static str {
        match self {
            LocationType::Corner => "Corner",
            LocationType::MainStreet => "MainStreet",
            LocationType::ParkAdjacent => "ParkAdjacent",
            LocationType::Waterfront => "Waterfront",
            LocationType::Standard => "Standard",
        }
    }
}

/// Sale status, fixed at generation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelStatus {
    Available,
    Reserved,
    Sold,
}

/// Position of a block inside its district's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockIndex {
    pub row: u32,
    pub col: u32,
}

impl BlockIndex {
    /// Column letter used in block labels: 0 -> 'A'.
    pub fn column_letter(&self) -> char {
        char::from_u32('A' as u32 + self.col).unwrap_or('?')
    }
}

/// A generated unit of inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    /// Sequential id, "PROP-0001".
    pub id: String,
    /// District abbreviation + block row/col + lot sequence, "GO01-03".
    pub parcel_number: String,
    /// Human block label, "Golden Block 1B".
    pub block: String,
    /// Lot sequence within the block, 1-based.
    pub lot: String,
    /// District display name.
    pub subdivision: String,
    pub district_id: String,
    pub block_index: BlockIndex,
    /// Area in square units; always `dimensions.area()`.
    pub size: u32,
    /// Whole dollars.
    pub price: u64,
    pub status: ParcelStatus,
    /// Top-left corner.
    pub coordinates: Point,
    pub dimensions: Dimensions,
    pub features: Vec<String>,
    pub view: String,
    pub address: String,
    pub lot_type: LotTier,
    pub location_types: Vec<LocationType>,
    pub nearest_landmark: String,
}

impl Parcel {
    pub fn right(&self) -> u32 {
        self.coordinates.x + self.dimensions.width
    }

    pub fn bottom(&self) -> u32 {
        self.coordinates.y + self.dimensions.height
    }

    /// True when the two rectangles share interior area.
    pub fn overlaps(&self, other: &Parcel) -> bool {
        self.coordinates.x < other.right()
            && other.coordinates.x < self.right()
            && self.coordinates.y < other.bottom()
            && other.coordinates.y < self.bottom()
    }

    pub fn is_available(&self) -> bool {
        self.status == ParcelStatus::Available
    }
}

/// Looks up a parcel by id. `None` is the not-found state.
pub fn find_parcel<'a>(parcels: &'a [Parcel], id: &str) -> Option<&'a Parcel> {
    parcels.iter().find(|p| p.id == id)
}

/// Validation errors for layouts and generator settings.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Layout has no districts.
    #[error("layout must define at least one district")]
    NoDistricts,
    /// District or landmark id is blank.
    #[error("blank identifier")]
    BlankId,
    /// Two districts share an id.
    #[error("district id defined more than once: {0}")]
    DuplicateDistrict(String),
    /// Street name pools must not be empty.
    #[error("street name pools must not be empty")]
    NoStreets,
    /// A geometric setting leaves no room for lots.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Per-block lot cap must be at least one.
    #[error("lot cap must be > 0")]
    ZeroLotCap,
    /// Premium factor must neither discount nor explode prices.
    #[error("premium factor {0} must be within [1, 10]")]
    PremiumFactor(Decimal),
}

/// Validate a city layout: ids present and unique, streets available.
///
/// Landmarks outside every district are allowed but logged, since they
/// can never suppress a block.
pub fn validate_layout(layout: &CityLayout, district_size: u32) -> Result<(), ValidationError> {
    if layout.districts.is_empty() {
        return Err(ValidationError::NoDistricts);
    }
    let mut ids: BTreeSet<&str> = BTreeSet::new();
    for d in &layout.districts {
        if d.id.trim().is_empty() || d.name.trim().is_empty() {
            return Err(ValidationError::BlankId);
        }
        if !ids.insert(d.id.as_str()) {
            return Err(ValidationError::DuplicateDistrict(d.id.clone()));
        }
        if d.origin.x.checked_add(district_size).is_none()
            || d.origin.y.checked_add(district_size).is_none()
        {
            return Err(ValidationError::InvalidGeometry(format!(
                "district {} extends past the canvas",
                d.id
            )));
        }
    }
    if layout.streets.north_south.is_empty() || layout.streets.east_west.is_empty() {
        return Err(ValidationError::NoStreets);
    }
    for l in &layout.landmarks {
        if l.id.trim().is_empty() {
            return Err(ValidationError::BlankId);
        }
        let inside = layout.districts.iter().any(|d| {
            (d.origin.x..d.origin.x + district_size).contains(&l.position.x)
                && (d.origin.y..d.origin.y + district_size).contains(&l.position.y)
        });
        if !inside {
            warn!(landmark = %l.id, "landmark lies outside every district");
        }
    }
    Ok(())
}
