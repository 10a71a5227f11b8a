#![deny(warnings)]

//! Parcel layout generator for Heavenly Estates.
//!
//! Partitions every district into a grid of blocks, skips blocks holding a
//! landmark, and fills the rest greedily with lots of random tiers. Each lot
//! is tagged with location types, priced, and given a random status.
//!
//! Randomness is always injected. Use [`generate_seeded`] for reproducible
//! output and [`generate_from_entropy`] for the production behaviour where
//! every run differs.

use estate_core::{
    validate_layout, BlockIndex, CityLayout, Dimensions, District, Landmark, LocationType,
    LotTier, Parcel, ParcelStatus, Point, ValidationError,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Spacing of the main-street grid lines.
const MAIN_STREET_PITCH: u32 = 400;
/// Offset from a grid line still counted as main street.
const MAIN_STREET_REACH: u32 = 100;
/// Max centre distance to a landmark for park adjacency.
const PARK_RADIUS: f64 = 200.0;
/// Shorelines as (y, reach).
const WATERFRONTS: [(i64, i64); 2] = [(1200, 150), (600, 100)];
/// Lots are indexed four to a virtual row when tagging corners.
const CORNER_COLUMNS: u32 = 4;
/// Largest accepted district side.
pub const MAX_DISTRICT_SIZE: u32 = 100_000;
/// Largest accepted premium multiplier.
pub const MAX_PREMIUM_FACTOR: Decimal = Decimal::TEN;

/// How the fill cursor moves down after each row of lots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RowAdvance {
    /// Advance by a constant step regardless of lot height. Tall lots can
    /// reach into the next row.
    Fixed { step: u32 },
    /// Advance past the tallest lot of the row plus `gap`. Lots never cross
    /// the block's bottom reserve.
    Packed { gap: u32 },
}

/// Geometry and pricing knobs of the generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Side of a district square.
    pub district_size: u32,
    /// Side of a block square.
    pub block_size: u32,
    /// Street margin before the first lot, on both axes.
    pub street_margin: u32,
    /// Space kept free at a block's right and bottom edge.
    pub edge_reserve: u32,
    /// Horizontal gap between lots.
    pub lot_gap: u32,
    pub max_lots_per_block: u32,
    pub row_advance: RowAdvance,
    /// Multiplier for premium districts.
    pub premium_factor: Decimal,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            district_size: 700,
            block_size: 200,
            street_margin: 10,
            edge_reserve: 20,
            lot_gap: 5,
            max_lots_per_block: 12,
            row_advance: RowAdvance::Fixed { step: 45 },
            premium_factor: Decimal::new(12, 1),
        }
    }
}

impl GeneratorConfig {
    /// Default geometry with height-aware row packing.
    pub fn packed() -> Self {
        Self {
            row_advance: RowAdvance::Packed { gap: 5 },
            ..Self::default()
        }
    }

    pub fn blocks_per_side(&self) -> u32 {
        if self.block_size == 0 {
            return 0;
        }
        self.district_size / self.block_size
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.district_size > MAX_DISTRICT_SIZE {
            return Err(ValidationError::InvalidGeometry(format!(
                "district size {} exceeds {MAX_DISTRICT_SIZE}",
                self.district_size
            )));
        }
        if self.block_size == 0 || self.block_size > self.district_size {
            return Err(ValidationError::InvalidGeometry(format!(
                "block size {} does not fit district size {}",
                self.block_size, self.district_size
            )));
        }
        let margins = self.street_margin.checked_add(self.edge_reserve);
        if margins.map_or(true, |m| m >= self.block_size) {
            return Err(ValidationError::InvalidGeometry(
                "margins leave no block interior".to_string(),
            ));
        }
        if self.lot_gap > self.block_size {
            return Err(ValidationError::InvalidGeometry(format!(
                "lot gap {} exceeds block size {}",
                self.lot_gap, self.block_size
            )));
        }
        if self.max_lots_per_block == 0 {
            return Err(ValidationError::ZeroLotCap);
        }
        match self.row_advance {
            RowAdvance::Fixed { step } if step == 0 || step > self.block_size => {
                return Err(ValidationError::InvalidGeometry(format!(
                    "row step {step} must be within 1..={}",
                    self.block_size
                )));
            }
            RowAdvance::Packed { gap } if gap > self.block_size => {
                return Err(ValidationError::InvalidGeometry(format!(
                    "row gap {gap} exceeds block size {}",
                    self.block_size
                )));
            }
            _ => {}
        }
        if self.premium_factor < Decimal::ONE || self.premium_factor > MAX_PREMIUM_FACTOR {
            return Err(ValidationError::PremiumFactor(self.premium_factor));
        }
        Ok(())
    }
}

/// A block of the fixed grid, with the landmark that suppresses it if any.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedBlock {
    pub district_id: String,
    pub index: BlockIndex,
    pub origin: Point,
    pub landmark: Option<String>,
}

impl PlannedBlock {
    pub fn is_skipped(&self) -> bool {
        self.landmark.is_some()
    }

    /// True when `p` lies in this block's half-open square.
    pub fn contains(&self, p: Point, block_size: u32) -> bool {
        (self.origin.x..self.origin.x + block_size).contains(&p.x)
            && (self.origin.y..self.origin.y + block_size).contains(&p.y)
    }
}

/// Blocks of one district in row-major order.
pub fn district_blocks(
    layout: &CityLayout,
    district: &District,
    config: &GeneratorConfig,
) -> Vec<PlannedBlock> {
    let per_side = config.blocks_per_side();
    let mut blocks = Vec::with_capacity((per_side * per_side) as usize);
    for row in 0..per_side {
        for col in 0..per_side {
            let mut block = PlannedBlock {
                district_id: district.id.clone(),
                index: BlockIndex { row, col },
                origin: Point::new(
                    district.origin.x + col * config.block_size,
                    district.origin.y + row * config.block_size,
                ),
                landmark: None,
            };
            block.landmark = layout
                .landmarks
                .iter()
                .find(|l| block.contains(l.position, config.block_size))
                .map(|l| l.name.clone());
            blocks.push(block);
        }
    }
    blocks
}

/// The whole block grid in generation order. Independent of randomness.
pub fn block_plan(layout: &CityLayout, config: &GeneratorConfig) -> Vec<PlannedBlock> {
    layout
        .districts
        .iter()
        .flat_map(|d| district_blocks(layout, d, config))
        .collect()
}

/// Lot tier for a uniform sample in [0, 1): 40/30/15/10/5 percent.
pub fn tier_for_roll(roll: f64) -> LotTier {
    if roll < 0.4 {
        LotTier::Studio
    } else if roll < 0.7 {
        LotTier::Standard
    } else if roll < 0.85 {
        LotTier::Premium
    } else if roll < 0.95 {
        LotTier::Estate
    } else {
        LotTier::Mansion
    }
}

/// Status for a uniform sample in [0, 1): 70 available, 15 reserved, 15 sold.
pub fn status_for_roll(roll: f64) -> ParcelStatus {
    if roll < 0.7 {
        ParcelStatus::Available
    } else if roll < 0.85 {
        ParcelStatus::Reserved
    } else {
        ParcelStatus::Sold
    }
}

fn classify(
    position: Point,
    lot_seq: u32,
    nearest: Option<(&Landmark, f64)>,
) -> Vec<LocationType> {
    let mut types = Vec::new();
    if lot_seq % CORNER_COLUMNS == 0 || lot_seq / CORNER_COLUMNS == 0 {
        types.push(LocationType::Corner);
    }
    if position.x % MAIN_STREET_PITCH < MAIN_STREET_REACH
        || position.y % MAIN_STREET_PITCH < MAIN_STREET_REACH
    {
        types.push(LocationType::MainStreet);
    }
    if matches!(nearest, Some((_, dist)) if dist < PARK_RADIUS) {
        types.push(LocationType::ParkAdjacent);
    }
    let y = i64::from(position.y);
    if WATERFRONTS
        .iter()
        .any(|&(shore, reach)| (y - shore).abs() < reach)
    {
        types.push(LocationType::Waterfront);
    }
    if types.is_empty() {
        types.push(LocationType::Standard);
    }
    types
}

/// Location types of a lot placed at `position` as the `lot_seq`-th lot
/// (0-based) of its block. Never empty; `Standard` only when nothing else
/// applies.
pub fn location_types(
    layout: &CityLayout,
    position: Point,
    dimensions: Dimensions,
    lot_seq: u32,
) -> Vec<LocationType> {
    let (cx, cy) = lot_center(position, dimensions);
    classify(position, lot_seq, layout.nearest_landmark(cx, cy))
}

fn lot_center(position: Point, dimensions: Dimensions) -> (f64, f64) {
    (
        f64::from(position.x) + f64::from(dimensions.width) / 2.0,
        f64::from(position.y) + f64::from(dimensions.height) / 2.0,
    )
}

/// Base price times the single highest location modifier, times the premium
/// factor for premium districts, rounded half up to whole dollars.
pub fn price_for(
    tier: LotTier,
    location_types: &[LocationType],
    premium: bool,
    premium_factor: Decimal,
) -> u64 {
    let modifier = location_types
        .iter()
        .map(|t| t.modifier())
        .fold(Decimal::ONE, |a, b| a.max(b));
    let mut price = tier.base_price() * modifier;
    if premium {
        price = price.checked_mul(premium_factor).unwrap_or(Decimal::MAX);
    }
    price
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(u64::MAX)
}

struct BlockCtx<'a> {
    layout: &'a CityLayout,
    config: &'a GeneratorConfig,
    district: &'a District,
    block: &'a PlannedBlock,
}

impl BlockCtx<'_> {
    fn fill<R: Rng>(&self, rng: &mut R, out: &mut Vec<Parcel>) -> u32 {
        let cfg = self.config;
        let origin = self.block.origin;
        let right_limit = origin.x + cfg.block_size - cfg.edge_reserve;
        let bottom_limit = origin.y + cfg.block_size - cfg.edge_reserve;
        let packed = matches!(cfg.row_advance, RowAdvance::Packed { .. });

        let mut lots = 0;
        let mut y = origin.y + cfg.street_margin;
        while y < bottom_limit && lots < cfg.max_lots_per_block {
            let mut x = origin.x + cfg.street_margin;
            let mut tallest = 0;
            while x < right_limit && lots < cfg.max_lots_per_block {
                let tier = tier_for_roll(rng.gen::<f64>());
                let dims = tier.dimensions();
                if x + dims.width > right_limit {
                    break;
                }
                if packed && y + dims.height > bottom_limit {
                    break;
                }
                let parcel = self.place(rng, tier, Point::new(x, y), lots, out.len() + 1);
                out.push(parcel);
                x = x.saturating_add(dims.width + cfg.lot_gap);
                tallest = tallest.max(dims.height);
                lots += 1;
            }
            match cfg.row_advance {
                RowAdvance::Fixed { step } => y = y.saturating_add(step),
                RowAdvance::Packed { gap } => {
                    if tallest == 0 {
                        break;
                    }
                    y = y.saturating_add(tallest).saturating_add(gap);
                }
            }
        }
        lots
    }

    fn place<R: Rng>(
        &self,
        rng: &mut R,
        tier: LotTier,
        position: Point,
        lot_seq: u32,
        serial: usize,
    ) -> Parcel {
        let dims = tier.dimensions();
        let (cx, cy) = lot_center(position, dims);
        let nearest = self.layout.nearest_landmark(cx, cy);
        let location_types = classify(position, lot_seq, nearest);
        let price = price_for(
            tier,
            &location_types,
            self.district.premium,
            self.config.premium_factor,
        );
        let status = status_for_roll(rng.gen::<f64>());

        let index = self.block.index;
        let street_number = 100 + lot_seq * 10 + index.row * 100;
        let street = if rng.gen::<f64>() > 0.5 {
            self.layout.streets.north_south_for(index.col)
        } else {
            self.layout.streets.east_west_for(index.row)
        };
        let landmark_name = nearest.map(|(l, _)| l.name.clone()).unwrap_or_default();

        let mut features = Vec::with_capacity(location_types.len() + 2);
        features.push(tier.label().to_string());
        features.extend(location_types.iter().map(|t| t.label().to_string()));
        if !landmark_name.is_empty() {
            features.push(format!("Near {landmark_name}"));
        }
        let view = if landmark_name.is_empty() {
            String::new()
        } else {
            format!("View of {landmark_name}")
        };

        Parcel {
            id: format!("PROP-{serial:04}"),
            parcel_number: format!(
                "{}{}{}-{:02}",
                self.district.abbreviation(),
                index.row,
                index.col,
                lot_seq + 1
            ),
            block: format!(
                "{} Block {}{}",
                self.district.short_name(),
                index.row + 1,
                index.column_letter()
            ),
            lot: (lot_seq + 1).to_string(),
            subdivision: self.district.name.clone(),
            district_id: self.district.id.clone(),
            block_index: index,
            size: dims.area(),
            price,
            status,
            coordinates: position,
            dimensions: dims,
            features,
            view,
            address: format!("{street_number} {street}"),
            lot_type: tier,
            location_types,
            nearest_landmark: landmark_name,
        }
    }
}

/// Generate the full parcel inventory using the injected RNG.
///
/// Output order is district order, then block row-major order, then fill
/// order. Per lot the RNG is drawn for tier, status and street, in that
/// order. Blocks too small for any tier yield nothing.
pub fn generate_city<R: Rng>(
    layout: &CityLayout,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Vec<Parcel> {
    let mut parcels = Vec::new();
    let mut filled = 0usize;
    let mut skipped = 0usize;
    for district in &layout.districts {
        for block in district_blocks(layout, district, config) {
            if let Some(landmark) = &block.landmark {
                debug!(district = %district.id, row = block.index.row, col = block.index.col, %landmark, "block reserved for landmark");
                skipped += 1;
                continue;
            }
            let ctx = BlockCtx {
                layout,
                config,
                district,
                block: &block,
            };
            let lots = ctx.fill(rng, &mut parcels);
            debug!(district = %district.id, row = block.index.row, col = block.index.col, lots, "block filled");
            filled += 1;
        }
    }
    info!(parcels = parcels.len(), filled, skipped, "city generated");
    parcels
}

/// Reproducible generation from a seed.
pub fn generate_seeded(layout: &CityLayout, config: &GeneratorConfig, seed: u64) -> Vec<Parcel> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_city(layout, config, &mut rng)
}

/// Production generation; every call yields a different dataset.
pub fn generate_from_entropy(layout: &CityLayout, config: &GeneratorConfig) -> Vec<Parcel> {
    generate_city(layout, config, &mut rand::thread_rng())
}

/// Validate both inputs before generating.
pub fn validate(layout: &CityLayout, config: &GeneratorConfig) -> Result<(), ValidationError> {
    config.validate()?;
    validate_layout(layout, config.district_size)
}

/// Available and total parcel counts for one district.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictAvailability {
    pub district_id: String,
    pub district_name: String,
    pub available: usize,
    pub total: usize,
}

/// Per-district availability, in layout order.
pub fn available_by_district(
    layout: &CityLayout,
    parcels: &[Parcel],
) -> Vec<DistrictAvailability> {
    layout
        .districts
        .iter()
        .map(|d| {
            let in_district = parcels.iter().filter(|p| p.district_id == d.id);
            let (total, available) = in_district.fold((0, 0), |(t, a), p| {
                (t + 1, a + usize::from(p.is_available()))
            });
            DistrictAvailability {
                district_id: d.id.clone(),
                district_name: d.name.clone(),
                available,
                total,
            }
        })
        .collect()
}

/// Aggregate counts over a generated inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total: usize,
    pub by_status: BTreeMap<ParcelStatus, usize>,
    pub by_tier: BTreeMap<LotTier, usize>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
}

pub fn summarize(parcels: &[Parcel]) -> InventorySummary {
    let mut summary = InventorySummary {
        total: parcels.len(),
        ..InventorySummary::default()
    };
    for p in parcels {
        *summary.by_status.entry(p.status).or_default() += 1;
        *summary.by_tier.entry(p.lot_type).or_default() += 1;
    }
    summary.min_price = parcels.iter().map(|p| p.price).min();
    summary.max_price = parcels.iter().map(|p| p.price).max();
    summary
}
