#![deny(warnings)]

//! Competition leaderboard for Heavenly Estates.
//!
//! Everything here is a derived read over the static charity and ownership
//! tables: rankings with matching bonuses, week-over-week trends, and which
//! religion dominates each district. Nothing is cached; every call
//! recomputes from the tables, which never change.

use estate_core::{
    charity_impact_table, district_ownership, previous_week_donations, CharityImpact,
    DistrictOwnership, ReligionCount,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod display;
pub mod quote;

pub use display::{days_until_month_end, days_until_month_end_now, format_currency, rank_medal};
pub use quote::{
    quote_donation, quote_parcel, CheckoutRequest, Dedication, DedicationType, DonationQuote,
    ParcelQuote,
};

/// Share of lifetime donations attributed to the current month, in percent.
const MONTHLY_SHARE_PCT: u64 = 28;
/// Share of the month attributed to the last seven days, as a divisor.
const WEEKS_PER_MONTH: u64 = 4;

/// Errors produced by leaderboard reads and checkout quotes.
#[derive(Debug, Error, PartialEq)]
pub enum RankError {
    /// Trend thresholds must be finite and strictly descending.
    #[error("trend thresholds must be finite and strictly descending")]
    UnorderedThresholds,
    /// Contested gap must be a fraction in [0, 1].
    #[error("contested gap {0} must be within [0,1]")]
    InvalidContestedGap(f64),
    /// Donation amounts must be non-negative.
    #[error("donation amount must be >= 0")]
    NegativeAmount,
    /// Sold parcels cannot be purchased again.
    #[error("parcel {0} is already sold")]
    ParcelSold(String),
    #[error("unknown dedication type {0:?}")]
    UnknownDedication(String),
    #[error("invalid dedication: {0}")]
    InvalidDedication(&'static str),
}

/// Tuning constants for trends, contested districts and matching bonuses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankTuning {
    /// Growth percent above which a trend is surging.
    pub surging_above: f64,
    /// Growth percent above which a trend is rising.
    pub rising_above: f64,
    /// Growth percent above which a trend is steady; below is slowing.
    pub steady_above: f64,
    /// Relative lead under which a district is contested.
    pub contested_gap: f64,
    /// Matching bonus percent for rank 1.
    pub first_place_bonus: u32,
    /// Matching bonus percent for rank 2.
    pub second_place_bonus: u32,
}

impl Default for RankTuning {
    fn default() -> Self {
        Self {
            surging_above: 20.0,
            rising_above: 5.0,
            steady_above: -5.0,
            contested_gap: 0.15,
            first_place_bonus: 10,
            second_place_bonus: 5,
        }
    }
}

impl RankTuning {
    pub fn validate(&self) -> Result<(), RankError> {
        let thresholds = [self.surging_above, self.rising_above, self.steady_above];
        if thresholds.iter().any(|t| !t.is_finite())
            || self.surging_above <= self.rising_above
            || self.rising_above <= self.steady_above
        {
            return Err(RankError::UnorderedThresholds);
        }
        if !(0.0..=1.0).contains(&self.contested_gap) {
            return Err(RankError::InvalidContestedGap(self.contested_gap));
        }
        Ok(())
    }

    /// Matching bonus percent for a 1-based rank.
    pub fn matching_bonus(&self, rank: u32) -> u32 {
        match rank {
            1 => self.first_place_bonus,
            2 => self.second_place_bonus,
            _ => 0,
        }
    }
}

/// Week-over-week donation momentum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Surging,
    Rising,
    Steady,
    Slowing,
}

impl Trend {
    pub fn icon(self) -> &'static str {
        match self {
            Trend::Surging => "🚀",
            Trend::Rising => "📈",
            Trend::Steady => "➡️",
            Trend::Slowing => "📉",
        }
    }
}

/// Classify growth from the previous seven days to the last seven.
///
/// With no previous donations there is no growth rate: any new donation
/// counts as surging, none as steady.
pub fn classify_trend(last_7_days: u64, previous_7_days: u64, tuning: &RankTuning) -> Trend {
    if previous_7_days == 0 {
        return if last_7_days > 0 {
            Trend::Surging
        } else {
            Trend::Steady
        };
    }
    let growth = (last_7_days as f64 - previous_7_days as f64) / previous_7_days as f64 * 100.0;
    if growth > tuning.surging_above {
        Trend::Surging
    } else if growth > tuning.rising_above {
        Trend::Rising
    } else if growth > tuning.steady_above {
        Trend::Steady
    } else {
        Trend::Slowing
    }
}

/// One religion's leaderboard entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReligionStats {
    pub religion_id: String,
    pub total_donations: u64,
    pub properties_owned: u64,
    pub monthly_donations: u64,
    pub last_7_days_donations: u64,
    /// Dollars per day over the last seven days.
    pub velocity: Decimal,
    pub trend: Trend,
    /// 1-based.
    pub rank: u32,
    /// Percent.
    pub matching_bonus: u32,
    pub districts_dominated: Vec<String>,
}

/// Rank a charity table. Sorting is stable, so equal totals keep table order.
pub fn rank_charities(table: &[CharityImpact], tuning: &RankTuning) -> Vec<ReligionStats> {
    let mut stats: Vec<ReligionStats> = table
        .iter()
        .map(|c| {
            let monthly = c.total_donations * MONTHLY_SHARE_PCT / 100;
            let last_7_days = monthly / WEEKS_PER_MONTH;
            let previous = previous_week_donations(&c.religion_id);
            let trend = classify_trend(last_7_days, previous, tuning);
            debug!(religion = %c.religion_id, last_7_days, previous, ?trend, "trend classified");
            ReligionStats {
                religion_id: c.religion_id.clone(),
                total_donations: c.total_donations,
                properties_owned: c.properties_sold,
                monthly_donations: monthly,
                last_7_days_donations: last_7_days,
                velocity: (Decimal::from(last_7_days) / Decimal::from(7))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
                trend,
                rank: 0,
                matching_bonus: 0,
                districts_dominated: Vec::new(),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.total_donations.cmp(&a.total_donations));
    for (i, s) in stats.iter_mut().enumerate() {
        s.rank = i as u32 + 1;
        s.matching_bonus = tuning.matching_bonus(s.rank);
    }
    stats
}

/// Leaderboard over the built-in charity table.
pub fn competition_stats(tuning: &RankTuning) -> Vec<ReligionStats> {
    rank_charities(&charity_impact_table(), tuning)
}

/// Which religion controls a district, and whether the lead is narrow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistrictDominance {
    pub district_name: String,
    pub dominant_religion: Option<String>,
    pub properties_by_religion: Vec<ReligionCount>,
    pub is_contested: bool,
}

/// Dominance for one ownership row.
///
/// Counts are scanned in table order: the first strictly greater count takes
/// the lead, and a count equal to the lead becomes the runner-up, so exact
/// ties are always contested. An all-zero row has no dominant religion.
pub fn dominance_of(row: &DistrictOwnership, tuning: &RankTuning) -> DistrictDominance {
    let mut dominant: Option<&str> = None;
    let mut max = 0u32;
    let mut second = 0u32;
    for c in &row.counts {
        if c.parcels > max {
            second = max;
            max = c.parcels;
            dominant = Some(c.religion_id.as_str());
        } else if c.parcels > second {
            second = c.parcels;
        }
    }
    let is_contested = match dominant {
        Some(_) if max > 0 => f64::from(max - second) / f64::from(max) < tuning.contested_gap,
        _ => false,
    };
    DistrictDominance {
        district_name: row.district_name.clone(),
        dominant_religion: dominant.map(str::to_string),
        properties_by_religion: row.counts.clone(),
        is_contested,
    }
}

/// Dominance for every district, in layout order.
pub fn district_dominance(tuning: &RankTuning) -> Vec<DistrictDominance> {
    district_ownership()
        .iter()
        .map(|row| dominance_of(row, tuning))
        .collect()
}

/// Leaderboard with each religion's dominated districts filled in.
pub fn enhanced_competition_stats(tuning: &RankTuning) -> Vec<ReligionStats> {
    let mut stats = competition_stats(tuning);
    let districts = district_dominance(tuning);
    for s in &mut stats {
        s.districts_dominated = districts
            .iter()
            .filter(|d| d.dominant_religion.as_deref() == Some(s.religion_id.as_str()))
            .map(|d| d.district_name.clone())
            .collect();
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn row(counts: &[(&str, u32)]) -> DistrictOwnership {
        DistrictOwnership {
            district_name: "Test District".to_string(),
            counts: counts
                .iter()
                .map(|&(id, parcels)| ReligionCount {
                    religion_id: id.to_string(),
                    parcels,
                })
                .collect(),
        }
    }

    #[test]
    fn fixed_totals_rank_descending() {
        let stats = competition_stats(&RankTuning::default());
        let order: Vec<&str> = stats.iter().map(|s| s.religion_id.as_str()).collect();
        assert_eq!(
            order,
            ["christianity", "hinduism", "islam", "sikhism", "judaism", "buddhism"]
        );
        let ranks: Vec<u32> = stats.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, [1, 2, 3, 4, 5, 6]);
        let bonuses: Vec<u32> = stats.iter().map(|s| s.matching_bonus).collect();
        assert_eq!(bonuses, [10, 5, 0, 0, 0, 0]);
    }

    #[test]
    fn derived_weekly_figures() {
        let stats = competition_stats(&RankTuning::default());
        let c = &stats[0];
        assert_eq!(c.monthly_donations, 35_966);
        assert_eq!(c.last_7_days_donations, 8_991);
        assert_eq!(c.velocity, Decimal::new(128_443, 2));
        assert_eq!(c.trend, Trend::Slowing);
        assert_eq!(c.properties_owned, 342);
    }

    #[test]
    fn reads_are_repeatable() {
        let tuning = RankTuning::default();
        assert_eq!(competition_stats(&tuning), competition_stats(&tuning));
        assert_eq!(district_dominance(&tuning), district_dominance(&tuning));
    }

    #[test]
    fn ties_keep_table_order() {
        let mut table = charity_impact_table();
        table[2].total_donations = table[0].total_donations;
        let stats = rank_charities(&table, &RankTuning::default());
        assert_eq!(stats[0].religion_id, "christianity");
        assert_eq!(stats[1].religion_id, "judaism");
        assert_eq!(stats[1].matching_bonus, 5);
    }

    #[test]
    fn trend_thresholds() {
        let t = RankTuning::default();
        assert_eq!(classify_trend(1300, 1000, &t), Trend::Surging);
        assert_eq!(classify_trend(1190, 1000, &t), Trend::Rising);
        assert_eq!(classify_trend(1060, 1000, &t), Trend::Rising);
        assert_eq!(classify_trend(1040, 1000, &t), Trend::Steady);
        assert_eq!(classify_trend(960, 1000, &t), Trend::Steady);
        assert_eq!(classify_trend(940, 1000, &t), Trend::Slowing);
        assert_eq!(classify_trend(5, 0, &t), Trend::Surging);
        assert_eq!(classify_trend(0, 0, &t), Trend::Steady);
        assert_eq!(Trend::Rising.icon(), "📈");
    }

    #[test]
    fn fixed_table_dominance() {
        let districts = district_dominance(&RankTuning::default());
        assert_eq!(districts.len(), 8);
        let contested: Vec<&str> = districts
            .iter()
            .filter(|d| d.is_contested)
            .map(|d| d.district_name.as_str())
            .collect();
        assert_eq!(
            contested,
            [
                "Crystal River Valley",
                "Pearly Plaza",
                "Seraphim Shores",
                "Eternal Meadows"
            ]
        );
        assert_eq!(districts[2].dominant_religion.as_deref(), Some("hinduism"));
        assert_eq!(districts[5].dominant_religion.as_deref(), Some("islam"));
    }

    #[test]
    fn exact_tie_is_contested_and_first_wins() {
        let d = dominance_of(&row(&[("a", 10), ("b", 10), ("c", 3)]), &RankTuning::default());
        assert_eq!(d.dominant_religion.as_deref(), Some("a"));
        assert!(d.is_contested);
    }

    #[test]
    fn all_zero_row_is_guarded() {
        let d = dominance_of(&row(&[("a", 0), ("b", 0)]), &RankTuning::default());
        assert_eq!(d.dominant_religion, None);
        assert!(!d.is_contested);
        let empty = dominance_of(&row(&[]), &RankTuning::default());
        assert_eq!(empty.dominant_religion, None);
    }

    #[test]
    fn contested_gap_is_tunable() {
        let r = row(&[("a", 50), ("b", 40)]);
        assert!(!dominance_of(&r, &RankTuning::default()).is_contested);
        let loose = RankTuning {
            contested_gap: 0.25,
            ..RankTuning::default()
        };
        assert!(dominance_of(&r, &loose).is_contested);
    }

    #[test]
    fn enhanced_stats_list_dominated_districts() {
        let stats = enhanced_competition_stats(&RankTuning::default());
        let find = |id: &str| stats.iter().find(|s| s.religion_id == id).unwrap();
        assert_eq!(
            find("christianity").districts_dominated,
            [
                "Golden Gates District",
                "Cloud Nine Heights",
                "Pearly Plaza",
                "Divine Heights"
            ]
        );
        assert_eq!(
            find("islam").districts_dominated,
            ["Crystal River Valley", "Seraphim Shores"]
        );
        assert_eq!(
            find("hinduism").districts_dominated,
            ["Celestial Gardens", "Eternal Meadows"]
        );
        assert!(find("judaism").districts_dominated.is_empty());
    }

    #[test]
    fn tuning_validation() {
        assert!(RankTuning::default().validate().is_ok());
        let bad = RankTuning {
            rising_above: 30.0,
            ..RankTuning::default()
        };
        assert_eq!(bad.validate(), Err(RankError::UnorderedThresholds));
        let gap = RankTuning {
            contested_gap: 1.5,
            ..RankTuning::default()
        };
        assert_eq!(gap.validate(), Err(RankError::InvalidContestedGap(1.5)));
    }

    proptest! {
        #[test]
        fn ranks_follow_totals(totals in proptest::collection::vec(0u64..1_000_000, 6)) {
            let mut table = charity_impact_table();
            for (c, t) in table.iter_mut().zip(&totals) {
                c.total_donations = *t;
            }
            let stats = rank_charities(&table, &RankTuning::default());
            for pair in stats.windows(2) {
                prop_assert!(pair[0].total_donations >= pair[1].total_donations);
                prop_assert_eq!(pair[0].rank + 1, pair[1].rank);
            }
            prop_assert_eq!(stats[0].matching_bonus, 10);
            prop_assert_eq!(stats[1].matching_bonus, 5);
            prop_assert!(stats[2..].iter().all(|s| s.matching_bonus == 0));
        }

        #[test]
        fn dominant_holds_the_max(counts in proptest::collection::vec(0u32..100, 1..8)) {
            let ids: Vec<String> = (0..counts.len()).map(|i| format!("r{i}")).collect();
            let pairs: Vec<(&str, u32)> = ids.iter().map(String::as_str).zip(counts.iter().copied()).collect();
            let d = dominance_of(&row(&pairs), &RankTuning::default());
            let max = counts.iter().copied().max().unwrap_or(0);
            match d.dominant_religion {
                Some(id) => {
                    let idx = ids.iter().position(|i| *i == id).unwrap();
                    prop_assert_eq!(counts[idx], max);
                    prop_assert!(counts[..idx].iter().all(|&c| c < max));
                }
                None => prop_assert_eq!(max, 0),
            }
        }
    }
}
