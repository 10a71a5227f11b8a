//! Donation quotes with leaderboard matching, and the parcel checkout.

use std::str::FromStr;

use estate_core::{find_parcel, find_religion, Parcel, ParcelStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{RankError, ReligionStats};

/// Longest accepted memorial message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// How a parcel purchase is dedicated on its memorial plaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedicationType {
    InMemoryOf,
    InHonorOf,
    DedicatedTo,
}

impl DedicationType {
    pub fn label(self) -> &'static str {
        match self {
            DedicationType::InMemoryOf => "In Memory Of",
            DedicationType::InHonorOf => "In Honor Of",
            DedicationType::DedicatedTo => "Dedicated To",
        }
    }
}

impl FromStr for DedicationType {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_memory_of" => Ok(DedicationType::InMemoryOf),
            "in_honor_of" => Ok(DedicationType::InHonorOf),
            "dedicated_to" => Ok(DedicationType::DedicatedTo),
            other => Err(RankError::UnknownDedication(other.to_string())),
        }
    }
}

/// Memorial text engraved on a purchased parcel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dedication {
    pub kind: DedicationType,
    pub dedicatee: String,
    pub dates: Option<String>,
    pub message: String,
}

impl Dedication {
    pub fn validate(&self) -> Result<(), RankError> {
        if self.dedicatee.trim().is_empty() {
            return Err(RankError::InvalidDedication("dedicatee name is required"));
        }
        if self.message.trim().is_empty() {
            return Err(RankError::InvalidDedication("message is required"));
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(RankError::InvalidDedication("message exceeds 500 characters"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonationQuote {
    pub religion_id: String,
    pub amount: Decimal,
    /// Percent, from the religion's current rank.
    pub matching_bonus: u32,
    pub matched: Decimal,
    pub total: Decimal,
}

/// Quote a donation. Religions missing from `stats` get no match.
pub fn quote_donation(
    amount: Decimal,
    religion_id: &str,
    stats: &[ReligionStats],
) -> Result<DonationQuote, RankError> {
    if amount < Decimal::ZERO {
        return Err(RankError::NegativeAmount);
    }
    let matching_bonus = stats
        .iter()
        .find(|s| s.religion_id == religion_id)
        .map_or(0, |s| s.matching_bonus);
    let matched = amount * Decimal::from(matching_bonus) / Decimal::ONE_HUNDRED;
    Ok(DonationQuote {
        religion_id: religion_id.to_string(),
        amount,
        matching_bonus,
        matched,
        total: amount + matched,
    })
}

/// What a buyer asks for at checkout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub parcel_id: String,
    pub religion_id: String,
    /// Defaults to the parcel's price.
    pub amount: Option<Decimal>,
    pub dedication: Option<Dedication>,
}

/// A priced parcel purchase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParcelQuote {
    pub parcel_id: String,
    pub parcel_number: String,
    pub subdivision: String,
    pub charity_name: String,
    pub donation: DonationQuote,
    pub dedication: Option<Dedication>,
}

/// Quote the purchase of one parcel.
///
/// `Ok(None)` when the parcel or the religion is unknown. Sold parcels
/// cannot be bought; available and reserved ones can.
pub fn quote_parcel(
    parcels: &[Parcel],
    request: &CheckoutRequest,
    stats: &[ReligionStats],
) -> Result<Option<ParcelQuote>, RankError> {
    let (Some(parcel), Some(religion)) = (
        find_parcel(parcels, &request.parcel_id),
        find_religion(&request.religion_id),
    ) else {
        debug!(parcel = %request.parcel_id, religion = %request.religion_id, "checkout target not found");
        return Ok(None);
    };
    if parcel.status == ParcelStatus::Sold {
        return Err(RankError::ParcelSold(parcel.id.clone()));
    }
    if let Some(dedication) = &request.dedication {
        dedication.validate()?;
    }
    let amount = request
        .amount
        .unwrap_or_else(|| Decimal::from(parcel.price));
    let donation = quote_donation(amount, &religion.id, stats)?;
    Ok(Some(ParcelQuote {
        parcel_id: parcel.id.clone(),
        parcel_number: parcel.parcel_number.clone(),
        subdivision: parcel.subdivision.clone(),
        charity_name: religion.charity_name,
        donation,
        dedication: request.dedication.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{competition_stats, RankTuning};
    use estate_core::{BlockIndex, Dimensions, LocationType, LotTier, Point};

    fn parcel(id: &str, price: u64, status: ParcelStatus) -> Parcel {
        let dimensions = Dimensions {
            width: 40,
            height: 40,
        };
        Parcel {
            id: id.to_string(),
            parcel_number: "CR11-02".to_string(),
            block: "Crystal Block 2B".to_string(),
            lot: "2".to_string(),
            subdivision: "Crystal River Valley".to_string(),
            district_id: "crystal-river".to_string(),
            block_index: BlockIndex { row: 1, col: 1 },
            size: dimensions.area(),
            price,
            status,
            coordinates: Point::new(1010, 210),
            dimensions,
            features: vec!["Standard".to_string()],
            view: String::new(),
            address: "210 Cloud Street".to_string(),
            lot_type: LotTier::Standard,
            location_types: vec![LocationType::Standard],
            nearest_landmark: String::new(),
        }
    }

    fn request(parcel_id: &str, religion_id: &str) -> CheckoutRequest {
        CheckoutRequest {
            parcel_id: parcel_id.to_string(),
            religion_id: religion_id.to_string(),
            amount: None,
            dedication: None,
        }
    }

    fn inventory() -> Vec<Parcel> {
        vec![
            parcel("PROP-0001", 400, ParcelStatus::Available),
            parcel("PROP-0002", 520, ParcelStatus::Reserved),
            parcel("PROP-0003", 875, ParcelStatus::Sold),
        ]
    }

    #[test]
    fn leader_gets_ten_percent() {
        let stats = competition_stats(&RankTuning::default());
        let q = quote_donation(Decimal::new(312, 0), "christianity", &stats).unwrap();
        assert_eq!(q.matching_bonus, 10);
        assert_eq!(q.matched, Decimal::new(312, 1));
        assert_eq!(q.total, Decimal::new(3432, 1));
    }

    #[test]
    fn runner_up_and_rest() {
        let stats = competition_stats(&RankTuning::default());
        let q = quote_donation(Decimal::new(1000, 0), "hinduism", &stats).unwrap();
        assert_eq!(q.total, Decimal::new(1050, 0));
        let q = quote_donation(Decimal::new(1000, 0), "buddhism", &stats).unwrap();
        assert_eq!(q.matched, Decimal::ZERO);
        let q = quote_donation(Decimal::new(1000, 0), "unknown", &stats).unwrap();
        assert_eq!(q.matching_bonus, 0);
    }

    #[test]
    fn negative_amount_rejected() {
        assert_eq!(
            quote_donation(Decimal::new(-1, 0), "islam", &[]),
            Err(RankError::NegativeAmount)
        );
    }

    #[test]
    fn dedication_labels_and_names() {
        assert_eq!(DedicationType::InMemoryOf.label(), "In Memory Of");
        assert_eq!(DedicationType::DedicatedTo.label(), "Dedicated To");
        assert_eq!(
            "in_honor_of".parse::<DedicationType>(),
            Ok(DedicationType::InHonorOf)
        );
        assert_eq!(
            "forever".parse::<DedicationType>(),
            Err(RankError::UnknownDedication("forever".to_string()))
        );
    }

    #[test]
    fn checkout_defaults_amount_to_price() {
        let stats = competition_stats(&RankTuning::default());
        let q = quote_parcel(&inventory(), &request("PROP-0001", "christianity"), &stats)
            .unwrap()
            .unwrap();
        assert_eq!(q.donation.amount, Decimal::new(400, 0));
        assert_eq!(q.donation.total, Decimal::new(440, 0));
        assert_eq!(q.parcel_number, "CR11-02");
        assert_eq!(q.charity_name, "World Vision");
    }

    #[test]
    fn checkout_custom_amount_and_reserved_parcel() {
        let stats = competition_stats(&RankTuning::default());
        let mut req = request("PROP-0002", "hinduism");
        req.amount = Some(Decimal::new(1000, 0));
        let q = quote_parcel(&inventory(), &req, &stats).unwrap().unwrap();
        assert_eq!(q.donation.total, Decimal::new(1050, 0));
        req.amount = Some(Decimal::new(-5, 0));
        assert_eq!(
            quote_parcel(&inventory(), &req, &stats),
            Err(RankError::NegativeAmount)
        );
    }

    #[test]
    fn checkout_missing_parcel_or_religion_is_not_found() {
        let stats = competition_stats(&RankTuning::default());
        let parcels = inventory();
        assert_eq!(
            quote_parcel(&parcels, &request("PROP-9999", "islam"), &stats),
            Ok(None)
        );
        assert_eq!(
            quote_parcel(&parcels, &request("PROP-0001", "zoroastrianism"), &stats),
            Ok(None)
        );
    }

    #[test]
    fn sold_parcel_not_purchasable() {
        let stats = competition_stats(&RankTuning::default());
        assert_eq!(
            quote_parcel(&inventory(), &request("PROP-0003", "islam"), &stats),
            Err(RankError::ParcelSold("PROP-0003".to_string()))
        );
    }

    #[test]
    fn dedication_rules() {
        let stats = competition_stats(&RankTuning::default());
        let mut dedication = Dedication {
            kind: DedicationType::InMemoryOf,
            dedicatee: "Grandma Rose".to_string(),
            dates: Some("1931 - 2019".to_string()),
            message: "Forever in our hearts".to_string(),
        };
        let mut req = request("PROP-0001", "judaism");
        req.dedication = Some(dedication.clone());
        let q = quote_parcel(&inventory(), &req, &stats).unwrap().unwrap();
        assert_eq!(q.dedication.as_ref().map(|d| d.kind), Some(DedicationType::InMemoryOf));

        dedication.message = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(dedication.validate().is_err());
        dedication.message = "x".repeat(MAX_MESSAGE_CHARS);
        assert!(dedication.validate().is_ok());
        dedication.dedicatee = "  ".to_string();
        req.dedication = Some(dedication);
        assert!(matches!(
            quote_parcel(&inventory(), &req, &stats),
            Err(RankError::InvalidDedication(_))
        ));
    }
}
