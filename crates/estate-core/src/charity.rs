//! Religions, their partner charities, and the mock competition tables.
//!
//! All of this is seed data: built on demand from constants and never
//! mutated afterwards.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A religion users can donate on behalf of.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Religion {
    pub id: String,
    pub name: String,
    pub description: String,
    pub charity_name: String,
    pub charity_description: String,
    pub icon: String,
    /// Gradient classes used by the frontend.
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetric {
    pub metric: String,
    pub value: u64,
    pub unit: String,
    pub icon: String,
}

/// A fundraising project with progress toward a goal, in dollars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub location: String,
    pub progress: u64,
    pub goal: u64,
    pub description: String,
}

impl Project {
    /// Progress as a whole percentage, rounded half up. May exceed 100.
    pub fn progress_percent(&self) -> u32 {
        if self.goal == 0 {
            return 0;
        }
        let pct = Decimal::from(self.progress) * Decimal::ONE_HUNDRED / Decimal::from(self.goal);
        pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(u32::MAX)
    }

    /// Fill fraction for a progress bar, capped at 1.
    pub fn progress_bar_fraction(&self) -> f64 {
        if self.goal == 0 {
            return 0.0;
        }
        (self.progress as f64 / self.goal as f64).min(1.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub location: String,
}

/// Donation totals and impact reporting for one religion's charity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharityImpact {
    pub religion_id: String,
    pub charity_name: String,
    /// Lifetime donations in whole dollars.
    pub total_donations: u64,
    pub properties_sold: u64,
    pub impact_metrics: Vec<ImpactMetric>,
    pub projects: Vec<Project>,
    pub recent_stories: Vec<Story>,
}

/// Totals across every charity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalImpact {
    pub total_donations: u64,
    pub total_properties: u64,
    pub charities_supported: usize,
    pub countries_reached: u32,
}

/// Parcel count owned by one religion inside a district.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReligionCount {
    pub religion_id: String,
    pub parcels: u32,
}

/// Mock per-district ownership row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictOwnership {
    pub district_name: String,
    /// In religion table order.
    pub counts: Vec<ReligionCount>,
}

/// Religion ids in table order.
pub const RELIGION_IDS: [&str; 6] = [
    "christianity",
    "islam",
    "judaism",
    "hinduism",
    "buddhism",
    "sikhism",
];

const COUNTRIES_REACHED: u32 = 45;

pub fn religions() -> Vec<Religion> {
    let rows: [(&str, &str, &str, &str, &str, &str, &str); 6] = [
        (
            "christianity",
            "Christianity",
            "Claim your mansion in the Father's house",
            "World Vision",
            "Child sponsorship, clean water and education across 100 countries",
            "✝️",
            "from-blue-500 to-indigo-600",
        ),
        (
            "islam",
            "Islam",
            "Reserve your place in the gardens of Jannah",
            "Islamic Relief",
            "Emergency relief and long-term development for communities in crisis",
            "☪️",
            "from-emerald-500 to-green-600",
        ),
        (
            "judaism",
            "Judaism",
            "A plot in the world to come",
            "JDC (Joint Distribution Committee)",
            "Care for elderly, refugees and Jewish communities worldwide",
            "✡️",
            "from-sky-500 to-blue-600",
        ),
        (
            "hinduism",
            "Hinduism",
            "Secure your abode in Vaikuntha",
            "Akshaya Patra Foundation",
            "School meals for millions of children across India",
            "🕉️",
            "from-orange-500 to-amber-600",
        ),
        (
            "buddhism",
            "Buddhism",
            "A peaceful retreat in the Pure Land",
            "Buddhist Global Relief",
            "Fighting hunger through sustainable agriculture and food aid",
            "☸️",
            "from-yellow-500 to-orange-500",
        ),
        (
            "sikhism",
            "Sikhism",
            "Your home in Sach Khand",
            "Khalsa Aid",
            "Humanitarian relief in disaster and conflict zones",
            "🪯",
            "from-amber-500 to-yellow-600",
        ),
    ];
    rows.iter()
        .map(
            |&(id, name, description, charity_name, charity_description, icon, color)| Religion {
                id: id.into(),
                name: name.into(),
                description: description.into(),
                charity_name: charity_name.into(),
                charity_description: charity_description.into(),
                icon: icon.into(),
                color: color.into(),
            },
        )
        .collect()
}

/// Looks up a religion by id. `None` is the not-found state.
pub fn find_religion(id: &str) -> Option<Religion> {
    religions().into_iter().find(|r| r.id == id)
}

fn metric(metric: &str, value: u64, unit: &str, icon: &str) -> ImpactMetric {
    ImpactMetric {
        metric: metric.into(),
        value,
        unit: unit.into(),
        icon: icon.into(),
    }
}

fn project(name: &str, location: &str, progress: u64, goal: u64, description: &str) -> Project {
    Project {
        name: name.into(),
        location: location.into(),
        progress,
        goal,
        description: description.into(),
    }
}

fn story(title: &str, description: &str, (y, m, d): (i32, u32, u32), location: &str) -> Story {
    Story {
        title: title.into(),
        description: description.into(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        location: location.into(),
    }
}

/// Per-religion charity data, in religion table order.
pub fn charity_impact_table() -> Vec<CharityImpact> {
    vec![
        CharityImpact {
            religion_id: "christianity".into(),
            charity_name: "World Vision".into(),
            total_donations: 128_450,
            properties_sold: 342,
            impact_metrics: vec![
                metric("Children Sponsored", 856, "children", "👶"),
                metric("Clean Water Wells", 23, "wells", "💧"),
                metric("Families Helped", 1240, "families", "👨‍👩‍👧‍👦"),
                metric("School Supplies Provided", 3450, "kits", "📚"),
            ],
            projects: vec![
                project(
                    "Uganda Clean Water Initiative",
                    "Uganda, East Africa",
                    87_500,
                    120_000,
                    "Building wells to provide clean water access to 50 villages",
                ),
                project(
                    "Education for All - Kenya",
                    "Kenya",
                    23_000,
                    50_000,
                    "Providing school supplies and teacher training",
                ),
            ],
            recent_stories: vec![
                story(
                    "New Water Well Completed in Rural Uganda",
                    "500 families now have access to clean drinking water thanks to community donations",
                    (2025, 10, 15),
                    "Kampala Region, Uganda",
                ),
                story(
                    "200 Children Receive School Supplies",
                    "Local school receives books, pencils, and learning materials",
                    (2025, 10, 10),
                    "Nairobi, Kenya",
                ),
            ],
        },
        CharityImpact {
            religion_id: "islam".into(),
            charity_name: "Islamic Relief".into(),
            total_donations: 95_230,
            properties_sold: 287,
            impact_metrics: vec![
                metric("Orphans Supported", 624, "children", "👶"),
                metric("Emergency Relief Packages", 1840, "packages", "📦"),
                metric("Medical Clinics Funded", 12, "clinics", "🏥"),
                metric("Food Aid Distributed", 45_200, "meals", "🍲"),
            ],
            projects: vec![
                project(
                    "Syria Emergency Relief",
                    "Syria",
                    62_000,
                    100_000,
                    "Providing emergency food, shelter, and medical aid",
                ),
                project(
                    "Yemen Water Crisis Response",
                    "Yemen",
                    18_500,
                    35_000,
                    "Delivering clean water and sanitation facilities",
                ),
            ],
            recent_stories: vec![
                story(
                    "1,000 Families Receive Emergency Food Aid",
                    "Critical food packages delivered to families affected by conflict",
                    (2025, 10, 18),
                    "Aleppo, Syria",
                ),
                story(
                    "Mobile Medical Clinic Reaches Remote Villages",
                    "Healthcare services provided to 500+ people in underserved areas",
                    (2025, 10, 12),
                    "Rural Yemen",
                ),
            ],
        },
        CharityImpact {
            religion_id: "judaism".into(),
            charity_name: "JDC (Joint Distribution Committee)".into(),
            total_donations: 76_890,
            properties_sold: 219,
            impact_metrics: vec![
                metric("Elderly Assisted", 892, "seniors", "👴"),
                metric("Refugee Families Supported", 456, "families", "🏠"),
                metric("Community Centers", 8, "centers", "🏢"),
                metric("Youth Programs", 34, "programs", "🎓"),
            ],
            projects: vec![
                project(
                    "Ukraine Relief Effort",
                    "Ukraine",
                    45_000,
                    75_000,
                    "Supporting Jewish communities affected by conflict",
                ),
                project(
                    "Elderly Care Program - Buenos Aires",
                    "Argentina",
                    12_400,
                    20_000,
                    "Home care and meals for elderly community members",
                ),
            ],
            recent_stories: vec![
                story(
                    "Community Center Opens in Kyiv",
                    "New facility provides resources and support for local Jewish community",
                    (2025, 10, 14),
                    "Kyiv, Ukraine",
                ),
                story(
                    "Passover Food Packages Distributed",
                    "800 families received traditional holiday meals",
                    (2025, 9, 28),
                    "Buenos Aires, Argentina",
                ),
            ],
        },
        CharityImpact {
            religion_id: "hinduism".into(),
            charity_name: "Akshaya Patra Foundation".into(),
            total_donations: 112_340,
            properties_sold: 298,
            impact_metrics: vec![
                metric("Daily Meals Served", 45_890, "meals", "🍛"),
                metric("School Children Fed", 12_400, "children", "🎒"),
                metric("Kitchen Centers", 18, "kitchens", "🏭"),
                metric("States Covered", 14, "states", "🗺️"),
            ],
            projects: vec![
                project(
                    "Mid-Day Meal Program Expansion",
                    "Karnataka, India",
                    78_000,
                    100_000,
                    "Expanding kitchen capacity to feed 5,000 more children daily",
                ),
                project(
                    "Nutrition Enhancement Project",
                    "Uttar Pradesh, India",
                    25_600,
                    45_000,
                    "Improving meal nutritional value and variety",
                ),
            ],
            recent_stories: vec![
                story(
                    "10 Millionth Meal Served in Bangalore",
                    "Major milestone reached in fight against childhood hunger",
                    (2025, 10, 16),
                    "Bangalore, India",
                ),
                story(
                    "New Kitchen Opens to Serve 3,000 Daily",
                    "State-of-the-art facility begins operations",
                    (2025, 10, 8),
                    "Lucknow, India",
                ),
            ],
        },
        CharityImpact {
            religion_id: "buddhism".into(),
            charity_name: "Buddhist Global Relief".into(),
            total_donations: 68_920,
            properties_sold: 203,
            impact_metrics: vec![
                metric("People Fed Annually", 34_500, "people", "🍚"),
                metric("Sustainable Farms", 89, "farms", "🌾"),
                metric("Women Empowered", 1240, "women", "👩"),
                metric("Countries Served", 18, "countries", "🌏"),
            ],
            projects: vec![
                project(
                    "Sri Lanka Sustainable Agriculture",
                    "Sri Lanka",
                    32_000,
                    50_000,
                    "Training farmers in sustainable practices and providing resources",
                ),
                project(
                    "Hunger Relief - Cambodia",
                    "Cambodia",
                    18_900,
                    30_000,
                    "Food distribution and nutrition education programs",
                ),
            ],
            recent_stories: vec![
                story(
                    "50 Women Complete Agricultural Training",
                    "Graduates receive tools and seeds to start sustainable farms",
                    (2025, 10, 11),
                    "Colombo, Sri Lanka",
                ),
                story(
                    "Community Garden Feeds 200 Families",
                    "Collective farming project produces abundant harvest",
                    (2025, 10, 5),
                    "Phnom Penh, Cambodia",
                ),
            ],
        },
        CharityImpact {
            religion_id: "sikhism".into(),
            charity_name: "Khalsa Aid".into(),
            total_donations: 84_560,
            properties_sold: 234,
            impact_metrics: vec![
                metric("Disaster Relief Operations", 47, "operations", "🚨"),
                metric("People Assisted", 156_000, "people", "🤝"),
                metric("Emergency Shelters", 234, "shelters", "⛺"),
                metric("Countries Responded", 23, "countries", "🌍"),
            ],
            projects: vec![
                project(
                    "Turkey Earthquake Relief",
                    "Turkey",
                    56_000,
                    80_000,
                    "Emergency aid and reconstruction support",
                ),
                project(
                    "Pakistan Flood Recovery",
                    "Pakistan",
                    23_400,
                    40_000,
                    "Rebuilding homes and providing essential supplies",
                ),
            ],
            recent_stories: vec![
                story(
                    "Emergency Response Team Deployed to Disaster Zone",
                    "Khalsa Aid volunteers provide immediate relief to affected families",
                    (2025, 10, 17),
                    "Ankara, Turkey",
                ),
                story(
                    "100 Homes Rebuilt for Flood Victims",
                    "Families return to new, safe housing",
                    (2025, 10, 9),
                    "Punjab, Pakistan",
                ),
            ],
        },
    ]
}

pub fn charity_impact(religion_id: &str) -> Option<CharityImpact> {
    charity_impact_table()
        .into_iter()
        .find(|c| c.religion_id == religion_id)
}

pub fn global_impact() -> GlobalImpact {
    let table = charity_impact_table();
    GlobalImpact {
        total_donations: table.iter().map(|c| c.total_donations).sum(),
        total_properties: table.iter().map(|c| c.properties_sold).sum(),
        charities_supported: table.len(),
        countries_reached: COUNTRIES_REACHED,
    }
}

/// Donations in the week before the current one, used for trend growth.
pub fn previous_week_donations(religion_id: &str) -> u64 {
    match religion_id {
        "christianity" => 12_000,
        "islam" => 9_500,
        "judaism" => 7_200,
        "hinduism" => 10_800,
        "buddhism" => 6_500,
        "sikhism" => 8_000,
        _ => 0,
    }
}

/// Mock parcel ownership per district, in district layout order.
pub fn district_ownership() -> Vec<DistrictOwnership> {
    let rows: [(&str, [u32; 6]); 8] = [
        ("Golden Gates District", [45, 32, 28, 35, 25, 30]),
        ("Crystal River Valley", [38, 42, 25, 40, 30, 35]),
        ("Celestial Gardens", [35, 30, 22, 48, 35, 28]),
        ("Cloud Nine Heights", [50, 35, 30, 38, 28, 32]),
        ("Pearly Plaza", [42, 38, 35, 36, 30, 40]),
        ("Seraphim Shores", [40, 45, 28, 35, 32, 38]),
        ("Divine Heights", [48, 35, 32, 38, 28, 35]),
        ("Eternal Meadows", [36, 32, 25, 42, 38, 30]),
    ];
    rows.iter()
        .map(|(name, counts)| DistrictOwnership {
            district_name: (*name).to_string(),
            counts: RELIGION_IDS
                .iter()
                .zip(counts.iter())
                .map(|(id, &parcels)| ReligionCount {
                    religion_id: (*id).to_string(),
                    parcels,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_cover_every_religion() {
        let ids: Vec<String> = religions().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, RELIGION_IDS);
        let charity_ids: Vec<String> = charity_impact_table()
            .into_iter()
            .map(|c| c.religion_id)
            .collect();
        assert_eq!(charity_ids, RELIGION_IDS);
        for row in district_ownership() {
            assert_eq!(row.counts.len(), RELIGION_IDS.len());
        }
    }

    #[test]
    fn charity_names_agree() {
        for r in religions() {
            let impact = charity_impact(&r.id).unwrap();
            assert_eq!(impact.charity_name, r.charity_name);
        }
    }

    #[test]
    fn global_totals() {
        let g = global_impact();
        assert_eq!(g.total_donations, 566_390);
        assert_eq!(g.total_properties, 1583);
        assert_eq!(g.charities_supported, 6);
        assert_eq!(g.countries_reached, 45);
    }

    #[test]
    fn lookups_return_none_when_missing() {
        assert!(find_religion("zoroastrianism").is_none());
        assert!(charity_impact("zoroastrianism").is_none());
        assert_eq!(previous_week_donations("zoroastrianism"), 0);
        assert_eq!(find_religion("islam").unwrap().charity_name, "Islamic Relief");
    }

    #[test]
    fn project_progress() {
        let p = project("p", "x", 87_500, 120_000, "d");
        assert_eq!(p.progress_percent(), 73);
        let over = project("p", "x", 150, 100, "d");
        assert_eq!(over.progress_percent(), 150);
        assert_eq!(over.progress_bar_fraction(), 1.0);
        let empty = project("p", "x", 10, 0, "d");
        assert_eq!(empty.progress_percent(), 0);
    }

    #[test]
    fn story_dates_parse() {
        let first = &charity_impact_table()[0].recent_stories[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());
    }
}
