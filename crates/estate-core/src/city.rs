//! The built-in heavenly city: eight districts, eight landmarks, two street pools.

use crate::{CityLayout, District, Landmark, Point, StreetNames};

const DISTRICTS: [(&str, &str, &str, u32, u32, bool); 8] = [
    ("golden-gates", "Golden Gates District", "#fbbf24", 0, 0, true),
    ("crystal-river", "Crystal River Valley", "#60a5fa", 800, 0, false),
    ("celestial-gardens", "Celestial Gardens", "#34d399", 1600, 0, false),
    ("cloud-nine", "Cloud Nine Heights", "#f0abfc", 0, 800, true),
    ("pearly-plaza", "Pearly Plaza", "#f87171", 800, 800, true),
    ("seraphim-shores", "Seraphim Shores", "#818cf8", 1600, 800, false),
    ("divine-heights", "Divine Heights", "#fcd34d", 0, 1600, true),
    ("eternal-meadows", "Eternal Meadows", "#86efac", 800, 1600, false),
];

const LANDMARKS: [(&str, &str, u32, u32, &str, u32); 8] = [
    ("golden-gates", "Golden Gates Plaza", 350, 350, "🌟", 150),
    ("crystal-fountain", "Crystal Fountain Park", 1150, 300, "⛲", 120),
    ("celestial-park", "Celestial Gardens Park", 1900, 400, "🌺", 140),
    ("cloud-pavilion", "Cloud Pavilion", 300, 1150, "☁️", 100),
    ("pearly-square", "Pearly Square", 1000, 1100, "💎", 130),
    ("seraphim-beach", "Seraphim Beach", 1850, 1200, "🌊", 180),
    ("divine-temple", "Divine Temple", 400, 1900, "⛪", 110),
    ("eternal-lake", "Eternal Lake", 1200, 1850, "🏞️", 200),
];

const NORTH_SOUTH: [&str; 6] = [
    "Golden Avenue",
    "Angel Boulevard",
    "Seraphim Street",
    "Divine Drive",
    "Celestial Way",
    "Eternal Path",
];

const EAST_WEST: [&str; 6] = [
    "Paradise Lane",
    "Heaven Road",
    "Cloud Street",
    "Pearly Boulevard",
    "Grace Avenue",
    "Blessed Way",
];

/// The default layout the generator runs against.
pub fn heavenly_city() -> CityLayout {
    CityLayout {
        districts: DISTRICTS
            .iter()
            .map(|&(id, name, color, x, y, premium)| District {
                id: id.to_string(),
                name: name.to_string(),
                color: color.to_string(),
                origin: Point::new(x, y),
                premium,
            })
            .collect(),
        landmarks: LANDMARKS
            .iter()
            .map(|&(id, name, x, y, icon, size)| Landmark {
                id: id.to_string(),
                name: name.to_string(),
                position: Point::new(x, y),
                icon: icon.to_string(),
                size,
            })
            .collect(),
        streets: StreetNames {
            north_south: NORTH_SOUTH.iter().map(|s| s.to_string()).collect(),
            east_west: EAST_WEST.iter().map(|s| s.to_string()).collect(),
        },
    }
}
