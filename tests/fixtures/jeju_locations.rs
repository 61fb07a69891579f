//! Real Jeju island locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Grouped by the categories
//! the quota engine cares about.

/// A named place with coordinates.
#[derive(Debug, Clone)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Attractions
// ============================================================================

pub const ATTRACTIONS: &[Place] = &[
    Place::new("Hallasan National Park", 33.3617, 126.5292),
    Place::new("Seongsan Ilchulbong", 33.4580, 126.9425),
    Place::new("Manjanggul Cave", 33.5284, 126.7711),
    Place::new("Hamdeok Beach", 33.5434, 126.6694),
    Place::new("Hyeopjae Beach", 33.3940, 126.2396),
    Place::new("Cheonjiyeon Falls", 33.2452, 126.5544),
    Place::new("Jeongbang Falls", 33.2447, 126.5724),
    Place::new("Jusangjeolli Cliff", 33.2376, 126.4253),
    Place::new("Udo Island", 33.5060, 126.9530),
    Place::new("Camellia Hill", 33.2897, 126.3688),
    Place::new("O'sulloc Tea Museum", 33.3058, 126.2895),
    Place::new("Yongduam Rock", 33.5160, 126.5119),
];

// ============================================================================
// Restaurants
// ============================================================================

pub const RESTAURANTS: &[Place] = &[
    Place::new("Donsadon", 33.4890, 126.4973),
    Place::new("Sukseongdo", 33.5004, 126.5312),
    Place::new("Myeongjin Jeonbok", 33.5565, 126.7597),
    Place::new("Haejin Seafood", 33.5169, 126.5251),
    Place::new("Olle Guksu", 33.4994, 126.5318),
    Place::new("Samdaeguksu", 33.4888, 126.4990),
    Place::new("Chunsimine", 33.2483, 126.4110),
    Place::new("Gogijib", 33.2542, 126.5605),
];

// ============================================================================
// Cafes
// ============================================================================

pub const CAFES: &[Place] = &[
    Place::new("Cafe Delmoond", 33.5560, 126.7963),
    Place::new("Bomnal Cafe", 33.5548, 126.6339),
    Place::new("Monsant Cafe", 33.5564, 126.7960),
    Place::new("Cafe Aewol", 33.4631, 126.3103),
    Place::new("Innisfree Jeju House", 33.3070, 126.2890),
    Place::new("Cafe Mani", 33.2446, 126.4073),
    Place::new("Wind Stone Cafe", 33.4336, 126.9266),
];

// ============================================================================
// Lodging
// ============================================================================

pub const LODGINGS: &[Place] = &[
    Place::new("Lotte Hotel Jeju", 33.2478, 126.4112),
    Place::new("Shilla Stay Jeju", 33.4870, 126.4915),
    Place::new("Playce Camp Jeju", 33.4505, 126.9180),
];
