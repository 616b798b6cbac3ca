//! Real Oslo area locations for realistic test fixtures.

use weather_router::forecast::Coordinates;

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lng, self.lat)
    }
}

// ============================================================================
// City Centre
// ============================================================================

pub const CITY_CENTRE: &[Location] = &[
    Location::new("Oslo S", 59.9111, 10.7528),
    Location::new("Operahuset", 59.9075, 10.7531),
    Location::new("Akershus festning", 59.9070, 10.7365),
    Location::new("Rådhuset", 59.9122, 10.7336),
    Location::new("Slottet", 59.9169, 10.7275),
];

// ============================================================================
// Outskirts / Nordmarka
// ============================================================================

pub const OUTSKIRTS: &[Location] = &[
    Location::new("Vigelandsparken", 59.9270, 10.7003),
    Location::new("Bygdøy Norsk Folkemuseum", 59.9075, 10.6849),
    Location::new("Holmenkollbakken", 59.9636, 10.6673),
    Location::new("Frognerseteren", 59.9775, 10.6800),
    Location::new("Sognsvann", 59.9750, 10.7300),
];

pub fn all_locations() -> Vec<Location> {
    let mut all = Vec::with_capacity(CITY_CENTRE.len() + OUTSKIRTS.len());
    all.extend_from_slice(CITY_CENTRE);
    all.extend_from_slice(OUTSKIRTS);
    all
}

pub fn sample_locations(count: usize) -> Vec<Location> {
    all_locations().into_iter().take(count).collect()
}
