//! Core domain types for the itinerary planner.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Opaque location identifier, as issued by the location catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed category set used for quota minimums and backend labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Lodging,
    Attraction,
    Restaurant,
    Cafe,
    TransitNode,
}

impl Category {
    /// All categories in quota processing order.
    pub const ALL: [Category; 5] = [
        Category::Lodging,
        Category::Attraction,
        Category::Restaurant,
        Category::Cafe,
        Category::TransitNode,
    ];

    /// Maps a backend category label to a category.
    ///
    /// Backend labels are not fully controlled by us; unknown labels fall
    /// back to `Attraction` with a warning rather than failing the parse.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "lodging" | "accommodation" | "hotel" => Category::Lodging,
            "attraction" | "sight" | "tour" => Category::Attraction,
            "restaurant" | "food" => Category::Restaurant,
            "cafe" | "coffee" => Category::Cafe,
            "transit-node" | "transit" | "airport" | "terminal" => Category::TransitNode,
            other => {
                tracing::warn!(label = other, "unknown category label, treating as attraction");
                Category::Attraction
            }
        }
    }
}

/// A location record, owned by the catalog and immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub rating: f32,
    pub review_count: u32,
    pub link: Option<String>,
}

impl Location {
    /// True when both coordinates are finite (fallback stops carry NaN).
    pub fn has_valid_coords(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// A location picked for the trip, either by the user or by quota fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub location: Location,
    /// False for user-chosen entries, true for quota-engine candidates.
    pub is_candidate: bool,
}

impl SelectionEntry {
    pub fn selected(location: Location) -> Self {
        Self { location, is_candidate: false }
    }

    pub fn candidate(location: Location) -> Self {
        Self { location, is_candidate: true }
    }
}

/// Requested trip time window. Instants are optional so that an
/// incomplete user selection is representable and rejected at payload
/// build time rather than earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start: Some(start), end: Some(end) }
    }
}

/// Node/link identifiers backing one day's route, as reported by the
/// backend's interleaved route array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteReference {
    pub node_ids: Vec<String>,
    pub link_ids: Vec<String>,
    /// Original alternating node/link array, kept verbatim.
    pub interleaved: Vec<String>,
}

impl RouteReference {
    /// Splits an interleaved route array (node, link, node, ..., node)
    /// into node ids (even positions) and link ids (odd positions).
    pub fn from_interleaved(interleaved: Vec<String>) -> Self {
        let mut node_ids = Vec::with_capacity(interleaved.len() / 2 + 1);
        let mut link_ids = Vec::with_capacity(interleaved.len() / 2);
        for (i, id) in interleaved.iter().enumerate() {
            if i % 2 == 0 {
                node_ids.push(id.clone());
            } else {
                link_ids.push(id.clone());
            }
        }

        if !interleaved.is_empty() && node_ids.len() != link_ids.len() + 1 {
            tracing::warn!(
                nodes = node_ids.len(),
                links = link_ids.len(),
                "interleaved route does not end on a node"
            );
        }

        Self { node_ids, link_ids, interleaved }
    }

    pub fn is_empty(&self) -> bool {
        self.interleaved.is_empty()
    }

    /// Re-zips node and link ids back into the alternating form.
    pub fn rezip(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.node_ids.len() + self.link_ids.len());
        for (i, node) in self.node_ids.iter().enumerate() {
            out.push(node.clone());
            if let Some(link) = self.link_ids.get(i) {
                out.push(link.clone());
            }
        }
        out
    }
}

/// One fully resolved stop on an itinerary day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryStop {
    pub id: LocationId,
    pub name: String,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub rating: f32,
    pub review_count: u32,
    pub link: Option<String>,
    pub arrival: NaiveTime,
    pub departure: NaiveTime,
    pub stay_minutes: u32,
    /// Formatted travel time to the next stop ("25 min"); None on the
    /// last stop of the day.
    pub travel_to_next: Option<String>,
    /// True when the stop is a synthesized placeholder because no
    /// location detail could be resolved.
    pub is_fallback: bool,
}

impl ItineraryStop {
    pub fn has_valid_coords(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// One day of the generated itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// 1-based, contiguous across the trip.
    pub day: u32,
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub stops: Vec<ItineraryStop>,
    pub total_distance_km: f64,
    pub route: RouteReference,
}

/// A generated itinerary, tagged with the generation epoch it belongs
/// to so late-arriving work for a cancelled generation can be discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub days: Vec<ItineraryDay>,
    pub epoch: u64,
}

/// Per-category recommendation pools, pre-ranked by recommendation
/// score (best first).
pub type RecommendationPools = HashMap<Category, Vec<Location>>;
