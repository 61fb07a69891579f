//! Test fixtures for itinerary-planner.
//!
//! Provides realistic test data including:
//! - Real Jeju locations (from OpenStreetMap)
//! - Builders for locations, selections and backend replies
//! - Mock network / backend collaborators

#![allow(dead_code)]

pub mod jeju_locations;

pub use jeju_locations::*;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use itinerary_planner::error::BackendError;
use itinerary_planner::model::{Category, Location, LocationId, RecommendationPools, SelectionEntry};
use itinerary_planner::payload::Payload;
use itinerary_planner::schedule::{BackendReply, RawDaySummary, RawScheduleStop};
use itinerary_planner::traits::{NetworkLookup, Point, SchedulingBackend};

// ============================================================================
// Builders
// ============================================================================

pub fn location(id: &str, name: &str, category: Category, lat: f64, lng: f64) -> Location {
    Location {
        id: LocationId::new(id),
        name: name.to_string(),
        category,
        lat,
        lng,
        address: format!("{name}, Jeju-do"),
        rating: 4.3,
        review_count: 250,
        link: None,
    }
}

pub fn selected(id: &str, name: &str, category: Category) -> SelectionEntry {
    SelectionEntry::selected(location(id, name, category, 33.5, 126.5))
}

pub fn raw_stop(time_block: &str, name: &str, place_type: &str, id: Option<&str>) -> RawScheduleStop {
    RawScheduleStop {
        time_block: time_block.to_string(),
        place_name: name.to_string(),
        place_type: place_type.to_string(),
        id: id.map(str::to_string),
    }
}

/// Pools built from the Jeju fixture data, `count` entries per category.
pub fn pools_with(count: usize) -> RecommendationPools {
    let take = |places: &[Place], category: Category, prefix: &str| {
        places
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, p)| location(&format!("{prefix}{i}"), p.name, category, p.lat, p.lng))
            .collect::<Vec<_>>()
    };
    RecommendationPools::from([
        (Category::Attraction, take(ATTRACTIONS, Category::Attraction, "at")),
        (Category::Restaurant, take(RESTAURANTS, Category::Restaurant, "rs")),
        (Category::Cafe, take(CAFES, Category::Cafe, "cf")),
        (Category::Lodging, take(LODGINGS, Category::Lodging, "lg")),
    ])
}

// ============================================================================
// Mock collaborators
// ============================================================================

/// Network lookup over fixed node/link maps that counts every query.
#[derive(Debug, Default)]
pub struct CountingNetwork {
    pub nodes: HashMap<String, Point>,
    pub links: HashMap<String, Vec<Point>>,
    pub loaded: bool,
    pub calls: AtomicUsize,
}

impl CountingNetwork {
    pub fn loaded() -> Self {
        Self { loaded: true, ..Self::default() }
    }

    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, id: &str, point: Point) -> Self {
        self.nodes.insert(id.to_string(), point);
        self
    }

    pub fn with_link(mut self, id: &str, points: Vec<Point>) -> Self {
        self.links.insert(id.to_string(), points);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl NetworkLookup for CountingNetwork {
    fn node_by_id(&self, id: &str) -> Option<Point> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.nodes.get(id).copied()
    }

    fn link_by_id(&self, id: &str) -> Option<Vec<Point>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.links.get(id).cloned()
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }
}

/// Backend that returns a canned reply and remembers how often it ran.
#[derive(Debug)]
pub struct StaticBackend {
    pub reply: BackendReply,
    pub calls: AtomicUsize,
}

impl StaticBackend {
    pub fn new(reply: BackendReply) -> Self {
        Self { reply, calls: AtomicUsize::new(0) }
    }
}

impl SchedulingBackend for StaticBackend {
    fn schedule(&self, _payload: &Payload) -> Result<BackendReply, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// A simple two-day backend reply over named Jeju stops.
pub fn two_day_reply() -> BackendReply {
    BackendReply::plan(
        vec![
            raw_stop("Tue_0900", "Jeju International Airport", "transit", None),
            raw_stop("Tue_1030", "Hallasan National Park", "attraction", Some("at0")),
            raw_stop("Tue_1230", "Donsadon", "restaurant", Some("rs0")),
            raw_stop("Wed_1000", "Hamdeok Beach", "attraction", Some("at3")),
            raw_stop("Wed_1200", "Myeongjin Jeonbok", "restaurant", Some("rs2")),
        ],
        vec![
            RawDaySummary::new("Tue", 15300.0, &["at0", "LK1", "rs0"]),
            RawDaySummary::new("Wed", 9800.0, &["at3", "LK2", "rs2"]),
        ],
    )
}
