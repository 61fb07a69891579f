//! Backend schedule reply parsing.
//!
//! The backend returns one flat, timestamped stop list plus per-day
//! route summaries. This module classifies the reply shape once at the
//! boundary, then reshapes it into day-partitioned itinerary days with
//! fully resolved stop details and arrival/departure timing.

use std::collections::HashMap;

use chrono::{Days, Duration, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::model::{
    Category, ItineraryDay, ItineraryStop, Location, LocationId, RouteReference, SelectionEntry,
};
use crate::traits::LocationCatalog;

/// Default stay duration at every stop, in minutes. The backend carries
/// no per-category duration data; a richer source would replace this
/// constant wholesale.
pub const DEFAULT_STAY_MINUTES: u32 = 60;

// ============================================================================
// Wire types
// ============================================================================

/// A node or link identifier in an interleaved route. The backend emits
/// these inconsistently as strings or bare numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum IdToken {
    Text(String),
    Number(i64),
}

impl IdToken {
    fn into_string(self) -> String {
        match self {
            IdToken::Text(s) => s,
            IdToken::Number(n) => n.to_string(),
        }
    }
}

/// One timestamped stop in the backend's flat schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScheduleStop {
    /// Day-and-time token, e.g. "Tue_1030".
    pub time_block: String,
    pub place_name: String,
    pub place_type: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// Per-day route summary from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDaySummary {
    /// Weekday label, e.g. "Tue".
    pub day: String,
    pub total_distance_m: f64,
    #[serde(default)]
    interleaved_route: Vec<IdToken>,
}

impl RawDaySummary {
    pub fn new(day: &str, total_distance_m: f64, interleaved: &[&str]) -> Self {
        Self {
            day: day.to_string(),
            total_distance_m,
            interleaved_route: interleaved
                .iter()
                .map(|s| IdToken::Text(s.to_string()))
                .collect(),
        }
    }

    fn interleaved(&self) -> Vec<String> {
        self.interleaved_route
            .iter()
            .cloned()
            .map(IdToken::into_string)
            .collect()
    }
}

/// Raw backend reply, deserialized as-is. Field presence is checked
/// exactly once, in [`BackendReply::classify`]; nothing downstream
/// re-checks the shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendReply {
    #[serde(default)]
    pub schedule: Option<Vec<RawScheduleStop>>,
    #[serde(default)]
    pub route_summary: Option<Vec<RawDaySummary>>,
}

/// A well-formed scheduling reply: both halves present.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPlan {
    pub schedule: Vec<RawScheduleStop>,
    pub route_summary: Vec<RawDaySummary>,
}

impl BackendReply {
    pub fn plan(schedule: Vec<RawScheduleStop>, route_summary: Vec<RawDaySummary>) -> Self {
        Self {
            schedule: Some(schedule),
            route_summary: Some(route_summary),
        }
    }

    /// Converts the raw reply into the plan sum, rejecting malformed
    /// shapes. Callers receiving the error are expected to fall back to
    /// a locally built itinerary.
    pub fn classify(self) -> Result<ScheduledPlan, PlannerError> {
        match (self.schedule, self.route_summary) {
            (Some(schedule), Some(route_summary)) => Ok(ScheduledPlan { schedule, route_summary }),
            (None, _) => Err(PlannerError::ServerResponse("missing schedule".to_string())),
            (_, None) => Err(PlannerError::ServerResponse(
                "missing route summary".to_string(),
            )),
        }
    }
}

// ============================================================================
// Parser configuration
// ============================================================================

/// Fixed-infrastructure locations whose backend records are replaced by
/// canonical ones whenever they open or close a day, plus the default
/// stay duration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub fixed_stops: Vec<Location>,
    pub stay_minutes: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fixed_stops: vec![Location {
                id: LocationId::new("CJU-AIRPORT"),
                name: "Jeju International Airport".to_string(),
                category: Category::TransitNode,
                lat: 33.5104,
                lng: 126.4914,
                address: "2 Gonghang-ro, Jeju-si, Jeju-do".to_string(),
                rating: 4.2,
                review_count: 12840,
                link: Some("tel:+82-1661-2626".to_string()),
            }],
            stay_minutes: DEFAULT_STAY_MINUTES,
        }
    }
}

impl ParserConfig {
    fn fixed_stop_matching(&self, name: &str) -> Option<&Location> {
        let needle = normalize(name);
        self.fixed_stops.iter().find(|loc| {
            let canonical = normalize(&loc.name);
            canonical == needle || canonical.contains(&needle) || needle.contains(&canonical)
        })
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

// ============================================================================
// Parsing
// ============================================================================

/// A schedule stop with its time token already decoded.
#[derive(Debug, Clone)]
struct DecodedStop {
    weekday: Weekday,
    arrival: NaiveTime,
    name: String,
    category: Category,
    id: Option<LocationId>,
}

/// Parses a backend reply into day-partitioned itinerary days.
///
/// The whole reply parses atomically: a malformed shape fails the call,
/// while an unresolvable individual stop degrades to a flagged fallback
/// stop and never aborts the parse. Day numbers follow canonical
/// weekday order (Mon..Sun), not first appearance in the raw array.
pub fn parse<C: LocationCatalog>(
    reply: BackendReply,
    trip_start: NaiveDate,
    selection: &[SelectionEntry],
    catalog: &C,
    config: &ParserConfig,
) -> Result<Vec<ItineraryDay>, PlannerError> {
    let plan = reply.classify()?;

    let mut by_weekday: HashMap<Weekday, Vec<DecodedStop>> = HashMap::new();
    for raw in &plan.schedule {
        match decode_stop(raw) {
            Some(stop) => by_weekday.entry(stop.weekday).or_default().push(stop),
            None => {
                tracing::warn!(time_block = %raw.time_block, place = %raw.place_name,
                    "unreadable schedule stop skipped");
            }
        }
    }

    let mut weekdays: Vec<Weekday> = by_weekday.keys().copied().collect();
    weekdays.sort_by_key(|wd| wd.num_days_from_monday());

    let summaries: HashMap<Weekday, &RawDaySummary> = plan
        .route_summary
        .iter()
        .filter_map(|summary| summary.day.parse::<Weekday>().ok().map(|wd| (wd, summary)))
        .collect();

    let mut days = Vec::with_capacity(weekdays.len());
    for (index, weekday) in weekdays.iter().enumerate() {
        let day_number = index as u32 + 1;
        let date = trip_start
            .checked_add_days(Days::new(index as u64))
            .unwrap_or(trip_start);

        let mut day_stops = by_weekday.remove(weekday).unwrap_or_default();
        day_stops.sort_by_key(|stop| stop.arrival);

        let (route, total_distance_km) = match summaries.get(weekday) {
            Some(summary) => (
                RouteReference::from_interleaved(summary.interleaved()),
                summary.total_distance_m / 1000.0,
            ),
            None => {
                tracing::warn!(weekday = %weekday, "no route summary for day, keeping schedule order");
                (RouteReference::default(), 0.0)
            }
        };

        let ordered = order_by_route(&route, day_stops, *weekday);
        let stop_count = ordered.len();
        let mut stops = Vec::with_capacity(stop_count);
        for (position, decoded) in ordered.into_iter().enumerate() {
            let is_edge = position == 0 || position + 1 == stop_count;
            stops.push(resolve_stop(decoded, is_edge, selection, catalog, config));
        }
        fill_travel_times(&mut stops);

        days.push(ItineraryDay {
            day: day_number,
            weekday: *weekday,
            date,
            stops,
            total_distance_km,
            route,
        });
    }

    days.sort_by_key(|day| day.day);
    Ok(days)
}

fn decode_stop(raw: &RawScheduleStop) -> Option<DecodedStop> {
    let (day_part, time_part) = raw.time_block.split_once('_')?;
    let weekday = day_part.parse::<Weekday>().ok()?;
    let arrival = NaiveTime::parse_from_str(time_part, "%H%M").ok()?;
    Some(DecodedStop {
        weekday,
        arrival,
        name: raw.place_name.clone(),
        category: Category::from_label(&raw.place_type),
        id: raw.id.clone().map(LocationId::new),
    })
}

/// Reorders a day's stops to follow the route-summary node order,
/// matching by id first, then by name. Nodes with no matching stop
/// become placeholders; stops the route never mentions keep their
/// schedule order at the end.
fn order_by_route(
    route: &RouteReference,
    mut stops: Vec<DecodedStop>,
    weekday: Weekday,
) -> Vec<DecodedStop> {
    if route.node_ids.is_empty() {
        return stops;
    }

    let mut ordered = Vec::with_capacity(route.node_ids.len());
    let mut last_arrival = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
    for node_id in &route.node_ids {
        let found = stops
            .iter()
            .position(|s| s.id.as_ref().is_some_and(|id| id.as_str() == node_id))
            .or_else(|| stops.iter().position(|s| s.name == *node_id));
        match found {
            Some(i) => {
                let stop = stops.remove(i);
                last_arrival = stop.arrival;
                ordered.push(stop);
            }
            None => {
                tracing::warn!(node = %node_id, "route node has no schedule stop, synthesizing");
                ordered.push(DecodedStop {
                    weekday,
                    arrival: last_arrival,
                    name: node_id.clone(),
                    category: Category::Attraction,
                    id: None,
                });
            }
        }
    }

    if !stops.is_empty() {
        tracing::debug!(extra = stops.len(), "schedule stops absent from route summary kept at tail");
        ordered.append(&mut stops);
    }
    ordered
}

fn resolve_stop<C: LocationCatalog>(
    decoded: DecodedStop,
    is_edge: bool,
    selection: &[SelectionEntry],
    catalog: &C,
    config: &ParserConfig,
) -> ItineraryStop {
    // Fixed infrastructure (airport etc.) at the start or end of a day
    // gets the canonical record; backend fields for these are often
    // incomplete.
    if is_edge {
        if let Some(fixed) = config.fixed_stop_matching(&decoded.name) {
            return stop_from_location(fixed.clone(), &decoded, config.stay_minutes, false);
        }
    }

    let resolved = selection
        .iter()
        .find(|e| decoded.id.as_ref() == Some(&e.location.id))
        .or_else(|| selection.iter().find(|e| e.location.name == decoded.name))
        .map(|e| e.location.clone())
        .or_else(|| decoded.id.as_ref().and_then(|id| catalog.get_by_id(id)))
        .or_else(|| catalog.get_by_name(&decoded.name));

    match resolved {
        Some(location) => stop_from_location(location, &decoded, config.stay_minutes, false),
        None => {
            tracing::warn!(place = %decoded.name, "place resolution miss, using fallback stop");
            let placeholder = Location {
                id: decoded
                    .id
                    .clone()
                    .unwrap_or_else(|| LocationId::new(format!("unresolved:{}", decoded.name))),
                name: decoded.name.clone(),
                category: decoded.category,
                lat: f64::NAN,
                lng: f64::NAN,
                address: String::new(),
                rating: 0.0,
                review_count: 0,
                link: None,
            };
            stop_from_location(placeholder, &decoded, config.stay_minutes, true)
        }
    }
}

fn stop_from_location(
    location: Location,
    decoded: &DecodedStop,
    stay_minutes: u32,
    is_fallback: bool,
) -> ItineraryStop {
    let departure = decoded.arrival + Duration::minutes(stay_minutes as i64);
    ItineraryStop {
        id: location.id,
        name: location.name,
        category: location.category,
        lat: location.lat,
        lng: location.lng,
        address: location.address,
        rating: location.rating,
        review_count: location.review_count,
        link: location.link,
        arrival: decoded.arrival,
        departure,
        stay_minutes,
        travel_to_next: None,
        is_fallback,
    }
}

/// Derives per-leg travel time strings from the gap between one stop's
/// departure and the next one's arrival.
fn fill_travel_times(stops: &mut [ItineraryStop]) {
    for i in 0..stops.len() {
        let gap = stops
            .get(i + 1)
            .map(|next| (next.arrival - stops[i].departure).num_minutes().max(0));
        stops[i].travel_to_next = gap.map(|minutes| format!("{minutes} min"));
    }
}
