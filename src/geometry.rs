//! Route geometry resolution with a layered fallback chain.
//!
//! For each itinerary day: cached polylines win outright; otherwise the
//! day's link ids are walked through the network lookup, with a
//! two-point node bridge where a link is missing; and when no link data
//! is usable at all, consecutive stops are joined by straight lines.
//! Every successful resolution lands in the per-day cache so repeated
//! renders cost nothing.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::ItineraryDay;
use crate::polyline::Polyline;
use crate::traits::{NetworkLookup, Point};

/// Rendering-chunking threshold: an output segment is cut once it grows
/// past this many points.
pub const MAX_SEGMENT_POINTS: usize = 500;

/// Per-day polyline cache for one itinerary generation.
///
/// Reset wholesale before each new generation; entries are never
/// merged across generations. Every read and write carries the
/// generation epoch it was computed for, and the cache rejects both
/// under the mutex when the epoch has moved on, so a resolution that
/// completes late for a cancelled generation cannot poison the fresh
/// one. Distinct days resolve independently; writes to the same day
/// serialize through the mutex, and re-entry for an already-resolved
/// day returns the stored polylines instead of recomputing
/// (last-writer-wins is fine within one epoch).
#[derive(Debug, Default)]
pub struct DayGeometryCache {
    inner: Mutex<CacheState>,
}

#[derive(Debug, Default)]
struct CacheState {
    epoch: u64,
    days: HashMap<u32, Vec<Polyline>>,
}

impl DayGeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: u32, epoch: u64) -> Option<Vec<Polyline>> {
        let state = self.inner.lock().ok()?;
        if state.epoch != epoch {
            return None;
        }
        state.days.get(&day).cloned()
    }

    /// Stores a day's polylines, unless the cache has moved to another
    /// generation epoch since the resolution started.
    pub fn store(&self, day: u32, epoch: u64, polylines: Vec<Polyline>) {
        if let Ok(mut state) = self.inner.lock() {
            if state.epoch != epoch {
                tracing::debug!(day, epoch, current = state.epoch, "stale geometry discarded");
                return;
            }
            state.days.insert(day, polylines);
        }
    }

    /// Drops every entry and re-keys the cache to the given epoch.
    pub fn reset(&self, epoch: u64) {
        if let Ok(mut state) = self.inner.lock() {
            state.epoch = epoch;
            state.days.clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .map(|state| state.days.is_empty())
            .unwrap_or(true)
    }
}

/// Drawable output for one day: the polylines plus the coordinate set
/// the drawing surface should frame its viewport around.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGeometry {
    pub polylines: Vec<Polyline>,
    pub bounds: Vec<Point>,
}

/// Resolves the drawable geometry for one day of the given generation
/// epoch.
pub fn resolve<N: NetworkLookup>(
    day: &ItineraryDay,
    epoch: u64,
    cache: &DayGeometryCache,
    net: &N,
) -> ResolvedGeometry {
    // Tier 1: cache hit. No network lookups at all.
    if let Some(polylines) = cache.get(day.day, epoch) {
        let bounds = bounds_of(&polylines, day);
        return ResolvedGeometry { polylines, bounds };
    }

    // Tier 2: walk link geometry when the network data is usable.
    let polylines = if !day.route.link_ids.is_empty() && net.is_loaded() {
        walk_links(day, net)
    } else {
        stop_lines(day)
    };

    cache.store(day.day, epoch, polylines.clone());
    let bounds = bounds_of(&polylines, day);
    ResolvedGeometry { polylines, bounds }
}

/// Walks the day's link ids in order, merging contiguous link
/// geometries and bridging missing links node-to-node where possible.
fn walk_links<N: NetworkLookup>(day: &ItineraryDay, net: &N) -> Vec<Polyline> {
    let mut out: Vec<Polyline> = Vec::new();
    let mut current = Polyline::new(Vec::new());

    for (i, link_id) in day.route.link_ids.iter().enumerate() {
        match net.link_by_id(link_id) {
            Some(points) => {
                current.extend_merged(&points);
                if current.len() > MAX_SEGMENT_POINTS {
                    // Carry the boundary point so consecutive chunks
                    // stay visually connected.
                    let seed = current.last().map(|p| vec![p]).unwrap_or_default();
                    out.push(std::mem::replace(&mut current, Polyline::new(seed)));
                }
            }
            None => {
                tracing::warn!(day = day.day, link = %link_id, "link geometry missing, trying node bridge");
                // The link at position i sits between node i and node
                // i+1 in the interleaved array.
                let before = day.route.node_ids.get(i).and_then(|id| net.node_by_id(id));
                let after = day.route.node_ids.get(i + 1).and_then(|id| net.node_by_id(id));
                match (before, after) {
                    (Some(a), Some(b)) => {
                        if current.len() >= 2 {
                            out.push(std::mem::replace(&mut current, Polyline::new(Vec::new())));
                        } else if !current.is_empty() {
                            // A lone carried boundary point is already
                            // covered by the previous chunk.
                            current = Polyline::new(Vec::new());
                        }
                        out.push(Polyline::fallback(vec![a, b]));
                    }
                    _ => {
                        tracing::warn!(day = day.day, link = %link_id, "node bridge failed, skipping link");
                    }
                }
            }
        }
    }

    if current.len() >= 2 {
        out.push(current);
    }
    out
}

/// Tier 3: straight lines between consecutive stops that both carry
/// finite coordinates. Pairs with an invalid endpoint are skipped and
/// the line resumes at the next valid pair.
fn stop_lines(day: &ItineraryDay) -> Vec<Polyline> {
    let mut out: Vec<Polyline> = Vec::new();
    let mut run: Vec<Point> = Vec::new();

    for pair in day.stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if !a.has_valid_coords() || !b.has_valid_coords() {
            tracing::debug!(day = day.day, "stop pair without valid coordinates skipped");
            if run.len() >= 2 {
                out.push(Polyline::fallback(std::mem::take(&mut run)));
            } else {
                run.clear();
            }
            continue;
        }
        if run.is_empty() {
            run.push((a.lat, a.lng));
        }
        run.push((b.lat, b.lng));
    }

    if run.len() >= 2 {
        out.push(Polyline::fallback(run));
    }
    out
}

/// All coordinates used by the resolved polylines; falls back to the
/// day's raw stop coordinates when nothing was drawn.
fn bounds_of(polylines: &[Polyline], day: &ItineraryDay) -> Vec<Point> {
    let mut points: Vec<Point> = polylines
        .iter()
        .flat_map(|line| line.points().iter().copied())
        .collect();
    if points.is_empty() {
        points = day
            .stops
            .iter()
            .filter(|stop| stop.has_valid_coords())
            .map(|stop| (stop.lat, stop.lng))
            .collect();
    }
    points
}
