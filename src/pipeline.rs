//! Generation pipeline: quota fill, payload build, backend call, parse,
//! geometry resolution.
//!
//! One generation runs at a time; a second trigger while one is in
//! flight is rejected. Each generation gets a fresh epoch and a cleared
//! geometry cache, so geometry computed for a stale itinerary can never
//! mix with a freshly parsed one, and a cancelled generation's late
//! results are discarded instead of applied.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rayon::prelude::*;

use crate::error::PlannerError;
use crate::geometry::{self, DayGeometryCache, ResolvedGeometry};
use crate::model::{Itinerary, ItineraryDay, RecommendationPools, SelectionEntry, TimeWindow};
use crate::payload;
use crate::quota;
use crate::schedule::{self, ParserConfig};
use crate::traits::{LocationCatalog, NetworkLookup, SchedulingBackend};

/// One user-initiated "generate itinerary" request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub selected: Vec<SelectionEntry>,
    pub pools: RecommendationPools,
    pub trip_days: u32,
    pub window: TimeWindow,
}

pub struct ItineraryPlanner<B, C, N> {
    backend: B,
    catalog: C,
    network: N,
    parser_config: ParserConfig,
    cache: DayGeometryCache,
    epoch: AtomicU64,
    in_flight: AtomicBool,
}

impl<B, C, N> ItineraryPlanner<B, C, N>
where
    B: SchedulingBackend,
    C: LocationCatalog,
    N: NetworkLookup,
{
    pub fn new(backend: B, catalog: C, network: N) -> Self {
        Self {
            backend,
            catalog,
            network,
            parser_config: ParserConfig::default(),
            cache: DayGeometryCache::new(),
            epoch: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_parser_config(mut self, config: ParserConfig) -> Self {
        self.parser_config = config;
        self
    }

    /// Current generation epoch. Bumped by every generation and by
    /// [`cancel`](Self::cancel).
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Runs one full generation. Rejects the call when another
    /// generation is already in flight.
    pub fn generate(&self, request: GenerateRequest) -> Result<Itinerary, PlannerError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(PlannerError::GenerationInFlight);
        }

        let result = self.generate_inner(request);
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    fn generate_inner(&self, request: GenerateRequest) -> Result<Itinerary, PlannerError> {
        let trip_start = request
            .window
            .start
            .ok_or_else(|| PlannerError::Validation("time window has no start".to_string()))?
            .date_naive();

        // Stale geometry must never survive into a new generation.
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.cache.reset(epoch);

        let entries = quota::auto_complete(&request.selected, &request.pools, request.trip_days);
        let payload = payload::build_payload(&entries, request.window)?;

        tracing::debug!(
            selected = payload.selected.len(),
            candidates = payload.candidates.len(),
            "requesting schedule"
        );
        let reply = self.backend.schedule(&payload)?;

        // The backend call is the only suspension point; a cancel that
        // landed while it was outstanding moved the epoch.
        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!(epoch, "generation cancelled while backend call was outstanding");
            return Err(PlannerError::Cancelled);
        }

        let days = schedule::parse(reply, trip_start, &entries, &self.catalog, &self.parser_config)?;
        tracing::info!(days = days.len(), epoch, "itinerary generated");
        Ok(Itinerary { days, epoch })
    }

    /// Invalidates the in-flight generation; its results, and any
    /// geometry still being resolved for it, are discarded.
    pub fn cancel(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.cache.reset(epoch);
    }

    /// Resolves drawable geometry for one day of the given itinerary,
    /// through the per-day cache.
    pub fn resolve_day(
        &self,
        itinerary: &Itinerary,
        day: &ItineraryDay,
    ) -> Result<ResolvedGeometry, PlannerError> {
        if itinerary.epoch != self.epoch() {
            return Err(PlannerError::Cancelled);
        }
        let resolved = geometry::resolve(day, itinerary.epoch, &self.cache, &self.network);
        // A cancel that landed mid-resolution moved the epoch; the
        // cache already refused the write, and the result is discarded
        // rather than handed back.
        if itinerary.epoch != self.epoch() {
            return Err(PlannerError::Cancelled);
        }
        Ok(resolved)
    }

    /// Resolves every day's geometry in parallel. Days are independent;
    /// each writes only its own cache slot.
    pub fn resolve_all(&self, itinerary: &Itinerary) -> Result<Vec<ResolvedGeometry>, PlannerError>
    where
        B: Sync,
        C: Sync,
        N: Sync,
    {
        if itinerary.epoch != self.epoch() {
            return Err(PlannerError::Cancelled);
        }
        let resolved = itinerary
            .days
            .par_iter()
            .map(|day| geometry::resolve(day, itinerary.epoch, &self.cache, &self.network))
            .collect();
        if itinerary.epoch != self.epoch() {
            return Err(PlannerError::Cancelled);
        }
        Ok(resolved)
    }
}
