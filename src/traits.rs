//! External-collaborator seams for the itinerary pipeline.
//!
//! These are intentionally minimal. The catalog, the network-geometry
//! store and the scheduling backend are owned elsewhere; the pipeline
//! only ever talks to them through these traits, so tests can supply
//! in-process mocks.

use crate::error::BackendError;
use crate::model::{Location, LocationId};
use crate::payload::Payload;
use crate::schedule::BackendReply;

/// A geographic point as (lat, lng).
pub type Point = (f64, f64);

/// Lookup-by-id/name service over the persistent location catalog.
///
/// Name lookups may be fuzzy; id lookups are exact.
pub trait LocationCatalog {
    fn get_by_id(&self, id: &LocationId) -> Option<Location>;
    fn get_by_name(&self, name: &str) -> Option<Location>;
}

/// Precomputed road-network geometry lookup.
///
/// The resolver only reads segments that already exist here; it never
/// computes new routes.
pub trait NetworkLookup {
    /// Point geometry for a network node.
    fn node_by_id(&self, id: &str) -> Option<Point>;

    /// Coordinate sequence for a network link.
    fn link_by_id(&self, id: &str) -> Option<Vec<Point>>;

    /// Whether the network dataset has been loaded at all. When false
    /// the resolver skips the link walk and draws stop-to-stop lines.
    fn is_loaded(&self) -> bool;
}

impl<T: NetworkLookup + ?Sized> NetworkLookup for &T {
    fn node_by_id(&self, id: &str) -> Option<Point> {
        (**self).node_by_id(id)
    }

    fn link_by_id(&self, id: &str) -> Option<Vec<Point>> {
        (**self).link_by_id(id)
    }

    fn is_loaded(&self) -> bool {
        (**self).is_loaded()
    }
}

/// The black-box scheduling service. Takes the payload built from the
/// finalized selection and returns a flat schedule plus per-day route
/// summaries.
pub trait SchedulingBackend {
    fn schedule(&self, payload: &Payload) -> Result<BackendReply, BackendError>;
}
