//! itinerary-planner core
//!
//! Multi-day visit scheduling: quota-based selection auto-fill, backend
//! payload construction, schedule reply parsing into day-partitioned
//! itineraries, and per-day route geometry resolution with caching.

pub mod traits;
pub mod model;
pub mod error;
pub mod quota;
pub mod payload;
pub mod schedule;
pub mod geometry;
pub mod catalog;
pub mod backend;
pub mod pipeline;
pub mod polyline;
