//! Quota engine: per-category minimum counts and shortfall auto-fill.
//!
//! Minimums scale with trip length except lodging, which is fixed at 1
//! (the request-building path of the reference system uses the fixed
//! rule; a per-day lodging variant exists elsewhere and is deliberately
//! not adopted).

use std::collections::{HashMap, HashSet};

use crate::model::{Category, LocationId, RecommendationPools, SelectionEntry};

/// Attractions required per trip day.
const ATTRACTIONS_PER_DAY: usize = 4;
/// Restaurants required per trip day.
const RESTAURANTS_PER_DAY: usize = 3;
/// Cafes required per trip day.
const CAFES_PER_DAY: usize = 3;
/// Lodging minimum, independent of trip length.
const LODGING_MINIMUM: usize = 1;

/// Minimum required stop counts per category for a trip of the given
/// length in days.
pub fn minimum_counts(trip_days: u32) -> HashMap<Category, usize> {
    let days = trip_days as usize;
    HashMap::from([
        (Category::Lodging, LODGING_MINIMUM),
        (Category::Attraction, ATTRACTIONS_PER_DAY * days),
        (Category::Restaurant, RESTAURANTS_PER_DAY * days),
        (Category::Cafe, CAFES_PER_DAY * days),
    ])
}

/// Fills category shortfalls from the recommendation pools.
///
/// Pools are assumed pre-ranked (best first) and are consumed in order.
/// The returned list keeps every input entry in its original position,
/// followed by added candidates grouped by category in processing order
/// (lodging, attraction, restaurant, cafe). Ids never repeat across the
/// output. An underfilled pool is a soft degrade: the shortfall is
/// logged and planning continues with fewer stops of that category.
pub fn auto_complete(
    selected: &[SelectionEntry],
    pools: &RecommendationPools,
    trip_days: u32,
) -> Vec<SelectionEntry> {
    let minimums = minimum_counts(trip_days);

    let mut taken: HashSet<LocationId> = selected
        .iter()
        .map(|entry| entry.location.id.clone())
        .collect();

    let mut counts: HashMap<Category, usize> = HashMap::new();
    for entry in selected {
        *counts.entry(entry.location.category).or_insert(0) += 1;
    }

    let mut output: Vec<SelectionEntry> = selected.to_vec();

    for category in Category::ALL {
        let Some(&minimum) = minimums.get(&category) else {
            continue;
        };
        let current = counts.get(&category).copied().unwrap_or(0);
        let shortfall = minimum.saturating_sub(current);
        if shortfall == 0 {
            continue;
        }

        let pool = pools.get(&category).map(Vec::as_slice).unwrap_or(&[]);
        let mut added = 0;
        for location in pool {
            if added == shortfall {
                break;
            }
            if taken.contains(&location.id) {
                continue;
            }
            taken.insert(location.id.clone());
            output.push(SelectionEntry::candidate(location.clone()));
            added += 1;
        }

        if added < shortfall {
            tracing::warn!(
                category = ?category,
                minimum,
                current,
                added,
                "recommendation pool too small to meet category minimum"
            );
        }
    }

    output
}
