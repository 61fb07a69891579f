//! In-memory location catalog with fuzzy name matching.
//!
//! Stands in for the persistent catalog service wherever an in-process
//! lookup is enough (tests, offline use), the same way a straight-line
//! matrix stands in for a routing engine.

use std::collections::HashMap;

use crate::model::{Location, LocationId};
use crate::traits::LocationCatalog;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    by_id: HashMap<LocationId, Location>,
}

impl InMemoryCatalog {
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        let by_id = locations
            .into_iter()
            .map(|loc| (loc.id.clone(), loc))
            .collect();
        Self { by_id }
    }

    pub fn insert(&mut self, location: Location) {
        self.by_id.insert(location.id.clone(), location);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

impl LocationCatalog for InMemoryCatalog {
    fn get_by_id(&self, id: &LocationId) -> Option<Location> {
        self.by_id.get(id).cloned()
    }

    /// Exact (normalized) match wins; otherwise the shortest name that
    /// contains, or is contained by, the query.
    fn get_by_name(&self, name: &str) -> Option<Location> {
        let needle = normalize(name);
        if needle.is_empty() {
            return None;
        }

        let mut best: Option<(&Location, usize)> = None;
        for loc in self.by_id.values() {
            let candidate = normalize(&loc.name);
            if candidate == needle {
                return Some(loc.clone());
            }
            if candidate.contains(&needle) || needle.contains(&candidate) {
                // Tie-break on the normalized length, so whitespace in
                // a catalog name cannot beat a genuinely shorter match.
                let better = match best {
                    Some((_, best_len)) => candidate.len() < best_len,
                    None => true,
                };
                if better {
                    best = Some((loc, candidate.len()));
                }
            }
        }
        best.map(|(loc, _)| loc.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn loc(id: &str, name: &str) -> Location {
        Location {
            id: LocationId::new(id),
            name: name.to_string(),
            category: Category::Attraction,
            lat: 33.5,
            lng: 126.5,
            address: String::new(),
            rating: 4.0,
            review_count: 1,
            link: None,
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = InMemoryCatalog::new([loc("1", "Hallasan National Park")]);
        assert!(catalog.get_by_id(&LocationId::new("1")).is_some());
        assert!(catalog.get_by_id(&LocationId::new("2")).is_none());
    }

    #[test]
    fn test_fuzzy_name_match() {
        let catalog = InMemoryCatalog::new([
            loc("1", "Hallasan National Park"),
            loc("2", "Hamdeok Beach"),
        ]);
        let hit = catalog.get_by_name("hallasan").unwrap();
        assert_eq!(hit.id, LocationId::new("1"));
    }

    #[test]
    fn test_exact_match_beats_substring() {
        let catalog = InMemoryCatalog::new([
            loc("1", "Seongsan Ilchulbong Peak"),
            loc("2", "Seongsan"),
        ]);
        let hit = catalog.get_by_name("Seongsan").unwrap();
        assert_eq!(hit.id, LocationId::new("2"));
    }

    #[test]
    fn test_tie_break_ignores_whitespace_padding() {
        // "Monsant Cafe" has the shorter raw name, but "  Cafe   Annex  "
        // is shorter once normalized and should win.
        let catalog = InMemoryCatalog::new([
            loc("1", "Monsant Cafe"),
            loc("2", "  Cafe   Annex  "),
        ]);
        let hit = catalog.get_by_name("Cafe").unwrap();
        assert_eq!(hit.id, LocationId::new("2"));
    }

    #[test]
    fn test_no_match() {
        let catalog = InMemoryCatalog::new([loc("1", "Hamdeok Beach")]);
        assert!(catalog.get_by_name("Udo Island").is_none());
    }
}
