//! Backend request payload construction.

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::model::{LocationId, SelectionEntry, TimeWindow};

/// Minimal {id, name} pair sent to the scheduling backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRef {
    pub id: LocationId,
    pub name: String,
}

impl From<&SelectionEntry> for PlaceRef {
    fn from(entry: &SelectionEntry) -> Self {
        Self {
            id: entry.location.id.clone(),
            name: entry.location.name.clone(),
        }
    }
}

/// Request body for the scheduling backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub selected: Vec<PlaceRef>,
    pub candidates: Vec<PlaceRef>,
    /// ISO-8601 UTC instants.
    pub start_datetime: String,
    pub end_datetime: String,
}

/// Splits the finalized selection into user-selected and auto-added
/// candidate place refs, paired with the trip window.
///
/// Fails when the window is missing either instant or when no entries
/// were provided.
pub fn build_payload(
    entries: &[SelectionEntry],
    window: TimeWindow,
) -> Result<Payload, PlannerError> {
    let start = window
        .start
        .ok_or_else(|| PlannerError::Validation("time window has no start".to_string()))?;
    let end = window
        .end
        .ok_or_else(|| PlannerError::Validation("time window has no end".to_string()))?;
    if entries.is_empty() {
        return Err(PlannerError::Validation("no locations selected".to_string()));
    }

    let (candidates, selected): (Vec<_>, Vec<_>) =
        entries.iter().partition(|entry| entry.is_candidate);

    Ok(Payload {
        selected: selected.into_iter().map(PlaceRef::from).collect(),
        candidates: candidates.into_iter().map(PlaceRef::from).collect(),
        start_datetime: start.to_rfc3339(),
        end_datetime: end.to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Location};
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, is_candidate: bool) -> SelectionEntry {
        SelectionEntry {
            location: Location {
                id: LocationId::new(id),
                name: format!("name-{id}"),
                category: Category::Attraction,
                lat: 33.5,
                lng: 126.5,
                address: String::new(),
                rating: 4.5,
                review_count: 100,
                link: None,
            },
            is_candidate,
        }
    }

    fn window() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 22, 21, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_splits_selected_and_candidates() {
        let entries = vec![entry("a", false), entry("b", true), entry("c", false)];
        let payload = build_payload(&entries, window()).unwrap();
        assert_eq!(payload.selected.len(), 2);
        assert_eq!(payload.candidates.len(), 1);
        assert_eq!(payload.candidates[0].id.as_str(), "b");
    }

    #[test]
    fn test_missing_window_is_validation_error() {
        let entries = vec![entry("a", false)];
        let half_open = TimeWindow { start: window().start, end: None };
        assert!(matches!(
            build_payload(&entries, half_open),
            Err(PlannerError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_selection_is_validation_error() {
        assert!(matches!(
            build_payload(&[], window()),
            Err(PlannerError::Validation(_))
        ));
    }
}
