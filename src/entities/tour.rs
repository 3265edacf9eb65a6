use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{travel_time, RouteRequest, RouteResult, TransportType};
use crate::error::{invalid_field_error, Error};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub distance_km: f64,
    pub estimated_time: Option<String>,
    pub transport_type: Option<TransportType>,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-editable fields of a tour, as submitted on create and update.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TourDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub transport_type: Option<TransportType>,
    #[serde(default)]
    pub from_location: Option<String>,
    #[serde(default)]
    pub to_location: Option<String>,
}

impl TourDraft {
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(invalid_field_error("name"));
        }

        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(invalid_field_error("distance_km"));
        }

        Ok(())
    }
}

impl Tour {
    pub fn new(draft: TourDraft) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            description: draft.description,
            distance_km: draft.distance_km,
            estimated_time: draft.estimated_time,
            transport_type: draft.transport_type,
            from_location: draft.from_location,
            to_location: draft.to_location,
            created_at: now,
            updated_at: now,
        }
    }

    /// The route request for this tour, if from, to and transport type are all set.
    pub fn route_request(&self) -> Option<RouteRequest> {
        match (&self.from_location, &self.to_location, self.transport_type) {
            (Some(from), Some(to), Some(transport_type)) => {
                Some(RouteRequest::new(from.clone(), to.clone(), transport_type))
            }
            _ => None,
        }
    }

    /// Whether applying `draft` changes any field the route depends on.
    pub fn route_changed_by(&self, draft: &TourDraft) -> bool {
        self.from_location != draft.from_location
            || self.to_location != draft.to_location
            || self.transport_type != draft.transport_type
    }

    pub fn apply(&mut self, draft: TourDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.distance_km = draft.distance_km;
        self.estimated_time = draft.estimated_time;
        self.transport_type = draft.transport_type;
        self.from_location = draft.from_location;
        self.to_location = draft.to_location;
        self.updated_at = Utc::now();
    }

    pub fn apply_route(&mut self, route: &RouteResult) {
        self.distance_km = route.distance_km;
        self.estimated_time = Some(travel_time::format_hours(route.duration_hours));
        self.updated_at = Utc::now();
    }

    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&needle);

        contains(&self.name)
            || contains(&self.description)
            || self.from_location.as_deref().map_or(false, contains)
            || self.to_location.as_deref().map_or(false, contains)
    }
}
