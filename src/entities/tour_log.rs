use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{invalid_field_error, Error};

/// Difficulty and rating are both on a 1 to 5 scale.
const SCALE: std::ops::RangeInclusive<f64> = 1.0..=5.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourLog {
    pub id: Uuid,
    pub tour_id: Uuid,
    pub date_time: NaiveDateTime,
    pub comment: String,
    pub difficulty: f64,
    pub total_distance_km: f64,
    pub total_time_hours: f64,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TourLogDraft {
    pub tour_id: Uuid,
    pub date_time: NaiveDateTime,
    #[serde(default)]
    pub comment: String,
    pub difficulty: f64,
    pub total_distance_km: f64,
    pub total_time_hours: f64,
    pub rating: f64,
}

impl TourLogDraft {
    pub fn validate(&self) -> Result<(), Error> {
        if !SCALE.contains(&self.difficulty) {
            return Err(invalid_field_error("difficulty"));
        }

        if !SCALE.contains(&self.rating) {
            return Err(invalid_field_error("rating"));
        }

        if !self.total_distance_km.is_finite() || self.total_distance_km < 0.0 {
            return Err(invalid_field_error("total_distance_km"));
        }

        if !self.total_time_hours.is_finite() || self.total_time_hours < 0.0 {
            return Err(invalid_field_error("total_time_hours"));
        }

        Ok(())
    }
}

impl TourLog {
    pub fn new(draft: TourLogDraft) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            tour_id: draft.tour_id,
            date_time: draft.date_time,
            comment: draft.comment,
            difficulty: draft.difficulty,
            total_distance_km: draft.total_distance_km,
            total_time_hours: draft.total_time_hours,
            rating: draft.rating,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: TourLogDraft) {
        self.tour_id = draft.tour_id;
        self.date_time = draft.date_time;
        self.comment = draft.comment;
        self.difficulty = draft.difficulty;
        self.total_distance_km = draft.total_distance_km;
        self.total_time_hours = draft.total_time_hours;
        self.rating = draft.rating;
        self.updated_at = Utc::now();
    }
}
