use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Tour, TourLog};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_tours: usize,
    pub total_logs: usize,
    pub average_distance_km: f64,
    pub average_rating: f64,
    pub most_popular: Option<TourStatistics>,
    pub tours: Vec<TourStatistics>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TourStatistics {
    pub tour_id: Uuid,
    pub name: String,
    pub log_count: usize,
    pub average_time_hours: f64,
    pub average_distance_km: f64,
    pub average_rating: f64,
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl TourStatistics {
    fn new(tour: &Tour, logs: &[TourLog]) -> Self {
        let own: Vec<&TourLog> = logs.iter().filter(|log| log.tour_id == tour.id).collect();

        Self {
            tour_id: tour.id,
            name: tour.name.clone(),
            log_count: own.len(),
            average_time_hours: average(own.iter().map(|log| log.total_time_hours)),
            average_distance_km: average(own.iter().map(|log| log.total_distance_km)),
            average_rating: average(own.iter().map(|log| log.rating)),
        }
    }
}

impl Statistics {
    /// Aggregates over `tours` in the given order. The most popular tour is
    /// the one with the most logs; on a tie the earlier tour wins.
    pub fn compute(tours: &[Tour], logs: &[TourLog]) -> Self {
        let per_tour: Vec<TourStatistics> = tours
            .iter()
            .map(|tour| TourStatistics::new(tour, logs))
            .collect();

        let most_popular = per_tour
            .iter()
            .fold(None::<&TourStatistics>, |best, stats| match best {
                Some(best) if best.log_count >= stats.log_count => Some(best),
                _ => Some(stats),
            })
            .cloned();

        Self {
            total_tours: tours.len(),
            total_logs: logs.len(),
            average_distance_km: average(tours.iter().map(|tour| tour.distance_km)),
            average_rating: average(logs.iter().map(|log| log.rating)),
            most_popular,
            tours: per_tour,
        }
    }
}
