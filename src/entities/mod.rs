mod location;
mod route;
mod statistics;
mod tour;
mod tour_log;
pub mod travel_time;

pub use location::{Coordinates, GeoCode};
pub use route::{Profile, RouteRequest, RouteResult, TransportType};
pub use statistics::{Statistics, TourStatistics};
pub use tour::{Tour, TourDraft};
pub use tour_log::{TourLog, TourLogDraft};
