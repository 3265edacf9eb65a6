pub mod openroute;

use async_trait::async_trait;

use crate::entities::{Coordinates, GeoCode, Profile};
use crate::error::Error;

pub use openroute::OpenRouteService;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best candidate for `text`, or `None` when nothing usable came back.
    async fn geocode(&self, text: &str) -> Option<GeoCode>;

    /// Every candidate for `text`. Empty on any failure.
    async fn suggestions(&self, text: &str) -> Vec<GeoCode>;
}

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn directions(
        &self,
        from: Coordinates,
        to: Coordinates,
        profile: Profile,
    ) -> Result<Directions, Error>;
}

/// A routed path as reported by the provider, in provider units.
#[derive(Clone, Debug, PartialEq)]
pub struct Directions {
    pub distance_m: f64,
    pub duration_s: f64,
    pub path: Vec<Coordinates>,
}
