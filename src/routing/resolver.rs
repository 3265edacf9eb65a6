use std::fmt::{self, Display};
use std::sync::Arc;

use tokio::task::JoinHandle;

use super::distance::{estimate_duration_hours, haversine_distance_km, interpolated_path};
use crate::entities::{travel_time, Coordinates, RouteRequest, RouteResult};
use crate::error::{unresolvable_route_error, Error};
use crate::external::{DirectionsProvider, Geocoder, OpenRouteService};

pub const FALLBACK_SUMMARY: &str = "Approximate route (API unavailable)";
pub const NO_COORDINATES_SUMMARY: &str =
    "No coordinates available (locations could not be resolved)";

/// Why no route at all could be produced for a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unresolvable {
    /// Both locations were blank.
    EmptyInput,
    /// This location could not be geocoded while the other one could.
    Location(String),
}

impl Display for Unresolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "no locations given"),
            Self::Location(name) => write!(f, "could not resolve location {:?}", name),
        }
    }
}

impl std::error::Error for Unresolvable {}

impl From<Unresolvable> for Error {
    fn from(err: Unresolvable) -> Self {
        unresolvable_route_error(err)
    }
}

/// Turns a from/to/transport triple into a route.
///
/// Both locations are geocoded concurrently. With both coordinates known the
/// directions provider is asked once; if that fails for any reason the result
/// is an approximate route computed locally and flagged `is_fallback`. Nothing
/// is retried.
#[derive(Clone)]
pub struct RouteResolver {
    geocoder: Arc<dyn Geocoder>,
    directions: Arc<dyn DirectionsProvider>,
}

impl RouteResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, directions: Arc<dyn DirectionsProvider>) -> Self {
        Self {
            geocoder,
            directions,
        }
    }

    pub fn with_service(service: OpenRouteService) -> Self {
        let service = Arc::new(service);
        Self::new(service.clone(), service)
    }

    pub fn geocoder(&self) -> &Arc<dyn Geocoder> {
        &self.geocoder
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, request: &RouteRequest) -> Result<RouteResult, Unresolvable> {
        if request.from_location.trim().is_empty() && request.to_location.trim().is_empty() {
            return Err(Unresolvable::EmptyInput);
        }

        let (from, to) = futures::join!(
            self.geocoder.geocode(&request.from_location),
            self.geocoder.geocode(&request.to_location)
        );

        match (from, to) {
            (Some(from), Some(to)) => {
                tracing::info!(
                    "resolved endpoints {:?} -> {:?}",
                    from.coordinates,
                    to.coordinates
                );
                Ok(self
                    .route_between(request, from.coordinates, to.coordinates)
                    .await)
            }
            (None, None) => {
                tracing::warn!("neither location could be geocoded");
                Ok(RouteResult::new(request, 0.0, 0.0)
                    .with_summary(NO_COORDINATES_SUMMARY)
                    .fallback())
            }
            (None, Some(_)) => Err(Unresolvable::Location(request.from_location.clone())),
            (Some(_), None) => Err(Unresolvable::Location(request.to_location.clone())),
        }
    }

    /// Runs [`RouteResolver::resolve`] on the runtime. Dropping the handle
    /// detaches the task.
    pub fn spawn(&self, request: RouteRequest) -> JoinHandle<Result<RouteResult, Unresolvable>> {
        let resolver = self.clone();
        tokio::spawn(async move { resolver.resolve(&request).await })
    }

    async fn route_between(
        &self,
        request: &RouteRequest,
        from: Coordinates,
        to: Coordinates,
    ) -> RouteResult {
        let profile = request.transport_type.profile();

        match self.directions.directions(from, to, profile).await {
            Ok(directions) => {
                let distance_km = directions.distance_m / 1000.0;
                let duration_hours = directions.duration_s / 3600.0;
                let summary = format!(
                    "{:.1} km, {} via {}",
                    distance_km,
                    travel_time::format_hours(duration_hours),
                    profile
                );

                RouteResult::new(request, distance_km, duration_hours)
                    .with_path(directions.path)
                    .with_summary(summary)
            }
            Err(err) => {
                tracing::warn!("directions unavailable, using approximate route: {}", err);
                fallback_route(request, from, to)
            }
        }
    }
}

/// Approximate route from straight-line distance and average speed.
pub fn fallback_route(request: &RouteRequest, from: Coordinates, to: Coordinates) -> RouteResult {
    let distance_km = haversine_distance_km(from, to);
    let duration_hours = estimate_duration_hours(distance_km, request.transport_type);

    tracing::info!(
        "fallback route: {:.2} km, {:.2} h by {}",
        distance_km,
        duration_hours,
        request.transport_type
    );

    RouteResult::new(request, distance_km, duration_hours)
        .with_path(interpolated_path(from, to, request.transport_type))
        .with_summary(FALLBACK_SUMMARY)
        .fallback()
}
