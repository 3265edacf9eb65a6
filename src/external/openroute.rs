//! Client for the OpenRouteService geocoding and directions endpoints.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Directions, DirectionsProvider, Geocoder};
use crate::config::OpenRouteServiceConfig;
use crate::entities::{Coordinates, GeoCode, Profile};
use crate::error::{upstream_error, upstream_status_error, Error};

const USER_AGENT: &str = "tour-planner/0.1";

/// Snapping radius in meters for both route endpoints.
const SNAP_RADIUS_M: u32 = 5000;

#[derive(Clone, Debug, Deserialize)]
struct FeatureCollection<G, P> {
    #[serde(default = "Vec::new")]
    features: Vec<Feature<G, P>>,
}

#[derive(Clone, Debug, Deserialize)]
struct Feature<G, P> {
    geometry: Option<Geometry<G>>,
    properties: Option<P>,
}

#[derive(Clone, Debug, Deserialize)]
struct Geometry<G> {
    coordinates: G,
}

#[derive(Clone, Debug, Deserialize)]
struct PlaceProperties {
    label: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RouteProperties {
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, Deserialize)]
struct Segment {
    distance: f64,
    duration: f64,
}

type PlaceCollection = FeatureCollection<Vec<f64>, PlaceProperties>;
type RouteCollection = FeatureCollection<Vec<Vec<f64>>, RouteProperties>;

#[derive(Debug, Serialize)]
struct DirectionsBody {
    coordinates: [[f64; 2]; 2],
    radiuses: [u32; 2],
}

impl Feature<Vec<f64>, PlaceProperties> {
    fn into_geocode(self) -> Option<GeoCode> {
        let geometry = self.geometry?;
        let coordinates = match geometry.coordinates.as_slice() {
            [lon, lat] => Coordinates::from_lon_lat([*lon, *lat]),
            _ => return None,
        };

        let label = self.properties.and_then(|p| p.label);

        Some(GeoCode::new(coordinates, label))
    }
}

/// Geocoding and directions against one OpenRouteService deployment.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct OpenRouteService {
    client: Client,
    api_base: String,
    api_key: String,
}

impl OpenRouteService {
    pub fn new(config: &OpenRouteServiceConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<Vec<Feature<Vec<f64>, PlaceProperties>>, Error> {
        let url = format!("{}/geocode/search", self.api_base);

        let res = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&[("api_key", self.api_key.as_str())])
            .query(&[("text", text)])
            .send()
            .await?;

        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!("geocoding api error: HTTP {} - {}", status.as_u16(), body);
            return Err(upstream_status_error(status.as_u16()));
        }

        let data: PlaceCollection = res.json().await?;

        Ok(data.features)
    }
}

#[async_trait]
impl Geocoder for OpenRouteService {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, text: &str) -> Option<GeoCode> {
        if text.trim().is_empty() {
            return None;
        }

        match self.search(text).await {
            Ok(features) => {
                let found = features.into_iter().next().and_then(Feature::into_geocode);
                if found.is_none() {
                    tracing::warn!("no geocoding candidates for {:?}", text);
                }
                found
            }
            Err(err) => {
                tracing::warn!("geocoding {:?} failed: {}", text, err);
                None
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn suggestions(&self, text: &str) -> Vec<GeoCode> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        match self.search(text).await {
            Ok(features) => features
                .into_iter()
                .filter_map(Feature::into_geocode)
                .collect(),
            Err(err) => {
                tracing::warn!("geocoding suggestions for {:?} failed: {}", text, err);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl DirectionsProvider for OpenRouteService {
    #[tracing::instrument(skip(self))]
    async fn directions(
        &self,
        from: Coordinates,
        to: Coordinates,
        profile: Profile,
    ) -> Result<Directions, Error> {
        let url = format!("{}/v2/directions/{}/geojson", self.api_base, profile);

        let body = DirectionsBody {
            coordinates: [from.to_lon_lat(), to.to_lon_lat()],
            radiuses: [SNAP_RADIUS_M, SNAP_RADIUS_M],
        };

        let res = self
            .client
            .post(url)
            .header(AUTHORIZATION, self.api_key.as_str())
            .header(ACCEPT, "application/json, application/geo+json")
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        tracing::debug!("directions api response status: {}", status);

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::error!("directions api error: HTTP {} - {}", status.as_u16(), body);
            return Err(upstream_status_error(status.as_u16()));
        }

        let data: RouteCollection = res.json().await?;

        let feature = data.features.into_iter().next().ok_or_else(upstream_error)?;
        let segment = feature
            .properties
            .and_then(|p| p.segments.into_iter().next())
            .ok_or_else(upstream_error)?;

        let path = feature
            .geometry
            .map(|g| g.coordinates)
            .unwrap_or_default()
            .into_iter()
            .map(|position| match position.as_slice() {
                [lon, lat, ..] => Ok(Coordinates::from_lon_lat([*lon, *lat])),
                _ => Err(upstream_error()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("parsed {} coordinates from directions response", path.len());

        Ok(Directions {
            distance_m: segment.distance,
            duration_s: segment.duration,
            path,
        })
    }
}
