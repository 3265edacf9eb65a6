use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds coordinates from a GeoJSON position, which is `[lon, lat]`.
    pub fn from_lon_lat(position: [f64; 2]) -> Self {
        Self::new(position[1], position[0])
    }

    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl From<Coordinates> for geo_types::Coord<f64> {
    fn from(coordinates: Coordinates) -> Self {
        geo_types::coord! { x: coordinates.longitude, y: coordinates.latitude }
    }
}

impl From<geo_types::Coord<f64>> for Coordinates {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

/// A geocoded place: coordinates plus the provider's label for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCode {
    pub coordinates: Coordinates,
    pub label: Option<String>,
}

impl GeoCode {
    pub fn new(coordinates: Coordinates, label: Option<String>) -> Self {
        Self { coordinates, label }
    }
}
