use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;
use crate::error::{invalid_field_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    Car,
    Foot,
    Bicycle,
    #[serde(alias = "public transport")]
    PublicTransport,
}

impl TransportType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Foot => "foot",
            Self::Bicycle => "bicycle",
            Self::PublicTransport => "public transport",
        }
    }

    /// Directions profile used for precise routing.
    ///
    /// There is no public transit profile at the provider, so public transport
    /// is routed as driving. The fallback estimate still uses the slower public
    /// transport speed, which makes the two paths disagree on duration.
    pub fn profile(&self) -> Profile {
        match self {
            Self::Foot => Profile::FootWalking,
            Self::Bicycle => Profile::CyclingRegular,
            Self::Car | Self::PublicTransport => Profile::DrivingCar,
        }
    }
}

impl Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransportType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', " ").as_str() {
            "car" => Ok(Self::Car),
            "foot" => Ok(Self::Foot),
            "bicycle" => Ok(Self::Bicycle),
            "public transport" => Ok(Self::PublicTransport),
            _ => Err(invalid_field_error("transport_type")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    DrivingCar,
    FootWalking,
    CyclingRegular,
}

impl Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Profile::DrivingCar => "driving-car",
                Profile::FootWalking => "foot-walking",
                Profile::CyclingRegular => "cycling-regular",
            }
        )
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteRequest {
    pub from_location: String,
    pub to_location: String,
    pub transport_type: TransportType,
}

impl RouteRequest {
    pub fn new(
        from_location: impl Into<String>,
        to_location: impl Into<String>,
        transport_type: TransportType,
    ) -> Self {
        Self {
            from_location: from_location.into(),
            to_location: to_location.into(),
            transport_type,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteResult {
    pub from_location: String,
    pub to_location: String,
    pub transport_type: TransportType,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub path: Vec<Coordinates>,
    pub summary: String,
    pub is_fallback: bool,
}

impl RouteResult {
    pub fn new(request: &RouteRequest, distance_km: f64, duration_hours: f64) -> Self {
        Self {
            from_location: request.from_location.clone(),
            to_location: request.to_location.clone(),
            transport_type: request.transport_type,
            distance_km: distance_km.max(0.0),
            duration_hours: duration_hours.max(0.0),
            path: Vec::new(),
            summary: String::new(),
            is_fallback: false,
        }
    }

    pub fn with_path(mut self, path: Vec<Coordinates>) -> Self {
        self.path = path;
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn fallback(mut self) -> Self {
        self.is_fallback = true;
        self
    }

    /// False for the placeholder produced when neither endpoint could be
    /// geocoded. Its zero distance and time describe nothing.
    pub fn is_located(&self) -> bool {
        !(self.is_fallback && self.path.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_transport_routes_as_driving() {
        assert_eq!(TransportType::PublicTransport.profile(), Profile::DrivingCar);
        assert_eq!(TransportType::Car.profile(), Profile::DrivingCar);
        assert_eq!(TransportType::Foot.profile(), Profile::FootWalking);
        assert_eq!(TransportType::Bicycle.profile(), Profile::CyclingRegular);
    }

    #[test]
    fn profiles_use_provider_names() {
        assert_eq!(Profile::DrivingCar.to_string(), "driving-car");
        assert_eq!(Profile::FootWalking.to_string(), "foot-walking");
        assert_eq!(Profile::CyclingRegular.to_string(), "cycling-regular");
    }

    #[test]
    fn transport_type_parses_loosely() {
        assert_eq!("Car".parse::<TransportType>().unwrap(), TransportType::Car);
        assert_eq!(
            "public transport".parse::<TransportType>().unwrap(),
            TransportType::PublicTransport
        );
        assert_eq!(
            "PUBLIC_TRANSPORT".parse::<TransportType>().unwrap(),
            TransportType::PublicTransport
        );
        assert!("train".parse::<TransportType>().is_err());
    }

    #[test]
    fn route_result_clamps_negative_values() {
        let request = RouteRequest::new("a", "b", TransportType::Foot);
        let result = RouteResult::new(&request, -1.0, -0.5);
        assert_eq!(result.distance_km, 0.0);
        assert_eq!(result.duration_hours, 0.0);
        assert!(!result.is_fallback);
    }

    #[test]
    fn placeholder_route_is_not_located() {
        let request = RouteRequest::new("Atlantis", "Lemuria", TransportType::Foot);

        let placeholder = RouteResult::new(&request, 0.0, 0.0).fallback();
        assert!(!placeholder.is_located());

        let approximate = RouteResult::new(&request, 3.0, 0.6)
            .with_path(vec![Coordinates::new(1.0, 2.0), Coordinates::new(1.1, 2.1)])
            .fallback();
        assert!(approximate.is_located());

        assert!(RouteResult::new(&request, 3.0, 0.6).is_located());
    }
}
