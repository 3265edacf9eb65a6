use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    entities::{GeoCode, RouteRequest, RouteResult},
    error::Error,
};

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn resolve_route(&self, request: RouteRequest) -> Result<RouteResult, Error> {
        let route = self.resolver.resolve(&request).await?;

        Ok(route)
    }

    #[tracing::instrument(skip(self))]
    async fn suggest_locations(&self, text: &str) -> Result<Vec<GeoCode>, Error> {
        Ok(self.resolver.geocoder().suggestions(text).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use super::*;
    use crate::engine::testing::{engine, engine_with, StubDirections, LINZ, VIENNA};
    use crate::entities::TransportType;

    #[tokio::test]
    async fn resolves_through_directions() {
        let directions = Arc::new(StubDirections::default());
        let engine = engine_with(directions.clone());

        let route = engine
            .resolve_route(RouteRequest::new("Vienna", "Linz", TransportType::Car))
            .await
            .unwrap();

        assert!(!route.is_fallback);
        assert_eq!(route.path, vec![VIENNA, LINZ]);
        assert_eq!(directions.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_location_is_code_103() {
        let err = engine()
            .resolve_route(RouteRequest::new("Vienna", "Atlantis", TransportType::Foot))
            .await
            .unwrap_err();

        assert_eq!(err.code, 103);
        assert!(err.message.contains("Atlantis"));
    }

    #[tokio::test]
    async fn suggestions_come_from_geocoder() {
        let found = engine().suggest_locations("S").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label.as_deref(), Some("Salzburg"));
    }
}
