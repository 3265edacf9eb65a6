use super::helpers::fetch_tour;
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::TourAPI,
    entities::{RouteResult, Tour, TourDraft},
    error::{invalid_field_error, not_found_error, Error},
};

impl Engine {
    /// Overwrites distance and estimated time from a freshly resolved route.
    /// Leaves the tour as it is when the route cannot be resolved.
    async fn refresh_route(&self, tour: &mut Tour) {
        let request = match tour.route_request() {
            Some(request) => request,
            None => return,
        };

        match self.resolver.resolve(&request).await {
            Ok(route) if route.is_located() => tour.apply_route(&route),
            Ok(route) => tracing::warn!("keeping tour {} route fields: {}", tour.id, route.summary),
            Err(err) => tracing::warn!("keeping tour {} route fields: {}", tour.id, err),
        }
    }
}

#[async_trait]
impl TourAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_tour(&self, draft: TourDraft) -> Result<Tour, Error> {
        draft.validate()?;

        let mut tour = Tour::new(draft);
        self.refresh_route(&mut tour).await;

        self.store.save_tour(&tour).await?;

        Ok(tour)
    }

    #[tracing::instrument(skip(self))]
    async fn update_tour(&self, id: Uuid, draft: TourDraft) -> Result<Tour, Error> {
        draft.validate()?;

        let mut tour = fetch_tour(self.store.as_ref(), id).await?;
        let route_changed = tour.route_changed_by(&draft);

        tour.apply(draft);
        if route_changed {
            self.refresh_route(&mut tour).await;
        }

        self.store.save_tour(&tour).await?;

        Ok(tour)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_tour(&self, id: Uuid) -> Result<(), Error> {
        if !self.store.delete_tour(id).await? {
            return Err(not_found_error());
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find_tour(&self, id: Uuid) -> Result<Tour, Error> {
        fetch_tour(self.store.as_ref(), id).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_tours(&self) -> Result<Vec<Tour>, Error> {
        self.store.list_tours().await
    }

    #[tracing::instrument(skip(self))]
    async fn search_tours(&self, text: &str) -> Result<Vec<Tour>, Error> {
        let tours = self.store.list_tours().await?;
        let text = text.trim();

        if text.is_empty() {
            return Ok(tours);
        }

        Ok(tours.into_iter().filter(|tour| tour.matches(text)).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn tour_route(&self, id: Uuid) -> Result<RouteResult, Error> {
        let tour = fetch_tour(self.store.as_ref(), id).await?;
        let request = tour
            .route_request()
            .ok_or_else(|| invalid_field_error("from_location, to_location, transport_type"))?;

        Ok(self.resolver.resolve(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use super::*;
    use crate::engine::testing::{engine, engine_with, StubDirections};
    use crate::entities::TransportType;

    fn draft(name: &str, from: &str, to: &str) -> TourDraft {
        TourDraft {
            name: name.into(),
            description: "day trip".into(),
            transport_type: Some(TransportType::Car),
            from_location: Some(from.into()),
            to_location: Some(to.into()),
            ..TourDraft::default()
        }
    }

    #[tokio::test]
    async fn create_fills_distance_and_time_from_route() {
        let tour = engine()
            .create_tour(draft("west", "Vienna", "Linz"))
            .await
            .unwrap();

        // 0.0987 degrees of latitude at 1 km per 0.01 degree, 60 km/h
        assert!((tour.distance_km - 9.87).abs() < 1e-9);
        assert_eq!(tour.estimated_time.as_deref(), Some("0h 10m"));
    }

    #[tokio::test]
    async fn create_falls_back_when_directions_are_down() {
        let directions = Arc::new(StubDirections {
            down: true,
            ..StubDirections::default()
        });
        let tour = engine_with(directions)
            .create_tour(draft("west", "Vienna", "Salzburg"))
            .await
            .unwrap();

        assert!((tour.distance_km - 250.8).abs() < 0.1);
        assert_eq!(tour.estimated_time.as_deref(), Some("5h 01m"));
    }

    #[tokio::test]
    async fn create_keeps_draft_values_when_unresolvable() {
        let mut submitted = draft("lost", "Vienna", "Atlantis");
        submitted.distance_km = 12.0;
        submitted.estimated_time = Some("1h 00m".into());

        let tour = engine().create_tour(submitted).await.unwrap();

        assert_eq!(tour.distance_km, 12.0);
        assert_eq!(tour.estimated_time.as_deref(), Some("1h 00m"));
    }

    #[tokio::test]
    async fn create_keeps_draft_values_when_no_location_is_known() {
        let mut submitted = draft("myth", "Atlantis", "Lemuria");
        submitted.distance_km = 12.0;
        submitted.estimated_time = Some("1h 00m".into());

        let engine = engine();
        let tour = engine.create_tour(submitted).await.unwrap();

        assert_eq!(tour.distance_km, 12.0);
        assert_eq!(tour.estimated_time.as_deref(), Some("1h 00m"));

        let mut moved = draft("myth", "Atlantis", "El Dorado");
        moved.distance_km = 20.0;
        moved.estimated_time = Some("2h 30m".into());
        let updated = engine.update_tour(tour.id, moved).await.unwrap();

        assert_eq!(updated.distance_km, 20.0);
        assert_eq!(updated.estimated_time.as_deref(), Some("2h 30m"));
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let err = engine()
            .create_tour(draft("  ", "Vienna", "Linz"))
            .await
            .unwrap_err();
        assert_eq!(err.code, 101);
    }

    #[tokio::test]
    async fn update_only_reroutes_when_route_fields_change() {
        let directions = Arc::new(StubDirections::default());
        let engine = engine_with(directions.clone());

        let tour = engine.create_tour(draft("west", "Vienna", "Linz")).await.unwrap();
        assert_eq!(directions.calls.load(Ordering::SeqCst), 1);

        let mut renamed = draft("west again", "Vienna", "Linz");
        renamed.distance_km = tour.distance_km;
        let updated = engine.update_tour(tour.id, renamed).await.unwrap();
        assert_eq!(updated.name, "west again");
        assert_eq!(directions.calls.load(Ordering::SeqCst), 1);

        let moved = engine
            .update_tour(tour.id, draft("west", "Vienna", "Salzburg"))
            .await
            .unwrap();
        assert_eq!(directions.calls.load(Ordering::SeqCst), 2);
        assert!((moved.distance_km - 39.87).abs() < 1e-9);
        assert_eq!(moved.created_at, tour.created_at);
    }

    #[tokio::test]
    async fn update_and_delete_missing_tour_is_not_found() {
        let engine = engine();

        let err = engine
            .update_tour(Uuid::new_v4(), draft("x", "Vienna", "Linz"))
            .await
            .unwrap_err();
        assert_eq!(err.code, 102);

        let err = engine.delete_tour(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.code, 102);
    }

    #[tokio::test]
    async fn search_matches_any_text_field() {
        let engine = engine();
        engine.create_tour(draft("Wine route", "Vienna", "Linz")).await.unwrap();
        engine.create_tour(draft("Lakes", "Salzburg", "Linz")).await.unwrap();

        let found = engine.search_tours("salz").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Lakes");

        assert_eq!(engine.search_tours("LINZ").await.unwrap().len(), 2);
        assert_eq!(engine.search_tours(" ").await.unwrap().len(), 2);
        assert!(engine.search_tours("danube").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn tour_route_needs_all_route_fields() {
        let engine = engine();

        let tour = engine.create_tour(draft("west", "Vienna", "Linz")).await.unwrap();
        let route = engine.tour_route(tour.id).await.unwrap();
        assert_eq!(route.path.len(), 2);

        let bare = engine
            .create_tour(TourDraft {
                name: "bare".into(),
                ..TourDraft::default()
            })
            .await
            .unwrap();
        let err = engine.tour_route(bare.id).await.unwrap_err();
        assert_eq!(err.code, 101);
    }
}
