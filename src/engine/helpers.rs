use uuid::Uuid;

use crate::{
    db::TourStore,
    entities::{Tour, TourLog},
    error::{not_found_error, Error},
};

#[tracing::instrument(skip(store))]
pub async fn fetch_tour(store: &dyn TourStore, id: Uuid) -> Result<Tour, Error> {
    store
        .find_tour(id)
        .await?
        .ok_or_else(not_found_error)
}

#[tracing::instrument(skip(store))]
pub async fn fetch_tour_log(store: &dyn TourStore, id: Uuid) -> Result<TourLog, Error> {
    store
        .find_tour_log(id)
        .await?
        .ok_or_else(not_found_error)
}

/// Fails with not found unless the tour exists.
pub async fn ensure_tour(store: &dyn TourStore, id: Uuid) -> Result<(), Error> {
    fetch_tour(store, id).await.map(|_| ())
}
