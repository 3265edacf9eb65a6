use super::helpers::{ensure_tour, fetch_tour_log};
use super::Engine;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    api::TourLogAPI,
    entities::{TourLog, TourLogDraft},
    error::{not_found_error, Error},
};

#[async_trait]
impl TourLogAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_tour_log(&self, draft: TourLogDraft) -> Result<TourLog, Error> {
        draft.validate()?;
        ensure_tour(self.store.as_ref(), draft.tour_id).await?;

        let log = TourLog::new(draft);
        self.store.save_tour_log(&log).await?;

        Ok(log)
    }

    #[tracing::instrument(skip(self))]
    async fn update_tour_log(&self, id: Uuid, draft: TourLogDraft) -> Result<TourLog, Error> {
        draft.validate()?;

        let mut log = fetch_tour_log(self.store.as_ref(), id).await?;
        if log.tour_id != draft.tour_id {
            ensure_tour(self.store.as_ref(), draft.tour_id).await?;
        }

        log.apply(draft);
        self.store.save_tour_log(&log).await?;

        Ok(log)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_tour_log(&self, id: Uuid) -> Result<(), Error> {
        if !self.store.delete_tour_log(id).await? {
            return Err(not_found_error());
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find_tour_log(&self, id: Uuid) -> Result<TourLog, Error> {
        fetch_tour_log(self.store.as_ref(), id).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_tour_logs(&self, tour_id: Uuid) -> Result<Vec<TourLog>, Error> {
        ensure_tour(self.store.as_ref(), tour_id).await?;

        self.store.list_tour_logs(Some(tour_id)).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_all_tour_logs(&self) -> Result<Vec<TourLog>, Error> {
        self.store.list_tour_logs(None).await
    }

    #[tracing::instrument(skip(self))]
    async fn search_tour_logs(&self, text: &str) -> Result<Vec<TourLog>, Error> {
        let logs = self.store.list_tour_logs(None).await?;
        let needle = text.trim().to_lowercase();

        if needle.is_empty() {
            return Ok(logs);
        }

        Ok(logs
            .into_iter()
            .filter(|log| log.comment.to_lowercase().contains(&needle))
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn count_tour_logs(&self, tour_id: Uuid) -> Result<usize, Error> {
        ensure_tour(self.store.as_ref(), tour_id).await?;

        Ok(self.store.list_tour_logs(Some(tour_id)).await?.len())
    }
}
