use std::collections::HashMap;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entities::{Tour, TourLog};
use crate::error::Error;

/// Persistence for tours and their logs. Lists come back oldest first.
#[async_trait]
pub trait TourStore: Send + Sync {
    /// Inserts or replaces the tour with the same id.
    async fn save_tour(&self, tour: &Tour) -> Result<(), Error>;
    /// Removes the tour and all of its logs. `false` if it did not exist.
    async fn delete_tour(&self, id: Uuid) -> Result<bool, Error>;
    async fn find_tour(&self, id: Uuid) -> Result<Option<Tour>, Error>;
    async fn list_tours(&self) -> Result<Vec<Tour>, Error>;

    async fn save_tour_log(&self, log: &TourLog) -> Result<(), Error>;
    async fn delete_tour_log(&self, id: Uuid) -> Result<bool, Error>;
    async fn find_tour_log(&self, id: Uuid) -> Result<Option<TourLog>, Error>;
    /// Logs of one tour, or of every tour when `tour_id` is `None`.
    async fn list_tour_logs(&self, tour_id: Option<Uuid>) -> Result<Vec<TourLog>, Error>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tours: RwLock<HashMap<Uuid, Tour>>,
    tour_logs: RwLock<HashMap<Uuid, TourLog>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TourStore for MemoryStore {
    async fn save_tour(&self, tour: &Tour) -> Result<(), Error> {
        self.tours.write().await.insert(tour.id, tour.clone());
        Ok(())
    }

    async fn delete_tour(&self, id: Uuid) -> Result<bool, Error> {
        let mut tours = self.tours.write().await;
        let mut tour_logs = self.tour_logs.write().await;

        if tours.remove(&id).is_none() {
            return Ok(false);
        }

        tour_logs.retain(|_, log| log.tour_id != id);
        Ok(true)
    }

    async fn find_tour(&self, id: Uuid) -> Result<Option<Tour>, Error> {
        Ok(self.tours.read().await.get(&id).cloned())
    }

    async fn list_tours(&self) -> Result<Vec<Tour>, Error> {
        let mut tours: Vec<Tour> = self.tours.read().await.values().cloned().collect();
        tours.sort_by_key(|tour| (tour.created_at, tour.id));
        Ok(tours)
    }

    async fn save_tour_log(&self, log: &TourLog) -> Result<(), Error> {
        self.tour_logs.write().await.insert(log.id, log.clone());
        Ok(())
    }

    async fn delete_tour_log(&self, id: Uuid) -> Result<bool, Error> {
        Ok(self.tour_logs.write().await.remove(&id).is_some())
    }

    async fn find_tour_log(&self, id: Uuid) -> Result<Option<TourLog>, Error> {
        Ok(self.tour_logs.read().await.get(&id).cloned())
    }

    async fn list_tour_logs(&self, tour_id: Option<Uuid>) -> Result<Vec<TourLog>, Error> {
        let mut logs: Vec<TourLog> = self
            .tour_logs
            .read()
            .await
            .values()
            .filter(|log| tour_id.map_or(true, |id| log.tour_id == id))
            .cloned()
            .collect();
        logs.sort_by_key(|log| (log.created_at, log.id));
        Ok(logs)
    }
}

/// JSONB key-value tables in Postgres. The `tour_id` and `created_at` columns
/// exist for the cascade and for ordering; the row body lives in `data`.
#[derive(Debug)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip(db_uri))]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        // TODO: move this to migrations
        pool.execute("CREATE TABLE IF NOT EXISTS tours (id UUID PRIMARY KEY, created_at TIMESTAMPTZ NOT NULL, data JSONB NOT NULL)")
            .await?;
        pool.execute("CREATE TABLE IF NOT EXISTS tour_logs (id UUID PRIMARY KEY, tour_id UUID NOT NULL, created_at TIMESTAMPTZ NOT NULL, data JSONB NOT NULL, CONSTRAINT fk_log_tour FOREIGN KEY(tour_id) REFERENCES tours(id) ON DELETE CASCADE)")
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TourStore for PgStore {
    #[tracing::instrument(skip(self, tour), fields(id = %tour.id))]
    async fn save_tour(&self, tour: &Tour) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("INSERT INTO tours (id, created_at, data) VALUES ($1, $2, $3) ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data")
                .bind(&tour.id)
                .bind(&tour.created_at)
                .bind(Json(tour)),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_tour(&self, id: Uuid) -> Result<bool, Error> {
        let mut conn = self.pool.acquire().await?;

        let result = conn
            .execute(sqlx::query("DELETE FROM tours WHERE id = $1").bind(&id))
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn find_tour(&self, id: Uuid) -> Result<Option<Tour>, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM tours WHERE id = $1").bind(&id))
            .await?;

        match maybe_result {
            Some(row) => {
                let Json(tour): Json<Tour> = row.try_get("data")?;
                Ok(Some(tour))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_tours(&self) -> Result<Vec<Tour>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut rows = conn.fetch(sqlx::query("SELECT data FROM tours ORDER BY created_at, id"));
        let mut tours = Vec::new();

        while let Some(row) = rows.try_next().await? {
            let Json(tour): Json<Tour> = row.try_get("data")?;
            tours.push(tour);
        }

        Ok(tours)
    }

    #[tracing::instrument(skip(self, log), fields(id = %log.id))]
    async fn save_tour_log(&self, log: &TourLog) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("INSERT INTO tour_logs (id, tour_id, created_at, data) VALUES ($1, $2, $3, $4) ON CONFLICT (id) DO UPDATE SET tour_id = EXCLUDED.tour_id, data = EXCLUDED.data")
                .bind(&log.id)
                .bind(&log.tour_id)
                .bind(&log.created_at)
                .bind(Json(log)),
        )
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_tour_log(&self, id: Uuid) -> Result<bool, Error> {
        let mut conn = self.pool.acquire().await?;

        let result = conn
            .execute(sqlx::query("DELETE FROM tour_logs WHERE id = $1").bind(&id))
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn find_tour_log(&self, id: Uuid) -> Result<Option<TourLog>, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM tour_logs WHERE id = $1").bind(&id))
            .await?;

        match maybe_result {
            Some(row) => {
                let Json(log): Json<TourLog> = row.try_get("data")?;
                Ok(Some(log))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list_tour_logs(&self, tour_id: Option<Uuid>) -> Result<Vec<TourLog>, Error> {
        let mut conn = self.pool.acquire().await?;

        let query = match tour_id {
            Some(id) => sqlx::query(
                "SELECT data FROM tour_logs WHERE tour_id = $1 ORDER BY created_at, id",
            )
            .bind(id),
            None => sqlx::query("SELECT data FROM tour_logs ORDER BY created_at, id"),
        };

        let mut rows = conn.fetch(query);
        let mut logs = Vec::new();

        while let Some(row) = rows.try_next().await? {
            let Json(log): Json<TourLog> = row.try_get("data")?;
            logs.push(log);
        }

        Ok(logs)
    }
}
