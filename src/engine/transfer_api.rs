use super::Engine;

use async_trait::async_trait;

use crate::{
    api::TransferAPI,
    entities::{Tour, TourLog},
    error::{invalid_field_error, Error},
    transfer::{self, Format},
};

#[async_trait]
impl TransferAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn export_tours(&self, format: Format) -> Result<String, Error> {
        let tours = self.store.list_tours().await?;

        transfer::encode_tours(&tours, format)
    }

    /// Upserts by id. Every record is checked before anything is written, and
    /// imported distances and times are taken as given.
    #[tracing::instrument(skip(self, body))]
    async fn import_tours(&self, format: Format, body: &str) -> Result<usize, Error> {
        let records = transfer::decode_tours(body, format)?;
        let mut tours = Vec::with_capacity(records.len());

        for record in records {
            let draft = record.to_draft();
            draft.validate()?;

            let tour = match self.store.find_tour(record.id).await? {
                Some(mut existing) => {
                    existing.apply(draft);
                    existing
                }
                None => Tour {
                    id: record.id,
                    ..Tour::new(draft)
                },
            };
            tours.push(tour);
        }

        for tour in &tours {
            self.store.save_tour(tour).await?;
        }

        tracing::info!("imported {} tours", tours.len());

        Ok(tours.len())
    }

    #[tracing::instrument(skip(self))]
    async fn export_tour_logs(&self, format: Format) -> Result<String, Error> {
        let logs = self.store.list_tour_logs(None).await?;

        transfer::encode_tour_logs(&logs, format)
    }

    /// Upserts by id. Logs pointing at an unknown tour reject the whole import.
    #[tracing::instrument(skip(self, body))]
    async fn import_tour_logs(&self, format: Format, body: &str) -> Result<usize, Error> {
        let records = transfer::decode_tour_logs(body, format)?;
        let mut logs = Vec::with_capacity(records.len());

        for record in records {
            let draft = record.to_draft();
            draft.validate()?;

            if self.store.find_tour(draft.tour_id).await?.is_none() {
                tracing::warn!("log {} refers to unknown tour {}", record.id, draft.tour_id);
                return Err(invalid_field_error("tour_id"));
            }

            let log = match self.store.find_tour_log(record.id).await? {
                Some(mut existing) => {
                    existing.apply(draft);
                    existing
                }
                None => TourLog {
                    id: record.id,
                    ..TourLog::new(draft)
                },
            };
            logs.push(log);
        }

        for log in &logs {
            self.store.save_tour_log(log).await?;
        }

        tracing::info!("imported {} tour logs", logs.len());

        Ok(logs.len())
    }
}
