use super::Engine;

use async_trait::async_trait;

use crate::{api::StatisticsAPI, entities::Statistics, error::Error};

#[async_trait]
impl StatisticsAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn statistics(&self) -> Result<Statistics, Error> {
        let tours = self.store.list_tours().await?;
        let logs = self.store.list_tour_logs(None).await?;

        Ok(Statistics::compute(&tours, &logs))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::api::{TourAPI, TourLogAPI};
    use crate::engine::testing::engine;
    use crate::entities::{TourDraft, TourLogDraft};

    #[tokio::test]
    async fn statistics_reflect_stored_tours_and_logs() {
        let engine = engine();

        let quiet = engine
            .create_tour(TourDraft {
                name: "quiet".into(),
                distance_km: 4.0,
                ..TourDraft::default()
            })
            .await
            .unwrap();
        let busy = engine
            .create_tour(TourDraft {
                name: "busy".into(),
                distance_km: 8.0,
                ..TourDraft::default()
            })
            .await
            .unwrap();

        for rating in [3.0, 5.0] {
            engine
                .create_tour_log(TourLogDraft {
                    tour_id: busy.id,
                    date_time: NaiveDate::from_ymd_opt(2024, 9, 1)
                        .unwrap()
                        .and_hms_opt(12, 0, 0)
                        .unwrap(),
                    comment: String::new(),
                    difficulty: 2.0,
                    total_distance_km: 8.0,
                    total_time_hours: 2.0,
                    rating,
                })
                .await
                .unwrap();
        }

        let stats = engine.statistics().await.unwrap();

        assert_eq!(stats.total_tours, 2);
        assert_eq!(stats.total_logs, 2);
        assert_eq!(stats.average_distance_km, 6.0);
        assert_eq!(stats.average_rating, 4.0);

        let popular = stats.most_popular.unwrap();
        assert_eq!(popular.tour_id, busy.id);
        assert_eq!(popular.log_count, 2);

        let quiet_stats = stats.tours.iter().find(|s| s.tour_id == quiet.id).unwrap();
        assert_eq!(quiet_stats.log_count, 0);
    }
}
