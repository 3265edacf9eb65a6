use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    GeoCode, RouteRequest, RouteResult, Statistics, Tour, TourDraft, TourLog, TourLogDraft,
};
use crate::error::Error;
use crate::transfer::Format;

#[async_trait]
pub trait RouteAPI {
    async fn resolve_route(&self, request: RouteRequest) -> Result<RouteResult, Error>;
    async fn suggest_locations(&self, text: &str) -> Result<Vec<GeoCode>, Error>;
}

#[async_trait]
pub trait TourAPI {
    async fn create_tour(&self, draft: TourDraft) -> Result<Tour, Error>;
    async fn update_tour(&self, id: Uuid, draft: TourDraft) -> Result<Tour, Error>;
    async fn delete_tour(&self, id: Uuid) -> Result<(), Error>;
    async fn find_tour(&self, id: Uuid) -> Result<Tour, Error>;
    async fn list_tours(&self) -> Result<Vec<Tour>, Error>;
    async fn search_tours(&self, text: &str) -> Result<Vec<Tour>, Error>;
    async fn tour_route(&self, id: Uuid) -> Result<RouteResult, Error>;
}

#[async_trait]
pub trait TourLogAPI {
    async fn create_tour_log(&self, draft: TourLogDraft) -> Result<TourLog, Error>;
    async fn update_tour_log(&self, id: Uuid, draft: TourLogDraft) -> Result<TourLog, Error>;
    async fn delete_tour_log(&self, id: Uuid) -> Result<(), Error>;
    async fn find_tour_log(&self, id: Uuid) -> Result<TourLog, Error>;
    async fn list_tour_logs(&self, tour_id: Uuid) -> Result<Vec<TourLog>, Error>;
    async fn list_all_tour_logs(&self) -> Result<Vec<TourLog>, Error>;
    async fn search_tour_logs(&self, text: &str) -> Result<Vec<TourLog>, Error>;
    async fn count_tour_logs(&self, tour_id: Uuid) -> Result<usize, Error>;
}

#[async_trait]
pub trait StatisticsAPI {
    async fn statistics(&self) -> Result<Statistics, Error>;
}

#[async_trait]
pub trait TransferAPI {
    async fn export_tours(&self, format: Format) -> Result<String, Error>;
    /// Returns the number of tours written.
    async fn import_tours(&self, format: Format, body: &str) -> Result<usize, Error>;
    async fn export_tour_logs(&self, format: Format) -> Result<String, Error>;
    async fn import_tour_logs(&self, format: Format, body: &str) -> Result<usize, Error>;
}

pub trait API: RouteAPI + TourAPI + TourLogAPI + StatisticsAPI + TransferAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
