use axum::extract::{Extension, Json, Path, Query};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{TourLog, TourLogDraft};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    search: Option<String>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(draft): Json<TourLogDraft>,
) -> Result<(StatusCode, Json<TourLog>), Error> {
    let log = api.create_tour_log(draft).await?;

    Ok((StatusCode::CREATED, log.into()))
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<TourLog>>, Error> {
    let logs = match params.search {
        Some(text) => api.search_tour_logs(&text).await?,
        None => api.list_all_tour_logs().await?,
    };

    Ok(logs.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<TourLog>, Error> {
    let log = api.find_tour_log(id).await?;

    Ok(log.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(draft): Json<TourLogDraft>,
) -> Result<Json<TourLog>, Error> {
    let log = api.update_tour_log(id, draft).await?;

    Ok(log.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    api.delete_tour_log(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
