use axum::extract::{Extension, Json, Path, Query};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{RouteResult, Tour, TourDraft, TourLog};
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SearchParams {
    search: Option<String>,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(draft): Json<TourDraft>,
) -> Result<(StatusCode, Json<Tour>), Error> {
    let tour = api.create_tour(draft).await?;

    Ok((StatusCode::CREATED, tour.into()))
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Tour>>, Error> {
    let tours = match params.search {
        Some(text) => api.search_tours(&text).await?,
        None => api.list_tours().await?,
    };

    Ok(tours.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tour>, Error> {
    let tour = api.find_tour(id).await?;

    Ok(tour.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(draft): Json<TourDraft>,
) -> Result<Json<Tour>, Error> {
    let tour = api.update_tour(id, draft).await?;

    Ok(tour.into())
}

pub async fn delete(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    api.delete_tour(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn route(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteResult>, Error> {
    let route = api.tour_route(id).await?;

    Ok(route.into())
}

pub async fn logs(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TourLog>>, Error> {
    let logs = api.list_tour_logs(id).await?;

    Ok(logs.into())
}
