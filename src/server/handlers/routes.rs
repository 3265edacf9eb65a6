use axum::extract::{Extension, Json};

use crate::entities::{RouteRequest, RouteResult};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn resolve(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResult>, Error> {
    let route = api.resolve_route(request).await?;

    Ok(route.into())
}
