use axum::extract::{Extension, Json, Query};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Error;
use crate::server::DynAPI;
use crate::transfer::Format;

#[derive(Serialize, Deserialize)]
pub struct FormatParams {
    #[serde(default)]
    format: Format,
}

fn attachment(format: Format, body: String) -> Response {
    ([(header::CONTENT_TYPE, format.content_type())], body).into_response()
}

pub async fn export_tours(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FormatParams>,
) -> Result<Response, Error> {
    let body = api.export_tours(params.format).await?;

    Ok(attachment(params.format, body))
}

#[debug_handler]
pub async fn import_tours(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FormatParams>,
    body: String,
) -> Result<Json<Value>, Error> {
    let imported = api.import_tours(params.format, &body).await?;

    Ok(json!({ "imported": imported }).into())
}

pub async fn export_tour_logs(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FormatParams>,
) -> Result<Response, Error> {
    let body = api.export_tour_logs(params.format).await?;

    Ok(attachment(params.format, body))
}

#[debug_handler]
pub async fn import_tour_logs(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FormatParams>,
    body: String,
) -> Result<Json<Value>, Error> {
    let imported = api.import_tour_logs(params.format, &body).await?;

    Ok(json!({ "imported": imported }).into())
}
