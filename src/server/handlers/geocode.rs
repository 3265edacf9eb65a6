use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::entities::GeoCode;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    text: String,
}

pub async fn suggestions(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<GeoCode>>, Error> {
    let suggestions = api.suggest_locations(&params.text).await?;

    Ok(suggestions.into())
}
