use axum::extract::{Extension, Json};

use crate::entities::Statistics;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<Statistics>, Error> {
    let statistics = api.statistics().await?;

    Ok(statistics.into())
}
