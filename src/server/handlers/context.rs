use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::MobilityContext;
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct FindParams {
    location: String,
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<FindParams>,
) -> Result<Json<MobilityContext>, Error> {
    let context = api.resolve_context(params.location).await?;

    Ok(context.into())
}
