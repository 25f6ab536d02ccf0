use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::DynAPI;
use crate::entities::{Coordinates, RouteEstimate};
use crate::error::Error;
use crate::routing::RouteQuery;

#[derive(Serialize, Deserialize)]
pub struct EstimateParams {
    pickup_city: String,
    drop_city: String,
    pickup_coords: Option<Coordinates>,
    drop_coords: Option<Coordinates>,
}

pub async fn estimate(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<EstimateParams>,
) -> Result<Json<RouteEstimate>, Error> {
    let estimate = api
        .estimate_route(RouteQuery {
            pickup: params.pickup_city,
            drop: params.drop_city,
            pickup_coords: params.pickup_coords,
            drop_coords: params.drop_coords,
        })
        .await?;

    Ok(estimate.into())
}

#[derive(Serialize, Deserialize)]
pub struct InfoParams {
    from: String,
    to: String,
}

pub async fn info(
    Extension(api): Extension<DynAPI>,
    Query(params): Query<InfoParams>,
) -> Result<Json<RouteEstimate>, Error> {
    let route = api.find_route_info(params.from, params.to).await?;

    Ok(route.into())
}
