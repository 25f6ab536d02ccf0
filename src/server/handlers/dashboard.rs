use axum::extract::{Extension, Json};

use crate::api::DynAPI;
use crate::entities::{DemandTrendRow, ModelMetrics, RideDistributionRow, TimePriceRow};
use crate::error::Error;

pub async fn demand_trend(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<DemandTrendRow>>, Error> {
    let rows = api.demand_trend().await?;

    Ok(rows.into())
}

pub async fn time_price(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<TimePriceRow>>, Error> {
    let rows = api.time_price_trend().await?;

    Ok(rows.into())
}

pub async fn ride_distribution(
    Extension(api): Extension<DynAPI>,
) -> Result<Json<Vec<RideDistributionRow>>, Error> {
    let rows = api.ride_distribution().await?;

    Ok(rows.into())
}

pub async fn model_metrics(Extension(api): Extension<DynAPI>) -> Result<Json<ModelMetrics>, Error> {
    let metrics = api.model_metrics().await?;

    Ok(metrics.into())
}
