use super::Engine;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{Executor, Row};
use std::fs;

use crate::api::AnalyticsAPI;
use crate::entities::{DemandTrendRow, ModelMetrics, RideDistributionRow, TimePriceRow};
use crate::error::Error;
use crate::pricing::round2;

fn time_of_day_order(label: &str) -> u8 {
    match label {
        "Morning" => 1,
        "Afternoon" => 2,
        "Evening" => 3,
        "Night" => 4,
        _ => 5,
    }
}

#[async_trait]
impl AnalyticsAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn demand_trend(&self) -> Result<Vec<DemandTrendRow>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut results = conn.fetch(sqlx::query(
            "SELECT demand_level, AVG(final_fare) AS avg_fare
             FROM predictions GROUP BY demand_level",
        ));

        let mut rows = Vec::new();

        while let Some(row) = results.try_next().await? {
            rows.push(DemandTrendRow {
                demand_level: row.try_get("demand_level")?,
                avg_fare: round2(row.try_get("avg_fare")?),
            });
        }

        Ok(rows)
    }

    #[tracing::instrument(skip(self))]
    async fn time_price_trend(&self) -> Result<Vec<TimePriceRow>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut results = conn.fetch(sqlx::query(
            "SELECT time_of_day, AVG(final_fare) AS avg_fare
             FROM predictions GROUP BY time_of_day",
        ));

        let mut rows = Vec::new();

        while let Some(row) = results.try_next().await? {
            rows.push(TimePriceRow {
                time_of_day: row.try_get("time_of_day")?,
                avg_fare: round2(row.try_get("avg_fare")?),
            });
        }

        rows.sort_by_key(|row| time_of_day_order(&row.time_of_day));

        Ok(rows)
    }

    #[tracing::instrument(skip(self))]
    async fn ride_distribution(&self) -> Result<Vec<RideDistributionRow>, Error> {
        let mut conn = self.pool.acquire().await?;

        let mut results = conn.fetch(sqlx::query(
            "SELECT ride_type, COUNT(*) AS count
             FROM predictions GROUP BY ride_type",
        ));

        let mut rows = Vec::new();

        while let Some(row) = results.try_next().await? {
            rows.push(RideDistributionRow {
                ride_type: row.try_get("ride_type")?,
                count: row.try_get("count")?,
            });
        }

        Ok(rows)
    }

    #[tracing::instrument(skip(self))]
    async fn model_metrics(&self) -> Result<ModelMetrics, Error> {
        // Metrics are written by the offline training job; absence is not an
        // error, the dashboard just shows zeros.
        let metrics = fs::read_to_string(&self.config.metrics_path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Ok(metrics)
    }
}
