mod analytics_api;
mod context_api;
mod fare_api;
mod route_api;

use chrono::Utc;
use sqlx::{types::Json, Executor, Pool, Postgres};
use std::sync::Arc;
use tokio::time::timeout;

use crate::api::API;
use crate::config::PricingConfig;
use crate::entities::{FareQuote, RideContext, WeatherCondition};
use crate::error::Error;
use crate::external::{OpenRouteService, OpenWeather, Osrm, WeatherProvider, WeatherQuery};
use crate::model::LazyModel;
use crate::routing::RouteResolver;

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    config: PricingConfig,
    resolver: RouteResolver,
    weather: Box<dyn WeatherProvider>,
    model: Arc<LazyModel>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>, config: PricingConfig) -> Result<Self, Error> {
        // prediction log (quote history for the dashboard)
        pool.execute(
            "CREATE TABLE IF NOT EXISTS predictions (
                token UUID PRIMARY KEY,
                ride_type VARCHAR NOT NULL,
                time_of_day VARCHAR NOT NULL,
                demand_level VARCHAR NOT NULL,
                base_fare DOUBLE PRECISION NOT NULL,
                surge_multiplier DOUBLE PRECISION NOT NULL,
                final_fare DOUBLE PRECISION NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
        )
        .await?;

        let resolver = RouteResolver::new(
            vec![Box::new(OpenRouteService), Box::new(Osrm)],
            config.clone(),
        );
        let model = Arc::new(LazyModel::new(config.model_path.clone()));

        Ok(Self {
            pool,
            config,
            resolver,
            weather: Box::new(OpenWeather),
            model,
        })
    }

    /// Weather lookup with the standard upstream timeout; any failure
    /// degrades to Clear.
    pub(crate) async fn current_weather(&self, query: &WeatherQuery) -> WeatherCondition {
        match timeout(
            self.config.upstream_timeout,
            self.weather.current_weather(query),
        )
        .await
        {
            Ok(Ok(weather)) => weather,
            Ok(Err(err)) => {
                tracing::warn!(code = err.code, "weather lookup failed, assuming Clear");
                WeatherCondition::Clear
            }
            Err(_) => {
                tracing::warn!("weather lookup timed out, assuming Clear");
                WeatherCondition::Clear
            }
        }
    }

    /// Fire-and-forget quote history write; a failed insert never fails the
    /// request that produced the quote.
    pub(crate) async fn store_prediction(&self, context: &RideContext, quote: &FareQuote) {
        let result = async {
            let mut conn = self.pool.acquire().await?;

            conn.execute(
                sqlx::query(
                    "INSERT INTO predictions
                        (token, ride_type, time_of_day, demand_level, base_fare, surge_multiplier, final_fare, data, created_at)
                        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                )
                .bind(&quote.token)
                .bind(context.ride_type.as_str())
                .bind(context.time_of_day.as_str())
                .bind(context.demand_level.as_str())
                .bind(quote.base_fare)
                .bind(quote.surge_multiplier)
                .bind(quote.final_fare)
                .bind(Json(serde_json::json!({ "context": context, "quote": quote })))
                .bind(Utc::now()),
            )
            .await?;

            Ok::<(), Error>(())
        }
        .await;

        if let Err(err) = result {
            tracing::warn!(code = err.code, "failed to persist prediction");
        }
    }
}

impl API for Engine {}
