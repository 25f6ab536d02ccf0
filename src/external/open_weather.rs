use async_trait::async_trait;
use serde::Deserialize;
use std::env;

use crate::entities::{Coordinates, WeatherCondition};
use crate::error::{upstream_error, Error};

#[derive(Clone, Debug)]
pub struct WeatherQuery {
    pub location: Option<String>,
    pub coords: Option<Coordinates>,
}

/// Weather capability: given a location label or coordinates, return a
/// categorical weather condition. Failures are absorbed upstream by
/// defaulting to Clear.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherCondition, Error>;
}

#[derive(Debug)]
pub struct OpenWeather;

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    weather: Vec<WeatherEntry>,
}

#[derive(Debug, Deserialize)]
struct WeatherEntry {
    main: String,
}

fn api_base() -> String {
    env::var("OPENWEATHER_API_BASE").unwrap_or_else(|_| "api.openweathermap.org".into())
}

#[async_trait]
impl WeatherProvider for OpenWeather {
    #[tracing::instrument(skip(self))]
    async fn current_weather(&self, query: &WeatherQuery) -> Result<WeatherCondition, Error> {
        let key = env::var("OPENWEATHER_API_KEY")?;

        let url = format!("https://{}/data/2.5/weather", api_base());

        let mut request = reqwest::Client::new()
            .get(url)
            .query(&[("appid", key)])
            .query(&[("units", "metric")]);

        if let Some(coords) = query.coords {
            request = request.query(&[("lat", coords.latitude), ("lon", coords.longitude)]);
        } else if let Some(location) = &query.location {
            request = request.query(&[("q", location)]);
        } else {
            return Ok(WeatherCondition::Clear);
        }

        let res = request.send().await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let data: WeatherResponse = res.json().await?;
        let entry = data.weather.first().ok_or_else(upstream_error)?;

        // The alias table maps raw API categories (Rain, Drizzle, Clouds,
        // Mist, ...) onto the canonical set.
        Ok(WeatherCondition::from_label(&entry.main))
    }
}
