use async_trait::async_trait;
use serde::Deserialize;
use std::env;

use crate::entities::{Coordinates, RouteEstimate};
use crate::error::{upstream_error, Error};
use crate::routing::{RouteProvider, RouteQuery};

/// Primary routing provider: OpenRouteService geocoding + directions.
/// Requires OPENROUTESERVICE_API_KEY; without it every call fails and the
/// resolver moves on to the next strategy.
#[derive(Debug)]
pub struct OpenRouteService;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    // [lon, lat]
    coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    features: Vec<DirectionsFeature>,
}

#[derive(Debug, Deserialize)]
struct DirectionsFeature {
    properties: DirectionsProperties,
}

#[derive(Debug, Deserialize)]
struct DirectionsProperties {
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    // meters / seconds
    distance: f64,
    duration: f64,
}

fn api_base() -> String {
    env::var("ORS_API_BASE").unwrap_or_else(|_| "api.openrouteservice.org".into())
}

#[tracing::instrument(skip(key))]
async fn geocode(key: &str, text: &str) -> Result<Coordinates, Error> {
    let url = format!("https://{}/geocode/search", api_base());

    let res = reqwest::Client::new()
        .get(url)
        .header("Authorization", key)
        .query(&[("text", text)])
        .send()
        .await?;

    if res.status().as_u16() != 200 {
        return Err(upstream_error());
    }

    let data: GeocodeResponse = res.json().await?;
    let feature = data.features.first().ok_or_else(upstream_error)?;

    match feature.geometry.coordinates.as_slice() {
        [longitude, latitude, ..] => Ok(Coordinates::new(*latitude, *longitude)),
        _ => Err(upstream_error()),
    }
}

#[async_trait]
impl RouteProvider for OpenRouteService {
    fn name(&self) -> &'static str {
        "openrouteservice"
    }

    #[tracing::instrument(skip(self))]
    async fn route(&self, query: &RouteQuery) -> Result<RouteEstimate, Error> {
        let key = env::var("OPENROUTESERVICE_API_KEY")?;

        let start = match query.pickup_coords {
            Some(coords) => coords,
            None => geocode(&key, &query.pickup).await?,
        };

        let end = match query.drop_coords {
            Some(coords) => coords,
            None => geocode(&key, &query.drop).await?,
        };

        let url = format!("https://{}/v2/directions/driving-car", api_base());

        let res = reqwest::Client::new()
            .get(url)
            .header("Authorization", &key)
            .query(&[
                ("start", format!("{},{}", start.longitude, start.latitude)),
                ("end", format!("{},{}", end.longitude, end.latitude)),
            ])
            .send()
            .await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let data: DirectionsResponse = res.json().await?;

        let segment = data
            .features
            .first()
            .and_then(|feature| feature.properties.segments.first())
            .ok_or_else(upstream_error)?;

        Ok(RouteEstimate::new(
            (segment.distance / 1000.0 * 10.0).round() / 10.0,
            (segment.duration / 60.0).round(),
        ))
    }
}
