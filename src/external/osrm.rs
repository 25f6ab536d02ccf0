use async_trait::async_trait;
use serde::Deserialize;
use std::env;

use crate::entities::{Coordinates, RouteEstimate};
use crate::error::{upstream_error, Error};
use crate::routing::{RouteProvider, RouteQuery};

const USER_AGENT: &str = "farecast/1.0";

/// Keyless secondary provider: Nominatim geocoding + the public OSRM router.
#[derive(Debug)]
pub struct Osrm;

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    // Nominatim returns coordinates as strings.
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    // meters / seconds
    distance: f64,
    duration: f64,
}

fn nominatim_base() -> String {
    env::var("NOMINATIM_API_BASE").unwrap_or_else(|_| "nominatim.openstreetmap.org".into())
}

fn osrm_base() -> String {
    env::var("OSRM_API_BASE").unwrap_or_else(|_| "router.project-osrm.org".into())
}

#[tracing::instrument]
async fn geocode(text: &str) -> Result<Coordinates, Error> {
    let url = format!("https://{}/search", nominatim_base());

    let res = reqwest::Client::new()
        .get(url)
        .header("User-Agent", USER_AGENT)
        .query(&[("q", text), ("format", "json"), ("limit", "1")])
        .send()
        .await?;

    if res.status().as_u16() != 200 {
        return Err(upstream_error());
    }

    let places: Vec<NominatimPlace> = res.json().await?;
    let place = places.first().ok_or_else(upstream_error)?;

    let latitude: f64 = place.lat.parse().map_err(|_| upstream_error())?;
    let longitude: f64 = place.lon.parse().map_err(|_| upstream_error())?;

    Ok(Coordinates::new(latitude, longitude))
}

#[async_trait]
impl RouteProvider for Osrm {
    fn name(&self) -> &'static str {
        "osrm"
    }

    #[tracing::instrument(skip(self))]
    async fn route(&self, query: &RouteQuery) -> Result<RouteEstimate, Error> {
        let start = match query.pickup_coords {
            Some(coords) => coords,
            None => geocode(&query.pickup).await?,
        };

        let end = match query.drop_coords {
            Some(coords) => coords,
            None => geocode(&query.drop).await?,
        };

        let url = format!(
            "http://{}/route/v1/driving/{},{};{},{}",
            osrm_base(),
            start.longitude,
            start.latitude,
            end.longitude,
            end.latitude,
        );

        let res = reqwest::Client::new()
            .get(url)
            .query(&[("overview", "false")])
            .send()
            .await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let data: OsrmResponse = res.json().await?;
        let route = data.routes.first().ok_or_else(upstream_error)?;

        Ok(RouteEstimate::new(
            (route.distance / 1000.0 * 10.0).round() / 10.0,
            (route.duration / 60.0).round(),
        ))
    }
}
