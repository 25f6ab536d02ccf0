use super::Engine;

use async_trait::async_trait;
use chrono::{Datelike, Local, Timelike};

use crate::api::FareAPI;
use crate::entities::{
    normalize_zone, Coordinates, DayType, FareQuote, QuoteRequest, RideContext, RideType,
    SmartQuote, SmartQuoteRequest, TimeOfDay, TripContext,
};
use crate::error::{validation_error, Error};
use crate::external::WeatherQuery;
use crate::pricing;
use crate::routing::RouteQuery;

fn parse_coords(raw: &Option<Vec<f64>>) -> Result<Option<Coordinates>, Error> {
    match raw {
        None => Ok(None),
        Some(values) => match values.as_slice() {
            [latitude, longitude] => Ok(Some(Coordinates::new(*latitude, *longitude))),
            _ => Err(validation_error("coordinates must be [lat, lon]")),
        },
    }
}

#[async_trait]
impl FareAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_quote(&self, request: QuoteRequest) -> Result<FareQuote, Error> {
        let context = RideContext::from_request(&request)?;

        let quote = pricing::quote(&self.config, &context, self.model.as_ref())?;
        self.store_prediction(&context, &quote).await;

        Ok(quote)
    }

    #[tracing::instrument(skip(self))]
    async fn create_smart_quote(&self, request: SmartQuoteRequest) -> Result<SmartQuote, Error> {
        let now = Local::now();
        let time_of_day = TimeOfDay::from_hour(now.hour());
        let day_type = DayType::from_weekday(now.weekday());

        let pickup_coords = parse_coords(&request.pickup_coords)?;
        let drop_coords = parse_coords(&request.drop_coords)?;

        let route = self
            .resolver
            .resolve(&RouteQuery {
                pickup: request.pickup.clone(),
                drop: request.drop.clone(),
                pickup_coords,
                drop_coords,
            })
            .await?;

        let weather = self
            .current_weather(&WeatherQuery {
                location: Some(request.pickup.clone()),
                coords: pickup_coords,
            })
            .await;

        let traffic = pricing::estimate_traffic(route.duration_min, route.distance_km, time_of_day);
        let demand = pricing::predict_demand(time_of_day, day_type, weather);

        let context = RideContext {
            ride_type: RideType::from_label(&request.ride_type),
            distance_km: route.distance_km,
            time_of_day,
            day_type,
            demand_level: demand,
            traffic_condition: traffic,
            weather_condition: weather,
            pickup_zone: normalize_zone(&request.pickup),
        };

        let quote = pricing::quote(&self.config, &context, self.model.as_ref())?;
        self.store_prediction(&context, &quote).await;

        Ok(SmartQuote {
            quote,
            context: TripContext {
                distance_km: route.distance_km,
                duration_min: route.duration_min,
                weather,
                traffic,
                demand,
                time_of_day,
                day_type,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_arrays_must_be_lat_lon_pairs() {
        assert_eq!(parse_coords(&None).unwrap(), None);
        assert_eq!(
            parse_coords(&Some(vec![11.0, 76.9])).unwrap(),
            Some(Coordinates::new(11.0, 76.9))
        );
        assert!(parse_coords(&Some(vec![11.0])).is_err());
        assert!(parse_coords(&Some(vec![11.0, 76.9, 1.0])).is_err());
    }
}
