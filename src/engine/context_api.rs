use super::Engine;

use async_trait::async_trait;
use chrono::{Datelike, Local, Timelike};

use crate::api::ContextAPI;
use crate::entities::{DayType, MobilityContext, TimeOfDay};
use crate::error::Error;
use crate::external::WeatherQuery;
use crate::pricing;

#[async_trait]
impl ContextAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn resolve_context(&self, location: String) -> Result<MobilityContext, Error> {
        let now = Local::now();
        let time_of_day = TimeOfDay::from_hour(now.hour());
        let day_type = DayType::from_weekday(now.weekday());

        let weather = self
            .current_weather(&WeatherQuery {
                location: Some(location),
                coords: None,
            })
            .await;

        // No route in hand here, so traffic falls back to the hourly rule.
        let traffic = pricing::traffic_by_hour(now.hour());
        let demand = pricing::predict_demand(time_of_day, day_type, weather);

        Ok(MobilityContext {
            time_of_day,
            day_type,
            weather,
            traffic,
            demand,
        })
    }
}
